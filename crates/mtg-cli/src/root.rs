use mtg_core::config::Config;
use mtg_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the config file location.
///
/// Priority:
/// 1. `--config` flag / `MTG_CONFIG` env var (passed in as `explicit`)
/// 2. `~/.mtgrc.yaml`
pub fn resolve_config_path(explicit: Option<&Path>) -> mtg_core::Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    Ok(paths::config_path(&paths::home_dir()?))
}

/// Resolve the appointment store location.
///
/// Priority:
/// 1. `--blob` flag / `MTG_BLOB` env var (passed in as `explicit`)
/// 2. `blob` in the config file, with a leading `~/` expanded
/// 3. `~/.mtgrc.json`
pub fn resolve_blob_path(explicit: Option<&Path>, config: &Config) -> mtg_core::Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    if let Some(p) = &config.blob {
        if let Ok(rest) = p.strip_prefix("~") {
            return Ok(paths::home_dir()?.join(rest));
        }
        return Ok(p.clone());
    }
    Ok(paths::blob_path(&paths::home_dir()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_paths_win() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            blob: Some(PathBuf::from("/elsewhere/appointments.json")),
            ..Config::default()
        };
        let blob = dir.path().join("blob.json");
        assert_eq!(resolve_blob_path(Some(&blob), &config).unwrap(), blob);

        let cfg = dir.path().join("mtg.yaml");
        assert_eq!(resolve_config_path(Some(&cfg)).unwrap(), cfg);
    }

    #[test]
    fn config_blob_used_when_no_flag() {
        let config = Config {
            blob: Some(PathBuf::from("/data/appointments.json")),
            ..Config::default()
        };
        assert_eq!(
            resolve_blob_path(None, &config).unwrap(),
            PathBuf::from("/data/appointments.json")
        );
    }

    #[test]
    fn config_blob_expands_home() {
        let Some(home) = mtg_core::paths::home_dir().ok() else {
            return;
        };
        let config = Config {
            blob: Some(PathBuf::from("~/notes/mtg.json")),
            ..Config::default()
        };
        assert_eq!(
            resolve_blob_path(None, &config).unwrap(),
            home.join("notes/mtg.json")
        );
    }
}
