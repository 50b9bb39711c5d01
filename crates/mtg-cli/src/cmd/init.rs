use crate::app::App;
use crate::output::print_json;
use anyhow::Context;
use mtg_core::Store;

pub fn run(app: &App, json: bool) -> anyhow::Result<()> {
    let path = app.blob_path();
    let created = Store::init(app.store.persistence())
        .with_context(|| format!("failed to initialize {}", path.display()))?;

    if json {
        print_json(&serde_json::json!({ "path": path, "created": created }))?;
    } else if created {
        println!("Appointment store initialized at {}.", path.display());
    } else {
        println!("Appointment store already exists at {}.", path.display());
    }
    Ok(())
}
