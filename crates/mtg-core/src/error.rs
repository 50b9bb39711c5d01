use thiserror::Error;

#[derive(Debug, Error)]
pub enum MtgError {
    #[error("appointment text must not be empty")]
    EmptyText,

    #[error("could not parse a meeting time from '{0}'")]
    UnparseableDate(String),

    #[error("appointment store at {location} is unreadable: {source}")]
    UnreadableBlob {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("appointment store at {location} is malformed: {source}")]
    CorruptBlob {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to save appointments to {location}: {source}")]
    SaveFailed {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("notifier program not found: {0}")]
    NotifierNotFound(String),

    #[error("notifier '{program}' exited with {status}")]
    NotifierFailed { program: String, status: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl MtgError {
    /// Load or save failures of the appointment blob.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            MtgError::UnreadableBlob { .. } | MtgError::CorruptBlob { .. } | MtgError::SaveFailed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MtgError>;
