use std::path::PathBuf;

// ============================================================================
// Recipe Construction Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("Recipe has no start command")]
    MissingStartCommand,

    #[error("Invalid value for option `{key}`: {reason}")]
    InvalidOption { key: String, reason: String },

    #[error("Could not read options file {path:?}")]
    ReadOptions {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse options file {path:?}")]
    ParseOptions {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Options document {path:?} is not a mapping")]
    NotAMapping { path: PathBuf },

    #[error("Could not create directory {path:?}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Supervisor rejected watch `{name}`: {message}")]
    Rejected { name: String, message: String },
}
