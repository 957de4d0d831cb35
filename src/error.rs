use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrthokeysError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid key string: {0:?}")]
    InvalidKey(String),

    #[error("A handler for {key} is already registered in this window")]
    DuplicateHandler { key: String },

    #[error("Required widget not found: {0}")]
    WidgetMissing(&'static str),

    #[error("Focused widget is not inside either pane")]
    FocusOutsidePanes,

    #[error("No command configured for {0}")]
    EmptyCommand(&'static str),

    #[error("Failed to start {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a local file URI: {0}")]
    NotFileUri(String),
}

pub type Result<T> = std::result::Result<T, OrthokeysError>;
