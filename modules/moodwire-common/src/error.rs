use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoodwireError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No free-text column found: expected one of {candidates:?}, artifact has {headers:?}")]
    Schema {
        candidates: Vec<String>,
        headers: Vec<String>,
    },

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
