use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexicardError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("Content generation failed: {0}")]
    Generation(String),

    #[error("Word list is empty")]
    EmptyWordList,

    #[error("LexicardError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for LexicardError {
    fn from(error: std::io::Error) -> Self {
        LexicardError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for LexicardError {
    fn from(error: reqwest::Error) -> Self {
        LexicardError::Reqwest(Box::new(error))
    }
}
