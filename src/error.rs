use thiserror::Error;

#[derive(Error, Debug)]
pub enum InsightsError {
    #[error("Failed to read report: {path}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to write insights document: {path}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, InsightsError>;
