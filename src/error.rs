use thiserror::Error;

pub type EmbedResult<T> = Result<T, EmbedError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EmbedError {
    #[error("Network error fetching '{url}': {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status} from '{url}'")]
    HttpStatus { url: String, status: u16 },

    #[error("Invalid payload from '{url}': {message}")]
    Payload { url: String, message: String },

    #[error("DOM error: {0}")]
    Dom(String),
}

impl EmbedError {
    /// Short label for the failure class, used in logs and binding reports.
    pub fn kind(&self) -> &'static str {
        match self {
            EmbedError::Network { .. } => "network",
            EmbedError::HttpStatus { .. } => "http",
            EmbedError::Payload { .. } => "payload",
            EmbedError::Dom(_) => "dom",
        }
    }
}
