//! Error types for the reservation board

/// Errors that can occur while configuring or running the board
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dashboard error: {0}")]
    Dashboard(String),
}

/// Result type alias for reservation board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Why a reservation fetch did not produce a list.
///
/// The `Display` text is what the view shows after `Error: `.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// A response arrived but its status was outside 2xx
    #[error("HTTP error! Status: {0}")]
    Status(u16),

    /// The request never completed
    #[error("{0}")]
    Transport(String),

    /// The body was not a JSON array of reservations
    #[error("{0}")]
    Parse(String),
}

impl From<BoardError> for FetchError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::Json(e) => FetchError::Parse(e.to_string()),
            other => FetchError::Transport(other.to_string()),
        }
    }
}
