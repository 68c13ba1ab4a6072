//! Error types for `taskboard`.

/// Errors that can occur in the task client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The HTTP client failed to build a request or read a response body.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No response was received from the API server.
    #[error("Unable to connect to the server. Please check if the API is running.")]
    Unreachable,

    /// The API server answered with a non-success status.
    #[error("Server error: {status} {status_text}")]
    Server {
        /// The HTTP status code.
        status: u16,
        /// The canonical reason phrase for the status.
        status_text: String,
    },

    /// A template error occurred.
    #[error("Template error: {0}")]
    Template(String),

    /// A requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User input could not be accepted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreachable_message() {
        assert_eq!(
            Error::Unreachable.to_string(),
            "Unable to connect to the server. Please check if the API is running."
        );
    }

    #[test]
    fn test_server_message() {
        let err = Error::Server { status: 404, status_text: "Not Found".to_string() };
        assert_eq!(err.to_string(), "Server error: 404 Not Found");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parse.unwrap_err().into();
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
