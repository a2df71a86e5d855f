use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid coordinates in sheet {category}: lat={latitude:?}, lng={longitude:?}")]
    InvalidCoordinates {
        category: String,
        latitude: Option<String>,
        longitude: Option<String>,
    },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}

impl ProcessingError {
    /// Whether the failure happened while reaching the source rather than reading its body.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            ProcessingError::Io(_)
                | ProcessingError::Http(_)
                | ProcessingError::UnexpectedStatus { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failure_classification() {
        let status = ProcessingError::UnexpectedStatus {
            status: 404,
            url: "https://example.com".to_string(),
        };
        assert!(status.is_fetch_failure());

        let format = ProcessingError::InvalidFormat("missing header row".to_string());
        assert!(!format.is_fetch_failure());

        let io = ProcessingError::Io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(io.is_fetch_failure());
    }

    #[test]
    fn test_invalid_coordinates_message() {
        let err = ProcessingError::InvalidCoordinates {
            category: "和食".to_string(),
            latitude: Some("abc".to_string()),
            longitude: Some("138.4".to_string()),
        };
        let message = err.to_string();
        assert!(message.contains("和食"));
        assert!(message.contains("abc"));
    }
}
