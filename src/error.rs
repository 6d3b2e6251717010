use thiserror::Error;

/// A required setting is missing or cannot be parsed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("Invalid {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// The competition-list request failed or returned something unusable.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Competition list request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Competition list request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to parse competition list: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The chat-bot API did not accept a message.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Telegram rejected message (status {status}): {description}")]
    Rejected { status: u16, description: String },

    #[error("Failed to reach Telegram: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mentions_status_and_body() {
        let err = Error::from(FetchError::Status {
            status: 500,
            body: "Internal Server Error".to_string(),
        });
        let text = err.to_string();
        assert!(text.contains("500"));
        assert!(text.contains("Internal Server Error"));
    }

    #[test]
    fn test_pass_error_is_transparent_over_delivery() {
        let err = Error::from(DeliveryError::Rejected {
            status: 400,
            description: "Bad Request: chat not found".to_string(),
        });
        assert!(matches!(err, Error::Delivery(_)));
        assert_eq!(
            err.to_string(),
            "Telegram rejected message (status 400): Bad Request: chat not found"
        );
    }

    #[test]
    fn test_missing_config_names_variable() {
        let err = ConfigError::Missing("TELEGRAM_TOKEN");
        assert_eq!(err.to_string(), "TELEGRAM_TOKEN not set");
    }
}
