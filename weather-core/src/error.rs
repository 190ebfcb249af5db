use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong between the search box and the results panel.
///
/// `Display` yields the message shown to the user; details useful only for
/// logs stay in the variant fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Please enter a city name")]
    EmptyInput,

    #[error(
        "API key not configured. Set OPENWEATHER_API_KEY or run `weather configure` and enter your key."
    )]
    MissingCredential,

    #[error("City not found")]
    NotFound,

    #[error("Invalid API key")]
    InvalidCredential,

    #[error("Failed to fetch weather data")]
    FetchFailed { status: u16 },

    #[error("Failed to fetch weather data")]
    Transport(String),

    #[error("Unexpected response from weather service")]
    MalformedResponse(String),
}

impl LookupError {
    /// Classify a non-success HTTP status returned by the provider.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::NOT_FOUND => LookupError::NotFound,
            StatusCode::UNAUTHORIZED => LookupError::InvalidCredential,
            other => LookupError::FetchFailed {
                status: other.as_u16(),
            },
        }
    }

    /// Local errors are detected before any network traffic.
    pub fn is_local(&self) -> bool {
        matches!(self, LookupError::EmptyInput | LookupError::MissingCredential)
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_and_unauthorized_have_specific_messages() {
        let not_found = LookupError::from_status(StatusCode::NOT_FOUND);
        let unauthorized = LookupError::from_status(StatusCode::UNAUTHORIZED);

        assert_eq!(not_found, LookupError::NotFound);
        assert_eq!(unauthorized, LookupError::InvalidCredential);
        assert_eq!(not_found.to_string(), "City not found");
        assert_eq!(unauthorized.to_string(), "Invalid API key");
    }

    #[test]
    fn other_statuses_share_the_generic_message() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::TOO_MANY_REQUESTS,
            StatusCode::BAD_REQUEST,
        ] {
            let err = LookupError::from_status(status);
            assert_eq!(
                err,
                LookupError::FetchFailed {
                    status: status.as_u16()
                }
            );
            assert_eq!(err.to_string(), "Failed to fetch weather data");
        }
    }

    #[test]
    fn missing_credential_tells_operator_what_to_do() {
        let msg = LookupError::MissingCredential.to_string();
        assert!(msg.contains("OPENWEATHER_API_KEY"));
        assert!(msg.contains("weather configure"));
    }

    #[test]
    fn only_validation_and_config_errors_are_local() {
        assert!(LookupError::EmptyInput.is_local());
        assert!(LookupError::MissingCredential.is_local());
        assert!(!LookupError::NotFound.is_local());
        assert!(!LookupError::Transport("reset".into()).is_local());
    }
}
