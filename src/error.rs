use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum HandoffError {
    #[error("EXPO_PUBLIC_SUPABASE_URL not found in environment or .env file")]
    MissingEndpoint,

    #[error("EXPO_PUBLIC_SUPABASE_URL is not a valid URL: {0}")]
    InvalidEndpoint(#[source] url::ParseError),

    #[error("No Supabase key found in environment or .env file")]
    MissingCredential,

    #[error("Supabase key is not usable as an HTTP header value")]
    InvalidCredential,

    #[error("PROXY is not a valid URL: {0}")]
    InvalidProxy(#[source] url::ParseError),

    #[error("SQL file '{}' not found", .path.display())]
    SqlFileNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Upstream error with status: {0}")]
    UpstreamStatus(StatusCode),
}

impl HandoffError {
    /// Process exit status for errors that abort the run.
    pub fn exit_code(&self) -> u8 {
        match self {
            HandoffError::MissingEndpoint
            | HandoffError::InvalidEndpoint(_)
            | HandoffError::MissingCredential
            | HandoffError::InvalidCredential
            | HandoffError::Config(_) => 1,
            HandoffError::SqlFileNotFound { .. } | HandoffError::Io(_) => 1,
            HandoffError::InvalidProxy(_)
            | HandoffError::UrlParse(_)
            | HandoffError::Reqwest(_)
            | HandoffError::UpstreamStatus(_) => 2,
        }
    }

    /// Server errors, refused connections and timeouts are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            HandoffError::UpstreamStatus(status) => status.is_server_error(),
            HandoffError::Reqwest(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fatal_input_errors_exit_with_one() {
        assert_eq!(HandoffError::MissingEndpoint.exit_code(), 1);
        assert_eq!(HandoffError::MissingCredential.exit_code(), 1);
        let err = HandoffError::SqlFileNotFound {
            path: PathBuf::from("fix-database-errors.sql"),
        };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            err.to_string(),
            "SQL file 'fix-database-errors.sql' not found"
        );
    }

    #[test]
    fn only_server_errors_are_transient() {
        assert!(HandoffError::UpstreamStatus(StatusCode::BAD_GATEWAY).is_transient());
        assert!(!HandoffError::UpstreamStatus(StatusCode::NOT_FOUND).is_transient());
        assert!(!HandoffError::InvalidCredential.is_transient());
        assert!(!HandoffError::MissingEndpoint.is_transient());
    }
}
