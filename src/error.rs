//! Failure taxonomy shared by every lookup.

use thiserror::Error;

/// Error produced by a lookup attempt, a fallback chain or input validation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// Transport failure, timeout or non-2xx status
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// Success status but the expected fields were missing or malformed
    #[error("invalid response shape: {0}")]
    InvalidResponseShape(String),

    /// Every attempt failed and no static value applied
    #[error("{message}")]
    AllSourcesExhausted {
        message: String,
        last: Box<LookupError>,
    },

    /// User input failed a local precondition; no network call was made
    #[error("{0}")]
    Validation(String),
}

impl LookupError {
    pub fn unavailable<S: Into<String>>(message: S) -> Self {
        Self::SourceUnavailable(message.into())
    }

    pub fn shape<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponseShape(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn exhausted<S: Into<String>>(message: S, last: LookupError) -> Self {
        Self::AllSourcesExhausted {
            message: message.into(),
            last: Box::new(last),
        }
    }

    /// Whether a fallback chain may advance past this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable(_) | Self::InvalidResponseShape(_)
        )
    }

    /// Underlying provider error for diagnostics
    pub fn detail(&self) -> String {
        match self {
            Self::AllSourcesExhausted { last, .. } => last.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponseShape(err.to_string())
        } else {
            Self::SourceUnavailable(err.to_string())
        }
    }
}
