use reqwest::StatusCode;
use thiserror::Error;

/// Every way the fetch-analyse pipeline can fail. None of them are retried.
#[derive(Debug, Error)]
pub enum UpsetError {
    /// The request never produced a usable response (DNS, TLS, timeout, body read).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from {url}: {body}")]
    Http {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to decode {what}: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("event '{0}' not found")]
    NotFound(String),

    #[error("no ranking found for team '{0}'")]
    MissingRanking(String),
}

impl UpsetError {
    pub fn decode(what: impl Into<String>, source: serde_json::Error) -> Self {
        UpsetError::Decode {
            what: what.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, UpsetError>;
