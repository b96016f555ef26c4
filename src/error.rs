use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("missing environment variable: {name}")]
    MissingEnv { name: &'static str },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An upstream inventory or catalog source is unreachable. Aborts the run.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    /// The containment graph loops back on itself.
    #[error("containment cycle detected at item {item_id}")]
    CycleDetected { item_id: i64 },

    /// A retryable oracle failure (5xx, timeout, connection reset).
    #[error("transient oracle failure: {0}")]
    OracleTransient(String),

    /// A non-retryable oracle failure (4xx, malformed response).
    #[error("oracle failure: {0}")]
    Oracle(String),

    /// A single station could not be classified.
    #[error("classification failed for station {station_id}: {reason}")]
    Classification { station_id: i64, reason: String },

    #[error("store error: {0}")]
    Store(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

impl Error {
    /// Whether retrying the failed call may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::OracleTransient(_) => true,
            Self::Http(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status().is_some_and(|s| s.is_server_error())
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_classification() {
        assert!(Error::OracleTransient("503".into()).is_transient());
        assert!(!Error::Oracle("404".into()).is_transient());
        assert!(!Error::CycleDetected { item_id: 1 }.is_transient());
        assert!(!Error::SourceUnavailable("down".into()).is_transient());
    }

    #[test]
    fn cycle_message_names_item() {
        let err = Error::CycleDetected { item_id: 42 };
        assert_eq!(err.to_string(), "containment cycle detected at item 42");
    }
}
