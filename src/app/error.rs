use thiserror::Error;

#[derive(Error, Debug)]
pub enum HifzError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Any failure of a verse request. The display text is what the user sees,
    /// the underlying cause is only logged.
    #[error("Failed to fetch verse")]
    VerseFetch(#[source] Box<HifzError>),

    #[error("Failed to fetch audio")]
    AudioFetch(#[source] Box<HifzError>),

    #[error("Invalid verse reference: {0}")]
    InvalidReference(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("{0}")]
    Other(String),
}

impl HifzError {
    pub fn verse_fetch(cause: HifzError) -> Self {
        HifzError::VerseFetch(Box::new(cause))
    }

    pub fn audio_fetch(cause: HifzError) -> Self {
        HifzError::AudioFetch(Box::new(cause))
    }
}

pub type Result<T> = std::result::Result<T, HifzError>;

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_verse_fetch_hides_cause_in_display() {
        let err = HifzError::verse_fetch(HifzError::MalformedResponse("missing verse".into()));
        assert_eq!(err.to_string(), "Failed to fetch verse");
        assert_eq!(
            err.source().map(|s| s.to_string()),
            Some("Malformed response: missing verse".to_string())
        );
    }

    #[test]
    fn test_audio_fetch_display() {
        let err = HifzError::audio_fetch(HifzError::Other("boom".into()));
        assert_eq!(err.to_string(), "Failed to fetch audio");
    }
}
