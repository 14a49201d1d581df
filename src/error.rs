use thiserror::Error;

/// Failure kinds surfaced by the scraping pipeline.
///
/// Each stage fails with its own variant so a caller can tell "cannot reach
/// the provider" apart from "provider rejected the request" and "provider
/// changed its schema".
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The build identifier could not be discovered.
    #[error("build id resolution failed: {message}")]
    Resolution {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The team results request failed (transport, HTTP status or body).
    #[error("team results fetch failed: {message}")]
    Fetch {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The payload did not have the shape the normalizer walks.
    #[error("failed to normalize game data: {0}")]
    Normalization(String),
}

impl ScrapeError {
    pub(crate) fn resolution(message: impl Into<String>) -> Self {
        ScrapeError::Resolution {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn resolution_from(message: impl Into<String>, source: reqwest::Error) -> Self {
        ScrapeError::Resolution {
            message: message.into(),
            source: Some(source),
        }
    }

    pub(crate) fn fetch(message: impl Into<String>) -> Self {
        ScrapeError::Fetch {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn fetch_from(message: impl Into<String>, source: reqwest::Error) -> Self {
        ScrapeError::Fetch {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn is_resolution(&self) -> bool {
        matches!(self, ScrapeError::Resolution { .. })
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, ScrapeError::Fetch { .. })
    }

    pub fn is_normalization(&self) -> bool {
        matches!(self, ScrapeError::Normalization(_))
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_are_distinct() {
        let r = ScrapeError::resolution("identifier not found");
        let f = ScrapeError::fetch("HTTP 404");
        let n = ScrapeError::Normalization("Events is not an array".into());

        assert!(r.is_resolution() && !r.is_fetch() && !r.is_normalization());
        assert!(f.is_fetch() && !f.is_resolution());
        assert!(n.is_normalization() && !n.is_fetch());
    }

    #[test]
    fn test_display_includes_message() {
        let e = ScrapeError::resolution("identifier not found");
        assert_eq!(
            e.to_string(),
            "build id resolution failed: identifier not found"
        );
    }
}
