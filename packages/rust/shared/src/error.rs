//! Error types for siteprofiler.
//!
//! Library crates use [`SiteProfilerError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Blocking by a protection wall is deliberately *not* an error variant:
//! it is diagnostic data carried on the discovery outcome, and the pipeline
//! still produces a full profile when it occurs.

/// Top-level error type for all siteprofiler operations.
#[derive(Debug, thiserror::Error)]
pub enum SiteProfilerError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// The caller-supplied URL text is missing or unparseable.
    ///
    /// This is the only failure that aborts a profiling request; every
    /// later stage recovers locally.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Network/HTTP transport error (DNS, connect, read).
    #[error("network error: {0}")]
    Network(String),

    /// A single fetch exceeded its wall-clock deadline.
    #[error("timeout after {ms}ms fetching {url}")]
    Timeout { url: String, ms: u64 },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SiteProfilerError>;

impl SiteProfilerError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an invalid-input error from any displayable message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    /// Create a timeout error for a URL and deadline.
    pub fn timeout(url: impl Into<String>, ms: u64) -> Self {
        Self::Timeout {
            url: url.into(),
            ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = SiteProfilerError::invalid_input("company_url is required");
        assert_eq!(err.to_string(), "invalid input: company_url is required");

        let err = SiteProfilerError::timeout("https://example.com/sitemap.xml", 7000);
        assert!(err.to_string().contains("7000ms"));
        assert!(err.to_string().contains("sitemap.xml"));
    }
}
