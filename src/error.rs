// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for cspgen
//!
//! Every failure is fatal for the document being processed: a page that
//! cannot carry its policy must never be emitted without one.

use std::path::Path;

use thiserror::Error;

/// Result type alias for cspgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for cspgen
#[derive(Error, Debug)]
pub enum Error {
    /// A resource reference could not be resolved as a URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// HTML parsing failed
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// The source text has no literal `<head>` open tag to inject after
    #[error("Failed to inject CSP, could not match `<head>` element")]
    MissingHead,

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A batch worker task panicked or was cancelled
    #[error("Task failed: {0}")]
    Task(String),

    /// Error tied to a specific input file
    #[error("{path}: {source}")]
    File {
        path: String,
        #[source]
        source: Box<Error>,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new HTML parse error
    pub fn html_parse<S: Into<String>>(msg: S) -> Self {
        Error::HtmlParse(msg.into())
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error means the document has no injection point
    pub fn is_missing_head(&self) -> bool {
        match self {
            Error::MissingHead => true,
            Error::File { source, .. } => source.is_missing_head(),
            _ => false,
        }
    }

    /// Get the file path if available
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::File { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Task(err.to_string())
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add file path context to error
    fn with_path(self, path: &Path) -> Result<T>;

    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| Error::File {
            path: path.display().to_string(),
            source: Box::new(e.into()),
        })
    }

    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            Error::Other(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_head_message() {
        let err = Error::MissingHead;
        assert!(err.is_missing_head());
        assert_eq!(
            err.to_string(),
            "Failed to inject CSP, could not match `<head>` element"
        );
    }

    #[test]
    fn test_with_path() {
        let res: std::result::Result<(), Error> = Err(Error::MissingHead);
        let err = res.with_path(Path::new("site/index.html")).unwrap_err();

        assert_eq!(err.path(), Some("site/index.html"));
        assert!(err.is_missing_head());
        assert!(err.to_string().starts_with("site/index.html: "));
    }

    #[test]
    fn test_url_error_conversion() {
        let err: Error = url::Url::parse("http://[::1").unwrap_err().into();
        assert!(matches!(err, Error::Url(_)));
    }

    #[test]
    fn test_context() {
        let res: std::result::Result<(), &str> = Err("boom");
        let err = res.context("reading config").unwrap_err();
        assert_eq!(err.to_string(), "reading config: boom");
    }
}
