// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Source normalization
//!
//! Turns raw source values into CSP source expressions:
//! 1. Self-hosted URLs become `'self'`.
//! 2. Query strings are removed, CSP cannot match on them.
//! 3. Duplicates are dropped, keeping the first occurrence.
//!
//! A URL is self-hosted when resolving it against a reserved, non-routable
//! base leaves the base's host in place, meaning the source named no host of
//! its own.

use std::borrow::Cow;
use std::collections::HashSet;

use url::Url;

use crate::error::Result;

/// Base URL used to detect sources without an explicit host
pub const SENTINEL_BASE: &str = "http://arbitrary-url-for-csp.dne/";

const SENTINEL_HOST: &str = "arbitrary-url-for-csp.dne";

/// The `'self'` source expression
pub const SELF_SOURCE: &str = "'self'";

/// Shape of a source token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Keyword or hash such as `'self'` or `'sha256-...'`, never a URL
    Quoted,
    /// Bare `http:` or `https:` scheme source
    Protocol,
    /// Anything else, interpreted as a URL
    Url,
}

impl SourceKind {
    /// Classify a raw or normalized source token.
    pub fn of(source: &str) -> Self {
        if source.starts_with('\'') {
            SourceKind::Quoted
        } else if source == "http:" || source == "https:" {
            SourceKind::Protocol
        } else {
            SourceKind::Url
        }
    }
}

/// Normalize a list of sources, preserving first-seen order.
///
/// Fails if a URL source cannot be resolved.
pub fn normalize_sources<I, S>(sources: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let base = Url::parse(SENTINEL_BASE)?;
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();

    for source in sources {
        let source = strip_query(resolve_self(source.as_ref(), &base)?)?;
        if seen.insert(source.clone()) {
            normalized.push(source);
        }
    }

    Ok(normalized)
}

/// Replace a self-hosted URL with `'self'`; foreign URLs come back absolute.
fn resolve_self<'a>(source: &'a str, base: &Url) -> Result<Cow<'a, str>> {
    if SourceKind::of(source) != SourceKind::Url {
        return Ok(Cow::Borrowed(source));
    }

    let url = base.join(source)?;
    if url.host_str() == Some(SENTINEL_HOST) {
        Ok(Cow::Borrowed(SELF_SOURCE))
    } else {
        Ok(Cow::Owned(url.into()))
    }
}

/// Remove the query string from an absolute URL source.
fn strip_query(source: Cow<'_, str>) -> Result<String> {
    if SourceKind::of(&source) != SourceKind::Url {
        return Ok(source.into_owned());
    }

    let mut url = Url::parse(&source)?;
    url.set_query(None);
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn normalize(sources: &[&str]) -> Vec<String> {
        normalize_sources(sources).unwrap()
    }

    #[test]
    fn test_source_kind() {
        assert_eq!(SourceKind::of("'self'"), SourceKind::Quoted);
        assert_eq!(SourceKind::of("'sha256-abc123'"), SourceKind::Quoted);
        assert_eq!(SourceKind::of("https:"), SourceKind::Protocol);
        assert_eq!(SourceKind::of("data:"), SourceKind::Url);
        assert_eq!(SourceKind::of("/a.js"), SourceKind::Url);
    }

    #[test]
    fn test_self_hosted() {
        assert_eq!(
            normalize(&["relative.js", "/absolute.js", "../up.js", "?q=1", ""]),
            vec!["'self'"]
        );
    }

    #[test]
    fn test_foreign() {
        assert_eq!(
            normalize(&[
                "http://example1.com/js",
                "https://example2.com/js",
                "http://example3.com:8080/js",
            ]),
            vec![
                "http://example1.com/js",
                "https://example2.com/js",
                "http://example3.com:8080/js",
            ]
        );
    }

    #[test]
    fn test_query_stripped() {
        assert_eq!(
            normalize(&[
                "http://x.test/a.js?v=1&token=secret",
                "http://x.test/a.js",
                "/local.js?v=2",
                "https://x.test/b.js?a=1#frag",
            ]),
            vec!["http://x.test/a.js", "'self'", "https://x.test/b.js#frag"]
        );
    }

    #[test]
    fn test_protocol_relative_resolves_against_http() {
        assert_eq!(
            normalize(&["//cdn.example.com/lib.js"]),
            vec!["http://cdn.example.com/lib.js"]
        );
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(
            normalize(&["http:", "https:", "'unsafe-inline'", "'sha256-abc123'"]),
            vec!["http:", "https:", "'unsafe-inline'", "'sha256-abc123'"]
        );
    }

    #[test]
    fn test_dedup_keeps_first() {
        assert_eq!(
            normalize(&["https://b.test/x", "/a", "'self'", "https://b.test/x?y", "https:"]),
            vec!["https://b.test/x", "'self'", "https:"]
        );
    }

    #[test]
    fn test_idempotent() {
        let once = normalize(&[
            "/a.js",
            "https://cdn.test/lib.js?v=3",
            "HTTP://UPPER.TEST/Path",
            "'sha256-abc123'",
            "https:",
            "data:image/png;base64,AAAA",
        ]);
        let twice = normalize_sources(&once).unwrap();

        assert_eq!(once, twice);
        assert_eq!(once[2], "http://upper.test/Path");
    }

    #[test]
    fn test_invalid_url() {
        let err = normalize_sources(["http://[::1"]).unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }
}
