// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Injection options

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options for policy generation and injection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct CspOptions {
    /// Extra `script-src` tokens, placed before document-derived sources
    pub script_src: Vec<String>,
    /// Extra `style-src` tokens (e.g. for live-reload tooling), placed before
    /// document-derived sources
    pub style_src: Vec<String>,
    /// Scan the document for `<style>` and `<link rel="stylesheet">`
    pub extract_styles: bool,
}

impl Default for CspOptions {
    fn default() -> Self {
        Self {
            script_src: Vec::new(),
            style_src: Vec::new(),
            extract_styles: true,
        }
    }
}

impl CspOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from JSON, e.g. `{"styleSrc": ["'unsafe-inline'"]}`
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add an extra `script-src` token
    pub fn script_src(mut self, source: impl Into<String>) -> Self {
        self.script_src.push(source.into());
        self
    }

    /// Add an extra `style-src` token
    pub fn style_src(mut self, source: impl Into<String>) -> Self {
        self.style_src.push(source.into());
        self
    }

    /// Enable/disable style extraction
    pub fn extract_styles(mut self, extract: bool) -> Self {
        self.extract_styles = extract;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let options = CspOptions::default();
        assert!(options.script_src.is_empty());
        assert!(options.style_src.is_empty());
        assert!(options.extract_styles);
    }

    #[test]
    fn test_builder() {
        let options = CspOptions::new()
            .style_src("'unsafe-inline'")
            .script_src("https:")
            .extract_styles(false);

        assert_eq!(options.style_src, vec!["'unsafe-inline'"]);
        assert_eq!(options.script_src, vec!["https:"]);
        assert!(!options.extract_styles);
    }

    #[test]
    fn test_from_json() {
        let options =
            CspOptions::from_json(r#"{"styleSrc": ["'unsafe-inline'"], "extractStyles": false}"#)
                .unwrap();
        assert_eq!(
            options,
            CspOptions::new()
                .style_src("'unsafe-inline'")
                .extract_styles(false)
        );

        assert_eq!(CspOptions::from_json("{}").unwrap(), CspOptions::default());
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let err = CspOptions::from_json(r#"{"style_src": []}"#).unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
