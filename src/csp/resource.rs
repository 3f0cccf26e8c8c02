// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Resource descriptors extracted from a document

use serde::Serialize;

use crate::dom::HeadLocation;

/// A resource reference found while walking a document.
///
/// `src` is either the verbatim URL from the markup or a
/// `'sha256-...'` hash source for inline content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Resource {
    /// `<script>` with a JavaScript type
    Script { src: String },
    /// `<style>` or `<link rel="stylesheet">`
    Style { src: String },
    /// `<img src>`
    Image { src: String },
    /// The literal `<head>` open tag
    Head(HeadLocation),
}

impl Resource {
    /// Source value, `None` for [`Resource::Head`]
    pub fn src(&self) -> Option<&str> {
        match self {
            Resource::Script { src } | Resource::Style { src } | Resource::Image { src } => {
                Some(src)
            }
            Resource::Head(_) => None,
        }
    }

    /// Whether the source is an inline content hash rather than a URL
    pub fn is_inline(&self) -> bool {
        self.src().is_some_and(|src| src.starts_with("'sha256-"))
    }
}
