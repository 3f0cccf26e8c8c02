// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # cspgen - Strict CSP for static pages
//!
//! Analyzes a fully rendered HTML document and injects the strictest
//! Content-Security-Policy that still lets the page work, as a `<meta>` tag
//! placed first in `<head>`.
//!
//! ## Features
//!
//! - Inline `<script>`/`<style>`: allowed by SHA-256 hash of their exact text
//! - Hyperlinked resources: `'self'` for same-origin, absolute URL otherwise
//! - Query strings stripped, duplicates removed
//! - `object-src 'none'` on every page
//! - Byte-exact splicing: nothing but the `<meta>` tag changes
//! - Parallel batch injection over a built site
//!
//! Run it after HTML minification: the hashes must match the text that ships.
//!
//! ## Example
//!
//! ```rust
//! use cspgen::{inject_csp, CspOptions};
//!
//! let html = "<html><head><script>alert(1)</script></head><body></body></html>";
//! let out = inject_csp(html, &CspOptions::default()).unwrap();
//!
//! assert!(out.starts_with(
//!     r#"<html><head><meta http-equiv="Content-Security-Policy" content="script-src 'sha256-"#
//! ));
//! ```

pub mod batch;
pub mod csp;
pub mod dom;
pub mod error;

// Re-exports for convenience

// Injection
pub use csp::{generate_policy, inject_csp, meta_tag, CspOptions};

// Policy
pub use csp::{Directive, Policy, PolicyBuilder};

// Resources
pub use csp::{hash_source, normalize_sources, Resource, ResourceWalker, SourceKind};

// DOM
pub use dom::{parse_document, HeadLocation, ParsedDocument};

// Batch
pub use batch::{BatchInjector, FileReport, OutputMode};

// Errors
pub use error::{Error, ErrorContext, Result};

/// cspgen version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
