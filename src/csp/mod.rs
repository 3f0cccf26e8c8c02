// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Content Security Policy synthesis
//!
//! - Resource walking and classification
//! - Source normalization
//! - Policy building
//! - `<meta>` injection

mod classify;
mod config;
mod inject;
mod normalize;
mod policy;
mod resource;
mod walker;

pub use classify::{hash_source, is_js_mime_type};
pub use config::CspOptions;
pub use inject::{generate_policy, inject_csp, meta_tag, CSP_HTTP_EQUIV};
pub use normalize::{normalize_sources, SourceKind, SELF_SOURCE, SENTINEL_BASE};
pub use policy::{Directive, Policy, PolicyBuilder, IMG_SRC, OBJECT_SRC, SCRIPT_SRC, STYLE_SRC};
pub use resource::Resource;
pub use walker::ResourceWalker;
