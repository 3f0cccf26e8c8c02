// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Per-element resource classification
//!
//! Decides whether an element contributes a CSP source and extracts it:
//! - `<script>`: JavaScript types only, `src` or a hash of the inline text
//! - `<style>`: hash of the inline text
//! - `<link rel="stylesheet">`: `href`
//! - `<img>`: `src`
//!
//! Nodes missing the attribute they would be keyed on are skipped.

use std::collections::HashSet;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use lazy_static::lazy_static;
use markup5ever_rcdom::Handle;
use sha2::{Digest, Sha256};

use super::resource::Resource;
use crate::dom::{attribute, tag_name, text_content};

lazy_static! {
    /// MIME types browsers execute as classic JavaScript
    static ref JS_MIME_TYPES: HashSet<&'static str> = [
        "application/javascript",
        "application/ecmascript",
        "application/x-ecmascript",
        "application/x-javascript",
        "text/javascript",
        "text/ecmascript",
        "text/javascript1.0",
        "text/javascript1.1",
        "text/javascript1.2",
        "text/javascript1.3",
        "text/javascript1.4",
        "text/javascript1.5",
        "text/jscript",
        "text/livescript",
        "text/x-ecmascript",
        "text/x-javascript",
    ]
    .into_iter()
    .collect();
}

/// Whether the `type` attribute value names well-known JavaScript.
pub fn is_js_mime_type(mime: &str) -> bool {
    JS_MIME_TYPES.contains(mime)
}

/// CSP hash source for the given text: `'sha256-<base64>'`.
pub fn hash_source(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    format!("'sha256-{}'", BASE64.encode(digest))
}

/// Classify any element, dispatching on its tag name.
pub fn classify(node: &Handle) -> Option<Resource> {
    match tag_name(node)? {
        "script" => classify_script(node),
        "style" => classify_style(node),
        "link" => classify_link(node),
        "img" => classify_image(node),
        _ => None,
    }
}

/// `<script>`: skipped unless untyped, `module`, or a JavaScript MIME type.
pub fn classify_script(node: &Handle) -> Option<Resource> {
    if let Some(kind) = attribute(node, "type") {
        if kind != "module" && !is_js_mime_type(&kind) {
            tracing::trace!(mime = %kind, "skipping non-JavaScript script");
            return None;
        }
    }

    if let Some(src) = attribute(node, "src") {
        return Some(Resource::Script { src });
    }

    inline_hash(node).map(|src| Resource::Script { src })
}

/// `<style>`: keyed to a hash of its text.
pub fn classify_style(node: &Handle) -> Option<Resource> {
    inline_hash(node).map(|src| Resource::Style { src })
}

/// `<link>`: only `rel="stylesheet"` with an `href`.
pub fn classify_link(node: &Handle) -> Option<Resource> {
    if attribute(node, "rel").as_deref() != Some("stylesheet") {
        return None;
    }

    attribute(node, "href").map(|src| Resource::Style { src })
}

/// `<img>`: its `src`, if present.
pub fn classify_image(node: &Handle) -> Option<Resource> {
    attribute(node, "src").map(|src| Resource::Image { src })
}

fn inline_hash(node: &Handle) -> Option<String> {
    let text = text_content(node);
    if text.is_empty() {
        return None;
    }
    Some(hash_source(&text))
}
