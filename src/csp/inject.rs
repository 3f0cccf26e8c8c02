// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSP `<meta>` injection
//!
//! IMPORTANT: every resource on the page is trusted and allowlisted. Do not
//! run this over pages carrying user generated content.

use std::borrow::Cow;

use super::config::CspOptions;
use super::policy::{Policy, PolicyBuilder};
use super::resource::Resource;
use super::walker::ResourceWalker;
use crate::dom::{parse_document, HeadLocation};
use crate::error::{Error, Result};

/// `http-equiv` value of the injected tag
pub const CSP_HTTP_EQUIV: &str = "Content-Security-Policy";

/// Generate the strictest policy the document still works under.
///
/// Unlike [`inject_csp`], this does not require a `<head>` tag.
pub fn generate_policy(html: &str, options: &CspOptions) -> Result<Policy> {
    analyze(html, options).map(|(policy, _)| policy)
}

/// Inject a generated CSP into `html` as the first child of `<head>`.
///
/// Every byte of the input is kept as is; the `<meta>` tag is spliced in
/// right after the `<head>` open tag so it precedes every script and style
/// it governs. Fails with [`Error::MissingHead`] when the source text has no
/// `<head>` tag of its own.
pub fn inject_csp(html: &str, options: &CspOptions) -> Result<String> {
    let (policy, head) = analyze(html, options)?;
    let head = head.ok_or(Error::MissingHead)?;

    let meta = meta_tag(&policy);
    let mut injected = String::with_capacity(html.len() + meta.len());
    injected.push_str(&html[..head.end]);
    injected.push_str(&meta);
    injected.push_str(&html[head.end..]);

    tracing::debug!(offset = head.end, policy = %policy, "injected CSP");
    Ok(injected)
}

/// Render the `<meta http-equiv="Content-Security-Policy">` tag for a policy.
pub fn meta_tag(policy: &Policy) -> String {
    format!(
        r#"<meta http-equiv="{}" content="{}">"#,
        CSP_HTTP_EQUIV,
        escape_attribute(&policy.to_string())
    )
}

fn analyze(html: &str, options: &CspOptions) -> Result<(Policy, Option<HeadLocation>)> {
    let document = parse_document(html)?;

    let mut builder = PolicyBuilder::new()
        .script_src(options.script_src.iter().cloned())
        .style_src(options.style_src.iter().cloned());
    let mut head = None;
    let mut count = 0usize;

    for resource in ResourceWalker::new(&document) {
        match resource {
            Resource::Head(location) => head = Some(location),
            Resource::Style { .. } if !options.extract_styles => {}
            resource => {
                count += 1;
                builder.add(resource);
            }
        }
    }

    tracing::trace!(resources = count, has_head = head.is_some(), "walked document");
    Ok((builder.build()?, head))
}

/// Escape a double-quoted attribute value.
fn escape_attribute(value: &str) -> Cow<'_, str> {
    if !value.contains(&['&', '"'][..]) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(value.replace('&', "&amp;").replace('"', "&quot;"))
}
