// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Policy assembly and serialization

use std::fmt;

use serde::Serialize;

use super::normalize::normalize_sources;
use super::resource::Resource;
use crate::error::Result;

pub const SCRIPT_SRC: &str = "script-src";
pub const STYLE_SRC: &str = "style-src";
pub const IMG_SRC: &str = "img-src";
pub const OBJECT_SRC: &str = "object-src";

/// A directive name with its ordered, deduplicated sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Directive {
    name: &'static str,
    sources: Vec<String>,
}

impl Directive {
    pub fn new(name: &'static str, sources: Vec<String>) -> Self {
        Self { name, sources }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// `"<name> <sources>;"`, or `None` when there are no sources.
    pub fn render(&self) -> Option<String> {
        if self.sources.is_empty() {
            return None;
        }
        Some(format!("{} {};", self.name, self.sources.join(" ")))
    }
}

/// A complete policy. Only non-empty directives are kept, and
/// `object-src 'none'` is always last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Policy {
    directives: Vec<Directive>,
}

impl Policy {
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Look up a directive by name
    pub fn directive(&self, name: &str) -> Option<&Directive> {
        self.directives.iter().find(|d| d.name == name)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clauses: Vec<String> = self.directives.iter().filter_map(Directive::render).collect();
        write!(f, "{}", clauses.join(" "))
    }
}

/// Collects raw sources per directive and normalizes them on build.
///
/// Caller-supplied extras go in first so they lead their directive.
#[derive(Debug, Clone, Default)]
pub struct PolicyBuilder {
    script_src: Vec<String>,
    style_src: Vec<String>,
    img_src: Vec<String>,
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw `script-src` sources
    pub fn script_src<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.script_src.extend(sources.into_iter().map(Into::into));
        self
    }

    /// Append raw `style-src` sources
    pub fn style_src<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.style_src.extend(sources.into_iter().map(Into::into));
        self
    }

    /// Append raw `img-src` sources
    pub fn img_src<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.img_src.extend(sources.into_iter().map(Into::into));
        self
    }

    /// Route a discovered resource to its directive
    pub fn add(&mut self, resource: Resource) {
        match resource {
            Resource::Script { src } => self.script_src.push(src),
            Resource::Style { src } => self.style_src.push(src),
            Resource::Image { src } => self.img_src.push(src),
            Resource::Head(_) => {}
        }
    }

    /// Normalize every directive and assemble the policy
    pub fn build(self) -> Result<Policy> {
        let candidates = [
            Directive::new(SCRIPT_SRC, normalize_sources(&self.script_src)?),
            Directive::new(STYLE_SRC, normalize_sources(&self.style_src)?),
            Directive::new(IMG_SRC, normalize_sources(&self.img_src)?),
        ];

        let mut directives: Vec<Directive> = candidates
            .into_iter()
            .filter(|d| !d.sources.is_empty())
            .collect();
        directives.push(Directive::new(OBJECT_SRC, vec!["'none'".to_string()]));

        Ok(Policy { directives })
    }
}
