// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Depth-first resource walk over a parsed document

use markup5ever_rcdom::Handle;

use super::classify::classify;
use super::resource::Resource;
use crate::dom::{tag_name, HeadLocation, ParsedDocument};

/// One-shot, pre-order iterator over the resources of a document.
///
/// Uses an explicit stack, so nesting depth is bounded only by memory.
/// `<template>` contents live outside the child list and are not visited.
pub struct ResourceWalker {
    stack: Vec<Handle>,
    head: Option<HeadLocation>,
}

impl ResourceWalker {
    pub fn new(document: &ParsedDocument) -> Self {
        Self {
            stack: vec![document.root()],
            head: document.head_location(),
        }
    }
}

impl Iterator for ResourceWalker {
    type Item = Resource;

    fn next(&mut self) -> Option<Resource> {
        while let Some(node) = self.stack.pop() {
            self.stack
                .extend(node.children.borrow().iter().rev().cloned());

            if tag_name(&node) == Some("head") {
                // A synthesized head has no location and yields nothing.
                if let Some(location) = self.head.take() {
                    return Some(Resource::Head(location));
                }
                continue;
            }

            if let Some(resource) = classify(&node) {
                return Some(resource);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_document;

    fn walk(html: &str) -> Vec<Resource> {
        ResourceWalker::new(&parse_document(html).unwrap()).collect()
    }

    fn src(resource: &Resource) -> &str {
        resource.src().unwrap()
    }

    #[test]
    fn test_document_order() {
        let resources = walk(
            r#"<!DOCTYPE html>
            <html>
                <head>
                    <link rel="stylesheet" href="/first.css">
                    <script src="/a.js"></script>
                </head>
                <body>
                    <div><section><img src="/deep.png"></section></div>
                    <style>p{}</style>
                    <script src="https://cdn.test/b.js"></script>
                </body>
            </html>"#,
        );

        assert_eq!(resources.len(), 6);
        assert!(matches!(resources[0], Resource::Head(_)));
        assert_eq!(src(&resources[1]), "/first.css");
        assert_eq!(src(&resources[2]), "/a.js");
        assert_eq!(src(&resources[3]), "/deep.png");
        assert!(resources[4].is_inline());
        assert_eq!(src(&resources[5]), "https://cdn.test/b.js");
    }

    #[test]
    fn test_head_yielded_once_with_location() {
        let html = "<html>\n<head lang=en>\n</head></html>";
        let heads: Vec<_> = walk(html)
            .into_iter()
            .filter_map(|r| match r {
                Resource::Head(loc) => Some(loc),
                _ => None,
            })
            .collect();

        assert_eq!(heads.len(), 1);
        assert_eq!(&html[heads[0].start..heads[0].end], "<head lang=en>");
    }

    #[test]
    fn test_synthesized_head_not_yielded() {
        let resources = walk(r#"<script src="/a.js"></script><p>hi</p>"#);
        assert_eq!(resources.len(), 1);
        assert_eq!(src(&resources[0]), "/a.js");
    }

    #[test]
    fn test_malformed_markup() {
        let resources = walk(r#"<head></head><body><div><p><img src="/x.png"><span></div></b><img src="/y.png">"#);
        let sources: Vec<_> = resources.iter().filter_map(Resource::src).collect();
        assert_eq!(sources, vec!["/x.png", "/y.png"]);
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 1_000;
        let mut html = String::from("<head></head><body>");
        html.push_str(&"<span>".repeat(depth));
        html.push_str(r#"<img src="/deep.png">"#);
        html.push_str(&"</span>".repeat(depth));

        let resources = walk(&html);
        assert_eq!(resources.len(), 2);
        assert_eq!(src(&resources[1]), "/deep.png");
    }

    #[test]
    fn test_template_contents_skipped() {
        let resources = walk(r#"<head></head><body><template><img src="/t.png"></template></body>"#);
        assert_eq!(resources.len(), 1);
    }
}
