// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever

use html5ever::parse_document as parse_html5;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, RcDom};

use super::locator::{HeadLocation, HeadTagLocator};
use crate::error::{Error, Result};

/// A document parsed once from source text.
///
/// The tree is never mutated. The `<head>` location refers to the original
/// text, so splicing into that text keeps every other byte intact.
pub struct ParsedDocument {
    dom: RcDom,
    head: Option<HeadLocation>,
}

impl ParsedDocument {
    /// Document node at the root of the tree
    pub fn root(&self) -> Handle {
        self.dom.document.clone()
    }

    /// Span of the literal `<head>` open tag, `None` when the parser had to
    /// synthesize the head element.
    pub fn head_location(&self) -> Option<HeadLocation> {
        self.head
    }
}

/// Parse an HTML document, retaining the source location of its `<head>`.
pub fn parse_document(html: &str) -> Result<ParsedDocument> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_html5(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| Error::html_parse(e.to_string()))?;

    let head = HeadTagLocator::new(html).locate();
    tracing::trace!(?head, "parsed document");

    Ok(ParsedDocument { dom, head })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::tag_name;

    #[test]
    fn test_parse_simple_html() {
        let html = "<!DOCTYPE html><html><head><title>T</title></head><body></body></html>";
        let doc = parse_document(html).unwrap();

        let loc = doc.head_location().unwrap();
        assert_eq!(&html[loc.start..loc.end], "<head>");
    }

    #[test]
    fn test_tree_always_has_html_root() {
        let doc = parse_document("<p>no head here</p>").unwrap();

        let root = doc.root();
        let children = root.children.borrow();
        assert_eq!(children.len(), 1);
        assert_eq!(tag_name(&children[0]), Some("html"));
        assert_eq!(doc.head_location(), None);
    }

    #[test]
    fn test_indented_document() {
        let html = "\n    <!DOCTYPE html>\n    <html>\n        <head></head>\n    </html>\n";
        let doc = parse_document(html).unwrap();

        let loc = doc.head_location().unwrap();
        assert_eq!(&html[loc.start..loc.end], "<head>");
        assert_eq!(&html[loc.end..loc.end + 7], "</head>");
    }
}
