// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Read-only accessors over html5ever's reference-counted DOM

use markup5ever_rcdom::{Handle, NodeData};

/// Local tag name of an element node, lowercased by the parser.
pub fn tag_name(handle: &Handle) -> Option<&str> {
    match handle.data {
        NodeData::Element { ref name, .. } => Some(&*name.local),
        _ => None,
    }
}

/// Value of the named attribute, verbatim.
pub fn attribute(handle: &Handle, name: &str) -> Option<String> {
    match handle.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Concatenated text of all descendant text nodes, byte for byte.
pub fn text_content(handle: &Handle) -> String {
    let mut text = String::new();
    let mut stack = vec![handle.clone()];

    while let Some(node) = stack.pop() {
        if let NodeData::Text { ref contents } = node.data {
            text.push_str(&contents.borrow());
        }
        stack.extend(node.children.borrow().iter().rev().cloned());
    }

    text
}
