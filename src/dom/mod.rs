// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM access for policy extraction
//!
//! Parses HTML once with html5ever and keeps the byte span of the literal
//! `<head>` tag alongside the tree.

mod locator;
mod node;
mod parser;

pub use locator::{HeadLocation, HeadTagLocator};
pub use node::{attribute, tag_name, text_content};
pub use parser::{parse_document, ParsedDocument};
