// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Source location of the `<head>` open tag
//!
//! html5ever does not report byte offsets, and it silently synthesizes a
//! `<head>` element when the markup has none. The locator scans the raw text
//! the same way the tree builder's "before head" insertion mode consumes it,
//! so a location is only produced for a `<head>` tag that the parser really
//! used as the head element.

use serde::Serialize;

/// Byte span of the `<head ...>` open tag in the original source text.
///
/// `end` is exclusive and points just past the closing `>`, which is where
/// anything that must be the first child of `<head>` gets spliced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HeadLocation {
    /// Offset of the opening `<`
    pub start: usize,
    /// Offset just past the closing `>`
    pub end: usize,
}

impl HeadLocation {
    /// Length of the open tag in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is empty (never true for a located tag)
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Scans HTML source text for the `<head>` open tag.
///
/// Only a byte order mark, whitespace, comments, doctypes, processing
/// instructions, ignorable end tags and the `<html>` start tag may appear
/// before `<head>`. Anything else makes the tree builder create an implicit
/// head, in which case [`locate`](Self::locate) returns `None`.
pub struct HeadTagLocator<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> HeadTagLocator<'a> {
    pub fn new(html: &'a str) -> Self {
        Self {
            bytes: html.as_bytes(),
            pos: 0,
        }
    }

    /// Consume the locator and return the `<head>` open tag span, if any.
    pub fn locate(mut self) -> Option<HeadLocation> {
        if self.rest().starts_with("\u{feff}".as_bytes()) {
            self.pos += 3;
        }

        loop {
            self.skip_whitespace();

            let rest = self.rest();
            if rest.is_empty() {
                return None;
            }

            // Character data before the head, even a stray `<`.
            if rest[0] != b'<' {
                tracing::trace!(offset = self.pos, "text before <head>");
                return None;
            }

            if rest.starts_with(b"<!--") {
                self.skip_comment()?;
                continue;
            }

            match rest.get(1).copied() {
                // Doctype, CDATA-ish markup and bogus comments.
                Some(b'!') | Some(b'?') => self.skip_past(b'>')?,

                Some(b'/') => {
                    let name = self.tag_name(self.pos + 2);
                    if is_one_of(name, &["head", "body", "html", "br"]) {
                        tracing::trace!(offset = self.pos, "end tag before <head>");
                        return None;
                    }
                    self.skip_tag()?;
                }

                Some(byte) if byte.is_ascii_alphabetic() => {
                    let start = self.pos;
                    let name = self.tag_name(start + 1);

                    if name.eq_ignore_ascii_case(b"head") {
                        let end = self.skip_tag()?;
                        return Some(HeadLocation { start, end });
                    }

                    if !name.eq_ignore_ascii_case(b"html") {
                        tracing::trace!(
                            offset = start,
                            tag = %String::from_utf8_lossy(name),
                            "element before <head>"
                        );
                        return None;
                    }
                    self.skip_tag()?;
                }

                _ => return None,
            }
        }
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.bytes.get(self.pos) {
            if !is_html_whitespace(*byte) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Tag name starting at `from`, running until whitespace, `/` or `>`.
    fn tag_name(&self, from: usize) -> &'a [u8] {
        let tail = self.bytes.get(from..).unwrap_or_default();
        let len = tail
            .iter()
            .position(|&b| is_html_whitespace(b) || b == b'/' || b == b'>')
            .unwrap_or(tail.len());
        &tail[..len]
    }

    fn skip_comment(&mut self) -> Option<()> {
        let body = self.pos + 4;
        let tail = self.bytes.get(body..)?;

        // `<!-->` and `<!--->` are complete (empty) comments.
        if tail.starts_with(b">") {
            self.pos = body + 1;
            return Some(());
        }
        if tail.starts_with(b"->") {
            self.pos = body + 2;
            return Some(());
        }

        // The tokenizer also closes a comment at `--!>`, whichever comes first.
        let end = [&b"-->"[..], &b"--!>"[..]]
            .iter()
            .filter_map(|close| find(tail, close).map(|at| at + close.len()))
            .min()?;
        self.pos = body + end;
        Some(())
    }

    fn skip_past(&mut self, needle: u8) -> Option<()> {
        let offset = self.rest().iter().position(|&b| b == needle)?;
        self.pos += offset + 1;
        Some(())
    }

    /// Skip a start or end tag, honouring quoted attribute values. Returns
    /// the offset just past the closing `>`.
    fn skip_tag(&mut self) -> Option<usize> {
        let mut index = self.pos + 1;
        let mut after_equals = false;

        while let Some(&byte) = self.bytes.get(index) {
            match byte {
                b'>' => {
                    self.pos = index + 1;
                    return Some(self.pos);
                }
                b'"' | b'\'' if after_equals => {
                    let tail = self.bytes.get(index + 1..)?;
                    let close = tail.iter().position(|&b| b == byte)?;
                    index += close + 1;
                    after_equals = false;
                }
                b'=' => after_equals = true,
                b if is_html_whitespace(b) => {}
                _ => after_equals = false,
            }
            index += 1;
        }

        None
    }
}

fn is_html_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
}

fn is_one_of(name: &[u8], candidates: &[&str]) -> bool {
    candidates
        .iter()
        .any(|candidate| name.eq_ignore_ascii_case(candidate.as_bytes()))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
