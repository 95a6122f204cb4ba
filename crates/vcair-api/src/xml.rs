// XML wire codec
//
// Outbound documents are pretty-printed the way the vCloud API clients have
// always sent them: standard declaration, every line prefixed with two
// spaces, four spaces per nesting level, empty elements written expanded.
// Line breaks and tabs inside values travel as character references so the
// layout never leaks into rule text.

use std::borrow::Cow;

use quick_xml::events::Event;
use quick_xml::se::Serializer;
use quick_xml::{Reader, Writer};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Error;

/// Standard XML declaration, including the trailing newline.
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

const LINE_PREFIX: &str = "  ";
const INDENT_WIDTH: usize = 4;

/// A document that can be sent as a request body.
///
/// `ROOT` names the top-level element and `MEDIA_TYPE` is the `Content-Type`
/// the API expects for it.
pub trait XmlDocument: Serialize {
    const ROOT: &'static str;
    const MEDIA_TYPE: &'static str;
}

/// Serialize a document into its wire form, declaration included.
pub fn encode<T: XmlDocument>(doc: &T) -> Result<String, Error> {
    let mut compact = String::new();
    let mut ser = Serializer::with_root(&mut compact, Some(T::ROOT)).map_err(serialization)?;
    ser.expand_empty_elements(true);
    doc.serialize(ser).map_err(serialization)?;

    let body = indent(&escape_whitespace(&compact))?;

    let lines = body.lines().count();
    let mut out =
        String::with_capacity(XML_HEADER.len() + body.len() + LINE_PREFIX.len() * lines);
    out.push_str(XML_HEADER);
    for (i, line) in body.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(LINE_PREFIX);
        out.push_str(line);
    }
    Ok(out)
}

/// Replace `\n`, `\r` and `\t` with character references.
///
/// Unindented serializer output carries no whitespace of its own, so every
/// such character in `compact` sits inside a text or attribute value.
fn escape_whitespace(compact: &str) -> Cow<'_, str> {
    if !compact.contains(['\n', '\r', '\t']) {
        return Cow::Borrowed(compact);
    }
    let mut out = String::with_capacity(compact.len() + 32);
    for c in compact.chars() {
        match c {
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            '\t' => out.push_str("&#x9;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// One element per line, `INDENT_WIDTH` spaces per level. An element holding
/// only text, or nothing, stays on a single line.
fn indent(compact: &str) -> Result<String, Error> {
    let mut reader = Reader::from_str(compact);
    let mut writer = Writer::new(Vec::with_capacity(compact.len() * 2));
    let mut depth = 0usize;
    // A closing tag right after its start tag or text stays on that line.
    let mut inline = false;

    loop {
        let event = reader.read_event().map_err(serialization)?;
        match &event {
            Event::Eof => break,
            Event::Start(_) => {
                break_line(writer.get_mut(), depth);
                depth += 1;
                inline = true;
            }
            Event::Empty(_) => {
                break_line(writer.get_mut(), depth);
                inline = false;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if !inline {
                    break_line(writer.get_mut(), depth);
                }
                inline = false;
            }
            _ => {}
        }
        writer.write_event(event).map_err(serialization)?;
    }

    String::from_utf8(writer.into_inner()).map_err(serialization)
}

fn break_line(buf: &mut Vec<u8>, depth: usize) {
    if buf.is_empty() {
        return;
    }
    buf.push(b'\n');
    buf.resize(buf.len() + depth * INDENT_WIDTH, b' ');
}

/// Decode a response body into the target document shape.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    quick_xml::de::from_str(body).map_err(|e| {
        let preview = &body[..floor_char_boundary(body, 200)];
        Error::Deserialization {
            message: format!("{e} (body preview: {preview:?})"),
            body: body.to_owned(),
        }
    })
}

fn serialization(e: impl std::fmt::Display) -> Error {
    Error::Serialization {
        message: e.to_string(),
    }
}

pub(crate) fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}
