//! Conversion between [`Document`] trees and XML text.
//!
//! Output carries the `<?xml version="1.0" encoding="UTF-8"?>` declaration
//! and four-space indentation. Elements without text or children are
//! written self-closing.

use std::borrow::Cow;

use hexaforge_core::domain::{Document, Element};
use quick_xml::{
    Reader, Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event, attributes::AttrError},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("failed to write XML: {0}")]
    Io(#[from] std::io::Error),

    #[error("unexpected closing tag </{0}>")]
    UnbalancedEnd(String),

    #[error("document ended inside <{0}>")]
    Unclosed(String),

    #[error("document has more than one root element")]
    MultipleRoots,

    #[error("document has no root element")]
    Empty,
}

// ── Writing ──────────────────────────────────────────────────────────────────

pub fn write_document(document: &Document) -> Result<String, XmlError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    if let Some(root) = document.root() {
        write_element(&mut writer, root)?;
    }
    write_comments(&mut writer, document.epilogue())?;

    let mut xml = String::from_utf8_lossy(&writer.into_inner()).into_owned();
    xml.push('\n');
    Ok(xml)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<(), XmlError> {
    write_comments(writer, element.comments())?;

    let mut start = BytesStart::new(element.name());
    for (key, value) in element.attributes() {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    let text = element.text().filter(|t| !t.is_empty());
    if text.is_none() && !element.has_children() && element.trailing_comments().is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = text {
        writer.write_event(Event::Text(BytesText::new(text)))?;
    }
    for child in element.children() {
        write_element(writer, child)?;
    }
    write_comments(writer, element.trailing_comments())?;
    writer.write_event(Event::End(BytesEnd::new(element.name())))?;
    Ok(())
}

fn write_comments(writer: &mut Writer<Vec<u8>>, comments: &[String]) -> Result<(), XmlError> {
    for comment in comments {
        writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())))?;
    }
    Ok(())
}

// ── Reading ──────────────────────────────────────────────────────────────────

/// Parse `xml` into a document. Processing instructions and the
/// declaration are dropped; comments are anchored to the next element.
pub fn parse_document(xml: &str) -> Result<Document, XmlError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut pending: Vec<String> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let mut element = open_element(&start)?;
                take_comments(&mut pending, |c| element.add_comment(c));
                stack.push(element);
            }
            Event::Empty(start) => {
                let mut element = open_element(&start)?;
                take_comments(&mut pending, |c| element.add_comment(c));
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(end) => {
                let mut element = stack
                    .pop()
                    .ok_or_else(|| XmlError::UnbalancedEnd(utf8(end.name().as_ref()).into_owned()))?;
                take_comments(&mut pending, |c| element.add_trailing_comment(c));
                attach(&mut stack, &mut root, element)?;
            }
            Event::Comment(comment) => pending.push(utf8(&comment.into_inner()).into_owned()),
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    append_text(current, &text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    append_text(current, &utf8(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed(open.name().to_string()));
    }
    let mut document = root.map(Document::from_root).ok_or(XmlError::Empty)?;
    take_comments(&mut pending, |c| document.add_epilogue_comment(c));
    Ok(document)
}

fn take_comments(pending: &mut Vec<String>, mut sink: impl FnMut(String)) {
    for comment in pending.drain(..) {
        sink(comment);
    }
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let mut element = Element::new(utf8(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute?;
        let value = attribute.unescape_value()?;
        element.set_attribute(utf8(attribute.key.as_ref()), value.as_ref());
    }
    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push(element);
        }
        None if root.is_some() => return Err(XmlError::MultipleRoots),
        None => *root = Some(element),
    }
    Ok(())
}

fn append_text(element: &mut Element, text: &str) {
    let joined = match element.text() {
        Some(existing) => format!("{existing}{text}"),
        None => text.to_string(),
    };
    element.set_text(joined);
}

fn utf8(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}
