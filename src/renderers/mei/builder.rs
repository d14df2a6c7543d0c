// MEI XML writer

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::errors::Result;

pub const MEI_NAMESPACE: &str = "http://www.music-encoding.org/ns/mei";

/// Indented element writer over an in-memory buffer
pub struct MeiBuilder {
    writer: Writer<Cursor<Vec<u8>>>,
    open: Vec<&'static str>,
}

impl MeiBuilder {
    pub fn new() -> Result<Self> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(Self {
            writer,
            open: Vec::new(),
        })
    }

    /// Open an element; closed by the matching `end`
    pub fn start(&mut self, name: &'static str, attributes: &[(&str, &str)]) -> Result<()> {
        self.writer.write_event(Event::Start(element(name, attributes)))?;
        self.open.push(name);
        Ok(())
    }

    pub fn end(&mut self) -> Result<()> {
        if let Some(name) = self.open.pop() {
            self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        Ok(())
    }

    pub fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.writer.write_event(Event::Empty(element(name, attributes)))?;
        Ok(())
    }

    /// Close any open elements and return the document
    pub fn finish(mut self) -> Result<String> {
        while !self.open.is_empty() {
            self.end()?;
        }
        Ok(String::from_utf8(self.writer.into_inner().into_inner())?)
    }
}

fn element<'a>(name: &'a str, attributes: &[(&str, &str)]) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    for &attribute in attributes {
        element.push_attribute(attribute);
    }
    element
}
