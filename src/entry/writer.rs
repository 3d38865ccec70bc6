use std::borrow::Cow;
use std::io::{Cursor, Write};

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::Writer;

use super::{Category, ElementRef, Entry, EntryError, Link, Person};
use crate::config::WriterConfig;
use crate::util::{escape_text, format_timestamp};

// ============================================================================
// Validation
// ============================================================================

/// Returns the value of a required record attribute or the matching error.
fn required<'a>(
    value: &'a Option<String>,
    element: ElementRef,
    attribute: &'static str,
) -> Result<&'a str, EntryError> {
    value
        .as_deref()
        .ok_or(EntryError::MissingRequiredAttribute { element, attribute })
}

fn timestamp(element: &'static str, seconds: i64) -> Result<String, EntryError> {
    format_timestamp(seconds).ok_or(EntryError::TimestampOutOfRange { element, seconds })
}

impl Entry {
    /// Checks that the entry can be written.
    ///
    /// Problems are reported in document order, so the first error returned
    /// is the one a reader of the output would hit first.
    ///
    /// # Errors
    ///
    /// - [`EntryError::MissingRequiredAttribute`] for a link without `href`,
    ///   an author or contributor without `name`, or a category without `term`
    /// - [`EntryError::TimestampOutOfRange`] for an unrepresentable
    ///   `updated`/`published` value
    pub fn validate(&self) -> Result<(), EntryError> {
        for (index, link) in self.links.iter().enumerate() {
            required(&link.href, ElementRef::Link { index }, "href")?;
        }
        if let Some(author) = self.author.as_ref().filter(|p| !p.is_empty()) {
            required(&author.name, ElementRef::Author, "name")?;
        }
        if let Some(contributor) = self.contributor.as_ref().filter(|p| !p.is_empty()) {
            required(&contributor.name, ElementRef::Contributor, "name")?;
        }
        for (index, category) in self.categories.iter().enumerate() {
            required(&category.term, ElementRef::Category { index }, "term")?;
        }
        if let Some(seconds) = self.updated {
            timestamp("updated", seconds)?;
        }
        if let Some(seconds) = self.published {
            timestamp("published", seconds)?;
        }
        Ok(())
    }

    /// Serializes the entry as a compact `<entry>` fragment without an XML
    /// declaration.
    ///
    /// An entry with no fields set yields `<entry></entry>`. Calling this
    /// repeatedly on an unchanged entry yields identical output.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate). Nothing is produced on error.
    pub fn serialize(&self) -> Result<String, EntryError> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        self.write_to(&mut writer)?;
        into_string(writer)
    }

    /// Serializes the entry as a standalone document.
    ///
    /// Honors the declaration and indentation settings of `config`. The
    /// document ends with a newline.
    pub fn to_document(&self, config: &WriterConfig) -> Result<String, EntryError> {
        self.validate()?;

        let buffer = Cursor::new(Vec::new());
        let mut writer = match config.indent_byte() {
            Some(ch) => Writer::new_with_indent(buffer, ch, config.indent_size),
            None => Writer::new(buffer),
        };

        if config.xml_declaration {
            writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
            // The indenting writer starts the root on its own line already
            if !config.indent {
                writer.get_mut().write_all(b"\n")?;
            }
        }
        self.write_to(&mut writer)?;
        writer.get_mut().write_all(b"\n")?;

        into_string(writer)
    }

    /// Writes the `<entry>` element into an existing writer.
    ///
    /// This is how a feed embeds entries into its own document. The entry is
    /// validated before the first event is written, so a failing entry leaves
    /// `writer` untouched.
    pub fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<(), EntryError> {
        self.validate()?;

        tracing::debug!(
            links = self.links.len(),
            categories = self.categories.len(),
            extensions = self.raw_params.len(),
            "Writing entry"
        );

        writer.write_event(Event::Start(BytesStart::new("entry")))?;

        if let Some(title) = &self.title {
            write_text_element(writer, "title", &escape_text(title))?;
        }
        if let Some(subtitle) = self.subtitle.as_deref().filter(|s| !s.is_empty()) {
            write_text_element(writer, "subtitle", &escape_text(subtitle))?;
        }

        for (index, link) in self.links.iter().enumerate() {
            writer.write_event(Event::Empty(link_element(link, index)?))?;
        }

        for (tag, param) in &self.raw_params {
            let mut start = BytesStart::new(tag.as_str());
            if let Some(namespace) = &param.namespace {
                let xmlns = match tag.split_once(':') {
                    Some((prefix, _)) => Cow::Owned(format!("xmlns:{}", prefix)),
                    None => Cow::Borrowed("xmlns"),
                };
                start.push_attribute((xmlns.as_ref(), namespace.as_str()));
            }
            writer.write_event(Event::Start(start))?;
            writer.write_event(Event::Text(BytesText::from_escaped(escape_text(&param.value))))?;
            writer.write_event(Event::End(BytesEnd::new(tag.as_str())))?;
        }

        if let Some(id) = &self.id {
            write_text_element(writer, "id", id)?;
        }
        if let Some(summary) = &self.summary {
            write_text_element(writer, "summary", &escape_text(summary))?;
        }

        if let Some(content) = &self.content {
            let mut start = BytesStart::new("content");
            start.push_attribute(("type", "html"));
            writer.write_event(Event::Start(start))?;
            writer.write_event(Event::CData(BytesCData::new(content.as_str())))?;
            writer.write_event(Event::End(BytesEnd::new("content")))?;
        }

        if !self.source.is_empty() {
            writer.write_event(Event::Start(BytesStart::new("source")))?;
            for (tag, value) in &self.source {
                write_text_element(writer, tag, value)?;
            }
            writer.write_event(Event::End(BytesEnd::new("source")))?;
        }

        if let Some(author) = &self.author {
            write_person(writer, author, ElementRef::Author)?;
        }
        if let Some(contributor) = &self.contributor {
            write_person(writer, contributor, ElementRef::Contributor)?;
        }

        for (index, category) in self.categories.iter().enumerate() {
            writer.write_event(Event::Empty(category_element(category, index)?))?;
        }

        if let Some(seconds) = self.updated {
            write_text_element(writer, "updated", &timestamp("updated", seconds)?)?;
        }
        if let Some(seconds) = self.published {
            write_text_element(writer, "published", &timestamp("published", seconds)?)?;
        }
        if let Some(rights) = &self.rights {
            write_text_element(writer, "rights", rights)?;
        }

        writer.write_event(Event::End(BytesEnd::new("entry")))?;
        Ok(())
    }
}

// ============================================================================
// Element Builders
// ============================================================================

/// Writes `<tag>text</tag>` with `text` inserted as-is.
///
/// Callers escape display text beforehand; trusted values go in verbatim.
fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    tag: &str,
    text: &str,
) -> Result<(), EntryError> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::from_escaped(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn link_element(link: &Link, index: usize) -> Result<BytesStart<'_>, EntryError> {
    let href = required(&link.href, ElementRef::Link { index }, "href")?;

    let mut element = BytesStart::new("link");
    element.push_attribute(("href", href));
    if let Some(rel) = &link.rel {
        element.push_attribute(("rel", rel.as_str()));
    }
    if let Some(hreflang) = &link.hreflang {
        element.push_attribute(("hreflang", hreflang.as_str()));
    }
    if let Some(title) = &link.title {
        element.push_attribute(("title", title.as_str()));
    }
    if let Some(length) = link.length {
        element.push_attribute(("length", length.to_string().as_str()));
    }
    Ok(element)
}

fn category_element(category: &Category, index: usize) -> Result<BytesStart<'_>, EntryError> {
    let term = required(&category.term, ElementRef::Category { index }, "term")?;

    let mut element = BytesStart::new("category");
    element.push_attribute(("term", term));
    if let Some(scheme) = &category.scheme {
        element.push_attribute(("scheme", scheme.as_str()));
    }
    if let Some(label) = &category.label {
        // Display text: escaped once here, then written without further escaping
        element.push_attribute(Attribute {
            key: QName(b"label"),
            value: Cow::Owned(escape_text(label).into_owned().into_bytes()),
        });
    }
    Ok(element)
}

fn write_person<W: Write>(
    writer: &mut Writer<W>,
    person: &Person,
    element: ElementRef,
) -> Result<(), EntryError> {
    if person.is_empty() {
        return Ok(());
    }
    let name = required(&person.name, element, "name")?;
    let tag = element.tag();

    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    write_text_element(writer, "name", &escape_text(name))?;
    if let Some(email) = &person.email {
        write_text_element(writer, "email", email)?;
    }
    if let Some(uri) = &person.uri {
        write_text_element(writer, "uri", uri)?;
    }
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn into_string(writer: Writer<Cursor<Vec<u8>>>) -> Result<String, EntryError> {
    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes)
        .map_err(|e| EntryError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}
