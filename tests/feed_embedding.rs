//! Integration tests for handing entries to a feed and embedding them into
//! the feed's own XML document.
//!
//! `AtomFeed` is a minimal container standing in for a real feed writer: it
//! collects entries through the [`Feed`] trait and streams each one into its
//! `quick_xml::Writer` with `Entry::write_to`.

use std::io::Cursor;

use atom_entry::{ElementRef, Entry, EntryError, Feed, Link, Person};
use pretty_assertions::assert_eq;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

struct AtomFeed {
    title: String,
    entries: Vec<Entry>,
}

impl AtomFeed {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            entries: Vec::new(),
        }
    }

    fn render(&self) -> Result<String, EntryError> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut feed = BytesStart::new("feed");
        feed.push_attribute(("xmlns", "http://www.w3.org/2005/Atom"));
        writer.write_event(Event::Start(feed))?;
        writer.write_event(Event::Start(BytesStart::new("title")))?;
        writer.write_event(Event::Text(BytesText::new(&self.title)))?;
        writer.write_event(Event::End(BytesEnd::new("title")))?;

        for entry in &self.entries {
            entry.write_to(&mut writer)?;
        }

        writer.write_event(Event::End(BytesEnd::new("feed")))?;
        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8(bytes).expect("writer only receives UTF-8"))
    }
}

impl Feed for AtomFeed {
    fn add_entry(&mut self, entry: &Entry) {
        self.entries.push(entry.clone());
    }
}

#[test]
fn test_entries_embedded_in_append_order() {
    let mut feed = AtomFeed::new("Example & Co");

    Entry::new()
        .title("First")
        .id("urn:1")
        .append_to(&mut feed);
    Entry::new()
        .title("Second")
        .link(Link::new("https://example.com/2"))
        .append_to(&mut feed);

    assert_eq!(
        feed.render().unwrap(),
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
            "<feed xmlns=\"http://www.w3.org/2005/Atom\">",
            "<title>Example &amp; Co</title>",
            "<entry><title>First</title><id>urn:1</id></entry>",
            "<entry><title>Second</title><link href=\"https://example.com/2\"/></entry>",
            "</feed>"
        )
    );
}

#[test]
fn test_append_to_keeps_chaining_on_the_entry() {
    let mut feed = AtomFeed::new("Feed");
    let mut entry = Entry::new();
    entry.title("Draft").append_to(&mut feed).title("Final");

    // The feed holds what was appended; the entry stays writable
    assert_eq!(feed.entries.len(), 1);
    assert_eq!(
        feed.entries[0].serialize().unwrap(),
        "<entry><title>Draft</title></entry>"
    );
    assert_eq!(entry.serialize().unwrap(), "<entry><title>Final</title></entry>");
}

#[test]
fn test_invalid_entry_aborts_feed_render() {
    let mut feed = AtomFeed::new("Feed");
    Entry::new().title("Good").append_to(&mut feed);
    Entry::new()
        .title("Bad")
        .author(Person::default().email("a@b.com"))
        .append_to(&mut feed);

    let err = feed.render().unwrap_err();
    assert!(matches!(
        err,
        EntryError::MissingRequiredAttribute {
            element: ElementRef::Author,
            attribute: "name",
        }
    ));
}

#[test]
fn test_vec_collects_entries() {
    let mut entries: Vec<Entry> = Vec::new();
    Entry::new().id("urn:a").append_to(&mut entries);
    Entry::new().id("urn:b").append_to(&mut entries);

    let ids: Vec<String> = entries
        .iter()
        .map(|e| e.serialize().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            "<entry><id>urn:a</id></entry>".to_string(),
            "<entry><id>urn:b</id></entry>".to_string(),
        ]
    );
}

#[test]
fn test_entry_indents_with_feed_writer() {
    let mut entry = Entry::new();
    entry.title("Nested").id("urn:n");

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Start(BytesStart::new("feed")))
        .unwrap();
    entry.write_to(&mut writer).unwrap();
    writer
        .write_event(Event::End(BytesEnd::new("feed")))
        .unwrap();

    let xml = String::from_utf8(writer.into_inner()).unwrap();
    assert_eq!(
        xml,
        "<feed>\n  <entry>\n    <title>Nested</title>\n    <id>urn:n</id>\n  </entry>\n</feed>"
    );
}
