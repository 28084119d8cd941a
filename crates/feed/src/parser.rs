use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::FeedError;
use crate::models::FeedItem;
use crate::Result;

#[derive(Debug, Default)]
struct ItemBuilder {
    title: Option<String>,
    enclosures: Vec<String>,
}

impl ItemBuilder {
    fn build(self) -> FeedItem {
        FeedItem {
            title: self.title.unwrap_or_default(),
            enclosures: self.enclosures,
        }
    }
}

/// Parse an RSS document into its items.
///
/// Only the pieces the pipeline consumes are extracted: the item title
/// and the `url` attribute of every `<enclosure>`, in document order.
/// Unknown elements are skipped without complaint. Empty `url`
/// attributes are kept as empty strings so callers can report them.
pub fn parse_feed(xml: &[u8]) -> Result<Vec<FeedItem>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut current_item: Option<ItemBuilder> = None;
    let mut current_element = String::new();
    let mut saw_element = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                saw_element = true;
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                match name.as_str() {
                    "item" => current_item = Some(ItemBuilder::default()),
                    "enclosure" => {
                        if let Some(ref mut item) = current_item {
                            push_enclosure_url(e, item);
                        }
                    }
                    _ => {}
                }
                current_element = name;
            }
            Ok(Event::Empty(ref e)) => {
                saw_element = true;
                // Self-closing form, e.g. <enclosure url="..."/>
                if e.name().as_ref() == b"enclosure" {
                    if let Some(ref mut item) = current_item {
                        push_enclosure_url(e, item);
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(ref mut item) = current_item {
                    if current_element == "title" {
                        item.title = Some(e.unescape().unwrap_or_default().to_string());
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(ref mut item) = current_item {
                    if current_element == "title" {
                        item.title = Some(String::from_utf8_lossy(&e.into_inner()).to_string());
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                if e.name().as_ref() == b"item" {
                    if let Some(item) = current_item.take() {
                        items.push(item.build());
                    }
                }
                current_element.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(FeedError::Parse(format!("XML error: {}", e))),
            _ => {}
        }
        buf.clear();
    }

    if !saw_element {
        return Err(FeedError::Parse("no XML elements found".to_string()));
    }

    Ok(items)
}

fn push_enclosure_url(e: &BytesStart, item: &mut ItemBuilder) {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"url" {
            if let Ok(value) = attr.unescape_value() {
                item.enclosures.push(value.to_string());
            }
        }
    }
}
