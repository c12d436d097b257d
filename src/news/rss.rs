//! RSS 2.0 channel parsing.

use super::text::{clean_description, clean_title, decode_entities};
use super::NewsItem;
use crate::utils::error::{Error, Result};
use chrono::{DateTime, Utc};
use quick_xml::events::Event;
use quick_xml::reader::Reader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    Guid,
    PubDate,
    Creator,
    Category,
    Description,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            | b"title" => Some(Field::Title),
            | b"link" => Some(Field::Link),
            | b"guid" => Some(Field::Guid),
            | b"pubDate" => Some(Field::PubDate),
            | b"dc:creator" | b"creator" | b"author" => Some(Field::Creator),
            | b"category" => Some(Field::Category),
            | b"description" => Some(Field::Description),
            | _ => None,
        }
    }
}

fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw.trim()).ok().map(|d| d.with_timezone(&Utc))
}

fn assign(item: &mut NewsItem, field: Field, raw: &str) {
    match field {
        | Field::Title => item.title = clean_title(raw),
        | Field::Link => item.link = raw.trim().to_string(),
        | Field::Guid => item.guid = raw.trim().to_string(),
        | Field::PubDate => {
            item.pub_date = raw.trim().to_string();
            item.published_at = parse_pub_date(raw);
        }
        | Field::Creator => item.creator = clean_title(raw),
        | Field::Category => {
            // keep the first category only
            if item.category.is_empty() {
                item.category = clean_title(raw);
            }
        }
        | Field::Description => item.description = clean_description(raw),
    }
}

/// Parse the `<item>` elements of an RSS document, in document order.
///
/// Escaped text is unescaped at the XML level before field cleanup; CDATA
/// sections are taken verbatim. Fields an item lacks stay empty. A
/// well-formed document without a `<channel>` is a [`Error::DataError`].
pub fn parse_rss(xml: &str) -> Result<Vec<NewsItem>> {
    // No trim_text: spacing between text and CDATA fragments is significant.
    let mut reader = Reader::from_str(xml);

    let mut items = Vec::new();
    let mut current: Option<NewsItem> = None;
    let mut field: Option<Field> = None;
    let mut buf = String::new();
    let mut saw_channel = false;

    loop {
        match reader.read_event()? {
            | Event::Start(e) => {
                let name = e.name();
                if name.as_ref() == b"channel" {
                    saw_channel = true;
                } else if name.as_ref() == b"item" {
                    current = Some(NewsItem::default());
                } else if current.is_some() {
                    field = Field::from_tag(name.as_ref());
                    buf.clear();
                }
            }
            | Event::Text(t) => {
                if field.is_some() {
                    buf.push_str(&decode_entities(&String::from_utf8_lossy(&t)));
                }
            }
            | Event::CData(c) => {
                if field.is_some() {
                    buf.push_str(&String::from_utf8_lossy(&c));
                }
            }
            | Event::End(e) => {
                let name = e.name();
                if name.as_ref() == b"item" {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                    field = None;
                } else if let (Some(item), Some(f)) = (current.as_mut(), field) {
                    if Field::from_tag(name.as_ref()) == Some(f) {
                        assign(item, f, &buf);
                        field = None;
                    }
                }
            }
            | Event::Eof => break,
            | _ => {}
        }
    }

    if !saw_channel {
        return Err(Error::DataError("document has no RSS channel".to_string()));
    }
    log::debug!("parsed {} feed items", items.len());
    Ok(items)
}
