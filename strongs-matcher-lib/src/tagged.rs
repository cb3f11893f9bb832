// Reader for verse text carrying upstream Strong's tags.
//
// The source marks a word's number with an element glued to the word:
//   בְּרֵאשִׁית<S>7225</S> בָּרָא<S>1254</S> אֱלֹהִים<S></S>
// An empty element means the source had no number for that word. Words not
// directly followed by an element are untagged.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::TagError;
use crate::types::TaggedWord;

const TAG: &[u8] = b"S";
const ROOT: &[u8] = b"root";

/// Split tagged verse text into words, each with its upstream id if any.
pub fn parse_tagged_verse(markup: &str) -> Result<Vec<TaggedWord>, TagError> {
    scan(markup).map(|(words, _)| words)
}

/// The verse text with all tags removed, for display.
pub fn strip_tags(markup: &str) -> Result<String, TagError> {
    scan(markup).map(|(_, text)| text.trim().to_string())
}

fn scan(markup: &str) -> Result<(Vec<TaggedWord>, String), TagError> {
    // Verse text is a fragment; wrap it in a root element.
    let wrapped = format!("<root>{markup}</root>");
    let mut reader = Reader::from_str(&wrapped);

    let mut words = Vec::new();
    let mut plain = String::new();
    // The last word of a text run, waiting to see whether a tag follows.
    let mut pending: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.name().as_ref() {
                ROOT => {}
                TAG => {
                    let number = read_number(&mut reader)?;
                    if let Some(text) = pending.take() {
                        words.push(TaggedWord {
                            text,
                            strong: number.map(|n| format!("H{n}")),
                        });
                    }
                }
                other => {
                    return Err(TagError::UnexpectedElement(
                        String::from_utf8_lossy(other).into_owned(),
                    ))
                }
            },
            Ok(Event::Empty(ref e)) if e.name().as_ref() == TAG => {
                if let Some(text) = pending.take() {
                    words.push(TaggedWord { text, strong: None });
                }
            }
            Ok(Event::Empty(ref e)) => {
                return Err(TagError::UnexpectedElement(
                    String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                ))
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map_err(|source| TagError::Markup {
                    position: reader.buffer_position() as u64,
                    source: source.into(),
                })?;
                plain.push_str(&text);
                if let Some(text) = pending.take() {
                    words.push(TaggedWord { text, strong: None });
                }
                let mut tokens: Vec<&str> = text.split_whitespace().collect();
                if !text.ends_with(char::is_whitespace) {
                    pending = tokens.pop().map(str::to_string);
                }
                words.extend(tokens.into_iter().map(|t| TaggedWord {
                    text: t.to_string(),
                    strong: None,
                }));
            }
            Ok(Event::Eof) => break,
            Err(source) => {
                return Err(TagError::Markup {
                    position: reader.buffer_position() as u64,
                    source,
                })
            }
            _ => {}
        }
    }

    if let Some(text) = pending.take() {
        words.push(TaggedWord { text, strong: None });
    }
    Ok((words, plain))
}

/// Read the digits inside a tag up to its closing element. An empty tag
/// yields `None`.
fn read_number(reader: &mut Reader<&[u8]>) -> Result<Option<String>, TagError> {
    let mut number = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().map_err(|source| TagError::Markup {
                    position: reader.buffer_position() as u64,
                    source: source.into(),
                })?;
                number.push_str(text.trim());
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == TAG => break,
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                return Err(TagError::UnexpectedElement(
                    String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                ))
            }
            Ok(Event::Eof) => break,
            Err(source) => {
                return Err(TagError::Markup {
                    position: reader.buffer_position() as u64,
                    source,
                })
            }
            _ => {}
        }
    }
    if number.is_empty() {
        return Ok(None);
    }
    if !number.chars().all(|c| c.is_ascii_digit()) {
        return Err(TagError::InvalidNumber(number));
    }
    Ok(Some(number))
}
