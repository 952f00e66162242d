//! PPTX per-slide text extraction.

use crate::package;
use quick_xml::events::Event;
use quick_xml::Reader;
use slidegrep_core::{Error, Result, SlideContent};
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX file from a reader, producing one `SlideContent` per
    /// slide in presentation order.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<Vec<SlideContent>> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let entries = package::slide_entries(&mut archive)?;
        log::debug!("Presentation has {} slides", entries.len());

        let mut slides = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let xml = package::read_part_to_string(&mut archive, &entry.path)?;
            let text = extract_slide_text(&xml)?;
            slides.push(SlideContent::new(idx + 1, text));
        }

        Ok(slides)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the text of one slide from its XML part.
///
/// Each shape (`p:sp` or `p:pic`) with a text body contributes its text;
/// paragraphs within a shape and shapes within the slide are joined with
/// newlines. Shapes without text are skipped.
fn extract_slide_text(xml: &str) -> Result<String> {
    let mut shape_texts: Vec<String> = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut in_shape = false;
    let mut in_text_body = false;
    let mut in_paragraph = false;
    let mut current_text = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match package::local_name(e.name().as_ref()) {
                b"sp" | b"pic" => {
                    in_shape = true;
                    current_text.clear();
                }
                b"txBody" if in_shape => {
                    in_text_body = true;
                }
                b"p" if in_text_body => {
                    in_paragraph = true;
                    if !current_text.is_empty() {
                        current_text.push('\n');
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_paragraph {
                    let text = e.unescape().map_err(|err| {
                        Error::XmlError(format!("Error unescaping slide text: {}", err))
                    })?;
                    current_text.push_str(&text);
                }
            }
            Ok(Event::End(ref e)) => match package::local_name(e.name().as_ref()) {
                b"sp" | b"pic" => {
                    let text = current_text.trim();
                    if !text.is_empty() {
                        shape_texts.push(text.to_string());
                    }
                    current_text.clear();
                    in_shape = false;
                    in_text_body = false;
                    in_paragraph = false;
                }
                b"txBody" => {
                    in_text_body = false;
                }
                b"p" => {
                    in_paragraph = false;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing slide: {}", e)));
            }
            _ => {}
        }
    }

    Ok(shape_texts.join("\n"))
}
