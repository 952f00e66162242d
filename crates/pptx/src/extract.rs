//! Extraction of matching slides into new presentation files.
//!
//! Rather than rebuilding slides on fresh layouts (which duplicates
//! layout placeholders and mutates the source in memory), extraction is a
//! filtered deep copy of the whole package: non-matching slide parts are
//! dropped, the presentation part, its relationships, and the content-type
//! overrides are rewritten to match, and every other part is copied
//! verbatim. Layouts, masters, media, and theme survive untouched, so the
//! kept slides keep their exact formatting.

use crate::package::{
    self, local_name, parent_dir, rels_path_for, PRESENTATION_PART, PRESENTATION_RELS,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use slidegrep_core::{Error, Result, SearchResults};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Cursor, Write as _};
use std::path::{Path, PathBuf};
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Write a copy of `source` to `target` containing only the slides whose
/// 0-based indices appear in `keep`, in their original order.
///
/// Returns the number of slides written. `target` is overwritten silently
/// if it exists.
pub fn extract_slides(source: &Path, target: &Path, keep: &[usize]) -> Result<usize> {
    let file = File::open(source)?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

    let entries = package::slide_entries(&mut archive)?;
    let keep_set: HashSet<usize> = keep.iter().copied().collect();

    // Everything reachable only from a dropped slide has to go with it,
    // or the package is left with dangling relationship targets.
    let mut drop_rel_ids: HashSet<String> = HashSet::new();
    let mut drop_parts: HashSet<String> = HashSet::new();

    for (idx, entry) in entries.iter().enumerate() {
        if keep_set.contains(&idx) {
            continue;
        }

        drop_rel_ids.insert(entry.rel_id.clone());
        let slide_rels = rels_path_for(&entry.path);

        if let Ok(rels_xml) = package::read_part_to_string(&mut archive, &slide_rels) {
            for rel in package::parse_relationships(&rels_xml)? {
                if rel.rel_type.ends_with("/notesSlide") {
                    let notes = package::resolve_target(parent_dir(&entry.path), &rel.target);
                    drop_parts.insert(rels_path_for(&notes));
                    drop_parts.insert(notes);
                }
            }
        }

        drop_parts.insert(slide_rels);
        drop_parts.insert(entry.path.clone());
    }

    let kept = entries.len() - drop_rel_ids.len();
    log::debug!(
        "{}: keeping {} of {} slides",
        source.display(),
        kept,
        entries.len()
    );

    let out = File::create(target)?;
    let mut writer = ZipWriter::new(out);
    let options = FileOptions::default();

    for i in 0..archive.len() {
        let name = archive
            .by_index(i)
            .map_err(|e| Error::ZipError(e.to_string()))?
            .name()
            .to_string();

        if drop_parts.contains(&name) {
            continue;
        }

        let rewritten = match name.as_str() {
            PRESENTATION_PART => {
                let xml = package::read_part_to_string(&mut archive, &name)?;
                Some(strip_slide_ids(&xml, &drop_rel_ids)?)
            }
            PRESENTATION_RELS => {
                let xml = package::read_part_to_string(&mut archive, &name)?;
                Some(strip_relationships(&xml, &drop_rel_ids)?)
            }
            CONTENT_TYPES_PART => {
                let xml = package::read_part_to_string(&mut archive, &name)?;
                Some(strip_overrides(&xml, &drop_parts)?)
            }
            _ => None,
        };

        match rewritten {
            Some(xml) => {
                writer
                    .start_file(name, options)
                    .map_err(|e| Error::ZipError(e.to_string()))?;
                writer.write_all(xml.as_bytes())?;
            }
            None => {
                let entry = archive
                    .by_index(i)
                    .map_err(|e| Error::ZipError(e.to_string()))?;
                writer
                    .raw_copy_file(entry)
                    .map_err(|e| Error::ZipError(e.to_string()))?;
            }
        }
    }

    writer
        .finish()
        .map_err(|e| Error::ZipError(e.to_string()))?;

    Ok(kept)
}

/// Write one extracted presentation per matched source file into `out_dir`.
///
/// Output files are named `Extracted_{file_id}`; existing files are
/// overwritten silently. Returns the written paths in result order.
pub fn extract_results(results: &SearchResults, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(results.file_count());

    for file in results.iter() {
        let target = out_dir.join(format!("Extracted_{}", file.file_id));
        let indices: Vec<usize> = file.slides.iter().map(|s| s.index).collect();
        extract_slides(&file.path, &target, &indices)?;
        written.push(target);
    }

    Ok(written)
}

/// Copy `xml`, dropping every element for which `drop_element` is true.
///
/// Dropped start elements are skipped together with their whole subtree.
fn filter_xml<F>(xml: &str, mut drop_element: F) -> Result<String>
where
    F: FnMut(&BytesStart) -> bool,
{
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));

    loop {
        let event = reader
            .read_event()
            .map_err(|err| Error::XmlError(format!("Error rewriting XML: {}", err)))?;

        match event {
            Event::Eof => break,
            Event::Start(e) => {
                if drop_element(&e) {
                    reader.read_to_end(e.name()).map_err(|err| {
                        Error::XmlError(format!("Error skipping element: {}", err))
                    })?;
                } else {
                    writer
                        .write_event(Event::Start(e))
                        .map_err(|err| Error::XmlError(format!("Error rewriting XML: {}", err)))?;
                }
            }
            Event::Empty(e) => {
                if !drop_element(&e) {
                    writer
                        .write_event(Event::Empty(e))
                        .map_err(|err| Error::XmlError(format!("Error rewriting XML: {}", err)))?;
                }
            }
            other => {
                writer
                    .write_event(other)
                    .map_err(|err| Error::XmlError(format!("Error rewriting XML: {}", err)))?;
            }
        }
    }

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|err| Error::XmlError(err.to_string()))
}

/// Attribute value by raw (namespaced) key.
fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

/// Remove `<p:sldId>` entries referencing dropped slides.
fn strip_slide_ids(presentation_xml: &str, drop_rel_ids: &HashSet<String>) -> Result<String> {
    filter_xml(presentation_xml, |e| {
        local_name(e.name().as_ref()) == b"sldId"
            && attr_value(e, b"r:id")
                .map(|id| drop_rel_ids.contains(&id))
                .unwrap_or(false)
    })
}

/// Remove `<Relationship>` entries for dropped slides.
fn strip_relationships(rels_xml: &str, drop_rel_ids: &HashSet<String>) -> Result<String> {
    filter_xml(rels_xml, |e| {
        e.name().as_ref() == b"Relationship"
            && attr_value(e, b"Id")
                .map(|id| drop_rel_ids.contains(&id))
                .unwrap_or(false)
    })
}

/// Remove `<Override>` entries for dropped parts.
fn strip_overrides(content_types_xml: &str, drop_parts: &HashSet<String>) -> Result<String> {
    filter_xml(content_types_xml, |e| {
        e.name().as_ref() == b"Override"
            && attr_value(e, b"PartName")
                .map(|part| drop_parts.contains(part.trim_start_matches('/')))
                .unwrap_or(false)
    })
}
