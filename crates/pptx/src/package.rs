//! OPC package helpers shared by the parser and the extraction writer.
//!
//! Resolves slide parts in presentation order by combining the `sldIdLst`
//! of `ppt/presentation.xml` with `ppt/_rels/presentation.xml.rels`.

use quick_xml::events::Event;
use quick_xml::Reader;
use slidegrep_core::{Error, Result};
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Path of the main presentation part.
pub(crate) const PRESENTATION_PART: &str = "ppt/presentation.xml";

/// Path of the main presentation's relationships part.
pub(crate) const PRESENTATION_RELS: &str = "ppt/_rels/presentation.xml.rels";

/// One entry of a relationships part.
#[derive(Debug, Clone)]
pub(crate) struct Relationship {
    pub id: String,
    pub rel_type: String,
    pub target: String,
}

/// A slide part in presentation order.
#[derive(Debug, Clone)]
pub(crate) struct SlideEntry {
    /// Relationship id (`rId..`) referencing the slide from the
    /// presentation part.
    pub rel_id: String,

    /// Full archive path of the slide part, e.g. `ppt/slides/slide2.xml`.
    pub path: String,
}

/// Read a part of the archive into a string.
pub(crate) fn read_part_to_string<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("Part not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Parse all `Relationship` entries of a relationships part.
pub(crate) fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut relationships = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                let mut id = String::new();
                let mut rel_type = String::new();
                let mut target = String::new();

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Type" => rel_type = String::from_utf8_lossy(&attr.value).to_string(),
                        b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                        _ => {}
                    }
                }

                relationships.push(Relationship { id, rel_type, target });
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing relationships: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(relationships)
}

/// Resolve the slide parts of a presentation, in presentation order.
///
/// Order comes from the `r:id` sequence of `<p:sldIdLst>`; the relationships
/// part maps each id to its target part.
pub(crate) fn slide_entries<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<Vec<SlideEntry>> {
    let rels_xml = read_part_to_string(archive, PRESENTATION_RELS)?;
    let targets: HashMap<String, String> = parse_relationships(&rels_xml)?
        .into_iter()
        .filter(|r| r.rel_type.ends_with("/slide"))
        .map(|r| (r.id, r.target))
        .collect();

    let presentation_xml = read_part_to_string(archive, PRESENTATION_PART)?;
    let ordered_ids = slide_id_list(&presentation_xml)?;

    let mut entries = Vec::with_capacity(ordered_ids.len());
    for rel_id in ordered_ids {
        let target = targets.get(&rel_id).ok_or_else(|| {
            Error::CorruptedFile(format!("Slide relationship '{}' has no target", rel_id))
        })?;
        entries.push(SlideEntry {
            path: resolve_target("ppt", target),
            rel_id,
        });
    }

    Ok(entries)
}

/// Extract the ordered `r:id` values of `<p:sldIdLst>`.
fn slide_id_list(presentation_xml: &str) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut reader = Reader::from_str(presentation_xml);
    reader.trim_text(true);
    let mut in_list = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if local_name(e.name().as_ref()) == b"sldIdLst" => {
                in_list = true;
            }
            Ok(Event::End(ref e)) if local_name(e.name().as_ref()) == b"sldIdLst" => {
                in_list = false;
            }
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if in_list && local_name(e.name().as_ref()) == b"sldId" =>
            {
                for attr in e.attributes().flatten() {
                    if attr.key.as_ref() == b"r:id" {
                        ids.push(String::from_utf8_lossy(&attr.value).to_string());
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation part: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// Resolve a relationship target against the directory of its source part.
///
/// Absolute targets (leading `/`) name the part directly; `../` segments
/// step out of the base directory.
pub(crate) fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut dir: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    let mut rest = target;
    while let Some(stripped) = rest.strip_prefix("../") {
        dir.pop();
        rest = stripped;
    }

    if dir.is_empty() {
        rest.to_string()
    } else {
        format!("{}/{}", dir.join("/"), rest)
    }
}

/// Path of the relationships part belonging to `part`.
///
/// `ppt/slides/slide1.xml` maps to `ppt/slides/_rels/slide1.xml.rels`.
pub(crate) fn rels_path_for(part: &str) -> String {
    let mut rels = part.to_string();
    if let Some(pos) = rels.rfind('/') {
        rels.insert_str(pos + 1, "_rels/");
    } else {
        rels.insert_str(0, "_rels/");
    }
    rels.push_str(".rels");
    rels
}

/// Directory of a part path, without trailing slash.
pub(crate) fn parent_dir(part: &str) -> &str {
    part.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Extract the local name from a potentially namespaced XML element name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}
