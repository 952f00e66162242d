//! Folder scanning: enumerate candidate presentation files.
//!
//! Files are filtered by extension, sorted by filename, and assigned
//! sequential 1-based IDs zero-padded to three digits. A directory read
//! error aborts the scan; there is no per-file recovery.

use crate::{Result, ScannedFile};
use std::fs;
use std::path::Path;

/// Scan `folder` for regular files with the given extension.
///
/// Extension comparison is ASCII-case-insensitive and does not include the
/// dot (`"pptx"`, not `".pptx"`). Entries whose names are not valid UTF-8
/// are skipped, as they cannot carry a displayable file ID.
pub fn scan_folder(folder: &Path, extension: &str) -> Result<Vec<ScannedFile>> {
    let mut names: Vec<String> = Vec::new();

    for entry in fs::read_dir(folder)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let path = entry.path();
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(extension))
            .unwrap_or(false);
        if !matches_ext {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => {
                log::warn!("Skipping non-UTF-8 filename: {:?}", name);
            }
        }
    }

    names.sort();

    let files = names
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let path = folder.join(&name);
            ScannedFile::new(i + 1, &name, path)
        })
        .collect();

    Ok(files)
}
