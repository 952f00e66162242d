//! Phrase search over single presentations and whole folders.

use crate::parser::PptxParser;
use slidegrep_core::{
    scan_folder, FileMatches, PhraseSet, Result, SearchResults, SlideMatch,
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// File extension handled by the search pipeline.
pub const PPTX_EXTENSION: &str = "pptx";

/// Search one presentation for the given phrases.
///
/// Returns the matching slides in slide order; an empty vector means the
/// file does not appear in the results at all.
pub fn search_presentation(path: &Path, phrases: &PhraseSet) -> Result<Vec<SlideMatch>> {
    let file = File::open(path)?;
    let slides = PptxParser::new().parse(BufReader::new(file))?;

    let matches: Vec<SlideMatch> = slides
        .into_iter()
        .filter(|slide| phrases.matches(&slide.text))
        .map(SlideMatch::from)
        .collect();

    log::debug!(
        "{}: {} matching slide(s)",
        path.display(),
        matches.len()
    );

    Ok(matches)
}

/// Search every `.pptx` file of a folder for the given phrases.
///
/// Files are visited in sorted filename order with sequential 3-digit IDs;
/// only files with at least one match are recorded. Any open or parse
/// failure aborts the whole search.
pub fn search_folder(folder: &Path, phrases: &PhraseSet) -> Result<SearchResults> {
    let mut results = SearchResults::new();

    for file in scan_folder(folder, PPTX_EXTENSION)? {
        let slides = search_presentation(&file.path, phrases)?;
        if !slides.is_empty() {
            results.push(FileMatches {
                file_id: file.file_id,
                path: file.path,
                slides,
            });
        }
    }

    Ok(results)
}
