//! Domain types for representing scanned files and search results.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The extracted text of a single slide, in presentation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideContent {
    /// 1-based positional slide ordinal.
    pub number: usize,

    /// Newline-joined text of every shape on the slide that carries text.
    /// Shapes without text do not contribute.
    pub text: String,
}

impl SlideContent {
    /// Create slide content with the given ordinal.
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}

/// A slide that matched at least one search phrase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideMatch {
    /// 0-based slide index, used by the extraction writer.
    pub index: usize,

    /// 1-based slide ordinal, used by report headings.
    pub number: usize,

    /// Full slide text as extracted.
    pub text: String,
}

impl From<SlideContent> for SlideMatch {
    fn from(slide: SlideContent) -> Self {
        Self {
            index: slide.number - 1,
            number: slide.number,
            text: slide.text,
        }
    }
}

/// All matching slides of one source presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMatches {
    /// Display identifier, e.g. `001_quarterly.pptx`.
    pub file_id: String,

    /// Path of the source presentation.
    pub path: PathBuf,

    /// Matching slides in slide order. Never empty inside `SearchResults`.
    pub slides: Vec<SlideMatch>,
}

/// Search results for a whole folder, ordered by sorted source filename.
///
/// Only files with at least one matching slide appear.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResults {
    pub files: Vec<FileMatches>,
}

impl SearchResults {
    /// Create an empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the matches of one file.
    pub fn push(&mut self, file: FileMatches) {
        self.files.push(file);
    }

    /// True if no file matched.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of matched files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Total number of matching slides across all files.
    pub fn slide_count(&self) -> usize {
        self.files.iter().map(|f| f.slides.len()).sum()
    }

    /// Iterate over per-file matches in result order.
    pub fn iter(&self) -> std::slice::Iter<'_, FileMatches> {
        self.files.iter()
    }
}

/// A candidate file found by the folder scanner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedFile {
    /// Sequential 1-based ID in sorted filename order.
    pub id: usize,

    /// `{id:03}_{filename}` display identifier.
    pub file_id: String,

    /// Full path of the file.
    pub path: PathBuf,
}

impl ScannedFile {
    /// Create a scanned file entry, deriving the display identifier.
    pub fn new(id: usize, filename: &str, path: PathBuf) -> Self {
        Self {
            id,
            file_id: format!("{:03}_{}", id, filename),
            path,
        }
    }
}
