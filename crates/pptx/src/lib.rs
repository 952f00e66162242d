//! PPTX (Office Open XML) backend: per-slide text reading, phrase search,
//! and extraction of matching slides into new presentations.
//!
//! A .pptx file is a ZIP archive of XML parts; slide order is defined by
//! `ppt/presentation.xml` and its relationships, not by part filenames.

mod package;

pub mod extract;
pub mod parser;
pub mod search;

pub use extract::{extract_results, extract_slides};
pub use parser::PptxParser;
pub use search::{search_folder, search_presentation};
