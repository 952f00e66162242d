//! Core domain types, phrase matching, and folder scanning
//! for presentation phrase search.

pub mod error;
pub mod phrase;
pub mod scan;
pub mod types;

pub use error::{Error, Result};
pub use phrase::{PhraseSet, MAX_PHRASES};
pub use scan::scan_folder;
pub use types::{FileMatches, ScannedFile, SearchResults, SlideContent, SlideMatch};
