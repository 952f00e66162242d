//! DOCX report writer: compiles search results into a single Word
//! document with a cover page, per-file headings, and per-slide text.

pub mod report;

pub use report::ReportWriter;
