//! Building and saving the search report document.

use docx_rs::{
    AlignmentType, BreakType, Docx, Footer, Paragraph, Run, Style, StyleType,
};
use slidegrep_core::{Error, Result, SearchResults};
use std::fs::File;
use std::path::Path;

/// Default document title.
pub const DEFAULT_TITLE: &str = "PowerPoint Search Report";

/// Footer placeholder text; static, not a live page-number field.
const FOOTER_TEXT: &str = "Page [Page Number]";

/// Builds one report document from a result set.
///
/// Layout: title, cover paragraph, page break, then per matched file a
/// level-1 heading with its ID-prefixed name and per matching slide a
/// level-2 heading ("Slide N"), the slide text, and a page break.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    title: String,
    cover_text: String,
}

impl ReportWriter {
    /// Create a writer with the default title and the given cover text.
    pub fn new(cover_text: impl Into<String>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            cover_text: cover_text.into(),
        }
    }

    /// Override the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Build the report document in memory.
    pub fn build(&self, results: &SearchResults) -> Docx {
        let mut doc = Docx::new()
            .add_style(
                Style::new("Title", StyleType::Paragraph)
                    .name("Title")
                    .size(56)
                    .bold(),
            )
            .add_style(
                Style::new("Heading1", StyleType::Paragraph)
                    .name("Heading 1")
                    .size(32)
                    .bold(),
            )
            .add_style(
                Style::new("Heading2", StyleType::Paragraph)
                    .name("Heading 2")
                    .size(26)
                    .bold(),
            );

        doc = doc.add_paragraph(
            Paragraph::new()
                .style("Title")
                .add_run(Run::new().add_text(self.title.as_str())),
        );
        doc = doc.add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(self.cover_text.as_str())),
        );
        doc = doc.add_paragraph(page_break());

        for file in results.iter() {
            doc = doc.add_paragraph(
                Paragraph::new()
                    .style("Heading1")
                    .add_run(Run::new().add_text(file.file_id.as_str())),
            );

            for slide in &file.slides {
                doc = doc.add_paragraph(
                    Paragraph::new()
                        .style("Heading2")
                        .add_run(Run::new().add_text(format!("Slide {}", slide.number))),
                );
                doc = doc.add_paragraph(text_paragraph(&slide.text));
                doc = doc.add_paragraph(page_break());
            }
        }

        doc.footer(
            Footer::new().add_paragraph(
                Paragraph::new()
                    .align(AlignmentType::Center)
                    .add_run(Run::new().add_text(FOOTER_TEXT).size(18)),
            ),
        )
    }

    /// Build the report and save it to `path`, overwriting silently.
    pub fn write(&self, results: &SearchResults, path: &Path) -> Result<()> {
        log::debug!(
            "Writing report for {} file(s) to {}",
            results.file_count(),
            path.display()
        );

        let mut file = File::create(path)?;
        self.build(results)
            .build()
            .pack(&mut file)
            .map_err(|e| Error::DocxError(e.to_string()))?;

        Ok(())
    }
}

/// One paragraph carrying multi-line slide text; inner newlines become
/// soft line breaks.
fn text_paragraph(text: &str) -> Paragraph {
    let mut run = Run::new();
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    Paragraph::new().add_run(run)
}

/// An empty paragraph whose run is a page break.
fn page_break() -> Paragraph {
    Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
}
