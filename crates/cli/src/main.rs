//! CLI for searching presentation folders by phrase.
//!
//! `slidegrep report` compiles matching slide text into a Word document;
//! `slidegrep extract` writes new presentations containing only the
//! matching slides.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use slidegrep_core::{PhraseSet, SearchResults, MAX_PHRASES};
use slidegrep_docx::ReportWriter;
use slidegrep_pptx::{extract_results, search_folder};
use std::path::{Path, PathBuf};

/// Search PowerPoint folders for phrases; report or extract matching slides.
#[derive(Parser, Debug)]
#[command(name = "slidegrep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile matching slide text into a single .docx report
    Report {
        /// Folder containing .pptx files
        folder: PathBuf,

        /// Phrase to search for (repeat up to three times)
        #[arg(short, long = "phrase", value_name = "PHRASE")]
        phrases: Vec<String>,

        /// Destination .docx path (overwritten if it exists)
        #[arg(short, long)]
        output: PathBuf,

        /// Free text for the cover page
        #[arg(long, default_value = "")]
        cover_text: String,

        /// Report title
        #[arg(long, default_value = slidegrep_docx::report::DEFAULT_TITLE)]
        title: String,
    },

    /// Extract matching slides into new .pptx files
    Extract {
        /// Folder containing .pptx files
        folder: PathBuf,

        /// Phrase to search for (repeat up to three times)
        #[arg(short, long = "phrase", value_name = "PHRASE")]
        phrases: Vec<String>,

        /// Destination folder for the extracted presentations
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match cli.command {
        Command::Report {
            folder,
            phrases,
            output,
            cover_text,
            title,
        } => {
            let phrases = build_phrase_set(&phrases)?;
            let Some(results) = run_search(&folder, &phrases)? else {
                return Ok(());
            };

            ReportWriter::new(cover_text)
                .with_title(title)
                .write(&results, &output)
                .with_context(|| format!("Failed to write report to {}", output.display()))?;

            println!(
                "Report written to {} ({} file(s), {} slide(s))",
                output.display(),
                results.file_count(),
                results.slide_count()
            );
        }

        Command::Extract {
            folder,
            phrases,
            output,
        } => {
            let phrases = build_phrase_set(&phrases)?;
            let Some(results) = run_search(&folder, &phrases)? else {
                return Ok(());
            };

            std::fs::create_dir_all(&output)
                .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

            let written = extract_results(&results, &output)
                .with_context(|| format!("Failed to extract slides into {}", output.display()))?;

            println!(
                "Extracted {} slide(s) into {} file(s):",
                results.slide_count(),
                written.len()
            );
            for path in &written {
                println!("  {}", path.display());
            }
        }
    }

    Ok(())
}

/// Validate raw phrase arguments and build the matching set.
fn build_phrase_set(raw: &[String]) -> Result<PhraseSet> {
    if raw.len() > MAX_PHRASES {
        bail!("At most {} phrases may be given", MAX_PHRASES);
    }

    let phrases = PhraseSet::new(raw);
    if phrases.is_empty() {
        bail!("At least one non-empty phrase must be given");
    }

    Ok(phrases)
}

/// Run the folder search; `None` means nothing matched and a message was
/// already printed.
fn run_search(folder: &Path, phrases: &PhraseSet) -> Result<Option<SearchResults>> {
    log::debug!("Searching {} with {} phrase(s)", folder.display(), phrases.len());

    let results = search_folder(folder, phrases)
        .with_context(|| format!("Failed to search {}", folder.display()))?;

    if results.is_empty() {
        println!("No slides found with the specified phrases.");
        return Ok(None);
    }

    Ok(Some(results))
}
