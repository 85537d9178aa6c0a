use std::path::{Path, PathBuf};

use formscribe_core::{extract_pdf_questions, FormDraft};

use crate::input::{read_bounded, SourceKind};
use crate::prelude::{eprintln, *};
use crate::render::{output_draft, DraftOutput};

pub mod pages;

#[derive(Debug, clap::Parser)]
#[command(name = "pdf")]
#[command(about = "Question extraction from PDF documents")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Extract the questions of a PDF into a form draft
    Extract(ExtractOptions),
}

#[derive(Debug, clap::Args)]
pub struct ExtractOptions {
    /// Path to a .pdf file, or a .txt dump with form-feed page breaks
    pub path: PathBuf,

    /// Override the generated form title
    #[arg(long)]
    pub title: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Extract(options) => extract(options, global),
    }
}

fn extract(options: ExtractOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Extracting questions from {}", options.path.display());
        eprintln!();
    }

    let mut output = extract_data(&options.path, global.max_bytes)?;
    if let Some(title) = options.title {
        output.draft.title = title;
    }

    if global.verbose {
        eprintln!(
            "{} questions, {} skipped pages",
            output.draft.questions.len(),
            output.skipped_pages.len()
        );
    }

    output_draft(&output, options.json)
}

/// Read `path` and build its form draft (for CLI and MCP reuse).
pub fn extract_data(path: &Path, max_bytes: u64) -> Result<DraftOutput> {
    let kind = SourceKind::from_path(path)?;
    let bytes = read_bounded(path, max_bytes)?;

    let page_texts = match kind {
        SourceKind::Pdf => pages::pdf_page_texts(&bytes)?,
        SourceKind::Text => pages::text_page_texts(&bytes)?,
    };
    log::debug!("{}: {} pages", path.display(), page_texts.len());

    let mut extraction = extract_pdf_questions(page_texts);
    for skipped in &extraction.skipped_pages {
        log::warn!(
            "{}: skipping page {}: {}",
            path.display(),
            skipped.page,
            skipped.reason
        );
    }
    let skipped_pages = std::mem::take(&mut extraction.skipped_pages);

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let draft = FormDraft::from_pdf(&file_name, extraction);
    log::debug!("{}: {} questions", path.display(), draft.questions.len());

    Ok(DraftOutput {
        draft,
        skipped_pages,
    })
}
