use formscribe_core::{parse_mindmap, Form, FormDraft};

use crate::input::read_text;
use crate::prelude::{eprintln, println, *};
use crate::render::{output_draft, DraftOutput};

#[derive(Debug, clap::Parser)]
#[command(name = "mindmap")]
#[command(about = "Form generation from indented mindmap notation")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Parse a mindmap into a form draft
    Parse(ParseOptions),
}

#[derive(Debug, clap::Args)]
pub struct ParseOptions {
    /// Mindmap file, or `-` to read stdin
    #[arg(default_value = "-")]
    pub source: String,

    /// Print the parsed title/section/field tree instead of the draft
    #[arg(long)]
    pub tree: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Parse(options) => parse(options, global),
    }
}

fn parse(options: ParseOptions, global: crate::Global) -> Result<()> {
    let text = read_text(&options.source, global.max_bytes)?;
    let form = parse_mindmap(&text);

    if global.verbose {
        eprintln!(
            "Parsed '{}': {} sections",
            form.title,
            form.sections.len()
        );
        eprintln!();
    }

    if options.tree {
        println!("{}", format_tree(&form, options.json)?);
        return Ok(());
    }

    output_draft(&draft_data(&form), options.json)
}

/// Parse mindmap text into a form draft (for CLI and MCP reuse).
pub fn parse_data(text: &str) -> DraftOutput {
    draft_data(&parse_mindmap(text))
}

fn draft_data(form: &Form) -> DraftOutput {
    let draft = FormDraft::from_mindmap(form);
    log::debug!("mindmap '{}': {} questions", draft.title, draft.questions.len());
    draft.into()
}

fn format_tree(form: &Form, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(form)
            .map_err(|e| eyre!("JSON serialization failed: {}", e));
    }

    let mut result = format!("{}\n", form.title);
    for section in &form.sections {
        result.push_str(&format!("  {}\n", section.name));
        for field in &section.fields {
            result.push_str(&format!("    {}|{}\n", field.label, field.field_type));
            for option in &field.options {
                result.push_str(&format!("      {}\n", option));
            }
        }
    }

    Ok(result)
}
