use colored::Colorize;
use formscribe_core::pdf::SkippedPage;
use formscribe_core::FormDraft;
use serde::Serialize;

use crate::prelude::{eprintln, print, println, *};

/// A form draft together with the pages that could not be read.
#[derive(Debug, Clone, Serialize)]
pub struct DraftOutput {
    #[serde(flatten)]
    pub draft: FormDraft,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_pages: Vec<SkippedPage>,
}

impl From<FormDraft> for DraftOutput {
    fn from(draft: FormDraft) -> Self {
        DraftOutput {
            draft,
            skipped_pages: Vec::new(),
        }
    }
}

pub fn format_draft_json(output: &DraftOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

/// Render a draft as a header followed by a question table.
pub fn format_draft_text(output: &DraftOutput) -> String {
    let draft = &output.draft;
    let mut result = String::new();

    result.push_str(&format!("\n{}\n", draft.title.bold()));
    result.push_str(&format!("{}\n\n", draft.description.dimmed()));

    if draft.is_empty() {
        result.push_str(&format!("{}\n", "No questions found.".yellow()));
    } else {
        let mut table = new_table();
        table.add_row(prettytable::row!["#", "Question", "Type", "Required", "Options"]);
        for question in &draft.questions {
            let required = if question.required { "yes" } else { "no" };
            let options = question.options.join(", ");
            table.add_row(prettytable::row![
                question.order,
                question.text,
                question.kind,
                required,
                options
            ]);
        }
        result.push_str(&table.to_string());
    }

    for skipped in &output.skipped_pages {
        result.push_str(&format!(
            "{} page {}: {}\n",
            "skipped".red(),
            skipped.page,
            skipped.reason
        ));
    }

    result
}

pub fn output_draft(output: &DraftOutput, json: bool) -> Result<()> {
    if json {
        println!("{}", format_draft_json(output)?);
    } else {
        print!("{}", format_draft_text(output));
    }

    if output.draft.is_empty() {
        eprintln!("No questions found");
    }

    Ok(())
}
