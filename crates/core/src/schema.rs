//! Final assembly of extracted questions into a form draft.

use serde::Serialize;
use thiserror::Error;

use crate::mindmap::{self, Form};
use crate::normalize::is_blank_label;
use crate::pdf::PdfExtraction;
use crate::question::ExtractedQuestion;

pub const PDF_DESCRIPTION: &str = "Automatically generated from PDF";
pub const MINDMAP_DESCRIPTION: &str = "Generated from mindmap";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Question order is not contiguous: expected {expected}, found {found}")]
    OrderGap { expected: u32, found: u32 },
}

/// What the persistence layer receives for one new form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDraft {
    pub title: String,
    pub description: String,
    pub questions: Vec<ExtractedQuestion>,
}

impl FormDraft {
    /// Draft for a PDF upload named `file_name`.
    pub fn from_pdf(file_name: &str, extraction: PdfExtraction) -> Self {
        FormDraft {
            title: format!("Form from {file_name}"),
            description: PDF_DESCRIPTION.to_string(),
            questions: assemble(extraction.questions),
        }
    }

    /// Draft for a parsed mindmap.
    pub fn from_mindmap(form: &Form) -> Self {
        FormDraft {
            title: form.title.clone(),
            description: MINDMAP_DESCRIPTION.to_string(),
            questions: assemble(mindmap::flatten(form)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Produce the final question list.
///
/// Questions whose text has no letters are dropped, options are cleared on
/// kinds that cannot carry them, and `order` is renumbered `0..N` keeping the
/// incoming sequence.
pub fn assemble(questions: Vec<ExtractedQuestion>) -> Vec<ExtractedQuestion> {
    questions
        .into_iter()
        .filter(|q| !is_blank_label(&q.text))
        .enumerate()
        .map(|(order, mut q)| {
            if !q.kind.is_choice() {
                q.options.clear();
            }
            q.order = order as u32;
            q
        })
        .collect()
}

/// Check that `order` runs `0..N` with no gaps or repeats.
pub fn validate_order(questions: &[ExtractedQuestion]) -> Result<(), SchemaError> {
    for (expected, question) in questions.iter().enumerate() {
        let expected = expected as u32;
        if question.order != expected {
            return Err(SchemaError::OrderGap {
                expected,
                found: question.order,
            });
        }
    }
    Ok(())
}
