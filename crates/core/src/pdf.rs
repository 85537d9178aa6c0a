//! Question extraction from PDF page text.
//!
//! Pages arrive as already extracted plain text. Each page is scanned with a
//! forward cursor; a question header may pull the option lines that follow
//! it into a group, and the cursor then jumps past everything consumed.

use std::fmt;

use serde::Serialize;

use crate::classify::{
    checkbox_text, classify_line, has_checkbox_marker, has_option_marker, option_text,
    split_lines, LineTag,
};
use crate::question::{ExtractedQuestion, QuestionKind};
use crate::schema;

/// Page separator emitted by `pdftotext` and similar tools.
pub const PAGE_BREAK: char = '\x0c';

/// A page whose text could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPage {
    /// 1-based page number.
    pub page: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PdfExtraction {
    pub questions: Vec<ExtractedQuestion>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub skipped_pages: Vec<SkippedPage>,
}

/// Split a plain-text dump into pages on form feeds.
pub fn split_pages(text: &str) -> Vec<&str> {
    text.split(PAGE_BREAK).collect()
}

/// Extract questions from a sequence of pages.
///
/// Each item is either a page's text or the error raised while reading it.
/// Failed pages are recorded in [`PdfExtraction::skipped_pages`] and the
/// remaining pages are still processed. An empty result is not an error.
pub fn extract_pdf_questions<I, S, E>(pages: I) -> PdfExtraction
where
    I: IntoIterator<Item = Result<S, E>>,
    S: AsRef<str>,
    E: fmt::Display,
{
    let mut questions = Vec::new();
    let mut skipped_pages = Vec::new();

    for (index, page) in pages.into_iter().enumerate() {
        match page {
            Ok(text) => questions.extend(scan_page(text.as_ref())),
            Err(e) => skipped_pages.push(SkippedPage {
                page: index + 1,
                reason: e.to_string(),
            }),
        }
    }

    PdfExtraction {
        questions: schema::assemble(questions),
        skipped_pages,
    }
}

/// Scan one page. `order` restarts at zero for every page; the assembler
/// renumbers across pages.
pub fn scan_page(page: &str) -> Vec<ExtractedQuestion> {
    let lines = split_lines(page);
    let mut questions: Vec<ExtractedQuestion> = Vec::new();
    let mut cursor = 0;

    while cursor < lines.len() {
        let (question, consumed) = read_question(&lines, cursor);
        if let Some(mut question) = question {
            question.order = questions.len() as u32;
            questions.push(question);
        }
        cursor += consumed.max(1);
    }

    questions
}

/// Read the question starting at `cursor`.
///
/// Returns the question, if the line starts one, and how many lines were
/// consumed (the header plus any grouped option lines, never less than one).
pub fn read_question(lines: &[&str], cursor: usize) -> (Option<ExtractedQuestion>, usize) {
    let Some(&line) = lines.get(cursor) else {
        return (None, 0);
    };
    let next = lines.get(cursor + 1).copied();

    match classify_line(line, next) {
        LineTag::Empty | LineTag::Plain => (None, 1),

        LineTag::OptionMarker { label } => {
            let options = collect_group(lines, cursor + 1, has_option_marker, option_text);
            let consumed = 1 + options.len();
            let question =
                ExtractedQuestion::new(label, QuestionKind::MultipleChoice, options, true, 0);
            (Some(question), consumed)
        }

        LineTag::CheckboxMarker { label } => {
            let options = collect_group(lines, cursor + 1, has_checkbox_marker, checkbox_text);
            let consumed = 1 + options.len();
            let question = ExtractedQuestion::new(label, QuestionKind::Checkbox, options, true, 0);
            (Some(question), consumed)
        }

        LineTag::Underscore { prefix } => {
            // `prefix` is normalized, so it never ends with '?' and this arm
            // never emits. Blank-field lines are left out of the form for now.
            if prefix.ends_with('?') {
                let question =
                    ExtractedQuestion::new(prefix, QuestionKind::Text, vec![], true, 0);
                (Some(question), 1)
            } else {
                (None, 1)
            }
        }

        LineTag::QuestionMark {
            label,
            required,
            opens_group: true,
        } => {
            let options = collect_group(lines, cursor + 1, has_option_marker, option_text);
            let consumed = 1 + options.len();
            let question =
                ExtractedQuestion::new(label, QuestionKind::MultipleChoice, options, required, 0);
            (Some(question), consumed)
        }

        LineTag::QuestionMark {
            label,
            required,
            opens_group: false,
        } => {
            let question = ExtractedQuestion::new(label, QuestionKind::Text, vec![], required, 0);
            (Some(question), 1)
        }
    }
}

/// Collect the run of lines starting at `start` that satisfy `belongs`,
/// turning each into option text with `to_option`.
fn collect_group(
    lines: &[&str],
    start: usize,
    belongs: fn(&str) -> bool,
    to_option: fn(&str) -> String,
) -> Vec<String> {
    lines
        .iter()
        .skip(start)
        .take_while(|line| belongs(line))
        .map(|line| to_option(line))
        .collect()
}
