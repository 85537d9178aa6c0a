//! Mindmap notation parser.
//!
//! A mindmap describes a form with space indentation:
//!
//! ```text
//! Survey Title
//!   Section: Basics
//!     Name|text
//!     Favorite Color|dropdown
//!       Red
//!       Blue
//! ```
//!
//! Indent widths are exact: 0 is the form title, 2 a section, 4 a field and 6
//! an option of the most recent field. Lines at any other width are ignored,
//! as are fields with no open section and options before any field. A new
//! section does not close the field above it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::question::{ExtractedQuestion, QuestionKind};

const TITLE_INDENT: usize = 0;
const SECTION_INDENT: usize = 2;
const FIELD_INDENT: usize = 4;
const OPTION_INDENT: usize = 6;

/// Field types accepted after the `|` separator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Dropdown,
    Checkbox,
    Radio,
    Email,
}

impl FieldType {
    /// Read a type spec. Anything outside the vocabulary falls back to text.
    pub fn from_spec(spec: &str) -> Self {
        spec.parse().unwrap_or_default()
    }

    pub fn takes_options(&self) -> bool {
        matches!(
            self,
            FieldType::Dropdown | FieldType::Checkbox | FieldType::Radio
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Dropdown => "dropdown",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Email => "email",
        }
    }

    pub fn question_kind(&self) -> QuestionKind {
        match self {
            FieldType::Text => QuestionKind::Text,
            FieldType::Email => QuestionKind::Email,
            FieldType::Dropdown => QuestionKind::MultipleChoice,
            FieldType::Checkbox => QuestionKind::Checkbox,
            FieldType::Radio => QuestionKind::Radio,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(FieldType::Text),
            "dropdown" => Ok(FieldType::Dropdown),
            "checkbox" => Ok(FieldType::Checkbox),
            "radio" => Ok(FieldType::Radio),
            "email" => Ok(FieldType::Email),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub title: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub label: String,
    pub field_type: FieldType,
    pub options: Vec<String>,
}

/// Position of the field that option lines attach to.
#[derive(Debug, Clone, Copy)]
struct FieldCursor {
    section: usize,
    field: usize,
}

impl Form {
    fn field_mut(&mut self, cursor: FieldCursor) -> Option<&mut Field> {
        self.sections
            .get_mut(cursor.section)?
            .fields
            .get_mut(cursor.field)
    }
}

/// Leading space count, or `None` when the indentation mixes in tabs or other
/// whitespace.
fn indent_width(line: &str) -> Option<usize> {
    let width = line.chars().take_while(|c| *c == ' ').count();
    match line[width..].chars().next() {
        Some(c) if c.is_whitespace() => None,
        _ => Some(width),
    }
}

fn section_name(content: &str) -> String {
    match content.split_once(':') {
        Some((_, name)) => name.trim().to_string(),
        None => content.to_string(),
    }
}

/// `label|type`. Only the segment between the first and second `|` is the
/// type spec; anything after it is ignored.
fn parse_field(content: &str) -> Field {
    let mut parts = content.split('|');
    let label = parts.next().unwrap_or_default().trim();
    let field_type = parts.next().map(FieldType::from_spec).unwrap_or_default();

    Field {
        label: label.to_string(),
        field_type,
        options: Vec::new(),
    }
}

/// Parse mindmap text into a form tree. Never fails; malformed lines are
/// skipped.
pub fn parse_mindmap(text: &str) -> Form {
    let mut form = Form::default();
    let mut current: Option<FieldCursor> = None;

    for line in text.lines() {
        let content = line.trim();
        if content.is_empty() {
            continue;
        }

        let Some(indent) = indent_width(line) else {
            continue;
        };

        match indent {
            TITLE_INDENT => form.title = content.to_string(),
            SECTION_INDENT => form.sections.push(Section {
                name: section_name(content),
                fields: Vec::new(),
            }),
            FIELD_INDENT => {
                let section_index = form.sections.len().checked_sub(1);
                if let Some((index, section)) = section_index.zip(form.sections.last_mut()) {
                    section.fields.push(parse_field(content));
                    current = Some(FieldCursor {
                        section: index,
                        field: section.fields.len() - 1,
                    });
                }
            }
            OPTION_INDENT => {
                let field = current.and_then(|cursor| form.field_mut(cursor));
                if let Some(field) = field {
                    if field.field_type.takes_options() {
                        field.options.push(content.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    form
}

/// Flatten a form tree into questions, numbered across all sections.
pub fn flatten(form: &Form) -> Vec<ExtractedQuestion> {
    form.sections
        .iter()
        .flat_map(|section| section.fields.iter())
        .enumerate()
        .map(|(order, field)| {
            ExtractedQuestion::new(
                field.label.clone(),
                field.field_type.question_kind(),
                field.options.clone(),
                true,
                order as u32,
            )
        })
        .collect()
}
