use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Text,
    Email,
    MultipleChoice,
    Checkbox,
    Radio,
}

impl QuestionKind {
    /// Kinds whose answers are picked from a list of options.
    pub fn is_choice(&self) -> bool {
        matches!(
            self,
            QuestionKind::MultipleChoice | QuestionKind::Checkbox | QuestionKind::Radio
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Text => "text",
            QuestionKind::Email => "email",
            QuestionKind::MultipleChoice => "multiple_choice",
            QuestionKind::Checkbox => "checkbox",
            QuestionKind::Radio => "radio",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown question type: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for QuestionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text" => Ok(QuestionKind::Text),
            "email" => Ok(QuestionKind::Email),
            "multiple_choice" => Ok(QuestionKind::MultipleChoice),
            "checkbox" => Ok(QuestionKind::Checkbox),
            "radio" => Ok(QuestionKind::Radio),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

/// A question definition ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedQuestion {
    pub text: String,
    pub kind: QuestionKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    pub required: bool,
    pub order: u32,
}

impl ExtractedQuestion {
    /// Build a question, discarding `options` for kinds that cannot carry them.
    pub fn new(
        text: impl Into<String>,
        kind: QuestionKind,
        options: Vec<String>,
        required: bool,
        order: u32,
    ) -> Self {
        let options = if kind.is_choice() { options } else { Vec::new() };

        ExtractedQuestion {
            text: text.into(),
            kind,
            options,
            required,
            order,
        }
    }
}

/// Render an option list the way it is stored: a JSON array of strings.
pub fn encode_options(options: &[String]) -> String {
    serde_json::to_string(options).unwrap_or_else(|_| "[]".to_string())
}

/// Read a stored option list. Empty or malformed input yields no options.
pub fn decode_options(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_vocabulary() {
        for kind in [
            QuestionKind::Text,
            QuestionKind::Email,
            QuestionKind::MultipleChoice,
            QuestionKind::Checkbox,
            QuestionKind::Radio,
        ] {
            assert_eq!(kind.as_str().parse::<QuestionKind>(), Ok(kind));
            assert_eq!(
                serde_json::to_string(&kind).unwrap(),
                format!("\"{}\"", kind.as_str())
            );
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = "dropdown".parse::<QuestionKind>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown question type: dropdown");
    }

    #[test]
    fn test_is_choice() {
        assert!(QuestionKind::MultipleChoice.is_choice());
        assert!(QuestionKind::Checkbox.is_choice());
        assert!(QuestionKind::Radio.is_choice());
        assert!(!QuestionKind::Text.is_choice());
        assert!(!QuestionKind::Email.is_choice());
    }

    #[test]
    fn test_new_drops_options_for_text_kinds() {
        let q = ExtractedQuestion::new(
            "Email",
            QuestionKind::Email,
            vec!["stray".to_string()],
            true,
            0,
        );
        assert!(q.options.is_empty());
    }

    #[test]
    fn test_serialization_omits_empty_options() {
        let q = ExtractedQuestion::new("Name", QuestionKind::Text, vec![], true, 0);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": "Name",
                "kind": "text",
                "required": true,
                "order": 0
            })
        );

        let back: ExtractedQuestion = serde_json::from_value(json).unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn test_options_codec() {
        let options = vec!["Red".to_string(), "Blue \"navy\"".to_string()];
        let raw = encode_options(&options);
        assert_eq!(raw, r#"["Red","Blue \"navy\""]"#);
        assert_eq!(decode_options(&raw), options);
    }

    #[test]
    fn test_decode_options_is_tolerant() {
        assert!(decode_options("").is_empty());
        assert!(decode_options("   ").is_empty());
        assert!(decode_options("not json").is_empty());
        assert!(decode_options(r#"{"a": 1}"#).is_empty());
    }
}
