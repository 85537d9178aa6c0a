//! Lexical line classification for page text.
//!
//! Each line gets exactly one [`LineTag`]. Rules are tried in a fixed order and
//! the first match wins:
//!
//! 1. option marker: `(a)` through `(d)`, either case
//! 2. checkbox marker: `[ ]`, `[  ]` or `□`
//! 3. underscore blank: any `_`
//! 4. question mark: the trimmed line ends with `?` (trailing `*` allowed)
//! 5. plain
//!
//! Detection always runs on the raw line. Labels carried by the tags are
//! already normalized.

use std::sync::OnceLock;

use regex::Regex;

use crate::normalize::normalize;

/// Literal checkbox markers, longest first so stripping `[  ]` is not left
/// half-done by `[ ]`.
pub const CHECKBOX_MARKERS: [&str; 3] = ["[  ]", "[ ]", "\u{25A1}"];

/// Split a page into raw, untrimmed lines.
pub fn split_lines(page: &str) -> Vec<&str> {
    page.lines().collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineTag {
    /// Nothing but whitespace.
    Empty,
    /// The line holds at least one `(a)`..`(d)` marker.
    OptionMarker { label: String },
    /// The line holds a checkbox marker.
    CheckboxMarker { label: String },
    /// The line holds an underscore. `prefix` is the normalized text before
    /// the first `_`.
    Underscore { prefix: String },
    /// The trimmed line ends with `?`. `opens_group` is set when the next line
    /// carries an option marker.
    QuestionMark {
        label: String,
        required: bool,
        opens_group: bool,
    },
    Plain,
}

fn option_marker_regex() -> &'static Regex {
    static RE_OPTION: OnceLock<Regex> = OnceLock::new();
    RE_OPTION.get_or_init(|| Regex::new(r"\([a-dA-D]\)").expect("option marker regex"))
}

/// True when the line contains `(a)`, `(b)`, `(c)` or `(d)` in either case.
pub fn has_option_marker(line: &str) -> bool {
    option_marker_regex().is_match(line)
}

/// True when the line contains one of [`CHECKBOX_MARKERS`].
pub fn has_checkbox_marker(line: &str) -> bool {
    CHECKBOX_MARKERS.iter().any(|marker| line.contains(marker))
}

/// A `*` anywhere on the raw line marks the question as required.
pub fn is_required(line: &str) -> bool {
    line.contains('*')
}

/// True when the line ends with `?`, ignoring trailing required markers, so
/// both `Email?` and `Email?*` qualify.
pub fn ends_with_question_mark(line: &str) -> bool {
    line.trim_end()
        .trim_end_matches(|c: char| c == '*' || c.is_whitespace())
        .ends_with('?')
}

/// Option text for a line inside a multiple choice group: everything after
/// the first `)`, normalized. Lines without `)` are normalized whole.
pub fn option_text(line: &str) -> String {
    let trimmed = line.trim();
    let rest = match trimmed.split_once(')') {
        Some((_, rest)) => rest,
        None => trimmed,
    };
    normalize(rest)
}

/// Option text for a line inside a checkbox group: the line with every
/// checkbox marker removed, normalized.
pub fn checkbox_text(line: &str) -> String {
    let stripped = CHECKBOX_MARKERS
        .iter()
        .fold(line.trim().to_string(), |acc, marker| acc.replace(marker, ""));
    normalize(&stripped)
}

/// Classify `line`, peeking at `next` only to decide whether a question-mark
/// line opens an option group.
pub fn classify_line(line: &str, next: Option<&str>) -> LineTag {
    let line = line.trim();

    if line.is_empty() {
        return LineTag::Empty;
    }

    if has_option_marker(line) {
        return LineTag::OptionMarker {
            label: normalize(line),
        };
    }

    if has_checkbox_marker(line) {
        return LineTag::CheckboxMarker {
            label: normalize(line),
        };
    }

    if let Some((before, _)) = line.split_once('_') {
        return LineTag::Underscore {
            prefix: normalize(before),
        };
    }

    if ends_with_question_mark(line) {
        return LineTag::QuestionMark {
            label: normalize(line),
            required: is_required(line),
            opens_group: next.is_some_and(has_option_marker),
        };
    }

    LineTag::Plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line() {
        assert_eq!(classify_line("   \t", None), LineTag::Empty);
    }

    #[test]
    fn test_option_marker_both_cases() {
        assert!(has_option_marker("(a) Red"));
        assert!(has_option_marker("Choose (C) or (d)"));
        assert!(has_option_marker("(D)"));
        assert!(!has_option_marker("(e) Purple"));
        assert!(!has_option_marker("(ab) Not a marker"));
        assert!(!has_option_marker("a) Red"));
    }

    #[test]
    fn test_option_marker_line_becomes_header() {
        assert_eq!(
            classify_line("Colour (a) red?", None),
            LineTag::OptionMarker {
                label: "Colour a red".to_string()
            }
        );
    }

    #[test]
    fn test_checkbox_markers() {
        assert!(has_checkbox_marker("[ ] Apple"));
        assert!(has_checkbox_marker("[  ] Apple"));
        assert!(has_checkbox_marker("\u{25A1} Apple"));
        assert!(!has_checkbox_marker("[x] Apple"));
    }

    #[test]
    fn test_option_marker_beats_checkbox() {
        let tag = classify_line("[ ] (a) both", None);
        assert!(matches!(tag, LineTag::OptionMarker { .. }));
    }

    #[test]
    fn test_checkbox_beats_underscore() {
        let tag = classify_line("[ ] Other: ______", None);
        assert!(matches!(tag, LineTag::CheckboxMarker { .. }));
    }

    #[test]
    fn test_underscore_beats_question_mark() {
        assert_eq!(
            classify_line("Your name? ________", None),
            LineTag::Underscore {
                prefix: "Your name".to_string()
            }
        );
    }

    #[test]
    fn test_question_mark_with_lookahead() {
        assert_eq!(
            classify_line("Pick a color?", Some("(a) Red")),
            LineTag::QuestionMark {
                label: "Pick a color".to_string(),
                required: false,
                opens_group: true,
            }
        );
        assert_eq!(
            classify_line("Pick a color?", Some("Red")),
            LineTag::QuestionMark {
                label: "Pick a color".to_string(),
                required: false,
                opens_group: false,
            }
        );
    }

    #[test]
    fn test_question_mark_checked_on_trimmed_line() {
        let tag = classify_line("  Are you sure?   ", None);
        assert!(matches!(tag, LineTag::QuestionMark { .. }));
    }

    #[test]
    fn test_required_asterisk() {
        assert_eq!(
            classify_line("Email address?*", None),
            LineTag::QuestionMark {
                label: "Email address".to_string(),
                required: true,
                opens_group: false,
            }
        );
        assert_eq!(
            classify_line("*Email address?", None),
            LineTag::QuestionMark {
                label: "Email address".to_string(),
                required: true,
                opens_group: false,
            }
        );
        assert!(is_required("Email address?*"));
    }

    #[test]
    fn test_ends_with_question_mark() {
        assert!(ends_with_question_mark("Age?"));
        assert!(ends_with_question_mark("Age? *"));
        assert!(ends_with_question_mark("Age?**  "));
        assert!(!ends_with_question_mark("Age*"));
        assert!(!ends_with_question_mark("Why? Because"));
    }

    #[test]
    fn test_plain() {
        assert_eq!(classify_line("Select fruits", None), LineTag::Plain);
    }

    #[test]
    fn test_option_text_strips_through_first_paren() {
        assert_eq!(option_text("(a) Red"), "Red");
        assert_eq!(option_text("  (B)  Dark (navy) blue "), "Dark navy blue");
        assert_eq!(option_text("No paren here"), "No paren here");
    }

    #[test]
    fn test_checkbox_text_strips_markers() {
        assert_eq!(checkbox_text("[ ] Apple"), "Apple");
        assert_eq!(checkbox_text("[  ] Green apple"), "Green apple");
        assert_eq!(checkbox_text("\u{25A1} Banana \u{25A1}"), "Banana");
    }

    #[test]
    fn test_split_lines_keeps_blank_lines() {
        assert_eq!(split_lines("first\n\n  third\r\n"), vec!["first", "", "  third"]);
    }
}
