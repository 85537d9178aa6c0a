//! Core library for formscribe
//!
//! This crate implements the **Functional Core** of the formscribe application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The formscribe project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`formscribe_core`** (this crate): Pure transformation functions with zero I/O
//! - **`formscribe`**: File reading, PDF page text, CLI and MCP orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no logging, no global mutable state
//! - **Total**: Extraction never fails; odd input is skipped and an empty list is a valid result
//! - **Testable**: Can be tested with simple fixture strings, no mocking required
//!
//! # Module Organization
//!
//! - [`normalize`]: Label normalization (letters and single spaces only)
//! - [`classify`]: Lexical line classification (option, checkbox, blank, question mark)
//! - [`question`]: The question record handed to persistence
//! - [`pdf`]: Question extraction from PDF page text
//! - [`mindmap`]: Indentation based mindmap parsing and flattening
//! - [`schema`]: Final assembly into a [`schema::FormDraft`]
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use formscribe_core::pdf::extract_pdf_questions;
//!
//! let pages: Vec<Result<&str, String>> = vec![Ok("Pick a color?\n(a) Red\n(b) Blue")];
//! let extraction = extract_pdf_questions(pages);
//!
//! assert_eq!(extraction.questions.len(), 1);
//! assert_eq!(extraction.questions[0].options, vec!["Red", "Blue"]);
//! ```
//!
//! Every call builds its own state, so extraction can run on any number of
//! threads at once without coordination.

pub mod classify;
pub mod mindmap;
pub mod normalize;
pub mod pdf;
pub mod question;
pub mod schema;

pub use mindmap::{parse_mindmap, Form};
pub use pdf::{extract_pdf_questions, PdfExtraction};
pub use question::{ExtractedQuestion, QuestionKind};
pub use schema::FormDraft;
