//! Calculator content translation
//!
//! Content documents are JSON files with one section per language:
//!
//! ```text
//! { "en": { "calculatorComponent": { "inputs": [...], "output": {...},
//!           "additionalOutputs": [...] } },
//!   "es": { ... } }
//! ```
//!
//! Non-English sections often start as copies of the English one. This crate
//! seeds missing sections from `en`, rewrites their labels through a static
//! [`LabelTable`] (leaving anything the table does not know untouched), and
//! reports labels that are still English.

pub mod component;
pub mod document;
pub mod error;
pub mod labels;
pub mod language;

pub use component::{component_labels, translate_component};
pub use document::{ContentDocument, TranslationSummary};
pub use error::{Error, Result};
pub use labels::LabelTable;
pub use language::Language;
