//! Brace-aware patching of semi-structured source text.
//!
//! Source files of the calculator app embed translation tables as nested
//! `key: { ... }` blocks:
//!
//! ```text
//! const translations = {
//!   en: {
//!     title: "Loan Calculator",
//!     calculate: "Calculate"
//!   },
//!   es: {
//!     title: "Calculadora de Préstamos",
//!     calculate: "Calcular"
//!   }
//! };
//! ```
//!
//! This crate edits such text without parsing the host language. Blocks are
//! found by a line-anchored opener pattern and bounded by counting literal
//! braces; everything else is plain line surgery on a [`Document`].
//!
//! # Operations
//!
//! - [`locator`]: find a block by key and compute its closing line.
//! - [`property`]: check for a property, insert one before a block's close
//!   (fixing up the predecessor's trailing comma), or rewrite an existing
//!   property's value.
//! - [`anchor`]: insert markup before or after a marker line, guarded by an
//!   idempotence marker.
//! - [`removal`]: delete a markup block, optionally gated on a binding that
//!   must be absent from the rest of the document.
//! - [`replace`]: swap a hard-coded literal for an expression in context.
//!
//! Every operation is idempotent and never changes the document's overall
//! brace balance. Structural problems surface as [`Error`]s; "already there"
//! and "nothing to do" are ordinary outcomes.

pub mod anchor;
pub mod document;
pub mod error;
pub mod locator;
pub mod property;
pub mod removal;
pub mod replace;

pub use anchor::{AnchorInsert, AnchorOutcome, Placement, find_anchor, insert_at_anchor};
pub use document::Document;
pub use error::{Error, Result};
pub use locator::{BlockRange, brace_balance, brace_delta, find_block, find_blocks};
pub use property::{
    PropertyInsert, PropertyOutcome, PropertyUpdate, UpdateOutcome, block_has_property,
    insert_property, insert_property_all, update_property, update_property_all,
};
pub use removal::{
    CompensatingRemoval, RemovalOutcome, Removed, compensating_remove, find_markup_block,
    remove_markup_block,
};
pub use replace::{LiteralReplace, replace_literal};
