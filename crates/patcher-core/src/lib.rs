//! Recipes and batch patching for calc-patcher
//!
//! - **Recipes**: config-described patch pipelines, loadable from disk or
//!   taken from the built-ins
//! - **Pipeline**: a recipe validated and compiled into block operations
//! - **BatchEngine**: runs a pipeline, or the content translator, over a
//!   directory and collects a [`BatchReport`]
//!
//! ```text
//!                 patcher-cli
//!                      |
//!                 patcher-core
//!                      |
//!     +----------------+----------------+
//!     |                |                |
//! patcher-fs    patcher-blocks   patcher-content
//! ```

pub mod engine;
pub mod error;
pub mod pipeline;
pub mod recipe;
pub mod report;

pub use engine::{BatchEngine, BatchOptions};
pub use error::{Error, Result};
pub use pipeline::Pipeline;
pub use recipe::{
    MarkupStep, Position, PropertyStep, Recipe, RemovalStep, ReplaceStep, Selection, Step,
    UpdateStep,
};
pub use report::{BatchReport, FileReport, FileStatus, StepNote};
