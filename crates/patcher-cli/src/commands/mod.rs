//! Command implementations for calc-patch

pub mod apply;
pub mod recipes;
pub mod summary;
pub mod translate;

pub use apply::{run_apply, run_repair};
pub use recipes::run_recipes;
pub use translate::{TranslateMode, run_translate};
