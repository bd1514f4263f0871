//! Filesystem access for calc-patcher
//!
//! Documents are read whole and written back whole. Writes go through a
//! temp-file-then-rename path so a failed run never leaves a half-written
//! source file behind.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigStore, Format};
pub use error::{Error, Result};
pub use path::NormalizedPath;
