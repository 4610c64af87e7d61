//! scenelint Core - Shared error types
//!
//! Every library crate in the workspace returns [`Result`] so that setup and
//! I/O failures surface through a single error enum.

mod error;

pub use error::{Result, SceneLintError};
