// Library crate: the editing core. Used by the headless command runner, the
// HTTP service and the integration tests; rendering lives elsewhere.

pub mod ai;
pub mod command;
pub mod error;
pub mod fixtures;
pub mod persistence;
pub mod state;
pub mod viewport;

pub use error::{Error, Result};
