//! Integration with scripts and other tools

pub mod pick;

pub use pick::{exit_code, write_selection, OutputFormat, PickResult};
