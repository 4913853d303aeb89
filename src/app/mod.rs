//! Application module - terminal front-end for the picker

mod config;
pub mod config_file;
mod event_loop;
mod render;
mod state;

pub use config::Config;
pub use config_file::ConfigFile;
pub use event_loop::{run_app, AppResult};
pub use state::{InputMode, ViewState};
