//! Simple File Picker - a modal file/folder chooser
//!
//! This crate provides a directory-listing picker with configurable item
//! and choice modes, usable as a library dialog or as the `sfp` terminal app.

pub mod app;
pub mod core;
pub mod dialog;
pub mod error;
pub mod handler;
pub mod integrate;
pub mod listing;
