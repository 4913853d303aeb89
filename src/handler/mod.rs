//! Handler module - Input event handling

pub mod key;

pub use key::{handle_key_event, update_input_buffer, KeyAction};
