//! Core module - Picker modes, selection state and the controller

pub mod controller;
pub mod mode;
pub mod snapshot;
pub mod state;

pub use controller::{Button, Ignored, Outcome, Selection, SelectionController, SingleChoice};
pub use mode::{ChoiceMode, CompositeMode, ItemMode, Title};
pub use snapshot::Snapshot;
pub use state::{Buttons, CheckedCounts, SelectionState};
