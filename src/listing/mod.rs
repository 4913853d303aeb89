//! Listing module - Directory snapshots shown by the picker

pub mod entry;
pub mod fs;
pub mod view;

pub use entry::{Entry, EntryId, EntryKind};
pub use fs::{FileSystem, RawEntry, StdFileSystem};
pub use view::{compare_names, DirectoryView, Listing, EMPTY_TEXT};
