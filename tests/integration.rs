//! Integration tests for the picker
//!
//! These tests drive the dialog against real directory trees and verify
//! listings, button enablement, navigation and results.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use simple_file_picker::core::{
    Button, CompositeMode, Ignored, Outcome, Selection, SelectionController, SingleChoice, Snapshot,
};
use simple_file_picker::dialog::{DialogEvent, FilePickerDialog, PickerListener};
use simple_file_picker::integrate::{write_selection, OutputFormat, PickResult};
use simple_file_picker::listing::{DirectoryView, StdFileSystem};
use tempfile::TempDir;

/// Tree used by most tests:
///
/// ```text
/// alpha/
///   inner.txt
/// beta.txt
/// delta.md
/// Gamma/
/// ```
fn sample_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir(root.join("alpha")).unwrap();
    fs::write(root.join("alpha").join("inner.txt"), "i").unwrap();
    fs::write(root.join("beta.txt"), "b").unwrap();
    fs::write(root.join("delta.md"), "d").unwrap();
    fs::create_dir(root.join("Gamma")).unwrap();
    temp
}

fn controller(root: &Path, mode: CompositeMode) -> SelectionController<StdFileSystem> {
    SelectionController::new(StdFileSystem, root, root, mode)
}

fn names(controller: &SelectionController<StdFileSystem>) -> Vec<String> {
    controller
        .listing()
        .entries()
        .iter()
        .map(|e| e.name.clone())
        .collect()
}

// =============================================================================
// Listing
// =============================================================================

mod listing_tests {
    use super::*;
    use simple_file_picker::core::ItemMode;

    #[test]
    fn test_mixed_listing_sorted_by_name() {
        let temp = sample_tree();
        let listing = DirectoryView::new(StdFileSystem).list(temp.path(), ItemMode::FilesAndFolders);
        let names: Vec<_> = listing.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta.txt", "delta.md", "Gamma"]);
        assert!(listing.get(0).unwrap().is_folder());
        assert!(listing.get(1).unwrap().is_file());
        assert_eq!(listing.get(3).unwrap().path, temp.path().join("Gamma"));
    }

    #[test]
    fn test_folder_only_listing_hides_files() {
        let temp = sample_tree();
        let c = controller(temp.path(), CompositeMode::FOLDER_ONLY_MULTI_CHOICE);
        assert_eq!(names(&c), ["alpha", "Gamma"]);
    }

    /// Directory with a dangling symlink, a FIFO and one real folder
    #[cfg(unix)]
    fn special_tree() -> TempDir {
        use std::os::unix::fs::symlink;
        use std::process::Command;

        let temp = TempDir::new().unwrap();
        symlink(temp.path().join("missing"), temp.path().join("dangling")).unwrap();
        let status = Command::new("mkfifo")
            .arg(temp.path().join("pipe"))
            .status()
            .unwrap();
        assert!(status.success());
        fs::create_dir(temp.path().join("real")).unwrap();
        temp
    }

    #[cfg(unix)]
    #[test]
    fn test_folder_only_skips_special_entries() {
        let temp = special_tree();
        let c = controller(temp.path(), CompositeMode::FOLDER_ONLY_MULTI_CHOICE);
        assert_eq!(names(&c), ["real"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_special_entries_are_not_openable() {
        let temp = special_tree();
        let mut c = controller(temp.path(), CompositeMode::FILE_AND_FOLDER_MULTI_CHOICE);
        assert_eq!(names(&c), ["dangling", "pipe", "real"]);

        c.toggle_entry(1);
        assert_eq!(c.checked_counts().folders, 0);
        assert!(!c.buttons().open);
        assert!(c.open_target().is_none());
        assert_eq!(
            c.press_open(),
            Outcome::Ignored(Ignored::Disabled(Button::Open))
        );

        c.toggle_entry(2);
        assert_eq!(c.open_target(), Some(temp.path().join("real").as_path()));
    }

    #[test]
    fn test_missing_folder_lists_empty() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone");
        let listing = DirectoryView::new(StdFileSystem).list(&missing, ItemMode::FilesAndFolders);
        assert!(listing.is_empty());
        assert_eq!(listing.empty_text(), Some("List is empty!"));
    }
}

// =============================================================================
// Controller Scenarios
// =============================================================================

mod controller_tests {
    use super::*;

    #[test]
    fn test_initial_buttons_at_root() {
        let temp = sample_tree();
        let c = controller(temp.path(), CompositeMode::FILE_AND_FOLDER_MULTI_CHOICE);
        let buttons = c.buttons();
        assert!(!buttons.up);
        assert!(!buttons.open);
        assert!(buttons.select);

        let files = controller(temp.path(), CompositeMode::FILE_ONLY_MULTI_CHOICE);
        assert!(!files.buttons().select);
    }

    #[test]
    fn test_open_and_up_round_trip() {
        let temp = sample_tree();
        let mut c = controller(temp.path(), CompositeMode::FILE_AND_FOLDER_MULTI_CHOICE);

        c.toggle_entry(0);
        assert!(c.buttons().open);
        assert_eq!(
            c.press_open(),
            Outcome::Navigated {
                path: temp.path().join("alpha")
            }
        );
        assert_eq!(names(&c), ["inner.txt"]);
        assert_eq!(c.checked_counts().total, 0);
        assert!(c.buttons().up);

        assert_eq!(
            c.press_up(),
            Outcome::Navigated {
                path: temp.path().to_path_buf()
            }
        );
        assert!(c.is_at_storage_root());
        assert_eq!(c.press_up(), Outcome::Ignored(Ignored::Disabled(Button::Up)));
    }

    #[test]
    fn test_open_requires_exactly_one_folder() {
        let temp = sample_tree();
        let mut c = controller(temp.path(), CompositeMode::FILE_AND_FOLDER_MULTI_CHOICE);

        c.toggle_entry(0);
        c.toggle_entry(3);
        assert!(!c.buttons().open);
        assert_eq!(
            c.press_open(),
            Outcome::Ignored(Ignored::Disabled(Button::Open))
        );

        // A checked file does not block Open in multi mode
        c.toggle_entry(3);
        c.toggle_entry(1);
        assert!(c.buttons().open);
    }

    #[test]
    fn test_multi_selection_keeps_check_order() {
        let temp = sample_tree();
        let mut c = controller(temp.path(), CompositeMode::FILE_AND_FOLDER_MULTI_CHOICE);
        c.toggle_entry(2);
        c.toggle_entry(0);
        c.toggle_entry(1);

        let Outcome::Completed(selection) = c.press_select() else {
            panic!("expected completion");
        };
        assert_eq!(selection.labels, ["delta.md", "alpha", "beta.txt"]);
        assert_eq!(selection.paths[0], temp.path().join("delta.md"));
        assert!(selection.single.is_none());
        assert!(c.is_finished());
        assert_eq!(c.toggle_entry(0), Outcome::Ignored(Ignored::Finished));
    }

    #[test]
    fn test_empty_selection_returns_current_folder() {
        let temp = sample_tree();
        let mut c = SelectionController::new(
            StdFileSystem,
            temp.path(),
            temp.path().join("Gamma"),
            CompositeMode::FOLDER_ONLY_SINGLE_CHOICE,
        );
        let Outcome::Completed(selection) = c.press_select() else {
            panic!("expected completion");
        };
        assert_eq!(selection, Selection::current_folder(&temp.path().join("Gamma")));
        assert_eq!(
            selection.single,
            Some(SingleChoice {
                label: "Gamma".into(),
                path: temp.path().join("Gamma"),
            })
        );
    }

    #[test]
    fn test_files_only_rejects_checked_folder() {
        let temp = sample_tree();
        let mut c = controller(temp.path(), CompositeMode::FILE_ONLY_MULTI_CHOICE);
        c.toggle_entry(1);
        assert!(c.buttons().select);
        c.toggle_entry(0);
        assert!(!c.buttons().select);
        assert_eq!(
            c.press_select(),
            Outcome::Ignored(Ignored::Disabled(Button::Select))
        );
    }

    #[test]
    fn test_direct_immediate_file_completes_on_toggle() {
        let temp = sample_tree();
        let mut c = controller(temp.path(), CompositeMode::FILE_ONLY_DIRECT_CHOICE_IMMEDIATE);
        let Outcome::Completed(selection) = c.toggle_entry(2) else {
            panic!("expected completion");
        };
        assert_eq!(
            selection.single,
            Some(SingleChoice {
                label: "delta.md".into(),
                path: temp.path().join("delta.md"),
            })
        );
    }

    #[test]
    fn test_direct_immediate_folder_opens_on_toggle() {
        let temp = sample_tree();
        let mut c = controller(temp.path(), CompositeMode::FILE_OR_FOLDER_DIRECT_CHOICE_IMMEDIATE);
        assert_eq!(
            c.toggle_entry(0),
            Outcome::Navigated {
                path: temp.path().join("alpha")
            }
        );
        assert!(!c.is_finished());
    }

    #[test]
    fn test_direct_selection_waits_for_select() {
        let temp = sample_tree();
        let mut c = controller(temp.path(), CompositeMode::FILE_OR_FOLDER_DIRECT_CHOICE_SELECTION);
        assert!(matches!(c.toggle_entry(1), Outcome::Updated(_)));
        assert!(!c.is_finished());
        let Outcome::Completed(selection) = c.press_select() else {
            panic!("expected completion");
        };
        assert_eq!(selection.single.unwrap().label, "beta.txt");
    }

    #[test]
    fn test_up_never_leaves_storage_root() {
        let temp = sample_tree();
        let root = temp.path().join("alpha");
        let mut c = SelectionController::new(
            StdFileSystem,
            &root,
            &root,
            CompositeMode::FILE_AND_FOLDER_MULTI_CHOICE,
        );
        assert!(!c.buttons().up);
        assert_eq!(c.press_up(), Outcome::Ignored(Ignored::Disabled(Button::Up)));
        assert_eq!(c.current_path(), root);
    }
}

// =============================================================================
// Dialog and Host
// =============================================================================

mod dialog_tests {
    use super::*;

    #[derive(Default)]
    struct Host {
        opened: Vec<PathBuf>,
        results: Vec<(String, PickResult)>,
    }

    struct HostListener(Rc<RefCell<Host>>);

    impl PickerListener for HostListener {
        fn on_navigate(
            &mut self,
            _title: Option<&simple_file_picker::core::Title>,
            path: &Path,
            _mode: CompositeMode,
            _tag: &str,
        ) {
            self.0.borrow_mut().opened.push(path.to_path_buf());
        }

        fn on_result(&mut self, tag: &str, result: &PickResult) {
            self.0
                .borrow_mut()
                .results
                .push((tag.to_string(), result.clone()));
        }
    }

    #[test]
    fn test_host_receives_tagged_result() {
        let temp = sample_tree();
        let host = Rc::new(RefCell::new(Host::default()));
        let mut dialog = FilePickerDialog::builder()
            .storage_root(temp.path())
            .mode(CompositeMode::FILE_ONLY_SINGLE_CHOICE)
            .tag("attachments")
            .listener(HostListener(host.clone()))
            .build(StdFileSystem)
            .unwrap();

        dialog.handle(DialogEvent::Toggle(0));
        dialog.handle(DialogEvent::Open);
        dialog.handle(DialogEvent::Toggle(0));
        dialog.handle(DialogEvent::Select);

        let host = host.borrow();
        assert_eq!(host.opened, [temp.path().join("alpha")]);
        let (tag, result) = &host.results[0];
        assert_eq!(tag, "attachments");
        let selection = result.selection().unwrap();
        assert_eq!(selection.paths, [temp.path().join("alpha").join("inner.txt")]);
    }

    #[test]
    fn test_filter_narrows_and_resets_on_navigate() {
        let temp = sample_tree();
        let mut dialog = FilePickerDialog::builder()
            .storage_root(temp.path())
            .mode(CompositeMode::FILE_AND_FOLDER_MULTI_CHOICE)
            .filterable(true, true)
            .listener(HostListener(Rc::default()))
            .build(StdFileSystem)
            .unwrap();

        dialog.set_filter_query("GAM");
        assert_eq!(dialog.visible_rows(), [3]);
        dialog.handle(DialogEvent::Toggle(0));
        dialog.handle(DialogEvent::Open);
        assert_eq!(dialog.controller().current_path(), temp.path().join("Gamma"));
        assert!(!dialog.filter().unwrap().is_active());
    }

    #[test]
    fn test_state_survives_save_and_restore() {
        let temp = sample_tree();
        let state_file = temp.path().join("state.json");
        let mut first = FilePickerDialog::builder()
            .storage_root(temp.path())
            .mode(CompositeMode::FILE_AND_FOLDER_MULTI_CHOICE)
            .listener(HostListener(Rc::default()))
            .build(StdFileSystem)
            .unwrap();
        first.handle(DialogEvent::Toggle(1));
        first.handle(DialogEvent::Toggle(2));
        first.save().save_to(&state_file).unwrap();

        let snapshot = Snapshot::load_from(&state_file).unwrap();
        let mut second = FilePickerDialog::builder()
            .storage_root(temp.path())
            .restore(snapshot)
            .listener(HostListener(Rc::default()))
            .build(StdFileSystem)
            .unwrap();
        assert!(second.controller().is_checked(1));
        assert!(second.controller().is_checked(2));
        assert_eq!(second.buttons(), first.buttons());

        let Outcome::Completed(selection) = second.handle(DialogEvent::Select) else {
            panic!("expected completion");
        };
        assert_eq!(selection.labels, ["beta.txt", "delta.md"]);
    }

    #[test]
    fn test_selection_output_formats() {
        let temp = sample_tree();
        let mut dialog = FilePickerDialog::builder()
            .storage_root(temp.path())
            .mode(CompositeMode::FILE_AND_FOLDER_MULTI_CHOICE)
            .listener(HostListener(Rc::default()))
            .build(StdFileSystem)
            .unwrap();
        dialog.handle(DialogEvent::Toggle(1));
        dialog.handle(DialogEvent::Select);
        let selection = dialog.result().unwrap().selection().unwrap();

        let mut lines = Vec::new();
        write_selection(&mut lines, selection, OutputFormat::Lines).unwrap();
        assert_eq!(
            String::from_utf8(lines).unwrap(),
            format!("{}\n", temp.path().join("beta.txt").display())
        );

        let mut json = Vec::new();
        write_selection(&mut json, selection, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["labels"][0], "beta.txt");
    }
}
