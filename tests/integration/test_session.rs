//! Session command / completion flow

#[cfg(test)]
mod tests {
    use crate::fixtures::{create_storage_fixture, write_file};
    use fileshelf::models::{DestPreset, FileCategory, QuickFilter};
    use fileshelf::session::{OperationKind, Session};
    use fileshelf::{Capabilities, ScanOptions};
    use std::time::Duration;
    use tempfile::TempDir;

    const WAIT: Duration = Duration::from_secs(30);

    fn session_for(root: &std::path::Path) -> Session {
        let options = ScanOptions {
            worker_threads: Some(2),
            ..ScanOptions::default()
        };
        Session::new(root, options, Capabilities::local()).unwrap()
    }

    #[test]
    fn test_scan_populates_state() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_storage_fixture(temp_dir.path()).unwrap();
        let mut session = session_for(&root);

        session.request_scan();
        assert!(session.state().is_loading);
        assert!(session.wait_idle(WAIT));

        let state = session.state();
        assert!(!state.is_loading);
        assert_eq!(state.categories.len(), 6);
        assert_eq!(state.categories[&FileCategory::Images].item_count, 4);
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_only_latest_scan_is_applied() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_storage_fixture(temp_dir.path()).unwrap();
        let mut session = session_for(&root);

        session.request_scan();
        write_file(&root.join("Pictures/new.png"), 10).unwrap();
        session.request_scan();
        assert!(session.wait_idle(WAIT));

        assert_eq!(session.state().categories[&FileCategory::Images].item_count, 5);
    }

    #[test]
    fn test_quick_filter_is_rebuilt_after_scan() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_storage_fixture(temp_dir.path()).unwrap();
        let mut session = session_for(&root);

        session.select_quick_filter(QuickFilter::Large);
        assert!(session.state().quick_filter.as_ref().unwrap().groups[0].files.is_empty());

        session.request_scan();
        assert!(session.wait_idle(WAIT));

        let filter = session.state().quick_filter.as_ref().unwrap();
        assert_eq!(filter.filter, QuickFilter::Large);
        assert_eq!(filter.groups[0].files[0].name, "clip.mp4");

        session.clear_quick_filter();
        assert!(session.state().quick_filter.is_none());
    }

    #[test]
    fn test_browser_navigation_stack() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_storage_fixture(temp_dir.path()).unwrap();
        let mut session = session_for(&root);

        session.open_storage_root();
        assert!(session.wait_idle(WAIT));
        assert!(session.state().browser.entries.iter().any(|e| e.name == "DCIM"));

        let dcim = root.join("DCIM");
        session.open_storage_folder(&dcim);
        session.open_storage_folder(&dcim);
        assert_eq!(session.state().browser.stack.len(), 2, "re-opening the top is a no-op");
        assert!(session.wait_idle(WAIT));
        assert_eq!(session.state().browser.entries.len(), 1);
        assert_eq!(session.state().browser.entries[0].name, "Camera");

        assert!(session.navigate_storage_back());
        assert!(session.wait_idle(WAIT));
        assert_eq!(session.state().browser.current(), Some(root.as_path()));

        assert!(session.navigate_storage_back(), "popping the root closes the browser");
        assert!(!session.state().browser.is_open());
        assert!(session.wait_idle(WAIT));
        assert!(session.state().browser.entries.is_empty(), "a closed browser has no entries");

        assert!(!session.navigate_storage_back(), "nothing left to pop");
    }

    #[test]
    fn test_switching_context_clears_selection() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_storage_fixture(temp_dir.path()).unwrap();
        let mut session = session_for(&root);

        session.request_scan();
        assert!(session.wait_idle(WAIT));

        let photo = root.join("DCIM/Camera/IMG_001.jpg").to_string_lossy().into_owned();
        session.select_category(FileCategory::Images);
        session.toggle_file_selection(&photo);

        session.select_category(FileCategory::Documents);
        assert!(session.state().selected_files.is_empty());

        session.toggle_file_selection(&photo);
        session.select_all_files();
        let selected = &session.state().selected_files;
        assert_eq!(selected.len(), 3);
        assert!(!selected.contains(&photo), "select all replaces the selection");

        session.clear_category();
        assert!(session.state().selected_files.is_empty());

        session.toggle_file_selection(&photo);
        session.select_quick_filter(QuickFilter::Recent);
        assert!(session.state().selected_files.is_empty());

        session.select_category(FileCategory::Images);
        session.toggle_file_selection(&photo);
        session.open_storage_root();
        assert!(session.state().selected_files.is_empty());
        assert!(session.state().selected_category.is_none());

        session.toggle_file_selection(&photo);
        session.close_storage_browser();
        assert!(session.state().selected_files.is_empty());
        assert!(session.wait_idle(WAIT));
    }

    #[test]
    fn test_failed_scan_keeps_every_category() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session_for(&temp_dir.path().join("missing"));

        session.request_scan();
        assert!(session.wait_idle(WAIT));

        let state = session.state();
        assert!(state.last_error.is_some());
        assert_eq!(state.categories.len(), 6);
        assert!(state.categories.values().all(|c| c.item_count == 0));
    }

    #[test]
    fn test_copy_to_destination_preset() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_storage_fixture(temp_dir.path()).unwrap();
        let mut session = session_for(&root);

        session.request_scan();
        assert!(session.wait_idle(WAIT));

        let song = root.join("Music/song.mp3").to_string_lossy().into_owned();
        session.toggle_file_selection(&song);
        session.copy_selected(DestPreset::Downloads).unwrap();
        assert!(session.wait_idle(WAIT));

        assert!(root.join("Download/song.mp3").exists());
        assert!(root.join("Music/song.mp3").exists());
        let report = session.state().last_operation.as_ref().unwrap();
        assert_eq!(report.kind, OperationKind::Copy);
        assert_eq!(report.outcome.completed, 1);
    }

    #[test]
    fn test_selection_and_delete_triggers_rescan() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_storage_fixture(temp_dir.path()).unwrap();
        let mut session = session_for(&root);

        session.request_scan();
        assert!(session.wait_idle(WAIT));

        session.select_category(FileCategory::Images);
        session.select_all_files();
        assert_eq!(session.state().selected_files.len(), 4);

        let shot = root.join("Pictures/Screenshots/shot.png").to_string_lossy().into_owned();
        session.toggle_file_selection(&shot);
        assert_eq!(session.selected_file_items().len(), 3);

        session.delete_selected().unwrap();
        assert!(session.wait_idle(WAIT));

        let state = session.state();
        let report = state.last_operation.as_ref().unwrap();
        assert_eq!(report.kind, OperationKind::Delete);
        assert_eq!(report.outcome.completed, 3);
        assert!(state.selected_files.is_empty());
        assert_eq!(state.categories[&FileCategory::Images].item_count, 1);
    }

    #[test]
    fn test_rename_requires_single_selection() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_storage_fixture(temp_dir.path()).unwrap();
        let mut session = session_for(&root);

        assert!(session.delete_selected().is_err(), "empty selection");

        session.request_scan();
        assert!(session.wait_idle(WAIT));

        let report = root.join("Download/report.pdf").to_string_lossy().into_owned();
        session.toggle_file_selection(&report);
        session.rename_selected("quarterly").unwrap();
        assert!(session.wait_idle(WAIT));

        assert!(root.join("Download/quarterly.pdf").exists());
        let documents = &session.state().categories[&FileCategory::Documents];
        assert!(documents.files().any(|f| f.name == "quarterly.pdf"));

        session.select_category(FileCategory::Documents);
        session.select_all_files();
        assert!(session.rename_selected("x").is_err());
    }

    #[test]
    fn test_copy_to_bad_destination_reports_error() {
        let temp_dir = TempDir::new().unwrap();
        let root = create_storage_fixture(temp_dir.path()).unwrap();
        let mut session = session_for(&root);

        session.request_scan();
        assert!(session.wait_idle(WAIT));

        let song = root.join("Music/song.mp3").to_string_lossy().into_owned();
        session.toggle_file_selection(&song);
        session.copy_selected(root.join("missing")).unwrap();
        assert!(session.wait_idle(WAIT));

        assert!(session.state().last_error.is_some());
        assert_eq!(session.state().selected_files.len(), 1, "selection kept on failure");
    }
}
