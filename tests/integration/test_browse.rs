//! Storage browser listing tests

#[cfg(test)]
mod tests {
    use crate::fixtures::{DenyingFs, write_file};
    use fileshelf::services::browse::{
        DirectoryMetrics, calculate_directory_size, directory_metrics, folder_summary,
    };
    use fileshelf::services::fs::LocalFs;
    use fileshelf::services::index::{IndexedFile, MemoryIndex};
    use fileshelf::{Capabilities, list_children};
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_directories_first_then_case_insensitive_name() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        write_file(&root.join("beta.txt"), 5).unwrap();
        write_file(&root.join("Alpha.txt"), 5).unwrap();
        write_file(&root.join("zeta/inner.txt"), 5).unwrap();
        write_file(&root.join("Music/song.mp3"), 5).unwrap();
        write_file(&root.join(".hidden"), 5).unwrap();

        let entries = list_children(&root, &Capabilities::local()).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();

        assert_eq!(names, vec!["Music", "zeta", "Alpha.txt", "beta.txt"]);
        assert!(entries[0].is_directory && entries[1].is_directory);
        assert!(!entries[2].is_directory);
    }

    #[test]
    fn test_directory_entries_carry_subtree_metrics() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        write_file(&root.join("photos/a.jpg"), 100).unwrap();
        write_file(&root.join("photos/b.jpg"), 200).unwrap();
        write_file(&root.join("photos/2023/c.jpg"), 300).unwrap();
        write_file(&root.join("photos/.nomedia"), 7).unwrap();
        write_file(&root.join("loose.bin"), 42).unwrap();

        let entries = list_children(&root, &Capabilities::local()).unwrap();

        let photos = &entries[0];
        assert_eq!(photos.name, "photos");
        assert_eq!(photos.item_count, 3, "visible immediate children only");
        assert_eq!(photos.size, 600, "hidden files are not counted");

        let loose = &entries[1];
        assert_eq!(loose.size, 42);
        assert_eq!(loose.item_count, 0);
    }

    #[test]
    fn test_unlistable_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let result = list_children(&missing, &Capabilities::local());
        assert!(matches!(result, Err(fileshelf::Error::InvalidInput(_))));
    }

    #[test]
    fn test_unreadable_child_falls_back_to_metadata_index() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        let locked = root.join("locked");
        write_file(&locked.join("a.pdf"), 10).unwrap();

        let index = MemoryIndex::new(vec![
            IndexedFile {
                path: Some(locked.join("a.pdf")),
                display_name: "a.pdf".to_string(),
                size: Some(1000),
                ..IndexedFile::default()
            },
            IndexedFile {
                path: Some(locked.join("sub/b.pdf")),
                display_name: "b.pdf".to_string(),
                size: Some(24),
                ..IndexedFile::default()
            },
            IndexedFile {
                path: Some(root.join("elsewhere.pdf")),
                display_name: "elsewhere.pdf".to_string(),
                size: Some(1),
                ..IndexedFile::default()
            },
        ]);

        let caps = Capabilities::local()
            .with_fs(Arc::new(DenyingFs::new(vec![locked.clone()])))
            .with_index(Arc::new(index));

        let metrics = directory_metrics(&locked, &caps);
        assert_eq!(
            metrics,
            DirectoryMetrics {
                item_count: 2,
                total_size: 1024
            }
        );

        let entries = list_children(&root, &caps).unwrap();
        assert_eq!(entries[0].size, 1024);
    }

    #[test]
    fn test_index_fallback_resolves_relative_records() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        let locked = root.join("Documents");
        write_file(&locked.join("a.pdf"), 10).unwrap();

        let index = MemoryIndex::new(vec![
            IndexedFile {
                relative_dir: Some("Documents/Letters".to_string()),
                display_name: "letter.docx".to_string(),
                size: Some(40),
                ..IndexedFile::default()
            },
            IndexedFile {
                relative_dir: Some("Music".to_string()),
                display_name: "song.mp3".to_string(),
                size: Some(7),
                ..IndexedFile::default()
            },
        ])
        .with_storage_root(&root);

        let caps = Capabilities::local()
            .with_fs(Arc::new(DenyingFs::new(vec![locked.clone()])))
            .with_index(Arc::new(index));

        assert_eq!(
            directory_metrics(&locked, &caps),
            DirectoryMetrics {
                item_count: 1,
                total_size: 40
            }
        );
    }

    #[test]
    fn test_unreadable_child_without_index_reports_zero() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        let locked = root.join("locked");
        write_file(&locked.join("a.pdf"), 10).unwrap();

        let caps = Capabilities::local().with_fs(Arc::new(DenyingFs::new(vec![locked.clone()])));
        let entries = list_children(&root, &caps).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, 0);
        assert_eq!(entries[0].item_count, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_size_walk_survives_symlink_cycles() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("root");
        write_file(&root.join("a/file.bin"), 128).unwrap();
        std::os::unix::fs::symlink(&root, root.join("a/loop")).unwrap();

        let size = calculate_directory_size(&LocalFs, &root);
        assert_eq!(size, 128);
    }

    #[test]
    fn test_folder_summary_counts_direct_files() {
        let temp_dir = TempDir::new().unwrap();
        let downloads = temp_dir.path().join("Download");
        write_file(&downloads.join("a.zip"), 10).unwrap();
        write_file(&downloads.join("b.pdf"), 20).unwrap();
        write_file(&downloads.join("nested/c.pdf"), 40).unwrap();

        let summary = folder_summary(&LocalFs, &downloads);
        assert_eq!(summary.file_count, 2);
        assert_eq!(summary.total_size, 30);

        let missing: PathBuf = temp_dir.path().join("missing");
        assert_eq!(folder_summary(&LocalFs, &missing).file_count, 0);
    }
}
