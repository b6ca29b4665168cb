//! Unit tests for source folder computation

#[cfg(test)]
mod tests {
    use fileshelf::services::traverse::source::SourceResolver;
    use std::path::{Path, PathBuf};

    fn resolver() -> SourceResolver {
        let root = PathBuf::from("/storage/emulated/0");
        SourceResolver::new(
            root.clone(),
            vec![root.join("DCIM"), root.join("Pictures"), root.join("WhatsApp/Media")],
        )
    }

    #[test]
    fn file_directly_in_grouping_root_uses_root() {
        let source = resolver().source_for(Path::new("/storage/emulated/0/DCIM/a.jpg"));
        assert_eq!(source, Path::new("/storage/emulated/0/DCIM"));
    }

    #[test]
    fn nested_file_groups_one_level_below_root() {
        let r = resolver();
        assert_eq!(
            r.source_for(Path::new("/storage/emulated/0/Pictures/Screenshots/s.png")),
            Path::new("/storage/emulated/0/Pictures/Screenshots")
        );
        assert_eq!(
            r.source_for(Path::new("/storage/emulated/0/Pictures/Trips/2023/Rome/r.jpg")),
            Path::new("/storage/emulated/0/Pictures/Trips")
        );
        assert_eq!(
            r.source_for(Path::new("/storage/emulated/0/WhatsApp/Media/WhatsApp Images/w.jpg")),
            Path::new("/storage/emulated/0/WhatsApp/Media/WhatsApp Images")
        );
    }

    #[test]
    fn other_files_use_their_parent() {
        let r = resolver();
        assert_eq!(
            r.source_for(Path::new("/storage/emulated/0/Telegram/Files/doc.pdf")),
            Path::new("/storage/emulated/0/Telegram/Files")
        );
    }

    #[test]
    fn prefix_match_is_per_path_component() {
        let r = resolver();
        assert_eq!(
            r.source_for(Path::new("/storage/emulated/0/DCIMbackup/old/a.jpg")),
            Path::new("/storage/emulated/0/DCIMbackup/old")
        );
    }
}
