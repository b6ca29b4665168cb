//! Directory skip rules applied while walking a storage root

use crate::config::ScanOptions;
use crate::services::fs::EntryMeta;

/// Why a directory was not descended into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Hidden,
    Noise,
    Restricted,
}

impl SkipReason {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::Hidden => "hidden",
            SkipReason::Noise => "noise directory",
            SkipReason::Restricted => "restricted subtree",
        }
    }
}

/// Decide whether a child directory of `parent_name` is skipped.
///
/// Restricted children (e.g. `Android/data`) are skipped while their
/// siblings (e.g. `Android/media`) are still walked.
#[must_use]
pub fn skip_reason(
    options: &ScanOptions,
    parent_name: Option<&str>,
    entry: &EntryMeta,
) -> Option<SkipReason> {
    if entry.hidden || entry.name.starts_with('.') {
        return Some(SkipReason::Hidden);
    }

    if options.is_noise_dir(&entry.name) {
        return Some(SkipReason::Noise);
    }

    if parent_name.is_some_and(|parent| options.is_restricted(parent, &entry.name)) {
        return Some(SkipReason::Restricted);
    }

    None
}
