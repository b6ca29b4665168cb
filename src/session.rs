//! Interactive session: explicit state updated by commands and completions.
//!
//! Filesystem-heavy work (scans, listings, batch operations) runs on a rayon
//! pool and reports back over an mpsc channel. The owner applies completions
//! with [`Session::poll`] or [`Session::wait_idle`]; nothing mutates the
//! state from a worker thread.
//!
//! Staleness rules:
//!
//! - A scan completion is applied only if no newer scan was requested.
//! - A listing completion is applied only if its path is still the top of
//!   the browser's navigation stack.

use crate::config::ScanOptions;
use crate::models::{
    BatchOutcome, CategoryData, CategoryMap, Destination, ErrorItem, FailedItem, FileCategory,
    FileItem, QuickFilter, QuickFilterState, StorageEntry, StorageSpace,
};
use crate::services::browse::list_children;
use crate::services::ops;
use crate::services::quick_filter::build_quick_filter;
use crate::services::volume::storage_space;
use crate::{Capabilities, Error, Result, ScanSummary, scan_categories};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

/// Batch operation kinds started from a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Delete,
    Copy,
    Move,
    Rename,
}

/// Result of the most recent batch operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationReport {
    pub kind: OperationKind,
    pub outcome: BatchOutcome,
}

/// Storage browser navigation state.
#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    /// Navigation stack; empty means the browser is closed.
    pub stack: Vec<PathBuf>,
    /// Children of the top of the stack.
    pub entries: Vec<StorageEntry>,
    pub is_loading: bool,
}

impl BrowserState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        !self.stack.is_empty()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Path> {
        self.stack.last().map(PathBuf::as_path)
    }
}

/// Snapshot of everything a UI renders.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub storage_root: PathBuf,
    pub is_loading: bool,
    pub categories: CategoryMap,
    pub scan_errors: Vec<ErrorItem>,
    pub storage_space: StorageSpace,
    pub selected_category: Option<FileCategory>,
    pub quick_filter: Option<QuickFilterState>,
    /// Selected file paths.
    pub selected_files: BTreeSet<String>,
    pub browser: BrowserState,
    pub last_operation: Option<OperationReport>,
    pub last_error: Option<String>,
    /// Bumped on every applied change.
    pub revision: u64,
}

enum Completion {
    Scan {
        generation: u64,
        result: Result<ScanSummary>,
        space: StorageSpace,
    },
    Listing {
        path: PathBuf,
        result: Result<Vec<StorageEntry>>,
    },
    Operation {
        kind: OperationKind,
        result: Result<BatchOutcome>,
    },
}

/// Owner of the session state and its background pool
pub struct Session {
    caps: Capabilities,
    options: Arc<ScanOptions>,
    pool: rayon::ThreadPool,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    state: SessionState,
    scan_generation: u64,
    pending: usize,
}

impl Session {
    /// Create a session for `storage_root`. No work starts until a command is issued.
    pub fn new<P: AsRef<Path>>(
        storage_root: P,
        options: ScanOptions,
        caps: Capabilities,
    ) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.worker_threads.unwrap_or(0))
            .thread_name(|i| format!("fshelf-worker-{i}"))
            .build()
            .map_err(|e| Error::System(format!("Failed to start worker pool: {e}")))?;
        let (sender, receiver) = mpsc::channel();

        Ok(Self {
            caps,
            options: Arc::new(options),
            pool,
            sender,
            receiver,
            state: SessionState {
                storage_root: storage_root.as_ref().to_path_buf(),
                ..SessionState::default()
            },
            scan_generation: 0,
            pending: 0,
        })
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.state.revision
    }

    /// True when no background task is outstanding.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending == 0
    }

    fn touch(&mut self) {
        self.state.revision += 1;
    }

    fn spawn<F>(&mut self, task: F)
    where
        F: FnOnce(&Capabilities, &ScanOptions) -> Completion + Send + 'static,
    {
        let caps = self.caps.clone();
        let options = Arc::clone(&self.options);
        let sender = self.sender.clone();
        self.pending += 1;

        self.pool.spawn(move || {
            let completion = task(&caps, &options);
            if sender.send(completion).is_err() {
                log::debug!("Session dropped before a task completed");
            }
        });
    }

    /// Start a full rescan; any scan still in flight becomes stale.
    pub fn request_scan(&mut self) {
        self.scan_generation += 1;
        let generation = self.scan_generation;
        let root = self.state.storage_root.clone();
        log::debug!("Scan #{generation} requested for {}", root.display());

        self.state.is_loading = true;
        self.touch();
        self.spawn(move |caps, options| Completion::Scan {
            generation,
            result: scan_categories(&root, options, caps),
            space: storage_space(caps.volumes.as_ref(), &root),
        });
    }

    pub fn select_category(&mut self, category: FileCategory) {
        self.state.selected_files.clear();
        self.state.selected_category = Some(category);
        self.state.quick_filter = None;
        self.touch();
    }

    pub fn clear_category(&mut self) {
        self.state.selected_files.clear();
        self.state.selected_category = None;
        self.touch();
    }

    /// Show a quick filter over the current scan result.
    pub fn select_quick_filter(&mut self, filter: QuickFilter) {
        self.state.selected_files.clear();
        self.state.quick_filter = Some(build_quick_filter(
            filter,
            &self.state.categories,
            self.options.quick_filter_limit,
        ));
        self.state.selected_category = None;
        self.touch();
    }

    pub fn clear_quick_filter(&mut self) {
        self.state.quick_filter = None;
        self.touch();
    }

    /// Open the browser at the storage root, discarding any previous stack.
    pub fn open_storage_root(&mut self) {
        let root = self.state.storage_root.clone();
        self.state.selected_files.clear();
        self.state.selected_category = None;
        self.state.browser.stack = vec![root];
        self.reload_listing();
    }

    /// Push `path` onto the browser stack; no-op when it is already on top.
    pub fn open_storage_folder<P: AsRef<Path>>(&mut self, path: P) {
        let path = path.as_ref();
        if self.state.browser.current() == Some(path) {
            return;
        }
        self.state.browser.stack.push(path.to_path_buf());
        self.reload_listing();
    }

    /// Pop the browser stack, closing the browser when the root is popped.
    ///
    /// Returns `false` only when the browser was already closed.
    pub fn navigate_storage_back(&mut self) -> bool {
        match self.state.browser.stack.len() {
            0 => false,
            1 => {
                self.close_storage_browser();
                true
            }
            _ => {
                self.state.browser.stack.pop();
                self.reload_listing();
                true
            }
        }
    }

    pub fn close_storage_browser(&mut self) {
        self.state.selected_files.clear();
        self.state.browser = BrowserState::default();
        self.touch();
    }

    fn reload_listing(&mut self) {
        let Some(path) = self.state.browser.current().map(Path::to_path_buf) else {
            return;
        };

        self.state.browser.is_loading = true;
        self.touch();
        self.spawn(move |caps, _| Completion::Listing {
            result: list_children(&path, caps),
            path,
        });
    }

    pub fn toggle_file_selection(&mut self, path: &str) {
        if !self.state.selected_files.remove(path) {
            self.state.selected_files.insert(path.to_string());
        }
        self.touch();
    }

    /// Replace the selection with every file of the visible view: the active
    /// quick filter, else the selected category.
    pub fn select_all_files(&mut self) {
        let visible: BTreeSet<String> = if let Some(filter) = &self.state.quick_filter {
            filter
                .groups
                .iter()
                .flat_map(|g| g.files.iter().map(|f| f.path.clone()))
                .collect()
        } else if let Some(category) = self.state.selected_category
            && let Some(data) = self.state.categories.get(&category)
        {
            data.files().map(|f| f.path.clone()).collect()
        } else {
            BTreeSet::new()
        };

        self.state.selected_files = visible;
        self.touch();
    }

    pub fn clear_selection(&mut self) {
        self.state.selected_files.clear();
        self.touch();
    }

    /// Scanned items whose paths are selected, one per path.
    #[must_use]
    pub fn selected_file_items(&self) -> Vec<FileItem> {
        let mut seen = HashSet::new();
        self.state
            .categories
            .values()
            .flat_map(|c| c.files())
            .filter(|f| self.state.selected_files.contains(&f.path))
            .filter(|f| seen.insert(f.path.clone()))
            .cloned()
            .collect()
    }

    fn selection_or_error(&self) -> Result<Vec<FileItem>> {
        let items = self.selected_file_items();
        if items.is_empty() {
            return Err(Error::InvalidInput("No files selected".to_string()));
        }
        Ok(items)
    }

    pub fn delete_selected(&mut self) -> Result<()> {
        let items = self.selection_or_error()?;
        self.spawn(move |caps, _| Completion::Operation {
            kind: OperationKind::Delete,
            result: Ok(ops::delete_files(caps.fs.as_ref(), &items)),
        });
        Ok(())
    }

    /// Copy the selection to a directory or a preset below the storage root.
    pub fn copy_selected<D: Into<Destination>>(&mut self, destination: D) -> Result<()> {
        let items = self.selection_or_error()?;
        let destination = destination.into().resolve(&self.state.storage_root);
        self.spawn(move |caps, _| Completion::Operation {
            kind: OperationKind::Copy,
            result: ops::copy_files(caps.fs.as_ref(), &items, &destination),
        });
        Ok(())
    }

    pub fn move_selected<D: Into<Destination>>(&mut self, destination: D) -> Result<()> {
        let items = self.selection_or_error()?;
        let destination = destination.into().resolve(&self.state.storage_root);
        self.spawn(move |caps, _| Completion::Operation {
            kind: OperationKind::Move,
            result: ops::move_files(caps.fs.as_ref(), &items, &destination),
        });
        Ok(())
    }

    /// Rename the single selected file.
    pub fn rename_selected(&mut self, new_name: &str) -> Result<()> {
        let mut items = self.selection_or_error()?;
        if items.len() != 1 {
            return Err(Error::InvalidInput(format!(
                "Rename needs exactly one selected file, got {}",
                items.len()
            )));
        }
        let item = items.remove(0);
        let new_name = new_name.to_string();

        self.spawn(move |caps, _| {
            let outcome = match ops::rename_file(caps.fs.as_ref(), &item, &new_name) {
                Ok(_) => BatchOutcome {
                    completed: 1,
                    ..BatchOutcome::default()
                },
                Err(e) => BatchOutcome {
                    failed: vec![FailedItem {
                        path: item.path.clone(),
                        reason: e.to_string(),
                    }],
                    ..BatchOutcome::default()
                },
            };
            Completion::Operation {
                kind: OperationKind::Rename,
                result: Ok(outcome),
            }
        });
        Ok(())
    }

    /// Apply every completion that has arrived. Returns how many were applied.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.receiver.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Block until no task is outstanding or `timeout` elapses, applying
    /// completions as they arrive. Returns whether the session became idle.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.pending > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(completion) => self.apply(completion),
                Err(RecvTimeoutError::Timeout) => return false,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        self.pending == 0
    }

    fn apply(&mut self, completion: Completion) {
        self.pending = self.pending.saturating_sub(1);

        match completion {
            Completion::Scan {
                generation,
                result,
                space,
            } => self.apply_scan(generation, result, space),
            Completion::Listing { path, result } => self.apply_listing(&path, result),
            Completion::Operation { kind, result } => self.apply_operation(kind, result),
        }
    }

    fn apply_scan(&mut self, generation: u64, result: Result<ScanSummary>, space: StorageSpace) {
        if generation != self.scan_generation {
            log::debug!("Dropping stale scan #{generation}");
            return;
        }

        self.state.is_loading = false;
        self.state.storage_space = space;
        match result {
            Ok(summary) => {
                self.state.categories = summary.categories;
                self.state.scan_errors = summary.errors;
                self.state.last_error = None;
            }
            Err(e) => {
                log::warn!("Scan failed: {e}");
                self.state.categories = FileCategory::ALL
                    .into_iter()
                    .map(|c| (c, CategoryData::empty(c)))
                    .collect();
                self.state.scan_errors.clear();
                self.state.last_error = Some(e.to_string());
            }
        }

        if let Some(active) = self.state.quick_filter.as_ref().map(|q| q.filter) {
            self.state.quick_filter = Some(build_quick_filter(
                active,
                &self.state.categories,
                self.options.quick_filter_limit,
            ));
        }
        self.touch();
    }

    fn apply_listing(&mut self, path: &Path, result: Result<Vec<StorageEntry>>) {
        if self.state.browser.current() != Some(path) {
            log::debug!("Dropping stale listing of {}", path.display());
            return;
        }

        self.state.browser.is_loading = false;
        self.state.browser.entries = result.unwrap_or_else(|e| {
            log::warn!("Listing failed: {e}");
            Vec::new()
        });
        self.touch();
    }

    fn apply_operation(&mut self, kind: OperationKind, result: Result<BatchOutcome>) {
        match result {
            Ok(outcome) => {
                log::info!(
                    "{kind:?}: {} completed, {} skipped, {} failed",
                    outcome.completed,
                    outcome.skipped,
                    outcome.failed.len()
                );
                let changed = outcome.changed_anything();
                self.state.last_error = None;
                self.state.last_operation = Some(OperationReport { kind, outcome });

                if changed {
                    self.state.selected_files.clear();
                    self.request_scan();
                    if self.state.browser.is_open() {
                        self.reload_listing();
                    }
                }
            }
            Err(e) => {
                log::warn!("{kind:?} failed: {e}");
                self.state.last_operation = None;
                self.state.last_error = Some(e.to_string());
            }
        }
        self.touch();
    }
}
