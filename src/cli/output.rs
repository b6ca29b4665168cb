//! Output formatting for CLI

use crate::ScanSummary;
use crate::models::{
    BatchOutcome, CategoryData, ErrorItem, FileItem, FolderSummary, QuickFilterState,
    StorageEntry, StorageSpace,
};
use crate::services::format::{format_date, format_size};

/// Errors printed before eliding the rest.
const MAX_ERRORS_SHOWN: usize = 5;

/// ANSI color for a category header
fn color_for_share(pct: f64) -> &'static str {
    if pct >= 30.0 {
        "\x1b[31m"
    } else if pct >= 15.0 {
        "\x1b[33m"
    } else if pct >= 5.0 {
        "\x1b[36m"
    } else {
        "\x1b[90m"
    }
}

const COLOR_RESET: &str = "\x1b[0m";

fn print_errors(errors: &[ErrorItem]) {
    if errors.is_empty() {
        return;
    }

    println!();
    println!("Errors encountered: {}", errors.len());
    for error in errors.iter().take(MAX_ERRORS_SHOWN) {
        eprintln!("  {} [{}]: {}", error.path, error.code, error.message);
    }
    if errors.len() > MAX_ERRORS_SHOWN {
        eprintln!("  ... and {} more", errors.len() - MAX_ERRORS_SHOWN);
    }
}

fn print_file_line(file: &FileItem, indent: &str) {
    println!(
        "{indent}{:<60} {:>10}  {}",
        file.name,
        format_size(file.size),
        format_date(file.date_modified)
    );
}

/// Print categories with their sources as text
pub fn format_scan_text(summary: &ScanSummary, categories: &[&CategoryData], show_files: bool) {
    let total = summary.total_size();
    println!(
        "{} ({} files, {})",
        summary.root,
        summary.total_files(),
        format_size(total)
    );
    println!();

    for data in categories {
        #[allow(clippy::cast_precision_loss)]
        let pct = if total > 0 {
            data.total_size as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        println!(
            "{}{:<20}{} {:>8} files {:>10} {:>5.1}%",
            color_for_share(pct),
            data.category.display_name(),
            COLOR_RESET,
            data.item_count,
            format_size(data.total_size),
            pct
        );

        for source in &data.sources {
            println!(
                "  {:<40} {:>6} files {:>10}  {}",
                source.name,
                source.item_count,
                format_size(source.total_size),
                source.path
            );
            if show_files {
                for file in &source.files {
                    print_file_line(file, "    ");
                }
            }
        }
    }

    print_errors(&summary.errors);
}

/// Scan result as JSON
pub fn format_scan_json(summary: &ScanSummary, categories: &[&CategoryData]) -> String {
    let output = serde_json::json!({
        "root": summary.root,
        "total_files": summary.total_files(),
        "total_size": summary.total_size(),
        "categories": categories,
        "error_count": summary.errors.len(),
        "errors": if summary.errors.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::json!(summary.errors)
        }
    });

    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

/// Print a directory listing as text
pub fn format_listing_text(dir: &str, entries: &[StorageEntry]) {
    if entries.is_empty() {
        println!("{dir}: no entries.");
        return;
    }

    println!("{dir}");
    println!("{:<50} {:>10} {:>7}  {}", "Name", "Size", "Items", "Modified");
    println!("{}", "-".repeat(84));
    for entry in entries {
        let name = if entry.is_directory {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        let items = if entry.is_directory {
            entry.item_count.to_string()
        } else {
            String::new()
        };
        println!(
            "{:<50} {:>10} {:>7}  {}",
            name,
            format_size(entry.size),
            items,
            format_date(entry.last_modified)
        );
    }
}

pub fn format_listing_json(dir: &str, entries: &[StorageEntry]) -> String {
    let output = serde_json::json!({
        "path": dir,
        "entries": entries,
    });
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

/// Print a quick filter view as text
pub fn format_filter_text(state: &QuickFilterState) {
    let total: usize = state.groups.iter().map(|g| g.files.len()).sum();
    println!("{} ({total} files)", state.filter.display_name());

    if state.groups.is_empty() {
        println!("No files found.");
        return;
    }

    for group in &state.groups {
        let indent = if let Some(title) = &group.title {
            println!();
            println!("{title}");
            "  "
        } else {
            ""
        };
        for file in &group.files {
            print_file_line(file, indent);
            println!("{indent}  {}", file.path);
        }
    }
}

pub fn format_filter_json(state: &QuickFilterState) -> String {
    serde_json::to_string_pretty(state).unwrap_or_else(|_| "{}".to_string())
}

/// Print storage space and the downloads summary
pub fn format_info_text(root: &str, space: &StorageSpace, downloads: &FolderSummary) {
    println!("{root}");
    println!(
        "  Storage:   {} used of {}",
        format_size(space.used_bytes),
        format_size(space.total_bytes)
    );
    println!(
        "  Downloads: {} files, {}",
        downloads.file_count,
        format_size(downloads.total_size)
    );
}

pub fn format_info_json(root: &str, space: &StorageSpace, downloads: &FolderSummary) -> String {
    let output = serde_json::json!({
        "root": root,
        "storage": space,
        "downloads": downloads,
    });
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

/// Print a batch outcome; failures go to stderr
pub fn format_outcome_text(verb: &str, outcome: &BatchOutcome) {
    println!(
        "{verb}: {} completed, {} skipped, {} failed",
        outcome.completed,
        outcome.skipped,
        outcome.failed.len()
    );
    for failure in &outcome.failed {
        eprintln!("  {}: {}", failure.path, failure.reason);
    }
}

pub fn format_outcome_json(verb: &str, outcome: &BatchOutcome) -> String {
    let output = serde_json::json!({
        "operation": verb,
        "success": outcome.is_success(),
        "outcome": outcome,
    });
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}
