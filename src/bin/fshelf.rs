//! File shelf CLI (fshelf) - Main binary entry point

use fileshelf::cli::args::{
    Command, DeleteArgs, FilterArgs, InfoArgs, ListArgs, RenameArgs, ScanArgs, TransferArgs,
    parse_args,
};
use fileshelf::cli::output;
use fileshelf::models::{BatchOutcome, CategoryData, FailedItem, FileCategory, FileItem};
use fileshelf::services::browse::folder_summary;
use fileshelf::services::volume::storage_space;
use fileshelf::{Capabilities, Error, ScanOptions};
use std::path::{Path, PathBuf};
use std::process;

/// Folder summarized by `info`, relative to the storage root.
const DOWNLOADS_DIR: &str = "Download";

fn main() {
    // Initialize logger (controlled by RUST_LOG environment variable)
    // Example: RUST_LOG=debug fshelf scan /sdcard
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_help();
        return;
    }

    match args[1].as_str() {
        "--help" | "-h" => {
            print_help();
            return;
        }
        "--version" | "-v" => {
            print_version();
            return;
        }
        _ => {}
    }

    let cli_args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Use --help for usage information");
            process::exit(2);
        }
    };

    let caps = Capabilities::local();
    let exit_code = match &cli_args.command {
        Command::Scan(a) => handle_scan(a, &caps),
        Command::List(a) => handle_list(a, &caps),
        Command::Filter(a) => handle_filter(a, &caps),
        Command::Info(a) => handle_info(a, &caps),
        Command::Copy(a) => handle_transfer(a, &caps, false),
        Command::Move(a) => handle_transfer(a, &caps, true),
        Command::Delete(a) => handle_delete(a, &caps),
        Command::Rename(a) => handle_rename(a, &caps),
    };

    process::exit(exit_code);
}

fn error_exit_code(error: &Error) -> i32 {
    match error {
        Error::InvalidInput(_) | Error::Config(_) | Error::AlreadyExists(_) => 2,
        _ => 4,
    }
}

fn report(error: &Error) -> i32 {
    eprintln!("Error: {error}");
    error_exit_code(error)
}

fn load_options(config: Option<&str>) -> Result<ScanOptions, Error> {
    match config {
        Some(path) => ScanOptions::load(path),
        None => Ok(ScanOptions::default()),
    }
}

fn handle_scan(args: &ScanArgs, caps: &Capabilities) -> i32 {
    let options = match load_options(args.config.as_deref()) {
        Ok(o) => o,
        Err(e) => return report(&e),
    };

    let only = match args.category.as_deref().map(FileCategory::from_label) {
        Some(None) => {
            eprintln!(
                "Invalid category: {}. Use images|videos|audio|documents|apks|archives",
                args.category.as_deref().unwrap_or_default()
            );
            return 2;
        }
        Some(found) => found,
        None => None,
    };

    if !args.json {
        eprintln!("Scanning: {}", args.root);
    }

    let summary = match fileshelf::scan_categories(&args.root, &options, caps) {
        Ok(s) => s,
        Err(e) => return report(&e),
    };

    let shown: Vec<&CategoryData> = summary
        .categories
        .values()
        .filter(|data| only.is_none_or(|c| c == data.category))
        .collect();

    if args.json {
        println!("{}", output::format_scan_json(&summary, &shown));
    } else {
        output::format_scan_text(&summary, &shown, only.is_some());
    }

    if summary.errors.is_empty() { 0 } else { 3 }
}

fn handle_list(args: &ListArgs, caps: &Capabilities) -> i32 {
    let entries = match fileshelf::list_children(Path::new(&args.path), caps) {
        Ok(entries) => entries,
        Err(e) => return report(&e),
    };

    if args.json {
        println!("{}", output::format_listing_json(&args.path, &entries));
    } else {
        output::format_listing_text(&args.path, &entries);
    }
    0
}

fn handle_filter(args: &FilterArgs, caps: &Capabilities) -> i32 {
    let options = match load_options(args.config.as_deref()) {
        Ok(o) => o,
        Err(e) => return report(&e),
    };

    let summary = match fileshelf::scan_categories(&args.root, &options, caps) {
        Ok(s) => s,
        Err(e) => return report(&e),
    };

    let limit = args.limit.unwrap_or(options.quick_filter_limit);
    let state = fileshelf::build_quick_filter(args.filter, &summary.categories, limit);

    if args.json {
        println!("{}", output::format_filter_json(&state));
    } else {
        output::format_filter_text(&state);
    }
    0
}

fn handle_info(args: &InfoArgs, caps: &Capabilities) -> i32 {
    let root = Path::new(&args.root);
    if !root.is_dir() {
        eprintln!("Error: Path is not a directory: {}", args.root);
        return 2;
    }

    let space = storage_space(caps.volumes.as_ref(), root);
    let downloads = folder_summary(caps.fs.as_ref(), &root.join(DOWNLOADS_DIR));

    if args.json {
        println!("{}", output::format_info_json(&args.root, &space, &downloads));
    } else {
        output::format_info_text(&args.root, &space, &downloads);
    }
    0
}

/// Resolve command line paths to items; unresolvable paths become failures.
fn collect_items(files: &[String], caps: &Capabilities) -> (Vec<FileItem>, Vec<FailedItem>) {
    let mut items = Vec::new();
    let mut failed = Vec::new();

    for file in files {
        match FileItem::from_path(Path::new(file), caps) {
            Ok(item) => items.push(item),
            Err(e) => failed.push(FailedItem {
                path: file.clone(),
                reason: e.to_string(),
            }),
        }
    }

    (items, failed)
}

fn finish_batch(
    verb: &str,
    mut outcome: BatchOutcome,
    unresolved: Vec<FailedItem>,
    json: bool,
) -> i32 {
    outcome.failed.extend(unresolved);

    if json {
        println!("{}", output::format_outcome_json(verb, &outcome));
    } else {
        output::format_outcome_text(verb, &outcome);
    }

    if outcome.is_success() { 0 } else { 3 }
}

fn handle_transfer(args: &TransferArgs, caps: &Capabilities, is_move: bool) -> i32 {
    let (items, unresolved) = collect_items(&args.files, caps);
    let storage_root = PathBuf::from(args.root.as_deref().unwrap_or_default());
    let destination = args.destination.resolve(&storage_root);

    let result = if is_move {
        fileshelf::move_files(caps.fs.as_ref(), &items, &destination)
    } else {
        fileshelf::copy_files(caps.fs.as_ref(), &items, &destination)
    };

    match result {
        Ok(outcome) => {
            let verb = if is_move { "move" } else { "copy" };
            finish_batch(verb, outcome, unresolved, args.json)
        }
        Err(e) => report(&e),
    }
}

fn handle_delete(args: &DeleteArgs, caps: &Capabilities) -> i32 {
    let (items, unresolved) = collect_items(&args.files, caps);
    let outcome = fileshelf::delete_files(caps.fs.as_ref(), &items);
    finish_batch("delete", outcome, unresolved, args.json)
}

fn handle_rename(args: &RenameArgs, caps: &Capabilities) -> i32 {
    let item = match FileItem::from_path(Path::new(&args.file), caps) {
        Ok(item) => item,
        Err(e) => return report(&e),
    };

    match fileshelf::rename_file(caps.fs.as_ref(), &item, &args.new_name) {
        Ok(target) => {
            if args.json {
                let output = serde_json::json!({
                    "operation": "rename",
                    "from": item.path,
                    "to": target.to_string_lossy(),
                });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
                );
            } else {
                println!("Renamed {} -> {}", item.path, target.display());
            }
            0
        }
        Err(e) => report(&e),
    }
}

fn print_help() {
    println!("File shelf CLI (fshelf) - Categorize, browse and organize local storage");
    println!();
    println!("USAGE:");
    println!("    fshelf scan <ROOT> [--category <NAME>] [--config <FILE>] [--json]");
    println!("    fshelf ls <DIR> [--json]");
    println!("    fshelf filter <ROOT> <recent|large|duplicates> [--limit <N>] [--json]");
    println!("    fshelf info <ROOT> [--json]");
    println!("    fshelf cp <DEST_DIR> <FILE>... [--json]");
    println!("    fshelf cp --preset <NAME> --root <ROOT> <FILE>... [--json]");
    println!("    fshelf mv <DEST_DIR> <FILE>... [--json]");
    println!("    fshelf mv --preset <NAME> --root <ROOT> <FILE>... [--json]");
    println!("    fshelf rm <FILE>... [--json]");
    println!("    fshelf rename <FILE> <NEW_NAME> [--json]");
    println!();
    println!("COMMANDS:");
    println!("    scan      Group files by category and source folder");
    println!("    ls        List a directory with subtree sizes and item counts");
    println!("    filter    Show recent, large or duplicate files across categories");
    println!("    info      Show storage space and the downloads summary");
    println!("    cp, mv    Copy or move files, numbering names that already exist");
    println!("    rm        Delete files");
    println!("    rename    Rename a file, keeping its extension when none is given");
    println!();
    println!("GLOBAL OPTIONS:");
    println!("    -h, --help                 Show this help message");
    println!("    -v, --version              Show version information");
    println!();
    println!("SCAN / FILTER OPTIONS:");
    println!("    --config <FILE>           TOML scan options (grouping roots, skip rules)");
    println!("    --category <NAME>         Only show one category, including its files");
    println!("    --limit <N>               Cap recent/large results (default: 100)");
    println!("    --json                    Emit machine-readable output");
    println!();
    println!("TRANSFER OPTIONS:");
    println!("    --preset <NAME>           internal|downloads|documents|pictures|music|movies");
    println!("    --root <ROOT>             Storage root a preset is resolved against");
    println!();
    println!("EXIT CODES:");
    println!("    0 success, 2 invalid input, 3 partial failure, 4 other error");
    println!();
    println!("EXAMPLES:");
    println!("    fshelf scan /sdcard --category images");
    println!("    fshelf filter /sdcard duplicates --json");
    println!("    fshelf cp --preset downloads --root /sdcard photo.jpg");
    println!("    RUST_LOG=debug fshelf ls /sdcard/Download");
}

fn print_version() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("FSHELF_GIT_HASH");
    const GIT_DATE: &str = env!("FSHELF_GIT_DATE");
    const BUILD_TARGET: &str = env!("FSHELF_TARGET");

    println!("fshelf {VERSION}");
    println!("Commit: {GIT_HASH} ({GIT_DATE})");
    println!("Target: {BUILD_TARGET}");

    #[cfg(debug_assertions)]
    println!("Build: debug");
    #[cfg(not(debug_assertions))]
    println!("Build: release");
}
