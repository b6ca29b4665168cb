//! CLI argument parsing

use crate::models::{DestPreset, Destination, QuickFilter};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub command: Command,
}

#[derive(Debug, Clone)]
pub enum Command {
    Scan(ScanArgs),
    List(ListArgs),
    Filter(FilterArgs),
    Info(InfoArgs),
    Copy(TransferArgs),
    Move(TransferArgs),
    Delete(DeleteArgs),
    Rename(RenameArgs),
}

#[derive(Debug, Clone, Default)]
pub struct ScanArgs {
    pub root: String,
    pub config: Option<String>,
    pub category: Option<String>,
    pub json: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ListArgs {
    pub path: String,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct FilterArgs {
    pub root: String,
    pub filter: QuickFilter,
    pub limit: Option<usize>,
    pub config: Option<String>,
    pub json: bool,
}

#[derive(Debug, Clone, Default)]
pub struct InfoArgs {
    pub root: String,
    pub json: bool,
}

#[derive(Debug, Clone)]
pub struct TransferArgs {
    pub destination: Destination,
    /// Storage root that a preset destination is resolved against.
    pub root: Option<String>,
    pub files: Vec<String>,
    pub json: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DeleteArgs {
    pub files: Vec<String>,
    pub json: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RenameArgs {
    pub file: String,
    pub new_name: String,
    pub json: bool,
}

/// Parse command line arguments
pub fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    if args.len() < 2 {
        return Err("No command specified".to_string());
    }

    let rest = &args[2..];
    let command = match args[1].as_str() {
        "scan" => Command::Scan(parse_scan_args(rest)?),
        "ls" => Command::List(parse_list_args(rest)?),
        "filter" => Command::Filter(parse_filter_args(rest)?),
        "info" => Command::Info(parse_info_args(rest)?),
        "cp" => Command::Copy(parse_transfer_args(rest)?),
        "mv" => Command::Move(parse_transfer_args(rest)?),
        "rm" => Command::Delete(parse_delete_args(rest)?),
        "rename" => Command::Rename(parse_rename_args(rest)?),
        _ => return Err(format!("Unknown command: {}", args[1])),
    };

    Ok(CliArgs { command })
}

/// Value following an option, advancing the cursor.
fn option_value<'a>(args: &'a [String], i: &mut usize, name: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("{name} requires a value"))
}

fn parse_scan_args(args: &[String]) -> Result<ScanArgs, String> {
    let mut scan_args = ScanArgs::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                scan_args.config = Some(option_value(args, &mut i, "--config")?.to_string());
            }
            "--category" => {
                scan_args.category = Some(option_value(args, &mut i, "--category")?.to_string());
            }
            "--json" => {
                scan_args.json = true;
            }
            arg if !arg.starts_with("--") => {
                if scan_args.root.is_empty() {
                    scan_args.root = arg.to_string();
                } else {
                    return Err(format!("Unexpected argument: {arg}"));
                }
            }
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    if scan_args.root.is_empty() {
        return Err("Missing required argument: ROOT".to_string());
    }

    Ok(scan_args)
}

fn parse_list_args(args: &[String]) -> Result<ListArgs, String> {
    let mut list_args = ListArgs::default();

    for arg in args {
        match arg.as_str() {
            "--json" => list_args.json = true,
            arg if !arg.starts_with("--") => {
                if list_args.path.is_empty() {
                    list_args.path = arg.to_string();
                } else {
                    return Err(format!("Unexpected argument: {arg}"));
                }
            }
            _ => return Err(format!("Unknown option: {arg}")),
        }
    }

    if list_args.path.is_empty() {
        return Err("Missing required argument: DIR".to_string());
    }

    Ok(list_args)
}

fn parse_filter_args(args: &[String]) -> Result<FilterArgs, String> {
    let mut positional: Vec<String> = Vec::new();
    let mut limit = None;
    let mut config = None;
    let mut json = false;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--limit" => {
                let value: usize = option_value(args, &mut i, "--limit")?
                    .parse()
                    .map_err(|_| "--limit must be a number".to_string())?;
                if value == 0 {
                    return Err("--limit must be greater than zero".to_string());
                }
                limit = Some(value);
            }
            "--config" => {
                config = Some(option_value(args, &mut i, "--config")?.to_string());
            }
            "--json" => {
                json = true;
            }
            arg if !arg.starts_with("--") => positional.push(arg.to_string()),
            _ => return Err(format!("Unknown option: {}", args[i])),
        }
        i += 1;
    }

    let [root, kind] = <[String; 2]>::try_from(positional)
        .map_err(|_| "Usage: filter <ROOT> <recent|large|duplicates>".to_string())?;
    let filter = kind.parse::<QuickFilter>()?;

    Ok(FilterArgs {
        root,
        filter,
        limit,
        config,
        json,
    })
}

fn parse_info_args(args: &[String]) -> Result<InfoArgs, String> {
    let list = parse_list_args(args).map_err(|e| e.replace("DIR", "ROOT"))?;
    Ok(InfoArgs {
        root: list.path,
        json: list.json,
    })
}

/// Split `--json` from the positional arguments.
fn split_positional(args: &[String]) -> Result<(Vec<String>, bool), String> {
    let mut positional = Vec::new();
    let mut json = false;

    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            "--" => {}
            arg if arg.starts_with("--") => return Err(format!("Unknown option: {arg}")),
            arg => positional.push(arg.to_string()),
        }
    }

    Ok((positional, json))
}

fn parse_transfer_args(args: &[String]) -> Result<TransferArgs, String> {
    let mut positional: Vec<String> = Vec::new();
    let mut preset = None;
    let mut root = None;
    let mut json = false;
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--preset" => {
                preset = Some(option_value(args, &mut i, "--preset")?.parse::<DestPreset>()?);
            }
            "--root" => {
                root = Some(option_value(args, &mut i, "--root")?.to_string());
            }
            "--json" => json = true,
            "--" => {}
            arg if arg.starts_with("--") => return Err(format!("Unknown option: {arg}")),
            arg => positional.push(arg.to_string()),
        }
        i += 1;
    }

    let destination = match preset {
        Some(preset) => {
            if root.is_none() {
                return Err("--preset requires --root <ROOT>".to_string());
            }
            Destination::Preset(preset)
        }
        None => {
            if positional.is_empty() {
                return Err("Missing arguments: DEST_DIR FILE...".to_string());
            }
            Destination::Directory(PathBuf::from(positional.remove(0)))
        }
    };

    if positional.is_empty() {
        return Err("Missing arguments: FILE...".to_string());
    }

    Ok(TransferArgs {
        destination,
        root,
        files: positional,
        json,
    })
}

fn parse_delete_args(args: &[String]) -> Result<DeleteArgs, String> {
    let (files, json) = split_positional(args)?;
    if files.is_empty() {
        return Err("Missing arguments: FILE...".to_string());
    }
    Ok(DeleteArgs { files, json })
}

fn parse_rename_args(args: &[String]) -> Result<RenameArgs, String> {
    let (positional, json) = split_positional(args)?;
    let [file, new_name] = <[String; 2]>::try_from(positional)
        .map_err(|_| "Usage: rename <FILE> <NEW_NAME>".to_string())?;

    Ok(RenameArgs {
        file,
        new_name,
        json,
    })
}
