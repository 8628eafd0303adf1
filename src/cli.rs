//! Command-line interface for docstyle.

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{self, Config};
use crate::engine::{CancelToken, Engine};
use crate::report;
use crate::source::{self, Violation};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Default configuration file names to search for.
const DEFAULT_CONFIG_NAMES: &[&str] = &["docstyle.yaml", ".docstyle.yaml"];

/// Documentation style checker for C# XML documentation comments.
///
/// Docstyle validates the structure of documentation comments: block-level
/// markup consistency, parameter list reconciliation, required sections,
/// copy-pasted text, and file header conventions.
#[derive(Parser)]
#[command(name = "docstyle")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check documentation style in a file or directory
    #[command(visible_alias = "lint")]
    Check(CheckArgs),
    /// Create a new docstyle configuration file
    Init(InitArgs),
}

/// Arguments for the check command.
#[derive(Parser)]
pub struct CheckArgs {
    /// Path to check (file or directory)
    pub path: PathBuf,

    /// Path to configuration YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,
}

/// Arguments for the init command.
#[derive(Parser)]
pub struct InitArgs {
    /// Output file path
    #[arg(short, long, default_value = "docstyle.yaml")]
    pub output: PathBuf,
}

/// Starter configuration written by `docstyle init`.
const DEFAULT_TEMPLATE: &str = include_str!("templates/default.yaml");

/// Discover a configuration file in the current directory. An absent file is
/// not an error: the defaults apply.
fn discover_config() -> Option<PathBuf> {
    DEFAULT_CONFIG_NAMES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Collect .cs files under a root, honoring excluded path globs.
fn collect_files(root: &Path, config: &Config) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            // Skip hidden and build-output directories.
            if e.file_type().is_dir()
                && (name.starts_with('.') || name == "bin" || name == "obj")
            {
                return false;
            }
            true
        })
    {
        let entry = entry?;
        if entry.file_type().is_file() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("cs")
                && !config.is_path_excluded(path)
            {
                files.push(path.to_path_buf());
            }
        }
    }

    Ok(files)
}

/// Run the check command.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<i32> {
    if args.format != "pretty" && args.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'pretty' or 'json'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let config_path = args.config.clone().or_else(discover_config);
    let config = match &config_path {
        Some(path) => match Config::parse_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error parsing config: {}", e);
                return Ok(EXIT_ERROR);
            }
        },
        None => Config::default(),
    };

    if let Err(e) = config::validate(&config) {
        eprintln!("Error: invalid config: {}", e);
        return Ok(EXIT_ERROR);
    }

    let abs_path = match args.path.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let metadata = std::fs::metadata(&abs_path)?;
    let files = if metadata.is_dir() {
        collect_files(&abs_path, &config)?
    } else {
        vec![abs_path.clone()]
    };

    if files.is_empty() {
        eprintln!("Warning: no files to check");
        return Ok(EXIT_SUCCESS);
    }

    let engine = Engine::new(config);
    let cancel = CancelToken::new();
    let files_scanned = files.len();

    let per_file: Result<Vec<Vec<Violation>>, anyhow::Error> = files
        .par_iter()
        .map(|file| source::analyze_file(file, &engine, &cancel))
        .collect();
    let mut violations: Vec<Violation> = per_file?.into_iter().flatten().collect();
    violations.sort_by(|a, b| {
        (a.file.as_str(), a.line, a.column).cmp(&(b.file.as_str(), b.line, b.column))
    });

    let path_str = args.path.to_string_lossy().to_string();
    let config_path_str = config_path
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "(defaults)".to_string());

    match args.format.as_str() {
        "json" => report::write_json(&path_str, &config_path_str, files_scanned, &violations)?,
        _ => report::write_pretty(&path_str, &config_path_str, files_scanned, &violations),
    }

    if violations.is_empty() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Run the init command.
pub fn run_init(args: &InitArgs) -> anyhow::Result<i32> {
    if args.output.exists() {
        eprintln!("Error: file already exists: {}", args.output.display());
        eprintln!("Remove it or use --output to specify a different path");
        return Ok(EXIT_ERROR);
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() && parent != Path::new(".") {
            if let Err(e) = std::fs::create_dir_all(parent) {
                eprintln!("Error: failed to create directory: {}", e);
                return Ok(EXIT_ERROR);
            }
        }
    }

    if let Err(e) = std::fs::write(&args.output, DEFAULT_TEMPLATE) {
        eprintln!("Error: failed to write config: {}", e);
        return Ok(EXIT_ERROR);
    }

    println!("Created {}", args.output.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit {} to set your company and copyright text",
        args.output.display()
    );
    println!(
        "  2. Run: docstyle check . --config {}",
        args.output.display()
    );

    Ok(EXIT_SUCCESS)
}
