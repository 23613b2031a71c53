use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use enclosing_context::config::{load_from_path, FinderConfig};
use enclosing_context::{
    EnclosingContext, LanguageParser, LineRange, PythonBackend, ValidationResult,
};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "enclosing-context")]
#[command(about = "Find the enclosing Python scope for a line range", long_about = None)]
#[command(version)]
struct Cli {
    /// Finder configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (otherwise controlled by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report the construct enclosing a line range
    Find {
        /// Python source file
        file: PathBuf,

        /// First line of the range (1-indexed)
        #[arg(short, long)]
        start: usize,

        /// Last line of the range (defaults to --start)
        #[arg(short, long)]
        end: Option<usize>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check Python files for syntax errors
    Check {
        /// Files or directories (directories are searched for .py files)
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Print results as JSON lines
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => load_from_path(path)?,
        None => FinderConfig::default(),
    };

    match cli.command {
        Commands::Find {
            file,
            start,
            end,
            json,
        } => cmd_find(&config, &file, start, end.unwrap_or(start), json),

        Commands::Check { paths, json } => cmd_check(&paths, json),
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn cmd_find(config: &FinderConfig, file: &Path, start: usize, end: usize, json: bool) -> Result<()> {
    let range = LineRange::new(start, end)?;
    let source = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;

    let mut backend = PythonBackend::from_config(config)?;
    let found = backend
        .try_find_enclosing_context(&source, range)
        .with_context(|| format!("failed to parse {}", file.display()))?;

    if json {
        let ctx = EnclosingContext::from(found);
        println!("{}", serde_json::to_string_pretty(&ctx)?);
        return Ok(());
    }

    match found {
        Some(node) => println!(
            "{} {} {}:{}-{}:{}",
            "✓".green(),
            node.node_type.bold(),
            node.loc.start.line,
            node.loc.start.column,
            node.loc.end.line,
            node.loc.end.column
        ),
        None => println!(
            "{} no enclosing context for lines {}-{}",
            "⊘".cyan(),
            range.start(),
            range.end()
        ),
    }

    Ok(())
}

/// Collect .py files from the given paths; explicit files are kept as given.
fn discover_python_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(path) {
            let entry = entry?;
            if entry.file_type().is_file()
                && entry.path().extension().and_then(|s| s.to_str()) == Some("py")
            {
                found.push(entry.path().to_path_buf());
            }
        }
        found.sort();
        files.extend(found);
    }

    Ok(files)
}

fn cmd_check(paths: &[PathBuf], json: bool) -> Result<()> {
    let files = discover_python_files(paths)?;
    let mut backend = PythonBackend::new()?;

    let mut total_valid = 0;
    let mut total_invalid = 0;

    for file in &files {
        let (result, source) = match fs::read_to_string(file) {
            Ok(source) => (backend.dry_run(&source), Some(source)),
            Err(e) => {
                log::warn!("failed to read {}: {e}", file.display());
                (ValidationResult::invalid(format!("failed to read file: {e}")), None)
            }
        };

        if json {
            let line = serde_json::json!({
                "file": file.display().to_string(),
                "valid": result.valid,
                "error": &result.error,
            });
            println!("{line}");
        } else if result.valid {
            println!("{} {}", "✓".green(), file.display());
        } else {
            eprintln!("{} {}: {}", "✗".red(), file.display(), result.error);
            if let Some(source) = &source {
                report_error_lines(&mut backend, source);
            }
        }

        if result.valid {
            total_valid += 1;
        } else {
            total_invalid += 1;
        }
    }

    if !json {
        println!();
        println!("{}", "Summary:".bold());
        println!("  {} valid", format!("{}", total_valid).green());
        println!("  {} invalid", format!("{}", total_invalid).red());
    }

    if total_invalid > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Print the position and source line of each error marker.
fn report_error_lines(backend: &mut PythonBackend, source: &str) {
    let parsed = match backend.parser_mut().parse_with_source(source) {
        Ok(parsed) => parsed,
        Err(_) => return,
    };
    for error in parsed.error_nodes() {
        eprintln!(
            "  at {}:{}: {}",
            error.start.line(),
            error.start.column,
            parsed.line_text(error.start).trim()
        );
    }
}
