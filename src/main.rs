//! CLI entry point for treestat

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use treestat::{
    ConsoleOutput, OutputConfig, TreeWalker, WalkError, WalkerConfig, format_bytes, format_number,
    print_report, print_stats_json,
};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "treestat")]
#[command(about = "Directory statistics, file search and empty-entry pruning")]
#[command(version)]
struct Args {
    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto", global = true)]
    color: ColorMode,

    /// Log skipped entries and walk summaries to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show size, counts, largest file and size by file type
    Stats {
        /// Directory to analyze
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Keep at most N file types (default: unlimited)
        #[arg(long, value_name = "N")]
        max_extensions: Option<usize>,

        /// Keep at most N inaccessible paths (default: unlimited)
        #[arg(long, value_name = "N")]
        max_inaccessible: Option<usize>,
    },

    /// Print the total size of a directory
    Size {
        /// Directory to measure
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print the absolute path of every file with the given name
    Find {
        /// Exact file name to look for
        name: String,

        /// Directory to search
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Count occurrences of a word in every file
    Grep {
        /// Text to count (case-sensitive, overlapping matches count)
        #[arg(value_parser = clap::builder::NonEmptyStringValueParser::new())]
        word: String,

        /// Directory to search
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Delete empty files, then directories left empty (including PATH)
    Prune {
        /// Directory to clean
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let output_config = OutputConfig {
        use_color: should_use_color(args.color),
    };

    match run(args.command, output_config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("treestat: {}", e);
            process::exit(2);
        }
    }
}

/// Run a subcommand. `Ok(false)` means a search found nothing.
fn run(command: Command, output_config: OutputConfig) -> Result<bool, WalkError> {
    match command {
        Command::Stats {
            path,
            json,
            max_extensions,
            max_inaccessible,
        } => {
            let walker = TreeWalker::new(WalkerConfig {
                max_extensions,
                max_inaccessible,
            });
            let mut stats = walker.compute_statistics(&path)?;
            if json {
                print_stats_json(&stats)?;
            } else {
                print_report(&mut stats, &path, &output_config)?;
            }
            Ok(true)
        }
        Command::Size { path } => {
            let size = TreeWalker::default().directory_size(&path)?;
            println!("{} ({} bytes)", format_bytes(size), format_number(size));
            Ok(true)
        }
        Command::Find { name, path } => {
            let mut output = ConsoleOutput::new(output_config);
            TreeWalker::default().find_file(&path, &name, &mut output)
        }
        Command::Grep { word, path } => {
            let mut output = ConsoleOutput::new(output_config);
            TreeWalker::default().find_word(&path, &word, &mut output)
        }
        Command::Prune { path } => {
            let mut output = ConsoleOutput::new(output_config);
            let removed = TreeWalker::default().prune_empty(&path, &mut output)?;
            if !removed {
                println!("Nothing to remove");
            }
            Ok(true)
        }
    }
}
