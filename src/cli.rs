//! Command-line interface definitions using clap.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

/// Markdown to HTML converter that keeps `.md` cross-links working
///
/// Inline links such as `[next](chapter-2.md)` are retargeted at the
/// rendered page (`chapter-2.html`) before conversion.
///
/// Exit Codes:
///   0  - Command succeeded
///   1  - An error occurred
#[derive(Parser)]
#[command(name = "mdrelink", version)]
#[command(about = "Convert Markdown to HTML with .md links retargeted", long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./mdrelink.json, then the user config)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print Markdown with .md link targets rewritten to .html
    Rewrite {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },

    /// Convert one Markdown document to HTML
    Convert {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build the site
    Build(SiteArgs),

    /// Build the site, then rebuild whenever a source file changes
    Watch(SiteArgs),
}

/// Directory overrides shared by `build` and `watch`
#[derive(Args, Debug, Clone, Default)]
pub struct SiteArgs {
    /// Source directory
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Output directory
    #[arg(short, long)]
    pub destination: Option<PathBuf>,
}

impl Cli {
    /// Log level selected by `--verbose` and `--quiet`
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::WARN;
        }
        match self.verbose {
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}
