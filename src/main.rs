//! mdrelink - Markdown to HTML converter that keeps `.md` cross-links working

use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mdrelink::cli::{Cli, Commands, SiteArgs};
use mdrelink::core::file_system::write_file;
use mdrelink::site::watch::watch;
use mdrelink::{rewrite, Document, SiteBuilder, SiteConfig};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level());

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: LevelFilter) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(level)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Rewrite { file } => {
            let text = read_input(file.as_deref())?;
            io::stdout().write_all(rewrite(&text).as_bytes())?;
        }
        Commands::Convert { file, output } => {
            let config = SiteConfig::load(cli.config.as_deref())?;
            let document = match file {
                Some(path) => Document::open(&path)?,
                None => Document::from_source(PathBuf::new(), read_input(None)?),
            };

            let html = SiteBuilder::new(config).render_page(&document);
            match output {
                Some(path) => {
                    write_file(&path, &html)
                        .with_context(|| format!("Failed to write file: {}", path.display()))?;
                    tracing::info!("Wrote {}", path.display());
                }
                None => io::stdout().write_all(html.as_bytes())?,
            }
        }
        Commands::Build(args) => {
            let builder = SiteBuilder::new(site_config(cli.config.as_deref(), args)?);
            let report = builder.build()?;
            tracing::info!("{} links rewritten", report.links_rewritten);
        }
        Commands::Watch(args) => {
            let builder = SiteBuilder::new(site_config(cli.config.as_deref(), args)?);
            watch(&builder, |result| {
                if let Ok(report) = result {
                    tracing::info!("{} links rewritten", report.links_rewritten);
                }
            })?;
        }
    }

    Ok(())
}

/// Load configuration and apply directory overrides from the command line
fn site_config(path: Option<&Path>, args: SiteArgs) -> Result<SiteConfig> {
    let config = SiteConfig::load(path)?;

    // Command-line destinations are relative to the working directory
    let destination = match args.destination {
        Some(dest) if dest.is_relative() => Some(std::env::current_dir()?.join(dest)),
        other => other,
    };

    Ok(config.with_dirs(args.source, destination))
}

/// Read a file, or stdin when no path is given
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
