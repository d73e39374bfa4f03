//! Source tree discovery and output file helpers

use std::io;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::config::SiteConfig;

/// A file found under the source directory, relative to its root
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SourceFile {
    /// Rendered to HTML
    Markdown(PathBuf),
    /// Copied verbatim
    Asset(PathBuf),
}

impl SourceFile {
    /// Path relative to the source root
    pub fn path(&self) -> &Path {
        match self {
            SourceFile::Markdown(path) | SourceFile::Asset(path) => path,
        }
    }

    /// Path relative to the output root
    pub fn output_path(&self) -> PathBuf {
        match self {
            SourceFile::Markdown(path) => html_path(path),
            SourceFile::Asset(path) => path.clone(),
        }
    }
}

/// Check if a path names a markdown file
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == "md" || ext == "markdown")
        .unwrap_or(false)
}

/// Output path for a rendered markdown file
pub fn html_path(path: &Path) -> PathBuf {
    path.with_extension("html")
}

/// Discover markdown files and assets under `root`.
///
/// Hidden entries, excluded names and the output directory are skipped.
/// The output directory is matched on canonical paths, so a relative source
/// and an absolute destination still line up. Results are sorted by path.
pub fn scan_source(root: &Path, config: &SiteConfig) -> Result<Vec<SourceFile>, walkdir::Error> {
    // Not created yet means nothing to skip
    let output_dir = config.output_dir().canonicalize().ok();
    let skip = |entry: &DirEntry| {
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        // Skip hidden files and directories
        if name.starts_with('.') {
            return true;
        }
        if config.exclude.iter().any(|excluded| *excluded == name) {
            return true;
        }
        match &output_dir {
            Some(output_dir) if entry.file_type().is_dir() => entry
                .path()
                .canonicalize()
                .map(|path| path == *output_dir)
                .unwrap_or(false),
            _ => false,
        }
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .max_depth(config.max_depth)
        .into_iter()
        .filter_entry(|e| !skip(e))
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = relative.to_path_buf();

        if is_markdown(&relative) {
            files.push(SourceFile::Markdown(relative));
        } else {
            files.push(SourceFile::Asset(relative));
        }
    }

    files.sort_by(|a, b| a.path().cmp(b.path()));
    tracing::debug!("Found {} source files in {}", files.len(), root.display());
    Ok(files)
}

/// Write a file, creating parent directories
pub fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}

/// Copy a file, creating parent directories
pub fn copy_file(from: &Path, to: &Path) -> io::Result<()> {
    if let Some(parent) = to.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::copy(from, to)?;
    Ok(())
}
