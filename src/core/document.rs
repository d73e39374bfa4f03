//! Markdown source documents

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A markdown source document
#[derive(Debug, Clone)]
pub struct Document {
    /// File path
    pub path: PathBuf,
    /// Raw document content, front matter included
    pub content: String,
    /// Document metadata (front matter)
    pub metadata: DocumentMetadata,
    /// Byte offset where the body starts
    body_offset: usize,
}

/// Document metadata from front matter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    pub title: Option<String>,
    pub tags: Vec<String>,
    /// `none` renders the bare body without a page layout
    pub layout: Option<String>,
}

impl Document {
    /// Open a document from a file
    pub fn open(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(Self::from_source(path.to_path_buf(), content))
    }

    /// Build a document from in-memory text
    pub fn from_source(path: PathBuf, content: String) -> Self {
        let (metadata, body_offset) = match split_front_matter(&content) {
            Some((front, offset)) => (Self::parse_front_matter(front), offset),
            None => (DocumentMetadata::default(), 0),
        };

        Self {
            path,
            content,
            metadata,
            body_offset,
        }
    }

    /// Get the document title (metadata title or filename without extension)
    pub fn title(&self) -> String {
        self.metadata.title.clone().unwrap_or_else(|| {
            self.path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Untitled".to_string())
        })
    }

    /// Content after the closing front matter line, otherwise untouched
    pub fn body(&self) -> &str {
        &self.content[self.body_offset..]
    }

    /// Whether the page should be wrapped in the site layout
    pub fn wants_layout(&self) -> bool {
        self.metadata.layout.as_deref() != Some("none")
    }

    /// Parse front matter text
    fn parse_front_matter(front: &str) -> DocumentMetadata {
        if let Ok(metadata) = serde_json::from_str(front) {
            return metadata;
        }

        // Simple key-value parsing
        let mut metadata = DocumentMetadata::default();
        for line in front.lines() {
            if let Some((key, value)) = line.split_once(':') {
                let key = key.trim();
                let value = value.trim().trim_matches('"');
                match key {
                    "title" => metadata.title = Some(value.to_string()),
                    "layout" => metadata.layout = Some(value.to_string()),
                    "tags" => {
                        metadata.tags = value
                            .trim_matches(|c| c == '[' || c == ']')
                            .split(',')
                            .map(|s| s.trim().to_string())
                            .filter(|s| !s.is_empty())
                            .collect();
                    }
                    _ => {}
                }
            }
        }
        metadata
    }
}

/// Split a leading `---` block off `content`.
///
/// Returns the front matter text and the byte offset of the body. Content
/// without an opening `---` line, or without a closing one, has no front
/// matter.
fn split_front_matter(content: &str) -> Option<(&str, usize)> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != "---" {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == "---" {
            return Some((&content[start..offset], offset + line.len()));
        }
        offset += line.len();
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(content: &str) -> Document {
        Document::from_source(PathBuf::from("notes/page.md"), content.to_string())
    }

    #[test]
    fn test_parse_front_matter() {
        let document = doc(r#"---
title: "Test Document"
tags: [rust, markdown]
---

# Content here
"#);
        assert_eq!(document.metadata.title, Some("Test Document".to_string()));
        assert_eq!(document.metadata.tags, vec!["rust", "markdown"]);
        assert_eq!(document.body(), "\n# Content here\n");
        assert_eq!(document.title(), "Test Document");
    }

    #[test]
    fn test_json_front_matter() {
        let document = doc("---\n{\"title\": \"JSON\", \"layout\": \"none\"}\n---\nbody\n");
        assert_eq!(document.metadata.title.as_deref(), Some("JSON"));
        assert!(!document.wants_layout());
        assert_eq!(document.body(), "body\n");
    }

    #[test]
    fn test_no_front_matter() {
        let document = doc("# Heading\n\ntext\n");
        assert_eq!(document.metadata, DocumentMetadata::default());
        assert_eq!(document.body(), "# Heading\n\ntext\n");
        assert_eq!(document.title(), "page");
        assert!(document.wants_layout());
    }

    #[test]
    fn test_unterminated_front_matter_is_body() {
        let content = "---\ntitle: x\nno closing line\n";
        let document = doc(content);
        assert_eq!(document.metadata.title, None);
        assert_eq!(document.body(), content);
    }

    #[test]
    fn test_leading_indentation_kept() {
        let document = doc("    let x = 1;\n");
        assert_eq!(document.body(), "    let x = 1;\n");

        let document = doc("---\ntitle: Code\n---\n    let x = 1;\n");
        assert_eq!(document.body(), "    let x = 1;\n");
    }

    #[test]
    fn test_thematic_break_is_not_front_matter() {
        let document = doc("intro\n\n---\n\nmore\n");
        assert_eq!(document.body(), "intro\n\n---\n\nmore\n");
    }

    #[test]
    fn test_open_missing_file() {
        let err = Document::open(Path::new("/definitely/not/here.md")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
