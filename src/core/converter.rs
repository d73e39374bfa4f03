//! Markdown to HTML conversion

use pulldown_cmark::{html, Options, Parser};

use super::config::MarkdownOptions;

/// Turns Markdown text into rendered output.
///
/// Implemented for any `Fn(&str) -> T`, so a closure can stand in for the
/// built-in [`CommonMarkConverter`]. Fallible converters return a `Result`
/// as their output.
pub trait Converter {
    /// Rendered result
    type Output;

    /// Convert Markdown source text
    fn convert(&self, markdown: &str) -> Self::Output;
}

impl<F, T> Converter for F
where
    F: Fn(&str) -> T,
{
    type Output = T;

    fn convert(&self, markdown: &str) -> T {
        self(markdown)
    }
}

/// CommonMark renderer backed by pulldown-cmark
#[derive(Debug, Clone, Copy)]
pub struct CommonMarkConverter {
    options: Options,
}

impl CommonMarkConverter {
    /// Create a converter with the given extensions enabled
    pub fn new(markdown: &MarkdownOptions) -> Self {
        let mut options = Options::empty();
        if markdown.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if markdown.footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        if markdown.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if markdown.tasklists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        if markdown.smart_punctuation {
            options.insert(Options::ENABLE_SMART_PUNCTUATION);
        }
        if markdown.heading_attributes {
            options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        Self { options }
    }

    /// Plain CommonMark, no extensions
    pub fn commonmark() -> Self {
        Self {
            options: Options::empty(),
        }
    }
}

impl Default for CommonMarkConverter {
    fn default() -> Self {
        Self::new(&MarkdownOptions::default())
    }
}

impl Converter for CommonMarkConverter {
    type Output = String;

    fn convert(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, parser);
        out
    }
}
