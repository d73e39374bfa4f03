//! Link target rewriting for Markdown sources
//!
//! Inline links that point at another Markdown file (`[label](page.md)`) are
//! retargeted at the rendered page (`[label](page.html)`) before the text is
//! handed to a [`Converter`].

use std::sync::LazyLock;

use regex_lite::Regex;

use super::converter::{CommonMarkConverter, Converter};

/// `](<path>.md)` where `<path>` is one or more non-`)` characters
static MD_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\(([^)]+)\.md\)").unwrap());

/// Rewrite every `](<path>.md)` link target to `](<path>.html)`.
///
/// Matches are found left to right without overlap. Everything outside the
/// trailing `.md` is copied through unchanged, so text without matches comes
/// back byte-for-byte. The extension is matched case-sensitively.
pub fn rewrite(text: &str) -> String {
    MD_LINK.replace_all(text, "](${1}.html)").into_owned()
}

/// Number of link targets [`rewrite`] would change
pub fn count_links(text: &str) -> usize {
    MD_LINK.find_iter(text).count()
}

/// Rewrite `text` and hand the result to `converter`.
///
/// The converter runs exactly once, on the rewritten text, and its output is
/// returned as-is.
pub fn process<C>(text: &str, converter: &C) -> C::Output
where
    C: Converter + ?Sized,
{
    converter.convert(&rewrite(text))
}

/// Link rewriter wrapping a Markdown converter
#[derive(Debug, Clone)]
pub struct LinkRewriter<C> {
    converter: C,
}

impl<C: Converter> LinkRewriter<C> {
    /// Create a rewriter that delegates to `converter`
    pub fn new(converter: C) -> Self {
        Self { converter }
    }

    /// The wrapped converter
    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Rewrite link targets without converting
    pub fn rewrite(&self, text: &str) -> String {
        rewrite(text)
    }

    /// Rewrite link targets, then convert
    pub fn process(&self, text: &str) -> C::Output {
        process(text, &self.converter)
    }

    /// Unwrap the converter
    pub fn into_inner(self) -> C {
        self.converter
    }
}

impl Default for LinkRewriter<CommonMarkConverter> {
    fn default() -> Self {
        Self::new(CommonMarkConverter::default())
    }
}
