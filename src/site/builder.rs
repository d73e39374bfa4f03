//! Renders a source tree of Markdown files into an HTML site

use std::fmt;
use std::path::PathBuf;
use std::time::Instant;

use pulldown_cmark_escape::{escape_href, escape_html};
use thiserror::Error;

use crate::core::config::SiteConfig;
use crate::core::converter::CommonMarkConverter;
use crate::core::document::Document;
use crate::core::file_system::{copy_file, scan_source, write_file, SourceFile};
use crate::core::rewriter::{count_links, LinkRewriter};

/// Errors raised while building a site
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("source directory not found: {}", .0.display())]
    MissingSource(PathBuf),
    #[error("failed to scan {}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a site build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Markdown pages rendered
    pub pages: usize,
    /// Assets copied
    pub assets: usize,
    /// Link targets retargeted from `.md` to `.html`
    pub links_rewritten: usize,
    /// Written files, relative to the output directory
    pub outputs: Vec<PathBuf>,
}

/// Site builder
pub struct SiteBuilder {
    config: SiteConfig,
    rewriter: LinkRewriter<CommonMarkConverter>,
}

impl SiteBuilder {
    /// Create a builder for the given configuration
    pub fn new(config: SiteConfig) -> Self {
        let rewriter = LinkRewriter::new(CommonMarkConverter::new(&config.markdown));
        Self { config, rewriter }
    }

    /// Builder configuration
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Render every markdown file and copy every asset
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let source = &self.config.source;
        if !source.is_dir() {
            return Err(BuildError::MissingSource(source.clone()));
        }

        let started = Instant::now();
        let output_dir = self.config.output_dir();
        let files = scan_source(source, &self.config).map_err(|e| BuildError::Scan {
            path: source.clone(),
            source: e,
        })?;

        let mut report = BuildReport::default();
        for file in &files {
            let from = source.join(file.path());
            let relative = file.output_path();
            let to = output_dir.join(&relative);

            match file {
                SourceFile::Markdown(_) => {
                    let content = std::fs::read_to_string(&from).map_err(|e| BuildError::Read {
                        path: from.clone(),
                        source: e,
                    })?;
                    let document = Document::from_source(from, content);
                    let links = count_links(document.body());
                    let html = self.render_page(&document);

                    write_file(&to, &html).map_err(|e| BuildError::Write {
                        path: to.clone(),
                        source: e,
                    })?;
                    tracing::debug!("Rendered {} ({} links rewritten)", relative.display(), links);

                    report.pages += 1;
                    report.links_rewritten += links;
                }
                SourceFile::Asset(_) => {
                    copy_file(&from, &to).map_err(|e| BuildError::Write {
                        path: to.clone(),
                        source: e,
                    })?;
                    tracing::trace!("Copied {}", relative.display());
                    report.assets += 1;
                }
            }
            report.outputs.push(relative);
        }

        tracing::info!(
            "Built {} pages and {} assets into {} in {:?}",
            report.pages,
            report.assets,
            output_dir.display(),
            started.elapsed()
        );
        Ok(report)
    }

    /// Render one document to HTML, wrapped in the page layout when enabled
    pub fn render_page(&self, document: &Document) -> String {
        let body = self.rewriter.process(document.body());
        if self.config.layout.wrap && document.wants_layout() {
            self.wrap_page(&document.title(), &body)
        } else {
            body
        }
    }

    fn wrap_page(&self, title: &str, body: &str) -> String {
        let mut page = String::with_capacity(body.len() + 256);
        self.write_layout(&mut page, title, body)
            .expect("writing to a string is infallible");
        page
    }

    fn write_layout(&self, out: &mut String, title: &str, body: &str) -> fmt::Result {
        let layout = &self.config.layout;

        out.push_str("<!DOCTYPE html>\n<html lang=\"");
        escape_html(&mut *out, &layout.lang)?;
        out.push_str("\">\n<head>\n<meta charset=\"utf-8\">\n<title>");
        escape_html(&mut *out, title)?;
        out.push_str("</title>\n");
        if let Some(href) = &layout.stylesheet {
            out.push_str("<link rel=\"stylesheet\" href=\"");
            escape_href(&mut *out, href)?;
            out.push_str("\">\n");
        }
        out.push_str("</head>\n<body>\n");
        out.push_str(body);
        out.push_str("</body>\n</html>\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder(wrap: bool) -> SiteBuilder {
        let mut config = SiteConfig::default();
        config.layout.wrap = wrap;
        SiteBuilder::new(config)
    }

    #[test]
    fn test_render_page_bare() {
        let document = Document::from_source(
            PathBuf::from("index.md"),
            "See [setup](guide/setup.md).\n".to_string(),
        );
        assert_eq!(
            builder(false).render_page(&document),
            "<p>See <a href=\"guide/setup.html\">setup</a>.</p>\n"
        );
    }

    #[test]
    fn test_render_page_wrapped() {
        let document = Document::from_source(
            PathBuf::from("index.md"),
            "---\ntitle: Fish & Chips\n---\nhello\n".to_string(),
        );
        let html = builder(true).render_page(&document);

        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("<title>Fish &amp; Chips</title>"));
        assert!(html.contains("<body>\n<p>hello</p>\n</body>"));
        assert!(!html.contains("stylesheet"));
    }

    #[test]
    fn test_layout_none_skips_wrapping() {
        let document = Document::from_source(
            PathBuf::from("raw.md"),
            "---\nlayout: none\n---\nhello\n".to_string(),
        );
        assert_eq!(builder(true).render_page(&document), "<p>hello</p>\n");
    }

    #[test]
    fn test_leading_indented_code_block() {
        let document =
            Document::from_source(PathBuf::from("code.md"), "    let x = 1;\n".to_string());
        assert_eq!(
            builder(false).render_page(&document),
            "<pre><code>let x = 1;\n</code></pre>\n"
        );
    }

    #[test]
    fn test_stylesheet_link() {
        let mut config = SiteConfig::default();
        config.layout.stylesheet = Some("/css/site.css".to_string());
        let document = Document::from_source(PathBuf::from("a.md"), "x\n".to_string());

        let html = SiteBuilder::new(config).render_page(&document);
        assert!(html.contains("<link rel=\"stylesheet\" href=\"/css/site.css\">"));
    }

    #[test]
    fn test_missing_source() {
        let config = SiteConfig::default()
            .with_dirs(Some(PathBuf::from("/definitely/not/a/source")), None);
        assert!(matches!(
            SiteBuilder::new(config).build(),
            Err(BuildError::MissingSource(_))
        ));
    }

    #[test]
    fn test_layout_escapes_title_and_href() {
        let mut config = SiteConfig::default();
        config.layout.stylesheet = Some("my styles/site.css".to_string());
        let document = Document::from_source(
            PathBuf::from("a.md"),
            "---\ntitle: <script>\"x\"</script>\n---\nbody\n".to_string(),
        );

        let html = SiteBuilder::new(config).render_page(&document);
        assert!(html.contains("<title>&lt;script&gt;&quot;x&quot;&lt;/script&gt;</title>"));
        assert!(html.contains("href=\"my%20styles/site.css\""));
    }
}
