//! mdrelink - Markdown to HTML conversion with `.md` cross-links retargeted
//!
//! Links such as `[next](chapter-2.md)` are rewritten to point at the
//! rendered page (`chapter-2.html`) and the result is handed to a
//! [`Converter`]. The built-in converter renders CommonMark with
//! pulldown-cmark; any `Fn(&str) -> T` works as well.
//!
//! ```
//! use mdrelink::{process, rewrite};
//!
//! assert_eq!(rewrite("[a](x.md)"), "[a](x.html)");
//! assert_eq!(process("[a](x.md)", &|s: &str| s.len()), 11);
//! ```

pub mod cli;
pub mod core;
pub mod site;

pub use crate::core::config::SiteConfig;
pub use crate::core::converter::{CommonMarkConverter, Converter};
pub use crate::core::document::Document;
pub use crate::core::rewriter::{count_links, process, rewrite, LinkRewriter};
pub use crate::site::builder::{BuildError, BuildReport, SiteBuilder};
