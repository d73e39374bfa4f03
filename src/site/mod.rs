//! Site building on top of the link rewriter

pub mod builder;
pub mod watch;
