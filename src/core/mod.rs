//! Core functionality: link rewriting, conversion, documents, and configuration

pub mod config;
pub mod converter;
pub mod document;
pub mod file_system;
pub mod rewriter;
