//! Kulala HTTP: grammar and parser for `.http` / `.rest` request files.
//!
//! # Example
//!
//! ```
//! use kulala_http::{Document, Language};
//!
//! let language = Language::new(kulala_http::grammar()).expect("Error loading Kulala HTTP grammar");
//! assert_eq!(language.name(), "kulala_http");
//!
//! let source = "GET https://example.com/users HTTP/1.1\nAccept: application/json\n";
//! let document = Document::parse(source).expect("out of fuel");
//! assert!(document.is_valid());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod document;
pub mod language;
pub mod parser;

use std::sync::LazyLock;

/// Result type for passes that produce both output and diagnostics.
///
/// Syntax problems are diagnostics; fatal errors (like fuel exhaustion) use the outer `Result`.
pub type PassResult<T> = std::result::Result<(T, Diagnostics), Error>;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use document::{Document, DocumentBuilder, DocumentPrinter, RequestSummary};
pub use language::{Grammar, Language, LanguageError};

/// Errors that can occur while parsing a request file.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (input nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,
}

/// Result type for document operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Descriptor of the Kulala HTTP grammar.
pub fn grammar() -> &'static Grammar {
    &language::tables::KULALA_HTTP
}

/// Shared handle for the built-in grammar.
pub fn language() -> Language {
    static LANGUAGE: LazyLock<Language> = LazyLock::new(|| {
        Language::new(grammar()).expect("built-in grammar descriptor is consistent")
    });
    LANGUAGE.clone()
}
