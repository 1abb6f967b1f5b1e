//! Parsed request file: syntax tree, diagnostics and the views built on them.

mod printer;
mod requests;
mod validation;

#[cfg(test)]
mod mod_tests;
#[cfg(test)]
mod requests_tests;

pub use printer::DocumentPrinter;
pub use requests::RequestSummary;

use crate::Diagnostics;
use crate::parser::lexer::lex;
use crate::parser::{Parser, Root, SyntaxNode, parse_with_parser};

pub const DEFAULT_RECURSION_FUEL: u32 = 4096;

/// Parse limits. Exec fuel is unlimited unless set, so any file that fits
/// in memory parses; recursion fuel bounds nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentConfig {
    pub exec_fuel: Option<u32>,
    pub recursion_fuel: u32,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            exec_fuel: None,
            recursion_fuel: DEFAULT_RECURSION_FUEL,
        }
    }
}

pub struct DocumentBuilder<'a> {
    pub source: &'a str,
    config: DocumentConfig,
}

impl<'a> DocumentBuilder<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            config: DocumentConfig::default(),
        }
    }

    /// Caps the number of tokens the parser may consume.
    pub fn with_exec_fuel(mut self, fuel: u32) -> Self {
        self.config.exec_fuel = Some(fuel);
        self
    }

    pub fn with_recursion_fuel(mut self, limit: u32) -> Self {
        self.config.recursion_fuel = limit;
        self
    }

    pub fn parse(self) -> crate::Result<Document<'a>> {
        let source = self.source;
        let parser = Parser::new(source, lex(source))
            .with_exec_fuel(self.config.exec_fuel)
            .with_recursion_fuel(Some(self.config.recursion_fuel));

        let (root, mut diagnostics) = parse_with_parser(parser).inspect_err(|err| {
            tracing::warn!(error = %err, len = source.len(), "parse aborted");
        })?;
        validation::validate_request_names(&root, &mut diagnostics);

        tracing::debug!(
            len = source.len(),
            errors = diagnostics.error_count(),
            warnings = diagnostics.warning_count(),
            "document parsed"
        );

        Ok(Document {
            source,
            root,
            diagnostics,
        })
    }
}

#[derive(Debug)]
pub struct Document<'a> {
    source: &'a str,
    root: Root,
    diagnostics: Diagnostics,
}

impl<'a> Document<'a> {
    /// Parses with the default limits: unlimited exec fuel and
    /// [`DEFAULT_RECURSION_FUEL`].
    pub fn parse(source: &'a str) -> crate::Result<Self> {
        DocumentBuilder::new(source).parse()
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn syntax(&self) -> &SyntaxNode {
        self.root.as_cst()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// No errors were reported. Warnings do not count.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    /// One summary per section that holds a request.
    pub fn requests(&self) -> Vec<RequestSummary> {
        requests::summarize(self)
    }

    pub fn printer(&self) -> DocumentPrinter<'_, 'a> {
        DocumentPrinter::new(self)
    }

    /// CST without trivia.
    pub fn dump_cst(&self) -> String {
        self.printer().raw(true).dump()
    }

    pub fn dump_cst_full(&self) -> String {
        self.printer().raw(true).with_trivia(true).dump()
    }

    /// Outline of sections and requests.
    pub fn dump(&self) -> String {
        self.printer().dump()
    }

    pub fn dump_diagnostics(&self) -> String {
        self.diagnostics.render_filtered(self.source)
    }
}
