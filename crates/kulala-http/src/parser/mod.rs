//! Parser infrastructure for HTTP request files.
//!
//! # Architecture
//!
//! The parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder.
//!
//! - Zero-copy lexing: tokens carry spans, text is sliced only when building tree nodes
//! - Line-oriented decisions: each line is classified by its first tokens, using raw
//!   index lookahead that never consumes input
//! - Merged leaves: leaf nodes (`Method`, `HeaderEntity`, body lines) hold a single `Text` token
//!
//! # Recovery Strategy
//!
//! The parser is resilient: it always produces a tree.
//!
//! 1. A line that cannot start any production is wrapped in a `SyntaxKind::Error` node
//! 2. Missing expected tokens emit a diagnostic but are not consumed
//! 3. Unclosed variables, scripts and multipart bodies are reported at their opening delimiter
//!
//! Fuel exhaustion (exec_fuel, recursion_fuel) returns an actual error immediately.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod lexer_tests;
#[cfg(test)]
mod tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use ast::{
    Body, Command, Comment, ExternalBody, FormParam, FormUrlencodedBody, GraphqlBody, Header,
    HttpVersion, Metadata, Method, MultipartFormData, Path, Request, RequestSeparator, Response,
    ResHandlerScript, ResRedirect, Root, Script, ScriptSource, Section, TargetUrl, Value, Variable,
    VariableDeclaration,
};

pub use core::{ParseResult, Parser};

use crate::PassResult;
use lexer::lex;

/// Main entry point. Returns Err on fuel exhaustion.
pub fn parse(source: &str) -> PassResult<Root> {
    parse_with_parser(Parser::new(source, lex(source)))
}

/// Parse with a pre-configured parser (for custom fuel limits).
pub(crate) fn parse_with_parser(parser: Parser) -> PassResult<Root> {
    let ParseResult {
        root, diagnostics, ..
    } = parser.parse()?;
    Ok((root, diagnostics))
}
