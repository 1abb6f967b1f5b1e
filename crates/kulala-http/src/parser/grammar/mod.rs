//! Grammar productions for HTTP request files.
//!
//! The grammar is line oriented: every decision is made by looking at the
//! first tokens of the current line. Productions are split by concern:
//! - `sections`: document layout, separators, comments, variables, commands
//! - `request`: request/response lines, URLs, query strings, headers
//! - `body`: request bodies, response handlers and redirects
//! - `utils`: values, paths, variables, identifiers, scripts

mod body;
mod request;
mod sections;
mod utils;

use super::core::Parser;
use super::cst::SyntaxKind;

impl Parser<'_> {
    pub(super) fn parse_root(&mut self) {
        self.start_node(SyntaxKind::Document);
        while !self.should_stop() {
            self.parse_section();
        }
        self.finish_node();
    }
}

/// Request methods, matched case-sensitively.
pub(super) const METHODS: &[&str] = &[
    "OPTIONS",
    "GET",
    "HEAD",
    "POST",
    "PUT",
    "DELETE",
    "TRACE",
    "CONNECT",
    "PATCH",
    "LIST",
    "GRAPHQL",
    "GRPC",
    "WEBSOCKET",
    "WS",
    "WSS",
];

/// `HTTP/` version numbers: digits and dots, starting with a digit.
fn is_version_number(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_digit())
        && text.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// `[1-5]\d\d`
fn is_status_code(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 3 && (b'1'..=b'5').contains(&bytes[0]) && bytes[1..].iter().all(u8::is_ascii_digit)
}
