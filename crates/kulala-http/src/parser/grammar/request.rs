//! Request and response lines, target URLs, query strings and headers.

use super::{METHODS, is_status_code, is_version_number};
use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::cst::token_sets::{COMMENT_PREFIX, HEADER_NAME, PARAM_VALUE_END, QUERY_NAME_END};
use crate::parser::cst::{SyntaxKind, TokenSet};

/// Tokens that interrupt a plain run of URL text.
const URL_BREAK: TokenSet = TokenSet::new(&[
    SyntaxKind::Question,
    SyntaxKind::Ampersand,
    SyntaxKind::Hash,
    SyntaxKind::VarOpen,
]);

impl Parser<'_> {
    /// `request := [method ws] target_url [ws http_version] NL (comment | header)* body_section?`
    pub(super) fn parse_request(&mut self) {
        if !self.enter_recursion() {
            return;
        }
        self.start_node(SyntaxKind::Request);

        self.parse_request_line();
        self.parse_header_lines();
        if self.at_body_section() {
            self.parse_body_section();
        }

        self.finish_node();
        self.exit_recursion();
    }

    /// `response := http_version ws status_code ws status_text? NL header* body_section?`
    pub(super) fn parse_response(&mut self) {
        if !self.enter_recursion() {
            return;
        }
        self.start_node(SyntaxKind::Response);

        self.leaf(SyntaxKind::HttpVersion, self.pos + 3);
        self.eat_ws();
        if self.currently_is(SyntaxKind::Word) && is_status_code(self.nth_text(0)) {
            self.leaf(SyntaxKind::StatusCode, self.pos + 1);
            self.eat_ws();
            let end = self.trim_ws_end(self.pos, self.line_end_from(self.pos));
            if self.pos < end {
                self.leaf(SyntaxKind::StatusText, end);
            }
            self.eat_ws();
        } else {
            self.error_rest_of_line(DiagnosticKind::ExpectedStatusCode, "expected a status code");
        }
        self.eat_newline();

        self.parse_header_lines();
        if self.at_body_section() {
            self.parse_body_section();
        }

        self.finish_node();
        self.exit_recursion();
    }

    fn at_body_section(&self) -> bool {
        !self.should_stop() && !self.is_separator_line(self.pos) && self.line_is_blank(self.pos)
    }

    /// `HTTP/<version>` starting at `idx`.
    pub(super) fn is_version_at(&self, idx: usize) -> bool {
        self.is_kind_at(idx, SyntaxKind::Word)
            && self.text_at(idx) == "HTTP"
            && self.is_kind_at(idx + 1, SyntaxKind::Slash)
            && self.is_kind_at(idx + 2, SyntaxKind::Word)
            && is_version_number(self.text_at(idx + 2))
    }

    fn parse_request_line(&mut self) {
        self.parse_method();

        let line_end = self.line_end_from(self.pos);
        let (content_end, mut version) = self.split_url_line(self.pos, line_end);
        if self.pos < content_end {
            self.start_node(SyntaxKind::TargetUrl);
            self.parse_url_line(content_end);
            while version.is_none() && self.url_continues() {
                self.eat_ws();
                self.eat_newline();
                self.eat_ws();
                let line_end = self.line_end_from(self.pos);
                let (content_end, v) = self.split_url_line(self.pos, line_end);
                self.parse_url_line(content_end);
                version = v;
            }
            self.finish_node();
        } else {
            self.error_msg(DiagnosticKind::ExpectedUrl, "expected a URL");
        }

        if let Some(v) = version {
            self.eat_ws();
            if self.pos == v {
                self.leaf(SyntaxKind::HttpVersion, v + 3);
            }
        }

        self.eat_ws();
        if !self.at_line_end() {
            self.error_rest_of_line(DiagnosticKind::UnexpectedToken, "unexpected text after the URL");
        }
        self.eat_newline();
    }

    /// A method is an exact-case name followed by more text on the line.
    fn parse_method(&mut self) {
        if !self.currently_is(SyntaxKind::Word)
            || !self.is_kind_at(self.pos + 1, SyntaxKind::Whitespace)
            || self.line_is_blank(self.pos + 1)
        {
            return;
        }

        let word = self.nth_text(0);
        if METHODS.contains(&word) {
            self.leaf(SyntaxKind::Method, self.pos + 1);
            self.eat_ws();
        } else if let Some(method) = METHODS.iter().find(|m| m.eq_ignore_ascii_case(word)) {
            let range = self.current_span();
            let message = format!("`{word}` is read as part of the URL");
            if let Some(diagnostic) = self.diagnostic(DiagnosticKind::UnknownMethod, range, message) {
                diagnostic.fix("methods are uppercase", *method).emit();
            }
        }
    }

    /// Splits a URL line into its content end and the start of a trailing
    /// `HTTP/x` version, if the line has one.
    fn split_url_line(&self, start: usize, line_end: usize) -> (usize, Option<usize>) {
        let end = self.trim_ws_end(start, line_end);
        if end >= start + 4
            && self.is_kind_at(end - 4, SyntaxKind::Whitespace)
            && self.is_version_at(end - 3)
        {
            let version = end - 3;
            return (self.trim_ws_end(start, version), Some(version));
        }
        (end, None)
    }

    /// The next line continues the URL when it is indented and not blank.
    fn url_continues(&self) -> bool {
        let line_end = self.line_end_from(self.pos);
        if line_end >= self.tokens.len() {
            return false;
        }
        let next = line_end + 1;
        self.is_kind_at(next, SyntaxKind::Whitespace) && !self.line_is_blank(next)
    }

    /// One line of `target_url` content over `pos..end`.
    fn parse_url_line(&mut self, end: usize) {
        while self.pos < end && !self.should_stop() {
            match self.current() {
                SyntaxKind::Question => self.parse_query_part(SyntaxKind::QueryString, end),
                SyntaxKind::Ampersand => self.parse_query_part(SyntaxKind::QueryParamContinuation, end),
                SyntaxKind::Hash => self.parse_fragment(end),
                SyntaxKind::VarOpen => self.parse_variable(end),
                _ => {
                    let run_end = self.find_in_line(self.pos + 1, end, URL_BREAK);
                    self.bump_text(run_end);
                }
            }
        }
    }

    /// `query_string := '?' query_param`, `query_param_continuation := '&' query_param`
    fn parse_query_part(&mut self, kind: SyntaxKind, end: usize) {
        self.start_node(kind);
        self.bump_operator();
        if self.pos < end {
            self.parse_query_param(end);
        }
        self.finish_node();
    }

    /// `query_param := query_param_name ['=' query_param_value?]`
    fn parse_query_param(&mut self, end: usize) {
        let name_end = self.find_outside_variables(self.pos, end, QUERY_NAME_END);
        if name_end == self.pos && !self.currently_is(SyntaxKind::Equals) {
            return;
        }

        self.start_node(SyntaxKind::QueryParam);
        if name_end > self.pos {
            self.start_node(SyntaxKind::QueryParamName);
            self.parse_text_with_variables(name_end);
            self.finish_node();
        }
        if self.pos < end && self.currently_is(SyntaxKind::Equals) {
            self.bump_operator();
            let value_end = self.find_outside_variables(self.pos, end, PARAM_VALUE_END);
            if value_end > self.pos {
                self.start_node(SyntaxKind::QueryParamValue);
                self.parse_text_with_variables(value_end);
                self.finish_node();
            }
        }
        self.finish_node();
    }

    /// `fragment := '#' non-space*`
    fn parse_fragment(&mut self, end: usize) {
        self.start_node(SyntaxKind::Fragment);
        self.bump_operator();
        let text_end = self.find_in_line(self.pos, end, TokenSet::single(SyntaxKind::Whitespace));
        self.bump_text(text_end);
        self.finish_node();
    }

    /// `(comment | header)*` up to a blank line, a separator or EOF.
    pub(super) fn parse_header_lines(&mut self) {
        while !self.should_stop() && !self.is_separator_line(self.pos) && !self.line_is_blank(self.pos) {
            match self.current() {
                k if COMMENT_PREFIX.contains(k) => self.parse_comment(),
                k if HEADER_NAME.contains(k) => self.parse_header(),
                _ => {
                    let line_end = self.line_end_from(self.pos);
                    let range = self.span_between(self.pos, line_end);
                    let message = "expected a header or a blank line before the body";
                    if let Some(diagnostic) = self.diagnostic(DiagnosticKind::UnexpectedLine, range, message) {
                        diagnostic.hint("separate the body from the headers with a blank line").emit();
                    }
                    self.bump_error_until(line_end);
                    self.eat_newline();
                }
            }
        }
    }

    /// `header := header_entity ws? ':' ws? value? NL`
    pub(super) fn parse_header(&mut self) {
        self.start_node(SyntaxKind::Header);

        let name_start = self.pos;
        let mut name_end = self.pos;
        while self.kind_at(name_end).is_some_and(|k| HEADER_NAME.contains(k)) {
            name_end += 1;
        }
        let name = self.text_between(name_start, name_end);
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            let range = self.span_between(name_start, name_end);
            self.error_at(DiagnosticKind::InvalidHeaderName, range, name);
        }
        self.leaf(SyntaxKind::HeaderEntity, name_end);
        self.eat_ws();

        let line_end = self.line_end_from(self.pos);
        if self.currently_is(SyntaxKind::Colon) {
            self.bump();
            self.eat_ws();
            let value_end = self.trim_ws_end(self.pos, line_end);
            self.parse_value_until(value_end);
            self.eat_ws();
        } else {
            self.error_rest_of_line(DiagnosticKind::ExpectedColon, "expected `:` after header name");
        }
        self.eat_newline();

        self.finish_node();
    }
}
