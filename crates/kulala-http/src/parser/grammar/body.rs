//! Request bodies, response handlers and redirects.
//!
//! A body section starts after the first blank line that follows the headers
//! and runs to the next separator. Every line is classified by its first
//! tokens; JSON, XML and GraphQL bodies then swallow whole lines until a
//! handler (`>`), a redirect (`>>`) or a separator.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::cst::token_sets::{COMMENT_PREFIX, HEADER_NAME, JSON_FIRST, PARAM_VALUE_END};
use crate::parser::cst::{SyntaxKind, TokenSet};

/// Tokens that cannot start a `name=value` form line.
const FORM_FIRST_FORBIDDEN: TokenSet = TokenSet::new(&[
    SyntaxKind::Whitespace,
    SyntaxKind::Equals,
    SyntaxKind::Ampersand,
    SyntaxKind::Hash,
    SyntaxKind::SeparatorMarker,
    SyntaxKind::LAngle,
    SyntaxKind::RAngle,
    SyntaxKind::RedirectMarker,
    SyntaxKind::BraceOpen,
    SyntaxKind::BracketOpen,
    SyntaxKind::ScriptOpen,
    SyntaxKind::Dash,
    SyntaxKind::DoubleDash,
    SyntaxKind::Colon,
    SyntaxKind::Comma,
]);

/// Tokens that rule out a form line when seen before the first `=`.
const FORM_NAME_FORBIDDEN: TokenSet = TokenSet::new(&[
    SyntaxKind::Ampersand,
    SyntaxKind::Hash,
    SyntaxKind::SeparatorMarker,
    SyntaxKind::LAngle,
    SyntaxKind::BraceOpen,
    SyntaxKind::BraceClose,
    SyntaxKind::ScriptOpen,
    SyntaxKind::Colon,
    SyntaxKind::Comma,
    SyntaxKind::Newline,
]);

const FORM_NAME_END: TokenSet = TokenSet::new(&[
    SyntaxKind::Equals,
    SyntaxKind::Ampersand,
    SyntaxKind::Hash,
    SyntaxKind::Newline,
]);

const BOUNDARY_END: TokenSet = TokenSet::new(&[SyntaxKind::Whitespace, SyntaxKind::Newline]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyLine {
    Blank,
    Comment,
    ResHandler,
    Redirect,
    Multipart,
    External,
    Xml,
    Json,
    Graphql,
    Form,
    Raw,
}

impl Parser<'_> {
    /// `body_section := blank+ (body | comment | res_handler_script | res_redirect | blank)*`
    ///
    /// Body nodes are direct children of the enclosing request or response.
    pub(super) fn parse_body_section(&mut self) {
        if !self.enter_recursion() {
            return;
        }

        while !self.should_stop() && !self.is_separator_line(self.pos) {
            match self.classify_body_line(self.pos) {
                BodyLine::Blank => self.eat_blank_line(),
                BodyLine::Comment => self.parse_comment(),
                BodyLine::ResHandler => self.parse_res_handler_script(),
                BodyLine::Redirect => self.parse_res_redirect(),
                BodyLine::Multipart => self.parse_multipart(),
                BodyLine::External => self.parse_external_body(SyntaxKind::ExternalBody),
                BodyLine::Xml => self.parse_text_body(SyntaxKind::XmlBody),
                BodyLine::Json => self.parse_text_body(SyntaxKind::JsonBody),
                BodyLine::Graphql => self.parse_graphql_body(),
                BodyLine::Form => self.parse_form_body(),
                BodyLine::Raw => self.parse_raw_body(),
            }
        }

        self.exit_recursion();
    }

    fn classify_body_line(&self, idx: usize) -> BodyLine {
        if self.line_is_blank(idx) {
            return BodyLine::Blank;
        }
        let next_is_ws = self.is_kind_at(idx + 1, SyntaxKind::Whitespace);
        match self.kind_at(idx) {
            Some(k) if COMMENT_PREFIX.contains(k) => BodyLine::Comment,
            Some(SyntaxKind::RAngle) if next_is_ws => BodyLine::ResHandler,
            Some(SyntaxKind::RedirectMarker) if next_is_ws => BodyLine::Redirect,
            Some(SyntaxKind::DoubleDash) if !self.line_is_blank(idx + 1) && !next_is_ws => {
                BodyLine::Multipart
            }
            Some(SyntaxKind::LAngle) if self.is_external_line(idx) => BodyLine::External,
            Some(SyntaxKind::LAngle) if !next_is_ws && !self.is_kind_at(idx + 1, SyntaxKind::Newline) => {
                BodyLine::Xml
            }
            Some(k) if JSON_FIRST.contains(k) => BodyLine::Json,
            Some(SyntaxKind::Word) if matches!(self.text_at(idx), "query" | "mutation") && next_is_ws => {
                BodyLine::Graphql
            }
            _ if self.is_form_line(idx) => BodyLine::Form,
            _ => BodyLine::Raw,
        }
    }

    /// `< path` or `<@ path` (the file's variables are substituted).
    fn is_external_line(&self, idx: usize) -> bool {
        if !self.is_kind_at(idx, SyntaxKind::LAngle) {
            return false;
        }
        let after = if self.is_kind_at(idx + 1, SyntaxKind::At) { idx + 2 } else { idx + 1 };
        self.is_kind_at(after, SyntaxKind::Whitespace) && !self.line_is_blank(after)
    }

    /// Lines that end JSON, XML and GraphQL bodies.
    fn is_body_stop(&self, idx: usize) -> bool {
        matches!(
            self.kind_at(idx),
            Some(SyntaxKind::SeparatorMarker | SyntaxKind::RAngle | SyntaxKind::RedirectMarker)
        )
    }

    fn is_handler_line(&self, idx: usize) -> bool {
        matches!(self.kind_at(idx), Some(SyntaxKind::RAngle | SyntaxKind::RedirectMarker))
            && self.is_kind_at(idx + 1, SyntaxKind::Whitespace)
    }

    /// End (exclusive, past the line terminator) of a body that starts on the
    /// current line and continues until a line for which `stop` holds.
    /// Trailing blank lines are left out.
    fn text_body_end(&self, stop: impl Fn(&Self, usize) -> bool) -> usize {
        let mut end = self.next_line_start(self.pos);
        let mut line = end;
        while line < self.tokens.len() && !stop(self, line) {
            let next = self.next_line_start(line);
            if !self.line_is_blank(line) {
                end = next;
            }
            line = next;
        }
        end
    }

    /// Emits `pos..end` as one `Text` token per line plus its terminator.
    fn bump_lines_until(&mut self, end: usize) {
        while self.pos < end && !self.should_stop() {
            let line_end = self.line_end_from(self.pos).min(end);
            self.bump_text(line_end);
            if self.pos < end {
                self.eat_newline();
            }
        }
    }

    /// `xml_body` and `json_body`: every line up to the next handler,
    /// redirect or separator.
    fn parse_text_body(&mut self, kind: SyntaxKind) {
        let end = self.text_body_end(Self::is_body_stop);
        self.start_node(kind);
        self.bump_lines_until(end);
        self.finish_node();
    }

    /// `raw_body`: consecutive non-blank lines.
    fn parse_raw_body(&mut self) {
        let end = self.text_body_end(|p, line| p.line_is_blank(line) || p.is_body_stop(line));
        self.start_node(SyntaxKind::RawBody);
        self.bump_lines_until(end);
        self.finish_node();
    }

    /// `external_body := '<' '@'? ws path`
    ///
    /// Inside multipart bodies the line terminator belongs to the node.
    fn parse_external_body(&mut self, kind: SyntaxKind) {
        self.start_node(kind);
        self.bump();
        self.eat_token(SyntaxKind::At);
        self.eat_ws();
        self.parse_path();
        if kind == SyntaxKind::MultipartExternalBody {
            self.finish_path_line();
            self.finish_node();
        } else {
            self.finish_node();
            self.finish_path_line();
        }
    }

    fn finish_path_line(&mut self) {
        self.eat_ws();
        if !self.at_line_end() {
            self.error_rest_of_line(DiagnosticKind::UnexpectedToken, "unexpected text after the file path");
        }
        self.eat_newline();
    }

    /// `res_handler_script := '>' ws (script | path) NL+`
    fn parse_res_handler_script(&mut self) {
        self.start_node(SyntaxKind::ResHandlerScript);
        self.bump();
        self.eat_ws();
        self.parse_script_or_path();
        self.finish_script_line();
        self.finish_node();
    }

    /// `res_redirect := ('>>' | '>>!') ws path NL+`
    fn parse_res_redirect(&mut self) {
        self.start_node(SyntaxKind::ResRedirect);
        self.bump();
        self.eat_ws();
        self.parse_path();
        self.finish_script_line();
        self.finish_node();
    }

    // ------------------------------------------------------------------
    // Multipart
    // ------------------------------------------------------------------

    /// `multipart_form_data := boundary_first (boundary | external | header | content | blank)* boundary_last`
    fn parse_multipart(&mut self) {
        let open = self.current_span();
        self.start_node(SyntaxKind::MultipartFormData);
        self.parse_boundary_line(true);

        loop {
            if self.should_stop() || self.is_separator_line(self.pos) || self.is_handler_line(self.pos) {
                self.error_unclosed_delimiter(
                    DiagnosticKind::UnclosedMultipart,
                    "expected a closing boundary",
                    "multipart body starts here",
                    open,
                );
                break;
            }
            if self.line_is_blank(self.pos) {
                self.eat_blank_line();
                continue;
            }
            match self.current() {
                SyntaxKind::DoubleDash if !self.is_kind_at(self.pos + 1, SyntaxKind::Whitespace) => {
                    if self.parse_boundary_line(false) {
                        break;
                    }
                }
                SyntaxKind::LAngle if self.is_external_line(self.pos) => {
                    self.parse_external_body(SyntaxKind::MultipartExternalBody);
                }
                k if HEADER_NAME.contains(k) && self.is_header_line(self.pos) => self.parse_header(),
                _ => {
                    self.start_node(SyntaxKind::MultipartContentLine);
                    let line_end = self.line_end_from(self.pos);
                    self.bump_text(line_end);
                    self.eat_newline();
                    self.finish_node();
                }
            }
        }

        self.finish_node();
    }

    /// `name ws? ':'` at the start of a multipart line.
    fn is_header_line(&self, idx: usize) -> bool {
        let mut i = idx;
        while self.kind_at(i).is_some_and(|k| HEADER_NAME.contains(k)) {
            i += 1;
        }
        i > idx && self.is_kind_at(self.skip_ws_from(i), SyntaxKind::Colon)
    }

    /// `'--' boundary_value NL`, or `'--' boundary_value '--'` for the closing
    /// boundary. Returns whether the line closed the multipart body.
    fn parse_boundary_line(&mut self, first: bool) -> bool {
        let line_end = self.line_end_from(self.pos);
        let value_start = self.pos + 1;
        let value_end = self.find_outside_variables(value_start, line_end, BOUNDARY_END);
        let closing = !first
            && value_end > value_start + 1
            && self.is_kind_at(value_end - 1, SyntaxKind::DoubleDash);

        let kind = if first {
            SyntaxKind::MultipartBoundaryFirst
        } else if closing {
            SyntaxKind::MultipartBoundaryLast
        } else {
            SyntaxKind::MultipartBoundary
        };
        self.start_node(kind);
        self.bump();

        let boundary_end = if closing { value_end - 1 } else { value_end };
        if boundary_end > self.pos {
            self.start_node(SyntaxKind::BoundaryValue);
            self.parse_text_with_variables(boundary_end);
            self.finish_node();
        }
        if closing {
            self.bump();
        }

        self.eat_ws();
        if !self.at_line_end() {
            self.error_rest_of_line(DiagnosticKind::UnexpectedToken, "unexpected text after the boundary");
        }
        self.eat_newline();
        self.finish_node();
        closing
    }

    // ------------------------------------------------------------------
    // Forms
    // ------------------------------------------------------------------

    /// `name=value` with a name free of structural characters.
    fn is_form_line(&self, idx: usize) -> bool {
        match self.kind_at(idx) {
            Some(k) if !FORM_FIRST_FORBIDDEN.contains(k) => {}
            _ => return false,
        }
        let line_end = self.line_end_from(idx);
        let stop = self.find_outside_variables(idx, line_end, FORM_NAME_FORBIDDEN.union(TokenSet::single(SyntaxKind::Equals)));
        self.is_kind_at(stop, SyntaxKind::Equals)
    }

    /// `form_urlencoded_body := form_param ('&' NL? form_param)* NL`
    fn parse_form_body(&mut self) {
        self.start_node(SyntaxKind::FormUrlencodedBody);
        loop {
            self.parse_form_param();
            if !self.currently_is(SyntaxKind::Ampersand) {
                break;
            }
            self.bump_operator();
            if self.currently_is(SyntaxKind::Newline) && self.form_continues(self.pos + 1) {
                self.bump();
            }
        }
        self.eat_ws();
        if !self.at_line_end() {
            self.error_rest_of_line(DiagnosticKind::UnexpectedToken, "unexpected text in form body");
        }
        self.eat_newline();
        self.finish_node();
    }

    fn form_continues(&self, idx: usize) -> bool {
        !self.line_is_blank(idx) && !self.is_body_stop(idx)
    }

    /// `form_param := form_param_name ['=' form_param_value?]`
    fn parse_form_param(&mut self) {
        let line_end = self.line_end_from(self.pos);
        let name_stop = self.find_outside_variables(self.pos, line_end, FORM_NAME_END);
        let name_end = self.trim_ws_end(self.pos, name_stop);
        let has_equals = self.is_kind_at(name_stop, SyntaxKind::Equals);
        if name_end == self.pos && !has_equals {
            return;
        }

        self.start_node(SyntaxKind::FormParam);
        if name_end > self.pos {
            self.start_node(SyntaxKind::FormParamName);
            self.parse_text_with_variables(name_end);
            self.finish_node();
        }
        self.eat_ws();
        if has_equals {
            self.bump_operator();
            self.eat_ws();
            let value_stop = self.find_outside_variables(self.pos, line_end, PARAM_VALUE_END);
            let value_end = self.trim_ws_end(self.pos, value_stop);
            if value_end > self.pos {
                self.start_node(SyntaxKind::FormParamValue);
                self.parse_text_with_variables(value_end);
                self.finish_node();
            }
        }
        self.finish_node();
    }

    // ------------------------------------------------------------------
    // GraphQL
    // ------------------------------------------------------------------

    /// `graphql_body := graphql_data json_body? external_body?`
    fn parse_graphql_body(&mut self) {
        self.start_node(SyntaxKind::GraphqlBody);

        let data_end = self.body_end_before_tail(Self::is_graphql_tail);
        self.start_node(SyntaxKind::GraphqlData);
        self.bump_lines_until(data_end);
        self.finish_node();

        let next = self.next_content_line(self.pos);
        if self.kind_at(next).is_some_and(|k| JSON_FIRST.contains(k)) {
            self.eat_blank_lines_until(next);
            let end = self.body_end_before_tail(Self::is_external_line);
            self.start_node(SyntaxKind::JsonBody);
            self.bump_lines_until(end);
            self.finish_node();
        }

        let next = self.next_content_line(self.pos);
        if self.is_external_line(next) {
            self.eat_blank_lines_until(next);
            self.parse_external_body(SyntaxKind::ExternalBody);
        }

        self.finish_node();
    }

    /// Variables (`{`/`[`) or an external variables file (`< path`).
    fn is_graphql_tail(&self, idx: usize) -> bool {
        self.kind_at(idx).is_some_and(|k| JSON_FIRST.contains(k)) || self.is_external_line(idx)
    }

    /// Like [`text_body_end`](Self::text_body_end), but also stops at a
    /// `tail` line that follows a blank line. A `tail` line directly under
    /// body text, such as the `{` of a selection set, stays in the body.
    fn body_end_before_tail(&self, tail: impl Fn(&Self, usize) -> bool) -> usize {
        let mut end = self.next_line_start(self.pos);
        let mut line = end;
        let mut after_blank = false;
        while line < self.tokens.len() && !self.is_body_stop(line) {
            let next = self.next_line_start(line);
            if self.line_is_blank(line) {
                after_blank = true;
            } else if after_blank && tail(self, line) {
                break;
            } else {
                after_blank = false;
                end = next;
            }
            line = next;
        }
        end
    }

    /// First token of the first non-blank line at or after `idx`.
    fn next_content_line(&self, idx: usize) -> usize {
        let mut line = idx;
        while line < self.tokens.len() && self.line_is_blank(line) {
            line = self.next_line_start(line);
        }
        line
    }

    fn eat_blank_lines_until(&mut self, idx: usize) {
        while self.pos < idx && !self.should_stop() {
            self.eat_blank_line();
        }
    }
}
