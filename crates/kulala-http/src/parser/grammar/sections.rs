//! Document layout: sections and the lines that may precede a request.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::cst::token_sets::COMMENT_PREFIX;
use crate::parser::cst::{SyntaxKind, TokenSet};

const INLINE_VALUE_END: TokenSet = TokenSet::new(&[SyntaxKind::Comma, SyntaxKind::ParenClose]);

/// What a line inside a section (before the request) starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionLine {
    Blank,
    Comment,
    Metadata,
    VariableDeclaration,
    Command,
    PreRequestScript,
    Response,
    Request,
}

impl Parser<'_> {
    /// `section := request_separator? section_item* (request | response)?`
    ///
    /// A section ends at the next separator line or EOF.
    pub(super) fn parse_section(&mut self) {
        if !self.enter_recursion() {
            return;
        }
        self.start_node(SyntaxKind::Section);

        if self.is_separator_line(self.pos) {
            self.parse_request_separator();
        }

        while !self.should_stop() && !self.is_separator_line(self.pos) {
            let line = self.classify_section_line();
            self.eat_ws();
            match line {
                SectionLine::Blank => {
                    self.eat_newline();
                }
                SectionLine::Comment => self.parse_comment(),
                SectionLine::Metadata => self.parse_metadata(),
                SectionLine::VariableDeclaration => self.parse_variable_declaration(),
                SectionLine::Command => self.parse_command(),
                SectionLine::PreRequestScript => self.parse_pre_request_script(),
                SectionLine::Response => {
                    self.parse_response();
                    break;
                }
                SectionLine::Request => {
                    self.parse_request();
                    break;
                }
            }
        }

        self.finish_node();
        self.exit_recursion();
    }

    fn classify_section_line(&self) -> SectionLine {
        if self.line_is_blank(self.pos) {
            return SectionLine::Blank;
        }
        let i = self.skip_ws_from(self.pos);
        match self.kind_at(i) {
            Some(k) if COMMENT_PREFIX.contains(k) => {
                if self.is_metadata_at(i) {
                    SectionLine::Metadata
                } else {
                    SectionLine::Comment
                }
            }
            Some(SyntaxKind::At) => SectionLine::VariableDeclaration,
            Some(SyntaxKind::Word)
                if matches!(self.text_at(i), "run" | "import")
                    && self.is_kind_at(i + 1, SyntaxKind::Whitespace)
                    && !self.line_is_blank(i + 1) =>
            {
                SectionLine::Command
            }
            Some(SyntaxKind::LAngle) if self.is_kind_at(i + 1, SyntaxKind::Whitespace) => {
                SectionLine::PreRequestScript
            }
            Some(SyntaxKind::Word) if self.is_version_at(i) => SectionLine::Response,
            _ => SectionLine::Request,
        }
    }

    /// `# @name value`: a comment prefix, optional spaces, `@` and a name.
    fn is_metadata_at(&self, idx: usize) -> bool {
        let at = self.skip_ws_from(idx + 1);
        self.is_kind_at(at, SyntaxKind::At) && self.identifier_end(at + 1).is_some()
    }

    /// `request_separator := '###' ws? value? NL`
    fn parse_request_separator(&mut self) {
        self.assert_current(SyntaxKind::SeparatorMarker);
        self.start_node(SyntaxKind::RequestSeparator);
        self.bump();
        self.eat_ws();
        let end = self.trim_ws_end(self.pos, self.line_end_from(self.pos));
        self.parse_value_until(end);
        self.eat_ws();
        self.eat_newline();
        self.finish_node();
    }

    /// `comment := ('#' | '//') rest-of-line NL`
    pub(super) fn parse_comment(&mut self) {
        self.start_node(SyntaxKind::Comment);
        self.bump();
        let end = self.line_end_from(self.pos);
        self.bump_text(end);
        self.eat_newline();
        self.finish_node();
    }

    /// `metadata := ('#' | '//') ws? '@' identifier [ws? '=' ws? value | ws value] NL`
    fn parse_metadata(&mut self) {
        self.start_node(SyntaxKind::Metadata);
        self.bump();
        self.eat_ws();
        self.assert_current(SyntaxKind::At);
        self.bump();
        self.parse_identifier();

        let value_end = self.trim_ws_end(self.pos, self.line_end_from(self.pos));
        if self.pos < value_end {
            self.eat_ws();
            if self.eat_token(SyntaxKind::Equals) {
                self.eat_ws();
            }
            self.parse_value_until(value_end);
        }
        self.eat_ws();
        self.eat_newline();
        self.finish_node();
    }

    /// `variable_declaration := '@' identifier ws? '=' ws? value NL`
    fn parse_variable_declaration(&mut self) {
        self.start_node(SyntaxKind::VariableDeclaration);
        let value_end = self.trim_ws_end(self.pos, self.line_end_from(self.pos));
        self.parse_assignment(value_end);
        self.eat_ws();
        self.eat_newline();
        self.finish_node();
    }

    /// `'@' identifier ws? '=' ws? value` where the value ends at `value_end`.
    fn parse_assignment(&mut self, value_end: usize) {
        self.assert_current(SyntaxKind::At);
        self.bump();
        self.parse_identifier();
        self.eat_ws();

        if !self.expect(SyntaxKind::Equals, DiagnosticKind::ExpectedEquals, "`=` after the variable name") {
            self.bump_error_until(value_end);
            return;
        }
        self.eat_ws();

        if self.pos >= value_end {
            self.error_msg(DiagnosticKind::ExpectedValue, "expected a value after `=`");
            return;
        }
        self.parse_value_until(value_end);
    }

    /// `command := ('run' | 'import') ws value [ws? '(' inline_decl (',' inline_decl)* ')'] NL`
    fn parse_command(&mut self) {
        self.start_node(SyntaxKind::Command);
        self.leaf(SyntaxKind::CommandName, self.pos + 1);
        self.eat_ws();

        let line_end = self.line_end_from(self.pos);
        let args_open = self.command_args_start(self.pos, line_end);
        let value_end = self.trim_ws_end(self.pos, args_open.unwrap_or(line_end));
        if self.pos < value_end {
            self.parse_value_until(value_end);
        } else {
            self.error_msg(DiagnosticKind::ExpectedValue, "expected a request name or file");
        }

        if args_open.is_some() {
            self.eat_ws();
            self.parse_command_args();
        }

        self.eat_ws();
        if !self.at_line_end() {
            self.error_rest_of_line(DiagnosticKind::UnexpectedToken, "unexpected text after the command");
        }
        self.eat_newline();
        self.finish_node();
    }

    /// Finds the `(` opening inline declarations: it must be followed by `@` or `)`.
    fn command_args_start(&self, start: usize, end: usize) -> Option<usize> {
        (start..end).find(|&i| {
            if !self.is_kind_at(i, SyntaxKind::ParenOpen) {
                return false;
            }
            let next = self.skip_ws_from(i + 1);
            self.is_kind_at(next, SyntaxKind::At) || self.is_kind_at(next, SyntaxKind::ParenClose)
        })
    }

    fn parse_command_args(&mut self) {
        self.assert_current(SyntaxKind::ParenOpen);
        let open = self.current_span();
        self.bump();
        self.eat_ws();

        while self.currently_is(SyntaxKind::At) {
            self.start_node(SyntaxKind::VariableDeclarationInline);
            let line_end = self.line_end_from(self.pos);
            let stop = self.find_outside_variables(self.pos, line_end, INLINE_VALUE_END);
            let value_end = self.trim_ws_end(self.pos, stop);
            self.parse_assignment(value_end);
            self.finish_node();

            self.eat_ws();
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
            self.eat_ws();
        }

        if !self.eat_token(SyntaxKind::ParenClose) {
            let range = self.current_span();
            if let Some(diagnostic) = self.diagnostic(DiagnosticKind::ExpectedCloseParen, range, "expected `)`") {
                diagnostic.related_to("declarations start here", open).emit();
            }
        }
    }

    /// `pre_request_script := '<' ws (script | path) NL+`
    fn parse_pre_request_script(&mut self) {
        self.start_node(SyntaxKind::PreRequestScript);
        self.bump();
        self.eat_ws();
        self.parse_script_or_path();
        self.finish_script_line();
        self.finish_node();
    }
}
