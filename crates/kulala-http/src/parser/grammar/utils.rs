//! Shared leaf productions: values, paths, variables, identifiers and scripts.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::cst::token_sets::{IDENTIFIER_TOKENS, PATH_TOKENS};
use crate::parser::cst::{SyntaxKind, TokenSet};

impl Parser<'_> {
    /// Index just past the identifier starting at `idx`.
    ///
    /// `name`, `$random.uuid`, `items[0].id`, `$randomInt(1, 10)`: a run of
    /// word characters followed by `[...]`, `(...)` or `.word` groups.
    pub(super) fn identifier_end(&self, idx: usize) -> Option<usize> {
        let mut i = self.identifier_run_end(idx);
        if i == idx {
            return None;
        }
        loop {
            match self.kind_at(i) {
                Some(SyntaxKind::BracketOpen) => match self.group_end(i, SyntaxKind::BracketClose) {
                    Some(close) if close > i + 1 => i = close + 1,
                    _ => break,
                },
                Some(SyntaxKind::ParenOpen) => match self.group_end(i, SyntaxKind::ParenClose) {
                    Some(close) => i = close + 1,
                    None => break,
                },
                Some(SyntaxKind::Word) if self.text_at(i).starts_with('.') => {
                    i = self.identifier_run_end(i);
                }
                _ => break,
            }
        }
        Some(i)
    }

    fn identifier_run_end(&self, idx: usize) -> usize {
        let mut i = idx;
        while self.kind_at(i).is_some_and(|k| IDENTIFIER_TOKENS.contains(k)) {
            i += 1;
        }
        i
    }

    /// Index of `close` on the same line after the opener at `open`.
    fn group_end(&self, open: usize, close: SyntaxKind) -> Option<usize> {
        let line_end = self.line_end_from(open);
        (open + 1..line_end).find(|&i| self.is_kind_at(i, close))
    }

    /// First index in `start..end` whose kind is in `stop`, stepping over
    /// complete `{{ ... }}` groups.
    pub(super) fn find_outside_variables(&self, start: usize, end: usize, stop: TokenSet) -> usize {
        let mut i = start;
        while i < end {
            match self.kind_at(i) {
                Some(SyntaxKind::VarOpen) => {
                    i = match self.group_end(i, SyntaxKind::VarClose) {
                        Some(close) if close < end => close + 1,
                        _ => i + 1,
                    };
                }
                Some(k) if stop.contains(k) => return i,
                _ => i += 1,
            }
        }
        end
    }

    pub(super) fn parse_identifier(&mut self) -> bool {
        self.parse_identifier_until(usize::MAX)
    }

    fn parse_identifier_until(&mut self, limit: usize) -> bool {
        match self.identifier_end(self.pos) {
            Some(end) if end <= limit => {
                self.leaf(SyntaxKind::Identifier, end);
                true
            }
            _ => {
                self.error_msg(DiagnosticKind::ExpectedIdentifier, "expected a name");
                false
            }
        }
    }

    /// Merges token runs into `Text` up to `end`, parsing `{{ ... }}` as variables.
    pub(super) fn parse_text_with_variables(&mut self, end: usize) {
        while self.pos < end && !self.should_stop() {
            if self.currently_is(SyntaxKind::VarOpen) {
                self.parse_variable(end);
                continue;
            }
            let run_end = self.find_in_line(self.pos, end, TokenSet::single(SyntaxKind::VarOpen));
            self.bump_text(run_end);
        }
    }

    /// `value := (word | punct | variable | ws)+` over `pos..end`.
    pub(super) fn parse_value_until(&mut self, end: usize) {
        if self.pos >= end {
            return;
        }
        self.start_node(SyntaxKind::Value);
        self.parse_text_with_variables(end);
        self.finish_node();
    }

    /// `variable := '{{' ws? identifier ws? '}}'`, never reading past `limit`.
    pub(super) fn parse_variable(&mut self, limit: usize) {
        self.assert_current(SyntaxKind::VarOpen);
        let open = self.current_span();
        self.start_node(SyntaxKind::Variable);
        self.bump();

        if self.pos < limit {
            self.eat_ws();
        }
        if self.pos < limit {
            self.parse_identifier_until(limit);
        } else {
            self.error_msg(DiagnosticKind::ExpectedIdentifier, "expected a variable name");
        }

        if self.pos + 1 < limit
            && self.currently_is(SyntaxKind::Whitespace)
            && self.is_kind_at(self.pos + 1, SyntaxKind::VarClose)
        {
            self.bump();
        }
        if self.pos < limit && self.currently_is(SyntaxKind::VarClose) {
            self.bump();
        } else {
            self.error_unclosed_delimiter(
                DiagnosticKind::UnclosedVariable,
                "expected `}}`",
                "variable starts here",
                open,
            );
        }
        self.finish_node();
    }

    /// End of a path starting at `idx`: stops at unescaped whitespace.
    pub(super) fn path_end(&self, idx: usize) -> usize {
        let mut i = idx;
        loop {
            match self.kind_at(i) {
                Some(SyntaxKind::Backslash) => {
                    let escapes = self
                        .kind_at(i + 1)
                        .is_some_and(|k| k != SyntaxKind::Newline);
                    i += if escapes { 2 } else { 1 };
                }
                Some(SyntaxKind::VarOpen) => {
                    i = self
                        .group_end(i, SyntaxKind::VarClose)
                        .map_or(i + 1, |close| close + 1);
                }
                Some(k) if PATH_TOKENS.contains(k) => i += 1,
                _ => break,
            }
        }
        i
    }

    /// `path := (word | punct | variable | '\' any)+`
    pub(super) fn parse_path(&mut self) -> bool {
        let end = self.path_end(self.pos);
        if end == self.pos {
            self.error_msg(DiagnosticKind::ExpectedPath, "expected a file path");
            return false;
        }
        self.start_node(SyntaxKind::Path);
        self.parse_text_with_variables(end);
        self.finish_node();
        true
    }

    /// `script := '{%' line* '%}'`
    ///
    /// The closing `%}` may sit on its own line or end the last script line.
    pub(super) fn parse_script(&mut self) {
        self.assert_current(SyntaxKind::ScriptOpen);
        let open = self.current_span();
        self.start_node(SyntaxKind::Script);
        self.bump();

        let mut at_line_start = false;
        loop {
            if self.should_stop() || (at_line_start && self.is_separator_line(self.pos)) {
                self.error_unclosed_delimiter(
                    DiagnosticKind::UnclosedScript,
                    "expected `%}`",
                    "script starts here",
                    open,
                );
                break;
            }
            if self.eat_token(SyntaxKind::ScriptClose) {
                break;
            }
            if self.eat_newline() {
                at_line_start = true;
                continue;
            }
            let line_end = self.line_end_from(self.pos);
            let end = self.find_in_line(self.pos, line_end, TokenSet::single(SyntaxKind::ScriptClose));
            self.bump_text(end);
            at_line_start = false;
        }
        self.finish_node();
    }

    pub(super) fn parse_script_or_path(&mut self) {
        if self.currently_is(SyntaxKind::ScriptOpen) {
            self.parse_script();
        } else {
            self.parse_path();
        }
    }

    /// Trailing part of script/path lines: junk is reported, then `NL+`.
    pub(super) fn finish_script_line(&mut self) {
        // An unclosed script already ran to the next separator line.
        if self.at_line_start() {
            return;
        }
        self.eat_ws();
        if !self.at_line_end() {
            self.error_rest_of_line(DiagnosticKind::UnexpectedToken, "unexpected text after the script");
        }
        self.eat_newlines();
    }
}
