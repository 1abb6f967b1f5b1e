//! Parser state and the primitives the grammar is written in.
//!
//! The grammar is line oriented, so besides the usual token cursor the parser
//! offers raw lookahead over token indices (`kind_at`, `line_end_from`, ...)
//! that does not count against the progress guard.

use std::cell::Cell;

use rowan::{GreenNodeBuilder, TextRange, TextSize};

use super::ast::Root;
use super::cst::{SyntaxKind, SyntaxNode, TokenSet};
use super::lexer::{Token, token_text};
use crate::Error;
use crate::diagnostics::{DiagnosticBuilder, DiagnosticKind, Diagnostics};

/// Cursor queries allowed between two consumed tokens before the parser is
/// considered stuck.
const STALL_LIMIT: u32 = 256;

#[derive(Debug)]
pub struct ParseResult {
    pub root: Root,
    pub diagnostics: Diagnostics,
    pub exec_fuel_consumed: u32,
}

/// Resource limits for one parse. `None` means unlimited.
#[derive(Debug, Default)]
struct Budget {
    exec_limit: Option<u32>,
    exec_used: u32,
    depth_limit: Option<u32>,
    depth: u32,
}

impl Budget {
    /// Charges `tokens` consumed tokens. Fails once the limit is passed.
    fn charge(&mut self, tokens: u32) -> Result<(), Error> {
        let used = self.exec_used.saturating_add(tokens);
        match self.exec_limit {
            Some(limit) if used > limit => {
                self.exec_used = limit;
                Err(Error::ExecFuelExhausted)
            }
            _ => {
                self.exec_used = used;
                Ok(())
            }
        }
    }

    fn descend(&mut self) -> Result<(), Error> {
        if self.depth_limit.is_some_and(|limit| self.depth >= limit) {
            return Err(Error::RecursionLimitExceeded);
        }
        self.depth += 1;
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

pub struct Parser<'src> {
    pub(super) source: &'src str,
    pub(super) tokens: Vec<Token>,
    pub(super) pos: usize,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Diagnostics,
    budget: Budget,
    /// First fatal error; the parse unwinds once it is set.
    fatal: Option<Error>,
    /// Start of the last reported range. A second report there is dropped.
    last_report: Option<TextSize>,
    pub(super) stall: Cell<u32>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            diagnostics: Diagnostics::new(),
            budget: Budget::default(),
            fatal: None,
            last_report: None,
            stall: Cell::new(STALL_LIMIT),
        }
    }

    /// Caps the number of tokens the parser may consume.
    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.budget.exec_limit = limit;
        self
    }

    /// Caps the nesting of sections, requests and bodies.
    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.budget.depth_limit = limit;
        self
    }

    pub fn parse(mut self) -> Result<ParseResult, Error> {
        self.parse_root();
        if let Some(err) = self.fatal {
            return Err(err);
        }
        let green = self.builder.finish();
        let root = Root::cast(SyntaxNode::new_root(green)).expect("parser always produces Document");
        Ok(ParseResult {
            root,
            diagnostics: self.diagnostics,
            exec_fuel_consumed: self.budget.exec_used,
        })
    }

    fn fail(&mut self, result: Result<(), Error>) -> bool {
        match result {
            Ok(()) => true,
            Err(err) => {
                self.fatal.get_or_insert(err);
                false
            }
        }
    }

    fn made_progress(&self) {
        self.stall.set(STALL_LIMIT);
    }

    // Cursor

    pub(super) fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    pub(super) fn nth(&self, lookahead: usize) -> SyntaxKind {
        self.ensure_progress();
        self.kind_at(self.pos + lookahead).unwrap_or(SyntaxKind::Error)
    }

    pub(super) fn nth_text(&self, lookahead: usize) -> &'src str {
        self.text_at(self.pos + lookahead)
    }

    pub(super) fn current_span(&self) -> TextRange {
        match self.tokens.get(self.pos) {
            Some(token) => token.span,
            None => TextRange::empty(self.eof_offset()),
        }
    }

    pub(super) fn eof_offset(&self) -> TextSize {
        TextSize::of(self.source)
    }

    pub(super) fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(super) fn should_stop(&self) -> bool {
        self.eof() || self.fatal.is_some()
    }

    pub(super) fn currently_is(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    pub(super) fn at_line_start(&self) -> bool {
        self.pos == 0 || self.is_kind_at(self.pos - 1, SyntaxKind::Newline)
    }

    pub(super) fn at_line_end(&self) -> bool {
        self.eof() || self.currently_is(SyntaxKind::Newline)
    }

    // Lookahead by token index

    pub(super) fn kind_at(&self, idx: usize) -> Option<SyntaxKind> {
        self.tokens.get(idx).map(|t| t.kind)
    }

    pub(super) fn is_kind_at(&self, idx: usize, kind: SyntaxKind) -> bool {
        self.kind_at(idx) == Some(kind)
    }

    pub(super) fn text_at(&self, idx: usize) -> &'src str {
        self.tokens.get(idx).map_or("", |t| token_text(self.source, t))
    }

    /// Source text covered by tokens `start..end`.
    pub(super) fn text_between(&self, start: usize, end: usize) -> &'src str {
        let range = self.span_between(start, end);
        &self.source[range]
    }

    /// Range covered by tokens `start..end`; empty at `start` when there are none.
    pub(super) fn span_between(&self, start: usize, end: usize) -> TextRange {
        let end = end.min(self.tokens.len());
        if start >= end {
            let at = self.tokens.get(start).map_or(self.eof_offset(), |t| t.span.start());
            return TextRange::empty(at);
        }
        self.tokens[start].span.cover(self.tokens[end - 1].span)
    }

    /// First index at or after `idx` that is not whitespace.
    pub(super) fn skip_ws_from(&self, idx: usize) -> usize {
        (idx..)
            .find(|&i| !self.is_kind_at(i, SyntaxKind::Whitespace))
            .unwrap_or(idx)
    }

    /// Index of the newline ending the line that contains `idx`, or the token count.
    pub(super) fn line_end_from(&self, idx: usize) -> usize {
        self.tokens
            .iter()
            .skip(idx)
            .position(|t| t.kind == SyntaxKind::Newline)
            .map_or(self.tokens.len().max(idx), |offset| idx + offset)
    }

    /// Index of the first token of the next line.
    pub(super) fn next_line_start(&self, idx: usize) -> usize {
        (self.line_end_from(idx) + 1).min(self.tokens.len())
    }

    /// End of `start..end` with trailing whitespace dropped.
    pub(super) fn trim_ws_end(&self, start: usize, end: usize) -> usize {
        let mut end = end;
        while end > start && self.is_kind_at(end - 1, SyntaxKind::Whitespace) {
            end -= 1;
        }
        end
    }

    pub(super) fn line_is_blank(&self, idx: usize) -> bool {
        let i = self.skip_ws_from(idx);
        self.kind_at(i).is_none_or(|k| k == SyntaxKind::Newline)
    }

    /// Whether the line starting at `idx` opens a new section.
    pub(super) fn is_separator_line(&self, idx: usize) -> bool {
        self.is_kind_at(idx, SyntaxKind::SeparatorMarker)
    }

    /// First index in `start..end` whose kind is in `set`, or `end`.
    pub(super) fn find_in_line(&self, start: usize, end: usize, set: TokenSet) -> usize {
        (start..end)
            .find(|&i| self.kind_at(i).is_some_and(|k| set.contains(k)))
            .unwrap_or(end)
    }

    // Tree building

    pub(super) fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    pub(super) fn bump(&mut self) {
        assert!(!self.eof(), "bump called at EOF");
        let token = self.tokens[self.pos];
        self.emit_token(token.kind, self.pos + 1);
    }

    /// Emits tokens `pos..end` as one token of `kind`, charging each of them.
    fn emit_token(&mut self, kind: SyntaxKind, end: usize) {
        let count = (end - self.pos) as u32;
        let charged = self.budget.charge(count);
        self.fail(charged);
        self.made_progress();

        let text = self.text_between(self.pos, end);
        self.builder.token(kind.into(), text);
        self.pos = end;
    }

    /// Merges `pos..end` into one `Text` token. Returns `false` for an empty range.
    pub(super) fn bump_text(&mut self, end: usize) -> bool {
        let end = end.min(self.tokens.len());
        if end <= self.pos {
            return false;
        }
        self.emit_token(SyntaxKind::Text, end);
        true
    }

    /// Wraps `pos..end` into a leaf node holding one `Text` token.
    pub(super) fn leaf(&mut self, kind: SyntaxKind, end: usize) {
        self.start_node(kind);
        self.bump_text(end);
        self.finish_node();
    }

    pub(super) fn eat_token(&mut self, kind: SyntaxKind) -> bool {
        let matched = !self.eof() && self.currently_is(kind);
        if matched {
            self.bump();
        }
        matched
    }

    pub(super) fn eat_ws(&mut self) -> bool {
        self.eat_token(SyntaxKind::Whitespace)
    }

    pub(super) fn eat_newline(&mut self) -> bool {
        self.eat_token(SyntaxKind::Newline)
    }

    pub(super) fn eat_newlines(&mut self) {
        while self.eat_newline() {}
    }

    /// Consumes a whitespace-only line including its terminator.
    pub(super) fn eat_blank_line(&mut self) {
        self.eat_ws();
        self.eat_newline();
    }

    /// Wraps an operator token (`?`, `&`, `=`, `#`) in an `Operator` node.
    pub(super) fn bump_operator(&mut self) {
        self.start_node(SyntaxKind::Operator);
        self.bump();
        self.finish_node();
    }

    /// Wraps `pos..end` in an `Error` node without reporting.
    pub(super) fn bump_error_until(&mut self, end: usize) {
        if end <= self.pos {
            return;
        }
        self.start_node(SyntaxKind::Error);
        self.bump_text(end);
        self.finish_node();
    }

    // Diagnostics

    /// Starts a diagnostic with `message` as detail, unless one was already
    /// reported at the same start offset.
    pub(super) fn diagnostic(
        &mut self,
        kind: DiagnosticKind,
        range: TextRange,
        message: impl Into<String>,
    ) -> Option<DiagnosticBuilder<'_>> {
        if self.last_report.replace(range.start()) == Some(range.start()) {
            return None;
        }
        Some(self.diagnostics.report(kind, range).message(message))
    }

    pub(super) fn error_at(&mut self, kind: DiagnosticKind, range: TextRange, message: impl Into<String>) {
        if let Some(diagnostic) = self.diagnostic(kind, range, message) {
            diagnostic.emit();
        }
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let range = self.current_span();
        self.error_at(kind, range, message);
    }

    /// Consumes `kind` or reports `expected {what}` without consuming.
    pub(super) fn expect(&mut self, kind: SyntaxKind, diagnostic: DiagnosticKind, what: &str) -> bool {
        if self.eat_token(kind) {
            return true;
        }
        self.error_msg(diagnostic, format!("expected {what}"));
        false
    }

    /// Reports the rest of the line and wraps it in an `Error` node. The line
    /// terminator stays outside.
    pub(super) fn error_rest_of_line(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let end = self.line_end_from(self.pos);
        let range = if end > self.pos {
            self.span_between(self.pos, end)
        } else {
            self.current_span()
        };
        self.error_at(kind, range, message);
        self.bump_error_until(end);
    }

    /// Reports a construct left open at the cursor. The range runs from the
    /// opener to the cursor and the opener is attached as related info.
    pub(super) fn error_unclosed_delimiter(
        &mut self,
        kind: DiagnosticKind,
        message: impl Into<String>,
        related: impl Into<String>,
        open: TextRange,
    ) {
        let cursor = self.current_span().start();
        if self.last_report.replace(cursor) == Some(cursor) {
            return;
        }
        let range = TextRange::new(open.start(), cursor.max(open.end()));
        self.diagnostics
            .report(kind, range)
            .message(message)
            .related_to(related, open)
            .emit();
    }

    // Recursion

    pub(super) fn enter_recursion(&mut self) -> bool {
        let entered = self.budget.descend();
        self.made_progress();
        self.fail(entered)
    }

    pub(super) fn exit_recursion(&mut self) {
        self.budget.ascend();
        self.made_progress();
    }
}
