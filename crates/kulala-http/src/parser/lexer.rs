//! Tokenizer for `.http` files.
//!
//! Tokens carry a kind and a range; their text stays in the source. Runs of
//! characters no rule accepts become one `Garbage` token each, so a stray
//! form feed costs a single token however long the run.

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::cst::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

fn offset(at: usize) -> TextSize {
    TextSize::try_from(at).expect("sources are limited to u32::MAX bytes")
}

pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for (result, range) in SyntaxKind::lexer(source).spanned() {
        let span = TextRange::new(offset(range.start), offset(range.end));
        let kind = result.unwrap_or(SyntaxKind::Garbage);

        match tokens.last_mut() {
            // Error spans are adjacent, so extending the previous one merges the run
            Some(prev) if kind == SyntaxKind::Garbage && prev.kind == SyntaxKind::Garbage => {
                prev.span = prev.span.cover(span);
            }
            _ => tokens.push(Token { kind, span }),
        }
        if kind == SyntaxKind::Dash {
            end_dash_run_with_pair(&mut tokens);
        }
    }

    tokens
}

/// Mid-line, `--` followed by `-` becomes `-` then `--`, so a dash run after
/// text always ends with `--` (the closing multipart boundary `--abc---`).
/// At line start the run keeps its leading `--`.
fn end_dash_run_with_pair(tokens: &mut [Token]) {
    let [.., before, double, dash] = tokens else {
        return;
    };
    if double.kind != SyntaxKind::DoubleDash || before.kind == SyntaxKind::Newline {
        return;
    }
    let start = double.span.start();
    let split = start + TextSize::from(1);
    double.kind = SyntaxKind::Dash;
    double.span = TextRange::new(start, split);
    dash.kind = SyntaxKind::DoubleDash;
    dash.span = TextRange::new(split, dash.span.end());
}

#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[token.span]
}
