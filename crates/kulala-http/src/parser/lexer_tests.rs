use super::cst::SyntaxKind::{self, *};
use super::lexer::{lex, token_text};

fn kinds(source: &str) -> Vec<SyntaxKind> {
    lex(source).iter().map(|t| t.kind).collect()
}

fn pairs(source: &str) -> Vec<(SyntaxKind, &str)> {
    lex(source)
        .iter()
        .map(|t| (t.kind, token_text(source, t)))
        .collect()
}

#[test]
fn request_line() {
    assert_eq!(
        pairs("GET https://example.com/api?id=1 HTTP/1.1\n"),
        vec![
            (Word, "GET"),
            (Whitespace, " "),
            (Word, "https"),
            (Colon, ":"),
            (DoubleSlash, "//"),
            (Word, "example.com"),
            (Slash, "/"),
            (Word, "api"),
            (Question, "?"),
            (Word, "id"),
            (Equals, "="),
            (Word, "1"),
            (Whitespace, " "),
            (Word, "HTTP"),
            (Slash, "/"),
            (Word, "1.1"),
            (Newline, "\n"),
        ]
    );
}

#[test]
fn separator_and_hash() {
    assert_eq!(kinds("###"), vec![SeparatorMarker]);
    assert_eq!(kinds("#####"), vec![SeparatorMarker]);
    assert_eq!(kinds("##"), vec![Hash, Hash]);
    assert_eq!(kinds("# @name"), vec![Hash, Whitespace, At, Word]);
}

#[test]
fn variable_braces() {
    assert_eq!(
        pairs("{{ $uuid }}"),
        vec![
            (VarOpen, "{{"),
            (Whitespace, " "),
            (Word, "$uuid"),
            (Whitespace, " "),
            (VarClose, "}}"),
        ]
    );
    assert_eq!(kinds("{}}"), vec![BraceOpen, VarClose]);
    assert_eq!(kinds("{{{"), vec![VarOpen, BraceOpen]);
}

#[test]
fn script_delimiters() {
    assert_eq!(kinds("{%"), vec![ScriptOpen]);
    assert_eq!(kinds("%}"), vec![ScriptClose]);
    assert_eq!(kinds("100%"), vec![Word, Percent]);
}

#[test]
fn redirect_markers() {
    assert_eq!(kinds(">> out.json"), vec![RedirectMarker, Whitespace, Word]);
    assert_eq!(pairs(">>!")[0], (RedirectMarker, ">>!"));
    assert_eq!(kinds("> x"), vec![RAngle, Whitespace, Word]);
}

#[test]
fn dashes() {
    assert_eq!(kinds("--boundary"), vec![DoubleDash, Word]);
    assert_eq!(kinds("---"), vec![DoubleDash, Dash]);
    assert_eq!(kinds("Content-Type"), vec![Word, Dash, Word]);
}

#[test]
fn dash_run_after_text_ends_with_pair() {
    assert_eq!(pairs("--abc---"), vec![(DoubleDash, "--"), (Word, "abc"), (Dash, "-"), (DoubleDash, "--")]);
    assert_eq!(
        pairs("x-----"),
        vec![(Word, "x"), (DoubleDash, "--"), (Dash, "-"), (DoubleDash, "--")]
    );
    assert_eq!(kinds("a\n---"), vec![Word, Newline, DoubleDash, Dash]);
}

#[test]
fn punctuation_is_single_char() {
    assert_eq!(
        pairs("\"a\";!"),
        vec![
            (Punct, "\""),
            (Word, "a"),
            (Punct, "\""),
            (Punct, ";"),
            (Punct, "!"),
        ]
    );
}

#[test]
fn newline_variants() {
    assert_eq!(kinds("a\r\nb\rc\n"), vec![Word, Newline, Word, Newline, Word, Newline]);
    assert_eq!(pairs("\r\n")[0], (Newline, "\r\n"));
}

#[test]
fn unicode_words_and_spaces() {
    assert_eq!(pairs("héllo\u{00A0}мир"), vec![
        (Word, "héllo"),
        (Whitespace, "\u{00A0}"),
        (Word, "мир"),
    ]);
}

#[test]
fn garbage_is_coalesced() {
    assert_eq!(
        pairs("a\u{000B}\u{000C}b"),
        vec![(Word, "a"), (Garbage, "\u{000B}\u{000C}"), (Word, "b")]
    );
    assert_eq!(kinds("\u{000C}"), vec![Garbage]);
}

#[test]
fn spans_cover_source() {
    let source = "POST {{host}}/x\nContent-Type: application/json\n\n{\"a\": 1}\n";
    let tokens = lex(source);
    let rebuilt: String = tokens.iter().map(|t| token_text(source, t)).collect();
    assert_eq!(rebuilt, source);
}

#[test]
fn empty_source() {
    assert!(lex("").is_empty());
}
