//! Token and node kinds, and the rowan language tag.
//!
//! Token variants carry logos attributes; node variants have none and are
//! only produced by the parser.

use logos::Logos;
use rowan::Language;

/// Tokens first, then nodes, then the `__LAST` sentinel.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    #[token("(")]
    ParenOpen = 0,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    /// `{{` opening a variable reference
    #[token("{{")]
    VarOpen,

    #[token("}}")]
    VarClose,

    /// `{%` opening an inline script
    #[token("{%")]
    ScriptOpen,

    #[token("%}")]
    ScriptClose,

    /// Request separator: three or more `#`
    #[regex("###+")]
    SeparatorMarker,

    #[token("#")]
    Hash,

    #[token("//")]
    DoubleSlash,

    #[token("/")]
    Slash,

    #[token("\\")]
    Backslash,

    #[token("@")]
    At,

    #[token("=")]
    Equals,

    #[token(":")]
    Colon,

    #[token("?")]
    Question,

    #[token("&")]
    Ampersand,

    #[token(",")]
    Comma,

    #[token("%")]
    Percent,

    #[token("<")]
    LAngle,

    #[token(">")]
    RAngle,

    /// Response redirect: `>>` or `>>!` (overwrite)
    #[token(">>")]
    #[token(">>!")]
    RedirectMarker,

    /// Multipart boundary prefix
    #[token("--")]
    DoubleDash,

    #[token("-")]
    Dash,

    #[regex(r"[\p{L}\p{N}_$.]+")]
    Word,

    /// Any other single visible character
    #[regex(r"[^\s\p{L}\p{N}_$.#/\\@=:?&,%<>()\[\]{}\-]")]
    Punct,

    #[regex(r"[\t\p{Zs}]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    #[token("\r")]
    Newline,

    /// Coalesced unrecognized characters
    Garbage,
    /// Run of tokens merged by the parser (raw body lines, versions, script lines)
    Text,
    Error,

    // --- Node kinds (non-terminals) ---
    Document,
    Section,
    RequestSeparator,
    Comment,
    Metadata,
    VariableDeclaration,
    VariableDeclarationInline,
    Command,
    CommandName,
    PreRequestScript,
    ResHandlerScript,
    ResRedirect,
    Script,
    Path,
    Request,
    Response,
    Method,
    TargetUrl,
    HttpVersion,
    StatusCode,
    StatusText,
    QueryString,
    QueryParamContinuation,
    QueryParam,
    QueryParamName,
    QueryParamValue,
    Fragment,
    Operator,
    Header,
    HeaderEntity,
    Value,
    Variable,
    Identifier,
    XmlBody,
    JsonBody,
    GraphqlBody,
    GraphqlData,
    FormUrlencodedBody,
    FormParam,
    FormParamName,
    FormParamValue,
    ExternalBody,
    MultipartFormData,
    MultipartBoundaryFirst,
    MultipartBoundary,
    MultipartBoundaryLast,
    BoundaryValue,
    MultipartContentLine,
    MultipartExternalBody,
    RawBody,

    // Must be last - used for bounds checking in `kind_from_raw`
    #[doc(hidden)]
    __LAST,
}

use SyntaxKind::*;

impl SyntaxKind {
    /// Kinds from here on are built by the parser; earlier ones come from the lexer.
    pub const FIRST_NODE: SyntaxKind = Document;

    #[inline]
    pub fn is_token(self) -> bool {
        self < Self::FIRST_NODE
    }

    #[inline]
    pub fn is_node(self) -> bool {
        (Self::FIRST_NODE..__LAST).contains(&self)
    }

    /// Whitespace and line breaks. The grammar has no extras, so these are
    /// ordinary tokens for the parser and only hidden by printers.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Whitespace | Newline)
    }

    #[inline]
    pub fn is_error(self) -> bool {
        matches!(self, Error | Garbage)
    }

    pub fn from_raw(raw: u16) -> Option<SyntaxKind> {
        if raw >= __LAST as u16 {
            return None;
        }
        // SAFETY: `raw` is a declared discriminant of this repr(u16) enum
        Some(unsafe { std::mem::transmute::<u16, SyntaxKind>(raw) })
    }

    /// Node kinds in declaration order.
    pub fn node_kinds() -> impl Iterator<Item = SyntaxKind> {
        (Self::FIRST_NODE as u16..__LAST as u16).filter_map(Self::from_raw)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpLang {}

impl Language for HttpLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> SyntaxKind {
        SyntaxKind::from_raw(raw.0).expect("rowan kinds are created from SyntaxKind")
    }

    fn kind_to_raw(kind: SyntaxKind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<HttpLang>;
pub type SyntaxToken = rowan::SyntaxToken<HttpLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;

/// Set of token kinds, one bit per discriminant. Only tokens fit.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u64);

const fn bit(kind: SyntaxKind) -> u64 {
    let raw = kind as u16;
    assert!(raw < 64, "TokenSet holds token kinds only");
    1 << raw
}

impl TokenSet {
    pub const fn new(kinds: &[SyntaxKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= bit(kinds[i]);
            i += 1;
        }
        TokenSet(bits)
    }

    pub const fn single(kind: SyntaxKind) -> Self {
        TokenSet(bit(kind))
    }

    #[inline]
    pub const fn contains(&self, kind: SyntaxKind) -> bool {
        let raw = kind as u16;
        raw < 64 && self.0 & (1 << raw) != 0
    }

    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kinds = (0..64u16)
            .filter_map(SyntaxKind::from_raw)
            .filter(|&kind| self.contains(kind));
        f.debug_set().entries(kinds).finish()
    }
}

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    /// Tokens that may appear inside a path (no unescaped whitespace).
    pub const PATH_TOKENS: TokenSet = TokenSet::new(&[
        ParenOpen,
        ParenClose,
        BracketOpen,
        BracketClose,
        BraceOpen,
        BraceClose,
        VarClose,
        ScriptClose,
        SeparatorMarker,
        Hash,
        DoubleSlash,
        Slash,
        At,
        Equals,
        Colon,
        Question,
        Ampersand,
        Comma,
        Percent,
        LAngle,
        RAngle,
        RedirectMarker,
        DoubleDash,
        Dash,
        Word,
        Punct,
        Garbage,
    ]);

    /// Line comment prefixes.
    pub const COMMENT_PREFIX: TokenSet = TokenSet::new(&[Hash, DoubleSlash]);

    /// Characters accepted in a header name (`[\w-]+`).
    pub const HEADER_NAME: TokenSet = TokenSet::new(&[Word, Dash, DoubleDash]);

    /// Tokens that end a query parameter name.
    pub const QUERY_NAME_END: TokenSet =
        TokenSet::new(&[Equals, Ampersand, Hash, SeparatorMarker, Newline]);

    /// Tokens that end a query or form parameter value.
    pub const PARAM_VALUE_END: TokenSet =
        TokenSet::new(&[Ampersand, Hash, SeparatorMarker, Newline]);

    /// Identifier pieces outside of brackets.
    pub const IDENTIFIER_TOKENS: TokenSet = TokenSet::new(&[Word, Dash, DoubleDash]);

    /// First characters of a JSON body.
    pub const JSON_FIRST: TokenSet = TokenSet::new(&[BraceOpen, BracketOpen]);
}
