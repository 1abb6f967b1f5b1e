use std::fmt;

use rowan::TextRange;

/// What went wrong. Declaration order is priority order: when two
/// diagnostics collide, the earlier kind wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    UnclosedVariable,
    UnclosedScript,
    UnclosedMultipart,

    ExpectedUrl,
    ExpectedIdentifier,
    ExpectedValue,
    ExpectedPath,
    ExpectedStatusCode,
    ExpectedColon,
    ExpectedEquals,
    ExpectedCloseParen,

    InvalidHeaderName,
    UnexpectedLine,
    UnexpectedToken,

    UnknownMethod,
    EmptyRequestName,
    DuplicateRequestName,
}

/// Coarse grouping of kinds used by severity and suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticClass {
    /// An opening delimiter without its closer. Reported at the opener and
    /// swallows the rest of the section.
    Unclosed,
    /// Something required is absent.
    Missing,
    /// Something present does not belong.
    Unexpected,
    /// Well-formed input that is probably a mistake.
    Lint,
}

impl DiagnosticKind {
    pub fn class(&self) -> DiagnosticClass {
        use DiagnosticKind::*;
        match self {
            UnclosedVariable | UnclosedScript | UnclosedMultipart => DiagnosticClass::Unclosed,
            ExpectedUrl | ExpectedIdentifier | ExpectedValue | ExpectedPath
            | ExpectedStatusCode | ExpectedColon | ExpectedEquals | ExpectedCloseParen => {
                DiagnosticClass::Missing
            }
            InvalidHeaderName | UnexpectedLine | UnexpectedToken => DiagnosticClass::Unexpected,
            UnknownMethod | EmptyRequestName | DuplicateRequestName => DiagnosticClass::Lint,
        }
    }

    pub fn default_severity(&self) -> Severity {
        if self.class() == DiagnosticClass::Lint {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    /// Hint attached to every diagnostic of this kind.
    pub fn default_hint(&self) -> Option<&'static str> {
        Some(match self {
            Self::UnclosedMultipart => "end the body with `--<boundary>--`",
            Self::ExpectedStatusCode => "e.g., `HTTP/1.1 200 OK`",
            Self::EmptyRequestName => "e.g., `# @name get_users`",
            _ => return None,
        })
    }

    /// Message used when the reporter gives no detail.
    pub fn fallback_message(&self) -> &'static str {
        use DiagnosticKind::*;
        match self {
            UnclosedVariable => "unclosed variable",
            UnclosedScript => "unclosed script",
            UnclosedMultipart => "unclosed multipart body",
            ExpectedUrl => "expected a URL",
            ExpectedIdentifier => "expected a name",
            ExpectedValue => "expected a value",
            ExpectedPath => "expected a file path",
            ExpectedStatusCode => "expected a status code",
            ExpectedColon => "expected `:`",
            ExpectedEquals => "expected `=`",
            ExpectedCloseParen => "expected `)`",
            InvalidHeaderName => "invalid header name",
            UnexpectedLine => "unexpected line",
            UnexpectedToken => "unexpected token",
            UnknownMethod => "unknown method",
            EmptyRequestName => "request name is empty",
            DuplicateRequestName => "duplicate request name",
        }
    }

    /// Final message text, folding the reporter's detail into the kind's wording.
    ///
    /// Kinds without their own wording take the detail as the whole sentence.
    pub fn message(&self, detail: Option<&str>) -> String {
        let Some(detail) = detail else {
            return self.fallback_message().to_string();
        };
        match self {
            Self::UnclosedVariable | Self::UnclosedScript | Self::UnclosedMultipart => {
                format!("{}; {detail}", self.fallback_message())
            }
            Self::InvalidHeaderName => format!("`{detail}` is not a valid header name"),
            Self::DuplicateRequestName => format!("request name `{detail}` is already used"),
            Self::UnknownMethod => format!("unknown method: {detail}"),
            Self::EmptyRequestName => self.fallback_message().to_string(),
            _ => detail.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// Suggested edit: replace the diagnostic's range with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fix {
    pub(crate) replacement: String,
    pub(crate) description: String,
}

impl Fix {
    pub fn new(replacement: impl Into<String>, description: impl Into<String>) -> Self {
        Fix {
            replacement: replacement.into(),
            description: description.into(),
        }
    }
}

/// A secondary location, such as the opening delimiter of an unclosed construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        RelatedInfo {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) fix: Option<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange) -> Self {
        DiagnosticMessage {
            kind,
            range,
            message: kind.fallback_message().to_string(),
            fix: None,
            related: Vec::new(),
            hints: kind.default_hint().into_iter().map(String::from).collect(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn fix(&self) -> Option<&Fix> {
        self.fix.as_ref()
    }

    pub fn related(&self) -> &[RelatedInfo] {
        &self.related
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

struct Span(TextRange);

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", u32::from(self.0.start()), u32::from(self.0.end()))
    }
}

/// One line: `severity at start..end: message`, then fix, related and hints
/// in parentheses.
impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.severity(), Span(self.range), self.message)?;
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {})", fix.description)?;
        }
        for related in &self.related {
            write!(f, " (related: {} at {})", related.message, Span(related.range))?;
        }
        self.hints
            .iter()
            .try_for_each(|hint| write!(f, " (hint: {hint})"))
    }
}
