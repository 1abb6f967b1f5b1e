//! ANSI styles for tree dumps.

/// Escape sequences per role in a dump. The plain palette has empty strings,
/// so callers can interpolate unconditionally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Node kind names.
    pub node: &'static str,
    /// Token text.
    pub token: &'static str,
    /// Source ranges.
    pub span: &'static str,
    pub reset: &'static str,
}

impl Default for Palette {
    fn default() -> Self {
        Self::PLAIN
    }
}

impl Palette {
    /// Standard 16-color codes: blue kinds, green text, dim spans.
    pub const ANSI: Self = Self {
        node: "\x1b[34m",
        token: "\x1b[32m",
        span: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const PLAIN: Self = Self {
        node: "",
        token: "",
        span: "",
        reset: "",
    };

    pub fn new(colored: bool) -> Self {
        if colored { Self::ANSI } else { Self::PLAIN }
    }

    pub fn is_colored(&self) -> bool {
        !self.reset.is_empty()
    }
}
