//! Loading request text from a file, stdin or the command line.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use kulala_http::Document;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("source required: use a positional FILE or -s/--source")]
    Missing,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{}': {source}", path.display())]
    File { path: PathBuf, source: io::Error },
}

/// Where the request text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceInput {
    pub path: Option<PathBuf>,
    pub text: Option<String>,
}

impl SourceInput {
    pub fn new(path: Option<PathBuf>, text: Option<String>) -> Self {
        Self { path, text }
    }

    /// Name shown in diagnostics.
    pub fn label(&self) -> String {
        match (&self.text, &self.path) {
            (Some(_), _) => "<inline>".to_string(),
            (None, Some(path)) if is_stdin(path) => "<stdin>".to_string(),
            (None, Some(path)) => path.display().to_string(),
            (None, None) => "<unknown>".to_string(),
        }
    }

    pub fn load(&self) -> Result<String, LoadError> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        let Some(path) = &self.path else {
            return Err(LoadError::Missing);
        };
        if is_stdin(path) {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(LoadError::Stdin)?;
            return Ok(buf);
        }
        let content = fs::read_to_string(path).map_err(|source| LoadError::File {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), len = content.len(), "source loaded");
        Ok(content)
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Loads the source or exits with status 1.
pub fn load_or_exit(input: &SourceInput) -> String {
    input.load().unwrap_or_else(|e| fail(e))
}

/// Parses the source or exits with status 1 when a fuel limit is hit.
pub fn parse_or_exit(source: &str) -> Document<'_> {
    Document::parse(source).unwrap_or_else(|e| fail(e))
}

pub fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", message);
    std::process::exit(1);
}
