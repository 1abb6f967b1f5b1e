//! Source-annotated rendering through `annotate-snippets`.

use std::fmt::{self, Write};
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Patch, Renderer, Snippet};
use rowan::TextRange;

use super::message::{DiagnosticMessage, Severity};

pub struct DiagnosticsPrinter<'s> {
    diagnostics: Vec<DiagnosticMessage>,
    source: &'s str,
    path: Option<&'s str>,
    colored: bool,
}

impl<'s> DiagnosticsPrinter<'s> {
    pub fn new(diagnostics: Vec<DiagnosticMessage>, source: &'s str) -> Self {
        Self {
            diagnostics,
            source,
            path: None,
            colored: false,
        }
    }

    /// File name shown in the `-->` line.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    /// Writes one report per diagnostic, separated by blank lines.
    pub fn format(&self, w: &mut impl Write) -> fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let mut previous: Option<String> = None;
        for diag in &self.diagnostics {
            if let Some(previous) = &previous {
                if !previous.ends_with('\n') {
                    w.write_char('\n')?;
                }
                w.write_char('\n')?;
            }
            let rendered = renderer.render(&self.report(diag));
            w.write_str(&rendered)?;
            previous = Some(rendered);
        }
        Ok(())
    }

    /// Title with the annotated source and hints, plus a patch preview when
    /// the diagnostic has a fix.
    fn report<'a>(&'a self, diag: &'a DiagnosticMessage) -> Vec<Group<'a>> {
        let primary = self.span(diag.range);

        let mut snippet = Snippet::source(self.source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(primary.clone()));
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }
        for related in &diag.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(self.span(related.range))
                    .label(&related.message),
            );
        }

        let title = level(diag.severity()).primary_title(&diag.message).element(snippet);
        let title = diag
            .hints
            .iter()
            .fold(title, |group, hint| group.element(Level::HELP.message(hint)));

        let mut groups = vec![title];
        if let Some(fix) = &diag.fix {
            let preview = Snippet::source(self.source)
                .line_start(1)
                .patch(Patch::new(primary, &fix.replacement));
            groups.push(Level::HELP.secondary_title(&fix.description).element(preview));
        }
        groups
    }

    /// Byte range for annotation. Empty ranges widen to one character so
    /// they stay visible, except at the end of the source.
    fn span(&self, range: TextRange) -> Range<usize> {
        let start = usize::from(range.start());
        let end = usize::from(range.end());
        if start < end {
            start..end
        } else {
            start..(start + 1).min(self.source.len())
        }
    }
}

fn level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}
