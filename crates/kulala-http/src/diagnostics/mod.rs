//! Syntax diagnostics.
//!
//! The parser reports every problem it meets; [`Diagnostics::filtered`]
//! drops the ones that are only fallout of an earlier problem before they
//! reach the user.

mod message;
mod printer;

#[cfg(test)]
mod tests;

use rowan::TextRange;

pub use message::{DiagnosticClass, DiagnosticKind, DiagnosticMessage, Fix, RelatedInfo, Severity};
pub use printer::DiagnosticsPrinter;

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

/// Pending diagnostic. Nothing is recorded until [`emit`](Self::emit).
#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    sink: &'a mut Vec<DiagnosticMessage>,
    pending: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a diagnostic carrying the kind's fallback message.
    pub fn report(&mut self, kind: DiagnosticKind, range: TextRange) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            sink: &mut self.messages,
            pending: DiagnosticMessage::new(kind, range),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warning_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    fn count(&self, severity: Severity) -> usize {
        self.iter().filter(|m| m.severity() == severity).count()
    }

    /// Everything reported, in report order.
    pub fn raw(&self) -> &[DiagnosticMessage] {
        &self.messages
    }

    /// Reported diagnostics minus those shadowed by another kept one.
    ///
    /// See [`shadows`] for when one diagnostic hides another. Earlier
    /// reports get the first chance to shadow.
    pub fn filtered(&self) -> Vec<DiagnosticMessage> {
        let all = &self.messages;
        let mut kept = vec![true; all.len()];

        for (i, a) in all.iter().enumerate() {
            for (j, b) in all.iter().enumerate() {
                if i != j && kept[i] && kept[j] && shadows(a, b) {
                    kept[j] = false;
                }
            }
        }

        all.iter()
            .zip(kept)
            .filter_map(|(m, keep)| keep.then(|| m.clone()))
            .collect()
    }

    pub fn printer<'s>(&self, source: &'s str) -> DiagnosticsPrinter<'s> {
        DiagnosticsPrinter::new(self.messages.clone(), source)
    }

    pub fn filtered_printer<'s>(&self, source: &'s str) -> DiagnosticsPrinter<'s> {
        DiagnosticsPrinter::new(self.filtered(), source)
    }

    pub fn render(&self, source: &str) -> String {
        self.printer(source).render()
    }

    pub fn render_filtered(&self, source: &str) -> String {
        self.filtered_printer(source).render()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl DiagnosticBuilder<'_> {
    /// Detail folded into the kind's wording, see [`DiagnosticKind::message`].
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        self.pending.message = self.pending.kind.message(Some(&detail.into()));
        self
    }

    pub fn related_to(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.pending.related.push(RelatedInfo::new(range, message));
        self
    }

    pub fn fix(mut self, description: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.pending.fix = Some(Fix::new(replacement, description));
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.pending.hints.push(hint.into());
        self
    }

    pub fn emit(self) {
        self.sink.push(self.pending);
    }
}

/// Whether `a` hides `b`.
///
/// A diagnostic hides a lower-priority one whose range it strictly contains
/// (starting later, ending no later). At the same start, a missing-input
/// error hides an unclosed-delimiter error, never the other way round, and
/// otherwise priority decides.
fn shadows(a: &DiagnosticMessage, b: &DiagnosticMessage) -> bool {
    let (outer, inner) = (a.range, b.range);
    if outer.start() < inner.start() && inner.end() <= outer.end() {
        return a.kind.suppresses(&b.kind);
    }
    if outer.start() != inner.start() {
        return false;
    }
    match (a.kind.class(), b.kind.class()) {
        (DiagnosticClass::Unclosed, DiagnosticClass::Missing) => false,
        (DiagnosticClass::Missing, DiagnosticClass::Unclosed) => true,
        _ => a.kind.suppresses(&b.kind),
    }
}
