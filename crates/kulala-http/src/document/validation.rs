//! Checks that need the whole document: request names.

use indexmap::IndexMap;
use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::ast::Root;

/// Reports `# @name` entries without a value and names used twice.
pub(super) fn validate_request_names(root: &Root, diagnostics: &mut Diagnostics) {
    let mut seen: IndexMap<String, TextRange> = IndexMap::new();

    for section in root.sections() {
        let Some(meta) = section.name_metadata() else {
            continue;
        };

        let Some(value) = meta.value() else {
            let meta_range = meta.as_cst().text_range();
            let range = match meta.name() {
                Some(ident) => TextRange::new(meta_range.start(), ident.as_cst().text_range().end()),
                None => meta_range,
            };
            diagnostics
                .report(DiagnosticKind::EmptyRequestName, range)
                .emit();
            continue;
        };

        let name = value.text();
        let range = value.as_cst().text_range();
        if let Some(&first) = seen.get(&name) {
            diagnostics
                .report(DiagnosticKind::DuplicateRequestName, range)
                .message(name)
                .related_to("first used here", first)
                .emit();
            continue;
        }
        seen.insert(name, range);
    }
}
