use kulala_http::Document;

use super::source::{SourceInput, load_or_exit, parse_or_exit};

pub struct CheckArgs {
    pub input: SourceInput,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = load_or_exit(&args.input);
    let document = parse_or_exit(&source);

    if let Err(report) = check(&document, &args.input.label(), args.strict, args.color) {
        eprint!("{}", report);
        std::process::exit(1);
    }

    // Silent on success
}

/// Rendered diagnostics when the document does not pass.
pub fn check(document: &Document<'_>, label: &str, strict: bool, color: bool) -> Result<(), String> {
    let diagnostics = document.diagnostics();
    let valid = if strict {
        !diagnostics.has_errors() && !diagnostics.has_warnings()
    } else {
        document.is_valid()
    };
    tracing::debug!(
        valid,
        strict,
        errors = diagnostics.error_count(),
        warnings = diagnostics.warning_count(),
        "checked {}",
        label
    );
    if valid {
        return Ok(());
    }

    Err(diagnostics
        .filtered_printer(document.source())
        .path(label)
        .colored(color)
        .render())
}
