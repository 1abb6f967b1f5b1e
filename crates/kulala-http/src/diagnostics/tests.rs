use rowan::TextRange;

use super::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(start.into(), end.into())
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::ExpectedUrl, range(0, 5)).emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.raw()[0].message(), "expected a URL");
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::InvalidHeaderName, range(0, 5))
        .message("X Y")
        .emit();

    assert_eq!(diagnostics.raw()[0].message(), "`X Y` is not a valid header name");
}

#[test]
fn warnings_are_not_errors() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateRequestName, range(0, 5))
        .message("login")
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 0);
}

#[test]
fn builder_with_related() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedVariable, range(0, 5))
        .message("primary")
        .related_to("related info", range(6, 10))
        .emit();

    let result = diagnostics.printer("hello world!").render();
    insta::assert_snapshot!(result, @r"
    error: unclosed variable; primary
      |
    1 | hello world!
      | ^^^^^ ---- related info
    ");
}

#[test]
fn builder_with_fix() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownMethod, range(0, 3))
        .message("`get` is read as part of the URL")
        .fix("methods are uppercase", "GET")
        .emit();

    let result = diagnostics.printer("get /users").render();
    insta::assert_snapshot!(result, @r"
    warning: unknown method: `get` is read as part of the URL
      |
    1 | get /users
      | ^^^
      |
    help: methods are uppercase
      |
    1 - get /users
    1 + GET /users
      |
    ");
}

#[test]
fn builder_with_hint() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnexpectedLine, range(0, 5))
        .message("expected a header")
        .hint("separate the body with a blank line")
        .emit();

    let message = &diagnostics.raw()[0];
    assert_eq!(message.hints, vec!["separate the body with a blank line".to_string()]);

    let result = diagnostics.printer("hello").render();
    assert!(result.contains("expected a header"));
    assert!(result.contains("separate the body with a blank line"));
}

#[test]
fn default_hint_is_attached() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedMultipart, range(0, 5))
        .emit();

    assert_eq!(
        diagnostics.raw()[0].hints,
        vec!["end the body with `--<boundary>--`".to_string()]
    );
}

#[test]
fn printer_colored() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(0, 5))
        .message("test")
        .emit();

    let result = diagnostics.printer("hello").colored(true).render();
    assert!(result.contains("test"));
    assert!(result.contains('\x1b'));
}

#[test]
fn printer_empty_diagnostics() {
    let diagnostics = Diagnostics::new();
    let result = diagnostics.printer("source").render();
    assert!(result.is_empty());
}

#[test]
fn printer_with_path() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedColon, range(0, 5))
        .message("expected `:` after header name")
        .emit();

    let result = diagnostics.printer("hello world").path("api.http").render();
    insta::assert_snapshot!(result, @r"
    error: expected `:` after header name
     --> api.http:1:1
      |
    1 | hello world
      | ^^^^^
    ");
}

#[test]
fn printer_zero_width_span() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::ExpectedValue, TextRange::empty(0.into()))
        .emit();

    let result = diagnostics.printer("hello").render();
    insta::assert_snapshot!(result, @r"
    error: expected a value
      |
    1 | hello
      | ^
    ");
}

#[test]
fn printer_multiple_diagnostics() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedScript, range(0, 5))
        .message("expected `%}`")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnexpectedToken, range(6, 10))
        .message("second error")
        .emit();

    let result = diagnostics.printer("hello world!").render();
    insta::assert_snapshot!(result, @r"
    error: unclosed script; expected `%}`
      |
    1 | hello world!
      | ^^^^^

    error: second error
      |
    1 | hello world!
      |       ^^^^
    ");
}

#[test]
fn printer_separates_reports_with_blank_line() {
    let mut diagnostics = Diagnostics::new();
    for (start, end) in [(0, 1), (2, 3), (4, 5)] {
        diagnostics
            .report(DiagnosticKind::UnexpectedToken, range(start, end))
            .message("stray")
            .emit();
    }

    let result = diagnostics.printer("a b c").render();
    assert_eq!(result.matches("\n\nerror: stray").count(), 2);
    assert!(!result.contains("\n\n\n"));
}

#[test]
fn display_plain() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnclosedVariable, range(4, 6))
        .message("expected `}}`")
        .related_to("variable starts here", range(4, 6))
        .emit();

    insta::assert_snapshot!(
        diagnostics.raw()[0].to_string(),
        @"error at 4..6: unclosed variable; expected `}}` (related: variable starts here at 4..6)"
    );
}

#[test]
fn diagnostic_kind_suppression_order() {
    assert!(DiagnosticKind::UnclosedVariable.suppresses(&DiagnosticKind::UnexpectedToken));
    assert!(DiagnosticKind::ExpectedColon.suppresses(&DiagnosticKind::UnexpectedLine));
    assert!(!DiagnosticKind::UnclosedVariable.suppresses(&DiagnosticKind::UnclosedVariable));
    assert!(!DiagnosticKind::DuplicateRequestName.suppresses(&DiagnosticKind::UnclosedScript));
}

#[test]
fn diagnostic_kind_message_rendering() {
    assert_eq!(DiagnosticKind::UnclosedScript.message(None), "unclosed script");
    assert_eq!(
        DiagnosticKind::UnclosedScript.message(Some("expected `%}`")),
        "unclosed script; expected `%}`"
    );
    assert_eq!(
        DiagnosticKind::DuplicateRequestName.message(Some("login")),
        "request name `login` is already used"
    );
    assert_eq!(
        DiagnosticKind::ExpectedPath.message(Some("expected a file path after `<`")),
        "expected a file path after `<`"
    );
}

#[test]
fn classes_decide_severity() {
    assert_eq!(DiagnosticKind::UnclosedScript.class(), DiagnosticClass::Unclosed);
    assert_eq!(DiagnosticKind::ExpectedColon.class(), DiagnosticClass::Missing);
    assert_eq!(DiagnosticKind::UnexpectedLine.class(), DiagnosticClass::Unexpected);
    assert_eq!(DiagnosticKind::UnknownMethod.default_severity(), Severity::Warning);
    assert_eq!(DiagnosticKind::InvalidHeaderName.default_severity(), Severity::Error);
}

// Suppression

#[test]
fn filtered_no_suppression_disjoint_spans() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::UnclosedVariable, range(0, 5)).emit();
    diagnostics.report(DiagnosticKind::UnexpectedToken, range(10, 15)).emit();

    assert_eq!(diagnostics.filtered().len(), 2);
}

#[test]
fn filtered_suppresses_lower_priority_contained() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::UnclosedScript, range(0, 20)).emit();
    diagnostics.report(DiagnosticKind::UnexpectedToken, range(5, 15)).emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].kind, DiagnosticKind::UnclosedScript);
}

#[test]
fn filtered_keeps_higher_priority_contained() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::UnexpectedLine, range(0, 20)).emit();
    diagnostics.report(DiagnosticKind::ExpectedColon, range(5, 15)).emit();

    assert_eq!(diagnostics.filtered().len(), 2);
}

#[test]
fn filtered_root_cause_suppresses_structural_at_same_start() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::UnclosedVariable, range(0, 10)).emit();
    diagnostics.report(DiagnosticKind::ExpectedIdentifier, range(0, 2)).emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].kind, DiagnosticKind::ExpectedIdentifier);
}

#[test]
fn filtered_same_start_uses_priority() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(DiagnosticKind::UnexpectedToken, range(3, 8)).emit();
    diagnostics.report(DiagnosticKind::ExpectedValue, range(3, 4)).emit();

    let filtered = diagnostics.filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].kind, DiagnosticKind::ExpectedValue);
}

#[test]
fn extend_merges_collections() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::ExpectedUrl, range(0, 1)).emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::EmptyRequestName, range(2, 3)).emit();

    a.extend(b);
    assert_eq!(a.len(), 2);
    assert_eq!(a.iter().filter(|d| d.is_warning()).count(), 1);
}
