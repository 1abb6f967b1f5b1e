use indoc::indoc;

use super::*;
use crate::Error;

impl<'a> Document<'a> {
    #[track_caller]
    pub fn expect_valid(source: &'a str) -> Self {
        let document = Document::parse(source).unwrap();
        if !document.is_valid() {
            panic!(
                "Expected valid document, got error:\n{}",
                document.dump_diagnostics()
            );
        }
        document
    }

    #[track_caller]
    pub fn expect_valid_cst(source: &'a str) -> String {
        Self::expect_valid(source).dump_cst()
    }

    #[track_caller]
    pub fn expect_valid_cst_full(source: &'a str) -> String {
        Self::expect_valid(source).dump_cst_full()
    }

    /// Filtered diagnostics, one per line.
    #[track_caller]
    pub fn expect_invalid(source: &'a str) -> String {
        let document = Document::parse(source).unwrap();
        if document.is_valid() {
            panic!("Expected invalid document, got valid:\n{}", document.dump_cst());
        }
        document.diagnostic_lines()
    }

    /// Diagnostics (warnings included), one per line.
    pub fn diagnostic_lines(&self) -> String {
        self.diagnostics
            .filtered()
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[test]
fn parse_simple_request() {
    let input = indoc! {"
    GET https://example.com/users HTTP/1.1
    Accept: application/json
    "};

    let document = Document::expect_valid(input);
    assert_eq!(document.source(), input);
    assert_eq!(document.syntax().text().to_string(), input);
    assert!(document.diagnostics().is_empty());
    assert_eq!(document.root().sections().count(), 1);
}

#[test]
fn empty_document() {
    let document = Document::expect_valid("");
    assert_eq!(document.root().sections().count(), 0);
    assert!(document.requests().is_empty());
    insta::assert_snapshot!(document.dump_cst(), @"Document");
}

#[test]
fn warnings_keep_document_valid() {
    let input = indoc! {"
    # @name
    GET https://example.com
    "};

    let document = Document::parse(input).unwrap();
    assert!(document.is_valid());
    assert!(document.diagnostics().has_warnings());
}

#[test]
fn exec_fuel_exhausted() {
    let input = "GET https://example.com\nAccept: */*\n";
    let result = DocumentBuilder::new(input).with_exec_fuel(3).parse();
    assert!(matches!(result, Err(Error::ExecFuelExhausted)));
}

#[test]
fn exec_fuel_sufficient() {
    let input = "GET https://example.com\n";
    let document = DocumentBuilder::new(input).with_exec_fuel(1000).parse().unwrap();
    assert!(document.is_valid());
}

#[test]
fn default_exec_fuel_is_unlimited() {
    let mut input = String::from("POST /bulk\n\n[\n");
    input.push_str(&"{\"k\": 1},\n".repeat(120_000));
    input.push_str("{}]\n");

    let document = Document::parse(&input).unwrap();
    assert!(document.is_valid());
    let request = document.root().requests().next().unwrap();
    assert_eq!(request.body().unwrap().kind_name(), "json_body");
}

#[test]
fn recursion_limit_exceeded() {
    let input = "GET https://example.com\n";
    let result = DocumentBuilder::new(input).with_recursion_fuel(1).parse();
    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));
}

#[test]
fn recursion_limit_with_body() {
    let input = indoc! {r#"
    POST https://example.com

    {"a": 1}
    "#};

    // section and request fit, the body section does not
    let result = DocumentBuilder::new(input).with_recursion_fuel(2).parse();
    assert!(matches!(result, Err(Error::RecursionLimitExceeded)));

    let document = DocumentBuilder::new(input).with_recursion_fuel(3).parse().unwrap();
    assert!(document.is_valid());
}

#[test]
fn round_trip_preserves_invalid_input() {
    let inputs = [
        "GET https://example.com/{{host\n",
        "POST x\n\n--boundary\nContent-Type: text/plain\n",
        "< {% unclosed\n###\nGET y\n",
        "\u{feff}\t\r\n@ = \n%%%\n",
        "get http://a b c d\n\n> bad\n>> \n",
        "HTTP/1.1 abc\n@x\nrun #foo (@a=1,\n",
    ];
    for input in inputs {
        let document = Document::parse(input).unwrap();
        assert_eq!(document.syntax().text().to_string(), input, "{input:?}");
    }
}

#[test]
fn dump_diagnostics_renders_filtered() {
    let input = "GET https://example.com\nX.Y: z\n";
    let document = Document::parse(input).unwrap();
    let rendered = document.dump_diagnostics();
    assert!(rendered.contains("`X.Y` is not a valid header name"), "{rendered}");
}
