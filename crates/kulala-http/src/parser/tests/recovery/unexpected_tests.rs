use crate::Document;
use indoc::indoc;

#[test]
fn header_without_colon() {
    let input = indoc! {"
    GET /
    Accept json
    "};

    let res = Document::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 13..17: expected `:` after header name");
}

#[test]
fn header_name_with_dot() {
    let input = indoc! {"
    GET /
    X.Foo: 1
    "};

    let res = Document::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 6..11: `X.Foo` is not a valid header name");
}

#[test]
fn body_without_blank_line() {
    let input = indoc! {r#"
    GET /
    Accept: */*
    {"a":1}
    "#};

    let res = Document::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 18..25: expected a header or a blank line before the body (hint: separate the body from the headers with a blank line)");
}

#[test]
fn invalid_status_code() {
    let input = "HTTP/1.1 999\n";

    let res = Document::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 9..12: expected a status code (hint: e.g., `HTTP/1.1 200 OK`)");
}

#[test]
fn variable_without_equals() {
    let input = "@host example.com\n";

    let res = Document::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 6..17: expected `=` after the variable name");
}

#[test]
fn variable_without_value() {
    let input = "@host =\n";

    let res = Document::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 7..8: expected a value after `=`");
}

#[test]
fn handler_without_path() {
    let input = "GET /\n\n> \n";

    let res = Document::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 9..10: expected a file path");
}

#[test]
fn lowercase_method_is_a_warning() {
    let document = Document::parse("get /users\n").unwrap();

    assert!(document.is_valid());
    insta::assert_snapshot!(document.diagnostic_lines(), @"warning at 0..3: unknown method: `get` is read as part of the URL (fix: methods are uppercase)");
    let request = document.root().requests().next().unwrap();
    assert!(request.method().is_none());
    assert_eq!(request.url().unwrap().text(), "get /users");
}

#[test]
fn tree_is_lossless_after_errors() {
    let input = "GET /\nAccept json\n@x\n< {% open\n";

    let document = Document::parse(input).unwrap();

    assert!(!document.is_valid());
    assert_eq!(document.syntax().text().to_string(), input);
}
