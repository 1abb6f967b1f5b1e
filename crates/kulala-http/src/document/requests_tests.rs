use indoc::indoc;

use crate::Document;

#[test]
fn summaries() {
    let input = indoc! {r#"
    ### List users
    GET https://example.com/users?page=2 HTTP/2
    Accept: application/json
    Cookie: a=1
    Cookie: b=2

    ###
    # @name create_user
    POST https://example.com/users
    Content-Type: application/x-www-form-urlencoded

    name=alice&role=admin
    "#};

    let document = Document::expect_valid(input);
    let requests = document.requests();
    assert_eq!(requests.len(), 2);

    let list = &requests[0];
    assert_eq!(list.name.as_deref(), Some("List users"));
    assert_eq!(list.method, "GET");
    assert_eq!(list.url, "https://example.com/users?page=2");
    assert_eq!(list.version.as_deref(), Some("HTTP/2"));
    assert_eq!(list.headers["Cookie"], "a=1, b=2");
    assert_eq!(list.body, None);
    assert_eq!(list.line, 2);

    let create = &requests[1];
    assert_eq!(create.name.as_deref(), Some("create_user"));
    assert_eq!(create.method, "POST");
    assert_eq!(create.body, Some("form_urlencoded_body"));
    assert_eq!(create.line, 9);
}

#[test]
fn method_defaults_to_get() {
    let document = Document::expect_valid("https://example.com\n");
    let requests = document.requests();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, "https://example.com");
    assert_eq!(requests[0].name, None);
}

#[test]
fn multiline_url_is_joined() {
    let input = indoc! {"
    GET https://example.com/search
      ?q=rust
      &page=1
    "};

    let document = Document::expect_valid(input);
    assert_eq!(document.requests()[0].url, "https://example.com/search?q=rust&page=1");
}

#[test]
fn sections_without_request_are_skipped() {
    let input = indoc! {"
    @token = abc

    ###
    HTTP/1.1 204 No Content
    "};

    let document = Document::expect_valid(input);
    assert!(document.requests().is_empty());
}

#[test]
fn summary_json() {
    let input = indoc! {"
    # @name ping
    HEAD https://example.com/ping
    X-Trace: 1
    "};

    let document = Document::expect_valid(input);
    let json = serde_json::to_string(&document.requests()).unwrap();
    insta::assert_snapshot!(json, @r#"[{"name":"ping","method":"HEAD","url":"https://example.com/ping","headers":{"X-Trace":"1"},"line":2}]"#);
}
