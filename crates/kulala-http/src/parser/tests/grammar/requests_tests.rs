use crate::Document;
use indoc::indoc;

#[test]
fn url_with_query_and_fragment() {
    let input = "GET /a?x=1&y#f\n";

    let res = Document::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r####"
    Document
      Section
        Request
          Method
            Text "GET"
          TargetUrl
            Text "/a"
            QueryString
              Operator
                Question "?"
              QueryParam
                QueryParamName
                  Text "x"
                Operator
                  Equals "="
                QueryParamValue
                  Text "1"
            QueryParamContinuation
              Operator
                Ampersand "&"
              QueryParam
                QueryParamName
                  Text "y"
            Fragment
              Operator
                Hash "#"
              Text "f"
    "####);
}

#[test]
fn header_with_padded_variable() {
    let input = indoc! {"
    GET /
    X-Id: {{ id }}
    "};

    let res = Document::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r####"
    Document
      Section
        Request
          Method
            Text "GET"
          TargetUrl
            Text "/"
          Header
            HeaderEntity
              Text "X-Id"
            Colon ":"
            Value
              Variable
                VarOpen "{{"
                Identifier
                  Text "id"
                VarClose "}}"
    "####);
}

#[test]
fn request_line_with_version() {
    let input = "POST https://example.com/a HTTP/2\n";

    let document = Document::expect_valid(input);
    let request = document.root().requests().next().unwrap();
    assert_eq!(request.method().unwrap().text(), "POST");
    assert_eq!(request.url().unwrap().text(), "https://example.com/a");
    assert_eq!(request.version().unwrap().text(), "HTTP/2");
}

#[test]
fn url_without_method() {
    let input = "https://example.com\n";

    let document = Document::expect_valid(input);
    let request = document.root().requests().next().unwrap();
    assert!(request.method().is_none());
    assert_eq!(request.url().unwrap().text(), "https://example.com");
}

#[test]
fn url_continuation_lines() {
    let input = indoc! {"
    GET /search
      ?q=rust
      &page=2 HTTP/1.1
    Accept: */*
    "};

    let document = Document::expect_valid(input);
    let request = document.root().requests().next().unwrap();
    let url = request.url().unwrap();
    let params: Vec<_> = url
        .params()
        .map(|p| p.name().unwrap().text().to_string())
        .collect();
    assert_eq!(params, ["q", "page"]);
    assert_eq!(request.version().unwrap().text(), "HTTP/1.1");
    assert_eq!(request.headers().count(), 1);
}

#[test]
fn response_line() {
    let input = "HTTP/1.1 200 OK\n";

    let res = Document::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r####"
    Document
      Section
        Response
          HttpVersion
            Text "HTTP/1.1"
          StatusCode
            Text "200"
          StatusText
            Text "OK"
    "####);
}
