use crate::Document;
use crate::parser::ast::Body;
use indoc::indoc;

#[test]
fn json_body_lines() {
    let input = indoc! {r#"
    POST /a

    {
      "k": 1
    }
    "#};

    let res = Document::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r####"
    Document
      Section
        Request
          Method
            Text "POST"
          TargetUrl
            Text "/a"
          JsonBody
            Text "{"
            Text "  \"k\": 1"
            Text "}"
    "####);
}

#[test]
fn multipart_parts() {
    let input = indoc! {"
    POST /u

    --b
    Name: v

    hello
    --b--
    "};

    let res = Document::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r####"
    Document
      Section
        Request
          Method
            Text "POST"
          TargetUrl
            Text "/u"
          MultipartFormData
            MultipartBoundaryFirst
              DoubleDash "--"
              BoundaryValue
                Text "b"
            Header
              HeaderEntity
                Text "Name"
              Colon ":"
              Value
                Text "v"
            MultipartContentLine
              Text "hello"
            MultipartBoundaryLast
              DoubleDash "--"
              BoundaryValue
                Text "b"
              DoubleDash "--"
    "####);
}

#[test]
fn form_continues_after_ampersand() {
    let input = indoc! {"
    POST /f

    a=1&
    b=2
    "};

    let res = Document::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r####"
    Document
      Section
        Request
          Method
            Text "POST"
          TargetUrl
            Text "/f"
          FormUrlencodedBody
            FormParam
              FormParamName
                Text "a"
              Operator
                Equals "="
              FormParamValue
                Text "1"
            Operator
              Ampersand "&"
            FormParam
              FormParamName
                Text "b"
              Operator
                Equals "="
              FormParamValue
                Text "2"
    "####);
}

#[test]
fn handler_and_redirect() {
    let input = indoc! {"
    GET /a

    > {% log() %}
    >> out.txt
    "};

    let res = Document::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r####"
    Document
      Section
        Request
          Method
            Text "GET"
          TargetUrl
            Text "/a"
          ResHandlerScript
            RAngle ">"
            Script
              ScriptOpen "{%"
              Text " log() "
              ScriptClose "%}"
          ResRedirect
            RedirectMarker ">>"
            Path
              Text "out.txt"
    "####);
}

#[test]
fn xml_and_raw_bodies() {
    let xml = Document::expect_valid("POST /a\n\n<root/>\n");
    let body = xml.root().requests().next().unwrap().body().unwrap();
    assert_eq!(body.kind_name(), "xml_body");

    let raw = Document::expect_valid("POST /a\n\nplain text\n");
    let body = raw.root().requests().next().unwrap().body().unwrap();
    assert_eq!(body.kind_name(), "raw_body");
}

#[test]
fn json_body_stops_at_handler() {
    let input = indoc! {r#"
    POST /a

    {"a": 1}

    > ./check.js
    "#};

    let document = Document::expect_valid(input);
    let request = document.root().requests().next().unwrap();
    assert_eq!(request.bodies().count(), 1);
    assert_eq!(request.body().unwrap().as_cst().text().to_string(), "{\"a\": 1}\n");
    assert_eq!(request.handlers().count(), 1);
}

#[test]
fn graphql_selection_braces_stay_in_query() {
    let input = indoc! {"
    POST /graphql

    query Foo
    {
      a
    }
    "};

    let res = Document::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r####"
    Document
      Section
        Request
          Method
            Text "POST"
          TargetUrl
            Text "/graphql"
          GraphqlBody
            GraphqlData
              Text "query Foo"
              Text "{"
              Text "  a"
              Text "}"
    "####);
}

#[test]
fn graphql_variables_after_blank_line() {
    let input = indoc! {r#"
    POST /graphql

    query Foo
    {
      a
    }

    {"id": 1}

    < ./vars.json
    "#};

    let document = Document::expect_valid(input);
    let request = document.root().requests().next().unwrap();
    let Some(Body::Graphql(body)) = request.body() else {
        panic!("expected a GraphQL body");
    };
    assert_eq!(body.data().unwrap().text(), "query Foo\n{\n  a\n}\n");
    assert_eq!(body.variables().unwrap().text(), "{\"id\": 1}\n");
    assert!(body.external().is_some());
}

#[test]
fn multipart_boundary_ending_in_dash() {
    let input = indoc! {"
    POST /u

    --abc-
    hello
    --abc---
    "};

    let res = Document::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r####"
    Document
      Section
        Request
          Method
            Text "POST"
          TargetUrl
            Text "/u"
          MultipartFormData
            MultipartBoundaryFirst
              DoubleDash "--"
              BoundaryValue
                Text "abc-"
            MultipartContentLine
              Text "hello"
            MultipartBoundaryLast
              DoubleDash "--"
              BoundaryValue
                Text "abc-"
              DoubleDash "--"
    "####);
}

#[test]
fn external_body_with_variables() {
    let res = Document::expect_valid_cst("POST /a\n\n<@ ./body.json\n");

    insta::assert_snapshot!(res, @r####"
    Document
      Section
        Request
          Method
            Text "POST"
          TargetUrl
            Text "/a"
          ExternalBody
            LAngle "<"
            At "@"
            Path
              Text "./body.json"
    "####);
}
