use crate::Document;
use indoc::indoc;

#[test]
fn separator_variables_and_metadata() {
    let input = indoc! {"
    ### Users
    @host = example.com
    # @name list
    GET {{host}}/users
    "};

    let res = Document::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r####"
    Document
      Section
        RequestSeparator
          SeparatorMarker "###"
          Value
            Text "Users"
        VariableDeclaration
          At "@"
          Identifier
            Text "host"
          Equals "="
          Value
            Text "example.com"
        Metadata
          Hash "#"
          At "@"
          Identifier
            Text "name"
          Value
            Text "list"
        Request
          Method
            Text "GET"
          TargetUrl
            Variable
              VarOpen "{{"
              Identifier
                Text "host"
              VarClose "}}"
            Text "/users"
    "####);
}

#[test]
fn sections_split_at_separators() {
    let input = indoc! {"
    GET /a
    ###
    GET /b
    #### Third
    GET /c
    "};

    let document = Document::expect_valid(input);
    let names: Vec<_> = document.root().sections().map(|s| s.name()).collect();
    assert_eq!(names, [None, None, Some("Third".to_string())]);
    assert_eq!(document.root().requests().count(), 3);
}

#[test]
fn comments_before_request() {
    let input = indoc! {"
    // note
    GET /a
    "};

    let res = Document::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r####"
    Document
      Section
        Comment
          DoubleSlash "//"
          Text " note"
        Request
          Method
            Text "GET"
          TargetUrl
            Text "/a"
    "####);
}

#[test]
fn command_with_inline_variables() {
    let input = "run #login (@user=admin)\n";

    let res = Document::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r####"
    Document
      Section
        Command
          CommandName
            Text "run"
          Value
            Text "#login"
          ParenOpen "("
          VariableDeclarationInline
            At "@"
            Identifier
              Text "user"
            Equals "="
            Value
              Text "admin"
          ParenClose ")"
    "####);
}

#[test]
fn pre_request_script_file() {
    let input = indoc! {"
    < ./scripts/setup.js
    GET /a
    "};

    let res = Document::expect_valid_cst(input);

    insta::assert_snapshot!(res, @r####"
    Document
      Section
        PreRequestScript
          LAngle "<"
          Path
            Text "./scripts/setup.js"
        Request
          Method
            Text "GET"
          TargetUrl
            Text "/a"
    "####);
}

#[test]
fn variable_identifier_forms() {
    let input = indoc! {"
    GET /{{$random.uuid}}/{{items[0].id}}/{{$randomInt(1, 10)}}
    "};

    let document = Document::expect_valid(input);
    let url = document.root().requests().next().unwrap().url().unwrap();
    let names: Vec<_> = url
        .as_cst()
        .descendants()
        .filter_map(crate::parser::ast::Variable::cast)
        .map(|v| v.name().unwrap().text())
        .collect();
    assert_eq!(names, ["$random.uuid", "items[0].id", "$randomInt(1, 10)"]);
}
