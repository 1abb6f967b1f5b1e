use crate::Document;
use indoc::indoc;

#[test]
fn unclosed_variable_in_url() {
    let input = "GET /{{id\n";

    let res = Document::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 5..9: unclosed variable; expected `}}` (related: variable starts here at 5..7)");
}

#[test]
fn unclosed_script_stops_at_separator() {
    let input = indoc! {"
    < {% a
    ###
    GET /
    "};

    let res = Document::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 2..7: unclosed script; expected `%}` (related: script starts here at 2..4)");

    let document = Document::parse(input).unwrap();
    assert_eq!(document.root().sections().count(), 2);
    assert_eq!(document.root().requests().count(), 1);
}

#[test]
fn unclosed_multipart() {
    let input = indoc! {"
    POST /u

    --b
    x
    "};

    let res = Document::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 9..15: unclosed multipart body; expected a closing boundary (related: multipart body starts here at 9..11) (hint: end the body with `--<boundary>--`)");
}

#[test]
fn unclosed_command_args() {
    let input = "run #a (@x=1\n";

    let res = Document::expect_invalid(input);

    insta::assert_snapshot!(res, @"error at 12..13: expected `)` (related: declarations start here at 7..8)");
}
