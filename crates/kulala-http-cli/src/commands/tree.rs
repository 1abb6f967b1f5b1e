use kulala_http::Document;

use super::source::{SourceInput, load_or_exit, parse_or_exit};

pub struct TreeArgs {
    pub input: SourceInput,
    pub cst: bool,
    pub trivia: bool,
    pub spans: bool,
    pub color: bool,
}

pub fn run(args: TreeArgs) {
    let source = load_or_exit(&args.input);
    let document = parse_or_exit(&source);
    print!("{}", render(&document, &args));
}

pub fn render(document: &Document<'_>, args: &TreeArgs) -> String {
    document
        .printer()
        .raw(args.cst)
        .with_trivia(args.trivia)
        .with_spans(args.spans)
        .colored(args.color)
        .dump()
}
