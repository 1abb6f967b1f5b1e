use kulala_http::Document;

use super::source::{SourceInput, fail, load_or_exit, parse_or_exit};

pub struct RequestsArgs {
    pub input: SourceInput,
    pub compact: bool,
}

pub fn run(args: RequestsArgs) {
    let source = load_or_exit(&args.input);
    let document = parse_or_exit(&source);
    match render(&document, args.compact) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}

pub fn render(document: &Document<'_>, compact: bool) -> Result<String, serde_json::Error> {
    let summaries = document.requests();
    if compact {
        serde_json::to_string(&summaries)
    } else {
        serde_json::to_string_pretty(&summaries)
    }
}
