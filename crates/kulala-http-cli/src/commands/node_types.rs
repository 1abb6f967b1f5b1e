use super::source::fail;

pub struct NodeTypesArgs {
    pub compact: bool,
}

pub fn run(args: NodeTypesArgs) {
    match kulala_http::language().node_types_json(!args.compact) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}
