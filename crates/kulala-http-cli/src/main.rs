mod cli;
mod commands;
mod logging;

use cli::{CheckParams, NodeTypesParams, RequestsParams, TreeParams, build_cli, log_filter};

fn main() {
    let matches = build_cli().get_matches();
    logging::init(&log_filter(&matches));

    match matches.subcommand() {
        Some(("tree", m)) => {
            let params = TreeParams::from_matches(m);
            commands::tree::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("requests", m)) => {
            let params = RequestsParams::from_matches(m);
            commands::requests::run(params.into());
        }
        Some(("node-types", m)) => {
            let params = NodeTypesParams::from_matches(m);
            commands::node_types::run(params.into());
        }
        Some(("info", _)) => commands::info::run(),
        _ => unreachable!("clap should have caught this"),
    }
}
