//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("kulala-http")
        .about("Inspect and check HTTP request files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(log_level_arg())
        .subcommand(tree_command())
        .subcommand(check_command())
        .subcommand(requests_command())
        .subcommand(node_types_command())
        .subcommand(info_command())
}

/// Print the outline or the syntax tree of a request file.
pub fn tree_command() -> Command {
    Command::new("tree")
        .about("Show the syntax tree of a request file")
        .override_usage(
            "\
  kulala-http tree <FILE>
  kulala-http tree -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  kulala-http tree api.http                # outline
  kulala-http tree api.http --cst          # concrete syntax tree
  kulala-http tree api.http --raw --spans  # CST with trivia and positions
  kulala-http tree -s 'GET /users'         # inline source"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(cst_arg())
        .arg(raw_arg())
        .arg(spans_arg())
        .arg(color_arg())
}

/// Validate a request file.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Validate a request file")
        .override_usage(
            "\
  kulala-http check <FILE>
  kulala-http check -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  kulala-http check api.http
  kulala-http check api.http --strict     # warnings fail too
  cat api.http | kulala-http check -"#,
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(strict_arg())
        .arg(color_arg())
}

/// Print request summaries as JSON.
pub fn requests_command() -> Command {
    Command::new("requests")
        .about("List the requests of a file as JSON")
        .override_usage(
            "\
  kulala-http requests <FILE>
  kulala-http requests -s <TEXT>",
        )
        .arg(source_path_arg())
        .arg(source_text_arg())
        .arg(compact_arg())
}

/// Print the grammar's node-types.json.
pub fn node_types_command() -> Command {
    Command::new("node-types")
        .about("Print node-types.json of the grammar")
        .arg(compact_arg())
}

pub fn info_command() -> Command {
    Command::new("info").about("Show grammar information")
}
