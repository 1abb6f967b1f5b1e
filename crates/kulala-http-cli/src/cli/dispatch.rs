//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::node_types::NodeTypesArgs;
use crate::commands::requests::RequestsArgs;
use crate::commands::source::SourceInput;
use crate::commands::tree::TreeArgs;
use crate::logging::DEFAULT_FILTER;

pub struct TreeParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub cst: bool,
    pub raw: bool,
    pub spans: bool,
    pub color: ColorChoice,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            cst: m.get_flag("cst"),
            raw: m.get_flag("raw"),
            spans: m.get_flag("spans"),
            color: parse_color(m),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            input: SourceInput::new(p.source_path, p.source_text),
            cst: p.cst || p.raw,
            trivia: p.raw,
            spans: p.spans,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: SourceInput::new(p.source_path, p.source_text),
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct RequestsParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub compact: bool,
}

impl RequestsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            compact: m.get_flag("compact"),
        }
    }
}

impl From<RequestsParams> for RequestsArgs {
    fn from(p: RequestsParams) -> Self {
        Self {
            input: SourceInput::new(p.source_path, p.source_text),
            compact: p.compact,
        }
    }
}

pub struct NodeTypesParams {
    pub compact: bool,
}

impl NodeTypesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            compact: m.get_flag("compact"),
        }
    }
}

impl From<NodeTypesParams> for NodeTypesArgs {
    fn from(p: NodeTypesParams) -> Self {
        Self {
            compact: p.compact,
        }
    }
}

/// Log filter from `--log-level`, falling back to `KULALA_HTTP_LOG`.
pub fn log_filter(m: &ArgMatches) -> String {
    m.get_one::<String>("log_level")
        .cloned()
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
