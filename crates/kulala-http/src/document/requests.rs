//! Flat per-request summaries, serializable as JSON.

use indexmap::IndexMap;
use serde::Serialize;

use crate::parser::ast::{Request, Section, TargetUrl};

use super::Document;

/// Method used when a request line omits it.
pub const DEFAULT_METHOD: &str = "GET";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub method: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Repeated header names are joined with `, `.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<&'static str>,
    /// 1-based line of the request line.
    pub line: usize,
}

pub(super) fn summarize(document: &Document<'_>) -> Vec<RequestSummary> {
    document
        .root()
        .sections()
        .filter_map(|section| {
            let request = section.request()?;
            Some(summarize_request(document.source(), &section, &request))
        })
        .collect()
}

fn summarize_request(source: &str, section: &Section, request: &Request) -> RequestSummary {
    let mut headers: IndexMap<String, String> = IndexMap::new();
    for header in request.headers() {
        let Some(name) = header.name() else {
            continue;
        };
        let value = header.value().map(|v| v.text()).unwrap_or_default();
        headers
            .entry(name.text())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert(value);
    }

    let offset = u32::from(request.as_cst().text_range().start()) as usize;

    RequestSummary {
        name: section.name().filter(|name| !name.is_empty()),
        method: request
            .method()
            .map(|m| m.text())
            .unwrap_or_else(|| DEFAULT_METHOD.to_string()),
        url: request.url().map(|url| url_text(&url)).unwrap_or_default(),
        version: request.version().map(|v| v.text()),
        headers,
        body: request.body().map(|body| body.kind_name()),
        line: line_number(source, offset),
    }
}

/// URL text with continuation lines joined.
pub(crate) fn url_text(url: &TargetUrl) -> String {
    url.text().lines().map(str::trim).collect()
}

fn line_number(source: &str, offset: usize) -> usize {
    let prefix = source.get(..offset).unwrap_or(source);
    prefix.matches('\n').count() + 1
}
