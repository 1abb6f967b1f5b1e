use std::fmt::Write;

use kulala_http_core::Palette;
use rowan::{NodeOrToken, TextRange};

use crate::parser::ast::{self, Body, ScriptSource};
use crate::parser::SyntaxNode;

use super::Document;
use super::requests::url_text;

pub struct DocumentPrinter<'d, 'src> {
    document: &'d Document<'src>,
    raw: bool,
    trivia: bool,
    spans: bool,
    palette: Palette,
}

impl<'d, 'src> DocumentPrinter<'d, 'src> {
    pub fn new(document: &'d Document<'src>) -> Self {
        Self {
            document,
            raw: false,
            trivia: false,
            spans: false,
            palette: Palette::PLAIN,
        }
    }

    /// Print the concrete syntax tree instead of the outline.
    pub fn raw(mut self, value: bool) -> Self {
        self.raw = value;
        self
    }

    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    /// ANSI colors for node kinds, token text and spans.
    pub fn colored(mut self, value: bool) -> Self {
        self.palette = Palette::new(value);
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if self.raw {
            self.format_cst(self.document.syntax(), 0, w)
        } else {
            self.format_root(self.document.root(), w)
        }
    }

    fn format_cst(&self, node: &SyntaxNode, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(node.text_range());

        let c = &self.palette;
        writeln!(w, "{}{}{:?}{}{}", prefix, c.node, node.kind(), c.reset, span)?;

        for child in node.children_with_tokens() {
            match child {
                NodeOrToken::Node(n) => self.format_cst(&n, indent + 1, w)?,
                NodeOrToken::Token(t) => {
                    if self.trivia || !t.kind().is_trivia() {
                        let child_prefix = "  ".repeat(indent + 1);
                        let child_span = self.span_str(t.text_range());
                        writeln!(
                            w,
                            "{}{:?}{} {}{:?}{}",
                            child_prefix,
                            t.kind(),
                            child_span,
                            c.token,
                            t.text(),
                            c.reset
                        )?;
                    }
                }
            }
        }
        Ok(())
    }

    fn format_root(&self, root: &ast::Root, w: &mut impl Write) -> std::fmt::Result {
        writeln!(w, "Document{}", self.span_str(root.as_cst().text_range()))?;
        for section in root.sections() {
            self.format_section(&section, 1, w)?;
        }
        Ok(())
    }

    fn format_section(
        &self,
        section: &ast::Section,
        indent: usize,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(section.as_cst().text_range());
        match section.name() {
            Some(name) => writeln!(w, "{}Section{} {:?}", prefix, span, name)?,
            None => writeln!(w, "{}Section{}", prefix, span)?,
        }

        let inner = "  ".repeat(indent + 1);
        for var in section.variables() {
            let name = var.name().map(|n| n.text()).unwrap_or_default();
            let value = var.value().map(|v| v.text()).unwrap_or_default();
            writeln!(w, "{}Variable {} = {}", inner, name, value)?;
        }
        for command in section.commands() {
            let name = command.name().map(|n| n.text()).unwrap_or_default();
            let value = command.value().map(|v| v.text()).unwrap_or_default();
            writeln!(w, "{}Command {} {}", inner, name, value)?;
        }
        for script in section.pre_request_scripts() {
            self.format_script("PreRequestScript", script.source(), indent + 1, w)?;
        }

        if let Some(request) = section.request() {
            self.format_request(&request, indent + 1, w)?;
        }
        if let Some(response) = section.response() {
            self.format_response(&response, indent + 1, w)?;
        }
        Ok(())
    }

    fn format_request(
        &self,
        request: &ast::Request,
        indent: usize,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(request.as_cst().text_range());
        write!(w, "{}Request{}", prefix, span)?;
        if let Some(method) = request.method() {
            write!(w, " {}", method.text())?;
        }
        if let Some(url) = request.url() {
            write!(w, " {}", url_text(&url))?;
        }
        if let Some(version) = request.version() {
            write!(w, " {}", version.text())?;
        }
        writeln!(w)?;

        for header in request.headers() {
            self.format_header(&header, indent + 1, w)?;
        }
        for body in request.bodies() {
            self.format_body(&body, indent + 1, w)?;
        }
        for handler in request.handlers() {
            self.format_script("ResHandlerScript", handler.source(), indent + 1, w)?;
        }
        for redirect in request.redirects() {
            let marker = if redirect.overwrite() { ">>!" } else { ">>" };
            let path = redirect.path().map(|p| p.text()).unwrap_or_default();
            writeln!(w, "{}  ResRedirect {} {}", prefix, marker, path)?;
        }
        Ok(())
    }

    fn format_response(
        &self,
        response: &ast::Response,
        indent: usize,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(response.as_cst().text_range());
        write!(w, "{}Response{}", prefix, span)?;
        if let Some(code) = response.status_code() {
            write!(w, " {}", code.text())?;
        }
        if let Some(text) = response.status_text() {
            write!(w, " {}", text.text())?;
        }
        writeln!(w)?;

        for header in response.headers() {
            self.format_header(&header, indent + 1, w)?;
        }
        if let Some(body) = response.body() {
            self.format_body(&body, indent + 1, w)?;
        }
        Ok(())
    }

    fn format_header(&self, header: &ast::Header, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(header.as_cst().text_range());
        let name = header.name().map(|n| n.text()).unwrap_or_default();
        let value = header.value().map(|v| v.text()).unwrap_or_default();
        writeln!(w, "{}Header{} {}: {}", prefix, span, name, value)
    }

    fn format_body(&self, body: &Body, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(body.as_cst().text_range());
        match body {
            Body::External(external) => {
                let path = external.path().map(|p| p.text()).unwrap_or_default();
                writeln!(w, "{}Body{} {} {}", prefix, span, body.kind_name(), path)
            }
            Body::Multipart(multipart) => {
                let boundary = multipart.boundary().unwrap_or_default();
                writeln!(w, "{}Body{} {} {}", prefix, span, body.kind_name(), boundary)
            }
            _ => writeln!(w, "{}Body{} {}", prefix, span, body.kind_name()),
        }
    }

    fn format_script(
        &self,
        label: &str,
        source: Option<ScriptSource>,
        indent: usize,
        w: &mut impl Write,
    ) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        match source {
            Some(ScriptSource::Inline(_)) => writeln!(w, "{}{} inline", prefix, label),
            Some(ScriptSource::File(path)) => writeln!(w, "{}{} {}", prefix, label, path.text()),
            None => writeln!(w, "{}{}", prefix, label),
        }
    }

    fn span_str(&self, range: TextRange) -> String {
        if !self.spans {
            return String::new();
        }
        let c = &self.palette;
        format!(
            " {}[{}..{}]{}",
            c.span,
            u32::from(range.start()),
            u32::from(range.end()),
            c.reset
        )
    }
}
