//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors named after
//! the grammar's fields. Cast is infallible for correct `SyntaxKind`; a
//! missing child (after error recovery) shows up as `None`.

use super::cst::{SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }

            /// Source text covered by the node.
            pub fn text(&self) -> String {
                self.0.text().to_string()
            }
        }
    };
}

ast_node!(Root, Document);
ast_node!(Section, Section);
ast_node!(RequestSeparator, RequestSeparator);
ast_node!(Comment, Comment);
ast_node!(Metadata, Metadata);
ast_node!(VariableDeclaration, VariableDeclaration);
ast_node!(VariableDeclarationInline, VariableDeclarationInline);
ast_node!(Command, Command);
ast_node!(CommandName, CommandName);
ast_node!(PreRequestScript, PreRequestScript);
ast_node!(ResHandlerScript, ResHandlerScript);
ast_node!(ResRedirect, ResRedirect);
ast_node!(Script, Script);
ast_node!(Path, Path);
ast_node!(Request, Request);
ast_node!(Response, Response);
ast_node!(Method, Method);
ast_node!(TargetUrl, TargetUrl);
ast_node!(HttpVersion, HttpVersion);
ast_node!(StatusCode, StatusCode);
ast_node!(StatusText, StatusText);
ast_node!(QueryParam, QueryParam);
ast_node!(Fragment, Fragment);
ast_node!(Header, Header);
ast_node!(HeaderEntity, HeaderEntity);
ast_node!(Value, Value);
ast_node!(Variable, Variable);
ast_node!(Identifier, Identifier);
ast_node!(XmlBody, XmlBody);
ast_node!(JsonBody, JsonBody);
ast_node!(GraphqlBody, GraphqlBody);
ast_node!(GraphqlData, GraphqlData);
ast_node!(FormUrlencodedBody, FormUrlencodedBody);
ast_node!(FormParam, FormParam);
ast_node!(ExternalBody, ExternalBody);
ast_node!(MultipartFormData, MultipartFormData);
ast_node!(MultipartExternalBody, MultipartExternalBody);
ast_node!(RawBody, RawBody);

/// Request or response body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Body {
    Json(JsonBody),
    Xml(XmlBody),
    Graphql(GraphqlBody),
    Form(FormUrlencodedBody),
    External(ExternalBody),
    Multipart(MultipartFormData),
    Raw(RawBody),
}

impl Body {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::JsonBody => JsonBody::cast(node).map(Body::Json),
            SyntaxKind::XmlBody => XmlBody::cast(node).map(Body::Xml),
            SyntaxKind::GraphqlBody => GraphqlBody::cast(node).map(Body::Graphql),
            SyntaxKind::FormUrlencodedBody => FormUrlencodedBody::cast(node).map(Body::Form),
            SyntaxKind::ExternalBody => ExternalBody::cast(node).map(Body::External),
            SyntaxKind::MultipartFormData => MultipartFormData::cast(node).map(Body::Multipart),
            SyntaxKind::RawBody => RawBody::cast(node).map(Body::Raw),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Body::Json(n) => n.as_cst(),
            Body::Xml(n) => n.as_cst(),
            Body::Graphql(n) => n.as_cst(),
            Body::Form(n) => n.as_cst(),
            Body::External(n) => n.as_cst(),
            Body::Multipart(n) => n.as_cst(),
            Body::Raw(n) => n.as_cst(),
        }
    }

    /// Grammar name of the body kind (`json_body`, `raw_body`, ...).
    pub fn kind_name(&self) -> &'static str {
        match self {
            Body::Json(_) => "json_body",
            Body::Xml(_) => "xml_body",
            Body::Graphql(_) => "graphql_body",
            Body::Form(_) => "form_urlencoded_body",
            Body::External(_) => "external_body",
            Body::Multipart(_) => "multipart_form_data",
            Body::Raw(_) => "raw_body",
        }
    }
}

/// A response handler: inline script or script file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScriptSource {
    Inline(Script),
    File(Path),
}

fn script_source(node: &SyntaxNode) -> Option<ScriptSource> {
    node.children().find_map(|child| match child.kind() {
        SyntaxKind::Script => Script::cast(child).map(ScriptSource::Inline),
        SyntaxKind::Path => Path::cast(child).map(ScriptSource::File),
        _ => None,
    })
}

fn first_token(node: &SyntaxNode) -> Option<SyntaxToken> {
    node.children_with_tokens().find_map(|it| it.into_token())
}

impl Root {
    pub fn sections(&self) -> impl Iterator<Item = Section> + '_ {
        self.0.children().filter_map(Section::cast)
    }

    pub fn requests(&self) -> impl Iterator<Item = Request> + '_ {
        self.sections().filter_map(|s| s.request())
    }
}

impl Section {
    pub fn separator(&self) -> Option<RequestSeparator> {
        self.0.children().find_map(RequestSeparator::cast)
    }

    pub fn request(&self) -> Option<Request> {
        self.0.children().find_map(Request::cast)
    }

    pub fn response(&self) -> Option<Response> {
        self.0.children().find_map(Response::cast)
    }

    pub fn metadata(&self) -> impl Iterator<Item = Metadata> + '_ {
        self.0.children().filter_map(Metadata::cast)
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableDeclaration> + '_ {
        self.0.children().filter_map(VariableDeclaration::cast)
    }

    pub fn commands(&self) -> impl Iterator<Item = Command> + '_ {
        self.0.children().filter_map(Command::cast)
    }

    pub fn comments(&self) -> impl Iterator<Item = Comment> + '_ {
        self.0.children().filter_map(Comment::cast)
    }

    pub fn pre_request_scripts(&self) -> impl Iterator<Item = PreRequestScript> + '_ {
        self.0.children().filter_map(PreRequestScript::cast)
    }

    /// `# @name` metadata entry, if the section declares one.
    pub fn name_metadata(&self) -> Option<Metadata> {
        self.metadata()
            .find(|m| m.name().is_some_and(|n| n.text() == "name"))
    }

    /// Request name: `# @name value`, falling back to the separator's text.
    pub fn name(&self) -> Option<String> {
        if let Some(meta) = self.name_metadata() {
            return meta.value().map(|v| v.text());
        }
        self.separator()?.value().map(|v| v.text())
    }
}

impl RequestSeparator {
    pub fn value(&self) -> Option<Value> {
        self.0.children().find_map(Value::cast)
    }
}

impl Comment {
    /// Comment text without the `#`/`//` prefix and line terminator.
    pub fn content(&self) -> String {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == SyntaxKind::Text)
            .map(|t| t.text().trim().to_string())
            .unwrap_or_default()
    }
}

impl Metadata {
    pub fn name(&self) -> Option<Identifier> {
        self.0.children().find_map(Identifier::cast)
    }

    pub fn value(&self) -> Option<Value> {
        self.0.children().find_map(Value::cast)
    }
}

impl VariableDeclaration {
    pub fn name(&self) -> Option<Identifier> {
        self.0.children().find_map(Identifier::cast)
    }

    pub fn value(&self) -> Option<Value> {
        self.0.children().find_map(Value::cast)
    }
}

impl VariableDeclarationInline {
    pub fn name(&self) -> Option<Identifier> {
        self.0.children().find_map(Identifier::cast)
    }

    pub fn value(&self) -> Option<Value> {
        self.0.children().find_map(Value::cast)
    }
}

impl Command {
    pub fn name(&self) -> Option<CommandName> {
        self.0.children().find_map(CommandName::cast)
    }

    pub fn value(&self) -> Option<Value> {
        self.0.children().find_map(Value::cast)
    }

    pub fn variables(&self) -> impl Iterator<Item = VariableDeclarationInline> + '_ {
        self.0.children().filter_map(VariableDeclarationInline::cast)
    }
}

impl PreRequestScript {
    pub fn source(&self) -> Option<ScriptSource> {
        script_source(&self.0)
    }
}

impl ResHandlerScript {
    pub fn source(&self) -> Option<ScriptSource> {
        script_source(&self.0)
    }
}

impl ResRedirect {
    pub fn path(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }

    /// `>>!` overwrites an existing file.
    pub fn overwrite(&self) -> bool {
        first_token(&self.0).is_some_and(|t| t.text() == ">>!")
    }
}

impl Script {
    /// Script code between `{%` and `%}`.
    pub fn code(&self) -> String {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| !matches!(t.kind(), SyntaxKind::ScriptOpen | SyntaxKind::ScriptClose))
            .map(|t| t.text().to_string())
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.0
            .last_token()
            .is_some_and(|t| t.kind() == SyntaxKind::ScriptClose)
    }
}

impl Path {
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.0.children().filter_map(Variable::cast)
    }
}

impl Request {
    pub fn method(&self) -> Option<Method> {
        self.0.children().find_map(Method::cast)
    }

    pub fn url(&self) -> Option<TargetUrl> {
        self.0.children().find_map(TargetUrl::cast)
    }

    pub fn version(&self) -> Option<HttpVersion> {
        self.0.children().find_map(HttpVersion::cast)
    }

    pub fn headers(&self) -> impl Iterator<Item = Header> + '_ {
        self.0.children().filter_map(Header::cast)
    }

    pub fn comments(&self) -> impl Iterator<Item = Comment> + '_ {
        self.0.children().filter_map(Comment::cast)
    }

    /// The first body. A body section may hold more than one.
    pub fn body(&self) -> Option<Body> {
        self.0.children().find_map(Body::cast)
    }

    pub fn bodies(&self) -> impl Iterator<Item = Body> + '_ {
        self.0.children().filter_map(Body::cast)
    }

    pub fn handlers(&self) -> impl Iterator<Item = ResHandlerScript> + '_ {
        self.0.children().filter_map(ResHandlerScript::cast)
    }

    pub fn redirects(&self) -> impl Iterator<Item = ResRedirect> + '_ {
        self.0.children().filter_map(ResRedirect::cast)
    }

    pub fn section(&self) -> Option<Section> {
        self.0.parent().and_then(Section::cast)
    }
}

impl Response {
    pub fn version(&self) -> Option<HttpVersion> {
        self.0.children().find_map(HttpVersion::cast)
    }

    pub fn status_code(&self) -> Option<StatusCode> {
        self.0.children().find_map(StatusCode::cast)
    }

    pub fn status_text(&self) -> Option<StatusText> {
        self.0.children().find_map(StatusText::cast)
    }

    pub fn headers(&self) -> impl Iterator<Item = Header> + '_ {
        self.0.children().filter_map(Header::cast)
    }

    pub fn body(&self) -> Option<Body> {
        self.0.children().find_map(Body::cast)
    }
}

impl StatusCode {
    pub fn as_u16(&self) -> Option<u16> {
        self.text().parse().ok()
    }
}

impl TargetUrl {
    /// Query parameters, from both `?` and `&` parts.
    pub fn params(&self) -> impl Iterator<Item = QueryParam> + '_ {
        self.0.descendants().filter_map(QueryParam::cast)
    }

    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.0.children().filter_map(Variable::cast)
    }

    pub fn fragment(&self) -> Option<Fragment> {
        self.0.children().find_map(Fragment::cast)
    }
}

impl QueryParam {
    pub fn name(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::QueryParamName)
    }

    pub fn value(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::QueryParamValue)
    }
}

impl Header {
    pub fn name(&self) -> Option<HeaderEntity> {
        self.0.children().find_map(HeaderEntity::cast)
    }

    pub fn value(&self) -> Option<Value> {
        self.0.children().find_map(Value::cast)
    }
}

impl Value {
    pub fn variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.0.children().filter_map(Variable::cast)
    }
}

impl Variable {
    pub fn name(&self) -> Option<Identifier> {
        self.0.children().find_map(Identifier::cast)
    }

    pub fn is_closed(&self) -> bool {
        self.0
            .last_token()
            .is_some_and(|t| t.kind() == SyntaxKind::VarClose)
    }
}

impl GraphqlBody {
    pub fn data(&self) -> Option<GraphqlData> {
        self.0.children().find_map(GraphqlData::cast)
    }

    /// JSON variables following the query.
    pub fn variables(&self) -> Option<JsonBody> {
        self.0.children().find_map(JsonBody::cast)
    }

    /// External variables file (`< path`).
    pub fn external(&self) -> Option<ExternalBody> {
        self.0.children().find_map(ExternalBody::cast)
    }
}

impl FormUrlencodedBody {
    pub fn params(&self) -> impl Iterator<Item = FormParam> + '_ {
        self.0.children().filter_map(FormParam::cast)
    }
}

impl FormParam {
    pub fn name(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::FormParamName)
    }

    pub fn value(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::FormParamValue)
    }
}

impl ExternalBody {
    pub fn path(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }

    /// `<@ path`: variables inside the file are substituted.
    pub fn substitutes_variables(&self) -> bool {
        self.0
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .any(|t| t.kind() == SyntaxKind::At)
    }
}

impl MultipartExternalBody {
    pub fn path(&self) -> Option<Path> {
        self.0.children().find_map(Path::cast)
    }
}

impl MultipartFormData {
    /// Boundary declared by the first `--boundary` line.
    pub fn boundary(&self) -> Option<String> {
        let first = self
            .0
            .children()
            .find(|n| n.kind() == SyntaxKind::MultipartBoundaryFirst)?;
        first
            .children()
            .find(|n| n.kind() == SyntaxKind::BoundaryValue)
            .map(|v| v.text().to_string())
    }

    pub fn is_closed(&self) -> bool {
        self.0
            .children()
            .any(|n| n.kind() == SyntaxKind::MultipartBoundaryLast)
    }

    pub fn headers(&self) -> impl Iterator<Item = Header> + '_ {
        self.0.children().filter_map(Header::cast)
    }

    pub fn external_parts(&self) -> impl Iterator<Item = MultipartExternalBody> + '_ {
        self.0.children().filter_map(MultipartExternalBody::cast)
    }
}
