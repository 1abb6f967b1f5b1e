//! The Kulala HTTP grammar tables.

use super::grammar::{
    ABI_VERSION, Grammar, NodeKindInfo, StaticCardinality as Card, StaticNodeTypeDef as Def,
    TypeRef,
};
use crate::parser::SyntaxKind;

pub static KULALA_HTTP: Grammar = Grammar {
    name: "kulala_http",
    abi_version: ABI_VERSION,
    node_kinds: NODE_KINDS,
    field_names: FIELD_NAMES,
    node_types: NODE_TYPES,
};

macro_rules! node_kinds {
    (
        named { $($name:literal => $kind:ident),* $(,)? }
        anonymous { $($anon:literal),* $(,)? }
    ) => {
        &[
            NodeKindInfo::hidden("end"),
            $(NodeKindInfo::named($name, SyntaxKind::$kind),)*
            $(NodeKindInfo::anonymous($anon),)*
        ]
    };
}

static NODE_KINDS: &[NodeKindInfo] = node_kinds! {
    named {
        "document" => Document,
        "section" => Section,
        "request_separator" => RequestSeparator,
        "comment" => Comment,
        "metadata" => Metadata,
        "variable_declaration" => VariableDeclaration,
        "variable_declaration_inline" => VariableDeclarationInline,
        "command" => Command,
        "command_name" => CommandName,
        "pre_request_script" => PreRequestScript,
        "res_handler_script" => ResHandlerScript,
        "res_redirect" => ResRedirect,
        "script" => Script,
        "path" => Path,
        "request" => Request,
        "response" => Response,
        "method" => Method,
        "target_url" => TargetUrl,
        "http_version" => HttpVersion,
        "status_code" => StatusCode,
        "status_text" => StatusText,
        "query_string" => QueryString,
        "query_param_continuation" => QueryParamContinuation,
        "query_param" => QueryParam,
        "query_param_name" => QueryParamName,
        "query_param_value" => QueryParamValue,
        "fragment" => Fragment,
        "operator" => Operator,
        "header" => Header,
        "header_entity" => HeaderEntity,
        "value" => Value,
        "variable" => Variable,
        "identifier" => Identifier,
        "xml_body" => XmlBody,
        "json_body" => JsonBody,
        "graphql_body" => GraphqlBody,
        "graphql_data" => GraphqlData,
        "form_urlencoded_body" => FormUrlencodedBody,
        "form_param" => FormParam,
        "form_param_name" => FormParamName,
        "form_param_value" => FormParamValue,
        "external_body" => ExternalBody,
        "multipart_form_data" => MultipartFormData,
        "multipart_boundary_first" => MultipartBoundaryFirst,
        "multipart_boundary" => MultipartBoundary,
        "multipart_boundary_last" => MultipartBoundaryLast,
        "boundary_value" => BoundaryValue,
        "multipart_content_line" => MultipartContentLine,
        "multipart_external_body" => MultipartExternalBody,
        "raw_body" => RawBody,
        "ERROR" => Error,
    }
    anonymous {
        "###", "#", "//", "@", "=", ":", "(", ")", ",", "<", "<@", ">", ">>", "{{", "}}", "{%",
        "%}", "&", "?", "--",
    }
};

static FIELD_NAMES: &[&str] = &[
    "name", "value", "request", "response", "method", "url", "version", "header", "params", "body",
    "path",
];

const fn n(name: &'static str) -> TypeRef {
    TypeRef::named(name)
}

const VARIABLES: Card = Card::many(&[n("variable")]);
const IDENTIFIER: Card = Card::one(&[n("identifier")]);
const VALUE: Card = Card::optional(&[n("value")]);
const PATH: Card = Card::one(&[n("path")]);
const HEADERS: Card = Card::many(&[n("header")]);
const OPERATOR: Card = Card::one(&[n("operator")]);
const SCRIPT_SOURCE: Card = Card::one(&[n("script"), n("path")]);
const BOUNDARY_VALUE: Card = Card::one(&[n("boundary_value")]);

const BODIES: Card = Card::many(&[
    n("external_body"),
    n("form_urlencoded_body"),
    n("graphql_body"),
    n("json_body"),
    n("multipart_form_data"),
    n("raw_body"),
    n("xml_body"),
]);

static NODE_TYPES: &[Def] = &[
    Def::node("document", &[], Some(Card::many(&[n("section")]))).as_root(),
    Def::node(
        "section",
        &[
            ("request", Card::optional(&[n("request")])),
            ("response", Card::optional(&[n("response")])),
        ],
        Some(Card::many(&[
            n("command"),
            n("comment"),
            n("metadata"),
            n("pre_request_script"),
            n("request_separator"),
            n("variable_declaration"),
        ])),
    ),
    Def::node("request_separator", &[("value", VALUE)], None),
    Def::leaf("comment"),
    Def::node("metadata", &[("name", IDENTIFIER), ("value", VALUE)], None),
    Def::node("variable_declaration", &[("name", IDENTIFIER), ("value", VALUE)], None),
    Def::node("variable_declaration_inline", &[("name", IDENTIFIER), ("value", VALUE)], None),
    Def::node(
        "command",
        &[("name", Card::one(&[n("command_name")])), ("value", VALUE)],
        Some(Card::many(&[n("variable_declaration_inline")])),
    ),
    Def::leaf("command_name"),
    Def::node("pre_request_script", &[], Some(SCRIPT_SOURCE)),
    Def::node("res_handler_script", &[], Some(SCRIPT_SOURCE)),
    Def::node("res_redirect", &[("path", PATH)], None),
    Def::leaf("script"),
    Def::node("path", &[], Some(VARIABLES)),
    Def::node(
        "request",
        &[
            ("method", Card::optional(&[n("method")])),
            ("url", Card::one(&[n("target_url")])),
            ("version", Card::optional(&[n("http_version")])),
            ("header", HEADERS),
            ("body", BODIES),
        ],
        Some(Card::many(&[
            n("comment"),
            n("res_handler_script"),
            n("res_redirect"),
        ])),
    ),
    Def::node(
        "response",
        &[("header", HEADERS), ("body", BODIES)],
        Some(Card::some(&[
            n("comment"),
            n("http_version"),
            n("res_handler_script"),
            n("res_redirect"),
            n("status_code"),
            n("status_text"),
        ])),
    ),
    Def::leaf("method"),
    Def::node(
        "target_url",
        &[],
        Some(Card::many(&[
            n("fragment"),
            n("query_param_continuation"),
            n("query_string"),
            n("variable"),
        ])),
    ),
    Def::leaf("http_version"),
    Def::leaf("status_code"),
    Def::leaf("status_text"),
    Def::node(
        "query_string",
        &[("params", Card::optional(&[n("query_param")]))],
        Some(OPERATOR),
    ),
    Def::node(
        "query_param_continuation",
        &[("params", Card::optional(&[n("query_param")]))],
        Some(OPERATOR),
    ),
    Def::node(
        "query_param",
        &[
            ("name", Card::optional(&[n("query_param_name")])),
            ("value", Card::optional(&[n("query_param_value")])),
        ],
        Some(Card::optional(&[n("operator")])),
    ),
    Def::node("query_param_name", &[], Some(VARIABLES)),
    Def::node("query_param_value", &[], Some(VARIABLES)),
    Def::node("fragment", &[], Some(OPERATOR)),
    Def::leaf("operator"),
    Def::node(
        "header",
        &[("name", Card::one(&[n("header_entity")])), ("value", VALUE)],
        None,
    ),
    Def::leaf("header_entity"),
    Def::node("value", &[], Some(VARIABLES)),
    Def::node("variable", &[("name", IDENTIFIER)], None),
    Def::leaf("identifier"),
    Def::leaf("xml_body"),
    Def::leaf("json_body"),
    Def::node(
        "graphql_body",
        &[],
        Some(Card::some(&[
            n("external_body"),
            n("graphql_data"),
            n("json_body"),
        ])),
    ),
    Def::leaf("graphql_data"),
    Def::node(
        "form_urlencoded_body",
        &[("params", Card::some(&[n("form_param")]))],
        Some(Card::many(&[n("operator")])),
    ),
    Def::node(
        "form_param",
        &[
            ("name", Card::one(&[n("form_param_name")])),
            ("value", Card::optional(&[n("form_param_value")])),
        ],
        Some(Card::optional(&[n("operator")])),
    ),
    Def::node("form_param_name", &[], Some(VARIABLES)),
    Def::node("form_param_value", &[], Some(VARIABLES)),
    Def::node("external_body", &[("path", PATH)], None),
    Def::node(
        "multipart_form_data",
        &[("header", HEADERS)],
        Some(Card::some(&[
            n("multipart_boundary"),
            n("multipart_boundary_first"),
            n("multipart_boundary_last"),
            n("multipart_content_line"),
            n("multipart_external_body"),
        ])),
    ),
    Def::node("multipart_boundary_first", &[], Some(BOUNDARY_VALUE)),
    Def::node("multipart_boundary", &[], Some(BOUNDARY_VALUE)),
    Def::node("multipart_boundary_last", &[], Some(BOUNDARY_VALUE)),
    Def::node("boundary_value", &[], Some(VARIABLES)),
    Def::leaf("multipart_content_line"),
    Def::node("multipart_external_body", &[("path", PATH)], None),
    Def::leaf("raw_body"),
    Def::anonymous("###"),
    Def::anonymous("#"),
    Def::anonymous("//"),
    Def::anonymous("@"),
    Def::anonymous("="),
    Def::anonymous(":"),
    Def::anonymous("("),
    Def::anonymous(")"),
    Def::anonymous(","),
    Def::anonymous("<"),
    Def::anonymous("<@"),
    Def::anonymous(">"),
    Def::anonymous(">>"),
    Def::anonymous("{{"),
    Def::anonymous("}}"),
    Def::anonymous("{%"),
    Def::anonymous("%}"),
    Def::anonymous("&"),
    Def::anonymous("?"),
    Def::anonymous("--"),
];
