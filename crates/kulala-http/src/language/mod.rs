//! Grammar descriptor and the language handle built from it.
//!
//! `Language::new` checks a [`Grammar`] once (ABI range, table consistency)
//! and resolves names to ids. The resulting handle is an `Arc` and is shared
//! freely across threads.

pub mod grammar;
pub(crate) mod tables;


use std::collections::{HashMap, HashSet};
use std::num::NonZeroU16;
use std::sync::Arc;

use kulala_http_core::{
    NodeFieldId, NodeTypeId, NodeTypeTable, NodeTypes, RawNode, Slot, node_types_to_json,
};

pub use grammar::{
    ABI_VERSION, Grammar, MIN_COMPATIBLE_ABI_VERSION, NodeKindInfo, StaticCardinality,
    StaticNodeTypeDef, TypeRef,
};

use crate::document::Document;
use crate::parser::SyntaxKind;

/// Reasons a grammar descriptor is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageError {
    #[error("incompatible grammar ABI version {version} (supported {min}..={max})")]
    IncompatibleVersion { version: u32, min: u32, max: u32 },

    #[error("grammar has no node kinds")]
    EmptyGrammar,

    #[error("node kind `{0}` is declared twice")]
    DuplicateNodeKind(String),

    #[error("field `{0}` is declared twice")]
    DuplicateField(String),

    #[error("unknown node kind `{kind}` referenced by `{referenced_by}`")]
    UnknownNodeKind { kind: String, referenced_by: String },

    #[error("unknown field `{field}` referenced by `{referenced_by}`")]
    UnknownField { field: String, referenced_by: String },

    #[error("grammar has no root node type")]
    RootMissing,

    #[error("grammar declares {count} node kinds (at most {max})")]
    TooManyNodeKinds { count: usize, max: usize },

    #[error("grammar declares {count} fields (at most {max})")]
    TooManyFields { count: usize, max: usize },
}

/// Node kind and field ids are `u16` below `u16::MAX`, which stays reserved.
const MAX_IDS: usize = u16::MAX as usize - 1;

#[derive(Clone)]
pub struct Language(Arc<LanguageInner>);

struct LanguageInner {
    grammar: &'static Grammar,
    node_ids: HashMap<(&'static str, bool), NodeTypeId>,
    syntax_ids: HashMap<SyntaxKind, NodeTypeId>,
    field_ids: HashMap<&'static str, NodeFieldId>,
    node_types: NodeTypeTable,
}

impl std::fmt::Debug for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Language")
            .field("name", &self.name())
            .field("abi_version", &self.abi_version())
            .field("node_kinds", &self.node_kind_count())
            .field("fields", &self.field_count())
            .finish()
    }
}

impl Language {
    /// Checks the descriptor and builds the lookup tables.
    pub fn new(grammar: &'static Grammar) -> Result<Self, LanguageError> {
        let range = MIN_COMPATIBLE_ABI_VERSION..=ABI_VERSION;
        if !range.contains(&grammar.abi_version) {
            return Err(LanguageError::IncompatibleVersion {
                version: grammar.abi_version,
                min: MIN_COMPATIBLE_ABI_VERSION,
                max: ABI_VERSION,
            });
        }
        if grammar.node_kinds.is_empty() {
            return Err(LanguageError::EmptyGrammar);
        }
        if grammar.node_kinds.len() > MAX_IDS {
            return Err(LanguageError::TooManyNodeKinds {
                count: grammar.node_kinds.len(),
                max: MAX_IDS,
            });
        }
        if grammar.field_names.len() > MAX_IDS {
            return Err(LanguageError::TooManyFields {
                count: grammar.field_names.len(),
                max: MAX_IDS,
            });
        }

        let mut node_ids = HashMap::with_capacity(grammar.node_kinds.len());
        let mut syntax_ids = HashMap::new();
        for (id, info) in grammar.node_kinds.iter().enumerate() {
            let id = NodeTypeId::try_from(id).expect("node kind count checked above");
            if node_ids.insert((info.name, info.named), id).is_some() {
                return Err(LanguageError::DuplicateNodeKind(info.name.to_string()));
            }
            if let Some(kind) = info.kind {
                syntax_ids.insert(kind, id);
            }
        }

        let mut field_ids = HashMap::with_capacity(grammar.field_names.len());
        for (idx, &name) in grammar.field_names.iter().enumerate() {
            let id = u16::try_from(idx + 1)
                .ok()
                .and_then(NonZeroU16::new)
                .expect("field count checked above");
            if field_ids.insert(name, id).is_some() {
                return Err(LanguageError::DuplicateField(name.to_string()));
            }
        }

        check_node_types(grammar, &node_ids, &field_ids)?;

        let raw_nodes = grammar.raw_node_types();
        let node_types = NodeTypeTable::build(
            &raw_nodes,
            |name, named| node_ids.get(&(name, named)).copied(),
            |name| field_ids.get(name).copied(),
        );

        tracing::debug!(
            grammar = grammar.name,
            abi_version = grammar.abi_version,
            node_kinds = grammar.node_kinds.len(),
            fields = grammar.field_names.len(),
            "language loaded"
        );

        Ok(Self(Arc::new(LanguageInner {
            grammar,
            node_ids,
            syntax_ids,
            field_ids,
            node_types,
        })))
    }

    pub fn name(&self) -> &'static str {
        self.0.grammar.name
    }

    pub fn abi_version(&self) -> u32 {
        self.0.grammar.abi_version
    }

    pub fn grammar(&self) -> &'static Grammar {
        self.0.grammar
    }

    pub fn node_kind_count(&self) -> usize {
        self.0.grammar.node_kinds.len()
    }

    pub fn field_count(&self) -> usize {
        self.0.grammar.field_names.len()
    }

    pub fn id_for_node_kind(&self, name: &str, named: bool) -> Option<NodeTypeId> {
        self.0.node_ids.get(&(name, named)).copied()
    }

    pub fn node_kind_for_id(&self, id: NodeTypeId) -> Option<&'static str> {
        self.kind_info(id).map(|info| info.name)
    }

    pub fn node_kind_is_named(&self, id: NodeTypeId) -> bool {
        self.kind_info(id).is_some_and(|info| info.named)
    }

    pub fn node_kind_is_visible(&self, id: NodeTypeId) -> bool {
        self.kind_info(id).is_some_and(|info| info.visible)
    }

    /// Descriptor id of the node kind the parser builds as `kind`.
    pub fn id_for_syntax_kind(&self, kind: SyntaxKind) -> Option<NodeTypeId> {
        self.0.syntax_ids.get(&kind).copied()
    }

    pub fn syntax_kind_for_id(&self, id: NodeTypeId) -> Option<SyntaxKind> {
        self.kind_info(id).and_then(|info| info.kind)
    }

    pub fn field_id_for_name(&self, name: &str) -> Option<NodeFieldId> {
        self.0.field_ids.get(name).copied()
    }

    pub fn field_name_for_id(&self, id: NodeFieldId) -> Option<&'static str> {
        self.0.grammar.field_names.get(id.get() as usize - 1).copied()
    }

    /// Field names a node kind declares, in field id order.
    pub fn fields_for_node_kind(&self, id: NodeTypeId) -> Vec<&'static str> {
        (1..=self.field_count() as u16)
            .filter_map(NonZeroU16::new)
            .filter(|&field| self.0.node_types.has_field(id, field))
            .filter_map(|field| self.field_name_for_id(field))
            .collect()
    }

    pub fn all_named_node_kinds(&self) -> Vec<&'static str> {
        self.0
            .grammar
            .node_kinds
            .iter()
            .filter(|info| info.named)
            .map(|info| info.name)
            .collect()
    }

    /// `node-types.json` entries.
    pub fn node_types(&self) -> Vec<RawNode> {
        self.0.grammar.raw_node_types()
    }

    pub fn node_types_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        node_types_to_json(&self.node_types(), pretty)
    }

    /// Parses `source` with the default fuel limits.
    pub fn parse<'s>(&self, source: &'s str) -> crate::Result<Document<'s>> {
        Document::parse(source)
    }

    fn kind_info(&self, id: NodeTypeId) -> Option<&'static NodeKindInfo> {
        self.0.grammar.node_kinds.get(id as usize)
    }
}

/// Every entry and every type it references must name a declared node kind,
/// and exactly the declared fields may be used.
fn check_node_types(
    grammar: &Grammar,
    node_ids: &HashMap<(&'static str, bool), NodeTypeId>,
    field_ids: &HashMap<&'static str, NodeFieldId>,
) -> Result<(), LanguageError> {
    let mut seen = HashSet::new();
    let mut has_root = false;

    for def in grammar.node_types {
        if !node_ids.contains_key(&(def.name, def.named)) {
            return Err(LanguageError::UnknownNodeKind {
                kind: def.name.to_string(),
                referenced_by: grammar.name.to_string(),
            });
        }
        if !seen.insert((def.name, def.named)) {
            return Err(LanguageError::DuplicateNodeKind(def.name.to_string()));
        }
        has_root |= def.root;

        for (field, _) in def.fields {
            if !field_ids.contains_key(field) {
                return Err(LanguageError::UnknownField {
                    field: field.to_string(),
                    referenced_by: def.name.to_string(),
                });
            }
        }
        if let Some(ty) = def
            .type_refs()
            .find(|ty| !node_ids.contains_key(&(ty.name, ty.named)))
        {
            return Err(LanguageError::UnknownNodeKind {
                kind: ty.name.to_string(),
                referenced_by: def.name.to_string(),
            });
        }
    }

    if !has_root {
        return Err(LanguageError::RootMissing);
    }
    Ok(())
}

impl NodeTypes for Language {
    fn root(&self) -> Option<NodeTypeId> {
        self.0.node_types.root()
    }

    fn is_extra(&self, node_type_id: NodeTypeId) -> bool {
        self.0.node_types.is_extra(node_type_id)
    }

    fn field_slot(&self, node_type_id: NodeTypeId, node_field_id: NodeFieldId) -> Option<&Slot> {
        self.0.node_types.field_slot(node_type_id, node_field_id)
    }

    fn children_slot(&self, node_type_id: NodeTypeId) -> Option<&Slot> {
        self.0.node_types.children_slot(node_type_id)
    }
}
