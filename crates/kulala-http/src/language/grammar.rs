//! Static grammar descriptor types.
//!
//! A `Grammar` is plain `'static` data: the node kind table (ids are slice
//! indices), the field table (ids start at 1) and the node-types description
//! that `node-types.json` is generated from.

use indexmap::IndexMap;
use kulala_http_core::{RawCardinality, RawNode, RawTypeRef};

use crate::parser::SyntaxKind;

/// Newest descriptor layout understood by `Language::new`.
pub const ABI_VERSION: u32 = 15;

/// Oldest descriptor layout still accepted.
pub const MIN_COMPATIBLE_ABI_VERSION: u32 = 13;

#[derive(Debug)]
pub struct Grammar {
    pub name: &'static str,
    pub abi_version: u32,
    pub node_kinds: &'static [NodeKindInfo],
    /// Field names; the field id is the index plus one.
    pub field_names: &'static [&'static str],
    pub node_types: &'static [StaticNodeTypeDef],
}

/// One entry of the node kind table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeKindInfo {
    pub name: &'static str,
    pub named: bool,
    pub visible: bool,
    /// Parser kind producing this node, for named kinds.
    pub kind: Option<SyntaxKind>,
}

impl NodeKindInfo {
    pub const fn named(name: &'static str, kind: SyntaxKind) -> Self {
        Self {
            name,
            named: true,
            visible: true,
            kind: Some(kind),
        }
    }

    pub const fn anonymous(name: &'static str) -> Self {
        Self {
            name,
            named: false,
            visible: true,
            kind: None,
        }
    }

    pub const fn hidden(name: &'static str) -> Self {
        Self {
            name,
            named: false,
            visible: false,
            kind: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRef {
    pub name: &'static str,
    pub named: bool,
}

impl TypeRef {
    pub const fn named(name: &'static str) -> Self {
        Self { name, named: true }
    }

    pub const fn anonymous(name: &'static str) -> Self {
        Self { name, named: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticCardinality {
    pub multiple: bool,
    pub required: bool,
    pub types: &'static [TypeRef],
}

impl StaticCardinality {
    pub const fn one(types: &'static [TypeRef]) -> Self {
        Self {
            multiple: false,
            required: true,
            types,
        }
    }

    pub const fn optional(types: &'static [TypeRef]) -> Self {
        Self {
            multiple: false,
            required: false,
            types,
        }
    }

    pub const fn many(types: &'static [TypeRef]) -> Self {
        Self {
            multiple: true,
            required: false,
            types,
        }
    }

    pub const fn some(types: &'static [TypeRef]) -> Self {
        Self {
            multiple: true,
            required: true,
            types,
        }
    }

    fn to_raw(self) -> RawCardinality {
        RawCardinality {
            multiple: self.multiple,
            required: self.required,
            types: self
                .types
                .iter()
                .map(|t| RawTypeRef {
                    type_name: t.name.to_string(),
                    named: t.named,
                })
                .collect(),
        }
    }
}

/// Node-types entry for one node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticNodeTypeDef {
    pub name: &'static str,
    pub named: bool,
    pub root: bool,
    pub extra: bool,
    pub fields: &'static [(&'static str, StaticCardinality)],
    pub children: Option<StaticCardinality>,
}

impl StaticNodeTypeDef {
    /// Named node without fields or children.
    pub const fn leaf(name: &'static str) -> Self {
        Self {
            name,
            named: true,
            root: false,
            extra: false,
            fields: &[],
            children: None,
        }
    }

    pub const fn anonymous(name: &'static str) -> Self {
        Self {
            named: false,
            ..Self::leaf(name)
        }
    }

    pub const fn node(
        name: &'static str,
        fields: &'static [(&'static str, StaticCardinality)],
        children: Option<StaticCardinality>,
    ) -> Self {
        Self {
            fields,
            children,
            ..Self::leaf(name)
        }
    }

    pub const fn as_root(self) -> Self {
        Self { root: true, ..self }
    }

    pub fn type_refs(&self) -> impl Iterator<Item = &'static TypeRef> + '_ {
        self.fields
            .iter()
            .flat_map(|(_, card)| card.types.iter())
            .chain(self.children.iter().flat_map(|card| card.types.iter()))
    }

    pub fn to_raw(&self) -> RawNode {
        RawNode {
            type_name: self.name.to_string(),
            named: self.named,
            root: self.root,
            extra: self.extra,
            fields: self
                .fields
                .iter()
                .map(|(name, card)| (name.to_string(), card.to_raw()))
                .collect::<IndexMap<_, _>>(),
            children: self.children.map(StaticCardinality::to_raw),
        }
    }
}

impl Grammar {
    /// `node-types.json` entries in declaration order.
    pub fn raw_node_types(&self) -> Vec<RawNode> {
        self.node_types.iter().map(StaticNodeTypeDef::to_raw).collect()
    }
}
