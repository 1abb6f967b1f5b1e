#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Node type model for the Kulala HTTP grammar.
//!
//! Two layers:
//! - **Serialization layer**: 1:1 mapping to tree-sitter's `node-types.json`
//! - **Analysis layer**: ID-indexed structures for efficient lookups

use std::num::NonZeroU16;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

mod invariants;
pub mod palette;

#[cfg(test)]
mod lib_tests;

pub use palette::Palette;

// ============================================================================
// Serialization Layer
// ============================================================================

/// Raw node definition as found in `node-types.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    #[serde(rename = "type")]
    pub type_name: String,
    pub named: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub root: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub extra: bool,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub fields: IndexMap<String, RawCardinality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<RawCardinality>,
}

/// Cardinality constraints for a field or children slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCardinality {
    pub multiple: bool,
    pub required: bool,
    pub types: Vec<RawTypeRef>,
}

/// Reference to a node type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTypeRef {
    #[serde(rename = "type")]
    pub type_name: String,
    pub named: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Parse `node-types.json` content into raw nodes.
pub fn parse_node_types(json: &str) -> Result<Vec<RawNode>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Render raw nodes as `node-types.json`.
pub fn node_types_to_json(nodes: &[RawNode], pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(nodes)
    } else {
        serde_json::to_string(nodes)
    }
}

// ============================================================================
// Ids and cardinality
// ============================================================================

/// Node type id, the index of the kind in the grammar's kind table.
pub type NodeTypeId = u16;

/// Field id. Zero is reserved for "no field", as in tree-sitter.
pub type NodeFieldId = NonZeroU16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cardinality {
    pub multiple: bool,
    pub required: bool,
}

impl From<&RawCardinality> for Cardinality {
    fn from(raw: &RawCardinality) -> Self {
        Self {
            multiple: raw.multiple,
            required: raw.required,
        }
    }
}

/// Cardinality and allowed kinds of one field, or of the non-field children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub cardinality: Cardinality,
    pub types: Vec<NodeTypeId>,
}

// ============================================================================
// Lookups
// ============================================================================

/// Structural questions about node kinds: root, extras, fields and children.
///
/// Name and id resolution lives on the language handle. Implementors answer
/// the two slot lookups; the rest is derived from them.
pub trait NodeTypes {
    fn root(&self) -> Option<NodeTypeId>;
    fn is_extra(&self, node_type_id: NodeTypeId) -> bool;
    fn field_slot(&self, node_type_id: NodeTypeId, node_field_id: NodeFieldId) -> Option<&Slot>;
    fn children_slot(&self, node_type_id: NodeTypeId) -> Option<&Slot>;

    fn has_field(&self, node_type_id: NodeTypeId, node_field_id: NodeFieldId) -> bool {
        self.field_slot(node_type_id, node_field_id).is_some()
    }

    fn field_cardinality(
        &self,
        node_type_id: NodeTypeId,
        node_field_id: NodeFieldId,
    ) -> Option<Cardinality> {
        self.field_slot(node_type_id, node_field_id)
            .map(|slot| slot.cardinality)
    }

    fn valid_field_types(&self, node_type_id: NodeTypeId, node_field_id: NodeFieldId) -> &[NodeTypeId] {
        self.field_slot(node_type_id, node_field_id)
            .map(|slot| slot.types.as_slice())
            .unwrap_or(&[])
    }

    fn is_valid_field_type(
        &self,
        node_type_id: NodeTypeId,
        node_field_id: NodeFieldId,
        child: NodeTypeId,
    ) -> bool {
        self.valid_field_types(node_type_id, node_field_id)
            .contains(&child)
    }

    fn children_cardinality(&self, node_type_id: NodeTypeId) -> Option<Cardinality> {
        self.children_slot(node_type_id).map(|slot| slot.cardinality)
    }

    fn valid_child_types(&self, node_type_id: NodeTypeId) -> &[NodeTypeId] {
        self.children_slot(node_type_id)
            .map(|slot| slot.types.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone)]
pub struct NodeTypeEntry {
    pub name: String,
    pub named: bool,
    /// In declaration order.
    pub fields: Vec<(NodeFieldId, Slot)>,
    pub children: Option<Slot>,
}

impl NodeTypeEntry {
    pub fn field(&self, node_field_id: NodeFieldId) -> Option<&Slot> {
        self.fields
            .iter()
            .find_map(|(id, slot)| (*id == node_field_id).then_some(slot))
    }
}

/// Resolved node types, indexed by node type id.
///
/// Grammar ids are dense slice indices, so entries live in a vector with
/// holes for kinds that have no `node-types.json` entry (such as `end`).
#[derive(Debug, Clone, Default)]
pub struct NodeTypeTable {
    entries: Vec<Option<NodeTypeEntry>>,
    extras: Vec<NodeTypeId>,
    root: Option<NodeTypeId>,
}

impl NodeTypeTable {
    /// Resolves raw nodes through the given name lookups.
    ///
    /// Names that don't resolve are skipped; the language handle rejects
    /// such descriptors before building the table.
    pub fn build<F, G>(raw_nodes: &[RawNode], resolve_node: F, resolve_field: G) -> Self
    where
        F: Fn(&str, bool) -> Option<NodeTypeId>,
        G: Fn(&str) -> Option<NodeFieldId>,
    {
        let mut table = Self::default();
        let slot = |raw: &RawCardinality| Slot {
            cardinality: raw.into(),
            types: raw
                .types
                .iter()
                .filter_map(|t| resolve_node(&t.type_name, t.named))
                .collect(),
        };

        for raw in raw_nodes {
            let Some(id) = resolve_node(&raw.type_name, raw.named) else {
                continue;
            };
            if raw.root {
                table.root = Some(id);
            }
            if raw.extra {
                table.extras.push(id);
            }

            let entry = NodeTypeEntry {
                name: raw.type_name.clone(),
                named: raw.named,
                fields: raw
                    .fields
                    .iter()
                    .filter_map(|(name, card)| Some((resolve_field(name)?, slot(card))))
                    .collect(),
                children: raw.children.as_ref().map(&slot),
            };

            let idx = usize::from(id);
            if table.entries.len() <= idx {
                table.entries.resize(idx + 1, None);
            }
            table.entries[idx] = Some(entry);
        }

        table
    }

    pub fn get(&self, node_type_id: NodeTypeId) -> Option<&NodeTypeEntry> {
        self.entries.get(usize::from(node_type_id))?.as_ref()
    }

    pub fn extras(&self) -> &[NodeTypeId] {
        &self.extras
    }

    /// Ids that have an entry, ascending.
    pub fn ids(&self) -> impl Iterator<Item = NodeTypeId> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_some())
            .map(|(idx, _)| idx as NodeTypeId)
    }

    pub fn len(&self) -> usize {
        self.ids().count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }
}

impl NodeTypes for NodeTypeTable {
    fn root(&self) -> Option<NodeTypeId> {
        self.root
    }

    fn is_extra(&self, node_type_id: NodeTypeId) -> bool {
        self.extras.contains(&node_type_id)
    }

    fn field_slot(&self, node_type_id: NodeTypeId, node_field_id: NodeFieldId) -> Option<&Slot> {
        self.get(node_type_id)?.field(node_field_id)
    }

    fn children_slot(&self, node_type_id: NodeTypeId) -> Option<&Slot> {
        self.get(node_type_id)?.children.as_ref()
    }
}
