//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{NodeTypeEntry, NodeTypeId, NodeTypeTable};

impl NodeTypeTable {
    /// Entry for an id the language handle resolved itself.
    pub fn entry(&self, node_type_id: NodeTypeId) -> &NodeTypeEntry {
        self.get(node_type_id).unwrap_or_else(|| {
            panic!(
                "node type {node_type_id} has no entry; \
                 ids must come from the same language handle"
            )
        })
    }
}
