// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge definitions: control-flow and data connections between ports.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub Uuid);

impl EdgeId {
    /// Create a new random edge ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EdgeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A reference to a named port on a node.
///
/// Edges address ports by owner id plus name rather than by `PortId`, so a
/// snapshot can be reattached without re-resolving port identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRef {
    /// Owning node
    pub node: NodeId,
    /// Port name on that node
    pub port: String,
}

impl PortRef {
    /// Create a port reference.
    pub fn new(node: NodeId, port: impl Into<String>) -> Self {
        Self {
            node,
            port: port.into(),
        }
    }
}

/// A committed connection from an output port to an input port.
///
/// `is_exec` partitions edges into control flow and data flow; it matches
/// the exec-ness of both endpoints on any edge the validator admitted.
/// Construction performs no validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge ID
    pub id: EdgeId,
    /// Source (output) endpoint
    pub from: PortRef,
    /// Target (input) endpoint
    pub to: PortRef,
    /// Whether this is a control-flow edge
    pub is_exec: bool,
}

impl Edge {
    /// Create a new edge.
    pub fn new(from: PortRef, to: PortRef, is_exec: bool) -> Self {
        Self {
            id: EdgeId::new(),
            from,
            to,
            is_exec,
        }
    }

    /// Check if this edge touches a specific node on either end.
    pub fn involves_node(&self, node_id: NodeId) -> bool {
        self.from.node == node_id || self.to.node == node_id
    }
}
