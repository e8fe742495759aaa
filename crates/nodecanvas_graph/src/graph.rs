// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph aggregate: an owned arena of nodes and edges behind id handles.

use crate::edge::{Edge, EdgeId, PortRef};
use crate::node::{Node, NodeId};
use crate::port::PortDirection;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A node graph.
///
/// Nodes and edges live in insertion-ordered arenas addressed by stable
/// ids; the editor and the engine both operate through this API rather
/// than aliasing the structures directly. Node order is render z-order
/// and engine root order; edge order is the tie-break order when several
/// data edges target one input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Snapshot", into = "Snapshot")]
pub struct Graph {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node, cascading to every edge that references it.
    ///
    /// Survivor order is preserved on both arenas.
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.edges.retain(|_, e| !e.involves_node(node_id));
        self.nodes.shift_remove(&node_id)
    }

    /// Get a node by ID.
    pub fn node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(&node_id)
    }

    /// Get a mutable node by ID.
    pub fn node_mut(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&node_id)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Validate and commit an edge between two port references.
    ///
    /// Resolves `from` against output ports and `to` against input ports,
    /// applies [`Port::can_connect`](crate::port::Port::can_connect), and
    /// inserts the edge with `is_exec` taken from the source port. Several
    /// data edges may legally target the same input; the engine resolves
    /// the most recently added one.
    pub fn connect(&mut self, from: PortRef, to: PortRef) -> Result<EdgeId, ConnectError> {
        let source_node = self
            .nodes
            .get(&from.node)
            .ok_or(ConnectError::NodeNotFound(from.node))?;
        let target_node = self
            .nodes
            .get(&to.node)
            .ok_or(ConnectError::NodeNotFound(to.node))?;

        let source_port = source_node
            .port_named(&from.port, PortDirection::Out)
            .ok_or_else(|| ConnectError::PortNotFound {
                node: from.node,
                port: from.port.clone(),
            })?;
        let target_port = target_node
            .port_named(&to.port, PortDirection::In)
            .ok_or_else(|| ConnectError::PortNotFound {
                node: to.node,
                port: to.port.clone(),
            })?;

        if !source_port.can_connect(target_port) {
            return Err(ConnectError::Incompatible);
        }

        let edge = Edge::new(from, to, source_port.is_exec());
        Ok(self.add_edge(edge))
    }

    /// Insert an already-built edge without validation.
    ///
    /// Used when reattaching snapshots; the engine tolerates whatever it
    /// is given.
    pub fn add_edge(&mut self, edge: Edge) -> EdgeId {
        let id = edge.id;
        self.edges.insert(id, edge);
        id
    }

    /// Remove an edge.
    pub fn disconnect(&mut self, edge_id: EdgeId) -> Option<Edge> {
        self.edges.shift_remove(&edge_id)
    }

    /// Get an edge by ID.
    pub fn edge(&self, edge_id: EdgeId) -> Option<&Edge> {
        self.edges.get(&edge_id)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether any data edge targets the given input reference.
    ///
    /// The property panel uses this to lock fields that are driven by a
    /// connection.
    pub fn has_incoming_data_edge(&self, target: &PortRef) -> bool {
        self.edges.values().any(|e| !e.is_exec && e.to == *target)
    }

    /// Structural snapshot of the graph.
    pub fn snapshot(&self) -> Snapshot {
        self.clone().into()
    }
}

impl From<Snapshot> for Graph {
    fn from(snapshot: Snapshot) -> Self {
        let mut graph = Self::new();
        for node in snapshot.nodes {
            graph.add_node(node);
        }
        for edge in snapshot.edges {
            graph.add_edge(edge);
        }
        graph
    }
}

impl From<Graph> for Snapshot {
    fn from(graph: Graph) -> Self {
        Self {
            nodes: graph.nodes.into_values().collect(),
            edges: graph.edges.into_values().collect(),
        }
    }
}

/// The persistence form of a graph: a structural record of nodes and
/// edges in insertion order. Round-tripping reconstructs both with
/// identical fields; ports are reattached as plain records, not
/// re-validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Nodes in insertion order
    pub nodes: Vec<Node>,
    /// Edges in insertion order
    pub edges: Vec<Edge>,
}

/// Error when committing a connection.
///
/// A rejected edge is simply not added; nothing is raised at run time.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// Node not found
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Port not found on the node
    #[error("no port named {port:?} on node {node:?}")]
    PortNotFound {
        /// The node searched
        node: NodeId,
        /// The missing port name
        port: String,
    },

    /// The validator rejected the pair
    #[error("ports cannot be connected")]
    Incompatible,
}
