// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the graph model.

use crate::port::{Port, PortDirection};
use crate::value::ValueMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Create a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A node instance in the graph.
///
/// The `data` map doubles as storage for user-edited input defaults and
/// for the last-computed outputs; the engine reads and writes it by port
/// name. Geometry is editor-only. Groups are an editor aggregation with
/// no engine semantics: evaluators never see them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique instance ID
    pub id: NodeId,
    /// Kind tag, selecting both rendering and evaluator
    pub kind: String,
    /// Display label
    pub label: String,
    /// Position in the canvas
    pub position: [f32; 2],
    /// Size in the canvas
    pub size: [f32; 2],
    /// Ports, in declaration order
    pub ports: Vec<Port>,
    /// Default input values and computed outputs, by name
    pub data: ValueMap,
    /// Whether this node is a group
    pub is_group: bool,
    /// Member node IDs, if a group
    pub members: Vec<NodeId>,
}

impl Node {
    /// Create a node of the given kind with default geometry and no ports.
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        Self {
            id: NodeId::new(),
            label: kind.clone(),
            kind,
            position: [0.0, 0.0],
            size: [160.0, 70.0],
            ports: Vec::new(),
            data: ValueMap::new(),
            is_group: false,
            members: Vec::new(),
        }
    }

    /// Set the position.
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = [x, y];
        self
    }

    /// Set the size.
    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.size = [w, h];
        self
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// All ports of a direction.
    pub fn ports_in_direction(
        &self,
        direction: PortDirection,
    ) -> impl Iterator<Item = &Port> {
        self.ports.iter().filter(move |p| p.direction == direction)
    }

    /// Data (non-exec) input ports, in declaration order.
    pub fn data_inputs(&self) -> impl Iterator<Item = &Port> {
        self.ports
            .iter()
            .filter(|p| p.direction == PortDirection::In && !p.is_exec())
    }

    /// Data (non-exec) output ports, in declaration order.
    pub fn data_outputs(&self) -> impl Iterator<Item = &Port> {
        self.ports
            .iter()
            .filter(|p| p.direction == PortDirection::Out && !p.is_exec())
    }

    /// Look up a port by name and direction.
    ///
    /// Names are unique per direction, so this is unambiguous even though
    /// exec ports share the name `exec` across directions.
    pub fn port_named(&self, name: &str, direction: PortDirection) -> Option<&Port> {
        self.ports
            .iter()
            .find(|p| p.direction == direction && p.name == name)
    }
}
