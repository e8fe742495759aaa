// SPDX-License-Identifier: MIT OR Apache-2.0
//! Port definitions and the connection validator.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortId(pub Uuid);

impl PortId {
    /// Create a new random port ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PortId {
    fn default() -> Self {
        Self::new()
    }
}

/// Port direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    /// Input port
    In,
    /// Output port
    Out,
}

/// Type tag for values flowing through a port.
///
/// `Exec` is the control-flow sentinel; it never carries data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    /// Number
    Number,
    /// Boolean
    Boolean,
    /// Text
    String,
    /// Color
    Color,
    /// Structural value
    Object,
    /// 3D vector
    Vector3,
    /// Wildcard, connects to any data type
    Any,
    /// Execution flow
    Exec,
}

impl PortType {
    /// Check whether a data value of this type may feed a port of `other`.
    ///
    /// Either side being `Any` accepts; otherwise the tags must be exactly
    /// equal. No coercion, no subtype relation.
    pub fn can_connect_to(&self, other: &PortType) -> bool {
        if matches!(self, Self::Any) || matches!(other, Self::Any) {
            return true;
        }
        self == other
    }
}

/// A port on a node: a named, typed, directional attachment point.
///
/// Port names are unique per direction within a node. Screen-space
/// coordinates are an editor render cache, not part of this model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    /// Unique port ID
    pub id: PortId,
    /// Owning node ID
    pub node: NodeId,
    /// Port name
    pub name: String,
    /// Type tag
    #[serde(rename = "type")]
    pub ty: PortType,
    /// Direction
    pub direction: PortDirection,
}

impl Port {
    /// Create a new port.
    pub fn new(
        node: NodeId,
        name: impl Into<String>,
        ty: PortType,
        direction: PortDirection,
    ) -> Self {
        Self {
            id: PortId::new(),
            node,
            name: name.into(),
            ty,
            direction,
        }
    }

    /// Create a data input port.
    pub fn input(node: NodeId, name: impl Into<String>, ty: PortType) -> Self {
        Self::new(node, name, ty, PortDirection::In)
    }

    /// Create a data output port.
    pub fn output(node: NodeId, name: impl Into<String>, ty: PortType) -> Self {
        Self::new(node, name, ty, PortDirection::Out)
    }

    /// Create an incoming execution port.
    pub fn exec_in(node: NodeId) -> Self {
        Self::new(node, "exec", PortType::Exec, PortDirection::In)
    }

    /// Create an outgoing execution port.
    pub fn exec_out(node: NodeId) -> Self {
        Self::new(node, "exec", PortType::Exec, PortDirection::Out)
    }

    /// Whether this is a control-flow port.
    ///
    /// Exec-ness is derived from the type tag, so an exec port can never
    /// carry a data type other than the sentinel.
    pub fn is_exec(&self) -> bool {
        self.ty == PortType::Exec
    }

    /// Decide whether an edge from this port to `to` is legal.
    ///
    /// Pure and total; depends only on direction, exec-ness, and type
    /// tags. Invoked by the editor when committing a dragged edge and
    /// while dragging to drive the accept/reject indicator. The engine
    /// never re-checks committed edges.
    pub fn can_connect(&self, to: &Port) -> bool {
        if self.direction != PortDirection::Out || to.direction != PortDirection::In {
            return false;
        }
        // Control flow may only connect to control flow.
        if self.is_exec() != to.is_exec() {
            return false;
        }
        if self.is_exec() {
            return true;
        }
        self.ty.can_connect_to(&to.ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(ty: PortType, direction: PortDirection) -> Port {
        Port::new(NodeId::new(), "p", ty, direction)
    }

    #[test]
    fn test_direction_must_be_out_to_in() {
        let out = port(PortType::Number, PortDirection::Out);
        let inp = port(PortType::Number, PortDirection::In);
        assert!(out.can_connect(&inp));
        assert!(!inp.can_connect(&out));
        assert!(!out.can_connect(&out));
        assert!(!inp.can_connect(&inp));
    }

    #[test]
    fn test_exec_only_connects_to_exec() {
        let exec_out = Port::exec_out(NodeId::new());
        let exec_in = Port::exec_in(NodeId::new());
        let data_in = port(PortType::Number, PortDirection::In);
        let data_out = port(PortType::Number, PortDirection::Out);

        assert!(exec_out.can_connect(&exec_in));
        assert!(!exec_out.can_connect(&data_in));
        assert!(!data_out.can_connect(&exec_in));
    }

    #[test]
    fn test_exact_type_match_required() {
        let num_out = port(PortType::Number, PortDirection::Out);
        let num_in = port(PortType::Number, PortDirection::In);
        let str_in = port(PortType::String, PortDirection::In);
        let vec_in = port(PortType::Vector3, PortDirection::In);

        assert!(num_out.can_connect(&num_in));
        assert!(!num_out.can_connect(&str_in));
        assert!(!num_out.can_connect(&vec_in));
    }

    #[test]
    fn test_any_is_a_wildcard() {
        let num_out = port(PortType::Number, PortDirection::Out);
        let any_in = port(PortType::Any, PortDirection::In);
        let any_out = port(PortType::Any, PortDirection::Out);
        let str_in = port(PortType::String, PortDirection::In);

        assert!(num_out.can_connect(&any_in));
        assert!(any_out.can_connect(&str_in));
        // The wildcard does not bridge exec and data.
        assert!(!any_out.can_connect(&Port::exec_in(NodeId::new())));
    }

    #[test]
    fn test_verdict_ignores_node_identity() {
        // Same (direction, exec, type) triple, different owners and names.
        let a = Port::output(NodeId::new(), "left", PortType::Color);
        let b = Port::output(NodeId::new(), "right", PortType::Color);
        let target = Port::input(NodeId::new(), "in", PortType::Color);
        assert_eq!(a.can_connect(&target), b.can_connect(&target));
    }
}
