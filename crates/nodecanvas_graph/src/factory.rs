// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node templates and the catalog of built-in kinds.
//!
//! Templates fix the port-name vocabulary (`a`, `b`, `out`, `x`/`y`/`z`,
//! `v`, `in`) that evaluators read and write.

use crate::node::Node;
use crate::port::{Port, PortDirection, PortType};
use crate::value::Value;
use indexmap::IndexMap;

/// Kind tags of the built-in nodes.
pub mod kinds {
    /// Traversal root, no inputs
    pub const START: &str = "start";
    /// Numeric sum
    pub const ADD: &str = "add";
    /// Numeric product
    pub const MUL: &str = "mul";
    /// Vector constructor
    pub const VEC3: &str = "vec3";
    /// Stored numeric field
    pub const NUMBER: &str = "number";
    /// Dot product
    pub const DOT: &str = "dot";
    /// Euclidean norm
    pub const LENGTH: &str = "length";
    /// Log a rendering of the input
    pub const PRINT: &str = "print";
}

/// Canvas size shared by the built-in logic nodes, tall enough for port
/// labels.
const LOGIC_NODE_SIZE: [f32; 2] = [170.0, 100.0];

/// One entry in a template's port layout.
#[derive(Debug, Clone)]
pub struct PortSpec {
    name: &'static str,
    ty: PortType,
    direction: PortDirection,
}

impl PortSpec {
    /// A data input port.
    pub fn input(name: &'static str, ty: PortType) -> Self {
        Self {
            name,
            ty,
            direction: PortDirection::In,
        }
    }

    /// A data output port.
    pub fn output(name: &'static str, ty: PortType) -> Self {
        Self {
            name,
            ty,
            direction: PortDirection::Out,
        }
    }

    /// An incoming execution port.
    pub fn exec_in() -> Self {
        Self {
            name: "exec",
            ty: PortType::Exec,
            direction: PortDirection::In,
        }
    }

    /// An outgoing execution port.
    pub fn exec_out() -> Self {
        Self {
            name: "exec",
            ty: PortType::Exec,
            direction: PortDirection::Out,
        }
    }
}

/// Declarative scaffolding for a node kind: canonical port layout plus
/// default data values.
#[derive(Debug, Clone)]
pub struct NodeTemplate {
    /// Kind tag
    pub kind: &'static str,
    /// Display label
    pub label: &'static str,
    /// Canvas size
    pub size: [f32; 2],
    ports: Vec<PortSpec>,
    defaults: Vec<(&'static str, Value)>,
}

impl NodeTemplate {
    /// Create a template with no ports and the logic-node size.
    pub fn new(kind: &'static str, label: &'static str) -> Self {
        Self {
            kind,
            label,
            size: LOGIC_NODE_SIZE,
            ports: Vec::new(),
            defaults: Vec::new(),
        }
    }

    /// Append a port to the layout.
    pub fn port(mut self, spec: PortSpec) -> Self {
        self.ports.push(spec);
        self
    }

    /// Seed a default data value.
    pub fn default_value(mut self, name: &'static str, value: Value) -> Self {
        self.defaults.push((name, value));
        self
    }

    /// Produce a node at the given position with fresh port identities.
    pub fn instantiate(&self, x: f32, y: f32) -> Node {
        let mut node = Node::new(self.kind)
            .with_label(self.label)
            .with_position(x, y)
            .with_size(self.size[0], self.size[1]);
        let owner = node.id;
        node.ports = self
            .ports
            .iter()
            .map(|spec| Port::new(owner, spec.name, spec.ty, spec.direction))
            .collect();
        for (name, value) in &self.defaults {
            node.data.insert((*name).to_string(), value.clone());
        }
        node
    }
}

/// Registry of node templates by kind.
///
/// Open for the editor to extend; [`NodeCatalog::builtin`] carries the
/// eight built-in kinds.
#[derive(Debug, Clone)]
pub struct NodeCatalog {
    templates: IndexMap<&'static str, NodeTemplate>,
}

impl NodeCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            templates: IndexMap::new(),
        }
    }

    /// Register a template; a later registration for a kind replaces the
    /// earlier one.
    pub fn register(&mut self, template: NodeTemplate) {
        self.templates.insert(template.kind, template);
    }

    /// Get a template by kind.
    pub fn get(&self, kind: &str) -> Option<&NodeTemplate> {
        self.templates.get(kind)
    }

    /// All registered kinds.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.templates.keys().copied()
    }

    /// Create a node of the given kind, or `None` if unregistered.
    pub fn create(&self, kind: &str, x: f32, y: f32) -> Option<Node> {
        self.get(kind).map(|t| t.instantiate(x, y))
    }

    /// The catalog of built-in node kinds.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();

        catalog.register(NodeTemplate::new(kinds::START, "Start").port(PortSpec::exec_out()));

        for (kind, label) in [(kinds::ADD, "Add"), (kinds::MUL, "Mul")] {
            catalog.register(
                NodeTemplate::new(kind, label)
                    .port(PortSpec::exec_in())
                    .port(PortSpec::exec_out())
                    .port(PortSpec::input("a", PortType::Number))
                    .port(PortSpec::input("b", PortType::Number))
                    .port(PortSpec::output("out", PortType::Number))
                    .default_value("a", Value::Number(1.0))
                    .default_value("b", Value::Number(1.0)),
            );
        }

        catalog.register(
            NodeTemplate::new(kinds::VEC3, "Vec3")
                .port(PortSpec::input("x", PortType::Number))
                .port(PortSpec::input("y", PortType::Number))
                .port(PortSpec::input("z", PortType::Number))
                .port(PortSpec::output("v", PortType::Vector3))
                .default_value("x", Value::Number(0.0))
                .default_value("y", Value::Number(0.0))
                .default_value("z", Value::Number(0.0)),
        );

        // Output seeded so downstream reads work before the first run.
        catalog.register(
            NodeTemplate::new(kinds::NUMBER, "Number")
                .port(PortSpec::input("num", PortType::Number))
                .port(PortSpec::output("v", PortType::Number))
                .default_value("num", Value::Number(0.0))
                .default_value("v", Value::Number(0.0)),
        );

        catalog.register(
            NodeTemplate::new(kinds::DOT, "Dot")
                .port(PortSpec::exec_in())
                .port(PortSpec::exec_out())
                .port(PortSpec::input("a", PortType::Vector3))
                .port(PortSpec::input("b", PortType::Vector3))
                .port(PortSpec::output("out", PortType::Number)),
        );

        catalog.register(
            NodeTemplate::new(kinds::LENGTH, "Length")
                .port(PortSpec::input("a", PortType::Vector3))
                .port(PortSpec::output("out", PortType::Number)),
        );

        catalog.register(
            NodeTemplate::new(kinds::PRINT, "Print")
                .port(PortSpec::exec_in())
                .port(PortSpec::input("in", PortType::Any)),
        );

        catalog
    }
}

impl Default for NodeCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_layout() {
        let catalog = NodeCatalog::builtin();
        let node = catalog.create(kinds::ADD, 10.0, 20.0).unwrap();

        assert_eq!(node.kind, "add");
        assert_eq!(node.label, "Add");
        assert_eq!(node.position, [10.0, 20.0]);
        assert_eq!(node.size, [170.0, 100.0]);

        let names: Vec<(&str, PortDirection, bool)> = node
            .ports
            .iter()
            .map(|p| (p.name.as_str(), p.direction, p.is_exec()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("exec", PortDirection::In, true),
                ("exec", PortDirection::Out, true),
                ("a", PortDirection::In, false),
                ("b", PortDirection::In, false),
                ("out", PortDirection::Out, false),
            ]
        );
        assert_eq!(node.data.get("a"), Some(&Value::Number(1.0)));
        assert_eq!(node.data.get("b"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn test_ports_are_owned_and_fresh() {
        let catalog = NodeCatalog::builtin();
        let first = catalog.create(kinds::ADD, 0.0, 0.0).unwrap();
        let second = catalog.create(kinds::ADD, 0.0, 0.0).unwrap();

        assert!(first.ports.iter().all(|p| p.node == first.id));
        assert!(second.ports.iter().all(|p| p.node == second.id));
        assert_ne!(first.ports[0].id, second.ports[0].id);
    }

    #[test]
    fn test_pure_data_kinds_have_no_exec_ports() {
        let catalog = NodeCatalog::builtin();
        for kind in [kinds::VEC3, kinds::NUMBER, kinds::LENGTH] {
            let node = catalog.create(kind, 0.0, 0.0).unwrap();
            assert!(node.ports.iter().all(|p| !p.is_exec()), "{kind}");
        }
    }

    #[test]
    fn test_number_seeds_its_output() {
        let catalog = NodeCatalog::builtin();
        let node = catalog.create(kinds::NUMBER, 0.0, 0.0).unwrap();
        assert_eq!(node.data.get("v"), Some(&Value::Number(0.0)));
    }

    #[test]
    fn test_unknown_kind() {
        assert!(NodeCatalog::builtin().create("teleport", 0.0, 0.0).is_none());
    }

    #[test]
    fn test_print_takes_any_input() {
        let catalog = NodeCatalog::builtin();
        let node = catalog.create(kinds::PRINT, 0.0, 0.0).unwrap();
        let input = node.port_named("in", PortDirection::In).unwrap();
        assert_eq!(input.ty, PortType::Any);
        assert_eq!(node.data_outputs().count(), 0);
    }
}
