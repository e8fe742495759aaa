// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph execution: exec-edge traversal and data-edge resolution.

use crate::registry::{EvalCtx, Registry};
use nodecanvas_graph::factory::kinds;
use nodecanvas_graph::{Graph, NodeId, PortRef, Value, ValueMap};
use std::collections::HashMap;

use futures::future::LocalBoxFuture;

/// Default per-run traversal budget, in node visits.
///
/// Control-flow cycles are legal to draw but would otherwise recurse
/// forever; the budget truncates the run instead. Revisiting a node below
/// the budget stays legal, so converging control paths still fire a node
/// once per path.
pub const DEFAULT_STEP_LIMIT: usize = 10_000;

/// The graph execution engine.
///
/// Holds the evaluator registry and the traversal budget; one engine can
/// run many graphs. Runs never fail: structural absences degrade to
/// no-ops and value absences to defaults, so the only observable effects
/// are the log lines and the updated node data maps.
pub struct Engine {
    registry: Registry,
    step_limit: usize,
}

impl Engine {
    /// Engine with the built-in evaluators.
    pub fn new() -> Self {
        Self::with_registry(Registry::with_builtins())
    }

    /// Engine over a caller-supplied registry.
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }

    /// Replace the traversal budget.
    pub fn with_step_limit(mut self, step_limit: usize) -> Self {
        self.step_limit = step_limit;
        self
    }

    /// The evaluator registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access for defining further evaluators.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Execute the graph.
    ///
    /// Indexes edges once, then steps every `start` node in graph order,
    /// depth-first along exec edges, awaiting each branch to completion
    /// before the next. Committed edges are trusted as validated; dangling
    /// references terminate their branch silently.
    pub async fn run(&self, graph: &mut Graph, sink: &mut dyn FnMut(&str)) {
        sink("> Running graph...");

        let mut exec_out: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        let mut data_in: HashMap<PortRef, Vec<PortRef>> = HashMap::new();
        for edge in graph.edges() {
            if edge.is_exec {
                exec_out.entry(edge.from.node).or_default().push(edge.to.node);
            } else {
                data_in
                    .entry(edge.to.clone())
                    .or_default()
                    .push(edge.from.clone());
            }
        }

        let roots: Vec<NodeId> = graph
            .nodes()
            .filter(|n| n.kind == kinds::START)
            .map(|n| n.id)
            .collect();
        tracing::debug!(roots = roots.len(), "graph run started");

        let mut run = Run {
            graph,
            registry: &self.registry,
            sink,
            exec_out,
            data_in,
            steps_left: self.step_limit,
            truncated: false,
        };
        for root in roots {
            run.step(root).await;
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// State for one traversal: the edge indexes and the remaining budget.
struct Run<'a> {
    graph: &'a mut Graph,
    registry: &'a Registry,
    sink: &'a mut dyn FnMut(&str),
    exec_out: HashMap<NodeId, Vec<NodeId>>,
    data_in: HashMap<PortRef, Vec<PortRef>>,
    steps_left: usize,
    truncated: bool,
}

impl Run<'_> {
    /// Visit one node: resolve inputs, evaluate, write back declared
    /// outputs, then follow exec edges in insertion order.
    fn step(&mut self, node_id: NodeId) -> LocalBoxFuture<'_, ()> {
        Box::pin(async move {
            if self.steps_left == 0 {
                if !self.truncated {
                    self.truncated = true;
                    tracing::warn!(
                        ?node_id,
                        "traversal budget exhausted, truncating run (control-flow cycle?)"
                    );
                }
                return;
            }
            self.steps_left -= 1;

            // A node deleted mid-run is a dangling reference, not an error.
            let (kind, in_names, out_names) = match self.graph.node(node_id) {
                Some(node) => (
                    node.kind.clone(),
                    node.data_inputs().map(|p| p.name.clone()).collect::<Vec<_>>(),
                    node.data_outputs()
                        .map(|p| p.name.clone())
                        .collect::<Vec<_>>(),
                ),
                None => return,
            };

            // Inputs are resolved fresh on every visit; nothing is cached
            // across a run.
            let mut inputs = ValueMap::new();
            for name in &in_names {
                if let Some(value) = self.resolve_input(node_id, name) {
                    inputs.insert(name.clone(), value);
                }
            }

            let outputs = match (self.graph.node(node_id), self.registry.get(&kind)) {
                (Some(node), Some(evaluator)) => {
                    let ctx = EvalCtx::new(&mut *self.sink);
                    evaluator.evaluate(node, &inputs, ctx).await
                }
                _ => ValueMap::new(),
            };

            // Only declared output data ports are written; anything else in
            // the result is discarded, and ports absent from the result keep
            // their previous value.
            if let Some(node) = self.graph.node_mut(node_id) {
                for name in &out_names {
                    if let Some(value) = outputs.get(name) {
                        node.data.insert(name.clone(), value.clone());
                    }
                }
            }

            let targets = self.exec_out.get(&node_id).cloned().unwrap_or_default();
            for target in targets {
                self.step(target).await;
            }
        })
    }

    /// Resolve one input: the most recently added incoming data edge wins;
    /// with no edge, the node's own stored default applies. An edge whose
    /// source lacks the value resolves to absent, not to the default.
    fn resolve_input(&self, node_id: NodeId, port: &str) -> Option<Value> {
        let target = PortRef::new(node_id, port);
        match self.data_in.get(&target).and_then(|sources| sources.last()) {
            Some(source) => self
                .graph
                .node(source.node)
                .and_then(|n| n.data.get(source.port.as_str()))
                .cloned(),
            None => self
                .graph
                .node(node_id)
                .and_then(|n| n.data.get(port))
                .cloned(),
        }
    }
}
