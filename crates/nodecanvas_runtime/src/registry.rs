// SPDX-License-Identifier: MIT OR Apache-2.0
//! Evaluator registry: maps node kinds to their evaluation functions.

use futures::future::{self, FutureExt, LocalBoxFuture};
use nodecanvas_graph::{Node, ValueMap};

/// The capability handed to evaluators: a single `log` sink.
///
/// Evaluators must be side-effect-free apart from calls to
/// [`log`](EvalCtx::log); they never mutate the node or inputs they
/// receive.
pub struct EvalCtx<'a> {
    sink: &'a mut dyn FnMut(&str),
}

impl<'a> EvalCtx<'a> {
    /// Wrap a log sink for one evaluator invocation.
    pub fn new(sink: &'a mut dyn FnMut(&str)) -> Self {
        Self { sink }
    }

    /// Emit one line of output.
    pub fn log(&mut self, line: impl AsRef<str>) {
        (self.sink)(line.as_ref());
    }
}

/// The computation bound to a node kind.
///
/// Receives the node, its resolved inputs by port name, and the log
/// capability; returns computed outputs by port name. The future is
/// locally boxed: evaluators may await external effects, but execution
/// stays single-threaded and strictly ordered.
pub trait Evaluator {
    /// Evaluate one visit of a node.
    fn evaluate<'a>(
        &'a self,
        node: &'a Node,
        inputs: &'a ValueMap,
        ctx: EvalCtx<'a>,
    ) -> LocalBoxFuture<'a, ValueMap>;
}

/// Adapter turning a plain synchronous function into an [`Evaluator`].
///
/// All built-in evaluators are synchronous.
pub struct FnEvaluator<F>(
    /// The wrapped function
    pub F,
);

impl<F> Evaluator for FnEvaluator<F>
where
    F: Fn(&Node, &ValueMap, &mut EvalCtx<'_>) -> ValueMap,
{
    fn evaluate<'a>(
        &'a self,
        node: &'a Node,
        inputs: &'a ValueMap,
        mut ctx: EvalCtx<'a>,
    ) -> LocalBoxFuture<'a, ValueMap> {
        let outputs = (self.0)(node, inputs, &mut ctx);
        future::ready(outputs).boxed_local()
    }
}

/// Registry of evaluators by node kind.
///
/// Looked up by exact kind match; a kind with no evaluator is a no-op at
/// run time, not an error.
#[derive(Default)]
pub struct Registry {
    evaluators: indexmap::IndexMap<String, Box<dyn Evaluator>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in evaluators.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtins::install(&mut registry);
        registry
    }

    /// Bind an evaluator to a kind. The last registration for a kind wins.
    pub fn define<E>(&mut self, kind: impl Into<String>, evaluator: E)
    where
        E: Evaluator + 'static,
    {
        self.evaluators.insert(kind.into(), Box::new(evaluator));
    }

    /// Bind a synchronous function to a kind.
    pub fn define_fn<F>(&mut self, kind: impl Into<String>, f: F)
    where
        F: Fn(&Node, &ValueMap, &mut EvalCtx<'_>) -> ValueMap + 'static,
    {
        self.define(kind, FnEvaluator(f));
    }

    /// Look up the evaluator for a kind.
    pub fn get(&self, kind: &str) -> Option<&dyn Evaluator> {
        self.evaluators.get(kind).map(|e| &**e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodecanvas_graph::Value;

    fn one(_node: &Node, _inputs: &ValueMap, _ctx: &mut EvalCtx<'_>) -> ValueMap {
        ValueMap::from_iter([("out".to_string(), Value::Number(1.0))])
    }

    fn two(_node: &Node, _inputs: &ValueMap, _ctx: &mut EvalCtx<'_>) -> ValueMap {
        ValueMap::from_iter([("out".to_string(), Value::Number(2.0))])
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = Registry::new();
        registry.define_fn("const", one);
        registry.define_fn("const", two);

        let node = Node::new("const");
        let inputs = ValueMap::new();
        let mut lines: Vec<String> = Vec::new();
        let mut sink = |l: &str| lines.push(l.to_string());

        let evaluator = registry.get("const").unwrap();
        let outputs =
            pollster::block_on(evaluator.evaluate(&node, &inputs, EvalCtx::new(&mut sink)));
        assert_eq!(outputs.get("out"), Some(&Value::Number(2.0)));
    }

    #[test]
    fn test_unknown_kind_has_no_evaluator() {
        assert!(Registry::with_builtins().get("teleport").is_none());
    }
}
