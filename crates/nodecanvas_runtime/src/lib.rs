// SPDX-License-Identifier: MIT OR Apache-2.0
//! Execution engine for NodeCanvas graphs.
//!
//! This crate interprets a graph built with `nodecanvas_graph`:
//! - An evaluator registry mapping node kinds to computation
//! - Built-in evaluators for the stock kinds
//! - Depth-first, strictly sequential traversal along exec edges,
//!   resolving data edges fresh at every visit
//!
//! ## Architecture
//!
//! The engine trusts the editor to have validated edges and never raises
//! on malformed graphs: dangling references and unknown kinds degrade to
//! no-ops, absent inputs to documented defaults. The one historically
//! unbounded failure mode, a control-flow cycle, is truncated by an
//! explicit per-run step budget.

pub mod builtins;
pub mod engine;
pub mod registry;

pub use engine::{Engine, DEFAULT_STEP_LIMIT};
pub use registry::{EvalCtx, Evaluator, FnEvaluator, Registry};
