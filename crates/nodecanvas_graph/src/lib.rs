// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node graph data model for NodeCanvas.
//!
//! This crate provides the shared graph structure that the canvas editor
//! mutates and the runtime executes:
//! - Typed, directional ports with an exec/data split
//! - Connection validation
//! - An insertion-ordered node/edge arena behind id handles
//! - Node templates for the built-in kinds
//! - Structural snapshot serialization
//!
//! ## Architecture
//!
//! Nodes carry a schema-less `data` map of [`value::Value`]s keyed by
//! port name; the runtime reads inputs from it and writes outputs back.
//! Edges reference ports by node id plus port name, so snapshots
//! round-trip without re-resolving identities.

pub mod edge;
pub mod factory;
pub mod graph;
pub mod node;
pub mod port;
pub mod value;

pub use edge::{Edge, EdgeId, PortRef};
pub use factory::{NodeCatalog, NodeTemplate};
pub use graph::{ConnectError, Graph, Snapshot};
pub use node::{Node, NodeId};
pub use port::{Port, PortDirection, PortId, PortType};
pub use value::{Value, ValueMap, Vec3};
