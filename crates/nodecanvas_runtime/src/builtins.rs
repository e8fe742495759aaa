// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in evaluators for the stock node kinds.

use crate::registry::{EvalCtx, Registry};
use nodecanvas_graph::factory::kinds;
use nodecanvas_graph::{Node, Value, ValueMap, Vec3};

/// Register every built-in evaluator.
pub fn install(registry: &mut Registry) {
    registry.define_fn(kinds::START, start);
    registry.define_fn(kinds::ADD, add);
    registry.define_fn(kinds::MUL, mul);
    registry.define_fn(kinds::VEC3, vec3);
    registry.define_fn(kinds::NUMBER, stored_number);
    registry.define_fn(kinds::DOT, dot);
    registry.define_fn(kinds::LENGTH, length);
    registry.define_fn(kinds::PRINT, print);
}

fn number(inputs: &ValueMap, name: &str) -> f64 {
    inputs.get(name).map(Value::as_number).unwrap_or(0.0)
}

fn vector(inputs: &ValueMap, name: &str) -> Vec3 {
    inputs.get(name).map(Value::as_vec3).unwrap_or(Vec3::ZERO)
}

fn output(name: &str, value: Value) -> ValueMap {
    ValueMap::from_iter([(name.to_string(), value)])
}

/// Traversal root; produces nothing.
fn start(_node: &Node, _inputs: &ValueMap, _ctx: &mut EvalCtx<'_>) -> ValueMap {
    ValueMap::new()
}

fn add(_node: &Node, inputs: &ValueMap, ctx: &mut EvalCtx<'_>) -> ValueMap {
    let a = number(inputs, "a");
    let b = number(inputs, "b");
    let out = a + b;
    ctx.log(format!("Add: {a}+{b}={out}"));
    output("out", Value::Number(out))
}

fn mul(_node: &Node, inputs: &ValueMap, ctx: &mut EvalCtx<'_>) -> ValueMap {
    let a = number(inputs, "a");
    let b = number(inputs, "b");
    let out = a * b;
    ctx.log(format!("Mul: {a}*{b}={out}"));
    output("out", Value::Number(out))
}

fn vec3(_node: &Node, inputs: &ValueMap, ctx: &mut EvalCtx<'_>) -> ValueMap {
    let v = Vec3::new(
        number(inputs, "x"),
        number(inputs, "y"),
        number(inputs, "z"),
    );
    ctx.log(format!("Vec3: ({}, {}, {})", v.x, v.y, v.z));
    output("v", Value::Vector3(v))
}

/// Exposes the stored `num` field as output `v`, preferring a connected
/// input.
fn stored_number(node: &Node, inputs: &ValueMap, _ctx: &mut EvalCtx<'_>) -> ValueMap {
    let v = inputs
        .get("num")
        .or_else(|| node.data.get("num"))
        .map(Value::as_number)
        .unwrap_or(0.0);
    output("v", Value::Number(v))
}

fn dot(_node: &Node, inputs: &ValueMap, ctx: &mut EvalCtx<'_>) -> ValueMap {
    let a = vector(inputs, "a");
    let b = vector(inputs, "b");
    let out = a.dot(&b);
    ctx.log(format!("Dot: ⟨a,b⟩={out}"));
    output("out", Value::Number(out))
}

fn length(_node: &Node, inputs: &ValueMap, ctx: &mut EvalCtx<'_>) -> ValueMap {
    let out = vector(inputs, "a").length();
    ctx.log(format!("Length: ∥a∥={out}"));
    output("out", Value::Number(out))
}

fn print(_node: &Node, inputs: &ValueMap, ctx: &mut EvalCtx<'_>) -> ValueMap {
    match inputs.get("in") {
        Some(value) => ctx.log(format!("Print: {value}")),
        None => ctx.log("Print: <no input connected or undefined>"),
    }
    ValueMap::new()
}
