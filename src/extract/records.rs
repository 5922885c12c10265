// src/extract/records.rs
use serde_json::Value;

use crate::config::consts::{DISCRIMINATOR, MAX_WALK_NODES};
use crate::model::RawResultRecord;

/// Pull raw result records out of a parsed fragment.
///
/// The trailing element is the interesting container: its `results`, then the
/// `results` of each of its `children`. When neither yields anything the whole
/// fragment is walked for objects that carry the discriminator field.
pub fn extract(parsed: &[Value]) -> Vec<RawResultRecord> {
    let mut out = Vec::new();

    if let Some(tail) = parsed.last().and_then(Value::as_object) {
        if let Some(results) = tail.get("results").and_then(Value::as_array) {
            out.extend(results.iter().cloned());
        }
        if let Some(children) = tail.get("children").and_then(Value::as_array) {
            for child in children {
                if let Some(results) = child.get("results").and_then(Value::as_array) {
                    out.extend(results.iter().cloned());
                }
            }
        }
    }

    if out.is_empty() {
        out = walk_with_limit(parsed, MAX_WALK_NODES);
    }
    out
}

/// Depth-first, document-order walk collecting every object that has the
/// discriminator key, nested ones included. Stops after `MAX_WALK_NODES`
/// containers.
pub fn walk_discriminated(root: &Value) -> Vec<RawResultRecord> {
    walk_with_limit(std::slice::from_ref(root), MAX_WALK_NODES)
}

pub fn walk_with_limit(roots: &[Value], max_nodes: usize) -> Vec<RawResultRecord> {
    let mut out = Vec::new();
    let mut stack: Vec<&Value> = roots.iter().rev().filter(|c| c.is_object() || c.is_array()).collect();
    let mut visited = 0usize;

    while let Some(v) = stack.pop() {
        visited += 1;
        if visited > max_nodes {
            logd!("Extract: walk stopped after {max_nodes} nodes");
            break;
        }
        match v {
            Value::Object(map) => {
                if map.contains_key(DISCRIMINATOR) {
                    out.push(v.clone());
                }
                // reversed so the first field is visited first
                stack.extend(map.values().rev().filter(|c| c.is_object() || c.is_array()));
            }
            Value::Array(items) => {
                stack.extend(items.iter().rev().filter(|c| c.is_object() || c.is_array()));
            }
            _ => {}
        }
    }
    out
}
