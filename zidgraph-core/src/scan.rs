//! Call reference discovery inside composition trees.
//!
//! A composition is a function call expression (`Z7`) whose arguments may
//! themselves be calls, lists or literals, nested to any depth. The function
//! being invoked sits under the `Z7K1` key of each call object.

use serde_json::Value;
use std::collections::HashSet;

/// Key naming the invoked function inside a function call object.
pub const CALL_REFERENCE_KEY: &str = "Z7K1";

/// Collect every value stored under [`CALL_REFERENCE_KEY`], depth first, in
/// document order.
///
/// A captured value is also searched, before the keys that follow it.
/// Repeats are kept and non-string values are returned as-is. The walk uses
/// an explicit stack, so nesting depth is limited only by memory.
pub fn collect_call_references(root: &Value) -> Vec<&Value> {
    let mut found = Vec::new();
    // (node, whether the node itself sits under the call reference key)
    let mut stack: Vec<(&Value, bool)> = vec![(root, false)];

    while let Some((node, is_reference)) = stack.pop() {
        if is_reference {
            found.push(node);
        }

        match node {
            Value::Object(map) => {
                for (key, child) in map.iter().rev() {
                    stack.push((child, key == CALL_REFERENCE_KEY));
                }
            }
            Value::Array(items) => {
                for child in items.iter().rev() {
                    stack.push((child, false));
                }
            }
            _ => {}
        }
    }

    found
}

/// String call targets of a composition, first occurrence only.
pub fn unique_call_targets(composition: &Value) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    for target in collect_call_references(composition)
        .into_iter()
        .filter_map(Value::as_str)
    {
        if seen.insert(target) {
            targets.push(target);
        }
    }

    targets
}
