// SPDX-License-Identifier: MIT OR Apache-2.0
//! Canonical JSON equality for the `wrong_answer` comparison (spec §4.6, §9).
//!
//! `serde_json::Value`'s derived `PartialEq` already gives almost exactly
//! the semantics spec.md asks for (arrays order-sensitive, objects key-set
//! equal and value-equal), with one gap: it distinguishes `Number(2)` from
//! `Number(2.0)` because they carry different internal representations.
//! Spec §9 explicitly calls for "integer vs. floating JSON numbers compared
//! by numeric value with no tolerance", so numbers get dedicated handling;
//! everything else recurses structurally.

use serde_json::Value;

/// Deep JSON equality per spec §4.6 / §9: numeric equality is exact (by
/// value, not by representation), arrays are order-sensitive, and objects
/// are key-set-equal with equal values.
pub fn json_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| json_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(k, v)| b.get(k).is_some_and(|bv| json_equal(v, bv)))
        }
        (a, b) => a == b,
    }
}

fn numbers_equal(a: &serde_json::Number, b: &serde_json::Number) -> bool {
    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return a == b;
    }
    // Fall through to f64 comparison so `2` and `2.0` compare equal, as
    // required: exact numeric equality, not representation equality.
    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_and_float_numeric_equal() {
        assert!(json_equal(&json!(2), &json!(2.0)));
        assert!(json_equal(&json!(-3), &json!(-3.0)));
    }

    #[test]
    fn arrays_are_order_sensitive() {
        assert!(!json_equal(&json!([1, 2, 3]), &json!([3, 2, 1])));
        assert!(json_equal(&json!([1, 2, 3]), &json!([1, 2, 3])));
    }

    #[test]
    fn objects_are_key_set_equal_and_value_equal() {
        assert!(json_equal(
            &json!({"a": 1, "b": 2}),
            &json!({"b": 2, "a": 1})
        ));
        assert!(!json_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!json_equal(&json!({"a": 1}), &json!({"a": 2})));
    }

    #[test]
    fn nested_tree_like_structures() {
        let a = json!([4, 2, 7, 1, 3, 6, 9]);
        let b = json!([4, 2.0, 7, 1, 3, 6, 9]);
        assert!(json_equal(&a, &b));
    }

    #[test]
    fn mismatched_types_are_unequal() {
        assert!(!json_equal(&json!("5"), &json!(5)));
        assert!(!json_equal(&json!(null), &json!(false)));
    }
}
