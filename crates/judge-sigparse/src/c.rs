// SPDX-License-Identifier: MIT OR Apache-2.0
//! C signature scanning: a single regex over the user's source text
//! matching `<return type> <function_name>(<params>)`, then a last-space
//! split of each comma-separated parameter into its type and name (C
//! declares the name last, so this is unambiguous even for multi-word
//! types like `long long`).

use crate::{Param, Signature};
use judge_error::SignatureError;
use regex::Regex;

fn signature_pattern(function_name: &str) -> Regex {
    Regex::new(&format!(
        r"(?s)([a-zA-Z_][a-zA-Z0-9_ \*]*)\s+{}\s*\((.*?)\)",
        regex::escape(function_name)
    ))
    .expect("valid dynamic pattern")
}

fn parse_params(params_str: &str) -> Vec<Param> {
    let params_str = params_str.trim();
    if params_str.is_empty() {
        return Vec::new();
    }

    params_str
        .split(',')
        .map(str::trim)
        .map(|piece| {
            let mut parts = piece.split_whitespace();
            let mut tokens: Vec<&str> = parts.by_ref().collect();
            let name = tokens.pop().unwrap_or_default().to_string();
            let type_name = tokens.join(" ");
            Param { name, type_name }
        })
        .collect()
}

/// Parse `function_name`'s declared signature out of `source`.
///
/// Only scalar parameter types (`int`, `long long`, `double`) and a single
/// array parameter type (`int*`) are bindable; the caller is responsible
/// for rejecting anything else when it classifies each [`Param`].
pub fn parse_signature(source: &str, function_name: &str) -> Result<Signature, SignatureError> {
    let caps = signature_pattern(function_name)
        .captures(source)
        .ok_or_else(|| SignatureError::NotFound(function_name.to_string()))?;

    let return_type = caps[1].trim().to_string();
    let params = parse_params(&caps[2]);

    Ok(Signature { params, return_type: Some(return_type), receiver_type: None })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalar_signature() {
        let src = "int add(int a, int b) {\n return a + b;\n}";
        let sig = parse_signature(src, "add").unwrap();
        assert_eq!(sig.return_type.as_deref(), Some("int"));
        assert_eq!(sig.params, vec![
            Param { name: "a".to_string(), type_name: "int".to_string() },
            Param { name: "b".to_string(), type_name: "int".to_string() },
        ]);
    }

    #[test]
    fn parses_array_parameter() {
        let src = "long long sum(int* nums, int numsSize) {\n return 0;\n}";
        let sig = parse_signature(src, "sum").unwrap();
        assert_eq!(sig.return_type.as_deref(), Some("long long"));
        assert_eq!(sig.params[0].type_name, "int*");
        assert_eq!(sig.params[0].name, "nums");
    }

    #[test]
    fn missing_function_is_not_found() {
        let src = "int other(void) { return 0; }";
        assert!(matches!(parse_signature(src, "missing"), Err(SignatureError::NotFound(_))));
    }
}
