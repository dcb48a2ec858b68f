// SPDX-License-Identifier: MIT OR Apache-2.0
//! Go signature scanning: a method-receiver pattern tried first, falling
//! back to a plain-function pattern, then a depth-aware top-level comma
//! splitter for both the parameter list and a parenthesized multi-value
//! return.

use crate::{Param, Signature};
use judge_error::SignatureError;
use regex::Regex;

struct RawMatch {
    params: String,
    returns: String,
    receiver_type: Option<String>,
}

fn method_pattern(function_name: &str) -> Regex {
    Regex::new(&format!(
        r"(?s)func\s*\(\s*(?P<receiver>[^)]*?)\s*\)\s*{}\s*\((?P<params>.*?)\)\s*(?P<returns>\([^)]*\)|[^\s{{]+)?\s*\{{",
        regex::escape(function_name)
    ))
    .expect("valid dynamic pattern")
}

fn function_pattern(function_name: &str) -> Regex {
    Regex::new(&format!(
        r"(?s)func\s+{}\s*\((?P<params>.*?)\)\s*(?P<returns>\([^)]*\)|[^\s{{]+)?\s*\{{",
        regex::escape(function_name)
    ))
    .expect("valid dynamic pattern")
}

fn extract_receiver_type(receiver_decl: &str) -> Result<String, SignatureError> {
    let receiver_decl = receiver_decl.trim();
    if receiver_decl.is_empty() {
        return Err(SignatureError::NotFound("<receiver>".to_string()));
    }
    let parts: Vec<&str> = receiver_decl.split_whitespace().collect();
    Ok(parts.last().copied().unwrap_or(receiver_decl).to_string())
}

fn raw_match(source: &str, function_name: &str) -> Result<RawMatch, SignatureError> {
    if let Some(caps) = method_pattern(function_name).captures(source) {
        let receiver_type = extract_receiver_type(&caps["receiver"])?;
        return Ok(RawMatch {
            params: caps.name("params").map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
            returns: caps.name("returns").map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
            receiver_type: Some(receiver_type),
        });
    }

    if let Some(caps) = function_pattern(function_name).captures(source) {
        return Ok(RawMatch {
            params: caps.name("params").map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
            returns: caps.name("returns").map(|m| m.as_str().trim().to_string()).unwrap_or_default(),
            receiver_type: None,
        });
    }

    Err(SignatureError::NotFound(function_name.to_string()))
}

/// Depth-aware split on top-level commas: parens, brackets, and braces
/// nest so a `map[string]int` or `func(int) int` parameter type doesn't
/// get split in the middle.
fn split_top_level(value: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth_paren = 0i32;
    let mut depth_bracket = 0i32;
    let mut depth_brace = 0i32;

    for ch in value.chars() {
        if ch == ',' && depth_paren == 0 && depth_bracket == 0 && depth_brace == 0 {
            parts.push(current.trim().to_string());
            current.clear();
            continue;
        }
        match ch {
            '(' => depth_paren += 1,
            ')' => depth_paren -= 1,
            '[' => depth_bracket += 1,
            ']' => depth_bracket -= 1,
            '{' => depth_brace += 1,
            '}' => depth_brace -= 1,
            _ => {}
        }
        current.push(ch);
    }

    let tail = current.trim().to_string();
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts
}

fn parse_params(params_str: &str) -> Result<Vec<Param>, SignatureError> {
    if params_str.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut params = Vec::new();
    for segment in split_top_level(params_str) {
        let piece = segment.trim();
        if piece.is_empty() {
            continue;
        }

        let Some(split_at) = piece.rfind(' ') else {
            return Err(SignatureError::UnsupportedType(piece.to_string(), "<params>".to_string()));
        };
        let (names_part, type_part) = piece.split_at(split_at);
        let type_part = type_part.trim();
        let param_names: Vec<&str> = names_part.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();

        if param_names.is_empty() || type_part.is_empty() {
            return Err(SignatureError::UnsupportedType(piece.to_string(), "<params>".to_string()));
        }

        for name in param_names {
            if name == "_" {
                return Err(SignatureError::UnsupportedIdentifier("_".to_string()));
            }
            params.push(Param { name: name.to_string(), type_name: type_part.to_string() });
        }
    }

    Ok(params)
}

fn extract_return_type(token: &str) -> Result<String, SignatureError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(SignatureError::UnsupportedType(String::new(), "<return>".to_string()));
    }
    match token.rfind(' ') {
        Some(idx) => Ok(token[idx + 1..].trim().to_string()),
        None => Ok(token.to_string()),
    }
}

fn parse_returns(returns_str: &str) -> Result<Vec<String>, SignatureError> {
    let raw = returns_str.trim();
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    if let Some(inner) = raw.strip_prefix('(').and_then(|s| s.strip_suffix(')')) {
        let inner = inner.trim();
        if inner.is_empty() {
            return Ok(Vec::new());
        }
        return split_top_level(inner).into_iter().map(|t| extract_return_type(&t)).collect();
    }

    Ok(vec![extract_return_type(raw)?])
}

fn normalize_type(type_name: &str) -> String {
    type_name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// `true` if `type_name` is `ListNode` or `*ListNode`.
pub fn is_listnode_type(type_name: &str) -> bool {
    matches!(normalize_type(type_name).as_str(), "*ListNode" | "ListNode")
}

/// `true` if `type_name` is `TreeNode` or `*TreeNode`.
pub fn is_treenode_type(type_name: &str) -> bool {
    matches!(normalize_type(type_name).as_str(), "*TreeNode" | "TreeNode")
}

/// `true` if `type_name` is `Node` or `*Node` (the graph node binding).
pub fn is_graph_node_type(type_name: &str) -> bool {
    matches!(normalize_type(type_name).as_str(), "*Node" | "Node")
}

/// `true` if `type_name` is a pointer type.
pub fn is_pointer_type(type_name: &str) -> bool {
    normalize_type(type_name).starts_with('*')
}

/// Parse `function_name`'s declared signature out of `source`.
///
/// Tries the method-receiver form first (`func (s *Solution) Name(...)`),
/// then the plain-function form (`func Name(...)`).
pub fn parse_signature(source: &str, function_name: &str) -> Result<Signature, SignatureError> {
    let raw = raw_match(source, function_name)?;
    let params = parse_params(&raw.params)?;
    let returns = parse_returns(&raw.returns)?;

    let return_type = match returns.len() {
        0 => None,
        1 => Some(returns[0].clone()),
        2 if returns[1] == "error" => Some(returns[0].clone()),
        _ => {
            return Err(SignatureError::UnsupportedType(
                raw.returns,
                function_name.to_string(),
            ))
        }
    };

    Ok(Signature { params, return_type, receiver_type: raw.receiver_type })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_function() {
        let src = "func TwoSum(nums []int, target int) []int {\n return nil\n}";
        let sig = parse_signature(src, "TwoSum").unwrap();
        assert_eq!(sig.params.len(), 2);
        assert_eq!(sig.params[0].name, "nums");
        assert_eq!(sig.params[0].type_name, "[]int");
        assert_eq!(sig.return_type.as_deref(), Some("[]int"));
        assert!(sig.receiver_type.is_none());
    }

    #[test]
    fn parses_method_receiver() {
        let src = "func (s *Solution) Solve(x int) (int, error) {\n return x, nil\n}";
        let sig = parse_signature(src, "Solve").unwrap();
        assert_eq!(sig.receiver_type.as_deref(), Some("*Solution"));
        assert_eq!(sig.return_type.as_deref(), Some("int"));
    }

    #[test]
    fn rejects_blank_identifier() {
        let src = "func F(_ int) int { return 0 }";
        assert!(matches!(
            parse_signature(src, "F"),
            Err(SignatureError::UnsupportedIdentifier(ref s)) if s == "_"
        ));
    }

    #[test]
    fn rejects_unsupported_multi_return() {
        let src = "func F(x int) (int, int, error) { return x, x, nil }";
        assert!(matches!(parse_signature(src, "F"), Err(SignatureError::UnsupportedType(_, _))));
    }

    #[test]
    fn missing_function_is_not_found() {
        let src = "func Other() {}";
        assert!(matches!(parse_signature(src, "Missing"), Err(SignatureError::NotFound(_))));
    }

    #[test]
    fn splits_nested_generic_params_at_top_level() {
        let segments = split_top_level("a map[string]int, b func(int) int");
        assert_eq!(segments, vec!["a map[string]int".to_string(), "b func(int) int".to_string()]);
    }

    #[test]
    fn classifies_tree_and_pointer_types() {
        assert!(is_treenode_type("*TreeNode"));
        assert!(is_listnode_type("ListNode"));
        assert!(is_graph_node_type("*Node"));
        assert!(is_pointer_type("*TreeNode"));
        assert!(!is_pointer_type("TreeNode"));
    }
}
