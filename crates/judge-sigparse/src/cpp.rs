// SPDX-License-Identifier: MIT OR Apache-2.0
//! C++ signature scanning: looser than C's — the return-type token is
//! matched non-greedily up to the function name rather than restricted to
//! an identifier/`*` charset, since C++ return types can carry namespaces
//! and template brackets (`vector<int>`). Parameter name extraction still
//! strips a trailing `&`/`*` the way a reference or pointer parameter
//! would carry one.

use crate::{Param, Signature};
use judge_error::SignatureError;
use regex::Regex;

fn signature_pattern(function_name: &str) -> Regex {
    Regex::new(&format!(
        r"(?s)([^\s]+(?:\s*\*?)?)\s+{}\s*\((.*?)\)",
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
            let mut tokens: Vec<&str> = piece.split_whitespace().collect();
            let name = tokens.pop().unwrap_or_default().replace('&', "").replace('*', "");
            let type_name = tokens.join(" ");
            Param { name, type_name }
        })
        .collect()
}

/// Parse `function_name`'s declared signature out of `source`.
pub fn parse_signature(source: &str, function_name: &str) -> Result<Signature, SignatureError> {
    let caps = signature_pattern(function_name)
        .captures(source)
        .ok_or_else(|| SignatureError::NotFound(function_name.to_string()))?;

    let return_type = caps[1].trim().to_string();
    let params = parse_params(&caps[2]);

    Ok(Signature { params, return_type: Some(return_type), receiver_type: None })
}

/// Strip a `const`/reference qualifier, matching the original's
/// normalization before classifying a parameter's bindable shape
/// (`vector<int>`, `ListNode*`, ...).
pub fn clean_type(type_name: &str) -> String {
    type_name.replace("const", "").replace('&', "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vector_signature() {
        let src = "vector<int> twoSum(vector<int>& nums, int target) {\n return {};\n}";
        let sig = parse_signature(src, "twoSum").unwrap();
        assert_eq!(sig.return_type.as_deref(), Some("vector<int>"));
        assert_eq!(sig.params[0].name, "nums");
        assert_eq!(clean_type(&sig.params[0].type_name), "vector<int>");
    }

    #[test]
    fn parses_pointer_parameter() {
        let src = "ListNode* reverse(ListNode* head) {\n return head;\n}";
        let sig = parse_signature(src, "reverse").unwrap();
        assert_eq!(sig.params[0].name, "head");
    }

    #[test]
    fn missing_function_is_not_found() {
        let src = "int other() { return 0; }";
        assert!(matches!(parse_signature(src, "missing"), Err(SignatureError::NotFound(_))));
    }
}
