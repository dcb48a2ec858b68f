// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rust signature scanning via `syn`: unlike the other three
//! signature-extraction languages, the source is parsed into a real AST
//! (`syn::File`) rather than matched with a regex, since `syn` is already
//! the idiomatic way to inspect Rust source from Rust and a hand-rolled
//! pattern would be both less correct and no simpler.

use crate::{Param, Signature};
use judge_error::SignatureError;
use syn::{FnArg, Item, Pat, ReturnType, Type};

fn type_to_string(ty: &Type) -> String {
    use quote::ToTokens;
    let mut tokens = proc_macro2::TokenStream::new();
    ty.to_tokens(&mut tokens);
    tokens.to_string().replace(' ', "")
}

/// Parse `function_name`'s declared signature out of `source`.
///
/// Only free functions are supported (no `impl` blocks): the fixed
/// harness invokes the solution as a bare function call, the same
/// constraint the C template carries.
pub fn parse_signature(source: &str, function_name: &str) -> Result<Signature, SignatureError> {
    let file = syn::parse_file(source)
        .map_err(|_| SignatureError::NotFound(function_name.to_string()))?;

    let item_fn = file
        .items
        .into_iter()
        .find_map(|item| match item {
            Item::Fn(item_fn) if item_fn.sig.ident == function_name => Some(item_fn),
            _ => None,
        })
        .ok_or_else(|| SignatureError::NotFound(function_name.to_string()))?;

    let mut params = Vec::new();
    for input in &item_fn.sig.inputs {
        match input {
            FnArg::Typed(pat_type) => {
                let name = match pat_type.pat.as_ref() {
                    Pat::Ident(pat_ident) => pat_ident.ident.to_string(),
                    other => {
                        return Err(SignatureError::UnsupportedIdentifier(quote_pat(other)));
                    }
                };
                params.push(Param { name, type_name: type_to_string(&pat_type.ty) });
            }
            FnArg::Receiver(_) => {
                return Err(SignatureError::UnsupportedIdentifier("self".to_string()));
            }
        }
    }

    let return_type = match &item_fn.sig.output {
        ReturnType::Default => None,
        ReturnType::Type(_, ty) => Some(type_to_string(ty)),
    };

    Ok(Signature { params, return_type, receiver_type: None })
}

fn quote_pat(pat: &Pat) -> String {
    use quote::ToTokens;
    let mut tokens = proc_macro2::TokenStream::new();
    pat.to_tokens(&mut tokens);
    tokens.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalar_signature() {
        let src = "fn add(a: i64, b: i64) -> i64 { a + b }";
        let sig = parse_signature(src, "add").unwrap();
        assert_eq!(sig.params.len(), 2);
        assert_eq!(sig.params[0].name, "a");
        assert_eq!(sig.params[0].type_name, "i64");
        assert_eq!(sig.return_type.as_deref(), Some("i64"));
    }

    #[test]
    fn parses_vec_parameter() {
        let src = "fn two_sum(nums: Vec<i64>, target: i64) -> Vec<i64> { nums }";
        let sig = parse_signature(src, "two_sum").unwrap();
        assert_eq!(sig.params[0].type_name, "Vec<i64>");
    }

    #[test]
    fn missing_function_is_not_found() {
        let src = "fn other() {}";
        assert!(matches!(parse_signature(src, "missing"), Err(SignatureError::NotFound(_))));
    }

    #[test]
    fn unsupported_invalid_source_is_not_found() {
        let src = "this is not rust";
        assert!(matches!(parse_signature(src, "missing"), Err(SignatureError::NotFound(_))));
    }
}
