// SPDX-License-Identifier: MIT OR Apache-2.0
//! judge-sigparse
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! Best-effort signature scanner for the four signature-extraction
//! languages (spec §4.2): C, C++, and Go are scanned with a regex over the
//! user's own source text, the same trick each original per-language
//! executor used; Rust is scanned with `syn`, since its source text is
//! already a well-formed `syn::File` and reparsing it with a regex would
//! throw that structure away for no benefit.

/// C signature scanning.
pub mod c;
/// C++ signature scanning.
pub mod cpp;
/// Go signature scanning.
pub mod go;
/// Rust signature scanning (via `syn`).
pub mod rust;

/// A single declared parameter: its source-level name and raw type text
/// (language-specific; each `judge-executors` render function matches on
/// this raw text directly to choose its binding/call code).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// The parameter's identifier as declared.
    pub name: String,
    /// The parameter's type, exactly as written (whitespace-normalized).
    pub type_name: String,
}

/// A recovered function signature.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    /// Declared parameters, in order.
    pub params: Vec<Param>,
    /// Declared return type, or `None` for a bare `void`/no-return form.
    pub return_type: Option<String>,
    /// For Go methods, the receiver's type (e.g. `*Solution`); `None` for
    /// plain functions and every other language.
    pub receiver_type: Option<String>,
}
