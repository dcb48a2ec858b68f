// SPDX-License-Identifier: MIT OR Apache-2.0
//! judge-error
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! Error taxonomy for the code-judging core. Every crate in this workspace
//! that can fail threads its failures through [`ExecutionError`] (or, at the
//! boundary, [`InputError`]) rather than inventing crate-local error enums.

use thiserror::Error;

/// Errors rejected before any sandbox is touched.
///
/// Per the propagation policy, these are surfaced at the HTTP boundary as a
/// 4xx and never reach [`ExecutionError`].
#[derive(Debug, Error)]
pub enum InputError {
    /// The requested language has no registered executor.
    #[error("Unsupported language")]
    UnsupportedLanguage,

    /// `HOST_SANDBOX_ROOT` was not set.
    #[error("HOST_SANDBOX_ROOT not set")]
    MissingHostSandboxRoot,

    /// `HOST_SANDBOX_ROOT` was set but empty after trimming.
    #[error("HOST_SANDBOX_ROOT is empty")]
    EmptyHostSandboxRoot,

    /// `HOST_SANDBOX_ROOT` looked like a Windows drive-letter path.
    #[error(
        "HOST_SANDBOX_ROOT must be a Docker-daemon-visible Linux path \
         (for Windows Docker Desktop use /run/desktop/mnt/host/<drive>/...)"
    )]
    WindowsDrivePath,

    /// A request field violated a size/count constraint.
    #[error("invalid request: {0}")]
    Validation(String),
}

/// Errors raised during `compile`/`run`/`cleanup` of a single executor.
///
/// This is the union the pipeline matches on to compute a verdict (spec
/// §4.6, §7). The match in `judge-pipeline` is exhaustive by design: adding
/// a variant here forces a deliberate verdict mapping decision at the call
/// site rather than falling through to a generic error.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Harness rendering, toolchain invocation, or signature parsing failed
    /// before any test could run.
    #[error("{0}")]
    Compile(String),

    /// The compiled/interpreted program crashed, produced malformed output,
    /// or the sandbox itself could not be reached.
    #[error("{0}")]
    Runtime(String),

    /// The per-test wall-clock budget was exceeded.
    #[error("execution timed out")]
    Timeout,
}

impl ExecutionError {
    /// Shorthand for a runtime error with a generic message, used when
    /// neither the harness's `error` field nor stderr is available.
    pub fn generic_runtime() -> Self {
        ExecutionError::Runtime("Runtime error".to_string())
    }
}

/// Errors from rendering a harness template.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The rendered program still contains an unresolved
    /// `__..._PLACEHOLDER__` token after every known substitution was
    /// applied — a hard invariant violation (spec §8, §9).
    #[error("unresolved harness placeholder: {0}")]
    UnresolvedPlaceholder(String),

    /// A declared parameter or return type has no entry in the binding
    /// table for this language.
    #[error("unsupported type: {0}")]
    UnsupportedType(String),
}

impl From<HarnessError> for ExecutionError {
    fn from(value: HarnessError) -> Self {
        ExecutionError::Compile(value.to_string())
    }
}

/// Errors from the best-effort signature scanner (C, C++, Go, Rust).
#[derive(Debug, Error)]
pub enum SignatureError {
    /// The scanner could not locate a function/method named
    /// `function_name` with an unambiguous signature.
    #[error("could not parse signature for '{0}'")]
    NotFound(String),

    /// A parameter or return type token could not be classified.
    #[error("unsupported type '{0}' in signature of '{1}'")]
    UnsupportedType(String, String),

    /// The declared identifier is not bindable (e.g. Go's blank `_`).
    #[error("identifier '{0}' is not supported as an input parameter")]
    UnsupportedIdentifier(String),
}

impl From<SignatureError> for ExecutionError {
    fn from(value: SignatureError) -> Self {
        ExecutionError::Compile(value.to_string())
    }
}
