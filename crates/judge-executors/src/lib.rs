// SPDX-License-Identifier: MIT OR Apache-2.0
//! judge-executors
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! Per-language sandbox executors: one [`Executor`] implementation per
//! wrapping strategy (spec §4.2), both driving the same `docker` CLI
//! lifecycle underneath. `new_executor` is the single dispatch point the
//! pipeline calls; callers never construct [`ReflectionExecutor`] or
//! [`SignatureExecutor`] directly.

mod docker;
/// The `compile`/`run`/`cleanup` contract and lifecycle state.
pub mod executor;
/// Python, JavaScript, TypeScript, Java, Kotlin, C# executor.
pub mod reflection;
/// C, C++, Go, Rust executor.
pub mod signature;

pub use executor::{Executor, State};
use judge_core::{ExecutionRequest, ResourcePolicy};
use judge_sandbox_paths::SandboxRoots;
use reflection::ReflectionExecutor;
use signature::SignatureExecutor;

/// Build the right [`Executor`] for `request.language`.
pub fn new_executor(request: &ExecutionRequest, roots: SandboxRoots, policy: ResourcePolicy) -> Box<dyn Executor> {
    if request.language.is_signature_extraction() {
        Box::new(SignatureExecutor::new(
            request.language,
            request.source_code.clone(),
            request.function_name.clone(),
            roots,
            policy,
        ))
    } else {
        Box::new(ReflectionExecutor::new(
            request.language,
            request.source_code.clone(),
            request.function_name.clone(),
            roots,
            policy,
        ))
    }
}
