// SPDX-License-Identifier: MIT OR Apache-2.0
//! judge-pipeline
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! Ties the per-language [`judge_executors::Executor`] implementations to
//! a single entry point: build the right executor for a request, drive
//! it through compile and every test case, and compute the terminal
//! [`judge_core::Verdict`] (spec §4.6).

/// Compile-time language-to-executor dispatch.
pub mod registry;
/// The compile/run/verdict orchestration loop.
pub mod pipeline;

pub use pipeline::run_request;
pub use registry::ExecutorRegistry;
