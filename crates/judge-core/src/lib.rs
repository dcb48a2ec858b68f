// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
//! judge-core
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! The stable contract for the code-judging core: request/response shapes,
//! the supported-language enum, the resource budget applied to every
//! sandbox, and the canonical JSON equality used to compute `wrong_answer`.

/// Overridable resource policy (memory, CPU, pids, timeouts).
pub mod policy;
/// Request/response wire types.
pub mod request;
/// JSON canonical equality for verdict comparison.
pub mod equality;
/// TOML-backed configuration loading.
pub mod config;

pub use equality::json_equal;
pub use policy::ResourcePolicy;
pub use request::{ExecutionRequest, Language, TestCase, Verdict};

/// Contract version embedded in `/health` responses.
///
/// # Examples
///
/// ```
/// assert_eq!(judge_core::CONTRACT_VERSION, "judge/v1");
/// ```
pub const CONTRACT_VERSION: &str = "judge/v1";
