// SPDX-License-Identifier: MIT OR Apache-2.0
//! The executor contract every language implements (spec §4.1): a
//! `NEW -> READY -> CLOSED` state machine around `compile`/`run`/`cleanup`.
//! `cleanup` is callable from any state and is always idempotent, since
//! the pipeline calls it unconditionally once a request finishes,
//! regardless of which state the request failed in.

use async_trait::async_trait;
use judge_error::ExecutionError;
use serde_json::{Map, Value};

/// Where an executor sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Constructed, nothing started yet.
    New,
    /// Sandbox container is alive and the solution binary/interpreter is
    /// ready to accept `run` calls.
    Ready,
    /// Torn down; no further `run` calls are valid.
    Closed,
}

/// One compile-run-cleanup lifecycle for a single [`judge_core::ExecutionRequest`].
///
/// Implementations own whatever sandbox state `compile` allocates (a
/// workspace directory, a running container id) and must release all of
/// it in `cleanup`.
#[async_trait]
pub trait Executor: Send {
    /// Render the harness, write it into a fresh sandbox workspace, start
    /// the container, and build/typecheck the solution. Must be called
    /// exactly once before any `run` call.
    async fn compile(&mut self) -> Result<(), ExecutionError>;

    /// Run the compiled/interpreted solution against one test case's
    /// input and return the raw produced JSON value (before verdict
    /// comparison). Only valid once `compile` has returned `Ok`.
    async fn run(&mut self, input: &Map<String, Value>) -> Result<Value, ExecutionError>;

    /// Tear down the sandbox container and remove the workspace directory.
    /// Safe to call from any state, any number of times.
    async fn cleanup(&mut self);

    /// Current lifecycle state.
    fn state(&self) -> State;
}
