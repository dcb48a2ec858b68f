// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end verdict-mapping scenarios (spec §8) driven against a mock
//! executor, standing in for the teacher's `abp-backend-mock` pattern since
//! exercising real `docker` from test runs is out of scope for this core.

use async_trait::async_trait;
use judge_core::{ExecutionRequest, Language, TestCase, Verdict};
use judge_error::ExecutionError;
use judge_executors::{Executor, State};
use judge_pipeline::run_request;
use serde_json::{json, Map, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

/// An [`Executor`] whose `compile`/`run` outcomes are scripted ahead of
/// time, so a pipeline scenario can be expressed as plain data instead of
/// a real sandbox round-trip.
struct MockExecutor {
    compile_result: Option<ExecutionError>,
    /// Set when this scripted scenario models a compile failure that
    /// happens only *after* a container/workspace would already have been
    /// allocated (e.g. a toolchain step failing post-`docker run`), so the
    /// test can assert cleanup actually runs in that case too.
    acquires_resource_on_compile: bool,
    resource_acquired: std::sync::Arc<std::sync::atomic::AtomicBool>,
    run_results: Vec<Result<Value, ExecutionError>>,
    call_count: AtomicUsize,
    cleaned_up: std::sync::Arc<std::sync::atomic::AtomicBool>,
    state: State,
}

impl MockExecutor {
    fn new(
        compile_result: Option<ExecutionError>,
        run_results: Vec<Result<Value, ExecutionError>>,
        cleaned_up: std::sync::Arc<std::sync::atomic::AtomicBool>,
    ) -> Self {
        Self {
            compile_result,
            acquires_resource_on_compile: false,
            resource_acquired: std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false)),
            run_results,
            call_count: AtomicUsize::new(0),
            cleaned_up,
            state: State::New,
        }
    }

    /// Model a compile failure that occurs after the container/workspace
    /// are already live, e.g. `go build` failing inside an already-running
    /// container.
    fn new_failing_after_resource_acquisition(
        compile_result: ExecutionError,
        cleaned_up: std::sync::Arc<std::sync::atomic::AtomicBool>,
        resource_acquired: std::sync::Arc<std::sync::atomic::AtomicBool>,
    ) -> Self {
        Self {
            compile_result: Some(compile_result),
            acquires_resource_on_compile: true,
            resource_acquired,
            run_results: Vec::new(),
            call_count: AtomicUsize::new(0),
            cleaned_up,
            state: State::New,
        }
    }
}

#[async_trait]
impl Executor for MockExecutor {
    async fn compile(&mut self) -> Result<(), ExecutionError> {
        if self.acquires_resource_on_compile {
            self.resource_acquired.store(true, Ordering::SeqCst);
        }
        match self.compile_result.take() {
            Some(err) => Err(err),
            None => {
                self.state = State::Ready;
                Ok(())
            }
        }
    }

    async fn run(&mut self, _input: &Map<String, Value>) -> Result<Value, ExecutionError> {
        let index = self.call_count.fetch_add(1, Ordering::SeqCst);
        match self.run_results.get_mut(index) {
            Some(slot) => std::mem::replace(slot, Err(ExecutionError::generic_runtime())),
            None => Err(ExecutionError::generic_runtime()),
        }
    }

    async fn cleanup(&mut self) {
        self.cleaned_up.store(true, Ordering::SeqCst);
        self.state = State::Closed;
    }

    fn state(&self) -> State {
        self.state
    }
}

fn request_with(test_cases: Vec<TestCase>) -> ExecutionRequest {
    ExecutionRequest::new(Language::Python, "def solve(x): return x".to_string(), "solve".to_string(), test_cases)
        .expect("valid request")
}

fn case(expected: Value) -> TestCase {
    TestCase {
        input: Map::new(),
        expected_output: expected,
    }
}

#[tokio::test]
async fn every_test_passing_is_accepted() {
    let cleaned_up = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let executor = Box::new(MockExecutor::new(
        None,
        vec![Ok(json!(1)), Ok(json!(2))],
        cleaned_up.clone(),
    ));
    let request = request_with(vec![case(json!(1)), case(json!(2))]);

    let verdict = run_request(&request, executor).await;

    assert_eq!(verdict, Verdict::Accepted);
    assert!(cleaned_up.load(Ordering::SeqCst));
}

#[tokio::test]
async fn mismatched_result_is_wrong_answer_at_first_failing_index() {
    let cleaned_up = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let executor = Box::new(MockExecutor::new(
        None,
        vec![Ok(json!(1)), Ok(json!(99))],
        cleaned_up.clone(),
    ));
    let request = request_with(vec![case(json!(1)), case(json!(2))]);

    let verdict = run_request(&request, executor).await;

    assert_eq!(verdict, Verdict::WrongAnswer { failed_test_case_index: 1 });
    assert!(cleaned_up.load(Ordering::SeqCst));
}

#[tokio::test]
async fn numeric_representation_does_not_cause_a_false_mismatch() {
    let cleaned_up = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let executor = Box::new(MockExecutor::new(None, vec![Ok(json!(2))], cleaned_up.clone()));
    let request = request_with(vec![case(json!(2.0))]);

    let verdict = run_request(&request, executor).await;

    assert_eq!(verdict, Verdict::Accepted);
}

#[tokio::test]
async fn compile_failure_short_circuits_before_any_test_runs() {
    let cleaned_up = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let executor = Box::new(MockExecutor::new(
        Some(ExecutionError::Compile("syntax error".to_string())),
        vec![Ok(json!(1))],
        cleaned_up.clone(),
    ));
    let request = request_with(vec![case(json!(1))]);

    let verdict = run_request(&request, executor).await;

    assert_eq!(
        verdict,
        Verdict::CompilationError {
            error_message: "syntax error".to_string()
        }
    );
    // cleanup runs on every exit path, including a failed compile: the
    // toolchain step can fail after a container/workspace was already
    // allocated, so skipping cleanup here would leak them.
    assert!(cleaned_up.load(Ordering::SeqCst));
}

#[tokio::test]
async fn compile_failure_after_resource_acquisition_still_cleans_up() {
    let cleaned_up = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let resource_acquired = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let executor = Box::new(MockExecutor::new_failing_after_resource_acquisition(
        ExecutionError::Compile("go build failed".to_string()),
        cleaned_up.clone(),
        resource_acquired.clone(),
    ));
    let request = request_with(vec![case(json!(1))]);

    let verdict = run_request(&request, executor).await;

    assert_eq!(
        verdict,
        Verdict::CompilationError {
            error_message: "go build failed".to_string()
        }
    );
    assert!(resource_acquired.load(Ordering::SeqCst));
    assert!(cleaned_up.load(Ordering::SeqCst));
}

#[tokio::test]
async fn runtime_error_reports_the_failing_index_and_message() {
    let cleaned_up = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let executor = Box::new(MockExecutor::new(
        None,
        vec![Ok(json!(1)), Err(ExecutionError::Runtime("division by zero".to_string()))],
        cleaned_up.clone(),
    ));
    let request = request_with(vec![case(json!(1)), case(json!(2))]);

    let verdict = run_request(&request, executor).await;

    assert_eq!(
        verdict,
        Verdict::RuntimeError {
            failed_test_case_index: 1,
            error_message: "division by zero".to_string()
        }
    );
    assert!(cleaned_up.load(Ordering::SeqCst));
}

#[tokio::test]
async fn timeout_reports_the_failing_index() {
    let cleaned_up = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let executor = Box::new(MockExecutor::new(None, vec![Err(ExecutionError::Timeout)], cleaned_up.clone()));
    let request = request_with(vec![case(json!(1))]);

    let verdict = run_request(&request, executor).await;

    assert_eq!(verdict, Verdict::Timeout { failed_test_case_index: 0 });
    assert!(cleaned_up.load(Ordering::SeqCst));
}

#[tokio::test]
async fn cleanup_runs_even_when_the_last_test_fails() {
    let cleaned_up = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
    let executor = Box::new(MockExecutor::new(
        None,
        vec![Err(ExecutionError::Runtime("boom".to_string()))],
        cleaned_up.clone(),
    ));
    let request = request_with(vec![case(json!(1))]);

    let _ = run_request(&request, executor).await;

    assert!(cleaned_up.load(Ordering::SeqCst));
}
