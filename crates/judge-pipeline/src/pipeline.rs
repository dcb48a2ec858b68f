// SPDX-License-Identifier: MIT OR Apache-2.0
//! Compile-once, run-per-test orchestration and verdict mapping (spec
//! §4.6, §7). Cleanup always runs, on every exit path, including when
//! `compile` itself fails — the toolchain step can fail after
//! `docker::start_container` has already allocated a live container and
//! workspace, so skipping cleanup there would leak both. This mirrors the
//! teacher's `sidecar-kit::run` guarantee that a spawned child is reaped
//! even when the caller's future is itself cancelled, except here cleanup
//! runs to completion uncancelled rather than racing a grace period.

use judge_core::{json_equal, ExecutionRequest, Verdict};
use judge_error::ExecutionError;
use judge_executors::Executor;
use tracing::{debug, warn};

/// Compile `request`, run every test case against `executor` in order, and
/// compute the single terminal [`Verdict`]. `executor` is always cleaned up
/// before returning, whether compilation or execution failed.
pub async fn run_request(request: &ExecutionRequest, mut executor: Box<dyn Executor>) -> Verdict {
    if let Err(err) = executor.compile().await {
        debug!(language = request.language.as_tag(), error = %err, "compilation failed");
        executor.cleanup().await;
        return compile_error_verdict(err);
    }

    let verdict = run_test_cases(request, executor.as_mut()).await;
    executor.cleanup().await;
    verdict
}

async fn run_test_cases(request: &ExecutionRequest, executor: &mut dyn Executor) -> Verdict {
    for (index, test_case) in request.test_cases.iter().enumerate() {
        match executor.run(&test_case.input).await {
            Ok(actual) => {
                if !json_equal(&actual, &test_case.expected_output) {
                    debug!(index, "test case produced a mismatching result");
                    return Verdict::WrongAnswer {
                        failed_test_case_index: index,
                    };
                }
            }
            Err(ExecutionError::Timeout) => {
                return Verdict::Timeout {
                    failed_test_case_index: index,
                };
            }
            Err(ExecutionError::Compile(message)) => {
                // A "compile"-flavored failure surfacing mid-run (e.g. a
                // lazily-initialized interpreter erroring on first use)
                // still predates any test having passed, so it is reported
                // the same way a pre-run compilation failure would be.
                warn!(index, error = %message, "compile-flavored error during execution");
                return Verdict::CompilationError { error_message: message };
            }
            Err(ExecutionError::Runtime(message)) => {
                return Verdict::RuntimeError {
                    failed_test_case_index: index,
                    error_message: message,
                };
            }
        }
    }

    Verdict::Accepted
}

fn compile_error_verdict(err: ExecutionError) -> Verdict {
    match err {
        ExecutionError::Compile(message) => Verdict::CompilationError { error_message: message },
        ExecutionError::Timeout => Verdict::CompilationError {
            error_message: "compilation timed out".to_string(),
        },
        ExecutionError::Runtime(message) => Verdict::CompilationError { error_message: message },
    }
}
