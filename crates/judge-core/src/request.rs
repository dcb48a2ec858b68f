// SPDX-License-Identifier: MIT OR Apache-2.0
//! Request/response wire types.

use judge_error::InputError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const MAX_SOURCE_BYTES: usize = 5_000;
const MAX_FUNCTION_NAME_BYTES: usize = 100;
const MIN_TEST_CASES: usize = 1;
const MAX_TEST_CASES: usize = 20;

/// The ten supported languages.
///
/// The wire tag is always `"javascript"`, never `"js"` — of the two
/// `ExecutorFactory` variants the original implementation disagreed between,
/// the external contract pins this one (spec §9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Typescript,
    C,
    Cpp,
    Java,
    Kotlin,
    Go,
    Rust,
    Csharp,
}

impl Language {
    /// All ten supported tags, in the order they appear in spec §6.
    pub const ALL: [Language; 10] = [
        Language::Python,
        Language::Javascript,
        Language::Typescript,
        Language::C,
        Language::Cpp,
        Language::Java,
        Language::Kotlin,
        Language::Go,
        Language::Rust,
        Language::Csharp,
    ];

    /// The wire tag for this language, matching the `#[serde(rename_all)]`
    /// mapping above (useful for error messages and logging without
    /// round-tripping through `serde_json`).
    pub fn as_tag(self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Typescript => "typescript",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Kotlin => "kotlin",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Csharp => "csharp",
        }
    }

    /// `true` for languages whose harness is rendered via the
    /// signature-extraction strategy (spec §4.2); `false` for reflection.
    pub fn is_signature_extraction(self) -> bool {
        matches!(self, Language::C | Language::Cpp | Language::Go | Language::Rust)
    }
}

/// A single test case: a named-parameter input mapping and the expected
/// output.
///
/// Parameter-name order in `input` may encode positional binding for
/// languages that cannot recover parameter names from compiled metadata
/// (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TestCase {
    /// Ordered mapping from parameter name to JSON input value. Key order
    /// matches wire order (`serde_json`'s `preserve_order` feature), which
    /// positional-binding executors rely on when parameter names can't be
    /// recovered from compiled metadata.
    pub input: serde_json::Map<String, serde_json::Value>,
    /// The value the executor's result must equal for this test to pass.
    pub expected_output: serde_json::Value,
}

/// Immutable, validated record of one judging request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExecutionRequest {
    /// The language tag.
    pub language: Language,
    /// User-supplied source snippet.
    pub source_code: String,
    /// Name of the callable entry point to invoke.
    pub function_name: String,
    /// Ordered test cases; the first failing index wins (spec §4.6).
    pub test_cases: Vec<TestCase>,
}

impl ExecutionRequest {
    /// Validate and construct a request, enforcing the size/count
    /// constraints from spec §3.
    ///
    /// Boundary validation lives here (not only in the HTTP layer) so that
    /// `judge-cli`, which never goes through an HTTP framework, still
    /// rejects malformed requests before they reach a sandbox.
    pub fn new(
        language: Language,
        source_code: String,
        function_name: String,
        test_cases: Vec<TestCase>,
    ) -> Result<Self, InputError> {
        if source_code.is_empty() || source_code.len() > MAX_SOURCE_BYTES {
            return Err(InputError::Validation(format!(
                "source_code must be 1..={MAX_SOURCE_BYTES} bytes, got {}",
                source_code.len()
            )));
        }
        if function_name.is_empty() || function_name.len() > MAX_FUNCTION_NAME_BYTES {
            return Err(InputError::Validation(format!(
                "function_name must be 1..={MAX_FUNCTION_NAME_BYTES} bytes, got {}",
                function_name.len()
            )));
        }
        if test_cases.len() < MIN_TEST_CASES || test_cases.len() > MAX_TEST_CASES {
            return Err(InputError::Validation(format!(
                "test_cases must have {MIN_TEST_CASES}..={MAX_TEST_CASES} entries, got {}",
                test_cases.len()
            )));
        }
        Ok(Self {
            language,
            source_code,
            function_name,
            test_cases,
        })
    }
}

/// The single terminal outcome of a request (spec §3, §6).
///
/// Exactly one verdict is produced per request; tests are never reordered
/// and the first failing index wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// Every test case passed.
    Accepted,
    /// The program ran to completion but the k-th result did not match.
    WrongAnswer {
        /// Index of the first mismatching test case.
        failed_test_case_index: usize,
    },
    /// The program crashed, produced malformed output, or the sandbox
    /// could not be reached, on the k-th test case.
    RuntimeError {
        /// Index of the failing test case.
        failed_test_case_index: usize,
        /// Human-readable detail (harness `error` field, stderr, or a
        /// generic label, in that priority order).
        error_message: String,
    },
    /// Compilation, harness rendering, or signature parsing failed before
    /// any test ran.
    CompilationError {
        /// Trimmed, length-bounded toolchain/harness error output.
        error_message: String,
    },
    /// The k-th test case exceeded its wall-clock budget.
    Timeout {
        /// Index of the failing test case.
        failed_test_case_index: usize,
    },
}
