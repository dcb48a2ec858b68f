// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
//! Offline single-request runner. Reads a source file and a JSON test-case
//! file from disk, drives one request through `judge-pipeline` without an
//! HTTP server in front, and prints the verdict — the same boundary
//! validation `judge-daemon` applies runs here too, so a malformed request
//! never reaches a sandbox either way.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use judge_core::{ExecutionRequest, Language, ResourcePolicy, TestCase, Verdict};
use judge_pipeline::ExecutorRegistry;
use judge_sandbox_paths::SandboxRoots;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Exit code for a `RuntimeError`/`CompilationError`/`Timeout`/`WrongAnswer` verdict.
const EXIT_NOT_ACCEPTED: i32 = 1;

#[derive(Parser, Debug)]
#[command(name = "judge-cli", version, about = "Offline code-judging runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single request against a source file and a JSON test-case file.
    Run {
        /// Language tag (python, javascript, typescript, c, cpp, java, kotlin, go, rust, csharp).
        #[arg(long, value_parser = parse_language)]
        language: Language,

        /// Path to the source file.
        #[arg(long)]
        source: PathBuf,

        /// Name of the function to invoke.
        #[arg(long)]
        function_name: String,

        /// Path to a JSON file containing an array of `{"input": ..., "expected_output": ...}`.
        #[arg(long)]
        tests: PathBuf,

        /// Print the verdict as JSON instead of a human-readable summary.
        #[arg(long)]
        json: bool,
    },

    /// Print the JSON Schema for the request/response wire types.
    Schema,
}

fn parse_language(raw: &str) -> Result<Language, String> {
    Language::ALL
        .into_iter()
        .find(|lang| lang.as_tag() == raw)
        .ok_or_else(|| format!("unknown language '{raw}', expected one of: {}", Language::ALL.map(|l| l.as_tag()).join(", ")))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("judge=debug")
    } else {
        EnvFilter::new("judge=info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Run {
            language,
            source,
            function_name,
            tests,
            json,
        } => run(language, &source, function_name, &tests, json).await,
        Commands::Schema => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "request": schemars::schema_for!(ExecutionRequest),
                    "response": schemars::schema_for!(Verdict),
                }))?
            );
            Ok(())
        }
    }
}

async fn run(language: Language, source: &PathBuf, function_name: String, tests: &PathBuf, json: bool) -> Result<()> {
    let source_code = std::fs::read_to_string(source).with_context(|| format!("read source {}", source.display()))?;
    let raw_tests = std::fs::read_to_string(tests).with_context(|| format!("read tests {}", tests.display()))?;
    let test_cases: Vec<TestCase> = serde_json::from_str(&raw_tests).context("parse test cases")?;

    let request = ExecutionRequest::new(language, source_code, function_name, test_cases).context("build request")?;

    let roots = SandboxRoots::from_env().context("resolve sandbox roots")?;
    let executor = ExecutorRegistry::new().build(&request, roots, ResourcePolicy::default());

    let verdict = judge_pipeline::run_request(&request, executor).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&verdict)?);
    } else {
        print_human(&verdict);
    }

    if matches!(verdict, Verdict::Accepted) {
        Ok(())
    } else {
        std::process::exit(EXIT_NOT_ACCEPTED);
    }
}

fn print_human(verdict: &Verdict) {
    match verdict {
        Verdict::Accepted => println!("ACCEPTED"),
        Verdict::WrongAnswer { failed_test_case_index } => {
            println!("WRONG_ANSWER at test case {failed_test_case_index}");
        }
        Verdict::RuntimeError {
            failed_test_case_index,
            error_message,
        } => println!("RUNTIME_ERROR at test case {failed_test_case_index}: {error_message}"),
        Verdict::CompilationError { error_message } => println!("COMPILATION_ERROR: {error_message}"),
        Verdict::Timeout { failed_test_case_index } => println!("TIMEOUT at test case {failed_test_case_index}"),
    }
}
