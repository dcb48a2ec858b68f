// SPDX-License-Identifier: MIT OR Apache-2.0
//! The reflection-language executor: Python, JavaScript, TypeScript,
//! Java, Kotlin, C#. Each wraps the user's source with a template whose
//! marshaling code introspects the target function at runtime, so
//! `compile` only ever substitutes the source text placeholder (plus, for
//! the typed languages, runs an ahead-of-time build step).

use crate::docker;
use crate::executor::{Executor, State};
use async_trait::async_trait;
use judge_core::{Language, ResourcePolicy};
use judge_error::ExecutionError;
use judge_harness::{render, templates, Substitution};
use judge_sandbox_paths::{SandboxRoots, Workspace};
use serde_json::{Map, Value};
use tokio::io::AsyncWriteExt;

/// Run `python3 -c "compile(...)"` against `source` before any container is
/// created, matching `python.py::compile`'s syntax pre-check (step 1, before
/// the sandbox temp dir is even allocated). A `SyntaxError` there is a
/// compilation failure that never touches a sandbox; letting a broken
/// submission reach the interpreter inside the container instead would
/// surface as a runtime error from its non-zero exit.
async fn check_python_syntax(source: &str) -> Result<(), ExecutionError> {
    let mut child = tokio::process::Command::new("python3")
        .args(["-c", "import sys; compile(sys.stdin.read(), '<string>', 'exec')"])
        .stdin(std::process::Stdio::piped())
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .map_err(|e| ExecutionError::Compile(format!("failed to invoke syntax checker: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        let payload = source.to_string();
        let write = async move {
            stdin.write_all(payload.as_bytes()).await?;
            stdin.shutdown().await
        };
        let _ = write.await;
    }

    let output = child
        .wait_with_output()
        .await
        .map_err(|e| ExecutionError::Compile(format!("failed to collect syntax checker output: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() { "invalid syntax".to_string() } else { stderr };
        return Err(ExecutionError::Compile(message));
    }

    Ok(())
}

fn image_for(language: Language) -> &'static str {
    match language {
        Language::Python => "python-sandbox:latest",
        Language::Javascript | Language::Typescript => "js-sandbox:latest",
        Language::Java | Language::Kotlin => "java-sandbox:latest",
        Language::Csharp => "csharp-sandbox:latest",
        _ => unreachable!("image_for called with a non-reflection language"),
    }
}

/// The reflection-language executor.
pub struct ReflectionExecutor {
    language: Language,
    source_code: String,
    function_name: String,
    roots: SandboxRoots,
    policy: ResourcePolicy,
    workspace: Option<Workspace>,
    container_id: Option<String>,
    state: State,
}

impl ReflectionExecutor {
    /// Construct an executor for one of the six reflection languages.
    pub fn new(
        language: Language,
        source_code: String,
        function_name: String,
        roots: SandboxRoots,
        policy: ResourcePolicy,
    ) -> Self {
        Self {
            language,
            source_code,
            function_name,
            roots,
            policy,
            workspace: None,
            container_id: None,
            state: State::New,
        }
    }

    fn render_source(&self) -> Result<String, ExecutionError> {
        let template = match self.language {
            Language::Python => templates::python::PYTHON_WRAPPER_TEMPLATE,
            Language::Javascript => templates::javascript::JS_WRAPPER_TEMPLATE,
            Language::Typescript => templates::typescript::TS_WRAPPER_TEMPLATE,
            Language::Java => templates::java::JAVA_WRAPPER_TEMPLATE,
            Language::Kotlin => templates::kotlin::KOTLIN_WRAPPER_TEMPLATE,
            Language::Csharp => templates::csharp::CSHARP_WRAPPER_TEMPLATE,
            _ => unreachable!("render_source called with a non-reflection language"),
        };
        Ok(render(template, &[Substitution::new("__SOURCE_CODE_PLACEHOLDER__", self.source_code.clone())])?)
    }

    async fn compile_step(&self, container_id: &str) -> Result<(), ExecutionError> {
        match self.language {
            Language::Python | Language::Javascript => Ok(()),
            Language::Typescript => {
                docker::exec_compile(
                    container_id,
                    &["tsc", "main.ts", "--target", "es2020", "--module", "commonjs"],
                    &self.policy,
                )
                .await
            }
            Language::Java => {
                docker::exec_compile(
                    container_id,
                    &["javac", "-cp", "/opt/libs/*", "Main.java"],
                    &self.policy,
                )
                .await
            }
            Language::Kotlin => {
                docker::exec_compile(
                    container_id,
                    &[
                        "kotlinc",
                        "Main.kt",
                        "-include-runtime",
                        "-cp",
                        "/opt/libs/jackson-core.jar:/opt/libs/jackson-databind.jar:/opt/libs/jackson-annotations.jar",
                        "-d",
                        "main.jar",
                    ],
                    &self.policy,
                )
                .await
            }
            Language::Csharp => {
                docker::exec_compile(container_id, &["dotnet", "build", "--configuration", "Release", "--nologo"], &self.policy)
                    .await
            }
            _ => unreachable!("compile_step called with a non-reflection language"),
        }
    }

    fn run_args(&self) -> Vec<&'static str> {
        match self.language {
            Language::Python => vec!["python3", "main.py"],
            Language::Javascript => vec!["node", "main.js"],
            Language::Typescript => vec!["node", "main.js"],
            Language::Java => vec!["java", "-cp", ".:/opt/libs/*", "Main"],
            Language::Kotlin => vec!["java", "-cp", "main.jar:/opt/libs/*", "MainKt"],
            Language::Csharp => vec!["dotnet", "/app/SandboxApp/bin/Release/net8.0/SandboxApp.dll"],
            _ => unreachable!("run_args called with a non-reflection language"),
        }
    }
}

#[async_trait]
impl Executor for ReflectionExecutor {
    async fn compile(&mut self) -> Result<(), ExecutionError> {
        if self.language == Language::Python {
            check_python_syntax(&self.source_code).await?;
        }

        let wrapped = self.render_source()?;
        let workspace = self.roots.allocate_workspace();

        let (entry_dir, file_name) = match self.language {
            Language::Python => (workspace.container_path.clone(), "main.py"),
            Language::Javascript => (workspace.container_path.clone(), "main.js"),
            Language::Typescript => (workspace.container_path.clone(), "main.ts"),
            Language::Java => (workspace.container_path.clone(), "Main.java"),
            Language::Kotlin => (workspace.container_path.clone(), "Main.kt"),
            Language::Csharp => (workspace.subdir("SandboxApp"), "Program.cs"),
            _ => unreachable!(),
        };

        tokio::fs::create_dir_all(&entry_dir)
            .await
            .map_err(|e| ExecutionError::Runtime(format!("failed to create workspace: {e}")))?;
        tokio::fs::write(entry_dir.join(file_name), &wrapped)
            .await
            .map_err(|e| ExecutionError::Runtime(format!("failed to write solution: {e}")))?;

        if self.language == Language::Csharp {
            tokio::fs::write(entry_dir.join("SandboxApp.csproj"), templates::csharp::CSHARP_PROJECT_DESCRIPTOR)
                .await
                .map_err(|e| ExecutionError::Runtime(format!("failed to write project file: {e}")))?;
        }

        let workdir = if self.language == Language::Csharp { "/app/SandboxApp" } else { "/app" };
        let container_id = docker::start_container(image_for(self.language), &workspace.host_path, workdir, &self.policy).await?;

        // Record the container/workspace before the fallible toolchain step
        // runs, so `cleanup()` can find and remove them even if compilation
        // itself fails (matching every original executor, which sets
        // `self.container_id` right after `docker run` and before compiling).
        self.workspace = Some(workspace);
        self.container_id = Some(container_id.clone());

        self.compile_step(&container_id).await?;

        self.state = State::Ready;
        Ok(())
    }

    async fn run(&mut self, input: &Map<String, Value>) -> Result<Value, ExecutionError> {
        let container_id = self
            .container_id
            .as_deref()
            .ok_or_else(|| ExecutionError::Runtime("container not initialized".to_string()))?;

        let payload = serde_json::json!({
            "function_name": self.function_name,
            "input": input,
        })
        .to_string();

        let args = self.run_args();
        let stdout = docker::exec_run(container_id, &args, &payload, &self.policy).await?;

        let parsed: Value = serde_json::from_str(&stdout)
            .map_err(|_| ExecutionError::Runtime("invalid output format".to_string()))?;

        if let Some(error) = parsed.get("error").and_then(Value::as_str) {
            return Err(ExecutionError::Runtime(error.to_string()));
        }

        parsed
            .get("result")
            .cloned()
            .ok_or_else(|| ExecutionError::Runtime("missing result field".to_string()))
    }

    async fn cleanup(&mut self) {
        if let Some(container_id) = self.container_id.take() {
            docker::remove_container(&container_id).await;
        }
        if let Some(workspace) = self.workspace.take() {
            judge_sandbox_paths::remove_workspace_best_effort(&workspace.container_path);
        }
        self.state = State::Closed;
    }

    fn state(&self) -> State {
        self.state
    }
}
