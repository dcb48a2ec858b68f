// SPDX-License-Identifier: MIT OR Apache-2.0
//! The discrete `docker` CLI invocations every language executor shares:
//! start a locked-down sleeping container, `exec` a compile or run command
//! inside it, tear it down. Unlike `sidecar-kit::process::SidecarProcess`,
//! which keeps one long-lived child alive for a JSONL request/response
//! session, each lifecycle step here is its own `docker` process — the
//! sandboxed program lives inside the *container*, not as a direct child
//! of this service, so there is no persistent pipe to hold open between
//! steps.

use judge_core::ResourcePolicy;
use judge_error::ExecutionError;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::warn;

/// Start a `--network none` container running `sleep <container_sleep>`,
/// bind-mounting `host_path` at `/app` and setting the exec working
/// directory to `workdir` (e.g. `/app/SandboxApp` for the C# project
/// layout, `/app` for everything else). Returns the container id.
pub async fn start_container(
    image: &str,
    host_path: &str,
    workdir: &str,
    policy: &ResourcePolicy,
) -> Result<String, ExecutionError> {
    let output = Command::new("docker")
        .args([
            "run",
            "-d",
            "--rm",
            "--memory",
            &policy.memory,
            "--memory-swap",
            policy.memory_swap(),
            "--cpus",
            &policy.cpus,
            "--pids-limit",
            &policy.pids_limit.to_string(),
            "--ulimit",
            &policy.nofile_ulimit(),
            "--network",
            "none",
            "--cap-drop",
            "ALL",
            "--security-opt",
            "no-new-privileges",
            "-v",
            &format!("{host_path}:/app"),
            "-w",
            workdir,
            image,
            "sleep",
            &policy.container_sleep.as_secs().to_string(),
        ])
        .output()
        .await
        .map_err(|e| ExecutionError::Runtime(format!("failed to start container: {e}")))?;

    if !output.status.success() {
        return Err(ExecutionError::Runtime("failed to start container".to_string()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Run a compile command inside `container_id`, capping wall-clock at
/// `policy.compile_timeout`. A nonzero exit is a
/// [`ExecutionError::Compile`] carrying (truncated) stderr.
pub async fn exec_compile(
    container_id: &str,
    args: &[&str],
    policy: &ResourcePolicy,
) -> Result<(), ExecutionError> {
    let mut cmd = Command::new("docker");
    cmd.arg("exec").arg(container_id).args(args);

    let output = timeout(policy.compile_timeout, cmd.output())
        .await
        .map_err(|_| ExecutionError::Compile("compilation timed out".to_string()))?
        .map_err(|e| ExecutionError::Compile(format!("failed to invoke compiler: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = truncate(stderr.trim(), policy.max_compile_error_bytes);
        let message = if message.is_empty() { "compilation failed".to_string() } else { message };
        return Err(ExecutionError::Compile(message));
    }

    Ok(())
}

/// Run the compiled/interpreted program inside `container_id`, feeding
/// `stdin_payload` and capping wall-clock at `policy.execution_timeout`.
/// Returns captured stdout on a zero exit.
pub async fn exec_run(
    container_id: &str,
    args: &[&str],
    stdin_payload: &str,
    policy: &ResourcePolicy,
) -> Result<String, ExecutionError> {
    let mut cmd = Command::new("docker");
    cmd.args(["exec", "-i", container_id]).args(args);
    cmd.stdin(std::process::Stdio::piped());
    cmd.stdout(std::process::Stdio::piped());
    cmd.stderr(std::process::Stdio::piped());

    let mut child = cmd
        .spawn()
        .map_err(|e| ExecutionError::Runtime(format!("failed to spawn exec: {e}")))?;

    if let Some(mut stdin) = child.stdin.take() {
        let payload = stdin_payload.to_string();
        let write = async move {
            stdin.write_all(payload.as_bytes()).await?;
            stdin.shutdown().await
        };
        if let Err(e) = write.await {
            warn!(error = %e, "failed writing stdin to sandboxed process");
        }
    }

    let output = timeout(policy.execution_timeout, child.wait_with_output())
        .await
        .map_err(|_| ExecutionError::Timeout)?
        .map_err(|e| ExecutionError::Runtime(format!("failed to collect output: {e}")))?;

    if output.stdout.len() > policy.max_stdout_bytes {
        return Err(ExecutionError::Runtime("output limit exceeded".to_string()));
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let message = if !stderr.is_empty() {
            stderr
        } else if !stdout.is_empty() {
            stdout
        } else {
            "Runtime error".to_string()
        };
        return Err(ExecutionError::Runtime(message));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Force-remove `container_id`, ignoring failures (cleanup is
/// best-effort).
pub async fn remove_container(container_id: &str) {
    let result = Command::new("docker")
        .args(["rm", "-f", container_id])
        .output()
        .await;
    if let Err(e) = result {
        warn!(error = %e, container_id, "failed to remove sandbox container");
    }
}

fn truncate(s: &str, max_bytes: usize) -> String {
    if s.len() <= max_bytes {
        return s.to_string();
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

/// Only used by executors that need to express a wall-clock suspension
/// point outside of `docker exec` itself (e.g. waiting on a readiness
/// check) without duplicating the `tokio::time::timeout` + mapping dance
/// above.
pub async fn with_timeout<T, F>(duration: Duration, fut: F) -> Result<T, ExecutionError>
where
    F: std::future::Future<Output = Result<T, ExecutionError>>,
{
    timeout(duration, fut).await.map_err(|_| ExecutionError::Timeout)?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        let s = "héllo";
        let truncated = truncate(s, 2);
        assert!(truncated.len() <= 2);
    }

    #[test]
    fn truncate_is_noop_under_limit() {
        assert_eq!(truncate("short", 100), "short");
    }
}
