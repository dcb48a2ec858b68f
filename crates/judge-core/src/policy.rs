// SPDX-License-Identifier: MIT OR Apache-2.0
//! Resource budget applied to every sandbox container (spec §3, §5).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Numeric limits enforced on every container `docker run` and every
/// `docker exec` invocation.
///
/// `memory_swap` always equals `memory` (no swap, per spec §3); it is not a
/// separately configurable field for that reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePolicy {
    /// `--memory` (and implicitly `--memory-swap`), e.g. `"256m"`.
    pub memory: String,
    /// `--cpus`, e.g. `"1.0"`.
    pub cpus: String,
    /// `--pids-limit`.
    pub pids_limit: u32,
    /// `--ulimit nofile=<n>:<n>`.
    pub nofile_limit: u32,
    /// Compile-step timeout.
    pub compile_timeout: Duration,
    /// Per-test execution timeout.
    pub execution_timeout: Duration,
    /// `sleep <n>` given as the container's entry command; must exceed the
    /// maximum plausible compile + all-tests wall-clock time.
    pub container_sleep: Duration,
    /// Stdout is rejected (as a runtime error) past this many bytes.
    pub max_stdout_bytes: usize,
    /// Max bytes of compiler stderr kept in a `compilation_error` message.
    pub max_compile_error_bytes: usize,
}

impl Default for ResourcePolicy {
    fn default() -> Self {
        Self {
            memory: "256m".to_string(),
            cpus: "1.0".to_string(),
            pids_limit: 64,
            nofile_limit: 256,
            compile_timeout: Duration::from_secs(10),
            execution_timeout: Duration::from_secs(5),
            container_sleep: Duration::from_secs(120),
            max_stdout_bytes: 64 * 1024,
            max_compile_error_bytes: 4 * 1024,
        }
    }
}

impl ResourcePolicy {
    /// `--memory-swap` value: always equal to `memory`, disabling swap.
    pub fn memory_swap(&self) -> &str {
        &self.memory
    }

    /// The `--ulimit` flag value, e.g. `"nofile=256:256"`.
    pub fn nofile_ulimit(&self) -> String {
        format!("nofile={0}:{0}", self.nofile_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_swap_matches_memory() {
        let policy = ResourcePolicy::default();
        assert_eq!(policy.memory_swap(), policy.memory);
    }

    #[test]
    fn nofile_ulimit_format() {
        let policy = ResourcePolicy {
            nofile_limit: 512,
            ..ResourcePolicy::default()
        };
        assert_eq!(policy.nofile_ulimit(), "nofile=512:512");
    }
}
