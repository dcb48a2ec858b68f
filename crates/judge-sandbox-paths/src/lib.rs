// SPDX-License-Identifier: MIT OR Apache-2.0
//! judge-sandbox-paths
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! Translates the in-process scratch directory into a host-visible path
//! usable by the container runtime (spec §4.1 component: Sandbox path
//! resolver).
//!
//! The service and the `docker` daemon it talks to may not share a mount
//! namespace (e.g. this service runs inside its own container, bind-mounted
//! from a host directory under a different path). `SandboxRoots` carries
//! both views so callers can create directories through the in-process path
//! while passing the host path to `docker run -v`.

use judge_error::InputError;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use uuid::Uuid;

fn windows_drive_path() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z]:[\\/]").expect("static pattern"))
}

/// The two path views of the shared sandbox volume.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxRoots {
    /// Directory in which workspaces are created, from this service's view.
    pub container_root: PathBuf,
    /// The same directory, as seen by the container daemon. Always a
    /// Linux-style path; normalized separators, no trailing slash.
    pub host_root: String,
}

impl SandboxRoots {
    /// Resolve both roots from the environment.
    ///
    /// `CONTAINER_SANDBOX_ROOT` defaults to `/sandbox`. `HOST_SANDBOX_ROOT`
    /// is required; a missing, empty, or Windows-drive-letter value is a
    /// hard input error (spec §4.5 step 1, §6, §7).
    pub fn from_env() -> Result<Self, InputError> {
        let container_root = std::env::var("CONTAINER_SANDBOX_ROOT")
            .unwrap_or_else(|_| "/sandbox".to_string());

        let host_root = std::env::var("HOST_SANDBOX_ROOT")
            .map_err(|_| InputError::MissingHostSandboxRoot)?;
        let host_root = host_root.trim();
        if host_root.is_empty() {
            return Err(InputError::EmptyHostSandboxRoot);
        }
        if windows_drive_path().is_match(host_root) {
            return Err(InputError::WindowsDrivePath);
        }

        let host_root = host_root.replace('\\', "/");
        let host_root = host_root.trim_end_matches('/').to_string();

        Ok(Self {
            container_root: PathBuf::from(container_root),
            host_root,
        })
    }

    /// Allocate a uniquely named workspace directory under the container
    /// root and return both its in-process and host-visible paths.
    ///
    /// The name comes from a collision-free allocator (a v4 UUID, spec §5)
    /// rather than a counter, so concurrent requests never collide without
    /// needing a shared lock.
    pub fn allocate_workspace(&self) -> Workspace {
        let name = format!("judge-{}", Uuid::new_v4());
        Workspace {
            container_path: self.container_root.join(&name),
            host_path: format!("{}/{}", self.host_root, name),
            name,
        }
    }
}

/// A single allocated workspace: a uniquely named directory bind-mounted
/// into the sandbox container at `/app` (spec §3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Directory name (also the basename of both paths below).
    pub name: String,
    /// Path usable by this process to create/write files.
    pub container_path: PathBuf,
    /// Path to pass to `docker run -v <host_path>:/app`.
    pub host_path: String,
}

impl Workspace {
    /// Path to a file named `file_name` inside this workspace.
    pub fn file(&self, file_name: &str) -> PathBuf {
        self.container_path.join(file_name)
    }

    /// Path to a subdirectory named `dir_name` inside this workspace.
    pub fn subdir(&self, dir_name: &str) -> PathBuf {
        self.container_path.join(dir_name)
    }
}

/// `true` if `path` looks like an absolute Windows path (`C:\...` or
/// `C:/...`), used to validate `HOST_SANDBOX_ROOT` before it reaches
/// [`SandboxRoots::from_env`].
pub fn is_windows_drive_path(path: &str) -> bool {
    windows_drive_path().is_match(path)
}

/// Recursively remove a workspace directory, ignoring errors (cleanup is
/// best-effort per spec §4.1/§4.5).
pub fn remove_workspace_best_effort(path: &Path) {
    let _ = std::fs::remove_dir_all(path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn with_env<F: FnOnce()>(host_root: Option<&str>, container_root: Option<&str>, f: F) {
        let _guard = ENV_LOCK.lock().unwrap();
        let prev_host = std::env::var("HOST_SANDBOX_ROOT").ok();
        let prev_container = std::env::var("CONTAINER_SANDBOX_ROOT").ok();

        match host_root {
            Some(v) => std::env::set_var("HOST_SANDBOX_ROOT", v),
            None => std::env::remove_var("HOST_SANDBOX_ROOT"),
        }
        match container_root {
            Some(v) => std::env::set_var("CONTAINER_SANDBOX_ROOT", v),
            None => std::env::remove_var("CONTAINER_SANDBOX_ROOT"),
        }

        f();

        match prev_host {
            Some(v) => std::env::set_var("HOST_SANDBOX_ROOT", v),
            None => std::env::remove_var("HOST_SANDBOX_ROOT"),
        }
        match prev_container {
            Some(v) => std::env::set_var("CONTAINER_SANDBOX_ROOT", v),
            None => std::env::remove_var("CONTAINER_SANDBOX_ROOT"),
        }
    }

    #[test]
    fn missing_host_root_is_an_error() {
        with_env(None, None, || {
            assert!(matches!(
                SandboxRoots::from_env(),
                Err(InputError::MissingHostSandboxRoot)
            ));
        });
    }

    #[test]
    fn empty_host_root_is_an_error() {
        with_env(Some("   "), None, || {
            assert!(matches!(
                SandboxRoots::from_env(),
                Err(InputError::EmptyHostSandboxRoot)
            ));
        });
    }

    #[test]
    fn windows_drive_path_is_rejected() {
        with_env(Some(r"C:\sandbox"), None, || {
            assert!(matches!(
                SandboxRoots::from_env(),
                Err(InputError::WindowsDrivePath)
            ));
        });
        with_env(Some("D:/sandbox"), None, || {
            assert!(matches!(
                SandboxRoots::from_env(),
                Err(InputError::WindowsDrivePath)
            ));
        });
    }

    #[test]
    fn trailing_slash_and_backslashes_are_normalized() {
        with_env(Some(r"/srv\sandbox/"), None, || {
            let roots = SandboxRoots::from_env().unwrap();
            assert_eq!(roots.host_root, "/srv/sandbox");
        });
    }

    #[test]
    fn container_root_defaults_to_sandbox() {
        with_env(Some("/srv/sandbox"), None, || {
            let roots = SandboxRoots::from_env().unwrap();
            assert_eq!(roots.container_root, PathBuf::from("/sandbox"));
        });
    }

    #[test]
    fn allocated_workspaces_are_distinct() {
        with_env(Some("/srv/sandbox"), Some("/tmp/sandbox"), || {
            let roots = SandboxRoots::from_env().unwrap();
            let a = roots.allocate_workspace();
            let b = roots.allocate_workspace();
            assert_ne!(a.name, b.name);
            assert_eq!(a.host_path, format!("/srv/sandbox/{}", a.name));
            assert_eq!(a.container_path, PathBuf::from("/tmp/sandbox").join(&a.name));
        });
    }
}
