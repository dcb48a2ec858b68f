// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
use anyhow::{Context, Result};
use clap::Parser;
use judge_core::ResourcePolicy;
use judge_daemon::{build_app, AppState};
use judge_pipeline::ExecutorRegistry;
use judge_sandbox_paths::SandboxRoots;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "judge-daemon", version, about = "Code-judging HTTP daemon")]
struct Args {
    /// Bind address.
    #[arg(long, default_value = "127.0.0.1:8070")]
    bind: String,

    /// Path to a TOML resource-policy override file.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Enable debug logging.
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.debug {
        EnvFilter::new("judge=debug")
    } else {
        EnvFilter::new("judge=info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let policy = match &args.config {
        Some(path) => judge_core::config::JudgeConfig::load(path)
            .with_context(|| format!("load config {}", path.display()))?
            .resource_policy(),
        None => ResourcePolicy::default(),
    };

    let roots = SandboxRoots::from_env().context("resolve sandbox roots")?;

    let state = Arc::new(AppState {
        roots,
        policy,
        registry: ExecutorRegistry::new(),
        started_at: Instant::now(),
    });

    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("bind {}", args.bind))?;
    info!(bind = %args.bind, "judge-daemon listening");

    axum::serve(listener, app).await.context("serve")
}
