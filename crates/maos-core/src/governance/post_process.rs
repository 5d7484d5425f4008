//! Post-process Orchestrator
//!
//! Ambient, best-effort post-hook: after a mutating tool call succeeds,
//! shells out to a formatting check for any Rust files it touched and
//! surfaces the findings as a user message on the next turn. Never denies,
//! never raises `HOOK_INTERNAL_ERROR` — a formatter that isn't installed or
//! a workspace that doesn't build is not this hook's business, it's the
//! agent's.

use async_trait::async_trait;

use crate::error::Result;

use super::hook_engine::{PostHook, PostHookContext};
use super::types::Risk;

/// Runs `cargo fmt --check` against the touched Rust files and pushes a
/// summary onto the session when it finds something to report.
pub struct PostProcessOrchestrator;

impl Default for PostProcessOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl PostProcessOrchestrator {
    pub fn new() -> Self {
        Self
    }

    async fn check_rust_formatting(&self, cwd: &std::path::Path, files: &[String]) -> Option<String> {
        let rust_files: Vec<&str> = files
            .iter()
            .map(String::as_str)
            .filter(|f| f.ends_with(".rs"))
            .collect();
        if rust_files.is_empty() {
            return None;
        }

        let output = tokio::process::Command::new("cargo")
            .arg("fmt")
            .arg("--check")
            .args(&rust_files)
            .current_dir(cwd)
            .output()
            .await
            .ok()?;

        if output.status.success() {
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if stdout.trim().is_empty() {
            return None;
        }

        Some(format!(
            "post-process: `cargo fmt --check` flagged formatting issues in {}:\n{}",
            rust_files.join(", "),
            stdout.trim()
        ))
    }
}

#[async_trait]
impl PostHook for PostProcessOrchestrator {
    async fn observe(&self, ctx: &mut PostHookContext<'_>) -> Result<()> {
        if !ctx.allowed {
            return Ok(());
        }
        if !matches!(ctx.exec_result, Some(Ok(_))) {
            return Ok(());
        }
        if ctx.classification.risk != Risk::Destructive {
            return Ok(());
        }
        if ctx.classification.affected_files.is_empty() {
            return Ok(());
        }

        let cwd = ctx.session.working_directory.clone();
        if let Some(message) = self.check_rust_formatting(&cwd, &ctx.classification.affected_files).await {
            tracing::debug!(tool = %ctx.classification.tool_name, "post-process found formatting issues");
            ctx.session.push_user_message(message);
        }

        Ok(())
    }
}
