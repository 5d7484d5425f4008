//! Command handler trait and result types

use crate::io::HookInput;
use async_trait::async_trait;
use maos_core::{ExitCode, Result};
use std::time::Duration;

/// Result returned by command handlers
#[derive(Debug)]
pub struct CommandResult {
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
    /// Optional output to write to stdout
    pub output: Option<String>,
    /// Execution metrics for performance tracking
    pub metrics: ExecutionMetrics,
}

/// Metrics collected during command execution
#[derive(Debug, Default)]
pub struct ExecutionMetrics {
    /// Time spent validating input
    pub validation_time: Duration,
    /// Time spent in handler logic
    pub handler_time: Duration,
    /// Total execution time
    pub total_time: Duration,
}

/// Trait for command handlers with async execution
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Execute command with hook message input
    async fn execute(&self, input: HookInput) -> Result<CommandResult>;

    /// Get command name for logging/metrics
    fn name(&self) -> &'static str;

    /// Validate input before execution (optional)
    fn validate_input(&self, _input: &HookInput) -> Result<()> {
        Ok(())
    }
}
