//! Handler for subagent_stop hook events

use crate::cli::handler::{CommandHandler, CommandResult, ExecutionMetrics};
use crate::io::HookInput;
use async_trait::async_trait;
use maos_core::types::SessionId;
use maos_core::{ExitCode, Result, hook_constants::SUBAGENT_STOP};

/// Handler for subagent completion hook events from Claude Code
///
/// Loads the session, flushes any pending `session.user_messages` queued by
/// the parent session's governance hooks while the subagent was running,
/// and persists the session. Carries no governance hooks of its own.
///
/// # Hook Event
///
/// Responds to `subagent_stop` events indicating sub-agent task completion,
/// with optional status information about the agent's final state.
///
/// # Example
///
/// ```rust,no_run
/// use maos::cli::handlers::SubagentStopHandler;
/// use maos::cli::handler::CommandHandler;
/// use maos::io::HookInput;
///
/// # async fn example() -> maos_core::Result<()> {
/// let handler = SubagentStopHandler;
/// let input = HookInput {
///     hook_event_name: "subagent_stop".to_string(),
///     session_id: "agent_session_456".to_string(),
///     ..Default::default()
/// };
///
/// let result = handler.execute(input).await?;
/// assert_eq!(result.exit_code, maos_core::ExitCode::Success);
/// # Ok(())
/// # }
/// ```
pub struct SubagentStopHandler;

#[async_trait]
impl CommandHandler for SubagentStopHandler {
    /// Execute subagent completion processing
    ///
    /// # Arguments
    ///
    /// * `input` - Hook input from Claude Code, used to locate the session
    ///   whose pending `user_messages` should be flushed back to the agent
    ///
    /// # Returns
    ///
    /// Returns [`CommandResult`] with success status.
    async fn execute(&self, input: HookInput) -> Result<CommandResult> {
        let mut session = maos_core::governance::session_store::load_or_create(
            &input.cwd,
            SessionId::from_raw(input.session_id.clone()),
        )?;
        let mut lines = vec!["Subagent stop hook executed".to_string()];
        lines.extend(std::mem::take(&mut session.user_messages));
        maos_core::governance::session_store::save(&input.cwd, &session)?;

        Ok(CommandResult {
            exit_code: ExitCode::Success,
            output: Some(lines.join("\n")),
            metrics: ExecutionMetrics::default(),
        })
    }

    /// Returns the hook event name constant
    ///
    /// # Returns
    ///
    /// Returns `"subagent_stop"` as defined in [`maos_core::hook_constants`]
    fn name(&self) -> &'static str {
        SUBAGENT_STOP
    }

    /// Validates that hook input matches subagent_stop event
    ///
    /// Ensures the `hook_event_name` field matches the expected "subagent_stop" value.
    ///
    /// # Arguments
    ///
    /// * `input` - Hook input to validate
    ///
    /// # Errors
    ///
    /// Returns [`MaosError::InvalidInput`] if `hook_event_name` doesn't match "subagent_stop".
    fn validate_input(&self, input: &HookInput) -> Result<()> {
        // Ensure hook_event_name matches
        if input.hook_event_name != SUBAGENT_STOP {
            return Err(maos_core::MaosError::InvalidInput {
                message: format!("Expected subagent_stop hook, got {}", input.hook_event_name),
            });
        }
        Ok(())
    }
}
