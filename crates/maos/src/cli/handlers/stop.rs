//! Handler for stop hook events

use crate::cli::handler::{CommandHandler, CommandResult, ExecutionMetrics};
use crate::io::HookInput;
use async_trait::async_trait;
use maos_core::types::SessionId;
use maos_core::{ExitCode, Result, hook_constants::STOP};

/// Handler for session stop hook events from Claude Code
///
/// Loads the session, reports the `stop_hook_active` flag, flushes any
/// pending `session.user_messages`, and persists the session. Carries no
/// governance hooks of its own — by the time a session stops there is
/// nothing left to authorize.
///
/// # Hook Event
///
/// Responds to `stop` events with optional `stop_hook_active` field.
///
/// # Official Claude Code JSON Structure
///
/// ```json
/// {
///   "session_id": "abc123",
///   "transcript_path": "~/.claude/projects/.../transcript.jsonl",
///   "hook_event_name": "stop",
///   "stop_hook_active": true
/// }
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use maos::cli::handlers::StopHandler;
/// use maos::cli::handler::CommandHandler;
/// use maos::io::HookInput;
///
/// # async fn example() -> maos_core::Result<()> {
/// let handler = StopHandler;
/// let input = HookInput {
///     hook_event_name: "stop".to_string(),
///     stop_hook_active: Some(true),
///     session_id: "session-123".to_string(),
///     ..Default::default()
/// };
///
/// let result = handler.execute(input).await?;
/// assert_eq!(result.exit_code, maos_core::ExitCode::Success);
/// # Ok(())
/// # }
/// ```
pub struct StopHandler;

#[async_trait]
impl CommandHandler for StopHandler {
    /// Execute session stop processing
    ///
    /// # Arguments
    ///
    /// * `input` - Hook input from Claude Code containing stop event details
    ///
    /// # Returns
    ///
    /// Returns [`CommandResult`] with success status and stop processing confirmation.
    ///
    /// # Errors
    ///
    /// Propagates a contained [`maos_core::error::GovernanceError`] if
    /// session persistence fails.
    ///
    /// [`CommandResult`]: crate::cli::handler::CommandResult
    async fn execute(&self, input: HookInput) -> Result<CommandResult> {
        let hook_active = input.stop_hook_active.unwrap_or(false);
        let status = if hook_active { "active" } else { "inactive" };

        let mut session = maos_core::governance::session_store::load_or_create(
            &input.cwd,
            SessionId::from_raw(input.session_id.clone()),
        )?;
        let mut lines = vec![format!("Stop hook executed with status: {}", status)];
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
    /// Returns `"stop"` as defined in [`maos_core::hook_constants`]
    ///
    /// [`maos_core::hook_constants`]: maos_core::hook_constants
    fn name(&self) -> &'static str {
        STOP
    }

    /// Validates that hook input matches stop event
    ///
    /// Ensures the `hook_event_name` field matches the expected "stop" value
    /// according to the official Claude Code hook specification.
    ///
    /// # Arguments
    ///
    /// * `input` - Hook input to validate
    ///
    /// # Returns
    ///
    /// Returns `Ok(())` if validation passes.
    ///
    /// # Errors
    ///
    /// Returns [`MaosError::InvalidInput`] if `hook_event_name` doesn't match "stop".
    ///
    /// [`MaosError::InvalidInput`]: maos_core::MaosError::InvalidInput
    fn validate_input(&self, input: &HookInput) -> Result<()> {
        // Ensure hook_event_name matches
        if input.hook_event_name != STOP {
            return Err(maos_core::MaosError::InvalidInput {
                message: format!("Expected stop hook, got {}", input.hook_event_name),
            });
        }
        Ok(())
    }
}
