//! Handler for pre_compact hook events

use crate::cli::handler::{CommandHandler, CommandResult, ExecutionMetrics};
use crate::io::HookInput;
use async_trait::async_trait;
use maos_core::types::SessionId;
use maos_core::{ExitCode, Result, hook_constants::PRE_COMPACT};

/// Handler for pre-conversation compaction hook events from Claude Code
///
/// Loads the session, flushes any pending `session.user_messages` back to
/// the agent before its context is compacted away, and persists the
/// session. Carries no governance hooks of its own.
///
/// # Hook Event
///
/// Responds to `pre_compact` events with optional `trigger` and `custom_instructions`
/// fields indicating the compaction reason and any user-provided directives.
///
/// # Example
///
/// ```rust,no_run
/// use maos::cli::handlers::PreCompactHandler;
/// use maos::cli::handler::CommandHandler;
/// use maos::io::HookInput;
///
/// # async fn example() -> maos_core::Result<()> {
/// let handler = PreCompactHandler;
/// let input = HookInput {
///     hook_event_name: "pre_compact".to_string(),
///     trigger: Some("auto".to_string()),
///     custom_instructions: Some("Preserve task context".to_string()),
///     ..Default::default()
/// };
///
/// let result = handler.execute(input).await?;
/// assert_eq!(result.exit_code, maos_core::ExitCode::Success);
/// # Ok(())
/// # }
/// ```
pub struct PreCompactHandler;

#[async_trait]
impl CommandHandler for PreCompactHandler {
    /// Execute pre-compaction processing
    ///
    /// # Arguments
    ///
    /// * `input` - Hook input from Claude Code, used to locate the session
    ///   whose pending `user_messages` should be flushed back to the agent
    ///   before its context is compacted away
    ///
    /// # Returns
    ///
    /// Returns [`CommandResult`] with success status.
    async fn execute(&self, input: HookInput) -> Result<CommandResult> {
        let mut session = maos_core::governance::session_store::load_or_create(
            &input.cwd,
            SessionId::from_raw(input.session_id.clone()),
        )?;
        let mut lines = vec!["Pre-compact hook executed".to_string()];
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
    /// Returns `"pre_compact"` as defined in [`maos_core::hook_constants`]
    fn name(&self) -> &'static str {
        PRE_COMPACT
    }

    /// Validates that hook input matches pre_compact event
    ///
    /// Ensures the `hook_event_name` field matches the expected "pre_compact" value.
    ///
    /// # Arguments
    ///
    /// * `input` - Hook input to validate
    ///
    /// # Errors
    ///
    /// Returns [`MaosError::InvalidInput`] if `hook_event_name` doesn't match "pre_compact".
    fn validate_input(&self, input: &HookInput) -> Result<()> {
        // Ensure hook_event_name matches
        if input.hook_event_name != PRE_COMPACT {
            return Err(maos_core::MaosError::InvalidInput {
                message: format!("Expected pre_compact hook, got {}", input.hook_event_name),
            });
        }
        Ok(())
    }
}
