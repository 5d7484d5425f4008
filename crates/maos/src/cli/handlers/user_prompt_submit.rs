//! Handler for user_prompt_submit hook events

use crate::cli::handler::{CommandHandler, CommandResult, ExecutionMetrics};
use crate::io::HookInput;
use async_trait::async_trait;
use maos_core::types::SessionId;
use maos_core::{ExitCode, Result, hook_constants::USER_PROMPT_SUBMIT};

/// Handler for user prompt submission hook events from Claude Code
///
/// Loads (or creates) the session, folds the prompt text in with any
/// `session.user_messages` queued by earlier governance hooks, and
/// persists the session. Carries no governance hooks of its own.
///
/// # Hook Event
///
/// Responds to `user_prompt_submit` events with optional `message` field containing
/// the user's prompt text for analysis and processing.
///
/// # Example
///
/// ```rust,no_run
/// use maos::cli::handlers::UserPromptSubmitHandler;
/// use maos::cli::handler::CommandHandler;
/// use maos::io::HookInput;
///
/// # async fn example() -> maos_core::Result<()> {
/// let handler = UserPromptSubmitHandler;
/// let input = HookInput {
///     hook_event_name: "user_prompt_submit".to_string(),
///     message: Some("Please analyze this code for security issues".to_string()),
///     ..Default::default()
/// };
///
/// let result = handler.execute(input).await?;
/// assert_eq!(result.exit_code, maos_core::ExitCode::Success);
/// # Ok(())
/// # }
/// ```
pub struct UserPromptSubmitHandler;

#[async_trait]
impl CommandHandler for UserPromptSubmitHandler {
    /// Execute user prompt submission processing
    ///
    /// # Arguments
    ///
    /// * `input` - Hook input from Claude Code containing user prompt
    ///
    /// # Returns
    ///
    /// Returns [`CommandResult`] with success status and processed prompt,
    /// including fallback handling for missing prompts.
    ///
    /// # Errors
    ///
    /// Propagates a contained [`maos_core::error::GovernanceError`] if
    /// session persistence fails.
    ///
    /// [`CommandResult`]: crate::cli::handler::CommandResult
    async fn execute(&self, input: HookInput) -> Result<CommandResult> {
        let message = input
            .message
            .unwrap_or_else(|| "No prompt provided".to_string());

        let mut session = maos_core::governance::session_store::load_or_create(
            &input.cwd,
            SessionId::from_raw(input.session_id.clone()),
        )?;
        let mut lines = vec![format!("User prompt processed: {message}")];
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
    /// Returns `"user_prompt_submit"` as defined in [`maos_core::hook_constants`]
    ///
    /// [`maos_core::hook_constants`]: maos_core::hook_constants
    fn name(&self) -> &'static str {
        USER_PROMPT_SUBMIT
    }

    /// Validates that hook input matches user_prompt_submit event
    ///
    /// Ensures the `hook_event_name` field matches the expected "user_prompt_submit" value.
    /// This prevents handler misrouting and ensures type safety.
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
    /// Returns [`MaosError::InvalidInput`] if `hook_event_name` doesn't match "user_prompt_submit".
    ///
    /// [`MaosError::InvalidInput`]: maos_core::MaosError::InvalidInput
    fn validate_input(&self, input: &HookInput) -> Result<()> {
        // Ensure hook_event_name matches
        if input.hook_event_name != USER_PROMPT_SUBMIT {
            return Err(maos_core::MaosError::InvalidInput {
                message: format!(
                    "Expected user_prompt_submit hook, got {}",
                    input.hook_event_name
                ),
            });
        }
        Ok(())
    }
}
