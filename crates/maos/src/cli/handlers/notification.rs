//! Handler for notification hook events

use crate::cli::handler::{CommandHandler, CommandResult, ExecutionMetrics};
use crate::io::HookInput;
use async_trait::async_trait;
use maos_core::types::SessionId;
use maos_core::{ExitCode, Result, hook_constants::NOTIFICATION};

/// Handler for notification display hook events from Claude Code
///
/// Loads (or creates) the session, folds the notification message in with
/// any `session.user_messages` queued by earlier governance hooks, and
/// persists the session. Carries no governance hooks of its own — there is
/// nothing to authorize or trace about a notification.
///
/// # Hook Event
///
/// Responds to `notification` events with optional `message` field containing
/// the notification content to display to the user.
///
/// # Example
///
/// ```rust,no_run
/// use maos::cli::handlers::NotificationHandler;
/// use maos::cli::handler::CommandHandler;
/// use maos::io::HookInput;
///
/// # async fn example() -> maos_core::Result<()> {
/// let handler = NotificationHandler;
/// let input = HookInput {
///     hook_event_name: "notification".to_string(),
///     message: Some("Build completed successfully!".to_string()),
///     ..Default::default()
/// };
///
/// let result = handler.execute(input).await?;
/// assert_eq!(result.exit_code, maos_core::ExitCode::Success);
/// # Ok(())
/// # }
/// ```
pub struct NotificationHandler;

#[async_trait]
impl CommandHandler for NotificationHandler {
    /// Execute notification display processing
    ///
    /// # Arguments
    ///
    /// * `input` - Hook input from Claude Code containing notification message
    ///
    /// # Returns
    ///
    /// Returns [`CommandResult`] with success status and processed message,
    /// including fallback handling for missing messages.
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
            .unwrap_or_else(|| "No message provided".to_string());

        let mut session = maos_core::governance::session_store::load_or_create(
            &input.cwd,
            SessionId::from_raw(input.session_id.clone()),
        )?;
        let mut lines = vec![format!("Notification processed: {message}")];
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
    /// Returns `"notification"` as defined in [`maos_core::hook_constants`]
    ///
    /// [`maos_core::hook_constants`]: maos_core::hook_constants
    fn name(&self) -> &'static str {
        NOTIFICATION
    }

    /// Validates that hook input matches notification event
    ///
    /// Ensures the `hook_event_name` field matches the expected "notification" value.
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
    /// Returns [`MaosError::InvalidInput`] if `hook_event_name` doesn't match "notification".
    ///
    /// [`MaosError::InvalidInput`]: maos_core::MaosError::InvalidInput
    fn validate_input(&self, input: &HookInput) -> Result<()> {
        // Ensure hook_event_name matches
        if input.hook_event_name != NOTIFICATION {
            return Err(maos_core::MaosError::InvalidInput {
                message: format!("Expected notification hook, got {}", input.hook_event_name),
            });
        }
        Ok(())
    }
}
