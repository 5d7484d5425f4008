//! Handler for session_start hook events

use crate::cli::handler::{CommandHandler, CommandResult, ExecutionMetrics};
use crate::io::HookInput;
use async_trait::async_trait;
use maos_core::types::SessionId;
use maos_core::{ExitCode, Result, hook_constants::SESSION_START};

/// Handler for session initialization hook events from Claude Code
///
/// Loads (or creates) the session for `input.session_id`, then runs the
/// Handshake: selects the intent to bind (a `requested_intent_id` naming a
/// loaded intent wins, else a single declared intent binds automatically,
/// else the session starts unbound) and persists the result. When an intent
/// binds, the response body is the `<intent_context>` XML payload the agent
/// needs to see its owned scope, constraints, and acceptance criteria;
/// otherwise it's a plain confirmation string.
///
/// # Hook Event
///
/// Responds to `session_start` events with required `session_id` field and
/// optional `source` field indicating the session initialization type.
///
/// # Example
///
/// ```rust,no_run
/// use maos::cli::handlers::SessionStartHandler;
/// use maos::cli::handler::CommandHandler;
/// use maos::io::HookInput;
///
/// # async fn example() -> maos_core::Result<()> {
/// let handler = SessionStartHandler;
/// let input = HookInput {
///     hook_event_name: "session_start".to_string(),
///     session_id: "sess_abc123".to_string(),
///     source: Some("startup".to_string()),
///     ..Default::default()
/// };
///
/// let result = handler.execute(input).await?;
/// assert_eq!(result.exit_code, maos_core::ExitCode::Success);
/// # Ok(())
/// # }
/// ```
pub struct SessionStartHandler;

#[async_trait]
impl CommandHandler for SessionStartHandler {
    /// Execute session initialization processing
    ///
    /// Loads or creates the session, runs the handshake against
    /// `input.requested_intent_id`, persists the (possibly now-bound)
    /// session, and returns the handshake payload (or a plain confirmation
    /// string when no intent bound).
    ///
    /// # Errors
    ///
    /// Propagates a contained [`maos_core::error::GovernanceError`] if the
    /// intent definitions file is unreadable/malformed or session
    /// persistence fails.
    async fn execute(&self, input: HookInput) -> Result<CommandResult> {
        let mut session = maos_core::governance::session_store::load_or_create(
            &input.cwd,
            SessionId::from_raw(input.session_id.clone()),
        )?;
        session.working_directory = input.cwd.clone();
        if session.task_id.is_none() {
            session.task_id = input.task_id.clone();
        }
        if session.instance_id.is_none() {
            session.instance_id = input.instance_id.clone();
        }
        if session.agent_metadata.is_none() {
            session.agent_metadata = input.agent_metadata.clone();
        }
        session.last_activity = chrono::Utc::now();

        let payload = maos_core::governance::handshake::run(&mut session, input.requested_intent_id.as_deref())?;

        maos_core::governance::session_store::save(&input.cwd, &session)?;

        let output = payload.unwrap_or_else(|| format!("Session started: {}", input.session_id));

        Ok(CommandResult {
            exit_code: ExitCode::Success,
            output: Some(output),
            metrics: ExecutionMetrics::default(),
        })
    }

    /// Returns the hook event name constant
    ///
    /// # Returns
    ///
    /// Returns `"session_start"` as defined in [`maos_core::hook_constants`]
    ///
    /// [`maos_core::hook_constants`]: maos_core::hook_constants
    fn name(&self) -> &'static str {
        SESSION_START
    }

    /// Validates that hook input matches session_start event
    ///
    /// Ensures the `hook_event_name` field matches the expected "session_start" value.
    ///
    /// # Arguments
    ///
    /// * `input` - Hook input to validate
    ///
    /// # Errors
    ///
    /// Returns [`MaosError::InvalidInput`] if `hook_event_name` doesn't match "session_start".
    fn validate_input(&self, input: &HookInput) -> Result<()> {
        // Ensure hook_event_name matches
        if input.hook_event_name != SESSION_START {
            return Err(maos_core::MaosError::InvalidInput {
                message: format!("Expected session_start hook, got {}", input.hook_event_name),
            });
        }
        Ok(())
    }
}
