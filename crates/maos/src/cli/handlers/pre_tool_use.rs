//! Handler for pre_tool_use hook events

use std::sync::Arc;

use crate::cli::handler::{CommandHandler, CommandResult, ExecutionMetrics};
use crate::io::HookInput;
use async_trait::async_trait;
use maos_core::governance::hook_engine::{CollectingPushResult, RejectingAskApproval, TracingHandleError};
use maos_core::governance::{HandshakeGate, HookEngine, ScopeLockGate};
use maos_core::types::SessionId;
use maos_core::{ExitCode, MaosError, Result, hook_constants::PRE_TOOL_USE};

/// Handler for pre-tool-use hook events from Claude Code
///
/// Drives every mutating tool call through the Tool Governance Pipeline
/// before it is allowed to proceed: the [`HandshakeGate`] (CRITICAL — no
/// bound intent means no mutation) followed by the [`ScopeLockGate`]
/// (CRITICAL — owned-scope authorization and optimistic-lock staleness
/// check). Both run through a shared, process-lifetime [`HookEngine`] so
/// the Scope Gate's approved-expansion cache survives across invocations.
///
/// This handler does not execute the tool itself — by the time Claude Code
/// asks, the tool call hasn't run yet and this process has no way to run it
/// on the agent's behalf. The `exec` closure handed to the engine is a
/// no-op; the only thing this handler reports is whether the governance
/// pipeline allowed the call, plus any `tool_error` lines the gates pushed.
///
/// # Hook Event
///
/// Responds to `pre_tool_use` events with required `tool_name` field.
///
/// # Example
///
/// ```rust,no_run
/// use maos::cli::handlers::PreToolUseHandler;
/// use maos::cli::handler::CommandHandler;
/// use maos::io::HookInput;
///
/// # async fn example() -> maos_core::Result<()> {
/// let handler = PreToolUseHandler::new();
/// let input = HookInput {
///     hook_event_name: "pre_tool_use".to_string(),
///     tool_name: Some("read_file".to_string()),
///     tool_input: Some(serde_json::json!({"path": "src/lib.rs"})),
///     ..Default::default()
/// };
///
/// let result = handler.execute(input).await?;
/// assert_eq!(result.exit_code, maos_core::ExitCode::Success);
/// # Ok(())
/// # }
/// ```
pub struct PreToolUseHandler {
    engine: Arc<HookEngine>,
}

impl Default for PreToolUseHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PreToolUseHandler {
    pub fn new() -> Self {
        let engine = HookEngine::new();
        engine.register_pre_hook("handshake_gate", true, Arc::new(HandshakeGate::new()));
        engine.register_pre_hook("scope_lock_gate", true, Arc::new(ScopeLockGate::new()));
        Self { engine: Arc::new(engine) }
    }
}

#[async_trait]
impl CommandHandler for PreToolUseHandler {
    /// Execute pre-tool-use hook processing
    ///
    /// Loads (or synthesizes) the session for `input.session_id`, runs the
    /// tool call through the governance pipeline, persists any session
    /// mutations (a newly-bound intent, an approved scope expansion), and
    /// reports whether the call is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`MaosError::InvalidInput`] if `tool_name` is missing, or
    /// propagates a contained [`maos_core::error::GovernanceError`] if
    /// session persistence fails.
    async fn execute(&self, input: HookInput) -> Result<CommandResult> {
        let Some(tool_name) = input.tool_name.clone() else {
            return Err(MaosError::InvalidInput {
                message: "pre_tool_use requires tool_name".to_string(),
            });
        };
        let payload = input.tool_input.clone().unwrap_or(serde_json::Value::Null);

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

        let push_result = CollectingPushResult::new();
        let outcome = self
            .engine
            .execute(
                &tool_name,
                payload,
                &mut session,
                &RejectingAskApproval,
                &push_result,
                &TracingHandleError,
                || async { Ok(serde_json::Value::Null) },
            )
            .await?;

        maos_core::governance::session_store::save(&input.cwd, &session)?;

        let pushed = push_result.take();
        let output = if outcome.allowed {
            format!("Pre-tool hook executed for tool: {tool_name}")
        } else {
            pushed.join("\n")
        };

        Ok(CommandResult {
            exit_code: if outcome.allowed { ExitCode::Success } else { ExitCode::BlockingError },
            output: Some(output),
            metrics: ExecutionMetrics::default(),
        })
    }

    /// Returns the hook event name constant
    fn name(&self) -> &'static str {
        PRE_TOOL_USE
    }

    /// Validates that hook input matches pre-tool-use event
    fn validate_input(&self, input: &HookInput) -> Result<()> {
        if input.hook_event_name != PRE_TOOL_USE {
            return Err(MaosError::InvalidInput {
                message: format!("Expected pre_tool_use hook, got {}", input.hook_event_name),
            });
        }
        Ok(())
    }
}
