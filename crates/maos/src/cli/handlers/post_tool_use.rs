//! Handler for post_tool_use hook events

use std::sync::Arc;

use crate::cli::handler::{CommandHandler, CommandResult, ExecutionMetrics};
use crate::io::HookInput;
use async_trait::async_trait;
use maos_core::governance::hook_engine::{CollectingPushResult, RejectingAskApproval, TracingHandleError};
use maos_core::governance::{HookEngine, PostProcessOrchestrator, TraceLedgerWriter};
use maos_core::types::SessionId;
use maos_core::{ExitCode, MaosError, Result, hook_constants::POST_TOOL_USE};

/// Handler for post-tool-use hook events from Claude Code
///
/// Runs the already-completed tool call through the observation half of the
/// Tool Governance Pipeline: the [`TraceLedgerWriter`] (appends the audit
/// record for DESTRUCTIVE calls) and the [`PostProcessOrchestrator`]
/// (best-effort formatting check). Both are registered as post-hooks on a
/// [`HookEngine`] with no pre-hooks — the tool already ran by the time
/// Claude Code calls this hook, so there is nothing left to vote on; `exec`
/// is a pass-through that hands back `tool_response` unchanged.
///
/// # Hook Event
///
/// Responds to `post_tool_use` events with required `tool_name` field and
/// optional `tool_response` containing the tool's execution results.
///
/// # Example
///
/// ```rust,no_run
/// use maos::cli::handlers::PostToolUseHandler;
/// use maos::cli::handler::CommandHandler;
/// use maos::io::HookInput;
///
/// # async fn example() -> maos_core::Result<()> {
/// let handler = PostToolUseHandler::new();
/// let input = HookInput {
///     hook_event_name: "post_tool_use".to_string(),
///     tool_name: Some("read_file".to_string()),
///     tool_response: Some(serde_json::json!({"success": true})),
///     ..Default::default()
/// };
///
/// let result = handler.execute(input).await?;
/// assert_eq!(result.exit_code, maos_core::ExitCode::Success);
/// # Ok(())
/// # }
/// ```
pub struct PostToolUseHandler {
    engine: Arc<HookEngine>,
}

impl Default for PostToolUseHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl PostToolUseHandler {
    pub fn new() -> Self {
        let engine = HookEngine::new();
        engine.register_post_hook("trace_ledger_writer", Arc::new(TraceLedgerWriter::new()));
        engine.register_post_hook("post_process_orchestrator", Arc::new(PostProcessOrchestrator::new()));
        Self { engine: Arc::new(engine) }
    }
}

#[async_trait]
impl CommandHandler for PostToolUseHandler {
    /// Execute post-tool-use hook processing
    ///
    /// Loads the session, replays the tool call through the post-hook-only
    /// engine (trace ledger append, formatting check), flushes any pending
    /// `session.user_messages` into the response, and persists the session.
    ///
    /// # Errors
    ///
    /// Returns [`MaosError::InvalidInput`] if `tool_name` is missing.
    async fn execute(&self, input: HookInput) -> Result<CommandResult> {
        let Some(tool_name) = input.tool_name.clone() else {
            return Err(MaosError::InvalidInput {
                message: "post_tool_use requires tool_name".to_string(),
            });
        };
        let payload = input.tool_input.clone().unwrap_or(serde_json::Value::Null);
        let tool_response = input.tool_response.clone().unwrap_or(serde_json::Value::Null);

        let mut session = maos_core::governance::session_store::load_or_create(
            &input.cwd,
            SessionId::from_raw(input.session_id.clone()),
        )?;
        session.working_directory = input.cwd.clone();
        session.last_activity = chrono::Utc::now();

        let push_result = CollectingPushResult::new();
        self.engine
            .execute(
                &tool_name,
                payload,
                &mut session,
                &RejectingAskApproval,
                &push_result,
                &TracingHandleError,
                || async move { Ok(tool_response) },
            )
            .await?;

        let mut lines = Vec::new();
        lines.push(format!("Post-tool hook executed for tool: {tool_name}"));
        lines.extend(std::mem::take(&mut session.user_messages));
        lines.extend(push_result.take());

        maos_core::governance::session_store::save(&input.cwd, &session)?;

        Ok(CommandResult {
            exit_code: ExitCode::Success,
            output: Some(lines.join("\n")),
            metrics: ExecutionMetrics::default(),
        })
    }

    /// Returns the hook event name constant
    fn name(&self) -> &'static str {
        POST_TOOL_USE
    }

    /// Validates that hook input matches post-tool-use event
    fn validate_input(&self, input: &HookInput) -> Result<()> {
        if input.hook_event_name != POST_TOOL_USE {
            return Err(MaosError::InvalidInput {
                message: format!("Expected post_tool_use hook, got {}", input.hook_event_name),
            });
        }
        Ok(())
    }
}
