//! Hook Engine
//!
//! Drives one tool invocation through an ordered chain of pre-hooks, the
//! tool's own execution, and an ordered chain of post-hooks. Pre-hooks vote
//! on whether the call is allowed; post-hooks only observe. Hooks are
//! registered by name in insertion order; re-registering a name replaces
//! the hook in place without moving its position.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{MaosError, Result};
use crate::types::Session;

use super::classifier;
use super::types::Classification;

/// Outcome of a single pre-hook check.
#[derive(Debug, Clone)]
pub enum PreHookOutcome {
    Allow,
    Deny {
        reason: Option<String>,
        /// Set when the hook has already pushed its own `tool_error` line
        /// to the agent, so the engine must not push `reason` a second time.
        already_reported: bool,
    },
}

impl PreHookOutcome {
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::Deny {
            reason: Some(reason.into()),
            already_reported: false,
        }
    }

    pub fn deny_reported(reason: impl Into<String>) -> Self {
        Self::Deny {
            reason: Some(reason.into()),
            already_reported: true,
        }
    }
}

/// Decision returned by the human-in-the-loop capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalDecision {
    Approve,
    Reject,
    Timeout,
}

impl ApprovalDecision {
    pub fn approved(self) -> bool {
        matches!(self, Self::Approve)
    }
}

/// Capability for requesting human approval of a scope expansion or other
/// sensitive action. A timeout is treated as a reject by every caller.
#[async_trait]
pub trait AskApproval: Send + Sync {
    async fn ask(&self, summary: &str) -> ApprovalDecision;
}

/// Non-interactive default: every request is rejected. The CLI process
/// model has no live human channel mid-invocation, so approval can only
/// ever come from data the agent embedded in the payload up front.
#[derive(Debug, Default)]
pub struct RejectingAskApproval;

#[async_trait]
impl AskApproval for RejectingAskApproval {
    async fn ask(&self, _summary: &str) -> ApprovalDecision {
        ApprovalDecision::Reject
    }
}

/// Capability for pushing a result/error line back to the agent.
pub trait PushResult: Send + Sync {
    fn push(&self, message: String);
}

/// Collects pushed lines for the caller to drain into `CommandResult`.
#[derive(Debug, Default)]
pub struct CollectingPushResult(parking_lot::Mutex<Vec<String>>);

impl CollectingPushResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut self.0.lock())
    }
}

impl PushResult for CollectingPushResult {
    fn push(&self, message: String) {
        self.0.lock().push(message);
    }
}

/// Capability for containing a non-critical hook failure.
pub trait HandleError: Send + Sync {
    fn handle(&self, hook_name: &str, error: &MaosError);
}

/// Logs the failure via `tracing` and otherwise does nothing.
#[derive(Debug, Default)]
pub struct TracingHandleError;

impl HandleError for TracingHandleError {
    fn handle(&self, hook_name: &str, error: &MaosError) {
        tracing::warn!(hook = hook_name, error = %error, "governance hook error contained");
    }
}

/// Mutable context handed to each pre-hook in turn.
pub struct HookContext<'a> {
    pub invocation_id: Uuid,
    pub tool_name: String,
    pub classification: Classification,
    pub payload: Value,
    pub session: &'a mut Session,
    pub ask_approval: &'a dyn AskApproval,
    pub push_result: &'a dyn PushResult,
}

/// Async vote on whether a tool invocation may proceed.
#[async_trait]
pub trait PreHook: Send + Sync {
    async fn check(&self, ctx: &mut HookContext<'_>) -> Result<PreHookOutcome>;
}

/// Context handed to each post-hook after the tool ran (or was denied).
pub struct PostHookContext<'a> {
    pub invocation_id: Uuid,
    pub tool_name: String,
    pub classification: Classification,
    pub payload: Value,
    pub session: &'a mut Session,
    pub allowed: bool,
    pub exec_result: &'a Option<Result<Value>>,
    pub push_result: &'a dyn PushResult,
}

/// Observes the outcome of a tool invocation. Never votes.
#[async_trait]
pub trait PostHook: Send + Sync {
    async fn observe(&self, ctx: &mut PostHookContext<'_>) -> Result<()>;
}

/// Result of a full `HookEngine::execute` call.
#[derive(Debug, Clone)]
pub struct ExecuteOutcome {
    pub invocation_id: Uuid,
    pub allowed: bool,
    pub result: Option<Value>,
}

struct PreEntry {
    name: String,
    critical: bool,
    hook: Arc<dyn PreHook>,
}

struct PostEntry {
    name: String,
    hook: Arc<dyn PostHook>,
}

/// Drives the pre-hook / execute / post-hook pipeline for one invocation.
#[derive(Default)]
pub struct HookEngine {
    pre_hooks: RwLock<Vec<PreEntry>>,
    post_hooks: RwLock<Vec<PostEntry>>,
}

impl HookEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a pre-hook by name. Re-registering an existing
    /// name rebinds it in place, preserving its original position.
    pub fn register_pre_hook(&self, name: impl Into<String>, critical: bool, hook: Arc<dyn PreHook>) {
        let name = name.into();
        let mut hooks = self.pre_hooks.write();
        if let Some(entry) = hooks.iter_mut().find(|e| e.name == name) {
            entry.critical = critical;
            entry.hook = hook;
        } else {
            hooks.push(PreEntry { name, critical, hook });
        }
    }

    /// Register (or replace) a post-hook by name, same semantics as
    /// [`Self::register_pre_hook`].
    pub fn register_post_hook(&self, name: impl Into<String>, hook: Arc<dyn PostHook>) {
        let name = name.into();
        let mut hooks = self.post_hooks.write();
        if let Some(entry) = hooks.iter_mut().find(|e| e.name == name) {
            entry.hook = hook;
        } else {
            hooks.push(PostEntry { name, hook });
        }
    }

    fn snapshot_pre(&self) -> Vec<(String, bool, Arc<dyn PreHook>)> {
        self.pre_hooks
            .read()
            .iter()
            .map(|e| (e.name.clone(), e.critical, e.hook.clone()))
            .collect()
    }

    fn snapshot_post(&self) -> Vec<(String, Arc<dyn PostHook>)> {
        self.post_hooks.read().iter().map(|e| (e.name.clone(), e.hook.clone())).collect()
    }

    /// Run one invocation through every registered pre-hook (in order), the
    /// supplied `exec` closure if every pre-hook allowed, then every
    /// registered post-hook (always, regardless of outcome).
    ///
    /// If `exec` returns an error, every post-hook still runs before that
    /// error is re-raised to the caller.
    pub async fn execute<F, Fut>(
        &self,
        tool_name: &str,
        payload: Value,
        session: &mut Session,
        ask_approval: &dyn AskApproval,
        push_result: &dyn PushResult,
        handle_error: &dyn HandleError,
        exec: F,
    ) -> Result<ExecuteOutcome>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value>>,
    {
        let invocation_id = Uuid::new_v4();
        let classification = classifier::classify(tool_name, &payload);

        let mut allowed = true;

        for (name, critical, hook) in self.snapshot_pre() {
            let mut ctx = HookContext {
                invocation_id,
                tool_name: tool_name.to_string(),
                classification: classification.clone(),
                payload: payload.clone(),
                session,
                ask_approval,
                push_result,
            };
            match hook.check(&mut ctx).await {
                Ok(PreHookOutcome::Allow) => {}
                Ok(PreHookOutcome::Deny { reason, already_reported }) => {
                    allowed = false;
                    if let (Some(reason), false) = (reason, already_reported) {
                        push_result.push(reason);
                    }
                    break;
                }
                Err(err) => {
                    if critical {
                        allowed = false;
                        push_result.push(format!(
                            "{{\"type\":\"tool_error\",\"code\":\"HOOK_INTERNAL_ERROR\",\"message\":\"pre-hook '{name}' failed: {err}\",\"meta\":{{}}}}"
                        ));
                        break;
                    }
                    handle_error.handle(&name, &err);
                }
            }
        }

        let exec_result: Option<Result<Value>> = if allowed { Some(exec().await) } else { None };

        for (name, hook) in self.snapshot_post() {
            let mut ctx = PostHookContext {
                invocation_id,
                tool_name: tool_name.to_string(),
                classification: classification.clone(),
                payload: payload.clone(),
                session,
                allowed,
                exec_result: &exec_result,
                push_result,
            };
            if let Err(err) = hook.observe(&mut ctx).await {
                handle_error.handle(&name, &err);
                push_result.push(format!(
                    "{{\"type\":\"hook_warning\",\"hook_name\":\"{name}\",\"message\":\"{err}\"}}"
                ));
            }
        }

        match exec_result {
            Some(Err(err)) => Err(err),
            Some(Ok(value)) => Ok(ExecuteOutcome {
                invocation_id,
                allowed,
                result: Some(value),
            }),
            None => Ok(ExecuteOutcome {
                invocation_id,
                allowed,
                result: None,
            }),
        }
    }
}
