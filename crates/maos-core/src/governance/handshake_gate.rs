//! Handshake Gate
//!
//! CRITICAL pre-hook implementing the session invariant from §3 of the data
//! model: a session with no active intent must deny every mutating tool
//! call. Registered ahead of the Scope & Lock Gate so it denies first; the
//! Scope Gate simply passes through when no intent is bound, so
//! `NO_ACTIVE_INTENT` is never double-reported.

use async_trait::async_trait;
use serde_json::json;

use crate::error::Result;

use super::hook_engine::{HookContext, PreHook, PreHookOutcome};
use super::types::{is_mutating_tool, ToolError, ToolErrorCode};

#[derive(Debug, Default)]
pub struct HandshakeGate;

impl HandshakeGate {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PreHook for HandshakeGate {
    async fn check(&self, ctx: &mut HookContext<'_>) -> Result<PreHookOutcome> {
        if !is_mutating_tool(&ctx.classification.tool_name) {
            return Ok(PreHookOutcome::Allow);
        }
        if ctx.session.active_intent_id.is_some() {
            return Ok(PreHookOutcome::Allow);
        }

        let error = ToolError::new(
            ToolErrorCode::NoActiveIntent,
            "no active intent bound to this session; run the handshake before mutating tools",
            json!({}),
        );
        ctx.push_result.push(error.to_json_line());
        Ok(PreHookOutcome::deny_reported(error.message))
    }
}
