//! Session management types for MAOS
//!
//! This module provides types for managing MAOS sessions, including unique
//! identifiers, session state, and metadata tracking.

use chrono::{DateTime, Utc};
use nanoid::nanoid;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Unique identifier for a MAOS session
///
/// Session IDs follow the format: `sess_{timestamp}_{random}`
/// where timestamp is YYYYMMDDHHMMss and random is a 6-character nanoid.
///
/// # Example
///
/// ```
/// use maos_core::SessionId;
///
/// let id = SessionId::generate();
/// assert!(id.is_valid());
/// assert!(id.as_str().starts_with("sess_"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a new unique session ID
    pub fn generate() -> Self {
        let timestamp = Utc::now().format("%Y%m%d%H%M%S");
        let random = nanoid!(6); // 6 character random suffix
        Self(format!("sess_{timestamp}_{random}"))
    }

    /// Check if the session ID format is valid
    pub fn is_valid(&self) -> bool {
        let parts: Vec<&str> = self.0.split('_').collect();
        parts.len() == 3 && parts[0] == "sess" && !parts[1].is_empty() && !parts[2].is_empty()
    }

    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an externally-provided session identifier (e.g. Claude Code's
    /// own `session_id`) without requiring it to match the `sess_{ts}_{rand}`
    /// format `generate()` produces.
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

/// Agent identity attached to a session for trace-ledger attribution
///
/// Carried on the `Session` so the Trace Ledger Writer can populate
/// `contributor` on every conversation record without re-deriving it
/// per invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentMetadata {
    /// Model identifier (e.g. "claude-opus-4")
    pub model_identifier: Option<String>,
    /// Model version string, if distinguishable from the identifier
    pub model_version: Option<String>,
    /// User-defined agent role (e.g. "backend-engineer")
    pub agent_role: Option<String>,
    /// Worker identifier within a multi-agent swarm
    pub worker_id: Option<String>,
    /// Supervisor/parent agent identifier, if spawned by one
    pub supervisor_id: Option<String>,
}

/// Session metadata and state
///
/// Represents a complete MAOS session with all its metadata, including
/// the workspace location, active agents, current status, and the
/// governance state (active intent, pending user messages) the Tool
/// Governance Pipeline needs across separate hook invocations.
///
/// # Example
///
/// ```
/// use maos_core::{Session, SessionId, SessionStatus};
/// use chrono::Utc;
/// use std::path::PathBuf;
///
/// let session = Session {
///     id: SessionId::generate(),
///     created_at: Utc::now(),
///     last_activity: Utc::now(),
///     status: SessionStatus::Active,
///     workspace_root: PathBuf::from("/tmp/maos-workspace"),
///     active_agents: vec![],
///     working_directory: PathBuf::from("/tmp/maos-workspace"),
///     task_id: None,
///     instance_id: None,
///     agent_metadata: None,
///     active_intent_id: None,
///     user_messages: Vec::new(),
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier for this session
    pub id: SessionId,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Last time any activity occurred in this session
    pub last_activity: DateTime<Utc>,
    /// Current status of the session
    pub status: SessionStatus,
    /// Root directory for all session workspaces
    pub workspace_root: PathBuf,
    /// List of active agent IDs (TODO: Will be Vec<AgentInfo> later)
    pub active_agents: Vec<String>,
    /// Current working directory the agent is operating from
    pub working_directory: PathBuf,
    /// Task identifier, used to build the conversation URL
    pub task_id: Option<String>,
    /// Instance identifier, used to build the conversation URL
    pub instance_id: Option<String>,
    /// Agent attribution metadata for the trace ledger
    pub agent_metadata: Option<AgentMetadata>,
    /// Intent bound to this session by the handshake, if any
    ///
    /// Invariant: a session with `active_intent_id == None` must deny every
    /// mutating tool call (see the Handshake Gate).
    pub active_intent_id: Option<String>,
    /// Ordered text segments the agent will see on its next turn
    #[serde(default)]
    pub user_messages: Vec<String>,
}

impl Session {
    /// Push a message onto the session's user-message sink
    pub fn push_user_message(&mut self, message: impl Into<String>) {
        self.user_messages.push(message.into());
    }

    /// Whether this session currently has a bound intent
    pub fn has_active_intent(&self) -> bool {
        self.active_intent_id.is_some()
    }
}

/// Status of a MAOS session
///
/// Sessions progress through different states during their lifecycle:
/// - `Active`: Currently running with agents working
/// - `Paused`: Temporarily suspended but can be resumed
/// - `Completed`: Successfully finished all tasks
/// - `Failed`: Terminated due to an error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Session is actively running
    Active,
    /// Session is paused and can be resumed
    Paused,
    /// Session completed successfully
    Completed,
    /// Session failed with an error
    Failed {
        /// Human-readable failure reason
        reason: String,
    },
}
