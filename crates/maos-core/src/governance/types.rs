//! Data model for the Tool Governance Pipeline
//!
//! Plain types for intents, classification, content hashes, and trace
//! records — the wire and in-memory shapes every governance component
//! passes around. Kept free of behavior; the modules that compute or
//! consume these values live alongside this one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base set of tool names the Command Classifier treats as SAFE regardless
/// of prefix fallback.
pub const SAFE_BASE_TOOLS: &[&str] = &["read_file", "stat", "list", "list_files", "read_command_output"];

/// Base set of tool names the Command Classifier treats as DESTRUCTIVE.
pub const DESTRUCTIVE_BASE_TOOLS: &[&str] = &[
    "write_to_file",
    "delete",
    "execute_command",
    "apply_diff",
    "apply_patch",
    "edit",
    "search_and_replace",
    "search_replace",
    "edit_file",
];

/// Tools subject to the Scope & Lock Gate: the DESTRUCTIVE set minus
/// `execute_command` and `delete`, which mutate outside the file-scope
/// model this gate authorizes.
pub const MUTATING_TOOLS: &[&str] = &[
    "write_to_file",
    "apply_diff",
    "apply_patch",
    "edit",
    "search_and_replace",
    "search_replace",
    "edit_file",
];

/// Whether `normalized_tool_name` is subject to the Scope & Lock Gate and
/// the Handshake Gate.
pub fn is_mutating_tool(normalized_tool_name: &str) -> bool {
    MUTATING_TOOLS.contains(&normalized_tool_name)
}

/// Risk classification of a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Risk {
    Safe,
    Destructive,
}

/// Heuristic mutation-shape label, assigned only to DESTRUCTIVE invocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutationClass {
    AstRefactor,
    IntentEvolution,
    Unknown,
}

/// Confidence in the assigned [`MutationClass`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutationConfidence {
    High,
    Medium,
    Low,
}

/// Pure output of the Command Classifier for one (tool name, payload) pair.
///
/// # Example
///
/// ```
/// use maos_core::governance::classifier::classify;
/// use serde_json::json;
///
/// let c = classify("read_file", &json!({"path": "src/main.rs"}));
/// assert_eq!(c.affected_files, vec!["src/main.rs".to_string()]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// Tool name after normalization (`write_file` -> `write_to_file`, etc.)
    pub tool_name: String,
    pub risk: Risk,
    pub mutation_class: MutationClass,
    pub mutation_confidence: MutationConfidence,
    /// Ordered signal tags explaining the mutation-class decision.
    pub signals: Vec<String>,
    /// Relative, POSIX-normalized affected file paths, first-seen order.
    pub affected_files: Vec<String>,
    /// First 20 lines of a diff/patch payload field, if present.
    pub diff_preview: Option<String>,
}

/// A named unit of work authorizing a set of owned-scope globs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub id: String,
    #[serde(default)]
    pub owned_scope: Vec<String>,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
}

/// Canonicalization strategy used to produce a [`ContentHash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashStrategy {
    AstCanonical,
    NormalizedString,
}

/// A syntax-aware content digest produced by the Content Hasher.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentHash {
    /// `sha256:<hex>`
    pub digest: String,
    pub strategy: HashStrategy,
    /// The canonical text that was actually hashed, kept for debugging/diff
    /// emission.
    pub canonical_content: String,
}

/// 1-indexed, inclusive line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifiedRange {
    pub start_line: usize,
    pub end_line: usize,
}

/// VCS block of a [`TraceRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VcsInfo {
    pub revision_id: String,
}

/// One content-hashed range within a file's conversation entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeRecord {
    pub start_line: usize,
    pub end_line: usize,
    pub content_hash: String,
}

/// Attribution block identifying the AI contributor behind a mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContributorInfo {
    pub entity_type: String,
    pub model_identifier: Option<String>,
    pub model_version: Option<String>,
    pub agent_role: Option<String>,
    pub worker_id: Option<String>,
    pub supervisor_id: Option<String>,
}

/// Type discriminant of a [`RelatedLink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelatedLinkType {
    Specification,
    Requirement,
    Ticket,
    Document,
}

/// A single cross-reference attached to a conversation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedLink {
    #[serde(rename = "type")]
    pub link_type: RelatedLinkType,
    pub value: String,
}

/// Classifier-derived metadata carried on a conversation entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMeta {
    pub mutation_class: MutationClass,
    pub mutation_confidence: MutationConfidence,
    pub mutation_signals: Vec<String>,
    pub hook_invocation_id: String,
}

/// One conversation (one invocation's contribution) to a file's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub url: String,
    pub contributor: ContributorInfo,
    pub ranges: Vec<RangeRecord>,
    pub related: Vec<RelatedLink>,
    pub meta: RecordMeta,
}

/// Per-file entry in a [`TraceRecord`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    pub relative_path: String,
    pub conversations: Vec<Conversation>,
}

/// One JSONL line in `.orchestration/agent_trace.jsonl`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub vcs: VcsInfo,
    pub files: Vec<FileEntry>,
}

/// Standard tool-error codes emitted to the agent over the push-result
/// channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolErrorCode {
    NoActiveIntent,
    ScopeViolation,
    StaleFile,
    HitlReject,
    HookInternalError,
}

/// The standard `{"type":"tool_error",...}` shape pushed to the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolError {
    #[serde(rename = "type")]
    pub error_type: String,
    pub code: ToolErrorCode,
    pub message: String,
    pub meta: serde_json::Value,
}

impl ToolError {
    pub fn new(code: ToolErrorCode, message: impl Into<String>, meta: serde_json::Value) -> Self {
        Self {
            error_type: "tool_error".to_string(),
            code,
            message: message.into(),
            meta,
        }
    }

    /// Serialize to a single JSON line (no embedded newlines).
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{\"type\":\"tool_error\"}".to_string())
    }
}

/// Surfaced when a post-hook raises after the tool already executed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookWarning {
    #[serde(rename = "type")]
    pub warning_type: String,
    pub hook_name: String,
    pub message: String,
}

impl HookWarning {
    pub fn new(hook_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            warning_type: "hook_warning".to_string(),
            hook_name: hook_name.into(),
            message: message.into(),
        }
    }

    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{\"type\":\"hook_warning\"}".to_string())
    }
}
