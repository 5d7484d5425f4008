//! Tool Governance Pipeline
//!
//! The components a hook-event subcommand wires together to decide whether
//! a tool call may proceed, and to record what it did once it has: the
//! [`classifier`] (pure risk/mutation classification), the
//! [`hook_engine`] (the ordered pre-hook/execute/post-hook driver every
//! other component plugs into), the [`handshake`]/[`handshake_gate`] pair
//! (intent binding and the invariant that enforces it), the
//! [`scope_gate`] (owned-scope authorization and optimistic locking), the
//! [`content_hasher`] (syntax-aware content digests), the
//! [`trace_ledger`] (append-only audit trail), the [`post_process`]
//! orchestrator (best-effort formatting checks), and [`session_store`]
//! (cross-process session persistence).

pub mod classifier;
pub mod content_hasher;
pub mod handshake;
pub mod handshake_gate;
pub mod hook_engine;
pub mod intent_file;
pub mod post_process;
pub mod scope_gate;
pub mod session_store;
pub mod trace_ledger;
pub mod types;

pub use handshake_gate::HandshakeGate;
pub use hook_engine::{ExecuteOutcome, HookEngine};
pub use post_process::PostProcessOrchestrator;
pub use scope_gate::ScopeLockGate;
pub use trace_ledger::TraceLedgerWriter;
pub use types::{Classification, Intent, MutationClass, Risk, ToolError, ToolErrorCode};
