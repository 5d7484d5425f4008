//! Scope & Lock Gate
//!
//! CRITICAL pre-hook. For every mutating tool call with an affected file,
//! confirms the session has a bound intent, that the intent (or a
//! previously-approved expansion of it) owns the file's path, and that the
//! caller's view of the file's current content is not stale.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use parking_lot::Mutex;
use regex::Regex;
use serde_json::{json, Value};

use crate::error::Result;

use super::content_hasher;
use super::hook_engine::{HookContext, PreHook, PreHookOutcome};
use super::intent_file;
use super::types::{Intent, ToolError, ToolErrorCode};

struct CompiledIntent {
    intent: Intent,
    owned_scope_regexes: Vec<Regex>,
}

/// One `/`-delimited component of a glob pattern, already translated to a
/// (slash-free) regex fragment, or the special `**` component.
enum Segment {
    DoubleStar,
    Literal(String),
}

/// Translate the characters of a single path segment (no `/` inside it) to
/// a regex fragment: `*` becomes a run of non-`/` characters, everything
/// else is escaped literally. A `**` that appears fused with other
/// characters in the same segment (not a spec'd case, but not rejected
/// either) is treated as an ordinary unbounded wildcard here, matching the
/// old per-character behavior.
fn segment_to_regex(segment: &str) -> String {
    let mut out = String::new();
    let chars: Vec<char> = segment.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '*' {
            if i + 1 < chars.len() && chars[i + 1] == '*' {
                out.push_str(".*");
                i += 2;
            } else {
                out.push_str("[^/]*");
                i += 1;
            }
            continue;
        }
        if "\\.+()[]{}^$|?".contains(c) {
            out.push('\\');
            out.push(c);
        } else {
            out.push(c);
        }
        i += 1;
    }
    out
}

/// Join translated segments into one regex fragment, giving a `**`
/// component the ability to match **zero** path segments even when it sits
/// adjacent to a slash on either side — e.g. `src/**/*.ts` must match
/// `src/a.ts` and `**/*.rs` must match top-level `main.rs`.
fn join_segments(segments: &[Segment]) -> String {
    match segments.first() {
        None => String::new(),
        Some(Segment::DoubleStar) => {
            if segments.len() == 1 {
                ".*".to_string()
            } else {
                format!("(?:.*/)?{}", join_segments(&segments[1..]))
            }
        }
        Some(Segment::Literal(head)) => match segments.get(1) {
            None => head.clone(),
            Some(Segment::DoubleStar) if segments.len() == 2 => {
                format!("{head}(?:/.*)?")
            }
            Some(Segment::DoubleStar) => {
                format!("{head}(?:/.*)?/{}", join_segments(&segments[2..]))
            }
            Some(Segment::Literal(_)) => {
                format!("{head}/{}", join_segments(&segments[1..]))
            }
        },
    }
}

/// Translate one glob pattern into an anchored regex.
///
/// `**` matches zero or more path segments, including matching nothing when
/// bounded by a slash on either side; `*` matches a run of non-`/`
/// characters; every other regex metacharacter is escaped literally. This
/// is intentionally not delegated to `globset`, whose own `**` semantics
/// differ in ways that matter here.
pub(crate) fn compile_glob(pattern: &str) -> Regex {
    let segments: Vec<Segment> = pattern
        .split('/')
        .map(|seg| if seg == "**" { Segment::DoubleStar } else { Segment::Literal(segment_to_regex(seg)) })
        .collect();
    let body = join_segments(&segments);
    let out = format!("^{body}$");
    Regex::new(&out).unwrap_or_else(|_| Regex::new("$^").expect("unmatchable fallback regex is valid"))
}

/// Normalize a tool-reported file path to a POSIX-style path relative to
/// `cwd`, stripping the prefix when the reported path is absolute and
/// within `cwd`.
pub(crate) fn to_posix_relative(cwd: &Path, file: &str) -> String {
    let file_path = Path::new(file);
    let rel = if file_path.is_absolute() {
        file_path.strip_prefix(cwd).map(PathBuf::from).unwrap_or_else(|_| file_path.to_path_buf())
    } else {
        file_path.to_path_buf()
    };
    rel.to_string_lossy().replace('\\', "/")
}

fn extract_scope_expansion_request(payload: &Value) -> Option<Vec<String>> {
    let raw = payload.get("request_scope_expansion")?;
    let globs = match raw {
        Value::Object(_) => raw.get("additional_globs").cloned(),
        Value::String(s) => serde_json::from_str::<Value>(s).ok().and_then(|v| v.get("additional_globs").cloned()),
        _ => None,
    }?;
    let globs = globs.as_array()?;
    let globs: Vec<String> = globs.iter().filter_map(|v| v.as_str().map(str::to_string)).collect();
    if globs.is_empty() {
        None
    } else {
        Some(globs)
    }
}

/// Heuristic unified-diff preview between two full-file contents: finds
/// the common prefix/suffix of lines and renders the differing middle as a
/// single hunk with `context` lines of surrounding context. Not a general
/// diff algorithm — good enough for a human-facing STALE_FILE preview.
fn unified_diff_preview(current: &str, proposed: &str, context: usize, max_lines: usize) -> String {
    let a: Vec<&str> = current.lines().collect();
    let b: Vec<&str> = proposed.lines().collect();

    let mut prefix = 0;
    while prefix < a.len() && prefix < b.len() && a[prefix] == b[prefix] {
        prefix += 1;
    }
    let mut suffix = 0;
    while suffix < a.len() - prefix && suffix < b.len() - prefix && a[a.len() - 1 - suffix] == b[b.len() - 1 - suffix] {
        suffix += 1;
    }

    let ctx_before = context.min(prefix);
    let ctx_after = context.min(suffix);

    let a_start = prefix - ctx_before;
    let a_end = a.len() - suffix + ctx_after;
    let b_start = prefix - ctx_before;
    let b_end = b.len() - suffix + ctx_after;

    let mut lines = Vec::new();
    lines.push(format!(
        "@@ -{},{} +{},{} @@",
        a_start + 1,
        a_end - a_start,
        b_start + 1,
        b_end - b_start
    ));
    for line in &a[a_start..prefix] {
        lines.push(format!(" {line}"));
    }
    for line in &a[prefix..a.len() - suffix] {
        lines.push(format!("-{line}"));
    }
    for line in &b[prefix..b.len() - suffix] {
        lines.push(format!("+{line}"));
    }
    for line in &a[a.len() - suffix..a_end.min(a.len())] {
        lines.push(format!(" {line}"));
    }

    lines.truncate(max_lines);
    lines.join("\n")
}

/// CRITICAL pre-hook enforcing owned-scope authorization and optimistic
/// locking for mutating tool calls.
pub struct ScopeLockGate {
    intent_cache: Mutex<HashMap<PathBuf, (SystemTime, Vec<CompiledIntent>)>>,
    approved_expansions: Mutex<HashMap<String, Vec<String>>>,
}

impl Default for ScopeLockGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeLockGate {
    pub fn new() -> Self {
        Self {
            intent_cache: Mutex::new(HashMap::new()),
            approved_expansions: Mutex::new(HashMap::new()),
        }
    }

    /// Test-only hook to reset the process-wide approved-expansion set
    /// between scenarios that reuse the same gate instance.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn clear_expansions(&self) {
        self.approved_expansions.lock().clear();
    }

    fn load_intents(&self, cwd: &Path) -> Result<Vec<CompiledIntent>> {
        let path = intent_file::intent_file_path(cwd);
        let mtime = std::fs::metadata(&path).and_then(|m| m.modified()).ok();

        if let Some(mtime) = mtime {
            if let Some((cached_mtime, cached)) = self.intent_cache.lock().get(&path) {
                if *cached_mtime == mtime {
                    return Ok(clone_compiled(cached));
                }
            }
        }

        // A present-but-unparseable intent file is treated as absence per
        // the spec's "filesystem/parse errors while gathering evidence"
        // rule: the gate degrades to an empty intent set (and thus an empty
        // effective scope, which denies with SCOPE_VIOLATION through the
        // normal path) rather than surfacing a HOOK_INTERNAL_ERROR.
        let intents = intent_file::load_intents(cwd).unwrap_or_default();
        let compiled: Vec<CompiledIntent> = intents
            .into_iter()
            .map(|intent| {
                let regexes = intent.owned_scope.iter().map(|g| compile_glob(g)).collect();
                CompiledIntent {
                    intent,
                    owned_scope_regexes: regexes,
                }
            })
            .collect();

        if let Some(mtime) = mtime {
            self.intent_cache.lock().insert(path, (mtime, clone_compiled(&compiled)));
        }

        Ok(compiled)
    }
}

fn clone_compiled(src: &[CompiledIntent]) -> Vec<CompiledIntent> {
    src.iter()
        .map(|c| CompiledIntent {
            intent: c.intent.clone(),
            owned_scope_regexes: c.owned_scope_regexes.clone(),
        })
        .collect()
}

#[async_trait]
impl PreHook for ScopeLockGate {
    async fn check(&self, ctx: &mut HookContext<'_>) -> Result<PreHookOutcome> {
        if !super::types::is_mutating_tool(&ctx.classification.tool_name) {
            return Ok(PreHookOutcome::Allow);
        }
        if ctx.classification.affected_files.is_empty() {
            return Ok(PreHookOutcome::Allow);
        }
        // No bound intent: the Handshake Gate already denies this call;
        // this gate has nothing further to check.
        let Some(active_intent_id) = ctx.session.active_intent_id.clone() else {
            return Ok(PreHookOutcome::Allow);
        };

        let cwd = ctx.session.working_directory.clone();
        let intents = self.load_intents(&cwd)?;
        let active_owned_scope: Vec<String> = intents
            .iter()
            .find(|ci| ci.intent.id == active_intent_id)
            .map(|ci| ci.intent.owned_scope.clone())
            .unwrap_or_default();
        let mut regexes: Vec<Regex> = intents
            .iter()
            .find(|ci| ci.intent.id == active_intent_id)
            .map(|ci| ci.owned_scope_regexes.clone())
            .unwrap_or_default();

        let already_approved = self.approved_expansions.lock().get(&active_intent_id).cloned().unwrap_or_default();
        for g in &already_approved {
            regexes.push(compile_glob(g));
        }

        for file in &ctx.classification.affected_files {
            let rel = to_posix_relative(&cwd, file);
            if regexes.iter().any(|r| r.is_match(&rel)) {
                continue;
            }

            if let Some(requested) = extract_scope_expansion_request(&ctx.payload) {
                let summary = format!("intent '{active_intent_id}' requests scope expansion: {requested:?} (for {rel})");
                if ctx.ask_approval.ask(&summary).await.approved() {
                    let new_regexes: Vec<Regex> = requested.iter().map(|g| compile_glob(g)).collect();
                    let matched = new_regexes.iter().any(|r| r.is_match(&rel));
                    self.approved_expansions.lock().entry(active_intent_id.clone()).or_default().extend(requested);
                    if matched {
                        continue;
                    }
                }
            }

            let error = ToolError::new(
                ToolErrorCode::ScopeViolation,
                format!("file '{rel}' is outside intent '{active_intent_id}' owned scope"),
                json!({
                    "owned_scope": active_owned_scope,
                    "file_path": rel,
                    "request_scope_expansion": {"additional_globs": []},
                }),
            );
            ctx.push_result.push(error.to_json_line());
            return Ok(PreHookOutcome::deny_reported(error.message));
        }

        if let Some(observed_hash) = ctx.payload.get("observed_content_hash").and_then(Value::as_str) {
            for file in &ctx.classification.affected_files {
                let rel = to_posix_relative(&cwd, file);
                let abs = cwd.join(&rel);
                let Ok(current_content) = std::fs::read_to_string(&abs) else {
                    continue;
                };
                let current = content_hasher::compute_hash(&abs, &current_content, None, None);
                if current.digest != observed_hash {
                    let proposed = ctx.payload.get("content").and_then(Value::as_str).unwrap_or_default();
                    let diff = unified_diff_preview(&current_content, proposed, 2, 80);
                    let error = ToolError::new(
                        ToolErrorCode::StaleFile,
                        format!("file '{rel}' changed since it was last observed"),
                        json!({
                            "observed_content_hash": observed_hash,
                            "current_content_hash": current.digest,
                            "current_diff": diff,
                        }),
                    );
                    ctx.push_result.push(error.to_json_line());
                    return Ok(PreHookOutcome::deny_reported(error.message));
                }
            }
        }

        Ok(PreHookOutcome::Allow)
    }
}
