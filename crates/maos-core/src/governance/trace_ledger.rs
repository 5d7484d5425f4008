//! Trace Ledger Writer
//!
//! Post-hook that appends one JSONL record per qualifying mutating
//! invocation to `.orchestration/agent_trace.jsonl`, binding the
//! invocation to the file ranges it touched, a syntax-aware content hash
//! per range, and every cross-reference (intent, dependency, ticket,
//! requirement) the call can be traced back to.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{GovernanceError, MaosError, Result};
use crate::types::Session;

use super::content_hasher;
use super::hook_engine::{PostHook, PostHookContext};
use super::types::{
    Conversation, ContributorInfo, FileEntry, ModifiedRange, RangeRecord, RecordMeta, RelatedLink,
    RelatedLinkType, Risk, TraceRecord, VcsInfo,
};

/// Resolve the current git HEAD, `"UNKNOWN"` on any failure (not a repo, no
/// git binary, detached worktree without commits, ...).
async fn resolve_git_head(cwd: &Path) -> String {
    match tokio::process::Command::new("git")
        .arg("rev-parse")
        .arg("HEAD")
        .current_dir(cwd)
        .output()
        .await
    {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        }
        _ => "UNKNOWN".to_string(),
    }
}

fn conversation_url(session: &Session) -> String {
    match (&session.task_id, &session.instance_id) {
        (Some(task), Some(instance)) => format!("roo://task/{task}/instance/{instance}"),
        (Some(task), None) => format!("roo://task/{task}"),
        _ => "roo://task/unknown".to_string(),
    }
}

fn contributor_of(session: &Session) -> ContributorInfo {
    let meta = session.agent_metadata.clone().unwrap_or_default();
    ContributorInfo {
        entity_type: "AI".to_string(),
        model_identifier: meta.model_identifier,
        model_version: meta.model_version,
        agent_role: meta.agent_role,
        worker_id: meta.worker_id,
        supervisor_id: meta.supervisor_id,
    }
}

static HUNK_HEADER: once_cell::sync::Lazy<Regex> =
    once_cell::sync::Lazy::new(|| Regex::new(r"@@ -(\d+)(?:,(\d+))? \+(\d+)(?:,(\d+))? @@").expect("hunk header regex is valid"));

fn ranges_from_hunks(diff: &str) -> Vec<ModifiedRange> {
    HUNK_HEADER
        .captures_iter(diff)
        .filter_map(|caps| {
            let new_start: usize = caps.get(3)?.as_str().parse().ok()?;
            let new_len: usize = caps.get(4).and_then(|m| m.as_str().parse().ok()).unwrap_or(1);
            let len = new_len.max(1);
            Some(ModifiedRange {
                start_line: new_start,
                end_line: new_start + len - 1,
            })
        })
        .collect()
}

fn line_count(content: &str) -> usize {
    if content.is_empty() {
        0
    } else {
        content.lines().count()
    }
}

fn span_of_substring(content: &str, needle: &str) -> Option<ModifiedRange> {
    if needle.is_empty() {
        return None;
    }
    let start_byte = content.find(needle)?;
    let end_byte = start_byte + needle.len();
    let start_line = content[..start_byte].matches('\n').count() + 1;
    let end_line = content[..end_byte].matches('\n').count() + 1;
    Some(ModifiedRange {
        start_line,
        end_line: end_line.max(start_line),
    })
}

/// Derive the modified ranges for one affected file, per the tool-specific
/// rule in §4.5: whole-file for `write_to_file`, hunk-derived for
/// diff/patch tools, `new_string` line-span when present, else whole file.
fn derive_ranges(tool_name: &str, payload: &Value, content: &str) -> Vec<ModifiedRange> {
    if tool_name == "write_to_file" {
        return vec![ModifiedRange {
            start_line: 1,
            end_line: line_count(content).max(1),
        }];
    }

    if matches!(tool_name, "apply_diff" | "apply_patch") {
        if let Some(diff) = payload.get("diff").and_then(Value::as_str).or_else(|| payload.get("patch").and_then(Value::as_str)) {
            let hunks = ranges_from_hunks(diff);
            if !hunks.is_empty() {
                return hunks;
            }
        }
    }

    if let Some(new_string) = payload.get("new_string").and_then(Value::as_str) {
        if let Some(span) = span_of_substring(content, new_string) {
            return vec![span];
        }
    }

    vec![ModifiedRange {
        start_line: 1,
        end_line: line_count(content).max(1),
    }]
}

/// Pull a CSV string or JSON array of strings out of a payload field.
fn string_list(payload: &Value, key: &str) -> Vec<String> {
    match payload.get(key) {
        Some(Value::Array(items)) => items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect(),
        Some(Value::String(s)) => s.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect(),
        _ => Vec::new(),
    }
}

fn related_from_payload(payload: &Value) -> Vec<RelatedLink> {
    let mut out = Vec::new();
    for key in ["related_specifications", "intent_ids"] {
        for value in string_list(payload, key) {
            out.push(RelatedLink {
                link_type: RelatedLinkType::Specification,
                value,
            });
        }
    }
    for value in string_list(payload, "requirement_ids") {
        out.push(RelatedLink {
            link_type: RelatedLinkType::Requirement,
            value,
        });
    }
    for value in string_list(payload, "ticket_ids") {
        out.push(RelatedLink {
            link_type: RelatedLinkType::Ticket,
            value,
        });
    }
    for key in ["requirement_links", "related_links"] {
        for value in string_list(payload, key) {
            out.push(RelatedLink {
                link_type: RelatedLinkType::Document,
                value,
            });
        }
    }
    out
}

fn dedup_related(links: Vec<RelatedLink>) -> Vec<RelatedLink> {
    let mut seen = std::collections::HashSet::new();
    links
        .into_iter()
        .filter(|l| seen.insert((l.link_type, l.value.clone())))
        .collect()
}

/// Section heading matches `^##\s+([A-Z]+-\d+)`; within a section, the
/// dependency list is every `-` line following a `**Depends on:**` marker,
/// up to the next blank line.
fn parse_intent_map(text: &str) -> HashMap<String, Vec<String>> {
    static HEADING: once_cell::sync::Lazy<Regex> =
        once_cell::sync::Lazy::new(|| Regex::new(r"^##\s+([A-Z]+-\d+)").expect("intent map heading regex is valid"));

    let mut deps: HashMap<String, Vec<String>> = HashMap::new();
    let mut current: Option<String> = None;
    let mut in_depends_block = false;

    for line in text.lines() {
        if let Some(caps) = HEADING.captures(line) {
            current = Some(caps[1].to_string());
            in_depends_block = false;
            continue;
        }
        if line.contains("**Depends on:**") {
            in_depends_block = true;
            continue;
        }
        if in_depends_block {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                in_depends_block = false;
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix('-') {
                if let Some(id) = &current {
                    deps.entry(id.clone()).or_default().push(rest.trim().trim_matches('`').to_string());
                }
            }
        }
    }
    deps
}

fn intent_map_path(cwd: &Path) -> PathBuf {
    cwd.join(".orchestration").join("intent_map.md")
}

/// Post-hook writing the append-only audit trail. Runs only when the
/// invocation was allowed, produced no error, was classified DESTRUCTIVE,
/// resolved at least one affected file, and the session has a working
/// directory.
pub struct TraceLedgerWriter {
    intent_map_cache: Mutex<HashMap<PathBuf, (SystemTime, HashMap<String, Vec<String>>)>>,
}

impl Default for TraceLedgerWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceLedgerWriter {
    pub fn new() -> Self {
        Self {
            intent_map_cache: Mutex::new(HashMap::new()),
        }
    }

    fn load_intent_map_deps(&self, cwd: &Path, active_intent: &str) -> Vec<String> {
        let path = intent_map_path(cwd);
        let mtime = std::fs::metadata(&path).and_then(|m| m.modified()).ok();

        let Some(mtime) = mtime else {
            return Vec::new();
        };

        if let Some((cached_mtime, cached)) = self.intent_map_cache.lock().get(&path) {
            if *cached_mtime == mtime {
                return cached.get(active_intent).cloned().unwrap_or_default();
            }
        }

        let Ok(text) = std::fs::read_to_string(&path) else {
            return Vec::new();
        };
        let parsed = parse_intent_map(&text);
        let deps = parsed.get(active_intent).cloned().unwrap_or_default();
        self.intent_map_cache.lock().insert(path, (mtime, parsed));
        deps
    }

    fn ledger_path(cwd: &Path) -> PathBuf {
        cwd.join(".orchestration").join("agent_trace.jsonl")
    }

    async fn append_line(path: &Path, line: &str) -> Result<()> {
        use tokio::io::AsyncWriteExt;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|source| {
                MaosError::Governance(GovernanceError::LedgerWriteFailed {
                    path: path.display().to_string(),
                    source,
                })
            })?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await
            .map_err(|source| {
                MaosError::Governance(GovernanceError::LedgerWriteFailed {
                    path: path.display().to_string(),
                    source,
                })
            })?;

        file.write_all(line.as_bytes()).await.map_err(|source| {
            MaosError::Governance(GovernanceError::LedgerWriteFailed {
                path: path.display().to_string(),
                source,
            })
        })?;
        file.write_all(b"\n").await.map_err(|source| {
            MaosError::Governance(GovernanceError::LedgerWriteFailed {
                path: path.display().to_string(),
                source,
            })
        })
    }

    async fn build_record(&self, ctx: &PostHookContext<'_>, invocation_id: Uuid) -> Option<TraceRecord> {
        let cwd = ctx.session.working_directory.clone();
        let active_intent = ctx.session.active_intent_id.clone().unwrap_or_else(|| "UNKNOWN".to_string());
        let url = conversation_url(ctx.session);
        let contributor = contributor_of(ctx.session);

        let mut related = vec![RelatedLink {
            link_type: RelatedLinkType::Specification,
            value: active_intent.clone(),
        }];
        for dep in self.load_intent_map_deps(&cwd, &active_intent) {
            related.push(RelatedLink {
                link_type: RelatedLinkType::Specification,
                value: dep,
            });
        }
        related.extend(related_from_payload(&ctx.payload));
        let related = dedup_related(related);

        let mut files = Vec::new();
        for file in &ctx.classification.affected_files {
            let rel = super::scope_gate::to_posix_relative(&cwd, file);
            let abs = cwd.join(&rel);
            let Ok(content) = tokio::fs::read_to_string(&abs).await else {
                continue;
            };

            let ranges = derive_ranges(&ctx.classification.tool_name, &ctx.payload, &content);
            let inserted = ctx.payload.get("content").and_then(Value::as_str);
            let range_records: Vec<RangeRecord> = ranges
                .into_iter()
                .map(|range| {
                    let hash = content_hasher::compute_hash(&abs, &content, Some(range), inserted);
                    RangeRecord {
                        start_line: range.start_line,
                        end_line: range.end_line,
                        content_hash: hash.digest,
                    }
                })
                .collect();

            files.push(FileEntry {
                relative_path: rel,
                conversations: vec![Conversation {
                    url: url.clone(),
                    contributor: contributor.clone(),
                    ranges: range_records,
                    related: related.clone(),
                    meta: RecordMeta {
                        mutation_class: ctx.classification.mutation_class,
                        mutation_confidence: ctx.classification.mutation_confidence,
                        mutation_signals: ctx.classification.signals.clone(),
                        hook_invocation_id: invocation_id.to_string(),
                    },
                }],
            });
        }

        if files.is_empty() {
            return None;
        }

        Some(TraceRecord {
            id: invocation_id.to_string(),
            timestamp: Utc::now(),
            vcs: VcsInfo {
                revision_id: resolve_git_head(&cwd).await,
            },
            files,
        })
    }
}

#[async_trait]
impl PostHook for TraceLedgerWriter {
    async fn observe(&self, ctx: &mut PostHookContext<'_>) -> Result<()> {
        if !ctx.allowed {
            return Ok(());
        }
        if !matches!(ctx.exec_result, Some(Ok(_))) {
            return Ok(());
        }
        if ctx.classification.risk != Risk::Destructive {
            return Ok(());
        }
        if ctx.classification.affected_files.is_empty() {
            return Ok(());
        }
        if ctx.session.working_directory.as_os_str().is_empty() {
            return Ok(());
        }

        let invocation_id = ctx.invocation_id;
        let Some(record) = self.build_record(ctx, invocation_id).await else {
            return Ok(());
        };

        let line = serde_json::to_string(&record).map_err(|err| {
            MaosError::Governance(GovernanceError::Other(format!("trace record serialization failed: {err}")))
        })?;

        let path = Self::ledger_path(&ctx.session.working_directory);
        Self::append_line(&path, &line).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hunk_header_yields_new_side_range() {
        let diff = "@@ -10,3 +12,5 @@\n context\n";
        let ranges = ranges_from_hunks(diff);
        assert_eq!(ranges, vec![ModifiedRange { start_line: 12, end_line: 16 }]);
    }

    #[test]
    fn hunk_header_without_count_defaults_to_one_line() {
        let diff = "@@ -1 +1 @@\n";
        let ranges = ranges_from_hunks(diff);
        assert_eq!(ranges, vec![ModifiedRange { start_line: 1, end_line: 1 }]);
    }

    #[test]
    fn write_to_file_range_covers_whole_file() {
        let ranges = derive_ranges("write_to_file", &json!({}), "a\nb\nc\n");
        assert_eq!(ranges, vec![ModifiedRange { start_line: 1, end_line: 3 }]);
    }

    #[test]
    fn new_string_range_finds_line_span() {
        let content = "line one\nline two\nline three\n";
        let ranges = derive_ranges("edit", &json!({"new_string": "line two"}), content);
        assert_eq!(ranges, vec![ModifiedRange { start_line: 2, end_line: 2 }]);
    }

    #[test]
    fn string_list_accepts_csv_and_array() {
        assert_eq!(string_list(&json!({"k": "a, b ,c"}), "k"), vec!["a", "b", "c"]);
        assert_eq!(string_list(&json!({"k": ["a", "b"]}), "k"), vec!["a", "b"]);
    }

    #[test]
    fn intent_map_extracts_dependencies_until_blank_line() {
        let text = "## INT-002\n\n**Depends on:**\n- `INT-001`\n- INT-000\n\nmore text\n";
        let deps = parse_intent_map(text);
        assert_eq!(deps.get("INT-002").unwrap(), &vec!["INT-001".to_string(), "INT-000".to_string()]);
    }

    #[test]
    fn related_links_dedup_by_type_and_value() {
        let links = vec![
            RelatedLink { link_type: RelatedLinkType::Specification, value: "INT-001".to_string() },
            RelatedLink { link_type: RelatedLinkType::Specification, value: "INT-001".to_string() },
            RelatedLink { link_type: RelatedLinkType::Ticket, value: "INT-001".to_string() },
        ];
        assert_eq!(dedup_related(links).len(), 2);
    }
}
