//! Command Classifier
//!
//! Pure function of a tool name and its raw payload: no I/O, no session
//! state. Everything downstream (Scope & Lock Gate, Trace Ledger Writer)
//! consumes the [`Classification`] it produces rather than re-deriving any
//! of this.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::types::{
    Classification, MutationClass, MutationConfidence, Risk, DESTRUCTIVE_BASE_TOOLS, SAFE_BASE_TOOLS,
};

fn normalize_tool_name(raw: &str) -> String {
    match raw {
        "write_file" => "write_to_file".to_string(),
        "exec_bash" => "execute_command".to_string(),
        other => other.to_string(),
    }
}

fn base_risk(normalized: &str) -> Risk {
    if DESTRUCTIVE_BASE_TOOLS.contains(&normalized) {
        return Risk::Destructive;
    }
    if SAFE_BASE_TOOLS.contains(&normalized) {
        return Risk::Safe;
    }
    if normalized.starts_with("read_") || normalized.starts_with("list") {
        return Risk::Safe;
    }
    if normalized.starts_with("write") || normalized.starts_with("delete") {
        return Risk::Destructive;
    }
    Risk::Safe
}

/// Structural-keyword regex used for the balanced-structural-lines signal.
/// Deliberately conservative: false negatives (missing a structural line)
/// are safer here than false positives driving a wrong AST_REFACTOR label.
static STRUCTURAL_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:class|interface|type|enum|function|def|public|private|protected|module|namespace|export\s+\w+)\b")
        .expect("structural keyword regex is valid")
});

/// Phrases whose presence in added text signals a change in intent rather
/// than a pure refactor.
static INTENT_EVOLUTION_PHRASES: &[&str] = &[
    "new feature",
    "add endpoint",
    "introduce",
    "support ",
    "migration",
    "breaking",
    "deprecate",
];

fn diff_text(payload: &Value) -> Option<&str> {
    payload
        .get("diff")
        .and_then(Value::as_str)
        .or_else(|| payload.get("patch").and_then(Value::as_str))
        .filter(|s| !s.is_empty())
}

fn added_and_removed_lines(diff: &str) -> (Vec<&str>, Vec<&str>) {
    let mut added = Vec::new();
    let mut removed = Vec::new();
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            continue;
        }
        if let Some(rest) = line.strip_prefix('+') {
            added.push(rest);
        } else if let Some(rest) = line.strip_prefix('-') {
            removed.push(rest);
        }
    }
    (added, removed)
}

fn structural_count(lines: &[&str]) -> usize {
    lines.iter().filter(|l| STRUCTURAL_KEYWORDS.is_match(l)).count()
}

fn classify_mutation(tool_name: &str, payload: &Value) -> (MutationClass, MutationConfidence, Vec<String>) {
    let Some(diff) = diff_text(payload) else {
        if tool_name == "write_to_file" {
            return (MutationClass::IntentEvolution, MutationConfidence::Low, vec!["full_write_without_diff".to_string()]);
        }
        return (MutationClass::Unknown, MutationConfidence::Low, Vec::new());
    };

    let (added, removed) = added_and_removed_lines(diff);

    let add_remove_balanced =
        !added.is_empty() && !removed.is_empty() && added.len().abs_diff(removed.len()) <= 10;

    let added_structural = structural_count(&added);
    let removed_structural = structural_count(&removed);
    let max_structural = added_structural.max(removed_structural);
    let bound = ((max_structural as f64 * 0.4).ceil() as usize).max(2);
    let structural_balanced =
        added_structural > 0 && removed_structural > 0 && added_structural.abs_diff(removed_structural) <= bound;

    let mut signals = Vec::new();
    if add_remove_balanced {
        signals.push("balanced_diff_shape".to_string());
    }
    if structural_balanced {
        signals.push("balanced_structural_lines".to_string());
    }

    let added_text = added.join("\n").to_ascii_lowercase();
    let has_intent_language = INTENT_EVOLUTION_PHRASES.iter().any(|phrase| added_text.contains(phrase));
    if has_intent_language {
        signals.push("intent_evolution_language".to_string());
    }

    if diff.contains("*** Add File:") || diff.trim_start().starts_with("--- /dev/null") {
        signals.push("adds_new_file".to_string());
    }
    if diff.contains("*** Delete File:") || diff.trim_start().starts_with("+++ /dev/null") {
        signals.push("deletes_file".to_string());
    }

    if add_remove_balanced && structural_balanced {
        let confidence = if has_intent_language { MutationConfidence::Medium } else { MutationConfidence::High };
        (MutationClass::AstRefactor, confidence, signals)
    } else {
        let confidence = if has_intent_language { MutationConfidence::High } else { MutationConfidence::Medium };
        (MutationClass::IntentEvolution, confidence, signals)
    }
}

fn extract_affected_files(tool_name: &str, payload: &Value) -> Vec<String> {
    let mut files = Vec::new();
    let mut push = |value: Option<&str>| {
        if let Some(v) = value {
            let trimmed = v.trim();
            if !trimmed.is_empty() && !files.iter().any(|f: &String| f == trimmed) {
                files.push(trimmed.to_string());
            }
        }
    };

    push(payload.get("path").and_then(Value::as_str));
    push(payload.get("file_path").and_then(Value::as_str));

    if tool_name == "apply_patch" {
        if let Some(patch) = payload.get("patch").and_then(Value::as_str) {
            for line in patch.lines() {
                for marker in ["*** Add File: ", "*** Update File: ", "*** Delete File: "] {
                    if let Some(rest) = line.strip_prefix(marker) {
                        push(Some(rest.trim()));
                    }
                }
            }
        }
    }

    files
}

/// Classify a single tool call. Pure: identical inputs always yield an
/// identical [`Classification`].
pub fn classify(tool_name: &str, payload: &Value) -> Classification {
    let normalized = normalize_tool_name(tool_name);
    let risk = base_risk(&normalized);
    let affected_files = extract_affected_files(&normalized, payload);
    let diff_preview = diff_text(payload).map(|d| d.lines().take(20).collect::<Vec<_>>().join("\n"));

    let (mutation_class, mutation_confidence, signals) = if risk == Risk::Destructive {
        classify_mutation(&normalized, payload)
    } else {
        (MutationClass::Unknown, MutationConfidence::Low, Vec::new())
    };

    Classification {
        tool_name: normalized,
        risk,
        mutation_class,
        mutation_confidence,
        signals,
        affected_files,
        diff_preview,
    }
}
