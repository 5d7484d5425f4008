//! Content Hasher
//!
//! Produces a canonical digest for a (possibly partial) view of a file's
//! content. When the file's grammar can be parsed, the hash is taken over
//! a token stream reconstructed from the AST (comments dropped, whitespace
//! collapsed) so that reformatting and commenting never change the digest.
//! Anything that fails to parse — including every non-JS/TS source file —
//! falls back to a plain normalized-string hash, which stays correct (if
//! less forgiving of formatting) for arbitrary UTF-8 text.

use std::path::Path;

use sha2::{Digest, Sha256};
use tree_sitter::{Language, Node, Parser};

use super::types::{ContentHash, HashStrategy, ModifiedRange};

fn select_language(path: &Path) -> Language {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("ts") || ext.eq_ignore_ascii_case("tsx") => {
            tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
        }
        _ => tree_sitter_javascript::LANGUAGE.into(),
    }
}

/// Byte offset of the start of `line` (1-indexed) and the byte offset one
/// past the end of `end_line`, including its trailing newline if present.
fn line_byte_range(content: &str, start_line: usize, end_line: usize) -> Option<(usize, usize)> {
    if start_line == 0 || end_line < start_line {
        return None;
    }
    let mut line_starts = Vec::new();
    let mut offset = 0usize;
    for line in content.split_inclusive('\n') {
        line_starts.push(offset);
        offset += line.len();
    }
    line_starts.push(offset);

    let total_lines = line_starts.len() - 1;
    if start_line > total_lines {
        return None;
    }
    let end_line = end_line.min(total_lines.max(1));
    let start_byte = line_starts[start_line - 1];
    let end_byte = line_starts[end_line];
    Some((start_byte, end_byte))
}

fn find_enclosing<'a>(node: Node<'a>, start: usize, end: usize) -> Node<'a> {
    let mut current = node;
    loop {
        let mut cursor = current.walk();
        let next = current
            .children(&mut cursor)
            .find(|child| child.start_byte() <= start && child.end_byte() >= end);
        match next {
            Some(child) => current = child,
            None => break,
        }
    }
    current
}

fn collect_tokens<'a>(node: Node<'a>, source: &'a [u8], out: &mut Vec<&'a str>) {
    if node.kind().contains("comment") {
        return;
    }
    if node.child_count() == 0 {
        if let Ok(text) = node.utf8_text(source) {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                out.push(trimmed);
            }
        }
        return;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_tokens(child, source, out);
    }
}

fn normalize_whitespace(text: &str) -> String {
    let unified = text.replace("\r\n", "\n");
    unified
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn digest_of(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("sha256:{:x}", hasher.finalize())
}

fn normalized_contains(haystack: &str, needle: &str) -> bool {
    fn collapse(s: &str) -> String {
        s.split_whitespace().collect::<Vec<_>>().join(" ")
    }
    collapse(haystack).contains(&collapse(needle))
}

/// Compute a content hash for `content`, optionally scoped to a 1-indexed
/// inclusive line `range`. `inserted` is the text the calling tool actually
/// wrote (used only by the fallback paths, when present).
pub fn compute_hash(path: &Path, content: &str, range: Option<ModifiedRange>, inserted: Option<&str>) -> ContentHash {
    let language = select_language(path);
    let mut parser = Parser::new();

    let parsed = parser.set_language(&language).ok().and_then(|_| parser.parse(content, None));

    if let Some(tree) = parsed {
        let root = tree.root_node();
        if !root.has_error() {
            let target = match range {
                Some(r) => match line_byte_range(content, r.start_line, r.end_line) {
                    Some((start, end)) => Some(find_enclosing(root, start, end)),
                    None => None,
                },
                None => Some(root),
            };

            if let Some(node) = target {
                let source = content.as_bytes();
                let mut tokens = Vec::new();
                collect_tokens(node, source, &mut tokens);
                let mut canonical = tokens.join(" ");
                if canonical.is_empty() && node.end_byte() > node.start_byte() {
                    // A non-empty span with no tokens (e.g. whitespace-only
                    // source) must not collide with a genuinely empty span.
                    canonical = " ".to_string();
                }
                return ContentHash {
                    digest: digest_of(&canonical),
                    strategy: HashStrategy::AstCanonical,
                    canonical_content: canonical,
                };
            }
        }
    }

    // Fallback: whitespace-normalized string hash.
    let fallback_text = match inserted {
        Some(text) if !text.is_empty() && normalized_contains(content, text) => text,
        _ => content,
    };
    let mut canonical = normalize_whitespace(fallback_text);
    if canonical.is_empty() && !fallback_text.is_empty() {
        // Whitespace-only input normalizes away to nothing; keep it
        // distinguishable from genuinely empty input.
        canonical = " ".to_string();
    }
    ContentHash {
        digest: digest_of(&canonical),
        strategy: HashStrategy::NormalizedString,
        canonical_content: canonical,
    }
}
