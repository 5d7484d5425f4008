//! Intent definitions file loading
//!
//! `.orchestration/active_intents.yaml` declares the intents a session may
//! bind to and the scope each one owns. Shared by the Handshake (binding
//! an intent to a fresh session) and the Scope & Lock Gate (authorizing
//! mutations against the bound intent's `owned_scope`).

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GovernanceError, MaosError, Result};

use super::types::Intent;

/// Raw on-disk shape. `owned_scope` is typed as a loose YAML value because
/// a malformed (non-sequence) entry must degrade to an empty scope rather
/// than fail the whole file.
#[derive(Debug, Deserialize, Default)]
struct RawIntentFile {
    #[serde(default)]
    active_intents: Vec<RawIntent>,
}

#[derive(Debug, Deserialize)]
struct RawIntent {
    id: Option<String>,
    #[serde(default)]
    owned_scope: serde_yaml::Value,
    #[serde(default)]
    constraints: Vec<String>,
    #[serde(default)]
    acceptance_criteria: Vec<String>,
}

impl RawIntent {
    fn into_intent(self) -> Option<Intent> {
        let id = self.id.filter(|s| !s.is_empty())?;
        let owned_scope = match self.owned_scope {
            serde_yaml::Value::Sequence(seq) => seq
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
            _ => Vec::new(),
        };
        Some(Intent {
            id,
            owned_scope,
            constraints: self.constraints,
            acceptance_criteria: self.acceptance_criteria,
        })
    }
}

/// Default location of the intent definitions file, relative to a
/// session's working directory. Prefers `.yaml`; falls back to `.yml` when
/// only that extension exists on disk.
pub fn intent_file_path(working_directory: &Path) -> PathBuf {
    let yaml = working_directory.join(".orchestration").join("active_intents.yaml");
    if yaml.exists() {
        return yaml;
    }
    let yml = working_directory.join(".orchestration").join("active_intents.yml");
    if yml.exists() {
        return yml;
    }
    yaml
}

/// Load and parse the intent definitions file. A missing file yields an
/// empty intent list (no active intents declared yet); a present-but-
/// unreadable or malformed file is a hard [`GovernanceError`].
pub fn load_intents(working_directory: &Path) -> Result<Vec<Intent>> {
    let path = intent_file_path(working_directory);
    let raw = match std::fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(MaosError::Governance(GovernanceError::IntentFileUnreadable {
                path: path.display().to_string(),
                source,
            }))
        }
    };

    let parsed: RawIntentFile = serde_yaml::from_str(&raw).map_err(|err| {
        MaosError::Governance(GovernanceError::IntentFileInvalid {
            path: path.display().to_string(),
            reason: err.to_string(),
        })
    })?;

    Ok(parsed.active_intents.into_iter().filter_map(RawIntent::into_intent).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_empty_list() {
        let dir = tempdir().unwrap();
        let intents = load_intents(dir.path()).unwrap();
        assert!(intents.is_empty());
    }

    #[test]
    fn loads_well_formed_intents() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".orchestration")).unwrap();
        std::fs::write(
            intent_file_path(dir.path()),
            "active_intents:\n  - id: auth-rework\n    owned_scope:\n      - src/auth/**\n    constraints: []\n",
        )
        .unwrap();

        let intents = load_intents(dir.path()).unwrap();
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].id, "auth-rework");
        assert_eq!(intents[0].owned_scope, vec!["src/auth/**".to_string()]);
    }

    #[test]
    fn yml_extension_is_used_when_yaml_is_absent() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".orchestration")).unwrap();
        std::fs::write(
            dir.path().join(".orchestration").join("active_intents.yml"),
            "active_intents:\n  - id: auth-rework\n    owned_scope:\n      - src/auth/**\n",
        )
        .unwrap();

        let intents = load_intents(dir.path()).unwrap();
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].id, "auth-rework");
    }

    #[test]
    fn non_sequence_owned_scope_degrades_to_empty() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".orchestration")).unwrap();
        std::fs::write(
            intent_file_path(dir.path()),
            "active_intents:\n  - id: broken\n    owned_scope: \"src/**\"\n",
        )
        .unwrap();

        let intents = load_intents(dir.path()).unwrap();
        assert_eq!(intents.len(), 1);
        assert!(intents[0].owned_scope.is_empty());
    }

    #[test]
    fn entry_missing_id_is_dropped() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".orchestration")).unwrap();
        std::fs::write(
            intent_file_path(dir.path()),
            "active_intents:\n  - owned_scope: [\"src/**\"]\n",
        )
        .unwrap();

        let intents = load_intents(dir.path()).unwrap();
        assert!(intents.is_empty());
    }

    #[test]
    fn malformed_yaml_is_a_governance_error() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".orchestration")).unwrap();
        std::fs::write(intent_file_path(dir.path()), "active_intents: [this is not valid: yaml: at all").unwrap();

        let err = load_intents(dir.path()).unwrap_err();
        assert!(matches!(err, MaosError::Governance(GovernanceError::IntentFileInvalid { .. })));
    }
}
