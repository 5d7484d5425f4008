//! Session Store
//!
//! Cross-process persistence for governance [`Session`] state. Each hook
//! event is a separate process invocation; binding an intent at
//! `session-start` only matters if `pre-tool-use` (running minutes later,
//! in a different process) can see it. Stored as one JSON file per session
//! under `.orchestration/sessions/<session_id>.json`, written via a
//! temp-file-plus-rename so a reader never observes a partial write.

use std::path::{Path, PathBuf};

use crate::error::{GovernanceError, MaosError, Result};
use crate::types::{Session, SessionId};

fn sessions_dir(cwd: &Path) -> PathBuf {
    cwd.join(".orchestration").join("sessions")
}

fn session_path(cwd: &Path, id: &SessionId) -> PathBuf {
    sessions_dir(cwd).join(format!("{}.json", id.as_str()))
}

/// Load the persisted session for `id` under `cwd`, if one exists.
pub fn load(cwd: &Path, id: &SessionId) -> Result<Option<Session>> {
    let path = session_path(cwd, id);
    match std::fs::read_to_string(&path) {
        Ok(raw) => {
            let session: Session = serde_json::from_str(&raw).map_err(|err| {
                MaosError::Governance(GovernanceError::Other(format!(
                    "session state at {} is corrupt: {err}",
                    path.display()
                )))
            })?;
            Ok(Some(session))
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(MaosError::Governance(GovernanceError::SessionPersistenceFailed {
            path: path.display().to_string(),
            source,
        })),
    }
}

/// Persist `session`, creating `.orchestration/sessions/` if needed.
///
/// Writes to a sibling `.tmp` file first and renames it into place, so a
/// process crash mid-write never leaves a half-written session file behind
/// for the next invocation to trip over.
pub fn save(cwd: &Path, session: &Session) -> Result<()> {
    let dir = sessions_dir(cwd);
    let path = session_path(cwd, &session.id);

    std::fs::create_dir_all(&dir).map_err(|source| {
        MaosError::Governance(GovernanceError::SessionPersistenceFailed {
            path: dir.display().to_string(),
            source,
        })
    })?;

    let json = serde_json::to_string_pretty(session).map_err(|err| {
        MaosError::Governance(GovernanceError::Other(format!("session serialization failed: {err}")))
    })?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json).map_err(|source| {
        MaosError::Governance(GovernanceError::SessionPersistenceFailed {
            path: tmp_path.display().to_string(),
            source,
        })
    })?;
    std::fs::rename(&tmp_path, &path).map_err(|source| {
        MaosError::Governance(GovernanceError::SessionPersistenceFailed {
            path: path.display().to_string(),
            source,
        })
    })
}

/// Load the session for `id`, or synthesize a fresh `Active` one rooted at
/// `cwd` when none has been persisted yet (first hook invocation of a run
/// that predates `session-start`, or a `session-start` itself).
pub fn load_or_create(cwd: &Path, id: SessionId) -> Result<Session> {
    if let Some(existing) = load(cwd, &id)? {
        return Ok(existing);
    }
    Ok(Session {
        id,
        created_at: chrono::Utc::now(),
        last_activity: chrono::Utc::now(),
        status: crate::types::SessionStatus::Active,
        workspace_root: cwd.to_path_buf(),
        active_agents: Vec::new(),
        working_directory: cwd.to_path_buf(),
        task_id: None,
        instance_id: None,
        agent_metadata: None,
        active_intent_id: None,
        user_messages: Vec::new(),
    })
}
