//! Persisted auth session: bearer token plus the account profile, stored as
//! a JSON file next to the user-data database.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Load the stored session, if any. A missing file means logged out; an
/// unreadable file is an error so the user knows login state is broken.
pub fn load_session(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file: {}", path.display()))?;
    let session = serde_json::from_str(&content)
        .with_context(|| format!("Session file is corrupt: {}", path.display()))?;
    Ok(Some(session))
}

pub fn save_session(path: &Path, session: &Session) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(session)?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write session file: {}", path.display()))?;
    Ok(())
}

/// Delete the stored session. Idempotent.
pub fn clear_session(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove session file: {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use tempfile::TempDir;

    fn sample_session() -> Session {
        Session {
            token: "tok".to_string(),
            user: User {
                id: "u1".to_string(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                created_at: "2026-01-01T00:00:00Z".to_string(),
                updated_at: "2026-01-01T00:00:00Z".to_string(),
            },
        }
    }

    #[test]
    fn save_then_load_round_trips() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        save_session(&path, &sample_session()).unwrap();
        let loaded = load_session(&path).unwrap().unwrap();
        assert_eq!(loaded.token, "tok");
        assert_eq!(loaded.user.email, "ada@example.com");
    }

    #[test]
    fn missing_file_is_logged_out() {
        let tmp = TempDir::new().unwrap();
        assert!(load_session(&tmp.path().join("none.json")).unwrap().is_none());
    }

    #[test]
    fn clear_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        clear_session(&path).unwrap();
        save_session(&path, &sample_session()).unwrap();
        clear_session(&path).unwrap();
        clear_session(&path).unwrap();
        assert!(load_session(&path).unwrap().is_none());
    }
}
