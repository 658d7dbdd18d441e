//! Signed-in user state with an explicit init/read/clear lifecycle.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::access::Role;
use crate::error::{ReportError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub role: Role,
    /// Outlet an outlet user reports for; admins leave this empty.
    #[serde(default)]
    pub outlet_name: Option<String>,
}

impl Session {
    pub fn admin(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: Role::Admin,
            outlet_name: None,
        }
    }

    pub fn outlet(username: impl Into<String>, outlet_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: Role::Outlet,
            outlet_name: Some(outlet_name.into()),
        }
    }
}

pub trait SessionStore {
    /// Replace whatever session is stored.
    fn init(&mut self, session: Session) -> Result<()>;
    fn read(&self) -> Result<Option<Session>>;
    fn clear(&mut self) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    current: Option<Session>,
}

impl SessionStore for MemorySessionStore {
    fn init(&mut self, session: Session) -> Result<()> {
        self.current = Some(session);
        Ok(())
    }

    fn read(&self) -> Result<Option<Session>> {
        Ok(self.current.clone())
    }

    fn clear(&mut self) -> Result<()> {
        self.current = None;
        Ok(())
    }
}

/// Keeps the session as a JSON file so it survives restarts.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn init(&mut self, session: Session) -> Result<()> {
        let body = serde_json::to_string_pretty(&session)?;
        std::fs::write(&self.path, body)?;
        tracing::info!(user = %session.username, role = ?session.role, "Session started");
        Ok(())
    }

    fn read(&self) -> Result<Option<Session>> {
        let body = match std::fs::read_to_string(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&body).map(Some).map_err(|e| {
            ReportError::Session(format!("corrupt session file {}: {}", self.path.display(), e))
        })
    }

    fn clear(&mut self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_lifecycle() {
        let mut store = MemorySessionStore::default();
        assert_eq!(store.read().unwrap(), None);
        store.init(Session::admin("root")).unwrap();
        assert_eq!(store.read().unwrap().unwrap().role, Role::Admin);
        store.clear().unwrap();
        assert_eq!(store.read().unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileSessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.read().unwrap(), None);

        let session = Session::outlet("kasir01", "Grand Mall XXI");
        store.init(session.clone()).unwrap();
        assert_eq!(store.read().unwrap(), Some(session));

        store.clear().unwrap();
        assert_eq!(store.read().unwrap(), None);
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = FileSessionStore::new(&path);
        assert!(matches!(store.read(), Err(ReportError::Session(_))));
    }

    #[test]
    fn test_session_accepts_role_strings() {
        let s: Session =
            serde_json::from_str(r#"{"username": "u", "role": "user", "outlet_name": "Plaza"}"#)
                .unwrap();
        assert_eq!(s.role, Role::Outlet);
        assert_eq!(s.outlet_name.as_deref(), Some("Plaza"));
    }

    #[test]
    fn test_file_store_reads_capitalised_role() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"username": "root", "role": "Admin"}"#).unwrap();
        let store = FileSessionStore::new(&path);
        assert_eq!(store.read().unwrap(), Some(Session::admin("root")));
    }
}
