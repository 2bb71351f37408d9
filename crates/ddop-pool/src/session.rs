//! The editor session.
//!
//! Owns the pool being edited, the compatibility level it will be saved at,
//! and the diagnostic log shown to the user. All mutation runs to completion
//! on the caller's thread between display frames; a session is never shared.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::codec::{
    CompatibilityLevel, decode_pool, encode_pool, has_iop_extension, read_iop_file, write_iop_file,
};
use crate::diag::DiagnosticLog;
use crate::error::SessionError;
use crate::model::ObjectPool;

/// An editing session over at most one object pool.
#[derive(Debug, Default)]
pub struct EditorSession {
    pool: Option<ObjectPool>,
    log: DiagnosticLog,
    compatibility: CompatibilityLevel,
    last_file: Option<PathBuf>,
}

impl EditorSession {
    /// Creates a session with no pool open.
    pub fn new() -> Self {
        Self::default()
    }

    /// The pool under edit, if any.
    pub fn pool(&self) -> Option<&ObjectPool> {
        self.pool.as_ref()
    }

    /// The pool under edit for mutation, if any.
    pub fn pool_mut(&mut self) -> Option<&mut ObjectPool> {
        self.pool.as_mut()
    }

    /// The diagnostic history, oldest first.
    pub fn log(&self) -> &DiagnosticLog {
        &self.log
    }

    pub fn compatibility(&self) -> CompatibilityLevel {
        self.compatibility
    }

    pub fn set_compatibility(&mut self, level: CompatibilityLevel) {
        self.compatibility = level;
    }

    /// Path of the last successful open or save.
    pub fn last_file(&self) -> Option<&Path> {
        self.last_file.as_deref()
    }

    /// Starts a fresh pool, replacing any current one and clearing the log.
    pub fn new_pool(&mut self, designator: &str, iso_name: u64) {
        info!(designator, "starting new object pool");
        self.log.clear();
        self.pool = Some(ObjectPool::new(designator, iso_name));
        self.last_file = None;
    }

    /// Closes the current pool, if any. The log is kept for inspection.
    pub fn close_pool(&mut self) {
        self.pool = None;
    }

    /// Loads a pool from an `.iop` file.
    ///
    /// On success the decoded pool replaces the current one. On any failure
    /// — wrong extension, unreadable file, undecodable bytes — the session
    /// keeps the pool it had, and decode diagnostics stay in the log.
    pub fn open_file(&mut self, path: &Path) -> Result<(), SessionError> {
        if !has_iop_extension(path) {
            return Err(SessionError::NotAnIopFile {
                path: path.display().to_string(),
            });
        }
        let bytes = read_iop_file(path)?;

        self.log.clear();
        match decode_pool(&bytes, 0, self.compatibility, &mut self.log) {
            Ok(pool) => {
                info!(path = %path.display(), objects = pool.len(), "object pool loaded");
                self.pool = Some(pool);
                self.last_file = Some(path.to_path_buf());
                Ok(())
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "object pool failed to decode");
                self.log.error(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Encodes the current pool and writes it to an `.iop` file.
    ///
    /// The file is only written when encoding succeeded, and "saved" is only
    /// reported (by returning Ok) after the write itself succeeded.
    pub fn save_file(&mut self, path: &Path) -> Result<(), SessionError> {
        let pool = self.pool.as_ref().ok_or(SessionError::NoPool)?;

        let bytes = match encode_pool(pool, self.compatibility, &mut self.log) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(%err, "object pool failed to encode");
                self.log.error(err.to_string());
                return Err(err.into());
            }
        };
        write_iop_file(path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "object pool saved");
        self.last_file = Some(path.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::model::{DeviceElement, DeviceElementKind, ObjectBody};

    fn session_with_pool() -> EditorSession {
        let mut session = EditorSession::new();
        session.new_pool("Baler", 0x1234);
        let root = session.pool().unwrap().root_id().unwrap();
        session.pool_mut().unwrap().add(
            "Pickup",
            ObjectBody::Element(DeviceElement::new(DeviceElementKind::Function, 1, root)),
        );
        session
    }

    #[test]
    fn test_save_then_open_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("baler.iop");

        let mut session = session_with_pool();
        session.save_file(&path).unwrap();
        let saved = session.pool().unwrap().clone();

        let mut other = EditorSession::new();
        other.open_file(&path).unwrap();
        assert_eq!(other.pool().unwrap(), &saved);
        assert_eq!(other.last_file(), Some(path.as_path()));
    }

    #[test]
    fn test_open_rejects_wrong_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pool.bin");
        fs::write(&path, b"junk").unwrap();

        let mut session = session_with_pool();
        assert!(matches!(
            session.open_file(&path),
            Err(SessionError::NotAnIopFile { .. })
        ));
        // The current pool is untouched.
        assert!(session.pool().is_some());
    }

    #[test]
    fn test_failed_decode_retains_previous_pool() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.iop");
        fs::write(&path, [0x01, 0x00, b'X', b'Y', b'Z']).unwrap();

        let mut session = session_with_pool();
        let before = session.pool().unwrap().clone();
        assert!(session.open_file(&path).is_err());
        assert_eq!(session.pool().unwrap(), &before);
        assert!(!session.log().is_empty());
    }

    #[test]
    fn test_save_without_pool_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = EditorSession::new();
        assert!(matches!(
            session.save_file(&dir.path().join("none.iop")),
            Err(SessionError::NoPool)
        ));
    }

    #[test]
    fn test_save_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_with_pool();
        let missing_dir = dir.path().join("absent").join("pool.iop");
        assert!(matches!(
            session.save_file(&missing_dir),
            Err(SessionError::Io(_))
        ));
    }

    #[test]
    fn test_new_pool_replaces_and_clears_log() {
        let mut session = session_with_pool();
        session.log.error("stale");
        session.new_pool("Mower", 7);
        assert!(session.log().is_empty());
        assert_eq!(session.pool().unwrap().len(), 1);
        assert_eq!(session.pool().unwrap().device().unwrap().iso_name, 7);
    }
}
