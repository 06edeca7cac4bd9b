//! Key/value storage for the access and refresh tokens.
//!
//! Both tokens live under fixed string keys so the on-disk file stays a flat
//! JSON object:
//!
//! ```json
//! { "accessToken": "...", "refreshToken": "..." }
//! ```

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use thiserror::Error;
use tracing::{debug, warn};

/// Default token file name inside the data directory
const TOKEN_FILE: &str = "tokens.json";

/// Which of the two bearer tokens an operation refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub const ALL: [TokenKind; 2] = [TokenKind::Access, TokenKind::Refresh];

    /// Fixed storage key for this token kind
    pub fn key(&self) -> &'static str {
        match self {
            TokenKind::Access => "accessToken",
            TokenKind::Refresh => "refreshToken",
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage for the token pair.
///
/// Implementations use interior mutability so one store can sit behind an
/// `Arc` shared by every clone of the API client. A failed write must not
/// discard the in-memory value.
pub trait TokenStore: Send + Sync {
    fn get(&self, kind: TokenKind) -> Option<String>;

    fn set(&self, kind: TokenKind, token: &str) -> Result<(), TokenStoreError>;

    /// Remove both tokens
    fn clear(&self) -> Result<(), TokenStoreError>;
}

type Entries = BTreeMap<String, String>;

fn lock(entries: &Mutex<Entries>) -> MutexGuard<'_, Entries> {
    // A panic while holding the lock cannot leave the map half-written
    entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ============================================================================
// In-memory store
// ============================================================================

/// Token store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<Entries>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, kind: TokenKind) -> Option<String> {
        lock(&self.entries).get(kind.key()).cloned()
    }

    fn set(&self, kind: TokenKind, token: &str) -> Result<(), TokenStoreError> {
        lock(&self.entries).insert(kind.key().to_string(), token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        lock(&self.entries).clear();
        Ok(())
    }
}

// ============================================================================
// File-backed store
// ============================================================================

/// Token store persisted as a JSON object file.
///
/// The file is read once on open and rewritten on every change.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    entries: Mutex<Entries>,
}

impl FileTokenStore {
    /// Open the default token file inside `dir`
    pub fn in_dir(dir: &Path) -> Result<Self, TokenStoreError> {
        Self::open(dir.join(TOKEN_FILE))
    }

    /// Open a token file, treating a missing or unreadable JSON file as empty
    pub fn open(path: PathBuf) -> Result<Self, TokenStoreError> {
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Entries>(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "Ignoring corrupt token file");
                    Entries::new()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => Entries::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(path = %path.display(), entries = entries.len(), "Token file opened");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_entries(&self, entries: &Entries) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(entries)?;

        // Tokens are credentials: the file is user-only from creation
        #[cfg(unix)]
        let mut file = {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)?;
            // mode() only applies when the file is created
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
            file
        };

        #[cfg(not(unix))]
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;

        file.write_all(contents.as_bytes())?;
        file.flush()?;

        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, kind: TokenKind) -> Option<String> {
        lock(&self.entries).get(kind.key()).cloned()
    }

    fn set(&self, kind: TokenKind, token: &str) -> Result<(), TokenStoreError> {
        let mut entries = lock(&self.entries);
        entries.insert(kind.key().to_string(), token.to_string());
        self.write_entries(&entries)
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut entries = lock(&self.entries);
        entries.clear();
        self.write_entries(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise_store(store: &dyn TokenStore) {
        assert_eq!(store.get(TokenKind::Access), None);
        assert_eq!(store.get(TokenKind::Refresh), None);

        store.set(TokenKind::Access, "A").unwrap();
        store.set(TokenKind::Refresh, "R").unwrap();
        assert_eq!(store.get(TokenKind::Access).as_deref(), Some("A"));
        assert_eq!(store.get(TokenKind::Refresh).as_deref(), Some("R"));

        // Overwrite only touches one slot
        store.set(TokenKind::Access, "A2").unwrap();
        assert_eq!(store.get(TokenKind::Access).as_deref(), Some("A2"));
        assert_eq!(store.get(TokenKind::Refresh).as_deref(), Some("R"));

        store.clear().unwrap();
        for kind in TokenKind::ALL {
            assert_eq!(store.get(kind), None);
        }

        // Clearing twice is fine
        store.clear().unwrap();
        assert_eq!(store.get(TokenKind::Access), None);
    }

    #[test]
    fn test_token_kind_keys() {
        assert_eq!(TokenKind::Access.key(), "accessToken");
        assert_eq!(TokenKind::Refresh.key(), "refreshToken");
    }

    #[test]
    fn test_memory_store_set_get_clear() {
        exercise_store(&MemoryTokenStore::new());
    }

    #[test]
    fn test_file_store_set_get_clear() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::in_dir(dir.path()).unwrap();
        exercise_store(&store);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::open(dir.path().join("nested").join("tokens.json")).unwrap();
        assert_eq!(store.get(TokenKind::Access), None);

        // Parent directories are created on first write
        store.set(TokenKind::Access, "A").unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_file_store_persists_across_open() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileTokenStore::in_dir(dir.path()).unwrap();
            store.set(TokenKind::Access, "A").unwrap();
            store.set(TokenKind::Refresh, "R").unwrap();
        }

        let reopened = FileTokenStore::in_dir(dir.path()).unwrap();
        assert_eq!(reopened.get(TokenKind::Access).as_deref(), Some("A"));
        assert_eq!(reopened.get(TokenKind::Refresh).as_deref(), Some("R"));

        reopened.clear().unwrap();
        let cleared = FileTokenStore::in_dir(dir.path()).unwrap();
        assert_eq!(cleared.get(TokenKind::Access), None);
        assert_eq!(cleared.get(TokenKind::Refresh), None);
    }

    #[test]
    fn test_file_store_uses_fixed_keys_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::in_dir(dir.path()).unwrap();
        store.set(TokenKind::Access, "A").unwrap();
        store.set(TokenKind::Refresh, "R").unwrap();

        let contents = std::fs::read_to_string(store.path()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json["accessToken"], "A");
        assert_eq!(json["refreshToken"], "R");
    }

    #[test]
    fn test_file_store_corrupt_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::open(path).unwrap();
        assert_eq!(store.get(TokenKind::Access), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_user_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = FileTokenStore::in_dir(dir.path()).unwrap();
        store.set(TokenKind::Access, "A").unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tokens.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileTokenStore::open(path.clone()).unwrap();
        store.set(TokenKind::Refresh, "R").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.get(TokenKind::Refresh).as_deref(), Some("R"));
    }
}
