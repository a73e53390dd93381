//! Persisted session credentials
//!
//! The session is four independent entries (`access_token`, `refresh_token`,
//! `user_id`, `user_username`) kept in a [`CredentialStore`]. The store is
//! injected into the API client, so tests run against
//! [`MemoryCredentialStore`] while the CLI uses the OS keyring or a JSON file.
//!
//! Access and refresh token are either both present or both absent;
//! [`CredentialBundle::load`] rejects anything in between.

use super::Result;
use super::config::CredentialBackend;
use crate::error::StorageError;
use keyring::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const KEYRING_SERVICE: &str = "flexiplan";

/// Name of one persisted credential entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CredentialKey {
    AccessToken,
    RefreshToken,
    UserId,
    Username,
}

impl CredentialKey {
    pub const ALL: [CredentialKey; 4] = [
        CredentialKey::AccessToken,
        CredentialKey::RefreshToken,
        CredentialKey::UserId,
        CredentialKey::Username,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialKey::AccessToken => "access_token",
            CredentialKey::RefreshToken => "refresh_token",
            CredentialKey::UserId => "user_id",
            CredentialKey::Username => "user_username",
        }
    }
}

/// Key-value storage for the session entries.
///
/// `delete` of an absent key succeeds.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: CredentialKey) -> Result<Option<String>>;
    fn set(&self, key: CredentialKey, value: &str) -> Result<()>;
    fn delete(&self, key: CredentialKey) -> Result<()>;
}

/// The full persisted session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialBundle {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: i64,
    pub username: String,
}

impl CredentialBundle {
    /// Read the bundle. `Ok(None)` means logged out.
    pub fn load(store: &dyn CredentialStore) -> Result<Option<Self>> {
        let access = store.get(CredentialKey::AccessToken)?;
        let refresh = store.get(CredentialKey::RefreshToken)?;

        let (access_token, refresh_token) = match (access, refresh) {
            (None, None) => return Ok(None),
            (Some(a), Some(r)) => (a, r),
            (Some(_), None) => {
                return Err(StorageError::PartialBundle {
                    present: CredentialKey::AccessToken.as_str(),
                    missing: CredentialKey::RefreshToken.as_str(),
                });
            }
            (None, Some(_)) => {
                return Err(StorageError::PartialBundle {
                    present: CredentialKey::RefreshToken.as_str(),
                    missing: CredentialKey::AccessToken.as_str(),
                });
            }
        };

        let user_id = store
            .get(CredentialKey::UserId)?
            .ok_or(StorageError::PartialBundle {
                present: CredentialKey::AccessToken.as_str(),
                missing: CredentialKey::UserId.as_str(),
            })?;
        let user_id = user_id
            .parse::<i64>()
            .map_err(|_| StorageError::InvalidUserId { value: user_id })?;

        let username = store
            .get(CredentialKey::Username)?
            .ok_or(StorageError::PartialBundle {
                present: CredentialKey::AccessToken.as_str(),
                missing: CredentialKey::Username.as_str(),
            })?;

        Ok(Some(Self {
            access_token,
            refresh_token,
            user_id,
            username,
        }))
    }

    /// Write all four entries. On a failed write the entries already written
    /// are removed again so no half bundle is left behind.
    pub fn save(&self, store: &dyn CredentialStore) -> Result<()> {
        let user_id = self.user_id.to_string();
        let entries = [
            (CredentialKey::AccessToken, self.access_token.as_str()),
            (CredentialKey::RefreshToken, self.refresh_token.as_str()),
            (CredentialKey::UserId, user_id.as_str()),
            (CredentialKey::Username, self.username.as_str()),
        ];

        for (key, value) in entries {
            if let Err(e) = store.set(key, value) {
                log::warn!("Failed to store {}, rolling back session write", key.as_str());
                let _ = clear_bundle(store);
                return Err(e);
            }
        }

        Ok(())
    }
}

/// Delete every entry. All deletions are attempted even when one fails; the
/// error lists the keys that could not be removed.
pub fn clear_bundle(store: &dyn CredentialStore) -> Result<()> {
    let failed_keys: Vec<&'static str> = CredentialKey::ALL
        .iter()
        .filter_map(|key| match store.delete(*key) {
            Ok(()) => None,
            Err(e) => {
                log::warn!("Failed to delete {}: {}", key.as_str(), e);
                Some(key.as_str())
            }
        })
        .collect();

    if failed_keys.is_empty() {
        Ok(())
    } else {
        Err(StorageError::ClearFailed { failed_keys })
    }
}

/// In-process store, used by tests and embedders that keep their own storage
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<HashMap<CredentialKey, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bundle(bundle: &CredentialBundle) -> Result<Self> {
        let store = Self::new();
        bundle.save(&store)?;
        Ok(store)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CredentialKey, String>> {
        // Entries are plain strings, so a panic elsewhere cannot leave them
        // in a torn state.
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>> {
        Ok(self.lock().get(&key).cloned())
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<()> {
        self.lock().insert(key, value.to_string());
        Ok(())
    }

    fn delete(&self, key: CredentialKey) -> Result<()> {
        self.lock().remove(&key);
        Ok(())
    }
}

/// OS keychain store (Keychain, Credential Manager, kernel keyutils)
#[derive(Debug, Clone)]
pub struct KeyringCredentialStore {
    service: String,
}

impl KeyringCredentialStore {
    pub fn new() -> Self {
        Self::with_service(KEYRING_SERVICE)
    }

    pub fn with_service(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self, key: CredentialKey) -> Result<Entry> {
        Entry::new(&self.service, key.as_str())
            .map_err(|e| StorageError::KeyringError(e.to_string()))
    }
}

impl Default for KeyringCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(v) => Ok(Some(v)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(StorageError::KeyringError(e.to_string())),
        }
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<()> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| StorageError::KeyringError(e.to_string()))
    }

    fn delete(&self, key: CredentialKey) -> Result<()> {
        match self.entry(key)?.delete_credential() {
            Ok(_) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(StorageError::KeyringError(e.to_string())),
        }
    }
}

/// JSON file store for machines without a usable keychain.
///
/// The whole file is rewritten on every change; on Unix it is created with
/// mode 0600.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| StorageError::FileIo {
            path: self.path.to_string_lossy().to_string(),
            source,
        })?;

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| StorageError::CredentialFileCorrupt {
            message: e.to_string(),
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let content =
            serde_json::to_string_pretty(entries).map_err(|e| StorageError::CredentialFileCorrupt {
                message: e.to_string(),
            })?;

        let io_error = |source: std::io::Error| StorageError::FileIo {
            path: self.path.to_string_lossy().to_string(),
            source,
        };

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        // Owner-only from the first byte written
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(io_error)?;

        // `mode` only applies on creation; tighten files left by older versions
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(io_error)?;
        }

        file.write_all(content.as_bytes()).map_err(io_error)?;
        file.sync_all().map_err(io_error)
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>> {
        let _guard = self.guard();
        Ok(self.read_entries()?.remove(key.as_str()))
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<()> {
        let _guard = self.guard();
        let mut entries = self.read_entries()?;
        entries.insert(key.as_str().to_string(), value.to_string());
        self.write_entries(&entries)
    }

    fn delete(&self, key: CredentialKey) -> Result<()> {
        let _guard = self.guard();
        let mut entries = self.read_entries()?;
        if entries.remove(key.as_str()).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}

/// Where the session lives, as selected in the config file
pub fn open_store(backend: CredentialBackend, credentials_file: PathBuf) -> Arc<dyn CredentialStore> {
    match backend {
        CredentialBackend::Keyring => Arc::new(KeyringCredentialStore::new()),
        CredentialBackend::File => Arc::new(FileCredentialStore::new(credentials_file)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn alice() -> CredentialBundle {
        CredentialBundle {
            access_token: "access-1".to_string(),
            refresh_token: "refresh-1".to_string(),
            user_id: 7,
            username: "alice".to_string(),
        }
    }

    #[test]
    fn test_empty_store_is_logged_out() {
        let store = MemoryCredentialStore::new();
        assert_eq!(CredentialBundle::load(&store).unwrap(), None);
    }

    #[test]
    fn test_bundle_save_load() {
        let store = MemoryCredentialStore::new();
        alice().save(&store).expect("save failed");

        let loaded = CredentialBundle::load(&store).expect("load failed");
        assert_eq!(loaded, Some(alice()));
        assert_eq!(
            store.get(CredentialKey::UserId).unwrap(),
            Some("7".to_string())
        );
    }

    #[test]
    fn test_access_token_without_refresh_token_is_rejected() {
        let store = MemoryCredentialStore::new();
        store.set(CredentialKey::AccessToken, "orphan").unwrap();

        let result = CredentialBundle::load(&store);
        assert!(matches!(
            result,
            Err(StorageError::PartialBundle {
                present: "access_token",
                missing: "refresh_token"
            })
        ));
    }

    #[test]
    fn test_non_numeric_user_id_is_rejected() {
        let store = MemoryCredentialStore::with_bundle(&alice()).unwrap();
        store.set(CredentialKey::UserId, "seven").unwrap();

        assert!(matches!(
            CredentialBundle::load(&store),
            Err(StorageError::InvalidUserId { .. })
        ));
    }

    #[test]
    fn test_clear_bundle_removes_every_key() {
        let store = MemoryCredentialStore::with_bundle(&alice()).unwrap();
        clear_bundle(&store).expect("clear failed");

        assert!(store.is_empty());
        for key in CredentialKey::ALL {
            assert_eq!(store.get(key).unwrap(), None);
        }
    }

    struct ReadOnlyStore {
        inner: MemoryCredentialStore,
        fail_on: CredentialKey,
    }

    impl CredentialStore for ReadOnlyStore {
        fn get(&self, key: CredentialKey) -> Result<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: CredentialKey, value: &str) -> Result<()> {
            if key == self.fail_on {
                return Err(StorageError::KeyringError("denied".to_string()));
            }
            self.inner.set(key, value)
        }

        fn delete(&self, key: CredentialKey) -> Result<()> {
            self.inner.delete(key)
        }
    }

    #[test]
    fn test_failed_save_leaves_no_partial_bundle() {
        let store = ReadOnlyStore {
            inner: MemoryCredentialStore::new(),
            fail_on: CredentialKey::UserId,
        };

        assert!(alice().save(&store).is_err());
        assert!(store.inner.is_empty());
        assert_eq!(CredentialBundle::load(&store).unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("nested").join("credentials.json");
        let store = FileCredentialStore::new(path.clone());

        assert_eq!(store.get(CredentialKey::AccessToken).unwrap(), None);

        alice().save(&store).expect("save failed");
        assert!(path.exists());

        let reopened = FileCredentialStore::new(path.clone());
        assert_eq!(CredentialBundle::load(&reopened).unwrap(), Some(alice()));

        clear_bundle(&reopened).expect("clear failed");
        assert_eq!(CredentialBundle::load(&reopened).unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("credentials.json");
        let store = FileCredentialStore::new(path.clone());
        store.set(CredentialKey::AccessToken, "secret").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("credentials.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileCredentialStore::new(path.clone());
        store.set(CredentialKey::RefreshToken, "secret").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(
            store.get(CredentialKey::RefreshToken).unwrap().as_deref(),
            Some("secret")
        );
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("credentials.json");
        fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(path);
        assert!(matches!(
            store.get(CredentialKey::AccessToken),
            Err(StorageError::CredentialFileCorrupt { .. })
        ));
    }

    #[test]
    fn test_key_names_match_persisted_layout() {
        let names: Vec<&str> = CredentialKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["access_token", "refresh_token", "user_id", "user_username"]
        );
    }
}
