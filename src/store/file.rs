//! Simple file-backed [`ExpiringStore`] for lightweight deployments and bots.

// std
use std::{
	fs::{self, File},
	io::Write,
	path::{Path, PathBuf},
};
// self
use crate::{
	_prelude::*,
	grant::UsageCounter,
	key::StorageKey,
	store::{ExpiringStore, StoreError, StoreFuture},
};

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct PersistedEntry {
	value: UsageCounter,
	expires_at: OffsetDateTime,
}
impl PersistedEntry {
	fn expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}
}

/// Persists grant counters to a JSON file after each mutation.
///
/// Expiry instants persist with the counters, so TTLs survive restarts within the window. Lapsed
/// entries read as absent immediately and are swept from the snapshot on the next mutation.
#[derive(Clone, Debug)]
pub struct FileStore {
	path: PathBuf,
	inner: Arc<RwLock<HashMap<StorageKey, PersistedEntry>>>,
}
impl FileStore {
	/// Opens (or creates) a store at the provided path, eagerly loading existing data.
	pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
		let path = path.into();

		Self::ensure_parent_exists(&path)?;

		let snapshot = if path.exists() { Self::load_snapshot(&path)? } else { HashMap::new() };

		Ok(Self { path, inner: Arc::new(RwLock::new(snapshot)) })
	}

	fn load_snapshot(path: &Path) -> Result<HashMap<StorageKey, PersistedEntry>, StoreError> {
		if !path.exists() {
			return Ok(HashMap::new());
		}

		let metadata = path.metadata().map_err(|e| StoreError::Backend {
			message: format!("Failed to inspect {}: {e}", path.display()),
		})?;

		if metadata.len() == 0 {
			return Ok(HashMap::new());
		}

		let bytes = fs::read(path).map_err(|e| StoreError::Backend {
			message: format!("Failed to read {}: {e}", path.display()),
		})?;

		let entries: Vec<(StorageKey, PersistedEntry)> =
			serde_json::from_slice(&bytes).map_err(|e| StoreError::Serialization {
				message: format!("Failed to parse {}: {e}", path.display()),
			})?;

		Ok(entries.into_iter().collect())
	}

	fn ensure_parent_exists(path: &Path) -> Result<(), StoreError> {
		if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent).map_err(|e| StoreError::Backend {
				message: format!("Failed to create store directory {}: {e}", parent.display()),
			})?;
		}
		Ok(())
	}

	fn persist_locked(
		&self,
		contents: &HashMap<StorageKey, PersistedEntry>,
	) -> Result<(), StoreError> {
		Self::ensure_parent_exists(&self.path)?;

		let snapshot: Vec<_> = contents.iter().collect();
		let serialized =
			serde_json::to_vec_pretty(&snapshot).map_err(|e| StoreError::Serialization {
				message: format!("Failed to serialize store snapshot: {e}"),
			})?;
		let mut tmp_path = self.path.clone();

		tmp_path.set_extension("tmp");

		{
			let mut file = File::create(&tmp_path).map_err(|e| StoreError::Backend {
				message: format!("Failed to create {}: {e}", tmp_path.display()),
			})?;

			file.write_all(&serialized).map_err(|e| StoreError::Backend {
				message: format!("Failed to write {}: {e}", tmp_path.display()),
			})?;
			file.sync_all().map_err(|e| StoreError::Backend {
				message: format!("Failed to sync {}: {e}", tmp_path.display()),
			})?;
		}

		fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::Backend {
			message: format!("Failed to replace {}: {e}", self.path.display()),
		})
	}

	fn sweep_expired(contents: &mut HashMap<StorageKey, PersistedEntry>, now: OffsetDateTime) {
		contents.retain(|_, entry| !entry.expired_at(now));
	}
}
impl ExpiringStore for FileStore {
	fn set<'a>(
		&'a self,
		key: &'a StorageKey,
		value: UsageCounter,
		ttl: Duration,
	) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			let now = OffsetDateTime::now_utc();
			let mut guard = self.inner.write();

			Self::sweep_expired(&mut guard, now);
			guard.insert(key.to_owned(), PersistedEntry { value, expires_at: now + ttl });
			self.persist_locked(&guard)?;

			Ok(())
		})
	}

	fn get<'a>(&'a self, key: &'a StorageKey) -> StoreFuture<'a, Option<UsageCounter>> {
		Box::pin(async move {
			let now = OffsetDateTime::now_utc();

			Ok(self
				.inner
				.read()
				.get(key)
				.filter(|entry| !entry.expired_at(now))
				.map(|entry| entry.value))
		})
	}

	fn update<'a>(&'a self, key: &'a StorageKey, value: UsageCounter) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			let now = OffsetDateTime::now_utc();
			let mut guard = self.inner.write();

			Self::sweep_expired(&mut guard, now);

			if let Some(entry) = guard.get_mut(key) {
				entry.value = value;
				self.persist_locked(&guard)?;
			}

			Ok(())
		})
	}

	fn delete<'a>(&'a self, key: &'a StorageKey) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			let mut guard = self.inner.write();

			if guard.remove(key).is_some() {
				self.persist_locked(&guard)?;
			}

			Ok(())
		})
	}
}
