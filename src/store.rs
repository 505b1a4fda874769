//! Mutex-guarded JSON file store.
//!
//! One [`JsonFile`] owns one on-disk JSON document. Every operation — reads
//! included — goes through a single exclusive lock, so read-modify-write
//! cycles never interleave and a transaction always observes the most
//! recently committed state.

use crate::error::{Error, Result};
use crate::persist;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// A whole-document JSON file store.
///
/// Generic over the document type `T`. Use [`open`](Self::open) for a quick
/// start or [`builder`](Self::builder) to configure an initial document and
/// pretty-printing.
///
/// Locking is whole-file: the persisted format is a flat document with no
/// internal indexing, so finer-grained concurrency would need a real
/// embedded database. Writers queue on the lock in tokio's acquisition
/// order; do not rely on strict FIFO fairness.
pub struct JsonFile<T> {
    path: PathBuf,
    initial: Option<T>,
    pretty: bool,
    lock: Mutex<()>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    /// Open a store at `path` with no initial document and compact JSON.
    /// Reading a missing file will fail with
    /// [`StorageUnavailable`](Error::StorageUnavailable).
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self::builder(path).build()
    }

    /// Start configuring a new store. Call [`.build()`](JsonFileBuilder::build)
    /// when ready.
    pub fn builder(path: impl AsRef<Path>) -> JsonFileBuilder<T> {
        JsonFileBuilder::new(path)
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the current document.
    ///
    /// Takes the same lock as [`write`](Self::write) and
    /// [`transaction`](Self::transaction), so a reader can never observe the
    /// file mid-bootstrap or mid-rewrite. If the file is missing and an
    /// initial document was configured, the file is created with that
    /// document before returning it.
    pub async fn read(&self) -> Result<T> {
        let _guard = self.lock.lock().await;
        self.load_or_bootstrap().await
    }

    /// Overwrite the document on disk with `doc`.
    pub async fn write(&self, doc: &T) -> Result<()> {
        let _guard = self.lock.lock().await;
        persist::store(&self.path, doc, self.pretty).await
    }

    /// Exclusive read-modify-write cycle over the whole document.
    ///
    /// Acquires the lock, loads the latest committed document, applies `f`,
    /// persists the result, and returns whatever `f` produced. If `f` fails,
    /// nothing is written and the error propagates. The lock is guard-scoped
    /// and released on every exit path.
    pub async fn transaction<R, F>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut T) -> Result<R>,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.load_or_bootstrap().await?;
        let out = f(&mut doc)?;
        persist::store(&self.path, &doc, self.pretty).await?;
        Ok(out)
    }

    // Must be called under the lock.
    async fn load_or_bootstrap(&self) -> Result<T> {
        match persist::load(&self.path).await? {
            Some(doc) => Ok(doc),
            None => match &self.initial {
                Some(init) => {
                    persist::store(&self.path, init, self.pretty).await?;
                    Ok(init.clone())
                }
                None => Err(Error::StorageUnavailable(format!(
                    "store file not found: {} (configure an initial document to create it automatically)",
                    self.path.display()
                ))),
            },
        }
    }
}

impl<T> std::fmt::Debug for JsonFile<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFile")
            .field("path", &self.path)
            .field("pretty", &self.pretty)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and creates a [`JsonFile`] store.
///
/// ```rust,no_run
/// use user_json_api::store::JsonFile;
///
/// let db = JsonFile::<Vec<String>>::builder("db.json")
///     .initial_document(Vec::new())
///     .pretty(true)
///     .build();
/// ```
pub struct JsonFileBuilder<T> {
    path: PathBuf,
    initial: Option<T>,
    pretty: bool,
}

impl<T> JsonFileBuilder<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            initial: None,
            pretty: false,
        }
    }

    /// Document to seed the file with when it does not exist yet.
    pub fn initial_document(mut self, doc: T) -> Self {
        self.initial = Some(doc);
        self
    }

    /// Write human-readable JSON with indentation (default: compact).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Create the store. The file itself is only touched on first access.
    pub fn build(self) -> JsonFile<T> {
        JsonFile {
            path: self.path,
            initial: self.initial,
            pretty: self.pretty,
            lock: Mutex::new(()),
        }
    }
}

impl<T> std::fmt::Debug for JsonFileBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileBuilder")
            .field("path", &self.path)
            .field("pretty", &self.pretty)
            .finish_non_exhaustive()
    }
}
