//! Persistence
//!
//! Durable storage for ledger snapshots. The ledger saves through a
//! [`PersistenceProvider`] after every mutating operation; the in-memory
//! state stays authoritative, so a failed save never rolls a mutation back.
//! It is surfaced to the caller instead, as the signal that memory and
//! storage have diverged.

use std::{
    cell::{Cell, RefCell},
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::ledger::LedgerState;

/// Errors from loading or saving a ledger snapshot.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Failed to read or write the backing storage.
    #[error("failed to access ledger storage: {0}")]
    Io(#[from] io::Error),

    /// The stored document could not be parsed or encoded.
    #[error("failed to encode or decode ledger snapshot: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The provider refused the write (test double failure mode).
    #[error("persistence provider rejected the write")]
    Unavailable,
}

/// Durable storage contract for ledger snapshots.
///
/// `load` returns `None` when no snapshot exists yet; `save` replaces any
/// previous snapshot wholesale. Implementations are free to choose key,
/// format, and medium.
pub trait PersistenceProvider {
    /// Load the most recently saved snapshot, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the storage exists but cannot be
    /// read or decoded.
    fn load(&self) -> Result<Option<LedgerState>, PersistenceError>;

    /// Save a snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the snapshot cannot be encoded or
    /// written.
    fn save(&self, state: &LedgerState) -> Result<(), PersistenceError>;
}

/// File-backed provider storing one YAML document per ledger.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a provider storing the ledger at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceProvider for FileStore {
    fn load(&self) -> Result<Option<LedgerState>, PersistenceError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_norway::from_str(&contents)?))
    }

    fn save(&self, state: &LedgerState) -> Result<(), PersistenceError> {
        let doc = serde_norway::to_string(state)?;
        fs::write(&self.path, doc)?;

        Ok(())
    }
}

/// In-memory provider for tests and ephemeral sessions.
///
/// Single-threaded by design, like the ledger itself; interior mutability is
/// cell-based, not locked. `set_failing(true)` makes every subsequent save
/// return [`PersistenceError::Unavailable`] so divergence handling can be
/// exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: RefCell<Option<LedgerState>>,
    failing: Cell<bool>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle the failure mode for subsequent saves.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    /// The most recently saved snapshot, if any.
    #[must_use]
    pub fn saved(&self) -> Option<LedgerState> {
        self.slot.borrow().clone()
    }
}

impl PersistenceProvider for MemoryStore {
    fn load(&self) -> Result<Option<LedgerState>, PersistenceError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, state: &LedgerState) -> Result<(), PersistenceError> {
        if self.failing.get() {
            return Err(PersistenceError::Unavailable);
        }

        *self.slot.borrow_mut() = Some(state.clone());

        Ok(())
    }
}
