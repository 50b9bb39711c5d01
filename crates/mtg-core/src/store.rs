use crate::appointment::Appointment;
use crate::config::CorruptBlobPolicy;
use crate::error::{MtgError, Result};
use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

const EMPTY_BLOB: &str = "[]";

// ---------------------------------------------------------------------------
// Persistence adapter
// ---------------------------------------------------------------------------

/// Whole-document storage for the serialized appointment list.
pub trait Persistence {
    /// Human-readable location used in error messages.
    fn location(&self) -> String;

    /// `Ok(None)` when no blob has been written yet.
    fn read(&self) -> Result<Option<String>>;

    fn write(&self, data: &str) -> Result<()>;
}

/// A JSON file on disk, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct FileBlob {
    path: PathBuf,
}

impl FileBlob {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for FileBlob {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(MtgError::UnreadableBlob {
                location: self.location(),
                source,
            }),
        }
    }

    fn write(&self, data: &str) -> Result<()> {
        crate::io::atomic_write(&self.path, data.as_bytes()).map_err(|source| {
            MtgError::SaveFailed {
                location: self.location(),
                source,
            }
        })
    }
}

/// In-process blob, handy for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryBlob {
    data: RefCell<Option<String>>,
    reject_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryBlob {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(data: impl Into<String>) -> Self {
        let blob = Self::default();
        *blob.data.borrow_mut() = Some(data.into());
        blob
    }

    pub fn contents(&self) -> Option<String> {
        self.data.borrow().clone()
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Make subsequent writes fail with `SaveFailed`.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }
}

impl Persistence for MemoryBlob {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn read(&self) -> Result<Option<String>> {
        Ok(self.data.borrow().clone())
    }

    fn write(&self, data: &str) -> Result<()> {
        if self.reject_writes.get() {
            return Err(MtgError::SaveFailed {
                location: self.location(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        *self.data.borrow_mut() = Some(data.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Owns the ordered appointment list and the blob it came from.
#[derive(Debug)]
pub struct Store<P> {
    persistence: P,
    records: Vec<Appointment>,
}

impl<P: Persistence> Store<P> {
    /// An empty store that has not been read from `persistence`.
    pub fn empty(persistence: P) -> Self {
        Self {
            persistence,
            records: Vec::new(),
        }
    }

    /// Load the blob, applying `policy` when it cannot be read or parsed.
    pub fn open(persistence: P, policy: CorruptBlobPolicy) -> Result<Self> {
        let records = match Self::load(&persistence) {
            Ok(records) => records,
            Err(e) if policy == CorruptBlobPolicy::TreatAsEmpty && e.is_persistence() => {
                tracing::warn!(
                    location = %persistence.location(),
                    error = %e,
                    "ignoring unreadable appointment store, starting empty"
                );
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            persistence,
            records,
        })
    }

    /// Read and decode the blob. A missing blob is an empty list.
    pub fn load(persistence: &P) -> Result<Vec<Appointment>> {
        let Some(data) = persistence.read()? else {
            tracing::debug!(location = %persistence.location(), "no appointment store yet");
            return Ok(Vec::new());
        };
        let records: Vec<Appointment> =
            serde_json::from_str(&data).map_err(|source| MtgError::CorruptBlob {
                location: persistence.location(),
                source,
            })?;
        tracing::debug!(count = records.len(), "loaded appointments");
        Ok(records)
    }

    /// Create the blob with an empty list if it does not exist yet.
    pub fn init(persistence: &P) -> Result<bool> {
        if persistence.read()?.is_some() {
            return Ok(false);
        }
        persistence.write(EMPTY_BLOB)?;
        Ok(true)
    }

    /// Serialize every record and overwrite the blob.
    pub fn save(&self) -> Result<()> {
        let data = serde_json::to_string_pretty(&self.records)?;
        self.persistence.write(&data)?;
        tracing::debug!(count = self.records.len(), "saved appointments");
        Ok(())
    }

    pub fn append(&mut self, record: Appointment) {
        self.records.push(record);
    }

    /// Drop every record matching `predicate`, keeping survivors in order.
    /// Returns the removed records in their original order.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> Vec<Appointment>
    where
        F: FnMut(&Appointment) -> bool,
    {
        let (removed, survivors): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.records).into_iter().partition(|r| predicate(r));
        self.records = survivors;
        removed
    }

    pub fn records(&self) -> &[Appointment] {
        &self.records
    }

    pub(crate) fn records_mut(&mut self) -> &mut [Appointment] {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
