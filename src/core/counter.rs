use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{self, Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex};

use chrono::{Local, NaiveDate};
use tempfile::NamedTempFile;

use super::error::BillingError;
use super::numbering::{InvoiceNumber, NumberingScheme};

/// What the counter file currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterState {
    /// No counter file yet.
    Missing,
    /// File exists but does not hold a non-negative integer.
    Corrupt,
    /// Last issued value.
    Issued(u64),
}

/// A single decimal integer persisted as the entire content of one file.
#[derive(Debug, Clone)]
pub struct CounterStore {
    path: PathBuf,
}

impl CounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and classify the stored value.
    pub fn load(&self) -> Result<CounterState, BillingError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(parse_counter(&content)
                .map(CounterState::Issued)
                .unwrap_or(CounterState::Corrupt)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(CounterState::Missing),
            // Non-UTF-8 bytes are corruption, not an I/O failure.
            Err(e) if e.kind() == ErrorKind::InvalidData => Ok(CounterState::Corrupt),
            Err(e) => Err(BillingError::storage(&self.path, e)),
        }
    }

    /// Replace the stored value.
    ///
    /// The new content goes to a temporary file in the same directory which
    /// is then renamed over the counter file, so readers see either the old
    /// value or the new one and never a partial write.
    pub fn store(&self, value: u64) -> Result<(), BillingError> {
        let dir = self.ensure_parent()?;
        let mut tmp =
            NamedTempFile::new_in(&dir).map_err(|e| BillingError::storage(&self.path, e))?;
        tmp.write_all(value.to_string().as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| BillingError::storage(&self.path, e))?;
        tmp.persist(&self.path)
            .map_err(|e| BillingError::storage(&self.path, e.error))?;
        Ok(())
    }

    /// Create the containing directory if absent and return it.
    fn ensure_parent(&self) -> Result<PathBuf, BillingError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| BillingError::storage(&self.path, e))?;
        Ok(dir)
    }
}

/// Parse counter file content. Surrounding whitespace is tolerated;
/// signs, fractions and anything else are not.
pub fn parse_counter(content: &str) -> Option<u64> {
    let trimmed = content.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// One lock per counter file, shared by every allocator in the process.
static COUNTER_LOCKS: LazyLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> =
    LazyLock::new(Default::default);

/// The process-wide lock guarding the counter file at `path`, keyed by its
/// absolute form so relative and absolute spellings agree.
fn counter_lock(path: &Path) -> Arc<Mutex<()>> {
    let key = path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut locks = COUNTER_LOCKS.lock().unwrap_or_else(|e| e.into_inner());
    Arc::clone(locks.entry(key).or_default())
}

/// Issues invoice numbers backed by a [`CounterStore`].
///
/// The read-modify-write of the counter runs under a mutex keyed by the
/// counter path, so no two allocations in the process observe the same next
/// value, even from separate allocators over the same file.
#[derive(Debug)]
pub struct InvoiceAllocator {
    store: CounterStore,
    scheme: NumberingScheme,
    lock: Arc<Mutex<()>>,
}

impl InvoiceAllocator {
    pub fn new(store: CounterStore, scheme: NumberingScheme) -> Self {
        let lock = counter_lock(store.path());
        Self {
            store,
            scheme,
            lock,
        }
    }

    pub fn store(&self) -> &CounterStore {
        &self.store
    }

    pub fn scheme(&self) -> &NumberingScheme {
        &self.scheme
    }

    /// Allocate the next invoice number, dated today.
    pub fn allocate_next(&self) -> Result<InvoiceNumber, BillingError> {
        self.allocate_on(Local::now().date_naive())
    }

    /// Allocate the next invoice number as issued on `date`.
    ///
    /// A missing store is created holding `1`. A corrupt store is reset to
    /// `1` rather than reported. Once this returns `Ok` the number is
    /// permanently consumed, whether or not a receipt is ever rendered.
    pub fn allocate_on(&self, date: NaiveDate) -> Result<InvoiceNumber, BillingError> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());

        let next = match self.store.load()? {
            CounterState::Missing => {
                tracing::debug!(path = %self.store.path().display(), "initializing counter store");
                1
            }
            CounterState::Corrupt => {
                tracing::warn!(
                    path = %self.store.path().display(),
                    "counter store is corrupt, resetting to 1"
                );
                1
            }
            CounterState::Issued(current) => current.checked_add(1).ok_or_else(|| {
                BillingError::Numbering(format!("counter exhausted at {current}"))
            })?,
        };

        self.store.store(next)?;
        let number = self.scheme.format(next, date);
        tracing::info!(invoice_number = %number, "allocated invoice number");
        Ok(number)
    }

    /// The number the next allocation on `date` would return. Nothing is written.
    pub fn peek_on(&self, date: NaiveDate) -> Result<InvoiceNumber, BillingError> {
        let next = match self.store.load()? {
            CounterState::Issued(current) => current.checked_add(1).ok_or_else(|| {
                BillingError::Numbering(format!("counter exhausted at {current}"))
            })?,
            CounterState::Missing | CounterState::Corrupt => 1,
        };
        Ok(self.scheme.format(next, date))
    }

    /// Like [`peek_on`](Self::peek_on), dated today.
    pub fn peek(&self) -> Result<InvoiceNumber, BillingError> {
        self.peek_on(Local::now().date_naive())
    }

    /// The last issued counter value, if the store holds one.
    pub fn current(&self) -> Result<Option<u64>, BillingError> {
        Ok(match self.store.load()? {
            CounterState::Issued(v) => Some(v),
            CounterState::Missing | CounterState::Corrupt => None,
        })
    }
}
