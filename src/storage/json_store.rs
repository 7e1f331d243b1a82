use crate::error::{AppError, Result};
use crate::models::Ticket;
use crate::storage::TicketStore;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::{Mutex, MutexGuard};

/// Flat-file JSON ticket store
///
/// The whole collection lives in a single JSON array on disk. The storage
/// location is injected at construction; there is no ambient global path.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire the single-writer lock
    ///
    /// Mutations hold this across their whole load-mutate-save cycle so
    /// concurrent writers cannot interleave stale read-modify-write
    /// sequences. Read-only queries do not lock.
    pub async fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}

#[async_trait]
impl TicketStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<Ticket>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        // Anything other than a JSON array of tickets is a storage error,
        // not a request error.
        serde_json::from_slice(&bytes).map_err(|e| {
            AppError::Storage(format!(
                "malformed ticket data in {}: {}",
                self.path.display(),
                e
            ))
        })
    }

    async fn save(&self, tickets: &[Ticket]) -> Result<()> {
        let json = serde_json::to_vec_pretty(tickets)?;

        // Write to a sibling temp file and rename over the target, so the
        // persisted store is never observable in a partially written state.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await.map_err(|e| {
            AppError::Storage(format!("failed to write {}: {}", tmp.display(), e))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            AppError::Storage(format!(
                "failed to replace {}: {}",
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!(
            count = tickets.len(),
            path = %self.path.display(),
            "Ticket collection saved"
        );
        Ok(())
    }
}
