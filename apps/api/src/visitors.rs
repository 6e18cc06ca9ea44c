//! File-backed visitor counter.
//!
//! The file holds one integer. Storage failures never fail the request: they
//! are returned next to the count so the caller decides what to do with them.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error)]
pub enum VisitorError {
    #[error("failed to read visitor count from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("visitor count file {path} holds '{content}', not a count")]
    Parse { path: PathBuf, content: String },

    #[error("failed to write visitor count to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of one visit: the new count plus any storage problems met on the way.
#[derive(Debug)]
pub struct Visit {
    pub count: u64,
    pub errors: Vec<VisitorError>,
}

pub struct VisitorCounter {
    path: PathBuf,
    // Serializes read-increment-write within this process.
    lock: Mutex<()>,
}

impl VisitorCounter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current count. A missing or blank file counts as zero.
    pub async fn read(&self) -> Result<u64, VisitorError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(VisitorError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let content = content.trim();
        if content.is_empty() {
            return Ok(0);
        }
        content.parse().map_err(|_| VisitorError::Parse {
            path: self.path.clone(),
            content: content.to_string(),
        })
    }

    pub async fn write(&self, count: u64) -> Result<(), VisitorError> {
        tokio::fs::write(&self.path, count.to_string())
            .await
            .map_err(|source| VisitorError::Write {
                path: self.path.clone(),
                source,
            })
    }

    /// Increments the stored count. An unreadable file restarts from zero; a
    /// failed write still reports the incremented count.
    pub async fn record_visit(&self) -> Visit {
        let _guard = self.lock.lock().await;
        let mut errors = Vec::new();

        let previous = self.read().await.unwrap_or_else(|e| {
            errors.push(e);
            0
        });
        let count = previous.saturating_add(1);

        if let Err(e) = self.write(count).await {
            errors.push(e);
        }

        Visit { count, errors }
    }
}
