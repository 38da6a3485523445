use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::models::Note;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable access to the note collection. The collection is the unit of
/// persistence: `load` reads it entirely, `save` replaces it entirely.
///
/// Implementations hold no locks. Two concurrent read-modify-write cycles
/// can race and the later `save` wins; that is the accepted consistency
/// model for this single-user tool.
#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Note>, StoreError>;
    async fn save(&self, notes: &[Note]) -> Result<(), StoreError>;
}

/// File-backed store: one pretty-printed JSON array of notes.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Ensures the backing file exists, writing an empty collection when it
    /// is missing or blank. Called once at process startup.
    pub async fn init(&self) -> Result<(), StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) if !raw.trim().is_empty() => Ok(()),
            Ok(_) => {
                tracing::info!("Clearing blank notes file at {}", self.path.display());
                self.save(&[]).await
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("Initializing notes file at {}", self.path.display());
                self.save(&[]).await
            }
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl NoteStore for FileStore {
    /// Reads the full collection. A missing or blank file yields an empty
    /// collection; so does an unreadable or malformed one, after logging.
    /// The file is never modified at read time, so a corrupt document stays
    /// on disk until the next successful mutation.
    async fn load(&self) -> Result<Vec<Note>, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    "Notes file not found at {}, treating as empty",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::error!("Failed to read notes file: {e}");
                return Ok(Vec::new());
            }
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str(&raw) {
            Ok(notes) => Ok(notes),
            Err(e) => {
                tracing::error!("Failed to parse notes file: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the whole document. Writes to a sibling temp file and
    /// renames it over the target so a full, valid document is always on
    /// disk.
    async fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(notes)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.temp_path();
        fs::write(&temp_path, json).await?;
        fs::rename(&temp_path, &self.path).await?;

        Ok(())
    }
}

/// In-memory store used by service tests; shows that service logic does not
/// depend on the file backend.
#[cfg(test)]
pub struct MemoryStore {
    notes: tokio::sync::Mutex<Vec<Note>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self {
            notes: tokio::sync::Mutex::new(Vec::new()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl NoteStore for MemoryStore {
    async fn load(&self) -> Result<Vec<Note>, StoreError> {
        Ok(self.notes.lock().await.clone())
    }

    async fn save(&self, notes: &[Note]) -> Result<(), StoreError> {
        *self.notes.lock().await = notes.to_vec();
        Ok(())
    }
}
