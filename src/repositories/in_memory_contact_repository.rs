use crate::config::Config;
use crate::error::{DirectoryError, DirectoryResult};
use crate::filter::ContactFilter;
use crate::models::Contact;
use crate::repositories::seed::sample_contacts;
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Insertion-ordered contact store held in memory.
///
/// When a snapshot path is set, every mutation is written to it as JSON
/// before being committed; a failed write leaves the store unchanged and
/// surfaces as [`DirectoryError::Storage`].
pub struct InMemoryContactRepository {
    contacts: RwLock<Vec<Contact>>,
    snapshot: Option<PathBuf>,
}

impl InMemoryContactRepository {
    /// Create an empty, memory-only repository.
    pub fn new() -> Self {
        Self::with_contacts(Vec::new())
    }

    /// Create a memory-only repository holding `contacts` in the given order.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            contacts: RwLock::new(contacts),
            snapshot: None,
        }
    }

    /// Open a repository backed by a JSON snapshot file.
    ///
    /// A missing file starts an empty directory; the file is created on the
    /// first write.
    pub async fn open(path: impl Into<PathBuf>) -> DirectoryResult<Self> {
        let path = path.into();
        let contacts = load_snapshot(path.clone()).await?;
        info!(
            path = %path.display(),
            count = contacts.len(),
            "Loaded contact snapshot"
        );
        Ok(Self {
            contacts: RwLock::new(contacts),
            snapshot: Some(path),
        })
    }

    /// Build the repository described by the configuration, seeding sample
    /// contacts into an empty store when enabled.
    pub async fn from_config(config: &Config) -> DirectoryResult<Self> {
        let repo = match &config.data_file {
            Some(path) => Self::open(path.clone()).await?,
            None => Self::new(),
        };

        if config.seed_sample_contacts && repo.len().await == 0 {
            repo.seed(sample_contacts()).await?;
        }

        Ok(repo)
    }

    /// Replace the contents of an empty store with `contacts`.
    async fn seed(&self, contacts: Vec<Contact>) -> DirectoryResult<()> {
        let mut current = self.contacts.write().await;
        self.persist(&contacts).await?;
        info!(count = contacts.len(), "Seeded sample contacts");
        *current = contacts;
        Ok(())
    }

    /// Number of stored contacts.
    pub async fn len(&self) -> usize {
        self.contacts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Write `contacts` to the snapshot file, if any.
    async fn persist(&self, contacts: &[Contact]) -> DirectoryResult<()> {
        let Some(path) = self.snapshot.clone() else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(contacts)?;
        tokio::task::spawn_blocking(move || write_atomically(&path, &bytes))
            .await
            .map_err(|e| DirectoryError::Storage(format!("Task join error: {}", e)))?
    }
}

impl Default for InMemoryContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

async fn load_snapshot(path: PathBuf) -> DirectoryResult<Vec<Contact>> {
    let bytes = tokio::task::spawn_blocking(move || match std::fs::read(&path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    })
    .await
    .map_err(|e| DirectoryError::Storage(format!("Task join error: {}", e)))??;

    match bytes {
        Some(bytes) if !bytes.is_empty() => Ok(serde_json::from_slice(&bytes)?),
        _ => Ok(Vec::new()),
    }
}

/// One past the highest stored ID, starting at 1.
fn next_id(contacts: &[Contact]) -> DirectoryResult<i64> {
    let max = contacts.iter().map(|c| c.id).max().unwrap_or(0).max(0);
    max.checked_add(1).ok_or_else(|| {
        DirectoryError::Conflict(format!("No contact ID available after {}", max))
    })
}

/// Write to a sibling temp file, then rename over the target.
fn write_atomically(path: &Path, bytes: &[u8]) -> DirectoryResult<()> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, bytes)
        .and_then(|_| std::fs::rename(&tmp, path))
        .map_err(|e| {
            DirectoryError::Storage(format!(
                "Failed to write snapshot {}: {}",
                path.display(),
                e
            ))
        })
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn find_by_id(&self, id: i64) -> DirectoryResult<Option<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn query(&self, filter: &ContactFilter) -> DirectoryResult<Vec<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(filter.apply(contacts.iter()))
    }

    async fn exists(&self, id: i64) -> DirectoryResult<bool> {
        let contacts = self.contacts.read().await;
        Ok(contacts.iter().any(|c| c.id == id))
    }

    async fn add(&self, contact: &Contact) -> DirectoryResult<Contact> {
        let mut contacts = self.contacts.write().await;

        let mut stored = contact.clone();
        if stored.id == 0 {
            stored.id = next_id(&contacts)?;
        } else if contacts.iter().any(|c| c.id == stored.id) {
            return Err(DirectoryError::Conflict(format!(
                "A contact with ID {} already exists",
                stored.id
            )));
        }

        let mut next = contacts.clone();
        next.push(stored.clone());
        self.persist(&next).await?;
        *contacts = next;

        debug!(id = stored.id, "Contact added");
        Ok(stored)
    }

    async fn replace(&self, contact: &Contact) -> DirectoryResult<()> {
        let mut contacts = self.contacts.write().await;

        let Some(index) = contacts.iter().position(|c| c.id == contact.id) else {
            return Err(DirectoryError::NotFound(format!(
                "Contact {} not found",
                contact.id
            )));
        };

        let mut next = contacts.clone();
        next[index] = contact.clone();
        self.persist(&next).await?;
        *contacts = next;

        debug!(id = contact.id, "Contact replaced");
        Ok(())
    }

    async fn remove(&self, id: i64) -> DirectoryResult<Contact> {
        let mut contacts = self.contacts.write().await;

        let Some(index) = contacts.iter().position(|c| c.id == id) else {
            return Err(DirectoryError::NotFound(format!("Contact {} not found", id)));
        };

        let mut next = contacts.clone();
        let removed = next.remove(index);
        self.persist(&next).await?;
        *contacts = next;

        debug!(id = id, "Contact removed");
        Ok(removed)
    }
}
