use crate::error::DirectoryResult;
use crate::filter::ContactFilter;
use crate::models::Contact;
use async_trait::async_trait;

/// Record source for contacts.
///
/// Provides abstraction over contact storage and retrieval, enabling
/// different implementations (in-memory, file-backed, mock). Implementations
/// keep a stable natural order and never reorder query results.
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Retrieve a single contact by ID, or `None` when absent.
    async fn find_by_id(&self, id: i64) -> DirectoryResult<Option<Contact>>;

    /// Apply a compiled filter (predicates, then skip/take) in source order.
    async fn query(&self, filter: &ContactFilter) -> DirectoryResult<Vec<Contact>>;

    /// Whether a contact with this ID exists.
    async fn exists(&self, id: i64) -> DirectoryResult<bool>;

    /// Store a new contact, assigning an ID when `contact.id` is 0.
    async fn add(&self, contact: &Contact) -> DirectoryResult<Contact>;

    /// Replace the stored contact with the same ID.
    async fn replace(&self, contact: &Contact) -> DirectoryResult<()>;

    /// Delete a contact, returning the removed record.
    async fn remove(&self, id: i64) -> DirectoryResult<Contact>;
}
