use async_trait::async_trait;
use contact_directory::error::{DirectoryError, DirectoryResult};
use contact_directory::filter::ContactFilter;
use contact_directory::models::Contact;
use contact_directory::repositories::ContactRepository;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Provides an in-memory implementation of ContactRepository that can be
/// easily configured with test data, tracks method calls for verification,
/// and can be switched into a mode where every call fails with a storage error.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failing: Arc<AtomicBool>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Add a contact to the mock repository, keeping insertion order.
    pub fn add_contact(&self, contact: Contact) {
        let mut contacts = self.contacts.lock().unwrap();
        contacts.push(contact);
    }

    /// Add multiple contacts to the mock repository.
    pub fn add_contacts(&self, contacts_list: Vec<Contact>) {
        let mut contacts = self.contacts.lock().unwrap();
        contacts.extend(contacts_list);
    }

    /// Make every subsequent call fail with a storage error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        let mut counts = self.call_counts.lock().unwrap();
        counts.clear();
    }

    /// Snapshot of the stored contacts.
    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    fn track_call(&self, method: &str) -> DirectoryResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if self.failing.load(Ordering::SeqCst) {
            return Err(DirectoryError::Storage(format!("{} failed", method)));
        }
        Ok(())
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn find_by_id(&self, id: i64) -> DirectoryResult<Option<Contact>> {
        self.track_call("find_by_id")?;

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn query(&self, filter: &ContactFilter) -> DirectoryResult<Vec<Contact>> {
        self.track_call("query")?;

        let contacts = self.contacts.lock().unwrap();
        Ok(filter.apply(contacts.iter()))
    }

    async fn exists(&self, id: i64) -> DirectoryResult<bool> {
        self.track_call("exists")?;

        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.iter().any(|c| c.id == id))
    }

    async fn add(&self, contact: &Contact) -> DirectoryResult<Contact> {
        self.track_call("add")?;

        let mut contacts = self.contacts.lock().unwrap();
        let mut stored = contact.clone();
        if stored.id == 0 {
            let max = contacts.iter().map(|c| c.id).max().unwrap_or(0).max(0);
            stored.id = max.checked_add(1).ok_or_else(|| {
                DirectoryError::Conflict(format!("No contact ID available after {}", max))
            })?;
        }
        contacts.push(stored.clone());
        Ok(stored)
    }

    async fn replace(&self, contact: &Contact) -> DirectoryResult<()> {
        self.track_call("replace")?;

        let mut contacts = self.contacts.lock().unwrap();
        match contacts.iter_mut().find(|c| c.id == contact.id) {
            Some(existing) => {
                *existing = contact.clone();
                Ok(())
            }
            None => Err(DirectoryError::NotFound(format!(
                "Contact {} not found",
                contact.id
            ))),
        }
    }

    async fn remove(&self, id: i64) -> DirectoryResult<Contact> {
        self.track_call("remove")?;

        let mut contacts = self.contacts.lock().unwrap();
        match contacts.iter().position(|c| c.id == id) {
            Some(index) => Ok(contacts.remove(index)),
            None => Err(DirectoryError::NotFound(format!("Contact {} not found", id))),
        }
    }
}
