//! Contact service layer.
//!
//! Business logic for contact lookup, filtered search and validated writes.

use crate::error::{DirectoryError, DirectoryResult};
use crate::filter::{SearchCriteria, SearchScope};
use crate::models::Contact;
use crate::observability::{MetricsTracker, Timer};
use crate::repositories::ContactRepository;
use crate::validation::EmailValidator;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

const INVALID_EMAIL: &str = "Email address format is invalid";

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Get a contact by ID.
    async fn get_contact(&self, id: i64) -> DirectoryResult<Contact>;

    /// Contacts whose email and/or either phone contains the given text.
    async fn filter_by_email_phone(
        &self,
        email: Option<String>,
        phone: Option<String>,
        skip: Option<i64>,
        take: Option<i64>,
    ) -> DirectoryResult<Vec<Contact>>;

    /// Contacts whose city and/or state contains the given text.
    async fn filter_by_city_state(
        &self,
        city: Option<String>,
        state: Option<String>,
        skip: Option<i64>,
        take: Option<i64>,
    ) -> DirectoryResult<Vec<Contact>>;

    /// Create a contact. An ID of 0 lets the store assign one.
    async fn create_contact(&self, contact: Contact) -> DirectoryResult<Contact>;

    /// Replace contact `id` with `contact`.
    async fn update_contact(&self, id: i64, contact: Contact) -> DirectoryResult<()>;

    /// Delete a contact by ID.
    async fn delete_contact(&self, id: i64) -> DirectoryResult<()>;

    /// Raw profile image bytes for a contact.
    async fn contact_image(&self, id: i64) -> DirectoryResult<Vec<u8>>;

    /// Returns true if `email` is a well-formed address.
    async fn is_valid_email(&self, email: &str) -> bool;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repository: Arc<dyn ContactRepository>,
    validator: EmailValidator,
    metrics: MetricsTracker,
}

impl ContactServiceImpl {
    /// Create a new contact service.
    pub fn new(repository: Arc<dyn ContactRepository>, validator: EmailValidator) -> Self {
        let metrics = validator.metrics().clone();
        Self {
            repository,
            validator,
            metrics,
        }
    }

    pub fn metrics(&self) -> &MetricsTracker {
        &self.metrics
    }

    async fn search(
        &self,
        criteria: SearchCriteria,
        scope: SearchScope,
        label: &'static str,
    ) -> DirectoryResult<Vec<Contact>> {
        let timer = Timer::new(label);
        let filter = criteria.compile(scope);
        debug!(
            scope = label,
            clauses = filter.clauses().len(),
            skip = ?filter.pagination().skip,
            take = ?filter.pagination().take,
            "Compiled contact filter"
        );

        let contacts = self.repository.query(&filter).await?;
        self.metrics
            .track_contact_query(label, timer.finish(), contacts.len());
        Ok(contacts)
    }

    /// Reject the write when a supplied email fails validation.
    async fn ensure_valid_email(&self, operation: &str, contact: &Contact) -> DirectoryResult<()> {
        let Some(email) = contact.email.as_deref().filter(|_| contact.has_email()) else {
            return Ok(());
        };

        if self.validator.validate(email).await {
            Ok(())
        } else {
            self.metrics.track_rejected_write(operation, INVALID_EMAIL);
            Err(DirectoryError::InvalidRequest(INVALID_EMAIL.to_string()))
        }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn get_contact(&self, id: i64) -> DirectoryResult<Contact> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DirectoryError::NotFound(format!("Contact {} not found", id)))
    }

    async fn filter_by_email_phone(
        &self,
        email: Option<String>,
        phone: Option<String>,
        skip: Option<i64>,
        take: Option<i64>,
    ) -> DirectoryResult<Vec<Contact>> {
        let criteria = SearchCriteria::email_phone(email, phone, skip, take);
        self.search(criteria, SearchScope::EmailPhone, "email_phone")
            .await
    }

    async fn filter_by_city_state(
        &self,
        city: Option<String>,
        state: Option<String>,
        skip: Option<i64>,
        take: Option<i64>,
    ) -> DirectoryResult<Vec<Contact>> {
        let criteria = SearchCriteria::city_state(city, state, skip, take);
        self.search(criteria, SearchScope::CityState, "city_state")
            .await
    }

    async fn create_contact(&self, contact: Contact) -> DirectoryResult<Contact> {
        if contact.id != 0 && self.repository.exists(contact.id).await? {
            self.metrics.track_rejected_write("create", "duplicate id");
            return Err(DirectoryError::Conflict(
                "A contact with this ID already exists".to_string(),
            ));
        }

        self.ensure_valid_email("create", &contact).await?;
        self.repository.add(&contact).await
    }

    async fn update_contact(&self, id: i64, contact: Contact) -> DirectoryResult<()> {
        if id != contact.id {
            self.metrics.track_rejected_write("update", "id mismatch");
            return Err(DirectoryError::InvalidRequest(format!(
                "Contact ID {} does not match request ID {}",
                contact.id, id
            )));
        }

        self.ensure_valid_email("update", &contact).await?;
        self.repository.replace(&contact).await
    }

    async fn delete_contact(&self, id: i64) -> DirectoryResult<()> {
        self.repository.remove(id).await.map(|_| ())
    }

    async fn contact_image(&self, id: i64) -> DirectoryResult<Vec<u8>> {
        let contact = self.get_contact(id).await?;
        if !contact.has_image() {
            return Err(DirectoryError::NotFound(format!("Contact {} has no image", id)));
        }
        Ok(contact.profile_image_bytes.unwrap_or_default())
    }

    async fn is_valid_email(&self, email: &str) -> bool {
        self.validator.validate(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::seed::sample_contacts;
    use crate::repositories::InMemoryContactRepository;

    fn service() -> ContactServiceImpl {
        let repo = Arc::new(InMemoryContactRepository::with_contacts(sample_contacts()))
            as Arc<dyn ContactRepository>;
        ContactServiceImpl::new(repo, EmailValidator::default())
    }

    #[tokio::test]
    async fn test_get_contact() {
        let service = service();
        assert_eq!(service.get_contact(1).await.unwrap().display_name(), "David Rose");
        assert!(matches!(
            service.get_contact(99).await,
            Err(DirectoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_filter_by_email_phone() {
        let service = service();
        let result = service
            .filter_by_email_phone(Some("FRANK".to_string()), None, None, None)
            .await
            .unwrap();
        assert_eq!(result.iter().map(|c| c.id).collect::<Vec<_>>(), vec![4, 5]);
        assert_eq!(service.metrics().contact_queries_total(), 1);
        assert_eq!(service.metrics().contacts_returned_total(), 2);
    }

    #[tokio::test]
    async fn test_filter_by_city_state_ignores_blank_criteria() {
        let service = service();
        let result = service
            .filter_by_city_state(Some("  ".to_string()), Some("".to_string()), None, None)
            .await
            .unwrap();
        assert_eq!(result.len(), 5);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_email() {
        let service = service();
        let contact = Contact {
            email: Some("not-an-email".to_string()),
            ..Contact::new(0, "Roland", "Schitt")
        };
        match service.create_contact(contact).await {
            Err(DirectoryError::InvalidRequest(msg)) => assert_eq!(msg, INVALID_EMAIL),
            other => panic!("Expected InvalidRequest, got: {:?}", other),
        }
        assert_eq!(service.metrics().rejected_writes_total(), 1);
    }

    #[tokio::test]
    async fn test_create_allows_blank_email() {
        let service = service();
        let contact = Contact {
            email: Some("   ".to_string()),
            ..Contact::new(0, "Twyla", "Sands")
        };
        let created = service.create_contact(contact).await.unwrap();
        assert_eq!(created.id, 6);
    }

    #[tokio::test]
    async fn test_create_rejects_existing_id() {
        let service = service();
        let result = service.create_contact(Contact::new(3, "Lana", "Kane")).await;
        assert!(matches!(result, Err(DirectoryError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_requires_matching_id() {
        let service = service();
        let result = service.update_contact(1, Contact::new(2, "X", "Y")).await;
        assert!(matches!(result, Err(DirectoryError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let service = service();
        let mut contact = service.get_contact(2).await.unwrap();
        contact.city = Some("Eagleton".to_string());
        service.update_contact(2, contact).await.unwrap();
        assert_eq!(
            service.get_contact(2).await.unwrap().city.as_deref(),
            Some("Eagleton")
        );

        service.delete_contact(2).await.unwrap();
        assert!(matches!(
            service.delete_contact(2).await,
            Err(DirectoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_contact_image() {
        let service = service();
        assert!(matches!(
            service.contact_image(1).await,
            Err(DirectoryError::NotFound(_))
        ));

        let mut contact = service.get_contact(1).await.unwrap();
        contact.profile_image_bytes = Some(vec![1, 2, 3]);
        service.update_contact(1, contact).await.unwrap();
        assert_eq!(service.contact_image(1).await.unwrap(), vec![1, 2, 3]);
    }
}
