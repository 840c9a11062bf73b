use crate::{Contact, ContactForm, ContactId, Error};

/// Remote record store.
///
/// Every method is one independent round trip. Uses `async_trait` with a
/// `?Send` bound; the workflow runs on a single thread.
#[async_trait::async_trait(?Send)]
pub trait RemoteStore {
    /// Fetch the whole collection.
    async fn list(&self) -> Result<Vec<Contact>, Error>;

    /// Fetch one record by ID.
    async fn get(&self, id: &ContactId) -> Result<Contact, Error>;

    /// Insert a new record and return it with its assigned ID.
    async fn create(&self, form: &ContactForm) -> Result<Contact, Error>;

    /// Replace an existing record.
    async fn update(&self, id: &ContactId, form: &ContactForm) -> Result<Contact, Error>;

    /// Remove a record.
    async fn delete(&self, id: &ContactId) -> Result<(), Error>;
}
