//! The phonebook workflow: form state, the fetched list, and the
//! confirmation-gated mutations.

use tracing::{debug, error};

use crate::{
    filter_contacts, validate, wire_to_input_date, Contact, ContactForm, ContactId, Error, Field,
    RemoteStore, ValidationErrors,
};

/// Transient success message shown after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Submitted,
    Updated,
    Deleted,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::Submitted => "Form submitted successfully!",
            Notice::Updated => "Form updated successfully!",
            Notice::Deleted => "Item deleted successfully!",
        }
    }
}

/// A mutation waiting for a yes/no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    Update { id: ContactId },
    Delete { id: ContactId },
}

impl Pending {
    pub fn title(&self) -> &'static str {
        match self {
            Pending::Update { .. } => "Confirm to update",
            Pending::Delete { .. } => "Confirm to delete",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Pending::Update { .. } => "Are you sure you want to update this item?",
            Pending::Delete { .. } => "Are you sure you want to delete this item?",
        }
    }

    pub fn id(&self) -> &ContactId {
        match self {
            Pending::Update { id } | Pending::Delete { id } => id,
        }
    }
}

/// Result of submitting the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Validation failed; the errors are available from [`PhoneBook::errors`].
    Invalid,
    /// A new record was stored.
    Created(Contact),
    /// Edit mode: the update runs only after [`PhoneBook::confirm`].
    NeedsConfirmation(Pending),
}

/// Client-side state of the phonebook, generic over the store.
pub struct PhoneBook<S: RemoteStore> {
    store: S,
    form: ContactForm,
    errors: ValidationErrors,
    editing: Option<ContactId>,
    contacts: Vec<Contact>,
    filtered: Vec<Contact>,
    query: String,
    loading: bool,
    notices: Vec<Notice>,
}

impl<S: RemoteStore> PhoneBook<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            form: ContactForm::default(),
            errors: ValidationErrors::default(),
            editing: None,
            contacts: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            loading: false,
            notices: Vec::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// ID of the record being edited, if in edit mode.
    pub fn editing(&self) -> Option<&ContactId> {
        self.editing.as_ref()
    }

    /// The last fetched full list.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// The last fetched list narrowed by the current search query.
    pub fn filtered(&self) -> &[Contact] {
        &self.filtered
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Update"
        } else {
            "Submit"
        }
    }

    /// Drain queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Change one field and clear that field's error.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
        self.errors.clear(field);
    }

    /// Narrow the fetched list to records matching `query`.
    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
        self.filtered = filter_contacts(&self.contacts, query);
    }

    /// Re-fetch the full list. On failure the previous list is kept.
    pub async fn refresh(&mut self) -> Result<(), Error> {
        self.loading = true;
        let result = self.store.list().await;
        self.loading = false;

        match result {
            Ok(contacts) => {
                debug!(count = contacts.len(), "fetched contacts");
                self.filtered = contacts.clone();
                self.contacts = contacts;
                self.query.clear();
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "failed to fetch contacts");
                Err(e)
            }
        }
    }

    /// Load a record into the form and enter edit mode.
    pub async fn begin_edit(&mut self, id: &ContactId) -> Result<(), Error> {
        let contact = self.store.get(id).await.map_err(|e| {
            error!(error = %e, id = %id, "failed to load contact for editing");
            e
        })?;

        self.form = ContactForm {
            name: contact.name,
            email: contact.email,
            dob: wire_to_input_date(&contact.dob),
            mob: contact.mob,
        };
        self.errors = ValidationErrors::default();
        self.editing = Some(id.clone());
        Ok(())
    }

    /// Leave edit mode and clear the form.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.reset_form();
    }

    /// Validate and submit the form.
    ///
    /// In create mode this stores the record right away. In edit mode it
    /// only returns the pending update for the caller to confirm.
    pub async fn submit(&mut self) -> Result<Submission, Error> {
        let errors = validate(&self.form);
        if !errors.is_empty() {
            self.errors = errors;
            return Ok(Submission::Invalid);
        }

        if let Some(id) = &self.editing {
            return Ok(Submission::NeedsConfirmation(Pending::Update { id: id.clone() }));
        }

        let created = self.store.create(&self.form).await.map_err(|e| {
            error!(error = %e, "failed to create contact");
            e
        })?;

        self.reset_form();
        self.notices.push(Notice::Submitted);
        // A failed refresh is already logged and keeps the previous list.
        self.refresh().await.ok();
        Ok(Submission::Created(created))
    }

    /// Ask to delete a record. Nothing is sent until [`PhoneBook::confirm`].
    pub fn request_delete(&self, id: ContactId) -> Pending {
        Pending::Delete { id }
    }

    /// Carry out a confirmed mutation.
    pub async fn confirm(&mut self, pending: Pending) -> Result<(), Error> {
        match pending {
            Pending::Update { id } => {
                let errors = validate(&self.form);
                if !errors.is_empty() {
                    self.errors = errors;
                    return Err(Error::Validation("form has invalid fields".into()));
                }

                self.store.update(&id, &self.form).await.map_err(|e| {
                    error!(error = %e, id = %id, "failed to update contact");
                    e
                })?;

                self.reset_form();
                self.editing = None;
                self.notices.push(Notice::Updated);
            }
            Pending::Delete { id } => {
                self.store.delete(&id).await.map_err(|e| {
                    error!(error = %e, id = %id, "failed to delete contact");
                    e
                })?;

                self.notices.push(Notice::Deleted);
            }
        }

        self.refresh().await.ok();
        Ok(())
    }

    fn reset_form(&mut self) {
        self.form = ContactForm::default();
        self.errors = ValidationErrors::default();
    }
}
