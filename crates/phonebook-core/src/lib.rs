//! Phonebook core library - contact types, validation, search and the
//! confirmation-gated CRUD workflow.
//!
//! This crate does no network I/O. Remote access goes through [`RemoteStore`].

mod contact;
mod controller;
mod dates;
mod error;
mod search;
mod store;
mod table;
mod validate;

pub use contact::{Contact, ContactForm, ContactId, Field};
pub use controller::{Notice, Pending, PhoneBook, Submission};
pub use dates::{format_display_date, wire_to_input_date};
pub use error::Error;
pub use search::filter_contacts;
pub use store::RemoteStore;
pub use table::{
    SortColumn, SortOrder, TablePage, TableView, DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS,
};
pub use validate::{validate, ValidationErrors};
