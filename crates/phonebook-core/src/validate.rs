//! Form validation.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::{ContactForm, Field};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 30;

/// Per-field error messages. A field that passed validation has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Record an error unless the field already has one.
    fn insert(&mut self, field: Field, message: &str) {
        self.0.entry(field).or_insert_with(|| message.to_string());
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email pattern"))
}

fn mobile_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("valid mobile pattern"))
}

/// Check every field of the form and collect the failures.
pub fn validate(form: &ContactForm) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if form.name.trim().is_empty() {
        errors.insert(Field::Name, "Name is required");
    } else {
        let len = form.name.chars().count();
        if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len) {
            errors.insert(Field::Name, "Name must be between 2 and 30 characters");
        }
    }

    if form.email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required");
    } else if !email_pattern().is_match(&form.email) {
        errors.insert(Field::Email, "Email is invalid");
    }

    if form.dob.trim().is_empty() {
        errors.insert(Field::Dob, "DOB is required");
    }

    if form.mob.trim().is_empty() {
        errors.insert(Field::Mob, "Mobile is required");
    } else if !mobile_pattern().is_match(&form.mob) {
        errors.insert(Field::Mob, "Mobile number should be 10 digits");
    }

    errors
}
