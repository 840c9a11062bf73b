use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned by the remote store.
///
/// The store sends ids as JSON strings, but numeric ids are accepted too and
/// kept as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContactId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A scalar the store may send where text is expected.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
}

impl RawText {
    fn into_string(self) -> String {
        match self {
            RawText::Text(s) => s,
            RawText::Number(n) => n.to_string(),
            RawText::Bool(b) => b.to_string(),
        }
    }
}

/// Read a text field leniently: numbers and booleans keep their JSON text,
/// `null` becomes empty.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<RawText>::deserialize(deserializer)?
        .map(RawText::into_string)
        .unwrap_or_default())
}

impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_text(deserializer).map(Self)
    }
}

/// A contact record as held by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
    /// Date of birth in whatever format the store holds it.
    #[serde(default, deserialize_with = "lenient_text")]
    pub dob: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mob: String,
}

impl Contact {
    /// String form of every field, id included, in wire order.
    pub fn field_values(&self) -> [&str; 5] {
        [
            self.id.as_str(),
            &self.name,
            &self.email,
            &self.dob,
            &self.mob,
        ]
    }
}

/// The editable fields of a contact. This is also the create/update request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub dob: String,
    pub mob: String,
}

impl ContactForm {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Dob => &self.dob,
            Field::Mob => &self.mob,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Dob => &mut self.dob,
            Field::Mob => &mut self.mob,
        };
        *slot = value.into();
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

/// Form field names, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Dob,
    Mob,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Dob, Field::Mob];

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Dob => "dob",
            Field::Mob => "mob",
        }
    }

    /// Label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Dob => "DOB",
            Field::Mob => "Mobile",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_store_record() {
        let json = r#"{
            "createdAt": "2024-01-15T08:00:00.000Z",
            "name": "John Smith",
            "email": "john@example.com",
            "dob": "12/05/1990",
            "mob": "9876543210",
            "id": "7"
        }"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.id, ContactId::new("7"));
        assert_eq!(contact.name, "John Smith");
        assert_eq!(contact.dob, "12/05/1990");
    }

    #[test]
    fn test_numeric_id_kept_as_text() {
        let json = r#"{"id": 42, "name": "a", "email": "b", "dob": "c", "mob": "d"}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.id.as_str(), "42");
    }

    #[test]
    fn test_odd_rows_do_not_break_the_list() {
        let json = r#"[
            {"id": "1", "name": "John", "email": "j@x.io", "dob": "12/05/1990", "mob": "9876543210"},
            {"id": "2", "name": "Numeric", "email": "n@x.io", "dob": "1990-05-12", "mob": 9876543210},
            {"id": "3", "name": null, "email": "m@x.io", "dob": "1990-05-12"}
        ]"#;
        let contacts: Vec<Contact> = serde_json::from_str(json).unwrap();
        assert_eq!(contacts.len(), 3);
        assert_eq!(contacts[1].mob, "9876543210");
        assert_eq!(contacts[2].name, "");
        assert_eq!(contacts[2].mob, "");
        assert_eq!(crate::filter_contacts(&contacts, "98765").len(), 2);
    }

    #[test]
    fn test_form_serializes_without_id() {
        let form = ContactForm {
            name: "Ann".into(),
            email: "ann@x.io".into(),
            dob: "1990-05-12".into(),
            mob: "1234567890".into(),
        };
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "Ann",
                "email": "ann@x.io",
                "dob": "1990-05-12",
                "mob": "1234567890",
            })
        );
    }

    #[test]
    fn test_form_get_set() {
        let mut form = ContactForm::default();
        assert!(form.is_empty());
        form.set(Field::Mob, "1234567890");
        assert_eq!(form.get(Field::Mob), "1234567890");
        assert!(!form.is_empty());
    }
}
