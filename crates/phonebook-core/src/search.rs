use crate::Contact;

/// Return the contacts where any field contains `query`, ignoring case.
///
/// An empty query matches everything.
pub fn filter_contacts(contacts: &[Contact], query: &str) -> Vec<Contact> {
    let needle = query.to_lowercase();
    contacts
        .iter()
        .filter(|c| {
            c.field_values()
                .iter()
                .any(|v| v.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContactId;

    fn contact(id: &str, name: &str, email: &str, dob: &str, mob: &str) -> Contact {
        Contact {
            id: ContactId::new(id),
            name: name.into(),
            email: email.into(),
            dob: dob.into(),
            mob: mob.into(),
        }
    }

    fn sample() -> Vec<Contact> {
        vec![
            contact("1", "John Smith", "js@example.com", "12/05/1990", "9876543210"),
            contact("2", "Alice Brown", "alice@johnson.io", "1985-02-01", "1234567890"),
            contact("3", "Bob Stone", "bob@example.com", "03/03/1970", "5555555555"),
        ]
    }

    #[test]
    fn test_case_insensitive_any_field() {
        let ids: Vec<_> = filter_contacts(&sample(), "JOHN")
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![ContactId::new("1"), ContactId::new("2")]);
    }

    #[test]
    fn test_empty_query_returns_all() {
        assert_eq!(filter_contacts(&sample(), ""), sample());
    }

    #[test]
    fn test_matches_id_and_dob() {
        assert_eq!(filter_contacts(&sample(), "3").len(), 3);
        let hits = filter_contacts(&sample(), "1970");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Bob Stone");
    }

    #[test]
    fn test_no_match() {
        assert!(filter_contacts(&sample(), "zzz").is_empty());
    }
}
