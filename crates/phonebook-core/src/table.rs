//! Paginated, sortable view over a contact list.

use std::cmp::Ordering;

use crate::dates::parse_wire_date;
use crate::{Contact, Error};

pub const DEFAULT_ROWS_PER_PAGE: usize = 5;
pub const ROWS_PER_PAGE_OPTIONS: [usize; 3] = [5, 10, 15];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Name,
    Dob,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// One page of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePage {
    /// 1-based page number actually shown.
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub rows: Vec<Contact>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    rows_per_page: usize,
    sort: Option<(SortColumn, SortOrder)>,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            sort: None,
        }
    }
}

impl TableView {
    /// Create a view with the given page size. Only the sizes in
    /// [`ROWS_PER_PAGE_OPTIONS`] are accepted.
    pub fn new(rows_per_page: usize) -> Result<Self, Error> {
        if !ROWS_PER_PAGE_OPTIONS.contains(&rows_per_page) {
            return Err(Error::Validation(format!(
                "rows per page must be one of {:?}, got {}",
                ROWS_PER_PAGE_OPTIONS, rows_per_page
            )));
        }
        Ok(Self {
            rows_per_page,
            sort: None,
        })
    }

    pub fn with_sort(mut self, column: SortColumn, order: SortOrder) -> Self {
        self.sort = Some((column, order));
        self
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    /// Sort (if configured) and slice out the requested page.
    ///
    /// Page numbers start at 1; anything past the end shows the last page.
    pub fn page(&self, contacts: &[Contact], page: usize) -> TablePage {
        let mut rows = contacts.to_vec();
        if let Some((column, order)) = self.sort {
            rows.sort_by(|a, b| {
                let ord = compare(a, b, column);
                match order {
                    SortOrder::Asc => ord,
                    SortOrder::Desc => ord.reverse(),
                }
            });
        }

        let total_rows = rows.len();
        let total_pages = total_rows.div_ceil(self.rows_per_page).max(1);
        let page = page.clamp(1, total_pages);
        let start = (page - 1) * self.rows_per_page;

        let rows = rows
            .into_iter()
            .skip(start)
            .take(self.rows_per_page)
            .collect();

        TablePage {
            page,
            total_pages,
            total_rows,
            rows,
        }
    }
}

fn compare(a: &Contact, b: &Contact, column: SortColumn) -> Ordering {
    match column {
        SortColumn::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        // Unparseable dates sort before every real date.
        SortColumn::Dob => parse_wire_date(&a.dob).cmp(&parse_wire_date(&b.dob)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ContactId;

    fn contact(id: usize, name: &str, dob: &str) -> Contact {
        Contact {
            id: ContactId::new(id.to_string()),
            name: name.into(),
            email: format!("{}@example.com", id),
            dob: dob.into(),
            mob: "1234567890".into(),
        }
    }

    fn many(n: usize) -> Vec<Contact> {
        (1..=n).map(|i| contact(i, &format!("Person {}", i), "1990-01-01")).collect()
    }

    fn ids(page: &TablePage) -> Vec<&str> {
        page.rows.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_default_five_per_page() {
        let view = TableView::default();
        let page = view.page(&many(12), 1);
        assert_eq!(page.rows.len(), 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_rows, 12);

        let last = view.page(&many(12), 3);
        assert_eq!(ids(&last), vec!["11", "12"]);
    }

    #[test]
    fn test_rows_per_page_options() {
        assert!(TableView::new(10).is_ok());
        assert!(TableView::new(15).is_ok());
        assert!(matches!(TableView::new(7), Err(Error::Validation(_))));
        assert!(matches!(TableView::new(0), Err(Error::Validation(_))));
    }

    #[test]
    fn test_page_clamped() {
        let view = TableView::new(10).unwrap();
        let page = view.page(&many(12), 9);
        assert_eq!(page.page, 2);
        assert_eq!(page.rows.len(), 2);

        let page = view.page(&many(12), 0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let page = TableView::default().page(&[], 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.rows.is_empty());
    }

    #[test]
    fn test_sort_by_name() {
        let rows = vec![
            contact(1, "charlie", "1990-01-01"),
            contact(2, "Alice", "1990-01-01"),
            contact(3, "bob", "1990-01-01"),
        ];
        let view = TableView::default().with_sort(SortColumn::Name, SortOrder::Asc);
        assert_eq!(ids(&view.page(&rows, 1)), vec!["2", "3", "1"]);

        let view = TableView::default().with_sort(SortColumn::Name, SortOrder::Desc);
        assert_eq!(ids(&view.page(&rows, 1)), vec!["1", "3", "2"]);
    }

    #[test]
    fn test_sort_by_dob_mixed_formats() {
        let rows = vec![
            contact(1, "a", "2001-06-01"),
            contact(2, "b", "15/03/1985"),
            contact(3, "c", "garbage"),
            contact(4, "d", "1999-12-31T10:00:00Z"),
        ];
        let view = TableView::default().with_sort(SortColumn::Dob, SortOrder::Asc);
        assert_eq!(ids(&view.page(&rows, 1)), vec!["3", "2", "4", "1"]);
    }
}
