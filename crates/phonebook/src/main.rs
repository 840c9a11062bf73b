//! Phonebook CLI - contacts stored in a remote REST collection.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use phonebook_core::{
    format_display_date, Contact, ContactId, Field, Pending, PhoneBook, RemoteStore, SortColumn,
    SortOrder, Submission, TablePage, TableView, DEFAULT_ROWS_PER_PAGE,
};
use phonebook_http::{HttpStore, DEFAULT_BASE_URL};
use std::io::{self, BufRead, Write};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "phonebook", about = "Contact book backed by a remote REST store", version)]
struct Cli {
    /// Base URL of the contact collection
    #[arg(long, global = true, env = "PHONEBOOK_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortBy {
    Name,
    Dob,
}

#[derive(Subcommand)]
enum Commands {
    /// List contacts as a paginated table
    Ls {
        /// Only show contacts where any field contains this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
        /// Page to show, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
        /// Rows per page (5, 10 or 15)
        #[arg(short = 'n', long, default_value_t = DEFAULT_ROWS_PER_PAGE)]
        per_page: usize,
        /// Sort column
        #[arg(long, value_enum)]
        sort: Option<SortBy>,
        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Show a single contact
    Show {
        /// Contact ID
        id: String,
    },
    /// Add a new contact
    Add {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        dob: String,
        #[arg(long, default_value = "")]
        mobile: String,
    },
    /// Edit a contact
    Edit {
        /// Contact ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete one or more contacts
    Rm {
        /// Contact IDs
        #[arg(required = true)]
        ids: Vec<String>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn is_stdin_tty() -> bool {
    atty::is(atty::Stream::Stdin)
}

/// Ask a yes/no question. Without a terminal the answer is no.
fn confirm(pending: &Pending, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !is_stdin_tty() {
        eprintln!("{} (not a terminal, pass --yes to confirm)", pending.title());
        return Ok(false);
    }

    eprint!("{}\n{} [y/N] ", pending.title(), pending.message());
    io::stderr().flush().context("Failed to flush prompt")?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_notices<S: RemoteStore>(book: &mut PhoneBook<S>) {
    for notice in book.take_notices() {
        println!("{}", notice.message());
    }
}

/// Print validation errors next to their field labels and fail.
fn report_invalid<S: RemoteStore>(book: &PhoneBook<S>) -> Result<()> {
    for (field, message) in book.errors().iter() {
        eprintln!("{}: {}", field.label(), message);
    }
    bail!("Form has invalid fields");
}

fn print_table(page: &TablePage) {
    let headers = ["ID", "Name", "Email", "DOB", "Mobile"];
    let rows: Vec<[String; 5]> = page
        .rows
        .iter()
        .map(|c| {
            [
                c.id.to_string(),
                c.name.clone(),
                c.email.clone(),
                format_display_date(&c.dob),
                c.mob.clone(),
            ]
        })
        .collect();

    let mut widths = headers.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(widths)
            .map(|(c, w)| format!("{:<w$}", c, w = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    println!("{}", line(headers.to_vec()));
    for row in &rows {
        println!("{}", line(row.iter().map(String::as_str).collect()));
    }

    if page.rows.is_empty() {
        println!("There are no records to display");
    }
    println!(
        "[Page {}/{} - {} contacts]",
        page.page, page.total_pages, page.total_rows
    );
}

fn print_contact(contact: &Contact) {
    println!("ID: {}", contact.id);
    println!("Name: {}", contact.name);
    println!("Email: {}", contact.email);
    println!("DOB: {}", format_display_date(&contact.dob));
    println!("Mobile: {}", contact.mob);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(base_url = %cli.base_url, "using remote store");
    let store = HttpStore::new(&cli.base_url).context("Failed to set up remote store")?;
    let mut book = PhoneBook::new(store);

    match cli.command {
        Commands::Ls {
            search,
            page,
            per_page,
            sort,
            desc,
        } => {
            let mut view = TableView::new(per_page)?;
            if let Some(sort) = sort {
                let column = match sort {
                    SortBy::Name => SortColumn::Name,
                    SortBy::Dob => SortColumn::Dob,
                };
                let order = if desc { SortOrder::Desc } else { SortOrder::Asc };
                view = view.with_sort(column, order);
            }

            book.refresh().await.context("Failed to fetch contacts")?;
            if let Some(query) = search {
                book.search(&query);
            }
            print_table(&view.page(book.filtered(), page));
        }

        Commands::Show { id } => {
            let contact = book
                .store()
                .get(&ContactId::new(id))
                .await
                .context("Failed to fetch contact")?;
            print_contact(&contact);
        }

        Commands::Add {
            name,
            email,
            dob,
            mobile,
        } => {
            book.set_field(Field::Name, name);
            book.set_field(Field::Email, email);
            book.set_field(Field::Dob, dob);
            book.set_field(Field::Mob, mobile);

            match book.submit().await.context("Failed to add contact")? {
                Submission::Invalid => report_invalid(&book)?,
                Submission::Created(contact) => {
                    print_notices(&mut book);
                    println!("Added contact {}", contact.id);
                }
                Submission::NeedsConfirmation(_) => unreachable!("form is not in edit mode"),
            }
        }

        Commands::Edit {
            id,
            name,
            email,
            dob,
            mobile,
            yes,
        } => {
            let id = ContactId::new(id);
            book.begin_edit(&id)
                .await
                .context(format!("Failed to load contact {}", id))?;

            let changes = [
                (Field::Name, name),
                (Field::Email, email),
                (Field::Dob, dob),
                (Field::Mob, mobile),
            ];
            let mut updated_fields = Vec::new();
            for (field, value) in changes {
                if let Some(value) = value {
                    book.set_field(field, value);
                    updated_fields.push(field.label());
                }
            }
            if updated_fields.is_empty() {
                eprintln!("Nothing to update");
                std::process::exit(1);
            }

            match book.submit().await? {
                Submission::Invalid => report_invalid(&book)?,
                Submission::NeedsConfirmation(pending) => {
                    if !confirm(&pending, yes)? {
                        book.cancel_edit();
                        println!("Update cancelled");
                        return Ok(());
                    }
                    book.confirm(pending)
                        .await
                        .context(format!("Failed to update contact {}", id))?;
                    print_notices(&mut book);
                    println!("Edited contact {}: Updated {}", id, updated_fields.join(", "));
                }
                Submission::Created(_) => unreachable!("form is in edit mode"),
            }
        }

        Commands::Rm { ids, yes } => {
            let mut failed = Vec::new();

            for id in ids {
                let pending = book.request_delete(ContactId::new(id));
                if !confirm(&pending, yes)? {
                    println!("Skipped contact {}", pending.id());
                    continue;
                }
                let id = pending.id().clone();
                match book.confirm(pending).await {
                    Ok(()) => {
                        print_notices(&mut book);
                        println!("Deleted contact {}", id);
                    }
                    Err(e) => {
                        eprintln!("Contact {}: {}", id, e);
                        failed.push(id);
                    }
                }
            }

            if !failed.is_empty() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ls_defaults() {
        let cli = Cli::try_parse_from(["phonebook", "ls"]).unwrap();
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
        let Commands::Ls { page, per_page, sort, desc, search } = cli.command else {
            panic!("expected ls");
        };
        assert_eq!(page, 1);
        assert_eq!(per_page, 5);
        assert!(sort.is_none());
        assert!(!desc);
        assert!(search.is_none());
    }

    #[test]
    fn test_desc_requires_sort() {
        assert!(Cli::try_parse_from(["phonebook", "ls", "--desc"]).is_err());
        assert!(Cli::try_parse_from(["phonebook", "ls", "--sort", "dob", "--desc"]).is_ok());
    }

    #[test]
    fn test_rm_needs_ids() {
        assert!(Cli::try_parse_from(["phonebook", "rm"]).is_err());
        let cli = Cli::try_parse_from(["phonebook", "rm", "1", "2", "--yes"]).unwrap();
        let Commands::Rm { ids, yes } = cli.command else {
            panic!("expected rm");
        };
        assert_eq!(ids, vec!["1", "2"]);
        assert!(yes);
    }

    #[test]
    fn test_affirmative_answers() {
        for yes in ["y", "Y", "yes", "YES\n", "  Yes  \r\n"] {
            assert!(is_affirmative(yes), "{:?}", yes);
        }
        for no in ["", "\n", "n", "no", "yep", "y es", "sure"] {
            assert!(!is_affirmative(no), "{:?}", no);
        }
    }

    #[test]
    fn test_confirm_assume_yes() {
        let pending = Pending::Delete { id: ContactId::new("1") };
        assert!(confirm(&pending, true).unwrap());
    }
}
