//! Main menu entries, listed in display order by [`menu_items`].

use shelf_kernel::Mediator;

use super::console::{Console, Input};
use super::{Flow, MenuItem};
use crate::error::AppError;
use crate::modules::books::commands::{
    AddBookCommand, DeleteBookCommand, FindBookCommand, GetBooksCommand,
    UpdateBookStatusCommand,
};
use crate::modules::books::{Author, Book, Title, ValueError, Year};
use crate::utils::render_book;

pub fn menu_items() -> Vec<Box<dyn MenuItem>> {
    vec![
        Box::new(GetBooksMenuItem),
        Box::new(AddBookMenuItem),
        Box::new(DeleteBookMenuItem),
        Box::new(FindBookMenuItem),
        Box::new(UpdateStatusMenuItem),
        Box::new(CloseProgramMenuItem),
    ]
}

fn print_book(console: &mut Console<'_>, book: &Book) -> std::io::Result<()> {
    console.blank()?;
    console.say(render_book(book))
}

pub struct GetBooksMenuItem;

impl MenuItem for GetBooksMenuItem {
    fn label(&self) -> &'static str {
        "Show all books"
    }

    fn handle(&self, console: &mut Console<'_>, mediator: &Mediator) -> anyhow::Result<Flow> {
        let books = mediator.handle_first(&GetBooksCommand)?;

        if books.is_empty() {
            console.blank()?;
            console.say("The catalog is empty")?;
        }
        for book in &books {
            print_book(console, book)?;
        }

        Ok(Flow::Continue)
    }
}

pub struct AddBookMenuItem;

impl AddBookMenuItem {
    /// Ask for one field; `None` when the user aborts
    fn ask_valid<T>(
        console: &mut Console<'_>,
        prompt: &str,
        validate: impl Fn(&str) -> Result<T, ValueError>,
    ) -> anyhow::Result<Option<Result<String, ValueError>>> {
        match console.ask(prompt)? {
            Input::Abort => Ok(None),
            Input::Value(value) => Ok(Some(validate(&value).map(|_| value))),
        }
    }

    /// Collect title, author and year; any invalid answer restarts from the title
    fn get_book_params(console: &mut Console<'_>) -> anyhow::Result<Option<AddBookCommand>> {
        loop {
            let title = match Self::ask_valid(console, "Enter the title:", |v| Title::new(v))? {
                None => return Ok(None),
                Some(Ok(title)) => title,
                Some(Err(err)) => {
                    Self::report(console, &err)?;
                    continue;
                }
            };

            let author = match Self::ask_valid(console, "Enter the author:", |v| Author::new(v))? {
                None => return Ok(None),
                Some(Ok(author)) => author,
                Some(Err(err)) => {
                    Self::report(console, &err)?;
                    continue;
                }
            };

            let year = match Self::ask_valid(console, "Enter the publication year:", |v| Year::new(v))?
            {
                None => return Ok(None),
                Some(Ok(year)) => year,
                Some(Err(err)) => {
                    Self::report(console, &err)?;
                    continue;
                }
            };

            return Ok(Some(AddBookCommand::new(title, author, year)));
        }
    }

    fn report(console: &mut Console<'_>, err: &ValueError) -> std::io::Result<()> {
        console.blank()?;
        console.say(format_args!("Invalid {}: {}. Try again.", err.field(), err))
    }
}

impl MenuItem for AddBookMenuItem {
    fn label(&self) -> &'static str {
        "Add a book"
    }

    fn handle(&self, console: &mut Console<'_>, mediator: &Mediator) -> anyhow::Result<Flow> {
        let Some(command) = Self::get_book_params(console)? else {
            return Ok(Flow::Continue);
        };

        match mediator.handle_first(&command) {
            Ok(book) => {
                console.say("Book added!")?;
                print_book(console, &book)?;
            }
            Err(AppError::Validation(err)) => Self::report(console, &err)?,
            Err(err) => return Err(err.into()),
        }

        Ok(Flow::Continue)
    }
}

/// Prompt for a book oid
fn ask_oid(console: &mut Console<'_>) -> std::io::Result<Option<String>> {
    Ok(match console.ask("Enter the book ID:")? {
        Input::Value(oid) => Some(oid.trim().to_string()),
        Input::Abort => None,
    })
}

pub struct DeleteBookMenuItem;

impl MenuItem for DeleteBookMenuItem {
    fn label(&self) -> &'static str {
        "Delete a book"
    }

    fn handle(&self, console: &mut Console<'_>, mediator: &Mediator) -> anyhow::Result<Flow> {
        let Some(oid) = ask_oid(console)? else {
            return Ok(Flow::Continue);
        };

        match mediator.handle_first(&DeleteBookCommand::new(oid.as_str())) {
            Ok(()) => console.say("Book deleted!")?,
            Err(err) if err.not_found_oid().is_some() => {
                console.say(format_args!("Book \"{}\" not found", oid))?
            }
            Err(err) => return Err(err.into()),
        }

        Ok(Flow::Continue)
    }
}

pub struct FindBookMenuItem;

impl FindBookMenuItem {
    /// Empty answers mean "do not filter on this field"
    fn ask_filter(console: &mut Console<'_>, prompt: &str) -> std::io::Result<Option<Option<String>>> {
        Ok(match console.ask(prompt)? {
            Input::Abort => None,
            Input::Value(value) if value.is_empty() => Some(None),
            Input::Value(value) => Some(Some(value)),
        })
    }

    fn get_book_params(console: &mut Console<'_>) -> std::io::Result<Option<FindBookCommand>> {
        let Some(title) = Self::ask_filter(console, "Enter the title (leave empty to skip):")? else {
            return Ok(None);
        };
        let Some(author) = Self::ask_filter(console, "Enter the author (leave empty to skip):")?
        else {
            return Ok(None);
        };
        let Some(year) =
            Self::ask_filter(console, "Enter the publication year (leave empty to skip):")?
        else {
            return Ok(None);
        };

        Ok(Some(FindBookCommand {
            title,
            author,
            year,
            status: None,
        }))
    }
}

impl MenuItem for FindBookMenuItem {
    fn label(&self) -> &'static str {
        "Find books"
    }

    fn handle(&self, console: &mut Console<'_>, mediator: &Mediator) -> anyhow::Result<Flow> {
        let Some(command) = Self::get_book_params(console)? else {
            return Ok(Flow::Continue);
        };

        let books = mediator.handle_first(&command)?;
        if books.is_empty() {
            console.say("No books found")?;
            return Ok(Flow::Continue);
        }

        console.say("Search results:")?;
        for book in &books {
            print_book(console, book)?;
        }

        Ok(Flow::Continue)
    }
}

pub struct UpdateStatusMenuItem;

impl MenuItem for UpdateStatusMenuItem {
    fn label(&self) -> &'static str {
        "Toggle book status"
    }

    fn handle(&self, console: &mut Console<'_>, mediator: &Mediator) -> anyhow::Result<Flow> {
        let Some(oid) = ask_oid(console)? else {
            return Ok(Flow::Continue);
        };

        match mediator.handle_first(&UpdateBookStatusCommand::new(oid.as_str())) {
            Ok(book) => {
                console.say("Book status updated!")?;
                print_book(console, &book)?;
            }
            Err(err) if err.not_found_oid().is_some() => {
                console.say(format_args!("Book \"{}\" not found", oid))?
            }
            Err(err) => return Err(err.into()),
        }

        Ok(Flow::Continue)
    }
}

pub struct CloseProgramMenuItem;

impl MenuItem for CloseProgramMenuItem {
    fn label(&self) -> &'static str {
        "Exit"
    }

    fn handle(&self, _console: &mut Console<'_>, _mediator: &Mediator) -> anyhow::Result<Flow> {
        Ok(Flow::Exit)
    }
}
