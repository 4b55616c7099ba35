pub mod commands;
pub mod converters;
pub mod errors;
pub mod filters;
pub mod models;
pub mod repository;
pub mod values;

use std::sync::Arc;

use shelf_kernel::{CommandHandler, Mediator};

use commands::{
    AddBookCommand, AddBookCommandHandler, DeleteBookCommand, DeleteBookCommandHandler,
    FindBookCommand, FindBookCommandHandler, GetBooksCommand, GetBooksCommandHandler,
    UpdateBookStatusCommand, UpdateBookStatusCommandHandler,
};

pub use errors::{Field, ValueError};
pub use filters::BookFilters;
pub use models::Book;
pub use repository::{BooksRepository, JsonBooksRepository, RepositoryError};
pub use values::{Author, Status, Title, Year};

pub const MODULE_NAME: &str = "books";

/// Bind one handler per book command
pub fn register(mediator: &mut Mediator, book_repository: Arc<dyn BooksRepository>) {
    let get_books: Arc<dyn CommandHandler<GetBooksCommand>> =
        Arc::new(GetBooksCommandHandler::new(book_repository.clone()));
    let add_book: Arc<dyn CommandHandler<AddBookCommand>> =
        Arc::new(AddBookCommandHandler::new(book_repository.clone()));
    let delete_book: Arc<dyn CommandHandler<DeleteBookCommand>> =
        Arc::new(DeleteBookCommandHandler::new(book_repository.clone()));
    let find_book: Arc<dyn CommandHandler<FindBookCommand>> =
        Arc::new(FindBookCommandHandler::new(book_repository.clone()));
    let update_status: Arc<dyn CommandHandler<UpdateBookStatusCommand>> =
        Arc::new(UpdateBookStatusCommandHandler::new(book_repository));

    mediator.register_command::<GetBooksCommand, _>([get_books]);
    mediator.register_command::<AddBookCommand, _>([add_book]);
    mediator.register_command::<DeleteBookCommand, _>([delete_book]);
    mediator.register_command::<FindBookCommand, _>([find_book]);
    mediator.register_command::<UpdateBookStatusCommand, _>([update_status]);

    tracing::info!(module = MODULE_NAME, "books module registered");
}
