pub mod books;

use std::sync::Arc;

use shelf_kernel::Mediator;

use books::repository::BooksRepository;

/// Register every catalog module's handlers with the mediator
pub fn register_all(mediator: &mut Mediator, book_repository: Arc<dyn BooksRepository>) {
    books::register(mediator, book_repository);
}
