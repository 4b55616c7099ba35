//! Personal book catalog
//!
//! Books live in a JSON file and are managed through commands dispatched by the
//! kernel mediator. The `shelf` binary drives them from an interactive menu.

pub mod container;
pub mod error;
pub mod menu;
pub mod modules;
pub mod utils;

pub use container::{init_container, init_container_with, Container};
pub use error::AppError;
pub use modules::*;
