pub mod command;
pub mod mediator;
pub mod settings;

pub use command::{Command, CommandHandler};
pub use mediator::{Mediator, MediatorError};
pub use settings::Settings;
