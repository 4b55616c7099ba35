use std::fmt::Debug;

use crate::mediator::MediatorError;

/// An immutable request dispatched through the [`Mediator`](crate::Mediator).
///
/// The command's own type is the routing key, so each use case gets its own struct.
pub trait Command: Debug + Send + Sync + 'static {
    /// Value produced by a single handler
    type Output;

    /// Error produced by handlers; must be able to carry dispatch failures
    type Error: From<MediatorError>;
}

/// Handles one command type
pub trait CommandHandler<C: Command>: Send + Sync {
    fn handle(&self, command: &C) -> Result<C::Output, C::Error>;
}

impl<C, F> CommandHandler<C> for F
where
    C: Command,
    F: Fn(&C) -> Result<C::Output, C::Error> + Send + Sync,
{
    fn handle(&self, command: &C) -> Result<C::Output, C::Error> {
        self(command)
    }
}
