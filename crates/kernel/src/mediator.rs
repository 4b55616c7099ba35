use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::command::{Command, CommandHandler};

/// Failures raised by the mediator itself, as opposed to its handlers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediatorError {
    #[error("command handlers for \"{0}\" are not registered")]
    HandlersNotRegistered(&'static str),
}

type Handlers<C> = Vec<Arc<dyn CommandHandler<C>>>;

/// Registry routing commands to their handlers
///
/// Handlers are kept per command type in registration order. Dispatch runs
/// all of them and stops at the first failure.
pub struct Mediator {
    command_map: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
    command_names: HashMap<TypeId, &'static str>,
}

impl Mediator {
    /// Create an empty mediator
    pub fn new() -> Self {
        Self {
            command_map: HashMap::new(),
            command_names: HashMap::new(),
        }
    }

    /// Register handlers for a command type, appending to any already registered
    pub fn register_command<C, I>(&mut self, handlers: I)
    where
        C: Command,
        I: IntoIterator<Item = Arc<dyn CommandHandler<C>>>,
    {
        let entry = self
            .command_map
            .entry(TypeId::of::<C>())
            .or_insert_with(|| Box::new(Handlers::<C>::new()));

        if let Some(registered) = entry.downcast_mut::<Handlers<C>>() {
            let before = registered.len();
            registered.extend(handlers);
            tracing::debug!(
                command = type_name::<C>(),
                added = registered.len() - before,
                "registered command handlers"
            );
        }

        self.command_names.insert(TypeId::of::<C>(), type_name::<C>());
    }

    /// Number of handlers registered for `C`
    pub fn handlers_count<C: Command>(&self) -> usize {
        self.handlers::<C>().map_or(0, Vec::len)
    }

    /// Names of every registered command type
    pub fn registered_commands(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.command_names.values().copied().collect();
        names.sort_unstable();
        names
    }

    /// Run every handler registered for the command's type, in registration order
    ///
    /// Returns one result per handler. Callers with a single handler usually take
    /// the first element.
    pub fn handle_command<C: Command>(&self, command: &C) -> Result<Vec<C::Output>, C::Error> {
        let handlers = match self.handlers::<C>() {
            Some(handlers) if !handlers.is_empty() => handlers,
            _ => {
                tracing::error!(command = type_name::<C>(), "no handlers registered");
                return Err(MediatorError::HandlersNotRegistered(type_name::<C>()).into());
            }
        };

        tracing::info!(command = type_name::<C>(), "dispatching command");

        handlers
            .iter()
            .map(|handler| handler.handle(command))
            .collect()
    }

    /// Dispatch and keep only the first handler's result
    pub fn handle_first<C: Command>(&self, command: &C) -> Result<C::Output, C::Error> {
        self.handle_command(command)?
            .into_iter()
            .next()
            .ok_or_else(|| MediatorError::HandlersNotRegistered(type_name::<C>()).into())
    }

    fn handlers<C: Command>(&self) -> Option<&Handlers<C>> {
        self.command_map
            .get(&TypeId::of::<C>())
            .and_then(|entry| entry.downcast_ref::<Handlers<C>>())
    }
}

impl Default for Mediator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Mediator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mediator")
            .field("commands", &self.registered_commands())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Ping(u32);

    impl Command for Ping {
        type Output = u32;
        type Error = MediatorError;
    }

    #[derive(Debug)]
    struct Unregistered;

    impl Command for Unregistered {
        type Output = ();
        type Error = MediatorError;
    }

    #[derive(Debug, PartialEq)]
    enum TestError {
        Mediator(MediatorError),
        Boom,
    }

    impl From<MediatorError> for TestError {
        fn from(err: MediatorError) -> Self {
            TestError::Mediator(err)
        }
    }

    #[derive(Debug)]
    struct Fallible;

    impl Command for Fallible {
        type Output = ();
        type Error = TestError;
    }

    struct Recorder {
        calls: Arc<Mutex<Vec<&'static str>>>,
        name: &'static str,
        fail: bool,
    }

    impl CommandHandler<Fallible> for Recorder {
        fn handle(&self, _command: &Fallible) -> Result<(), TestError> {
            self.calls.lock().unwrap().push(self.name);
            if self.fail {
                Err(TestError::Boom)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_mediator_creation() {
        let mediator = Mediator::new();
        assert!(mediator.registered_commands().is_empty());
        assert_eq!(mediator.handlers_count::<Ping>(), 0);
    }

    #[test]
    fn test_unregistered_command_fails() {
        let mediator = Mediator::new();
        let err = mediator.handle_command(&Unregistered).unwrap_err();
        assert!(matches!(err, MediatorError::HandlersNotRegistered(name) if name.ends_with("Unregistered")));
    }

    #[test]
    fn test_empty_registration_counts_as_unregistered() {
        let mut mediator = Mediator::new();
        mediator.register_command::<Ping, _>(Vec::new());
        assert!(mediator.handle_command(&Ping(1)).is_err());
    }

    #[test]
    fn test_handlers_run_in_registration_order() {
        let mut mediator = Mediator::new();
        let double: Arc<dyn CommandHandler<Ping>> =
            Arc::new(|c: &Ping| -> Result<u32, MediatorError> { Ok(c.0 * 2) });
        let triple: Arc<dyn CommandHandler<Ping>> =
            Arc::new(|c: &Ping| -> Result<u32, MediatorError> { Ok(c.0 * 3) });
        mediator.register_command::<Ping, _>([double]);
        mediator.register_command::<Ping, _>([triple]);

        assert_eq!(mediator.handlers_count::<Ping>(), 2);
        assert_eq!(mediator.handle_command(&Ping(5)).unwrap(), vec![10, 15]);
        assert_eq!(mediator.handle_first(&Ping(5)).unwrap(), 10);
    }

    #[test]
    fn test_failing_handler_stops_dispatch() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let handlers: Vec<Arc<dyn CommandHandler<Fallible>>> = vec![
            Arc::new(Recorder { calls: calls.clone(), name: "first", fail: false }),
            Arc::new(Recorder { calls: calls.clone(), name: "second", fail: true }),
            Arc::new(Recorder { calls: calls.clone(), name: "third", fail: false }),
        ];
        let mut mediator = Mediator::new();
        mediator.register_command::<Fallible, _>(handlers);

        let err = mediator.handle_command(&Fallible).unwrap_err();
        assert_eq!(err, TestError::Boom);
        assert_eq!(*calls.lock().unwrap(), vec!["first", "second"]);
    }
}
