//! Process-wide wiring of settings, repository, and mediator.

use std::sync::Arc;

use anyhow::Context;
use once_cell::sync::OnceCell;
use shelf_kernel::{Mediator, Settings};

use crate::modules;
use crate::modules::books::repository::{BooksRepository, JsonBooksRepository};

static CONTAINER: OnceCell<Container> = OnceCell::new();

/// Everything a front-end needs to run catalog commands
#[derive(Debug)]
pub struct Container {
    settings: Settings,
    repository: Arc<JsonBooksRepository>,
    mediator: Mediator,
}

impl Container {
    /// Open the store selected by `test_mode` and register every handler
    pub fn build(settings: Settings, test_mode: bool) -> anyhow::Result<Self> {
        let path = settings.database_path(test_mode).to_path_buf();
        let repository = Arc::new(
            JsonBooksRepository::open(&path)
                .with_context(|| format!("failed to open books store at {}", path.display()))?,
        );

        let mut mediator = Mediator::new();
        modules::register_all(&mut mediator, repository.clone());

        tracing::info!(
            env = ?settings.environment,
            store = %path.display(),
            test_mode,
            "container built"
        );

        Ok(Self {
            settings,
            repository,
            mediator,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mediator(&self) -> &Mediator {
        &self.mediator
    }

    pub fn repository(&self) -> Arc<dyn BooksRepository> {
        self.repository.clone()
    }
}

/// Shared production container, built from loaded settings on first use
pub fn init_container() -> anyhow::Result<&'static Container> {
    CONTAINER.get_or_try_init(|| {
        let settings = Settings::load().with_context(|| "failed to load settings")?;
        Container::build(settings, false)
    })
}

/// Shared container built from the given settings on first use.
///
/// Later calls return the first container and ignore their arguments.
pub fn init_container_with(settings: Settings, test_mode: bool) -> anyhow::Result<&'static Container> {
    CONTAINER.get_or_try_init(|| Container::build(settings, test_mode))
}
