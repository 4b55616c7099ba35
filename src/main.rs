use anyhow::Context;
use shelf_app::menu::{Console, Menu};
use shelf_kernel::settings::Settings;

fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load shelf settings")?;
    shelf_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        store = %settings.database_path(false).display(),
        "shelf starting"
    );

    let container = shelf_app::init_container_with(settings, false)?;
    let mut console = Console::stdio();
    Menu::new(container.mediator()).run(&mut console)?;

    tracing::info!("shelf stopped");
    Ok(())
}
