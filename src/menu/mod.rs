//! Interactive numbered menu over the catalog commands.

pub mod console;
pub mod items;

use std::io;

use shelf_kernel::Mediator;

pub use console::{Console, Input};
pub use items::menu_items;

/// What the menu does after an item finishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One entry of the main menu
pub trait MenuItem {
    fn label(&self) -> &'static str;

    fn handle(&self, console: &mut Console<'_>, mediator: &Mediator) -> anyhow::Result<Flow>;
}

pub struct Menu<'m> {
    items: Vec<Box<dyn MenuItem>>,
    mediator: &'m Mediator,
}

impl<'m> Menu<'m> {
    pub fn new(mediator: &'m Mediator) -> Self {
        Self {
            items: menu_items(),
            mediator,
        }
    }

    pub fn labels(&self) -> Vec<&'static str> {
        self.items.iter().map(|item| item.label()).collect()
    }

    /// Show the menu until the user exits or input ends
    pub fn run(&self, console: &mut Console<'_>) -> anyhow::Result<()> {
        loop {
            console.blank()?;
            for (index, item) in self.items.iter().enumerate() {
                console.say(format_args!("{} - {}", index, item.label()))?;
            }
            console.prompt("Choose a menu item (enter \"x\" at any step to come back here): ")?;

            let Some(line) = console.read_line()? else {
                tracing::debug!("input closed, leaving menu");
                return Ok(());
            };

            let choice = match line.trim().parse::<usize>() {
                Ok(choice) => choice,
                Err(_) => {
                    console.blank()?;
                    console.say("Menu item must be an integer")?;
                    continue;
                }
            };

            let Some(item) = self.items.get(choice) else {
                console.blank()?;
                console.say("No such menu item")?;
                continue;
            };

            match item.handle(console, self.mediator) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => return Ok(()),
                Err(err) if err.downcast_ref::<io::Error>().is_some() => return Err(err),
                Err(err) => {
                    tracing::error!(item = item.label(), error = %err, "menu item failed");
                    console.blank()?;
                    console.say(format_args!("Error: {:#}", err))?;
                }
            }
        }
    }
}
