use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shelf_app::books::commands::{
    AddBookCommand, DeleteBookCommand, FindBookCommand, GetBooksCommand,
    UpdateBookStatusCommand,
};
use shelf_app::books::converters::BookDocument;
use shelf_app::books::Book;
use shelf_app::utils::render_book;
use shelf_kernel::settings::Settings;

/// Scripted access to the book catalog
#[derive(Debug, Parser)]
#[command(name = "shelf-cli", version, about)]
struct Cli {
    /// Use the test store instead of the normal one
    #[arg(long, global = true)]
    test_mode: bool,

    /// Store file to use, overriding configuration
    #[arg(long, global = true, value_name = "PATH")]
    database: Option<PathBuf>,

    /// Print books as JSON documents
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show every book
    List,
    /// Add a book
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        year: String,
    },
    /// Delete a book by ID
    Delete { oid: String },
    /// Find books; title and author match case-insensitive substrings
    Find {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        year: Option<String>,
        /// Only books that are available
        #[arg(long, conflicts_with = "checked_out")]
        available: bool,
        /// Only books that are checked out
        #[arg(long)]
        checked_out: bool,
    },
    /// Flip a book between available and checked out
    Toggle { oid: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load shelf settings")?;
    shelf_telemetry::init(&settings.telemetry)?;

    if let Some(path) = cli.database.clone() {
        if cli.test_mode {
            settings.storage.test_database_path = path;
        } else {
            settings.storage.database_path = path;
        }
    }

    let container = shelf_app::init_container_with(settings, cli.test_mode)?;
    let mediator = container.mediator();

    tracing::debug!(command = ?cli.command, "running cli command");

    match cli.command {
        Commands::List => {
            let books = mediator.handle_first(&GetBooksCommand)?;
            print_books(&books, cli.json)?;
        }
        Commands::Add {
            title,
            author,
            year,
        } => {
            let book = mediator.handle_first(&AddBookCommand::new(title, author, year))?;
            print_books(std::slice::from_ref(&book), cli.json)?;
        }
        Commands::Delete { oid } => {
            mediator.handle_first(&DeleteBookCommand::new(oid.as_str()))?;
            println!("Deleted {}", oid);
        }
        Commands::Find {
            title,
            author,
            year,
            available,
            checked_out,
        } => {
            let status = match (available, checked_out) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let books = mediator.handle_first(&FindBookCommand {
                title,
                author,
                year,
                status,
            })?;
            print_books(&books, cli.json)?;
        }
        Commands::Toggle { oid } => {
            let book = mediator.handle_first(&UpdateBookStatusCommand::new(oid))?;
            print_books(std::slice::from_ref(&book), cli.json)?;
        }
    }

    Ok(())
}

fn print_books(books: &[Book], json: bool) -> anyhow::Result<()> {
    if json {
        let documents: Vec<BookDocument> = books.iter().map(BookDocument::from).collect();
        println!("{}", serde_json::to_string_pretty(&documents)?);
        return Ok(());
    }

    let rendered: Vec<String> = books.iter().map(render_book).collect();
    if !rendered.is_empty() {
        println!("{}", rendered.join("\n\n"));
    }
    Ok(())
}
