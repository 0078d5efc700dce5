//! tinvoice - Terminal Invoicing
//!
//! A terminal front end for keeping business contacts and starting
//! invoices: browse and delete contacts, fill in the sender details and
//! move on through the invoice wizard. State is kept in a JSON data file.

use std::io;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing::info;

use tinvoice::application::{App, AppMode, MemoryStore};
use tinvoice::infrastructure::{init_file_logging, Cli, Commands, ContactCsv, FileRepository, Settings};
use tinvoice::presentation::{render_ui, InputHandler};

/// Entry point.
///
/// Resolves settings, starts file logging and loads the data file, then
/// either runs a one-shot command or the terminal interface.
///
/// # Errors
///
/// Returns an error if the data file cannot be read, a CSV command fails,
/// or the terminal cannot be set up.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli)?;
    init_file_logging(&settings.log_file)?;
    info!(data = %settings.data_file.display(), "starting");

    let mut store = MemoryStore::from_snapshot(FileRepository::load_store(&settings.data_file)?);

    match cli.command {
        Some(Commands::Import { path }) => {
            let summary = ContactCsv::import(&mut store, &path)?;
            FileRepository::save_store(&store.snapshot(), &settings.data_file)?;
            println!(
                "Imported {} contacts ({} skipped) into {}",
                summary.imported,
                summary.skipped,
                settings.data_file.display()
            );
            Ok(())
        }
        Some(Commands::Export { path }) => {
            let count = ContactCsv::export(&store, &path)?;
            println!("Exported {} contacts to {}", count, path.display());
            Ok(())
        }
        None => run_tui(App::new(store, Some(settings.data_file))),
    }
}

fn run_tui(mut app: App) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }
    info!("exiting");

    Ok(())
}

/// Main event loop: draw, read a key, dispatch it.
/// Runs until the user presses 'q' in normal mode.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if app.mode() == AppMode::Normal => return Ok(()),
                    _ => InputHandler::handle_key_event(app, key.code, key.modifiers),
                }
            }
        }
    }
}
