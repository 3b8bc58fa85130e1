use anyhow::Result;
use blockline_config::{Config, EditorConfig};
use blockline_engine::io;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

mod app;
mod native;
mod view;

use app::App;

const DEFAULT_PAGE: &str = "index";

fn main() -> Result<()> {
    // Logs go to stderr; redirect it to keep them off the screen
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    // Determine pages path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) if args.len() == 1 => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Usage: {} <pages-folder-path> [page]", args[0]);
            process::exit(1);
        }
        Err(e) => {
            log::warn!("Ignoring unreadable config file: {e}");
            None
        }
    };
    let editor = config
        .as_ref()
        .map(|config| config.editor)
        .unwrap_or_default();

    let (pages_path, from_config, page) = match args.len() {
        // CLI arguments provided - use them
        2 | 3 => (
            PathBuf::from(&args[1]),
            false,
            args.get(2).cloned().unwrap_or_else(|| DEFAULT_PAGE.to_string()),
        ),
        1 => match config {
            Some(config) => (config.pages_path, true, DEFAULT_PAGE.to_string()),
            None => {
                eprintln!("Error: No pages path provided and no config file found");
                eprintln!("Usage: {} <pages-folder-path> [page]", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage: {} [pages-folder-path] [page]", args[0]);
            process::exit(1);
        }
    };

    if let Err(e) = io::validate_pages_dir(&pages_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Pages path '{}'{} is invalid: {e}",
            pages_path.display(),
            source
        );
        process::exit(1);
    }

    run(pages_path, &page, &editor)
}

fn run(pages_path: PathBuf, page: &str, editor: &EditorConfig) -> Result<()> {
    let mut app = App::new(pages_path, page, editor)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| view::draw(f, app))?;

        // A block entered editing during the last event; now that it has
        // been laid out its caret can be placed, then drawn again.
        if app.place_pending_caret() {
            continue;
        }
        if app.should_quit {
            return Ok(());
        }

        match event::read()? {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            _ => {}
        }
    }
}
