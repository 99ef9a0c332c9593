mod app;
mod config;
mod domain;
mod input;
mod logging;
mod persistence;
mod ticker;
mod ui;

use anyhow::Result;
use app::AppState;
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::HISTORY_DISPLAY_LIMIT;
use persistence::{init_local_dir, Storage};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "ticklist")]
#[command(about = "A terminal todo list with a session stopwatch and an action history", long_about = None)]
struct Cli {
    /// Data directory (overrides TICKLIST_DIR and any local .ticklist directory)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .ticklist directory in the current directory
    Init,
    /// Add a task without opening the UI
    Add {
        /// Task text
        text: String,
    },
    /// Print all tasks
    List,
    /// Print recent history, newest first
    History {
        /// Number of entries to show
        #[arg(short, long, default_value_t = HISTORY_DISPLAY_LIMIT)]
        limit: usize,
    },
    /// Clear the history log
    ClearHistory,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        let dir = init_local_dir()?;
        println!("Initialized ticklist directory: {}", dir.display());
        println!();
        println!("Ticklist will now use this local directory for its data.");
        println!("Run 'ticklist' to start.");
        return Ok(());
    }

    let config = Config::resolve(cli.dir)?;
    let storage = Storage::open(&config.data_dir);
    // An unusable data directory has nowhere to hold the log either
    if !storage.is_degraded() {
        logging::init_tracing(&config.log_file());
    }

    let mut app = AppState::load(storage);

    match cli.command {
        Some(Commands::Add { text }) => {
            if app.add_todo(&text) {
                println!("Added: {}", text.trim());
            } else {
                anyhow::bail!("Task text must not be empty");
            }
        }
        Some(Commands::List) => {
            if app.todos.is_empty() {
                println!("No tasks yet.");
            }
            for todo in app.todos.todos() {
                let mark = if todo.completed { "x" } else { " " };
                println!("[{}] {}  {}", mark, todo.id, todo.text);
            }
        }
        Some(Commands::History { limit }) => {
            if app.history.is_empty() {
                println!("No history yet.");
            }
            for entry in app.history.recent(limit) {
                let when = entry.timestamp.with_timezone(&chrono::Local);
                println!("{}  {}", when.format("%Y-%m-%d %H:%M:%S"), entry.action);
            }
        }
        Some(Commands::ClearHistory) => {
            app.clear_history();
            println!("History cleared.");
        }
        Some(Commands::Init) | None => run_tui(&mut app, &config)?,
    }

    Ok(())
}

fn run_tui(app: &mut AppState, config: &Config) -> Result<()> {
    eprintln!("Using ticklist directory: {}", config.data_dir.display());
    if !app.is_persisting() {
        eprintln!("Warning: data directory is not writable, changes will not be saved");
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.shutdown(Instant::now());

    if let Err(err) = &result {
        tracing::error!(error = %err, "event loop failed");
    }
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Wake up for the next stopwatch tick or the default poll interval, whichever is first
        let now = Instant::now();
        let timeout = app
            .stopwatch
            .until_next_tick(now)
            .map_or(ticker::tick_duration(), |next| next.min(ticker::tick_duration()));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Ticks that fell due while waiting land before the key is handled
                let now = Instant::now();
                app.tick(now);
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key, now) {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}
