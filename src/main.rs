mod app;
mod config;
mod domain;
mod focus;
mod input;
mod notifications;
mod persistence;
mod session;
mod store;
mod ticker;
mod ui;

use anyhow::{Context, Result};
use app::{AppState, Storage};
use clap::{Parser, Subcommand};
use config::Config;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use persistence::{
    config_file, ensure_data_dir, init_local_data_dir, load_appearance, log_file, store_file,
    FileStore,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use session::Session;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use store::TaskStore;

#[derive(Parser)]
#[command(name = "pomodo")]
#[command(about = "A terminal task list with a built-in work/break focus timer", long_about = None)]
struct Cli {
    /// Use this data directory instead of discovering one
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log at info level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .pomodo directory in the current directory
    Init,
    /// Print the task list
    List,
    /// Add a task without opening the interface
    Add {
        /// Task text
        text: String,
    },
}

/// Where log lines go
enum LogTarget<'a> {
    Stderr,
    File(&'a Path),
}

fn init_tracing(verbose: bool, target: LogTarget) -> Result<()> {
    let level = if verbose { "info" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env("POMODO_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let result = match target {
        LogTarget::Stderr => builder.with_writer(io::stderr).try_init(),
        // The terminal belongs to the interface, so logs go to a file
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    result.map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

fn open_store(data_dir: &Path) -> TaskStore<Storage> {
    let storage: Storage = Box::new(FileStore::new(store_file(data_dir)));
    TaskStore::load(storage)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init) => {
            init_tracing(cli.verbose, LogTarget::Stderr)?;
            let cwd = std::env::current_dir()?;
            let data_dir = init_local_data_dir(&cwd)?;
            println!("Initialized pomodo directory: {}", data_dir.display());
            println!();
            println!("Pomodo will now use this local directory for task storage.");
            println!("Run 'pomodo' to start.");
            Ok(())
        }
        Some(Commands::List) => {
            init_tracing(cli.verbose, LogTarget::Stderr)?;
            let data_dir = ensure_data_dir(cli.data_dir.as_deref())?;
            let store = open_store(&data_dir);
            if store.is_empty() {
                println!("No tasks.");
            }
            for (idx, task) in store.tasks().iter().enumerate() {
                println!(
                    "{:>3}. {} {}",
                    idx + 1,
                    domain::checkbox(task.completed),
                    domain::task_label(task)
                );
            }
            Ok(())
        }
        Some(Commands::Add { text }) => {
            init_tracing(cli.verbose, LogTarget::Stderr)?;
            let data_dir = ensure_data_dir(cli.data_dir.as_deref())?;
            let mut store = open_store(&data_dir);
            store.add(&text)?;
            // The write-through only logs; retry once and report a failure
            store
                .flush()
                .with_context(|| format!("Task was not saved to {}", data_dir.display()))?;
            println!("Added: {}", text.trim());
            Ok(())
        }
        None => run_tui(cli.data_dir.as_deref(), cli.verbose),
    }
}

fn run_tui(data_dir_override: Option<&Path>, verbose: bool) -> Result<()> {
    let data_dir = ensure_data_dir(data_dir_override)?;
    init_tracing(verbose, LogTarget::File(&log_file(&data_dir)))?;
    tracing::info!(dir = %data_dir.display(), "using data directory");

    let config = Config::load(config_file(&data_dir));
    let store = open_store(&data_dir);
    let appearance = load_appearance(store.storage());
    let mut app = AppState::new(Session::new(store), config, appearance);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.session.flush();

    if let Err(err) = result {
        tracing::error!(error = %err, "interface stopped");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let tick_rate = ticker::tick_duration();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Handle events with timeout for ticking
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind == KeyEventKind::Press && input::handle_key(app, key)? {
                    return Ok(());
                }
            }
        }

        app.tick(Instant::now());
    }
}
