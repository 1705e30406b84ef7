// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

mod commander;
mod components;
mod config;
mod events;
mod export;
mod model;
mod render;
mod spotify;
mod store;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use rusqlite::Connection;
use std::{
    fs::{self, File},
    io::{self},
    sync::{
        Mutex,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::{
    commander::Commander,
    components::{AlbumList, Picker, RankingView},
    config::AppConfig,
    events::{AppEvent, Status, process_events},
    tasks::{AppTask, spawn_task_worker},
    theme::Theme,
};

const LOG_FILE_NAME: &str = "albumrank.log";
const STORE_FILE_NAME: &str = "albumrank.db";

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Albums,
    Rankings,
}

struct App {
    pub config: AppConfig,
    pub year: i32,

    pub dark_mode: bool,
    pub theme: Theme,
    pub focus: Focus,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub store: Connection,

    pub album_list: AlbumList,
    pub ranking_view: RankingView,
    pub picker: Option<Picker>,

    pub commander: Commander,
    pub show_help: bool,
    pub status: Option<Status>,
}

impl App {
    /// Create a new instance of application state, restoring the ranking and
    /// the dark mode preference from the store.
    pub fn new(config: AppConfig, store: Connection, task_tx: Sender<AppTask>) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        let year = config.year();
        let rankings = store::load_rankings(&store, config.slot_count());
        let dark_mode = store::load_dark_mode(&store);

        Self {
            album_list: AlbumList::new(year, config.max_results as usize),
            ranking_view: RankingView::new(rankings),
            config,
            year,
            dark_mode,
            theme: Theme::for_mode(dark_mode),
            focus: Focus::Albums,
            event_tx,
            event_rx,
            task_tx,
            store,
            picker: None,
            commander: Commander::new(),
            show_help: false,
            status: None,
        }
    }
}

fn main() -> Result<()> {
    let config = config::load_config();

    let data_dir = config::data_dir();
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

    init_logging(&data_dir.join(LOG_FILE_NAME));

    let store = store::open_store(&data_dir.join(STORE_FILE_NAME))?;

    let credentials = config::load_credentials();
    if credentials.is_empty() {
        warn!("No Spotify credentials configured, album searches will fail");
    }

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, store, task_tx);
    info!("Starting, browsing albums of {}", app.year);

    spawn_task_worker(&app.config, credentials, task_rx, app.event_tx.clone())
        .context("Failed to initalise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Logs go to a file, the terminal belongs to the UI. Failing to open the log
/// file only loses the log.
fn init_logging(path: &std::path::Path) {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
            return;
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    util::term::apply_theme_bg(&app.theme);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                tx_keys.send(AppEvent::Key(key)).ok();
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(Duration::from_millis(250));
        }
    });

    // Initial trigger to populate the album browser
    app.event_tx.send(AppEvent::LoadMore)?;

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
