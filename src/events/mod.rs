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

//! Application logic, event handling, and command dispatching.
//!
//! This module acts as the central hub for the "Controller" logic of the
//! application. Every input, from the keyboard, the tick thread, the command
//! line or the task worker, arrives as an [`AppEvent`] on one channel and is
//! applied to the [`App`] on the main thread, in arrival order.
//!
//! # Organization
//!
//! * [`key_handlers`]: Routes key presses to the modal views, the global
//!   shortcuts and the focused pane.
//! * [`handlers`]: Applies events and component actions to the application
//!   state, persisting the ranking after every accepted change.

mod handlers;
mod key_handlers;

use handlers::*;
use key_handlers::process_key_event;

use std::io::Stdout;

use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App,
    export::{ExportOutcome, ExportTarget},
    model::catalog::{AlbumBatch, CatalogOwner},
    render::draw,
    util,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    AlbumsFetched(AlbumBatch),
    AlbumsFetchFailed {
        owner: CatalogOwner,
        generation: u64,
        message: String,
    },
    LoadMore,

    /// Opens the picker on the selected rank with the given search text.
    OpenPicker(String),

    Export(ExportTarget),
    ExportFinished(Result<ExportOutcome, String>),

    ClearRankings,
    /// Empties a rank, 1-based.
    DeleteRank(usize),

    SetYear(i32),
    ToggleDarkMode,
    ShowHelp,

    Tick,

    ExitApplication,

    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// The message shown in the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Status {
    pub(crate) level: StatusLevel,
    pub(crate) text: String,
}

/// Runs the main application loop, handling events and rendering the UI in the
/// terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    terminal.draw(|f| draw(f, app))?;

    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        let dark_mode = app.dark_mode;

        handle_event(app, event)?;

        if app.dark_mode != dark_mode {
            util::term::apply_theme_bg(&app.theme);
        }

        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}

/// Applies one event to the application state.
pub(crate) fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => process_key_event(app, key)?,
        AppEvent::AlbumsFetched(batch) => handle_albums_fetched(app, batch),
        AppEvent::AlbumsFetchFailed {
            owner,
            generation,
            message,
        } => handle_albums_fetch_failed(app, owner, generation, message),
        AppEvent::LoadMore => handle_load_more(app)?,
        AppEvent::OpenPicker(text) => {
            let index = app.ranking_view.selected();
            handle_open_picker(app, index, &text)?
        }
        AppEvent::Export(target) => handle_export(app, target)?,
        AppEvent::ExportFinished(result) => handle_export_finished(app, result),
        AppEvent::ClearRankings => handle_clear_rankings(app),
        AppEvent::DeleteRank(rank) => handle_delete(app, rank.saturating_sub(1)),
        AppEvent::SetYear(year) => handle_set_year(app, year)?,
        AppEvent::ToggleDarkMode => handle_toggle_dark_mode(app),
        AppEvent::ShowHelp => app.show_help = true,
        AppEvent::Error(message) => set_status(app, StatusLevel::Error, message),
        AppEvent::Tick | AppEvent::ExitApplication => {}
    }

    Ok(())
}
