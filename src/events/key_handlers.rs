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

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use crate::{
    App, Focus,
    events::{AppEvent, handlers::*},
    export::ExportTarget,
};

pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    let event = Event::Key(key);

    // The picker is modal.
    if let Some(picker) = app.picker.as_mut() {
        if let Some(action) = picker.process_event(&event) {
            handle_picker_action(app, action)?;
        }
        return Ok(());
    }

    if app.commander.handle_event(&event, &app.event_tx)? {
        return Ok(());
    }

    if app.show_help {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            app.show_help = false;
        }
        return Ok(());
    }

    if process_global_key_event(app, key)? {
        return Ok(());
    }

    match app.focus {
        Focus::Albums => {
            if let Some(action) = app.album_list.process_event(&event) {
                handle_album_list_action(app, action)?;
            }
        }
        Focus::Rankings => {
            if let Some(action) = app.ranking_view.process_event(&event) {
                handle_ranking_action(app, action)?;
            }
        }
    }

    Ok(())
}

/// Returns `true` if the key was a global shortcut.
fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => app.event_tx.send(AppEvent::ExitApplication)?,

        KeyCode::Tab | KeyCode::BackTab => match app.focus {
            Focus::Albums => focus_rankings(app),
            Focus::Rankings => focus_albums(app),
        },

        KeyCode::Char('d') => app.event_tx.send(AppEvent::ToggleDarkMode)?,
        KeyCode::Char('e') => app.event_tx.send(AppEvent::Export(ExportTarget::Download))?,
        KeyCode::Char('s') => app.event_tx.send(AppEvent::Export(ExportTarget::Share))?,
        KeyCode::Char('?') => app.show_help = true,

        // Search for an album to put in the selected rank.
        KeyCode::Char('a') => {
            let index = app.ranking_view.selected();
            handle_open_picker(app, index, "")?;
        }

        _ => return Ok(false),
    }

    Ok(true)
}
