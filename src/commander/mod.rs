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

//! Command-line input logic and state management.
//!
//! This module implements the `:` command line, handling a text input
//! component and dispatching the corresponding application event when a
//! command is submitted.
//!
//! # Commands
//!
//! * `q` - quit.
//! * `search <text>` - open the picker for the selected rank with `text`.
//! * `more` - load more albums into the browser.
//! * `export`, `share` - export the ranking image.
//! * `dark` - toggle dark mode.
//! * `clear` - empty every rank.
//! * `del <n>` - empty rank `n`.
//! * `year <y>` - browse albums released in year `y`.
//! * `help` - show the how-to overlay.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{events::AppEvent, export::ExportTarget};

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    /// Returns `true` if the event was consumed by the command line.
    pub(crate) fn handle_event(
        &mut self,
        event: &Event,
        event_tx: &Sender<AppEvent>,
    ) -> Result<bool> {
        let Event::Key(key_event) = event else {
            return Ok(false);
        };

        if !self.active {
            if key_event.code == KeyCode::Char(':') {
                self.active = true;
                return Ok(true);
            }
            return Ok(false);
        }

        match key_event.code {
            KeyCode::Esc => {
                self.input.reset();
                self.active = false;
            }

            KeyCode::Enter => {
                let buffer = self.input.value().trim().to_string();
                self.input.reset();
                self.active = false;
                if !buffer.is_empty() {
                    event_tx.send(parse_command(&buffer))?;
                }
            }

            // Delegate all other key events to the managed input component.
            _ => {
                self.input.handle_event(event);
            }
        }

        Ok(true)
    }
}

/// Maps a command line to the event it triggers. Invalid commands become an
/// error event so the reason shows in the status line.
fn parse_command(buffer: &str) -> AppEvent {
    let parts: Vec<&str> = buffer.split_whitespace().collect();

    match parts.as_slice() {
        ["q"] | ["quit"] => AppEvent::ExitApplication,

        ["search", text @ ..] => AppEvent::OpenPicker(text.join(" ")),

        ["more"] => AppEvent::LoadMore,

        ["export"] => AppEvent::Export(ExportTarget::Download),
        ["share"] => AppEvent::Export(ExportTarget::Share),

        ["dark"] => AppEvent::ToggleDarkMode,

        ["clear"] => AppEvent::ClearRankings,

        ["del", rank] => match rank.parse::<usize>() {
            Ok(rank) if rank > 0 => AppEvent::DeleteRank(rank),
            _ => AppEvent::Error(format!("Not a rank: {}", rank)),
        },

        ["year", year] => match year.parse::<i32>() {
            Ok(year) if (1900..=9999).contains(&year) => AppEvent::SetYear(year),
            _ => AppEvent::Error(format!("Not a year: {}", year)),
        },

        ["help"] => AppEvent::ShowHelp,

        [cmd, ..] => AppEvent::Error(format!("Unknown command: {}", cmd)),

        [] => AppEvent::Tick,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_command(commander: &mut Commander, tx: &Sender<AppEvent>, text: &str) {
        commander.handle_event(&key(KeyCode::Char(':')), tx).unwrap();
        for c in text.chars() {
            commander.handle_event(&key(KeyCode::Char(c)), tx).unwrap();
        }
        commander.handle_event(&key(KeyCode::Enter), tx).unwrap();
    }

    #[test]
    fn ignores_keys_until_activated() {
        let (tx, _rx) = mpsc::channel();
        let mut commander = Commander::new();

        assert!(!commander.handle_event(&key(KeyCode::Char('q')), &tx).unwrap());
        assert!(commander.handle_event(&key(KeyCode::Char(':')), &tx).unwrap());
        assert!(commander.active());
        assert!(commander.handle_event(&key(KeyCode::Char('q')), &tx).unwrap());
    }

    #[test]
    fn submitting_sends_event_and_deactivates() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();

        type_command(&mut commander, &tx, "del 3");

        assert!(matches!(rx.try_recv(), Ok(AppEvent::DeleteRank(3))));
        assert!(!commander.active());
        assert_eq!(commander.input.value(), "");
    }

    #[test]
    fn escape_discards_input() {
        let (tx, rx) = mpsc::channel();
        let mut commander = Commander::new();
        commander.handle_event(&key(KeyCode::Char(':')), &tx).unwrap();
        commander.handle_event(&key(KeyCode::Char('q')), &tx).unwrap();

        commander.handle_event(&key(KeyCode::Esc), &tx).unwrap();

        assert!(!commander.active());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn parses_commands() {
        assert!(matches!(parse_command("q"), AppEvent::ExitApplication));
        assert!(matches!(parse_command("more"), AppEvent::LoadMore));
        assert!(matches!(parse_command("share"), AppEvent::Export(ExportTarget::Share)));
        assert!(matches!(parse_command("export"), AppEvent::Export(ExportTarget::Download)));
        assert!(matches!(parse_command("year 2024"), AppEvent::SetYear(2024)));
        assert!(matches!(parse_command("clear"), AppEvent::ClearRankings));

        match parse_command("search the  good the bad") {
            AppEvent::OpenPicker(text) => assert_eq!(text, "the good the bad"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn invalid_arguments_become_errors() {
        assert!(matches!(parse_command("del 0"), AppEvent::Error(_)));
        assert!(matches!(parse_command("del two"), AppEvent::Error(_)));
        assert!(matches!(parse_command("year 20"), AppEvent::Error(_)));
        assert!(matches!(parse_command("frobnicate"), AppEvent::Error(_)));
    }
}
