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

//! Input handling for the picker.
//!
//! Navigation keys move through the results, everything else is delegated to
//! the text input.

use crossterm::event::{Event, KeyCode, KeyModifiers};
use tui_input::backend::crossterm::EventHandler;

use crate::components::{Picker, PickerAction, at_last, select_next, select_previous};

impl Picker {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<PickerAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        let len = self.query.albums().len();

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Esc, _) => Some(PickerAction::Close),

            (KeyCode::Enter, _) => self.selected_album().cloned().map(PickerAction::Choose),

            (KeyCode::Down, _) => {
                select_next(&mut self.list_state, len);
                let at_end = at_last(&self.list_state, len);
                if at_end { self.load_more() } else { None }
            }
            (KeyCode::Up, _) => {
                select_previous(&mut self.list_state, len);
                None
            }

            (KeyCode::Char('n'), KeyModifiers::CONTROL) => self.load_more(),

            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(event);
                if self.input.value() == before {
                    return None;
                }

                self.list_state.select(None);
                self.query.set_text(self.input.value()).map(PickerAction::Fetch)
            }
        }
    }

    fn load_more(&mut self) -> Option<PickerAction> {
        self.query.begin_load().map(PickerAction::Fetch)
    }
}
