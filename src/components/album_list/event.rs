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

//! Input handling for the album browser.
//!
//! Moving onto the last album asks for more, the same as pressing `m`, so
//! scrolling down keeps the list growing until the catalog runs out.

use crossterm::event::{Event, KeyCode};

use crate::components::{AlbumList, AlbumListAction, at_last, select_next, select_previous};

impl AlbumList {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<AlbumListAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        let len = self.query.albums().len();

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => {
                select_next(&mut self.list_state, len);
                self.load_more_at_end()
            }
            KeyCode::Char('k') | KeyCode::Up => {
                select_previous(&mut self.list_state, len);
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.list_state.select((len > 0).then_some(0));
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.list_state.select(len.checked_sub(1));
                self.load_more_at_end()
            }

            KeyCode::Char(' ') => self.selected_album().cloned().map(AlbumListAction::Grab),

            KeyCode::Char('m') => self.query.can_load_more().then_some(AlbumListAction::LoadMore),

            _ => None,
        }
    }

    fn load_more_at_end(&self) -> Option<AlbumListAction> {
        let at_end = at_last(&self.list_state, self.query.albums().len());
        (at_end && self.query.can_load_more()).then_some(AlbumListAction::LoadMore)
    }
}
