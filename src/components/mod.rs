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

//! Interactive views.
//!
//! Each component keeps its own state, maps raw key events to navigation
//! internally, and reports anything the rest of the application must act on
//! as an action value. Components never send tasks or touch the store.
//!
//! * [`AlbumList`]: the browsable list of albums released in the year.
//! * [`RankingView`]: the ranked slots and the album currently held.
//! * [`Picker`]: the search modal used to fill one slot directly.

mod album_list;
mod picker;
mod ranking;

pub(crate) use album_list::{AlbumList, AlbumListAction};
pub(crate) use picker::{Picker, PickerAction};
pub(crate) use ranking::{RankingAction, RankingView};

use ratatui::widgets::ListState;

/// Moves the selection down, wrapping to the top.
fn select_next(state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) if i + 1 < len => i + 1,
        Some(_) => 0,
        None => 0,
    };
    state.select(Some(i));
}

/// Moves the selection up, wrapping to the bottom.
fn select_previous(state: &mut ListState, len: usize) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(0) => len - 1,
        Some(i) => i - 1,
        None => 0,
    };
    state.select(Some(i));
}

/// Whether the selection sits on the last row.
fn at_last(state: &ListState, len: usize) -> bool {
    len > 0 && state.selected() == Some(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_wraps_both_ways() {
        let mut state = ListState::default();

        select_next(&mut state, 3);
        assert_eq!(state.selected(), Some(0));
        select_previous(&mut state, 3);
        assert_eq!(state.selected(), Some(2));
        assert!(at_last(&state, 3));
        select_next(&mut state, 3);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn empty_list_has_no_selection() {
        let mut state = ListState::default();

        select_next(&mut state, 0);
        select_previous(&mut state, 0);

        assert_eq!(state.selected(), None);
        assert!(!at_last(&state, 0));
    }
}
