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

//! Ranking view state.
//!
//! This module holds the [`Rankings`] being edited, the slot selection, and
//! the album currently held for a keyboard drag. A held album is either one
//! grabbed from the album browser or one picked up from a slot; dropping it
//! on the selected slot becomes a [`RankingAction::Drop`].

mod event;
mod render;

use ratatui::widgets::ListState;

use crate::model::ranking::{DropPayload, Rankings};

#[derive(Debug, PartialEq)]
pub(crate) enum RankingAction {
    Drop { index: usize, payload: DropPayload },
    Delete(usize),
    OpenPicker(usize),
}

pub(crate) struct RankingView {
    pub(crate) rankings: Rankings,
    pub(crate) list_state: ListState,
    pub(crate) held: Option<DropPayload>,
    pub(crate) is_active: bool,
}

impl RankingView {
    pub(crate) fn new(rankings: Rankings) -> Self {
        Self {
            rankings,
            list_state: ListState::default().with_selected(Some(0)),
            held: None,
            is_active: false,
        }
    }

    pub(crate) fn selected(&self) -> usize {
        self.list_state
            .selected()
            .unwrap_or(0)
            .min(self.rankings.len().saturating_sub(1))
    }

    pub(crate) fn select(&mut self, index: usize) {
        if index < self.rankings.len() {
            self.list_state.select(Some(index));
        }
    }

    pub(crate) fn hold(&mut self, payload: DropPayload) {
        self.held = Some(payload);
    }

    /// The name of the held album, for display.
    pub(crate) fn held_name(&self) -> Option<&str> {
        match self.held.as_ref()? {
            DropPayload::Unranked(album) => Some(album.name.as_str()),
            DropPayload::Ranked(index) => self.rankings.get(*index).map(|a| a.name.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_album;

    #[test]
    fn held_name_follows_payload() {
        let mut rankings = Rankings::new(3);
        rankings.insert_at(2, test_album("C")).unwrap();
        let mut view = RankingView::new(rankings);

        assert_eq!(view.held_name(), None);

        view.hold(DropPayload::Ranked(2));
        assert_eq!(view.held_name(), Some("Album C"));

        view.hold(DropPayload::Unranked(test_album("X")));
        assert_eq!(view.held_name(), Some("Album X"));
    }

    #[test]
    fn selection_stays_in_range() {
        let mut view = RankingView::new(Rankings::new(3));

        view.select(7);
        assert_eq!(view.selected(), 0);

        view.select(2);
        assert_eq!(view.selected(), 2);
    }
}
