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

//! Album browser state.
//!
//! This module couples the browser's [`CatalogQuery`] with the list selection.
//! The browser query has no search text, it lists every full album released
//! in the year.

mod event;
mod render;

use ratatui::widgets::ListState;

use crate::model::{
    AlbumRecord,
    catalog::{AlbumBatch, CatalogOwner, CatalogQuery},
};

#[derive(Debug, PartialEq)]
pub(crate) enum AlbumListAction {
    /// Pick up the album to drop it on a rank.
    Grab(AlbumRecord),
    LoadMore,
}

pub(crate) struct AlbumList {
    pub(crate) query: CatalogQuery,
    pub(crate) list_state: ListState,
    pub(crate) is_active: bool,
}

impl AlbumList {
    pub(crate) fn new(year: i32, max_results: usize) -> Self {
        Self {
            query: CatalogQuery::new(CatalogOwner::Browser, "", year, max_results),
            list_state: ListState::default(),
            is_active: true,
        }
    }

    /// Starts over with a fresh query, dropping everything loaded so far.
    pub(crate) fn reset(&mut self, year: i32, max_results: usize) {
        self.query = CatalogQuery::new(CatalogOwner::Browser, "", year, max_results);
        self.list_state.select(None);
    }

    pub(crate) fn selected_album(&self) -> Option<&AlbumRecord> {
        let index = self.list_state.selected()?;
        self.query.albums().get(index)
    }

    /// Applies a batch, selecting the first album once there is one.
    pub(crate) fn apply_batch(&mut self, batch: AlbumBatch) -> bool {
        let applied = self.query.apply_batch(batch);
        if applied && self.list_state.selected().is_none() && !self.query.albums().is_empty() {
            self.list_state.select(Some(0));
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_album;

    pub(super) fn loaded_list(ids: &[&str]) -> AlbumList {
        let mut list = AlbumList::new(2026, 1000);
        let request = list.query.begin_load().unwrap();
        list.apply_batch(AlbumBatch {
            owner: request.owner,
            generation: request.generation,
            albums: ids.iter().map(|id| test_album(id)).collect(),
            next_offset: 50,
            exhausted: false,
        });
        list
    }

    #[test]
    fn first_batch_selects_first_album() {
        let list = loaded_list(&["A", "B"]);

        assert_eq!(list.selected_album().map(|a| a.id.as_str()), Some("A"));
    }

    #[test]
    fn reset_discards_albums_and_stale_batches() {
        let mut list = loaded_list(&["A"]);
        let stale_generation = list.query.generation();

        list.reset(2025, 1000);
        let applied = list.apply_batch(AlbumBatch {
            owner: CatalogOwner::Browser,
            generation: stale_generation,
            albums: vec![test_album("B")],
            next_offset: 100,
            exhausted: false,
        });

        assert!(!applied);
        assert!(list.query.albums().is_empty());
        assert_eq!(list.query.year(), 2025);
        assert_eq!(list.selected_album(), None);
    }
}
