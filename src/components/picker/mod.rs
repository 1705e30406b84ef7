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

//! Album search modal.
//!
//! The picker owns its own [`CatalogQuery`], driven by a text input. Every
//! change to the text resets the query and starts a new search. Closing the
//! picker drops the query, so any load still in flight for it is ignored
//! when it completes.

mod event;
mod render;

use ratatui::widgets::ListState;
use tui_input::Input;

use crate::model::{
    AlbumRecord,
    catalog::{AlbumBatch, CatalogOwner, CatalogQuery, FetchRequest},
};

#[derive(Debug, PartialEq)]
pub(crate) enum PickerAction {
    Fetch(FetchRequest),
    Choose(AlbumRecord),
    Close,
}

pub(crate) struct Picker {
    pub(crate) input: Input,
    pub(crate) query: CatalogQuery,
    pub(crate) list_state: ListState,
}

impl Picker {
    /// Opens the picker with `text` already entered, returning the request
    /// for the first page of results.
    pub(crate) fn open(text: &str, year: i32, max_results: usize) -> (Self, Option<FetchRequest>) {
        let mut query = CatalogQuery::new(CatalogOwner::Picker, text, year, max_results);
        let request = query.begin_load();

        let picker = Self {
            input: Input::new(text.to_string()),
            query,
            list_state: ListState::default(),
        };

        (picker, request)
    }

    pub(crate) fn selected_album(&self) -> Option<&AlbumRecord> {
        let index = self.list_state.selected()?;
        self.query.albums().get(index)
    }

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

    pub(super) fn batch_for(picker: &Picker, ids: &[&str]) -> AlbumBatch {
        AlbumBatch {
            owner: CatalogOwner::Picker,
            generation: picker.query.generation(),
            albums: ids.iter().map(|id| test_album(id)).collect(),
            next_offset: 50,
            exhausted: false,
        }
    }

    #[test]
    fn opening_requests_prefilled_search() {
        let (picker, request) = Picker::open("blur", 2026, 1000);

        let request = request.unwrap();
        assert_eq!(request.owner, CatalogOwner::Picker);
        assert_eq!(request.search_expression(), "blur year:2026");
        assert_eq!(picker.input.value(), "blur");
        assert!(picker.query.is_loading());
    }

    #[test]
    fn first_batch_selects_first_result() {
        let (mut picker, _) = Picker::open("", 2026, 1000);

        assert!(picker.apply_batch(batch_for(&picker, &["A", "B"])));

        assert_eq!(picker.selected_album().map(|a| a.id.as_str()), Some("A"));
    }
}
