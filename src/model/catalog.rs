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

//! Catalog query state.
//!
//! This module provides the state for one active album search: the albums
//! accumulated so far, the pagination cursor, and the loading, exhaustion and
//! error flags.
//!
//! The network work itself happens on the task worker. A [`CatalogQuery`]
//! hands out [`FetchRequest`]s and later applies the matching [`AlbumBatch`]
//! or failure. Every request carries the generation of the query that issued
//! it, so results for a query that has since been reset or dropped are
//! ignored.

use std::{
    collections::HashSet,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::model::AlbumRecord;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Which view a query feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CatalogOwner {
    Browser,
    Picker,
}

/// Parameters for one logical load on the task worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FetchRequest {
    pub(crate) owner: CatalogOwner,
    pub(crate) generation: u64,
    pub(crate) text: String,
    pub(crate) year: i32,
    pub(crate) offset: u32,
}

impl FetchRequest {
    /// The search expression, free text followed by the year filter.
    pub(crate) fn search_expression(&self) -> String {
        let text = self.text.trim();
        if text.is_empty() {
            format!("year:{}", self.year)
        } else {
            format!("{} year:{}", text, self.year)
        }
    }
}

/// The result of one logical load.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AlbumBatch {
    pub(crate) owner: CatalogOwner,
    pub(crate) generation: u64,
    pub(crate) albums: Vec<AlbumRecord>,
    pub(crate) next_offset: u32,
    pub(crate) exhausted: bool,
}

#[derive(Debug)]
pub(crate) struct CatalogQuery {
    owner: CatalogOwner,
    text: String,
    year: i32,
    generation: u64,
    max_results: usize,

    albums: Vec<AlbumRecord>,
    seen: HashSet<String>,
    offset: u32,
    exhausted: bool,
    loading: bool,
    error: Option<String>,
}

impl CatalogQuery {
    pub(crate) fn new(owner: CatalogOwner, text: &str, year: i32, max_results: usize) -> Self {
        Self {
            owner,
            text: text.to_string(),
            year,
            generation: next_generation(),
            max_results,
            albums: vec![],
            seen: HashSet::new(),
            offset: 0,
            exhausted: false,
            loading: false,
            error: None,
        }
    }

    pub(crate) fn albums(&self) -> &[AlbumRecord] {
        &self.albums
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub(crate) fn offset(&self) -> u32 {
        self.offset
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub(crate) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a "load more" would do anything right now.
    pub(crate) fn can_load_more(&self) -> bool {
        !self.loading && !self.exhausted && self.albums.len() < self.max_results
    }

    /// Starts the next load, if one is allowed.
    ///
    /// Returns `None` while a load is already in flight, once the upstream is
    /// exhausted, or once the accumulated results reach the hard cap.
    pub(crate) fn begin_load(&mut self) -> Option<FetchRequest> {
        if !self.can_load_more() {
            return None;
        }

        self.loading = true;
        self.error = None;

        Some(FetchRequest {
            owner: self.owner,
            generation: self.generation,
            text: self.text.clone(),
            year: self.year,
            offset: self.offset,
        })
    }

    /// Replaces the search text, discarding everything fetched so far, and
    /// starts loading from the first page.
    ///
    /// Any load still in flight for the old text becomes stale.
    pub(crate) fn set_text(&mut self, text: &str) -> Option<FetchRequest> {
        self.text = text.to_string();
        self.generation = next_generation();
        self.albums.clear();
        self.seen.clear();
        self.offset = 0;
        self.exhausted = false;
        self.loading = false;
        self.error = None;

        self.begin_load()
    }

    /// Appends a batch, keeping the first occurrence of each album.
    ///
    /// Returns `false`, changing nothing, if the batch belongs to another
    /// query or an earlier generation of this one.
    pub(crate) fn apply_batch(&mut self, batch: AlbumBatch) -> bool {
        if batch.owner != self.owner || batch.generation != self.generation {
            return false;
        }

        for album in batch.albums {
            if self.seen.insert(album.id.clone()) {
                self.albums.push(album);
            }
        }

        self.offset = self.offset.max(batch.next_offset);
        self.exhausted |= batch.exhausted;
        self.loading = false;

        true
    }

    /// Records a failed load, keeping the albums accumulated so far.
    pub(crate) fn apply_failure(
        &mut self,
        owner: CatalogOwner,
        generation: u64,
        message: String,
    ) -> bool {
        if owner != self.owner || generation != self.generation {
            return false;
        }

        self.error = Some(message);
        self.loading = false;

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_album;

    fn batch_for(
        query: &CatalogQuery,
        ids: &[&str],
        next_offset: u32,
        exhausted: bool,
    ) -> AlbumBatch {
        AlbumBatch {
            owner: CatalogOwner::Browser,
            generation: query.generation(),
            albums: ids.iter().map(|id| test_album(id)).collect(),
            next_offset,
            exhausted,
        }
    }

    fn ids(query: &CatalogQuery) -> Vec<&str> {
        query.albums().iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn search_expression_includes_year_filter() {
        let mut query = CatalogQuery::new(CatalogOwner::Picker, "  radiohead ", 2026, 1000);
        let request = query.begin_load().unwrap();
        assert_eq!(request.search_expression(), "radiohead year:2026");

        let request = query.set_text("").unwrap();
        assert_eq!(request.search_expression(), "year:2026");
    }

    #[test]
    fn overlapping_pages_are_deduplicated_in_first_seen_order() {
        let mut query = CatalogQuery::new(CatalogOwner::Browser, "", 2026, 1000);

        query.begin_load().unwrap();
        assert!(query.apply_batch(batch_for(&query, &["a", "b", "c"], 50, false)));
        query.begin_load().unwrap();
        assert!(query.apply_batch(batch_for(&query, &["c", "d", "a", "e"], 100, false)));

        assert_eq!(ids(&query), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(query.offset(), 100);
    }

    #[test]
    fn exhaustion_makes_load_more_a_no_op() {
        let mut query = CatalogQuery::new(CatalogOwner::Browser, "", 2026, 1000);

        query.begin_load().unwrap();
        query.apply_batch(batch_for(&query, &["a"], 50, true));

        assert!(query.is_exhausted());
        assert_eq!(query.begin_load(), None);
        assert_eq!(ids(&query), vec!["a"]);
    }

    #[test]
    fn load_more_is_refused_while_in_flight() {
        let mut query = CatalogQuery::new(CatalogOwner::Browser, "", 2026, 1000);

        assert!(query.begin_load().is_some());
        assert!(query.is_loading());
        assert_eq!(query.begin_load(), None);
    }

    #[test]
    fn load_more_stops_at_hard_cap() {
        let mut query = CatalogQuery::new(CatalogOwner::Browser, "", 2026, 2);

        query.begin_load().unwrap();
        query.apply_batch(batch_for(&query, &["a", "b"], 50, false));

        assert!(!query.can_load_more());
        assert_eq!(query.begin_load(), None);
    }

    #[test]
    fn new_text_resets_results_and_cursor() {
        let mut query = CatalogQuery::new(CatalogOwner::Browser, "old", 2026, 1000);
        query.begin_load().unwrap();
        query.apply_batch(batch_for(&query, &["a", "b"], 50, true));

        let request = query.set_text("new").unwrap();

        assert!(query.albums().is_empty());
        assert!(!query.is_exhausted());
        assert_eq!(request.offset, 0);
        assert_eq!(request.text, "new");
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut query = CatalogQuery::new(CatalogOwner::Browser, "old", 2026, 1000);
        query.begin_load().unwrap();
        let stale = batch_for(&query, &["a"], 50, false);
        let stale_generation = query.generation();

        query.set_text("new");

        assert!(!query.apply_batch(stale));
        assert!(!query.apply_failure(CatalogOwner::Browser, stale_generation, "boom".to_string()));
        assert!(query.albums().is_empty());
        assert!(query.is_loading());
        assert_eq!(query.error(), None);
    }

    #[test]
    fn results_for_another_owner_are_ignored() {
        let mut query = CatalogQuery::new(CatalogOwner::Picker, "", 2026, 1000);
        query.begin_load().unwrap();
        let mut batch = batch_for(&query, &["a"], 50, false);
        batch.owner = CatalogOwner::Browser;

        assert!(!query.apply_batch(batch));
    }

    #[test]
    fn failure_keeps_results_and_clears_loading() {
        let mut query = CatalogQuery::new(CatalogOwner::Browser, "", 2026, 1000);
        query.begin_load().unwrap();
        query.apply_batch(batch_for(&query, &["a"], 50, false));
        query.begin_load().unwrap();

        assert!(query.apply_failure(
            CatalogOwner::Browser,
            query.generation(),
            "Error fetching albums".to_string()
        ));

        assert_eq!(ids(&query), vec!["a"]);
        assert!(!query.is_loading());
        assert_eq!(query.error(), Some("Error fetching albums"));

        // The next attempt clears the error.
        query.begin_load().unwrap();
        assert_eq!(query.error(), None);
    }
}
