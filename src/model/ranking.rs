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

//! Ranked album slots.
//!
//! This module provides the ranking state machine: a fixed number of ordered
//! slots, each holding at most one album, where slot zero is the top rank.
//!
//! No album may occupy more than one slot. Persistence is not handled here,
//! the owner of the [`Rankings`] writes the whole sequence after each
//! successful transition.

use std::collections::HashSet;

use thiserror::Error;

use crate::model::AlbumRecord;

pub(crate) const DEFAULT_SLOT_COUNT: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum RankingError {
    #[error("\"{0}\" is already in your ranking")]
    Duplicate(String),
    #[error("There is no rank {0}")]
    OutOfRange(usize),
    #[error("Rank {0} is empty")]
    EmptySlot(usize),
}

/// Where the slot at `index` ends up after `move_slot(from, to)`.
pub(crate) fn index_after_move(index: usize, from: usize, to: usize) -> usize {
    if index == from {
        to
    } else if from < index && index <= to {
        index - 1
    } else if to <= index && index < from {
        index + 1
    } else {
        index
    }
}

/// What is being dropped onto a slot.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DropPayload {
    /// An album picked up from the browser or the picker.
    Unranked(AlbumRecord),
    /// The contents of an existing slot, by index.
    Ranked(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Rankings {
    slots: Vec<Option<AlbumRecord>>,
    picker_target: Option<usize>,
}

impl Default for Rankings {
    fn default() -> Self {
        Self::new(DEFAULT_SLOT_COUNT)
    }
}

impl Rankings {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
            picker_target: None,
        }
    }

    /// Builds rankings from a previously persisted sequence.
    ///
    /// The sequence is padded or truncated to `len`, and any album repeated
    /// in a later slot is dropped so that the uniqueness invariant holds even
    /// for hand-edited data.
    pub(crate) fn from_slots(mut slots: Vec<Option<AlbumRecord>>, len: usize) -> Self {
        slots.resize(len, None);

        let mut seen = HashSet::new();
        for slot in slots.iter_mut() {
            let duplicate = match slot {
                Some(album) => !seen.insert(album.id.clone()),
                None => false,
            };
            if duplicate {
                *slot = None;
            }
        }

        Self {
            slots,
            picker_target: None,
        }
    }

    pub(crate) fn slots(&self) -> &[Option<AlbumRecord>] {
        &self.slots
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&AlbumRecord> {
        self.slots.get(index).and_then(|s| s.as_ref())
    }

    pub(crate) fn contains(&self, album_id: &str) -> bool {
        self.position(album_id).is_some()
    }

    pub(crate) fn position(&self, album_id: &str) -> Option<usize> {
        self.slots
            .iter()
            .position(|s| s.as_ref().is_some_and(|a| a.id == album_id))
    }

    /// Whether every slot is filled, the precondition for exporting.
    pub(crate) fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub(crate) fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Places an album into a slot, replacing whatever was there.
    ///
    /// The displaced album is returned, it is not moved elsewhere.
    ///
    /// # Errors
    ///
    /// Fails without changing anything if the album already occupies any
    /// slot, including the target slot itself, or if `index` is out of range.
    pub(crate) fn insert_at(
        &mut self,
        index: usize,
        album: AlbumRecord,
    ) -> Result<Option<AlbumRecord>, RankingError> {
        self.check_index(index)?;

        if self.contains(&album.id) {
            return Err(RankingError::Duplicate(album.name));
        }

        Ok(self.slots[index].replace(album))
    }

    /// Moves a slot's contents to another position.
    ///
    /// This is a splice rather than a swap: every slot between the two
    /// positions shifts by one towards `from`.
    pub(crate) fn move_slot(&mut self, from: usize, to: usize) -> Result<(), RankingError> {
        self.check_index(from)?;
        self.check_index(to)?;

        if from != to {
            let moved = self.slots.remove(from);
            self.slots.insert(to, moved);
        }

        Ok(())
    }

    pub(crate) fn delete_at(&mut self, index: usize) -> Result<AlbumRecord, RankingError> {
        self.check_index(index)?;
        self.slots[index].take().ok_or(RankingError::EmptySlot(index + 1))
    }

    pub(crate) fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }

    /// Dispatches a drop gesture onto the slot at `index`.
    pub(crate) fn drop_on(
        &mut self,
        index: usize,
        payload: DropPayload,
    ) -> Result<(), RankingError> {
        match payload {
            DropPayload::Unranked(album) => self.insert_at(index, album).map(|_| ()),
            DropPayload::Ranked(from) => self.move_slot(from, index),
        }
    }

    pub(crate) fn open_picker(&mut self, index: usize) -> Result<(), RankingError> {
        self.check_index(index)?;
        self.picker_target = Some(index);
        Ok(())
    }

    pub(crate) fn close_picker(&mut self) {
        self.picker_target = None;
    }

    pub(crate) fn picker_target(&self) -> Option<usize> {
        self.picker_target
    }

    fn check_index(&self, index: usize) -> Result<(), RankingError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(RankingError::OutOfRange(index + 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_album;

    fn ids(rankings: &Rankings) -> Vec<Option<&str>> {
        rankings
            .slots()
            .iter()
            .map(|s| s.as_ref().map(|a| a.id.as_str()))
            .collect()
    }

    fn abc() -> Rankings {
        let mut rankings = Rankings::new(5);
        rankings.insert_at(0, test_album("A")).unwrap();
        rankings.insert_at(1, test_album("B")).unwrap();
        rankings.insert_at(2, test_album("C")).unwrap();
        rankings
    }

    #[test]
    fn starts_empty_with_default_length() {
        let rankings = Rankings::default();

        assert_eq!(rankings.len(), 5);
        assert_eq!(rankings.filled_count(), 0);
        assert!(!rankings.is_complete());
    }

    #[test]
    fn distinct_inserts_never_duplicate() {
        let mut rankings = Rankings::new(5);
        for (i, id) in ["A", "B", "C", "D", "E"].iter().enumerate() {
            rankings.insert_at(i, test_album(id)).unwrap();
        }
        rankings.insert_at(0, test_album("F")).unwrap();

        let mut seen = HashSet::new();
        for album in rankings.slots().iter().flatten() {
            assert!(seen.insert(album.id.clone()));
        }
        assert_eq!(ids(&rankings), vec![Some("F"), Some("B"), Some("C"), Some("D"), Some("E")]);
    }

    #[test]
    fn second_insert_of_same_album_is_rejected() {
        let mut rankings = Rankings::new(5);
        rankings.insert_at(1, test_album("A")).unwrap();
        let before = rankings.clone();

        let result = rankings.insert_at(3, test_album("A"));

        assert_eq!(result, Err(RankingError::Duplicate("Album A".to_string())));
        assert_eq!(rankings, before);
    }

    #[test]
    fn reinserting_into_own_slot_is_rejected() {
        let mut rankings = Rankings::new(5);
        rankings.insert_at(1, test_album("A")).unwrap();

        assert!(rankings.insert_at(1, test_album("A")).is_err());
        assert_eq!(rankings.position("A"), Some(1));
    }

    #[test]
    fn insert_displaces_without_relocating() {
        let mut rankings = abc();

        let displaced = rankings.insert_at(1, test_album("D")).unwrap();

        assert_eq!(displaced.map(|a| a.id), Some("B".to_string()));
        assert_eq!(ids(&rankings), vec![Some("A"), Some("D"), Some("C"), None, None]);
    }

    #[test]
    fn move_slot_splices() {
        let mut rankings = abc();

        rankings.move_slot(0, 2).unwrap();

        assert_eq!(ids(&rankings), vec![Some("B"), Some("C"), Some("A"), None, None]);
    }

    #[test]
    fn move_slot_back_restores_order() {
        let mut rankings = abc();
        let before = rankings.clone();

        rankings.move_slot(0, 2).unwrap();
        rankings.move_slot(2, 0).unwrap();

        assert_eq!(rankings, before);
    }

    #[test]
    fn move_slot_into_empty_tail_shifts_gap_up() {
        let mut rankings = abc();

        rankings.move_slot(1, 4).unwrap();

        assert_eq!(ids(&rankings), vec![Some("A"), Some("C"), None, None, Some("B")]);
    }

    #[test]
    fn move_slot_out_of_range_is_rejected() {
        let mut rankings = abc();

        assert_eq!(rankings.move_slot(0, 5), Err(RankingError::OutOfRange(6)));
        assert_eq!(ids(&rankings), vec![Some("A"), Some("B"), Some("C"), None, None]);
    }

    #[test]
    fn delete_clears_slot() {
        let mut rankings = abc();

        let removed = rankings.delete_at(1).unwrap();

        assert_eq!(removed.id, "B");
        assert_eq!(ids(&rankings), vec![Some("A"), None, Some("C"), None, None]);
        assert_eq!(rankings.delete_at(1), Err(RankingError::EmptySlot(2)));
    }

    #[test]
    fn drop_dispatches_on_payload_kind() {
        let mut rankings = abc();

        rankings.drop_on(4, DropPayload::Unranked(test_album("E"))).unwrap();
        rankings.drop_on(0, DropPayload::Ranked(4)).unwrap();

        assert_eq!(ids(&rankings), vec![Some("E"), Some("A"), Some("B"), Some("C"), None]);
    }

    #[test]
    fn complete_only_when_every_slot_filled() {
        let mut rankings = abc();
        assert!(!rankings.is_complete());

        rankings.insert_at(3, test_album("D")).unwrap();
        rankings.insert_at(4, test_album("E")).unwrap();
        assert!(rankings.is_complete());
    }

    #[test]
    fn from_slots_resizes_and_removes_repeats() {
        let slots = vec![Some(test_album("A")), Some(test_album("A")), None];

        let rankings = Rankings::from_slots(slots, 5);

        assert_eq!(ids(&rankings), vec![Some("A"), None, None, None, None]);
    }

    #[test]
    fn picker_target_is_tracked() {
        let mut rankings = Rankings::new(5);

        rankings.open_picker(3).unwrap();
        assert_eq!(rankings.picker_target(), Some(3));

        rankings.close_picker();
        assert_eq!(rankings.picker_target(), None);
        assert!(rankings.open_picker(9).is_err());
    }

    #[test]
    fn indexes_follow_a_splice() {
        let mut rankings = Rankings::new(5);
        for (i, id) in ["A", "B", "C", "D", "E"].iter().enumerate() {
            rankings.insert_at(i, test_album(id)).unwrap();
        }
        let ids: Vec<String> = rankings.slots().iter().flatten().map(|a| a.id.clone()).collect();

        rankings.move_slot(1, 3).unwrap();

        for (before, id) in ids.iter().enumerate() {
            let after = index_after_move(before, 1, 3);
            assert_eq!(rankings.get(after).map(|a| &a.id), Some(id));
        }
        assert_eq!(index_after_move(4, 3, 1), 4);
        assert_eq!(index_after_move(2, 3, 1), 3);
    }
}
