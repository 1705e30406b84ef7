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

//! Input handling for the ranking view.

use crossterm::event::{Event, KeyCode};

use crate::{
    components::{RankingAction, RankingView, select_next, select_previous},
    model::ranking::{DropPayload, index_after_move},
};

impl RankingView {
    pub(crate) fn process_event(&mut self, event: &Event) -> Option<RankingAction> {
        let Event::Key(key_event) = event else {
            return None;
        };

        let len = self.rankings.len();
        let selected = self.selected();
        let occupied = self.rankings.get(selected).is_some();

        match key_event.code {
            KeyCode::Char('j') | KeyCode::Down => {
                select_next(&mut self.list_state, len);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                select_previous(&mut self.list_state, len);
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.select(0);
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.select(len.saturating_sub(1));
                None
            }

            // Shift-move the selected slot one place.
            KeyCode::Char('K') if selected > 0 => Some(self.shift(selected, selected - 1)),
            KeyCode::Char('J') if selected + 1 < len => Some(self.shift(selected, selected + 1)),

            KeyCode::Char(' ') => match self.held.take() {
                Some(payload) => Some(RankingAction::Drop {
                    index: selected,
                    payload,
                }),
                None => {
                    if occupied {
                        self.held = Some(DropPayload::Ranked(selected));
                    }
                    None
                }
            },

            KeyCode::Enter => match self.held.take() {
                Some(payload) => Some(RankingAction::Drop {
                    index: selected,
                    payload,
                }),
                None => (!occupied).then_some(RankingAction::OpenPicker(selected)),
            },

            KeyCode::Char('x') | KeyCode::Delete => {
                occupied.then_some(RankingAction::Delete(selected))
            }

            KeyCode::Esc => {
                self.held = None;
                None
            }

            _ => None,
        }
    }

    /// Moves the selection along with a shift-move, keeping any held rank
    /// pointing at the same album.
    fn shift(&mut self, from: usize, to: usize) -> RankingAction {
        if let Some(DropPayload::Ranked(held)) = self.held.as_mut() {
            *held = index_after_move(*held, from, to);
        }
        self.select(to);

        RankingAction::Drop {
            index: to,
            payload: DropPayload::Ranked(from),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;
    use crate::model::{ranking::Rankings, test_album};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn view_with(ids: &[Option<&str>]) -> RankingView {
        let mut rankings = Rankings::new(ids.len());
        for (i, id) in ids.iter().enumerate() {
            if let Some(id) = id {
                rankings.insert_at(i, test_album(id)).unwrap();
            }
        }
        RankingView::new(rankings)
    }

    #[test]
    fn grab_and_drop_ranked_slot() {
        let mut view = view_with(&[Some("A"), Some("B"), None]);

        assert_eq!(view.process_event(&key(KeyCode::Char(' '))), None);
        assert_eq!(view.held, Some(DropPayload::Ranked(0)));

        view.process_event(&key(KeyCode::Down));
        view.process_event(&key(KeyCode::Down));
        let action = view.process_event(&key(KeyCode::Enter));

        assert_eq!(
            action,
            Some(RankingAction::Drop {
                index: 2,
                payload: DropPayload::Ranked(0),
            })
        );
        assert_eq!(view.held, None);
    }

    #[test]
    fn held_album_drops_on_selected_slot() {
        let mut view = view_with(&[None, None]);
        view.hold(DropPayload::Unranked(test_album("X")));
        view.process_event(&key(KeyCode::Down));

        let action = view.process_event(&key(KeyCode::Char(' ')));

        assert_eq!(
            action,
            Some(RankingAction::Drop {
                index: 1,
                payload: DropPayload::Unranked(test_album("X")),
            })
        );
    }

    #[test]
    fn enter_on_empty_slot_opens_picker() {
        let mut view = view_with(&[Some("A"), None]);

        assert_eq!(view.process_event(&key(KeyCode::Enter)), None);
        view.process_event(&key(KeyCode::Down));
        assert_eq!(view.process_event(&key(KeyCode::Enter)), Some(RankingAction::OpenPicker(1)));
    }

    #[test]
    fn empty_slot_cannot_be_grabbed_or_deleted() {
        let mut view = view_with(&[None]);

        assert_eq!(view.process_event(&key(KeyCode::Char(' '))), None);
        assert_eq!(view.held, None);
        assert_eq!(view.process_event(&key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn escape_cancels_held_album() {
        let mut view = view_with(&[Some("A")]);
        view.process_event(&key(KeyCode::Char(' ')));

        view.process_event(&key(KeyCode::Esc));

        assert_eq!(view.held, None);
    }

    #[test]
    fn shift_moves_follow_selection() {
        let mut view = view_with(&[Some("A"), Some("B"), Some("C")]);
        view.select(1);

        let action = view.process_event(&key(KeyCode::Char('K')));

        assert_eq!(
            action,
            Some(RankingAction::Drop {
                index: 0,
                payload: DropPayload::Ranked(1),
            })
        );
        assert_eq!(view.selected(), 0);
        assert_eq!(view.process_event(&key(KeyCode::Char('K'))), None);
    }

    #[test]
    fn held_rank_follows_its_album_through_shift_moves() {
        let mut view = view_with(&[Some("A"), Some("B"), None]);
        view.process_event(&key(KeyCode::Char(' ')));
        assert_eq!(view.held_name(), Some("Album A"));

        let action = view.process_event(&key(KeyCode::Char('J')));
        if let Some(RankingAction::Drop { index, payload }) = action {
            view.rankings.drop_on(index, payload).unwrap();
        }

        assert_eq!(view.held, Some(DropPayload::Ranked(1)));
        assert_eq!(view.held_name(), Some("Album A"));
    }

    #[test]
    fn shift_move_of_another_rank_keeps_hold_on_its_album() {
        let mut view = view_with(&[Some("A"), Some("B"), Some("C")]);
        view.process_event(&key(KeyCode::Char(' ')));
        view.select(2);

        let action = view.process_event(&key(KeyCode::Char('K')));
        if let Some(RankingAction::Drop { index, payload }) = action {
            view.rankings.drop_on(index, payload).unwrap();
        }

        assert_eq!(view.held_name(), Some("Album A"));
    }
}
