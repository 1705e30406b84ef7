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

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

use crate::{
    components::RankingView,
    model::ranking::DropPayload,
    render::Render,
    theme::Theme,
    util::format::format_rank,
};

impl Render for RankingView {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let len = self.rankings.len();
        let picked_up = match self.held {
            Some(DropPayload::Ranked(index)) => Some(index),
            _ => None,
        };

        let items: Vec<ListItem> = self
            .rankings
            .slots()
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let rank = Span::styled(
                    format!("{} ", format_rank(index + 1, len)),
                    Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
                );

                match slot {
                    Some(album) => {
                        let name_style = if picked_up == Some(index) {
                            Style::default().fg(theme.held_colour).add_modifier(Modifier::ITALIC)
                        } else {
                            Style::default().fg(theme.album_fg).add_modifier(Modifier::BOLD)
                        };
                        ListItem::new(vec![
                            Line::from(vec![rank, Span::styled(album.name.as_str(), name_style)]),
                            Line::from(Span::styled(
                                format!("   {}", album.artist_names()),
                                Style::default().fg(theme.artist_fg),
                            )),
                        ])
                    }
                    None => ListItem::new(vec![
                        Line::from(vec![
                            rank,
                            Span::styled(
                                "Drop an album here",
                                Style::default().fg(theme.placeholder_fg),
                            ),
                        ]),
                        Line::from(Span::styled(
                            "   Enter to search",
                            Style::default().fg(theme.placeholder_fg),
                        )),
                    ]),
                }
            })
            .collect();

        let border_colour = if self.is_active {
            theme.active_border_colour
        } else {
            theme.border_colour
        };

        let footer = match self.held_name() {
            Some(name) => Line::styled(
                format!(" Holding \"{}\": Space/Enter to drop, Esc to cancel ", name),
                Style::default().fg(theme.held_colour),
            ),
            None if self.rankings.is_complete() => Line::styled(
                " e: export  s: share ",
                Style::default().fg(theme.info_colour),
            ),
            None => Line::styled(
                " Fill every rank to export ",
                Style::default().fg(theme.info_colour),
            ),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_colour))
            .title(format!(" Your Ranking ({}/{}) ", self.rankings.filled_count(), len))
            .title_bottom(footer);

        let list = List::new(items)
            .block(block)
            .style(Style::default().fg(theme.foreground_colour).bg(theme.background_colour))
            .highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg))
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}
