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
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::{
    components::Picker,
    render::{Render, centered_rect},
    theme::Theme,
    util::format::format_release_date,
};

impl Render for Picker {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let popup = centered_rect(70, 70, area);
        f.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.active_border_colour))
            .style(Style::default().fg(theme.foreground_colour).bg(theme.background_colour))
            .title(" Search Albums ")
            .title_bottom(Line::styled(
                " Enter: add  Ctrl-n: more  Esc: close ",
                Style::default().fg(theme.info_colour),
            ));
        let inner = block.inner(popup);
        f.render_widget(block, popup);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let prompt = "Search: ";
        let input_line = if self.input.value().is_empty() {
            Line::from(vec![
                Span::styled(prompt, Style::default().fg(theme.accent_colour)),
                Span::styled("Search for an album", Style::default().fg(theme.placeholder_fg)),
            ])
        } else {
            Line::from(vec![
                Span::styled(prompt, Style::default().fg(theme.accent_colour)),
                Span::raw(self.input.value()),
            ])
        };
        f.render_widget(Paragraph::new(input_line), chunks[0]);

        let cursor_x = chunks[0].x + (prompt.len() + self.input.visual_cursor()) as u16;
        f.set_cursor_position((cursor_x.min(chunks[0].right().saturating_sub(1)), chunks[0].y));

        let status = if self.query.is_loading() {
            Line::styled("Loading...", Style::default().fg(theme.info_colour))
        } else if let Some(error) = self.query.error() {
            Line::styled(error.to_string(), Style::default().fg(theme.error_colour))
        } else {
            Line::styled(
                format!("{} albums", self.query.albums().len()),
                Style::default().fg(theme.info_colour),
            )
        };
        f.render_widget(Paragraph::new(status), chunks[1]);

        let items: Vec<ListItem> = self
            .query
            .albums()
            .iter()
            .map(|album| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        album.name.as_str(),
                        Style::default().fg(theme.album_fg).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(album.artist_names(), Style::default().fg(theme.artist_fg)),
                    Span::raw("  "),
                    Span::styled(
                        format_release_date(&album.release_date),
                        Style::default().fg(theme.date_fg),
                    ),
                ]))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg))
            .highlight_symbol("> ");

        f.render_stateful_widget(list, chunks[2], &mut self.list_state);
    }
}
