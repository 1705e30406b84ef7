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
    components::AlbumList,
    model::catalog::CatalogQuery,
    render::Render,
    theme::Theme,
    util::format::format_release_date,
};

impl Render for AlbumList {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = self
            .query
            .albums()
            .iter()
            .map(|album| {
                ListItem::new(vec![
                    Line::from(Span::styled(
                        album.name.as_str(),
                        Style::default().fg(theme.album_fg).add_modifier(Modifier::BOLD),
                    )),
                    Line::from(vec![
                        Span::raw("  "),
                        Span::styled(album.artist_names(), Style::default().fg(theme.artist_fg)),
                        Span::raw("  "),
                        Span::styled(
                            format_release_date(&album.release_date),
                            Style::default().fg(theme.date_fg),
                        ),
                    ]),
                ])
            })
            .collect();

        let border_colour = if self.is_active {
            theme.active_border_colour
        } else {
            theme.border_colour
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_colour))
            .title(format!(" Albums of {} ({}) ", self.query.year(), self.query.albums().len()))
            .title_bottom(footer(&self.query, theme));

        let list = List::new(items)
            .block(block)
            .style(Style::default().fg(theme.foreground_colour).bg(theme.background_colour))
            .highlight_style(Style::default().bg(theme.highlight_bg).fg(theme.highlight_fg))
            .highlight_symbol("> ");

        f.render_stateful_widget(list, area, &mut self.list_state);
    }
}

fn footer(query: &CatalogQuery, theme: &Theme) -> Line<'static> {
    if query.is_loading() {
        Line::styled(" Loading more albums... ", Style::default().fg(theme.info_colour))
    } else if let Some(error) = query.error() {
        Line::styled(format!(" {} (m to retry) ", error), Style::default().fg(theme.error_colour))
    } else if query.can_load_more() {
        Line::styled(" m: load more ", Style::default().fg(theme.info_colour))
    } else if query.albums().is_empty() {
        Line::styled(" No albums found ", Style::default().fg(theme.info_colour))
    } else {
        Line::styled(" No more albums ", Style::default().fg(theme.info_colour))
    }
}
