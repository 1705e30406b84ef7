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
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};

use crate::{render::centered_rect, theme::Theme};

const KEYS: &[(&str, &str)] = &[
    ("Tab", "switch between albums and ranking"),
    ("j / k", "move down / up"),
    ("Space", "grab an album, or drop the held one"),
    ("Enter", "drop the held album, or search for an empty rank"),
    ("K / J", "move the selected rank up / down"),
    ("a", "search for an album for the selected rank"),
    ("x", "remove the album from the selected rank"),
    ("m", "load more albums"),
    ("e / s", "export / share the ranking image"),
    ("d", "toggle dark mode"),
    (":", "enter a command"),
    ("q", "quit"),
];

pub(super) fn draw_help(f: &mut Frame, area: Rect, theme: &Theme) {
    let popup = centered_rect(70, 80, area);
    f.render_widget(Clear, popup);

    let key_style = Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::styled("How to Rank Albums", Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(""),
        Line::raw("1. Grab an album from the list and drop it on a rank."),
        Line::raw("2. Adjust the ranking by grabbing a rank and dropping it somewhere else."),
        Line::raw("3. Or choose a rank and search for an album to put there."),
        Line::raw(""),
    ];

    lines.extend(KEYS.iter().map(|(key, description)| {
        Line::from(vec![
            Span::styled(format!("{:>7}  ", key), key_style),
            Span::raw(*description),
        ])
    }));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.active_border_colour))
        .style(Style::default().fg(theme.foreground_colour).bg(theme.background_colour))
        .padding(Padding::horizontal(1))
        .title(" Help ")
        .title_bottom(Line::styled(" Esc: close ", Style::default().fg(theme.info_colour)));

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), popup);
}
