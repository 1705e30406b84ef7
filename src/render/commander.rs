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

//! Render the `:` command line at the bottom of the screen.

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::App;

const PROMPT: &str = ":";

pub(crate) fn draw_commander(f: &mut Frame, area: Rect, app: &App) {
    let commander = &app.commander;
    let style = Style::default()
        .fg(app.theme.commander_colour)
        .bg(app.theme.commander_bg);

    if !commander.active() {
        f.render_widget(Paragraph::new("").style(style), area);
        return;
    }

    let line = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(app.theme.accent_colour)),
        Span::raw(commander.input.value()),
    ]);
    f.render_widget(Paragraph::new(line).style(style), area);

    let cursor_x = area.x + (PROMPT.len() + commander.input.visual_cursor()) as u16;
    f.set_cursor_position((cursor_x.min(area.right().saturating_sub(1)), area.y));
}
