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

mod commander;
mod help;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::{
    App,
    events::StatusLevel,
    render::{commander::draw_commander, help::draw_help},
    theme::Theme,
};

pub(crate) trait Render {
    fn draw(&mut self, f: &mut Frame, area: Rect, theme: &Theme);
}

pub(crate) fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    f.render_widget(
        Block::default().style(
            Style::default()
                .fg(app.theme.foreground_colour)
                .bg(app.theme.background_colour),
        ),
        area,
    );

    // Outer layout: header, main, status, commander
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, outer[0], app);

    // Main layout: album browser, ranking
    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(outer[1]);

    app.album_list.draw(f, main[0], &app.theme);
    app.ranking_view.draw(f, main[1], &app.theme);

    draw_status(f, outer[2], app);
    draw_commander(f, outer[3], app);

    if let Some(picker) = app.picker.as_mut() {
        picker.draw(f, outer[1], &app.theme);
    } else if app.show_help {
        draw_help(f, outer[1], &app.theme);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mode = if app.dark_mode { "dark" } else { "light" };

    let line = Line::from(vec![
        Span::styled(
            format!(" Album Rankings {} ", app.year),
            Style::default().fg(theme.accent_colour).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} mode ", mode), Style::default().fg(theme.info_colour)),
        Span::styled(" ? help  : command ", Style::default().fg(theme.info_colour)),
    ]);

    f.render_widget(Paragraph::new(line), area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let Some(status) = &app.status else {
        return;
    };

    let colour = match status.level {
        StatusLevel::Info => app.theme.info_colour,
        StatusLevel::Warning => app.theme.warning_colour,
        StatusLevel::Error => app.theme.error_colour,
    };

    f.render_widget(
        Paragraph::new(format!(" {}", status.text)).style(Style::default().fg(colour)),
        area,
    );
}

/// A rectangle centred in `area`, sized as a percentage of it.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
