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

//! Visual styling and color configuration for the TUI.
//!
//! This module defines the light and dark color palettes and provides
//! utilities for converting colors between Ratatui's internal representation
//! and external formats (such as hexadecimal strings) used for terminal
//! emulator styling.

use ratatui::style::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Theme {
    pub(crate) background_colour: Color,
    pub(crate) foreground_colour: Color,
    pub(crate) accent_colour: Color,
    pub(crate) border_colour: Color,
    pub(crate) active_border_colour: Color,
    pub(crate) highlight_bg: Color,
    pub(crate) highlight_fg: Color,
    pub(crate) held_colour: Color,

    pub(crate) album_fg: Color,
    pub(crate) artist_fg: Color,
    pub(crate) date_fg: Color,
    pub(crate) placeholder_fg: Color,

    pub(crate) info_colour: Color,
    pub(crate) warning_colour: Color,
    pub(crate) error_colour: Color,

    pub(crate) commander_colour: Color,
    pub(crate) commander_bg: Color,
}

impl Theme {
    pub(crate) const fn for_mode(dark_mode: bool) -> Self {
        if dark_mode { Self::dark() } else { Self::light() }
    }

    pub(crate) const fn dark() -> Self {
        Self {
            background_colour: Color::Rgb(40, 20, 50),
            foreground_colour: Color::Rgb(255, 255, 255),
            accent_colour: Color::Rgb(250, 189, 47),
            border_colour: Color::Rgb(102, 102, 102),
            active_border_colour: Color::Rgb(250, 189, 47),
            highlight_bg: Color::Rgb(70, 50, 120),
            highlight_fg: Color::Rgb(255, 255, 255),
            held_colour: Color::Rgb(120, 200, 140),

            album_fg: Color::Rgb(255, 255, 255),
            artist_fg: Color::Rgb(179, 157, 219),
            date_fg: Color::Rgb(162, 161, 166),
            placeholder_fg: Color::Rgb(110, 100, 120),

            info_colour: Color::Rgb(162, 161, 166),
            warning_colour: Color::Rgb(255, 215, 0),
            error_colour: Color::Rgb(240, 100, 100),

            commander_colour: Color::Rgb(255, 255, 255),
            commander_bg: Color::Rgb(50, 30, 60),
        }
    }

    pub(crate) const fn light() -> Self {
        Self {
            background_colour: Color::Rgb(250, 248, 252),
            foreground_colour: Color::Rgb(20, 20, 20),
            accent_colour: Color::Rgb(150, 90, 10),
            border_colour: Color::Rgb(180, 180, 180),
            active_border_colour: Color::Rgb(150, 90, 10),
            highlight_bg: Color::Rgb(215, 205, 240),
            highlight_fg: Color::Rgb(20, 20, 20),
            held_colour: Color::Rgb(30, 130, 60),

            album_fg: Color::Rgb(20, 20, 20),
            artist_fg: Color::Rgb(90, 60, 150),
            date_fg: Color::Rgb(110, 110, 110),
            placeholder_fg: Color::Rgb(160, 160, 160),

            info_colour: Color::Rgb(90, 90, 90),
            warning_colour: Color::Rgb(170, 110, 0),
            error_colour: Color::Rgb(190, 30, 30),

            commander_colour: Color::Rgb(20, 20, 20),
            commander_bg: Color::Rgb(230, 225, 238),
        }
    }

    /// Converts a [`ratatui::style::Color`] into a CSS-style hexadecimal
    /// string.
    ///
    /// This is primarily used to set the terminal emulator's background color
    /// via escape sequences. Only [`Color::Rgb`] values can be converted.
    pub(crate) fn to_hex(colour: Color) -> Option<String> {
        match colour {
            Color::Rgb(r, g, b) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
