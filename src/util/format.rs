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

use chrono::NaiveDate;

/// Formats a catalog release date for display.
///
/// The catalog reports dates with day, month or year precision. Each is
/// shown with the precision it has, anything unparseable is shown as-is.
///
/// # Examples
///
/// ```
/// assert_eq!(format_release_date("2026-03-14"), "14 Mar 2026");
/// assert_eq!(format_release_date("2026-03"), "Mar 2026");
/// assert_eq!(format_release_date("2026"), "2026");
/// ```
pub(crate) fn format_release_date(release_date: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(release_date, "%Y-%m-%d") {
        return date.format("%-d %b %Y").to_string();
    }

    if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", release_date), "%Y-%m-%d") {
        return date.format("%b %Y").to_string();
    }

    release_date.to_string()
}

/// Label for a 1-based rank, padded so that ranks line up.
pub(crate) fn format_rank(rank: usize, slot_count: usize) -> String {
    let width = slot_count.to_string().len();
    format!("{:>width$}.", rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_precision() {
        assert_eq!(format_release_date("2026-03-14"), "14 Mar 2026");
        assert_eq!(format_release_date("2026-11-02"), "2 Nov 2026");
        assert_eq!(format_release_date("2026-03"), "Mar 2026");
        assert_eq!(format_release_date("2026"), "2026");
    }

    #[test]
    fn unparseable_dates_are_shown_as_is() {
        assert_eq!(format_release_date(""), "");
        assert_eq!(format_release_date("soon"), "soon");
    }

    #[test]
    fn ranks_are_right_aligned() {
        assert_eq!(format_rank(1, 5), "1.");
        assert_eq!(format_rank(3, 10), " 3.");
        assert_eq!(format_rank(10, 10), "10.");
    }
}
