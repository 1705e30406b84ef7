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

//! Composition of the ranking image.

use image::{Rgba, RgbaImage, imageops};

use crate::{
    export::{
        glyphs::{GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, glyph, is_set},
        resolve::Cover,
    },
    model::AlbumRecord,
};

pub(crate) const IMAGE_WIDTH: u32 = 720;
pub(crate) const COVER_SIZE: u32 = 96;

const HEADER_HEIGHT: u32 = 72;
const ROW_PADDING: u32 = 12;
const ROW_HEIGHT: u32 = COVER_SIZE + ROW_PADDING * 2;
const MARGIN: u32 = 16;
const RANK_WIDTH: u32 = 64;

const BACKGROUND: Rgba<u8> = Rgba([40, 22, 52, 255]);
const ROW_BACKGROUND: Rgba<u8> = Rgba([56, 34, 72, 255]);
const ACCENT: Rgba<u8> = Rgba([250, 189, 47, 255]);
const TEXT: Rgba<u8> = Rgba([245, 245, 245, 255]);
const TEXT_DIM: Rgba<u8> = Rgba([180, 170, 190, 255]);
pub(crate) const PLACEHOLDER: Rgba<u8> = Rgba([90, 90, 90, 255]);

pub(crate) fn header_text(year: i32) -> String {
    format!("MY ALBUM RANKINGS {}", year)
}

pub(crate) fn image_height(rows: usize) -> u32 {
    HEADER_HEIGHT + rows as u32 * ROW_HEIGHT + ROW_PADDING
}

/// Top-left corner of the cover for the row at `index`.
pub(crate) fn cover_origin(index: usize) -> (u32, u32) {
    (MARGIN + RANK_WIDTH, row_top(index) + ROW_PADDING)
}

fn row_top(index: usize) -> u32 {
    HEADER_HEIGHT + index as u32 * ROW_HEIGHT
}

/// Draws the header, then one row per album with its rank, cover, title and
/// artists. `covers` must be in the same order as `albums`.
pub(crate) fn render_ranking(albums: &[AlbumRecord], covers: &[Cover], year: i32) -> RgbaImage {
    let height = image_height(albums.len());
    let mut canvas = RgbaImage::from_pixel(IMAGE_WIDTH, height, BACKGROUND);

    let header = header_text(year);
    let header_scale = 4;
    let header_x = IMAGE_WIDTH.saturating_sub(text_width(&header, header_scale)) / 2;
    let header_y = (HEADER_HEIGHT - GLYPH_HEIGHT * header_scale) / 2;
    draw_text(&mut canvas, header_x, header_y, &header, header_scale, ACCENT, IMAGE_WIDTH);

    for (index, album) in albums.iter().enumerate() {
        let top = row_top(index);
        fill_rect(
            &mut canvas,
            MARGIN / 2,
            top + ROW_PADDING / 2,
            IMAGE_WIDTH - MARGIN,
            ROW_HEIGHT - ROW_PADDING,
            ROW_BACKGROUND,
        );

        let rank = format!("{}", index + 1);
        let rank_y = top + (ROW_HEIGHT - GLYPH_HEIGHT * 4) / 2;
        draw_text(&mut canvas, MARGIN, rank_y, &rank, 4, ACCENT, RANK_WIDTH);

        let (cover_x, cover_y) = cover_origin(index);
        match covers.get(index) {
            Some(Cover::Resolved(image)) => {
                imageops::overlay(&mut canvas, image, i64::from(cover_x), i64::from(cover_y));
            }
            _ => fill_rect(&mut canvas, cover_x, cover_y, COVER_SIZE, COVER_SIZE, PLACEHOLDER),
        }

        let text_x = cover_x + COVER_SIZE + MARGIN;
        let text_width = IMAGE_WIDTH - MARGIN - text_x;
        draw_text(&mut canvas, text_x, cover_y + 20, &album.name, 3, TEXT, text_width);
        draw_text(
            &mut canvas,
            text_x,
            cover_y + 56,
            &album.artist_names(),
            2,
            TEXT_DIM,
            text_width,
        );
    }

    canvas
}

pub(crate) fn text_width(text: &str, scale: u32) -> u32 {
    (text.chars().count() as u32 * GLYPH_ADVANCE * scale).saturating_sub(scale)
}

/// Shortens `text` so it fits in `max_width`, ending it with "..." if cut.
fn fit_text(text: &str, scale: u32, max_width: u32) -> String {
    let max_chars = ((max_width + scale) / (GLYPH_ADVANCE * scale)) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let keep = max_chars.saturating_sub(3);
    let mut fitted: String = text.chars().take(keep).collect();
    fitted.push_str("...");
    fitted
}

fn draw_text(
    canvas: &mut RgbaImage,
    x: u32,
    y: u32,
    text: &str,
    scale: u32,
    color: Rgba<u8>,
    max_width: u32,
) {
    let text = fit_text(text, scale, max_width);

    for (i, c) in text.chars().enumerate() {
        // Unsupported characters leave a blank cell.
        let Some(glyph) = glyph(c) else {
            continue;
        };

        let origin_x = x + i as u32 * GLYPH_ADVANCE * scale;
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if is_set(glyph, col, row) {
                    fill_rect(canvas, origin_x + col * scale, y + row * scale, scale, scale, color);
                }
            }
        }
    }
}

fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let x_end = (x + width).min(canvas.width());
    let y_end = (y + height).min(canvas.height());

    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_album;

    fn albums(n: usize) -> Vec<AlbumRecord> {
        (0..n).map(|i| test_album(&i.to_string())).collect()
    }

    #[test]
    fn header_names_the_year() {
        assert_eq!(header_text(2026), "MY ALBUM RANKINGS 2026");
    }

    #[test]
    fn image_grows_with_rows() {
        let image = render_ranking(&albums(5), &[], 2026);

        assert_eq!(image.width(), IMAGE_WIDTH);
        assert_eq!(image.height(), image_height(5));
        assert!(image_height(5) > image_height(3));
    }

    #[test]
    fn missing_cover_is_drawn_as_placeholder() {
        let covers = vec![Cover::Placeholder, Cover::Placeholder];

        let image = render_ranking(&albums(2), &covers, 2026);

        let (x, y) = cover_origin(1);
        assert_eq!(*image.get_pixel(x + COVER_SIZE / 2, y + COVER_SIZE / 2), PLACEHOLDER);
    }

    #[test]
    fn resolved_cover_is_drawn_in_its_row() {
        let red = Rgba([255, 0, 0, 255]);
        let covers = vec![
            Cover::Placeholder,
            Cover::Resolved(RgbaImage::from_pixel(COVER_SIZE, COVER_SIZE, red)),
        ];

        let image = render_ranking(&albums(2), &covers, 2026);

        let (x, y) = cover_origin(1);
        assert_eq!(*image.get_pixel(x, y), red);
        assert_eq!(*image.get_pixel(x + COVER_SIZE - 1, y + COVER_SIZE - 1), red);
        let (x0, y0) = cover_origin(0);
        assert_eq!(*image.get_pixel(x0, y0), PLACEHOLDER);
    }

    #[test]
    fn header_is_drawn_in_accent() {
        let image = render_ranking(&albums(1), &[], 2026);

        let header_pixels = (0..HEADER_HEIGHT)
            .flat_map(|y| (0..IMAGE_WIDTH).map(move |x| (x, y)))
            .filter(|&(x, y)| *image.get_pixel(x, y) == ACCENT)
            .count();
        assert!(header_pixels > 0);
    }

    #[test]
    fn long_text_is_shortened() {
        let fitted = fit_text("A VERY LONG ALBUM TITLE INDEED", 1, 60);

        assert_eq!(fitted, "A VERY ...");
        assert!(text_width(&fitted, 1) <= 60);
        assert_eq!(fit_text("SHORT", 1, 60), "SHORT");
    }
}
