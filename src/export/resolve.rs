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

//! Cover pre-resolution.
//!
//! Every cover is fetched and decoded before composition starts, so the
//! image is never drawn with a cover still missing. A cover that cannot be
//! fetched or decoded is replaced by a placeholder and the export continues.

use image::{RgbaImage, imageops::FilterType};
use tracing::{debug, warn};

use crate::{
    model::AlbumRecord,
    spotify::{CatalogError, SpotifyClient},
};

/// Source of raw cover image bytes.
pub(crate) trait CoverSource {
    fn fetch_cover(&self, url: &str) -> Result<Vec<u8>, CatalogError>;
}

impl CoverSource for SpotifyClient {
    fn fetch_cover(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        self.fetch_bytes(url)
    }
}

#[derive(Debug)]
pub(crate) enum Cover {
    Resolved(RgbaImage),
    Placeholder,
}

impl Cover {
    #[cfg(test)]
    pub(crate) fn is_resolved(&self) -> bool {
        matches!(self, Cover::Resolved(_))
    }
}

/// Resolves one cover per album, in order, scaled to `size` square.
pub(crate) fn resolve_covers(
    albums: &[AlbumRecord],
    source: &impl CoverSource,
    size: u32,
) -> Vec<Cover> {
    albums
        .iter()
        .map(|album| match resolve_cover(album, source, size) {
            Ok(image) => Cover::Resolved(image),
            Err(reason) => {
                warn!("Using placeholder cover for '{}': {}", album.name, reason);
                Cover::Placeholder
            }
        })
        .collect()
}

fn resolve_cover(
    album: &AlbumRecord,
    source: &impl CoverSource,
    size: u32,
) -> Result<RgbaImage, String> {
    let url = album.cover_url().ok_or_else(|| "no cover image".to_string())?;

    debug!("Fetching cover {}", url);
    let bytes = source.fetch_cover(url).map_err(|e| e.to_string())?;
    let image = image::load_from_memory(&bytes).map_err(|e| e.to_string())?;

    Ok(image::imageops::resize(&image.to_rgba8(), size, size, FilterType::Triangle))
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{collections::HashMap, io::Cursor};

    use image::{ImageFormat, Rgba};
    use reqwest::StatusCode;

    use super::*;
    use crate::model::test_album;

    /// Serves covers from memory; unknown urls answer 404.
    pub(crate) struct FakeCovers(pub(crate) HashMap<String, Vec<u8>>);

    impl CoverSource for FakeCovers {
        fn fetch_cover(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
            self.0
                .get(url)
                .cloned()
                .ok_or(CatalogError::Status(StatusCode::NOT_FOUND))
        }
    }

    pub(crate) fn png_bytes(color: Rgba<u8>) -> Vec<u8> {
        let image = RgbaImage::from_pixel(4, 4, color);
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn resolves_and_scales_covers() {
        let album = test_album("A");
        let url = album.cover_url().unwrap().to_string();
        let covers = FakeCovers(HashMap::from([(url, png_bytes(Rgba([0, 0, 255, 255])))]));

        let resolved = resolve_covers(&[album], &covers, 8);

        match &resolved[0] {
            Cover::Resolved(image) => {
                assert_eq!(image.dimensions(), (8, 8));
                assert_eq!(*image.get_pixel(4, 4), Rgba([0, 0, 255, 255]));
            }
            Cover::Placeholder => panic!("expected a resolved cover"),
        }
    }

    #[test]
    fn failures_fall_back_to_placeholders_in_order() {
        let good = test_album("A");
        let missing = test_album("B");
        let mut no_image = test_album("C");
        no_image.images.clear();
        let mut corrupt = test_album("D");
        corrupt.images[0].url = "corrupt".to_string();

        let covers = FakeCovers(HashMap::from([
            (good.cover_url().unwrap().to_string(), png_bytes(Rgba([1, 2, 3, 255]))),
            ("corrupt".to_string(), b"not an image".to_vec()),
        ]));

        let resolved = resolve_covers(&[good, missing, no_image, corrupt], &covers, 8);

        let states: Vec<bool> = resolved.iter().map(Cover::is_resolved).collect();
        assert_eq!(states, vec![true, false, false, false]);
    }
}
