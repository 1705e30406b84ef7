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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application, the album
//! records returned by the catalog, together with the query and ranking state
//! built on top of them.
//!
//! Album records keep the field names used by the catalog API so that the
//! persisted ranking has the same JSON shape as the upstream payload.

pub(crate) mod catalog;
pub(crate) mod ranking;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum AlbumType {
    Album,
    Single,
    Compilation,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ArtistRef {
    pub(crate) name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ImageRef {
    pub(crate) url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) height: Option<u32>,
}

/// An album as described by the catalog.
///
/// Records are immutable once fetched; rankings hold their own clones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AlbumRecord {
    pub(crate) id: String,
    pub(crate) name: String,
    #[serde(default)]
    pub(crate) artists: Vec<ArtistRef>,
    #[serde(default)]
    pub(crate) images: Vec<ImageRef>,
    #[serde(default)]
    pub(crate) release_date: String,
    #[serde(default)]
    pub(crate) album_type: AlbumType,
}

impl AlbumRecord {
    /// Only full-length albums are shown, singles and compilations are not.
    pub(crate) fn is_full_album(&self) -> bool {
        self.album_type == AlbumType::Album
    }

    pub(crate) fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The first image is treated as the primary cover.
    pub(crate) fn cover_url(&self) -> Option<&str> {
        self.images.first().map(|i| i.url.as_str())
    }
}

#[cfg(test)]
pub(crate) fn test_album(id: &str) -> AlbumRecord {
    AlbumRecord {
        id: id.to_string(),
        name: format!("Album {}", id),
        artists: vec![ArtistRef {
            name: format!("Artist {}", id),
        }],
        images: vec![ImageRef {
            url: format!("https://i.example.com/{}.jpg", id),
            width: Some(640),
            height: Some(640),
        }],
        release_date: "2026-03-14".to_string(),
        album_type: AlbumType::Album,
    }
}
