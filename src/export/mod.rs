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

//! Ranking image export.
//!
//! An export snapshots a complete ranking into an [`ExportJob`], resolves
//! every cover, composes a PNG and then either saves it to the export
//! directory or hands it to the desktop share command.

pub(crate) mod glyphs;
pub(crate) mod render;
pub(crate) mod resolve;

use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use image::{ImageFormat, RgbaImage};
use thiserror::Error;
use tracing::info;

use crate::{
    config::{AppConfig, data_dir},
    export::{
        render::{COVER_SIZE, render_ranking},
        resolve::{CoverSource, resolve_covers},
    },
    model::{AlbumRecord, ranking::Rankings},
};

pub(crate) const EXPORT_FILE_NAME: &str = "album-ranking.png";
pub(crate) const SHARE_TITLE: &str = "My Album Rankings";

pub(crate) fn share_caption(year: i32) -> String {
    format!("Check out my top albums of {}!", year)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExportTarget {
    Download,
    Share,
}

#[derive(Debug, Error)]
pub(crate) enum ExportError {
    #[error("Fill every rank before exporting ({0} still empty)")]
    Incomplete(usize),
    #[error("Failed to encode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to share image: {0}")]
    Share(String),
}

/// A snapshot of a complete ranking, ready to render.
#[derive(Debug, Clone)]
pub(crate) struct ExportJob {
    pub(crate) target: ExportTarget,
    pub(crate) year: i32,
    pub(crate) albums: Vec<AlbumRecord>,
}

impl ExportJob {
    /// # Errors
    ///
    /// Returns [`ExportError::Incomplete`] while any slot is empty.
    pub(crate) fn from_rankings(
        rankings: &Rankings,
        target: ExportTarget,
        year: i32,
    ) -> Result<Self, ExportError> {
        if !rankings.is_complete() {
            return Err(ExportError::Incomplete(rankings.len() - rankings.filled_count()));
        }

        Ok(Self {
            target,
            year,
            albums: rankings.slots().iter().flatten().cloned().collect(),
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ExportSettings {
    pub(crate) export_dir: PathBuf,
    pub(crate) share_dir: PathBuf,
    pub(crate) share_command: String,
}

impl From<&AppConfig> for ExportSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            export_dir: config.export_dir(),
            share_dir: data_dir(),
            share_command: config.share_command(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExportOutcome {
    Saved(PathBuf),
    Shared {
        path: PathBuf,
        title: String,
        caption: String,
    },
}

impl ExportOutcome {
    pub(crate) fn message(&self) -> String {
        match self {
            ExportOutcome::Saved(path) => format!("Saved {}", path.display()),
            ExportOutcome::Shared { title, caption, .. } => {
                format!("Shared \"{}\": {}", title, caption)
            }
        }
    }
}

/// Renders the job and delivers it to its target.
///
/// Covers are all resolved before the image is composed. Cover failures
/// never fail the export, they are drawn as placeholders.
pub(crate) fn run_export(
    job: &ExportJob,
    covers: &impl CoverSource,
    settings: &ExportSettings,
) -> Result<ExportOutcome, ExportError> {
    info!("Exporting {} albums ({:?})", job.albums.len(), job.target);

    let resolved = resolve_covers(&job.albums, covers, COVER_SIZE);
    let image = render_ranking(&job.albums, &resolved, job.year);

    match job.target {
        ExportTarget::Download => {
            let path = write_png(&image, &settings.export_dir)?;
            info!("Saved ranking image to {}", path.display());
            Ok(ExportOutcome::Saved(path))
        }
        ExportTarget::Share => {
            let path = write_png(&image, &settings.share_dir)?;
            launch_share(&settings.share_command, &path)?;
            info!("Shared ranking image {}", path.display());
            Ok(ExportOutcome::Shared {
                path,
                title: SHARE_TITLE.to_string(),
                caption: share_caption(job.year),
            })
        }
    }
}

fn write_png(image: &RgbaImage, dir: &Path) -> Result<PathBuf, ExportError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(EXPORT_FILE_NAME);
    image.save_with_format(&path, ImageFormat::Png)?;
    Ok(path)
}

/// Runs the share command with any configured arguments followed by the
/// image path. Output is discarded since the terminal belongs to the UI.
fn launch_share(command: &str, path: &Path) -> Result<(), ExportError> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| ExportError::Share("no share command configured".to_string()))?;

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| ExportError::Share(format!("{}: {}", program, e)))?;

    if !status.success() {
        return Err(ExportError::Share(format!("{} exited with {}", program, status)));
    }

    Ok(())
}
