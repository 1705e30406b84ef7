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

//! Application configuration.
//!
//! This module manages the application configuration file, and reads the
//! catalog credentials from the environment (optionally seeded from a `.env`
//! file). Credentials are never written to the configuration file.

use std::{env, path::PathBuf};

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    model::ranking::DEFAULT_SLOT_COUNT,
    spotify::{Credentials, retry::RetryPolicy},
};

const CONFIG_NAME: &str = "albumrank";

const CLIENT_ID_VARS: [(&str, &str); 2] = [
    ("SPOTIFY_CLIENT_ID", "SPOTIFY_CLIENT_SECRET"),
    ("SPOTIFY_CLIENT_ID_2", "SPOTIFY_CLIENT_SECRET_2"),
];

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) version: u32,
    /// Release year to browse, the current year when unset.
    pub(crate) year: Option<i32>,
    pub(crate) slot_count: usize,
    pub(crate) page_size: u32,
    pub(crate) min_batch: usize,
    pub(crate) max_results: u32,
    pub(crate) rank_by_popularity: bool,
    pub(crate) retry: RetryPolicy,
    pub(crate) export_dir: Option<PathBuf>,
    pub(crate) share_command: Option<String>,
    pub(crate) accounts_url: String,
    pub(crate) api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            year: None,
            slot_count: DEFAULT_SLOT_COUNT,
            page_size: 50,
            min_batch: 12,
            max_results: 1000,
            rank_by_popularity: false,
            retry: RetryPolicy::default(),
            export_dir: None,
            share_command: None,
            accounts_url: "https://accounts.spotify.com".to_string(),
            api_url: "https://api.spotify.com".to_string(),
        }
    }
}

impl AppConfig {
    pub(crate) fn year(&self) -> i32 {
        self.year.unwrap_or_else(|| chrono::Local::now().year())
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slot_count.max(1)
    }

    /// Where downloaded rankings are written.
    pub(crate) fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::picture_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// The program used to hand an exported image to the desktop.
    pub(crate) fn share_command(&self) -> String {
        self.share_command.clone().unwrap_or_else(|| {
            if cfg!(target_os = "macos") {
                "open".to_string()
            } else if cfg!(target_os = "windows") {
                "explorer".to_string()
            } else {
                "xdg-open".to_string()
            }
        })
    }
}

pub(crate) fn load_config() -> AppConfig {
    match confy::load(CONFIG_NAME, None) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }
    }
}

pub(crate) fn save_config(cfg: &AppConfig) -> Result<(), confy::ConfyError> {
    confy::store(CONFIG_NAME, None, cfg)
}

/// The directory holding the store, the log file and shared images.
pub(crate) fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(CONFIG_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Reads every configured credential pair, in failover order.
pub(crate) fn load_credentials() -> Vec<Credentials> {
    if dotenvy::dotenv().is_ok() {
        info!("Loaded .env file");
    }

    credentials_from(|name| env::var(name).ok())
}

fn credentials_from(lookup: impl Fn(&str) -> Option<String>) -> Vec<Credentials> {
    CLIENT_ID_VARS
        .iter()
        .filter_map(|(id_var, secret_var)| {
            let id = lookup(id_var).filter(|v| !v.trim().is_empty())?;
            let secret = lookup(secret_var).filter(|v| !v.trim().is_empty())?;
            Some(Credentials::new(id.trim(), secret.trim()))
        })
        .collect()
}
