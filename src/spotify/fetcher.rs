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

//! Album batch loading.
//!
//! A single call to [`CatalogFetcher::fetch_batch`] is one logical "load":
//! it authenticates if needed, then requests pages of search results until
//! enough full-length albums have been gathered or the upstream runs out.
//!
//! De-duplication across batches is left to the query state that receives
//! the batch.

use tracing::{debug, info, warn};

use crate::{
    config::AppConfig,
    model::{
        AlbumRecord,
        catalog::{AlbumBatch, FetchRequest},
    },
    spotify::{
        AccessToken, CatalogApi, CatalogError,
        retry::{CredentialPool, RetryPolicy, Sleeper},
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FetchSettings {
    pub(crate) page_size: u32,
    /// Keep paging within one load until this many albums were found. Zero
    /// means one page per load.
    pub(crate) min_batch: usize,
    /// The upstream does not serve results past this offset.
    pub(crate) max_offset: u32,
    pub(crate) rank_by_popularity: bool,
}

impl From<&AppConfig> for FetchSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            page_size: config.page_size.max(1),
            min_batch: config.min_batch,
            max_offset: config.max_results,
            rank_by_popularity: config.rank_by_popularity,
        }
    }
}

pub(crate) struct CatalogFetcher<A, S> {
    api: A,
    pool: CredentialPool,
    token: Option<AccessToken>,
    policy: RetryPolicy,
    sleeper: S,
    settings: FetchSettings,
}

impl<A: CatalogApi, S: Sleeper> CatalogFetcher<A, S> {
    pub(crate) fn new(
        api: A,
        pool: CredentialPool,
        policy: RetryPolicy,
        sleeper: S,
        settings: FetchSettings,
    ) -> Self {
        Self {
            api,
            pool,
            token: None,
            policy,
            sleeper,
            settings,
        }
    }

    pub(crate) fn api(&self) -> &A {
        &self.api
    }

    /// Exchanges the current credential pair for a fresh access token.
    pub(crate) fn authenticate(&mut self) -> Result<(), CatalogError> {
        let credentials = self.pool.current().ok_or(CatalogError::NoCredentials)?;
        let token = self.api.request_token(credentials)?;

        info!(client_id = %credentials.client_id, "Obtained catalog access token");
        self.token = Some(token);

        Ok(())
    }

    /// Loads the next batch of albums for a request.
    ///
    /// # Errors
    ///
    /// Returns the first authentication or request error. Albums gathered
    /// from earlier pages of the same load are discarded in that case, and
    /// the cursor is not advanced.
    pub(crate) fn fetch_batch(
        &mut self,
        request: &FetchRequest,
    ) -> Result<AlbumBatch, CatalogError> {
        let query = request.search_expression();
        let page_size = self.settings.page_size;

        let mut offset = request.offset;
        let mut albums: Vec<AlbumRecord> = vec![];
        let mut exhausted = false;

        self.ensure_token()?;

        loop {
            if offset >= self.settings.max_offset {
                exhausted = true;
                break;
            }

            let items = self.with_retry(|api, token| {
                api.search_albums(token, &query, page_size, offset)
            })?;
            let page_len = items.len();

            let mut page: Vec<AlbumRecord> = items
                .into_iter()
                .flatten()
                .filter(AlbumRecord::is_full_album)
                .collect();

            if self.settings.rank_by_popularity {
                self.sort_by_popularity(&mut page);
            }

            debug!(query = %query, offset, page_len, kept = page.len(), "Fetched search page");

            albums.extend(page);
            offset += page_size;

            if page_len < page_size as usize {
                exhausted = true;
                break;
            }

            if albums.len() >= self.settings.min_batch {
                break;
            }
        }

        Ok(AlbumBatch {
            owner: request.owner,
            generation: request.generation,
            albums,
            next_offset: offset,
            exhausted,
        })
    }

    /// Orders albums by the summed popularity of their tracks, highest first.
    ///
    /// Ties keep their search order. An album whose track listing cannot be
    /// fetched scores zero.
    fn sort_by_popularity(&mut self, albums: &mut Vec<AlbumRecord>) {
        let mut scored: Vec<(u64, AlbumRecord)> = Vec::with_capacity(albums.len());

        for album in albums.drain(..) {
            let tracks =
                self.with_retry(|api, token| api.album_track_popularity(token, &album.id));
            let score = match tracks {
                Ok(values) => values.iter().map(|&v| u64::from(v)).sum(),
                Err(e) => {
                    warn!(album_id = %album.id, "Failed to fetch track listing: {}", e);
                    0
                }
            };
            scored.push((score, album));
        }

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        albums.extend(scored.into_iter().map(|(_, album)| album));
    }

    fn ensure_token(&mut self) -> Result<AccessToken, CatalogError> {
        if self.token.is_none() {
            self.authenticate()?;
        }

        self.token.clone().ok_or(CatalogError::NoCredentials)
    }

    /// Runs a catalog request under the rate-limit policy.
    ///
    /// A 429 rotates the credential pair, re-authenticates and backs off
    /// before the next attempt. A 401 re-authenticates once with the same
    /// pair and does not count as an attempt.
    fn with_retry<T>(
        &mut self,
        mut op: impl FnMut(&A, &AccessToken) -> Result<T, CatalogError>,
    ) -> Result<T, CatalogError> {
        let attempts = self.policy.attempts();
        let mut attempt = 1;
        let mut reauthenticated = false;

        loop {
            let token = self.ensure_token()?;

            match op(&self.api, &token) {
                Err(CatalogError::RateLimited { retry_after }) if attempt < attempts => {
                    let rotated = self.pool.rotate();
                    let delay = self.policy.delay_for(attempt, retry_after);
                    warn!(
                        attempt,
                        rotated,
                        delay_ms = delay.as_millis() as u64,
                        "Rate limited by catalog"
                    );

                    self.token = None;
                    self.authenticate()?;
                    self.sleeper.sleep(delay);
                    attempt += 1;
                }
                Err(CatalogError::Unauthorized) if !reauthenticated => {
                    warn!("Access token rejected, re-authenticating");
                    self.token = None;
                    reauthenticated = true;
                }
                result => return result,
            }
        }
    }
}
