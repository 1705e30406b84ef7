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

//! Spotify catalog access.
//!
//! This module wraps the three catalog endpoints the application uses: the
//! client-credentials token exchange, album search, and album track listings.
//! The transport sits behind the [`CatalogApi`] trait so that the paging and
//! retry logic in [`fetcher`] can be exercised without a network.
//!
//! # Sub-modules
//!
//! * [`fetcher`]: Batch loading, album filtering and popularity ordering.
//! * [`retry`]: Rate-limit backoff and credential rotation.

pub(crate) mod fetcher;
pub(crate) mod retry;

use std::time::Duration;

use base64::Engine;
use reqwest::{
    StatusCode,
    blocking::{Client, Response},
    header::{AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER},
};
use serde::Deserialize;
use thiserror::Error;

use crate::{config::AppConfig, model::AlbumRecord};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Error, Debug)]
pub(crate) enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Failed to get access token (HTTP {0})")]
    Auth(StatusCode),
    #[error("Access token rejected")]
    Unauthorized,
    #[error("API rate limit exceeded")]
    RateLimited { retry_after: Option<Duration> },
    #[error("Unexpected HTTP status {0}")]
    Status(StatusCode),
    #[error("No catalog credentials configured")]
    NoCredentials,
}

/// A client identifier and secret pair.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Credentials {
    pub(crate) client_id: String,
    pub(crate) client_secret: String,
}

impl Credentials {
    pub(crate) fn new(client_id: &str, client_secret: &str) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        }
    }

    /// The value of a Basic `Authorization` header for these credentials.
    pub(crate) fn basic_auth(&self) -> String {
        let pair = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", base64::engine::general_purpose::STANDARD.encode(pair))
    }
}

// Secrets must not end up in the log file.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AccessToken(pub(crate) String);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    albums: AlbumPage,
}

#[derive(Debug, Deserialize)]
struct AlbumPage {
    #[serde(default)]
    items: Vec<Option<AlbumRecord>>,
}

#[derive(Debug, Deserialize)]
struct TrackPage {
    #[serde(default)]
    items: Vec<TrackItem>,
}

#[derive(Debug, Deserialize)]
struct TrackItem {
    #[serde(default)]
    popularity: Option<u32>,
}

/// The catalog operations the fetcher depends on.
pub(crate) trait CatalogApi {
    fn request_token(&self, credentials: &Credentials) -> Result<AccessToken, CatalogError>;

    /// Returns one raw page of search results. Null entries are preserved so
    /// that the caller can tell a short page from a filtered one.
    fn search_albums(
        &self,
        token: &AccessToken,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Option<AlbumRecord>>, CatalogError>;

    /// Returns the popularity of each track on an album, missing values as 0.
    fn album_track_popularity(
        &self,
        token: &AccessToken,
        album_id: &str,
    ) -> Result<Vec<u32>, CatalogError>;
}

pub(crate) struct SpotifyClient {
    client: Client,
    accounts_url: String,
    api_url: String,
}

impl SpotifyClient {
    pub(crate) fn new(config: &AppConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("albumrank/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            accounts_url: config.accounts_url.trim_end_matches('/').to_string(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Downloads raw bytes, used for cover art.
    pub(crate) fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, CatalogError> {
        let response = self.client.get(url).send()?;
        let response = check_status(response)?;
        Ok(response.bytes()?.to_vec())
    }
}

impl CatalogApi for SpotifyClient {
    fn request_token(&self, credentials: &Credentials) -> Result<AccessToken, CatalogError> {
        let url = format!("{}/api/token", self.accounts_url);

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, credentials.basic_auth())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body("grant_type=client_credentials")
            .send()?;

        if response.status() != StatusCode::OK {
            return Err(CatalogError::Auth(response.status()));
        }

        let token: TokenResponse = response.json()?;
        Ok(AccessToken(token.access_token))
    }

    fn search_albums(
        &self,
        token: &AccessToken,
        query: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Option<AlbumRecord>>, CatalogError> {
        let url = format!("{}/v1/search", self.api_url);
        let limit = limit.to_string();
        let offset = offset.to_string();

        let response = self
            .client
            .get(&url)
            .bearer_auth(&token.0)
            .query(&[
                ("q", query),
                ("type", "album"),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ])
            .send()?;

        let page: SearchResponse = check_status(response)?.json()?;
        Ok(page.albums.items)
    }

    fn album_track_popularity(
        &self,
        token: &AccessToken,
        album_id: &str,
    ) -> Result<Vec<u32>, CatalogError> {
        let url = format!("{}/v1/albums/{}/tracks", self.api_url, album_id);

        let response = self.client.get(&url).bearer_auth(&token.0).send()?;

        let page: TrackPage = check_status(response)?.json()?;
        Ok(page
            .items
            .into_iter()
            .map(|t| t.popularity.unwrap_or(0))
            .collect())
    }
}

/// Maps the statuses the fetcher reacts to onto typed errors.
fn check_status(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();

    if status.is_success() {
        Ok(response)
    } else if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        Err(CatalogError::RateLimited { retry_after })
    } else if status == StatusCode::UNAUTHORIZED {
        Err(CatalogError::Unauthorized)
    } else {
        Err(CatalogError::Status(status))
    }
}

#[cfg(test)]
mod tests {
    use std::{io::Read, thread};

    use tiny_http::{Header, Response as HttpResponse, Server};

    use super::*;

    struct Recorded {
        method: String,
        url: String,
        authorization: Option<String>,
        body: String,
    }

    /// Serves canned responses, one per request, and hands back what was
    /// received once all of them have been served.
    fn serve(
        responses: Vec<(u16, String, Vec<(&'static str, &'static str)>)>,
    ) -> (String, thread::JoinHandle<Vec<Recorded>>) {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();

        let handle = thread::spawn(move || {
            let mut recorded = vec![];
            for (status, body, headers) in responses {
                let mut request = server.recv().unwrap();

                let authorization = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.as_str().to_string());
                let mut request_body = String::new();
                request.as_reader().read_to_string(&mut request_body).unwrap();

                recorded.push(Recorded {
                    method: request.method().to_string(),
                    url: request.url().to_string(),
                    authorization,
                    body: request_body,
                });

                let mut response = HttpResponse::from_string(body).with_status_code(status);
                let content_type =
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
                response.add_header(content_type);
                for (name, value) in headers {
                    let header = Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap();
                    response.add_header(header);
                }
                request.respond(response).unwrap();
            }
            recorded
        });

        (format!("http://127.0.0.1:{}", port), handle)
    }

    fn client_for(base: &str) -> SpotifyClient {
        let config = AppConfig {
            accounts_url: base.to_string(),
            api_url: base.to_string(),
            ..AppConfig::default()
        };
        SpotifyClient::new(&config).unwrap()
    }

    #[test]
    fn basic_auth_encodes_id_and_secret() {
        let credentials = Credentials::new("id", "secret");

        assert_eq!(credentials.basic_auth(), "Basic aWQ6c2VjcmV0");
    }

    #[test]
    fn debug_output_hides_secret() {
        let credentials = Credentials::new("id", "hunter2");

        assert!(!format!("{:?}", credentials).contains("hunter2"));
    }

    #[test]
    fn exchanges_client_credentials_for_token() {
        let body = r#"{"access_token":"tok","token_type":"Bearer","expires_in":3600}"#;
        let (base, server) = serve(vec![(200, body.to_string(), vec![])]);

        let token = client_for(&base).request_token(&Credentials::new("id", "secret")).unwrap();

        let recorded = server.join().unwrap();
        assert_eq!(token, AccessToken("tok".to_string()));
        assert_eq!(recorded[0].method, "POST");
        assert_eq!(recorded[0].url, "/api/token");
        assert_eq!(recorded[0].authorization.as_deref(), Some("Basic aWQ6c2VjcmV0"));
        assert_eq!(recorded[0].body, "grant_type=client_credentials");
    }

    #[test]
    fn token_failure_is_an_auth_error() {
        let body = r#"{"error":"invalid_client"}"#;
        let (base, server) = serve(vec![(400, body.to_string(), vec![])]);

        let result = client_for(&base).request_token(&Credentials::new("id", "bad"));

        server.join().unwrap();
        assert!(matches!(result, Err(CatalogError::Auth(s)) if s == StatusCode::BAD_REQUEST));
    }

    #[test]
    fn search_sends_query_and_keeps_null_items() {
        let body = r#"{"albums":{"items":[
            {"id":"a","name":"A","album_type":"album","artists":[],"images":[],"release_date":"2026-01-01"},
            null
        ]}}"#;
        let (base, server) = serve(vec![(200, body.to_string(), vec![])]);

        let items = client_for(&base)
            .search_albums(&AccessToken("tok".to_string()), "year:2026", 50, 100)
            .unwrap();

        let recorded = server.join().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[1].is_none());
        assert_eq!(recorded[0].authorization.as_deref(), Some("Bearer tok"));
        assert!(recorded[0].url.starts_with("/v1/search?"));
        assert!(recorded[0].url.contains("q=year%3A2026"));
        assert!(recorded[0].url.contains("type=album"));
        assert!(recorded[0].url.contains("limit=50"));
        assert!(recorded[0].url.contains("offset=100"));
    }

    #[test]
    fn rate_limit_reports_retry_after() {
        let (base, server) = serve(vec![(429, "{}".to_string(), vec![("Retry-After", "3")])]);

        let result =
            client_for(&base).search_albums(&AccessToken("tok".to_string()), "year:2026", 50, 0);

        server.join().unwrap();
        assert!(matches!(
            result,
            Err(CatalogError::RateLimited { retry_after: Some(d) }) if d == Duration::from_secs(3)
        ));
    }

    #[test]
    fn track_popularity_defaults_missing_values() {
        let body = r#"{"items":[{"popularity":40},{"name":"no score"},{"popularity":2}]}"#;
        let (base, server) = serve(vec![(200, body.to_string(), vec![])]);

        let scores = client_for(&base)
            .album_track_popularity(&AccessToken("tok".to_string()), "abc")
            .unwrap();

        let recorded = server.join().unwrap();
        assert_eq!(scores, vec![40, 0, 2]);
        assert_eq!(recorded[0].url, "/v1/albums/abc/tracks");
    }
}
