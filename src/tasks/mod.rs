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

//! Asynchronous application task processing.
//!
//! This module implements the command pattern used to offload blocking work,
//! catalog requests and image export, from the main UI thread. A single
//! worker thread owns the catalog fetcher and processes [`AppTask`]s one at a
//! time, broadcasting the results back to the application via [`AppEvent`]s.
//!
//! Because there is only one worker, overlapping loads never run
//! concurrently; they complete in the order they were requested and any
//! result that has gone stale in the meantime is discarded by the receiving
//! query.
//!
//! Only actions that may block, or may take more than a trivial amount of time
//! to process, should be implemented as tasks. Other actions are better
//! suited to events.

mod handlers;
use handlers::*;

use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use anyhow::{Context, Result};
use tracing::{debug, error};

use crate::{
    config::AppConfig,
    events::AppEvent,
    export::{ExportJob, ExportSettings, resolve::CoverSource},
    model::catalog::FetchRequest,
    spotify::{
        CatalogApi, Credentials, SpotifyClient,
        fetcher::{CatalogFetcher, FetchSettings},
        retry::{CredentialPool, Sleeper, ThreadSleeper},
    },
};

#[derive(Debug)]
pub(crate) enum AppTask {
    FetchAlbums(FetchRequest),
    Export(ExportJob),
}

/// Spawns a background thread to process application tasks.
///
/// The worker owns the catalog client, the credential pool and the current
/// access token, and enters a blocking loop listening for incoming
/// [`AppTask`]s. The loop ends when every task sender has been dropped.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `credentials` - Catalog credential pairs, in failover order.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created.
pub(crate) fn spawn_task_worker(
    config: &AppConfig,
    credentials: Vec<Credentials>,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let client = SpotifyClient::new(config).context("Failed to create catalog client")?;
    let fetcher = CatalogFetcher::new(
        client,
        CredentialPool::new(credentials),
        config.retry.clone(),
        ThreadSleeper,
        FetchSettings::from(config),
    );
    let export_settings = ExportSettings::from(config);

    thread::spawn(move || {
        let mut ctx = TaskContext {
            event_tx: &event_tx,
            fetcher,
            export_settings,
        };

        while let Ok(task) = task_rx.recv() {
            if let Err(e) = handle_task(task, &mut ctx) {
                error!("Task failed: {:#}", e);
                let _ = event_tx.send(AppEvent::Error(format!("{:#}", e)));
            }
        }

        debug!("Task worker finished");
    });

    Ok(())
}

/// Bundles shared resources required by task handlers to simplify resource
/// passing when invoking those handler functions.
struct TaskContext<'a, A, S> {
    event_tx: &'a Sender<AppEvent>,
    fetcher: CatalogFetcher<A, S>,
    export_settings: ExportSettings,
}

/// Orchestrates the execution of a single task.
///
/// This function implements the logic for each task and sends the result back
/// through the application event channel.
fn handle_task<A, S>(task: AppTask, ctx: &mut TaskContext<A, S>) -> Result<()>
where
    A: CatalogApi + CoverSource,
    S: Sleeper,
{
    match task {
        AppTask::FetchAlbums(request) => fetch_albums(ctx, request),
        AppTask::Export(job) => export(ctx, job),
    }
}
