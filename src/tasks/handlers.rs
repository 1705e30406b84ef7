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

use anyhow::Result;
use tracing::warn;

use crate::{
    events::AppEvent,
    export::{ExportJob, resolve::CoverSource, run_export},
    model::catalog::FetchRequest,
    spotify::{CatalogApi, retry::Sleeper},
    tasks::TaskContext,
};

/// Failures are reported to the query that asked, so it can clear its
/// loading state and keep what it already has.
pub(super) fn fetch_albums<A: CatalogApi, S: Sleeper>(
    ctx: &mut TaskContext<A, S>,
    request: FetchRequest,
) -> Result<()> {
    match ctx.fetcher.fetch_batch(&request) {
        Ok(batch) => ctx.event_tx.send(AppEvent::AlbumsFetched(batch))?,
        Err(e) => {
            warn!(
                query = %request.search_expression(),
                offset = request.offset,
                "Album fetch failed: {}",
                e
            );
            ctx.event_tx.send(AppEvent::AlbumsFetchFailed {
                owner: request.owner,
                generation: request.generation,
                message: e.to_string(),
            })?;
        }
    }

    Ok(())
}

pub(super) fn export<A: CatalogApi + CoverSource, S: Sleeper>(
    ctx: &mut TaskContext<A, S>,
    job: ExportJob,
) -> Result<()> {
    let result = run_export(&job, ctx.fetcher.api(), &ctx.export_settings).map_err(|e| {
        warn!("Export failed: {}", e);
        e.to_string()
    });
    ctx.event_tx.send(AppEvent::ExportFinished(result))?;

    Ok(())
}
