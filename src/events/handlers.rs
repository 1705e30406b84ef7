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
use tracing::{debug, error, info, warn};

use crate::{
    App, Focus,
    components::{AlbumListAction, Picker, PickerAction, RankingAction},
    config,
    events::{Status, StatusLevel},
    export::{ExportJob, ExportOutcome, ExportTarget},
    model::{
        AlbumRecord,
        catalog::{AlbumBatch, CatalogOwner},
        ranking::DropPayload,
    },
    store,
    tasks::AppTask,
    theme::Theme,
};

pub(super) fn set_status(app: &mut App, level: StatusLevel, text: String) {
    match level {
        StatusLevel::Info => info!("{}", text),
        StatusLevel::Warning => warn!("{}", text),
        StatusLevel::Error => error!("{}", text),
    }
    app.status = Some(Status { level, text });
}

pub(super) fn handle_albums_fetched(app: &mut App, batch: AlbumBatch) {
    let applied = match batch.owner {
        CatalogOwner::Browser => app.album_list.apply_batch(batch),
        CatalogOwner::Picker => match app.picker.as_mut() {
            Some(picker) => picker.apply_batch(batch),
            None => false,
        },
    };

    if !applied {
        debug!("Discarded stale album batch");
    }
}

pub(super) fn handle_albums_fetch_failed(
    app: &mut App,
    owner: CatalogOwner,
    generation: u64,
    message: String,
) {
    match owner {
        CatalogOwner::Browser => {
            app.album_list.query.apply_failure(owner, generation, message);
        }
        CatalogOwner::Picker => {
            if let Some(picker) = app.picker.as_mut() {
                picker.query.apply_failure(owner, generation, message);
            }
        }
    }
}

/// Loads the next page into the album browser.
pub(super) fn handle_load_more(app: &mut App) -> Result<()> {
    if let Some(request) = app.album_list.query.begin_load() {
        app.task_tx.send(AppTask::FetchAlbums(request))?;
    }

    Ok(())
}

/// Opens the picker targeting the rank at `index`, searching for `text`.
pub(super) fn handle_open_picker(app: &mut App, index: usize, text: &str) -> Result<()> {
    if let Err(e) = app.ranking_view.rankings.open_picker(index) {
        set_status(app, StatusLevel::Warning, e.to_string());
        return Ok(());
    }

    let (picker, request) = Picker::open(text, app.year, app.config.max_results as usize);
    app.picker = Some(picker);
    app.ranking_view.select(index);

    if let Some(request) = request {
        app.task_tx.send(AppTask::FetchAlbums(request))?;
    }

    Ok(())
}

pub(super) fn handle_album_list_action(app: &mut App, action: AlbumListAction) -> Result<()> {
    match action {
        AlbumListAction::Grab(album) => {
            let text = format!("Holding \"{}\", drop it on a rank", album.name);
            set_status(app, StatusLevel::Info, text);
            app.ranking_view.hold(DropPayload::Unranked(album));
            focus_rankings(app);
        }
        AlbumListAction::LoadMore => handle_load_more(app)?,
    }

    Ok(())
}

pub(super) fn handle_picker_action(app: &mut App, action: PickerAction) -> Result<()> {
    match action {
        PickerAction::Fetch(request) => app.task_tx.send(AppTask::FetchAlbums(request))?,
        PickerAction::Choose(album) => choose_album(app, album),
        PickerAction::Close => close_picker(app),
    }

    Ok(())
}

/// Puts the chosen album in the rank the picker was opened for. A duplicate
/// keeps the picker open so another album can be chosen.
fn choose_album(app: &mut App, album: AlbumRecord) {
    let Some(index) = app.ranking_view.rankings.picker_target() else {
        close_picker(app);
        return;
    };

    match app.ranking_view.rankings.insert_at(index, album) {
        Ok(_) => {
            if app.ranking_view.held == Some(DropPayload::Ranked(index)) {
                app.ranking_view.held = None;
            }
            commit(app);
            close_picker(app);
        }
        Err(e) => set_status(app, StatusLevel::Warning, e.to_string()),
    }
}

fn close_picker(app: &mut App) {
    app.ranking_view.rankings.close_picker();
    app.picker = None;
}

pub(super) fn handle_ranking_action(app: &mut App, action: RankingAction) -> Result<()> {
    match action {
        RankingAction::Drop { index, payload } => {
            match app.ranking_view.rankings.drop_on(index, payload) {
                Ok(()) => {
                    app.ranking_view.select(index);
                    commit(app);
                }
                Err(e) => set_status(app, StatusLevel::Warning, e.to_string()),
            }
        }
        RankingAction::Delete(index) => handle_delete(app, index),
        RankingAction::OpenPicker(index) => handle_open_picker(app, index, "")?,
    }

    Ok(())
}

pub(super) fn handle_delete(app: &mut App, index: usize) {
    match app.ranking_view.rankings.delete_at(index) {
        Ok(album) => {
            if app.ranking_view.held == Some(DropPayload::Ranked(index)) {
                app.ranking_view.held = None;
            }
            info!("Removed \"{}\" from rank {}", album.name, index + 1);
            commit(app);
        }
        Err(e) => set_status(app, StatusLevel::Warning, e.to_string()),
    }
}

pub(super) fn handle_clear_rankings(app: &mut App) {
    app.ranking_view.rankings.clear();
    if matches!(app.ranking_view.held, Some(DropPayload::Ranked(_))) {
        app.ranking_view.held = None;
    }
    commit(app);
}

/// Persists the ranking after an accepted change.
fn commit(app: &mut App) {
    if let Err(e) = store::save_rankings(&app.store, &app.ranking_view.rankings) {
        set_status(app, StatusLevel::Error, format!("{:#}", e));
    }
}

pub(super) fn handle_export(app: &mut App, target: ExportTarget) -> Result<()> {
    match ExportJob::from_rankings(&app.ranking_view.rankings, target, app.year) {
        Ok(job) => {
            set_status(app, StatusLevel::Info, "Exporting ranking...".to_string());
            app.task_tx.send(AppTask::Export(job))?;
        }
        Err(e) => set_status(app, StatusLevel::Warning, e.to_string()),
    }

    Ok(())
}

pub(super) fn handle_export_finished(app: &mut App, result: Result<ExportOutcome, String>) {
    match result {
        Ok(outcome) => set_status(app, StatusLevel::Info, outcome.message()),
        Err(message) => set_status(app, StatusLevel::Error, message),
    }
}

pub(super) fn handle_toggle_dark_mode(app: &mut App) {
    app.dark_mode = !app.dark_mode;
    app.theme = Theme::for_mode(app.dark_mode);

    if let Err(e) = store::save_dark_mode(&app.store, app.dark_mode) {
        set_status(app, StatusLevel::Error, format!("{:#}", e));
    }
}

/// Switches the browsed year, starting the album browser over.
pub(super) fn handle_set_year(app: &mut App, year: i32) -> Result<()> {
    app.config.year = Some(year);
    if let Err(e) = config::save_config(&app.config) {
        set_status(app, StatusLevel::Error, format!("Failed to save configuration: {}", e));
    }

    restart_browser(app, year)
}

/// Drops everything the album browser has loaded and starts over on `year`.
fn restart_browser(app: &mut App, year: i32) -> Result<()> {
    app.year = year;
    app.album_list.reset(year, app.config.max_results as usize);
    handle_load_more(app)
}

pub(super) fn focus_rankings(app: &mut App) {
    app.focus = Focus::Rankings;
    app.album_list.is_active = false;
    app.ranking_view.is_active = true;
}

pub(super) fn focus_albums(app: &mut App) {
    app.focus = Focus::Albums;
    app.album_list.is_active = true;
    app.ranking_view.is_active = false;
}
