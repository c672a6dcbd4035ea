//! Route handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use game_shelf_catalog::{GameFilter, GameRecord, GameSummary, LookupKind};
use game_shelf_db::{
    delete_game as db_delete_game, get_game, insert_game, list_games as db_list_games,
    list_lookups, update_game as db_update_game,
};
use rusqlite::Connection;
use serde_json::json;

use crate::error::WebError;
use crate::extract::{GameForm, GameId, HxRequest, ListQuery};
use crate::state::AppState;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn index(State(state): State<AppState>) -> Result<Response, WebError> {
    let (platforms, genres) = state
        .with_db(|conn| {
            Ok((
                list_lookups(conn, LookupKind::Platform)?,
                list_lookups(conn, LookupKind::Genre)?,
            ))
        })
        .await?;
    Ok(Html(state.templates.index(&platforms, &genres)?).into_response())
}

pub async fn list_games(
    State(state): State<AppState>,
    HxRequest(hx): HxRequest,
    ListQuery(filter): ListQuery,
) -> Result<Response, WebError> {
    let query = filter.clone();
    let games = state
        .with_db(move |conn| Ok(db_list_games(conn, &query)?))
        .await?;
    log::debug!("Listing {} games", games.len());

    if hx {
        Ok(Html(state.templates.games(&games, &filter)?).into_response())
    } else {
        Ok(Json(games).into_response())
    }
}

pub async fn create_game(
    State(state): State<AppState>,
    HxRequest(hx): HxRequest,
    GameForm(game): GameForm,
) -> Result<Response, WebError> {
    let (record, games) = state
        .with_db(move |conn| {
            let id = insert_game(conn, &game)?;
            log::info!("New game created: {} ({})", game.title, id);
            load_after_write(conn, id, hx)
        })
        .await?;

    match games {
        Some(games) => list_fragment(&state, &games),
        None => Ok((StatusCode::CREATED, Json(record)).into_response()),
    }
}

pub async fn view_game(
    State(state): State<AppState>,
    HxRequest(hx): HxRequest,
    GameId(id): GameId,
) -> Result<Response, WebError> {
    let record = state
        .with_db(move |conn| get_game(conn, id)?.ok_or(WebError::NotFound))
        .await?;

    if hx {
        Ok(Html(state.templates.view_game(&record)?).into_response())
    } else {
        Ok(Json(record).into_response())
    }
}

pub async fn edit_game(
    State(state): State<AppState>,
    GameId(id): GameId,
) -> Result<Response, WebError> {
    let (record, platforms, genres) = state
        .with_db(move |conn| {
            let record = get_game(conn, id)?.ok_or(WebError::NotFound)?;
            Ok((
                record,
                list_lookups(conn, LookupKind::Platform)?,
                list_lookups(conn, LookupKind::Genre)?,
            ))
        })
        .await?;
    Ok(Html(state.templates.edit_game(&record, &platforms, &genres)?).into_response())
}

pub async fn update_game(
    State(state): State<AppState>,
    HxRequest(hx): HxRequest,
    GameId(id): GameId,
    GameForm(game): GameForm,
) -> Result<Response, WebError> {
    let (record, games) = state
        .with_db(move |conn| {
            db_update_game(conn, id, &game)?;
            log::info!("Game updated: {} ({})", game.title, id);
            load_after_write(conn, id, hx)
        })
        .await?;

    match games {
        Some(games) => list_fragment(&state, &games),
        None => Ok(Json(record).into_response()),
    }
}

pub async fn delete_game(
    State(state): State<AppState>,
    HxRequest(hx): HxRequest,
    GameId(id): GameId,
) -> Result<Response, WebError> {
    let games = state
        .with_db(move |conn| {
            db_delete_game(conn, id)?;
            log::info!("Game deleted: {}", id);
            if hx {
                Ok(Some(db_list_games(conn, &GameFilter::default())?))
            } else {
                Ok(None)
            }
        })
        .await?;

    match games {
        Some(games) => list_fragment(&state, &games),
        None => Ok(Json(json!({ "message": "Game deleted", "id": id })).into_response()),
    }
}

/// Reload a written game, plus the full list when an htmx fragment is due.
fn load_after_write(
    conn: &Connection,
    id: i64,
    hx: bool,
) -> Result<(GameRecord, Option<Vec<GameSummary>>), WebError> {
    let record = get_game(conn, id)?.ok_or(WebError::NotFound)?;
    let games = if hx {
        Some(db_list_games(conn, &GameFilter::default())?)
    } else {
        None
    };
    Ok((record, games))
}

fn list_fragment(state: &AppState, games: &[GameSummary]) -> Result<Response, WebError> {
    let html = state.templates.games(games, &GameFilter::default())?;
    Ok(Html(html).into_response())
}
