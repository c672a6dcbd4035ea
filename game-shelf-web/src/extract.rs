//! Request extractors: the htmx header, path ids, list filters and game
//! forms.
//!
//! All rejections surface as [`WebError::Validation`], so a malformed
//! request always answers 422 with the structured error body.

use std::convert::Infallible;

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header;
use axum::http::request::Parts;
use axum_extra::extract::Form;
use game_shelf_catalog::{GameFilter, NewGame};
use serde::Deserialize;

use crate::error::WebError;

// ── HX-Request ──────────────────────────────────────────────────────────────

/// Whether the request came from htmx and wants an HTML fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HxRequest(pub bool);

impl<S: Send + Sync> FromRequestParts<S> for HxRequest {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.headers.contains_key("hx-request")))
    }
}

// ── Path ────────────────────────────────────────────────────────────────────

/// The `{id}` path segment of a game route.
#[derive(Debug, Clone, Copy)]
pub struct GameId(pub i64);

impl<S: Send + Sync> FromRequestParts<S> for GameId {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| WebError::validation(e.body_text()))?;
        Ok(Self(id))
    }
}

// ── List Filters ────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct ListParams {
    title: Option<String>,
    completed: Option<String>,
    rating: Option<String>,
}

/// Filters for `GET /games`, parsed from the query string.
#[derive(Debug, Clone, Default)]
pub struct ListQuery(pub GameFilter);

impl<S: Send + Sync> FromRequestParts<S> for ListQuery {
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ListParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| WebError::validation(e.body_text()))?;

        let completed_only = match params.completed.as_deref() {
            Some(raw) => parse_flag("completed", raw)?.unwrap_or(false),
            None => false,
        };
        let min_rating = match params.rating.as_deref() {
            Some(raw) => parse_int("rating", raw)?,
            None => None,
        };

        Ok(Self(GameFilter {
            title: params.title,
            completed_only,
            min_rating,
        }))
    }
}

// ── Game Form ───────────────────────────────────────────────────────────────

/// A scalar that may arrive as a JSON bool, a JSON number or a form string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum FieldValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
struct RawGame {
    title: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    completed: Option<FieldValue>,
    #[serde(default)]
    steam_store_url: String,
    #[serde(default)]
    gog_store_url: String,
    #[serde(default)]
    image_url: String,
    #[serde(default)]
    comments: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    developer: String,
    rating: Option<FieldValue>,
    #[serde(default)]
    platforms: Vec<FieldValue>,
    #[serde(default)]
    genres: Vec<FieldValue>,
}

/// The body of a create or update request.
///
/// Accepts `application/json`, or URL-encoded form fields otherwise. Repeated
/// `platforms` / `genres` keys collect into id lists.
#[derive(Debug, Clone)]
pub struct GameForm(pub NewGame);

impl<S: Send + Sync> FromRequest<S> for GameForm {
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        let raw = if is_json {
            let Json(raw) = Json::<RawGame>::from_request(req, state)
                .await
                .map_err(|e| WebError::validation(e.body_text()))?;
            raw
        } else {
            let Form(raw) = Form::<RawGame>::from_request(req, state)
                .await
                .map_err(|e| WebError::validation(e.to_string()))?;
            raw
        };

        raw.into_new_game().map(Self)
    }
}

impl RawGame {
    fn into_new_game(self) -> Result<NewGame, WebError> {
        let title = required("title", self.title)?;
        if title.trim().is_empty() {
            return Err(WebError::validation("title: must not be blank"));
        }

        let completed = match &self.completed {
            Some(v) => flag_value("completed", v)?,
            None => false,
        };
        let rating = match &self.rating {
            Some(v) => int_value("rating", v)?.unwrap_or(0),
            None => 0,
        };

        let mut game = NewGame {
            title,
            start_date: required("start_date", self.start_date)?,
            end_date: required("end_date", self.end_date)?,
            completed,
            steam_store_url: self.steam_store_url,
            gog_store_url: self.gog_store_url,
            image_url: self.image_url,
            comments: self.comments,
            tags: self.tags,
            developer: self.developer,
            rating,
            platform_ids: id_list("platforms", &self.platforms)?,
            genre_ids: id_list("genres", &self.genres)?,
        };
        game.dedup_links();
        Ok(game)
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, WebError> {
    value.ok_or_else(|| WebError::validation(format!("{field}: field required")))
}

fn flag_value(field: &str, value: &FieldValue) -> Result<bool, WebError> {
    match value {
        FieldValue::Bool(b) => Ok(*b),
        FieldValue::Int(i) => Ok(*i != 0),
        FieldValue::Text(s) => Ok(parse_flag(field, s)?.unwrap_or(false)),
    }
}

fn int_value(field: &str, value: &FieldValue) -> Result<Option<i64>, WebError> {
    match value {
        FieldValue::Int(i) => Ok(Some(*i)),
        FieldValue::Text(s) => parse_int(field, s),
        FieldValue::Bool(_) => Err(WebError::validation(format!(
            "{field}: expected an integer"
        ))),
    }
}

fn id_list(field: &str, values: &[FieldValue]) -> Result<Vec<i64>, WebError> {
    let mut ids = Vec::with_capacity(values.len());
    for value in values {
        if let Some(id) = int_value(field, value)? {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Parse a checkbox or query flag. Blank means "not given".
fn parse_flag(field: &str, raw: &str) -> Result<Option<bool>, WebError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "on" | "true" | "1" | "yes" => Ok(Some(true)),
        "off" | "false" | "0" | "no" => Ok(Some(false)),
        other => Err(WebError::validation(format!(
            "{field}: expected a boolean, got '{other}'"
        ))),
    }
}

/// Parse an integer field. Blank means "not given".
fn parse_int(field: &str, raw: &str) -> Result<Option<i64>, WebError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| WebError::validation(format!("{field}: expected an integer, got '{raw}'")))
}
