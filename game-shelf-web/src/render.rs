//! Server-side HTML rendering with handlebars.
//!
//! Templates are compiled into the binary. Handlebars escapes every
//! `{{value}}`, so user text is safe to echo back.

use game_shelf_catalog::{GameFilter, GameRecord, GameSummary, Lookup};
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;
use serde_json::json;

const INDEX: &str = include_str!("../templates/index.hbs");
const GAMES: &str = include_str!("../templates/games.hbs");
const VIEW_GAME: &str = include_str!("../templates/view_game.hbs");
const EDIT_GAME: &str = include_str!("../templates/edit_game.hbs");
const GAME_FIELDS: &str = include_str!("../templates/game_fields.hbs");

/// The compiled page and fragment templates.
pub struct Templates {
    hb: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, TemplateError> {
        let mut hb = Handlebars::new();
        hb.register_partial("game_fields", GAME_FIELDS)?;
        hb.register_template_string("index", INDEX)?;
        hb.register_template_string("games", GAMES)?;
        hb.register_template_string("view_game", VIEW_GAME)?;
        hb.register_template_string("edit_game", EDIT_GAME)?;
        Ok(Self { hb })
    }

    /// Full landing page with the filter form, create form and list target.
    pub fn index(&self, platforms: &[Lookup], genres: &[Lookup]) -> Result<String, RenderError> {
        self.hb.render(
            "index",
            &json!({
                "platforms": choices(platforms, &[]),
                "genres": choices(genres, &[]),
            }),
        )
    }

    /// The game list fragment.
    pub fn games(&self, games: &[GameSummary], filter: &GameFilter) -> Result<String, RenderError> {
        self.hb.render(
            "games",
            &json!({
                "games": games,
                "count": games.len(),
                "title_filter": filter.title_term(),
                "completed_filter": filter.completed_only,
                "rating_filter": filter.rating_floor(),
            }),
        )
    }

    /// Read-only details of one game.
    pub fn view_game(&self, record: &GameRecord) -> Result<String, RenderError> {
        self.hb.render("view_game", &json!({ "game": record }))
    }

    /// Edit form prefilled with the game's current values and links.
    pub fn edit_game(
        &self,
        record: &GameRecord,
        platforms: &[Lookup],
        genres: &[Lookup],
    ) -> Result<String, RenderError> {
        self.hb.render(
            "edit_game",
            &json!({
                "game": record,
                "platforms": choices(platforms, &record.platform_ids()),
                "genres": choices(genres, &record.genre_ids()),
            }),
        )
    }
}

#[derive(Serialize)]
struct LookupChoice<'a> {
    id: i64,
    name: &'a str,
    selected: bool,
}

fn choices<'a>(all: &'a [Lookup], selected: &[i64]) -> Vec<LookupChoice<'a>> {
    all.iter()
        .map(|l| LookupChoice {
            id: l.id,
            name: &l.name,
            selected: selected.contains(&l.id),
        })
        .collect()
}
