use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::api::{xml::XmlNode, DescriptionCleaner};

/// One entry of a collection response, built fresh per request.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct GameSummary {
    pub id: String,
    pub title: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_published: Option<String>,

    pub players: String,
    pub playtime: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl GameSummary {
    /// Builds a summary from a collection `item` node. Items without an
    /// `objectid` cannot be addressed and yield `None`.
    pub fn from_collection_item(item: &XmlNode) -> Option<Self> {
        let id = non_empty(item.attr("objectid"))?.to_owned();

        let stats = item.descendant("stats");
        Some(GameSummary {
            id,
            title: title_of(item),
            year_published: text_of(item, "yearpublished"),
            players: range_or_unspecified(
                stats.and_then(|stats| stats.attr("minplayers")),
                stats.and_then(|stats| stats.attr("maxplayers")),
            ),
            playtime: range_or_unspecified(
                stats.and_then(|stats| stats.attr("minplaytime")),
                stats.and_then(|stats| stats.attr("maxplaytime")),
            ),
            thumbnail: text_of(item, "thumbnail"),
        })
    }
}

/// The full detail response for a single boardgame.
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct GameDetail {
    pub id: String,
    pub title: String,
    pub description: String,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub players: String,
    pub playtime: String,

    pub categories: String,
    pub expansions: Vec<String>,
}

impl GameDetail {
    pub fn from_boardgame(game_id: u64, game: &XmlNode) -> Self {
        GameDetail {
            id: match non_empty(game.attr("objectid")) {
                Some(id) => id.to_owned(),
                None => game_id.to_string(),
            },
            title: title_of(game),
            description: DescriptionCleaner::strip_markup(
                game.descendant("description")
                    .map(|description| description.text())
                    .unwrap_or_default(),
            ),
            image: text_of(game, "image"),
            players: range_or_unspecified(
                game.descendant("minplayers").map(|node| node.text()),
                game.descendant("maxplayers").map(|node| node.text()),
            ),
            playtime: range_or_unspecified(
                game.descendant("minplaytime").map(|node| node.text()),
                game.descendant("maxplaytime").map(|node| node.text()),
            ),
            categories: game
                .descendants("boardgamecategory")
                .iter()
                .map(|category| category.text())
                .filter(|text| !text.is_empty())
                .join(", "),
            expansions: game
                .descendants("boardgameexpansion")
                .iter()
                .map(|expansion| expansion.text().to_owned())
                .filter(|text| !text.is_empty())
                .collect(),
        }
    }
}

/// Geekdo payloads list alternate names next to the canonical one; the
/// `primary` flag picks the canonical name, falling back to the first.
fn title_of(node: &XmlNode) -> String {
    let names = node.descendants("name");
    let name = names
        .iter()
        .find(|name| name.attr("primary") == Some("true"))
        .or_else(|| names.first());

    match name {
        Some(name) if !name.text().is_empty() => name.text().to_owned(),
        _ => UNKNOWN_TITLE.to_owned(),
    }
}

fn text_of(node: &XmlNode, name: &str) -> Option<String> {
    node.descendant(name)
        .map(|node| node.text().to_owned())
        .filter(|text| !text.is_empty())
}

fn range_or_unspecified(min: Option<&str>, max: Option<&str>) -> String {
    match (non_empty(min), non_empty(max)) {
        (Some(min), Some(max)) => format!("{min} - {max}"),
        _ => UNSPECIFIED.to_owned(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

const UNKNOWN_TITLE: &str = "unknown title";
const UNSPECIFIED: &str = "unspecified";
