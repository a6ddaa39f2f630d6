use std::time::Duration;

use reqwest::StatusCode;
use tracing::{info, instrument, warn};

use crate::{
    documents::{GameDetail, GameSummary},
    Status,
};

use super::xml::{self, XmlNode};

/// Client for the Geekdo XML API.
pub struct GeekdoApi {
    client: reqwest::Client,
    base_url: String,
    collection_user: String,
}

impl GeekdoApi {
    pub fn new(base_url: &str, collection_user: &str) -> Result<GeekdoApi, Status> {
        Ok(GeekdoApi {
            client: reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            base_url: base_url.trim_end_matches('/').to_owned(),
            collection_user: String::from(collection_user),
        })
    }

    pub fn collection_user(&self) -> &str {
        &self.collection_user
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn get_collection(&self) -> Result<Vec<GameSummary>, Status> {
        let uri = format!(
            "{}{GEEKDO_COLLECTION_PATH}/{}",
            &self.base_url, &self.collection_user
        );
        let root = self.fetch_xml(&uri).await?;

        let games = map_collection(&root);
        info! {
            "collection '{}': {} games", &self.collection_user, games.len()
        }

        Ok(games)
    }

    #[instrument(level = "trace", skip(self))]
    pub async fn get_boardgame(&self, game_id: u64) -> Result<GameDetail, Status> {
        let uri = format!("{}{GEEKDO_BOARDGAME_PATH}/{game_id}", &self.base_url);
        let root = self.fetch_xml(&uri).await?;

        map_detail(game_id, &root)
    }

    async fn fetch_xml(&self, uri: &str) -> Result<XmlNode, Status> {
        let resp = self.client.get(uri).send().await?;

        let status = resp.status();
        if status == StatusCode::ACCEPTED {
            // Geekdo queues collection exports and answers 202 until the
            // export is ready; there is no data to serve yet.
            return Err(Status::unavailable(format!(
                "upstream queued the request: {uri}"
            )));
        }
        if !status.is_success() {
            return Err(Status::unavailable(format!(
                "upstream returned {status}: {uri}"
            )));
        }

        let text = resp.text().await?;
        xml::parse(&text)
    }
}

/// Maps every `item` node of a collection response, best effort. Items that
/// cannot be mapped are skipped, never surfaced to the caller.
fn map_collection(root: &XmlNode) -> Vec<GameSummary> {
    root.descendants("item")
        .into_iter()
        .filter_map(|item| {
            let game = GameSummary::from_collection_item(item);
            if game.is_none() {
                warn!("skipping collection item without an objectid");
            }
            game
        })
        .collect()
}

fn map_detail(game_id: u64, root: &XmlNode) -> Result<GameDetail, Status> {
    match root.descendant("boardgame") {
        Some(game) => Ok(GameDetail::from_boardgame(game_id, game)),
        None => Err(Status::not_found(format!("boardgame {game_id} not found"))),
    }
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const GEEKDO_COLLECTION_PATH: &str = "/collection";
const GEEKDO_BOARDGAME_PATH: &str = "/boardgame";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_keeps_defective_items_with_sentinel_title() {
        let root = xml::parse(
            r#"<items totalitems="3">
                 <item objectid="1"><name>Azul</name></item>
                 <item objectid="2"></item>
                 <item objectid="3"><name>Ra</name></item>
               </items>"#,
        )
        .unwrap();

        let games = map_collection(&root);
        assert_eq!(games.len(), 3);
        assert_eq!(games[1].title, "unknown title");
    }

    #[test]
    fn collection_skips_unaddressable_items() {
        let root = xml::parse(
            r#"<items totalitems="2">
                 <item objectid="1"><name>Azul</name></item>
                 <item><name>Ghost</name></item>
               </items>"#,
        )
        .unwrap();

        let games = map_collection(&root);
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, "1");
    }

    #[test]
    fn empty_collection_maps_to_empty_list() {
        let root = xml::parse(r#"<items totalitems="0"></items>"#).unwrap();

        assert!(map_collection(&root).is_empty());
    }

    #[test]
    fn detail_without_boardgame_root_is_not_found() {
        let root = xml::parse("<boardgames></boardgames>").unwrap();

        assert!(matches!(
            map_detail(13, &root),
            Err(Status::NotFound(_))
        ));
    }

    #[test]
    fn detail_maps_first_boardgame_node() {
        let root = xml::parse(
            r#"<boardgames>
                 <boardgame objectid="188"><name primary="true">Go</name></boardgame>
               </boardgames>"#,
        )
        .unwrap();

        let game = map_detail(188, &root).unwrap();
        assert_eq!(game.id, "188");
        assert_eq!(game.title, "Go");
    }
}
