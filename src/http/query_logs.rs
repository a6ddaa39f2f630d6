use std::time::Duration;

use tracing::{error, info};

use crate::{documents::GameSummary, Status};

pub struct CollectionEvent {
    user: String,
}

impl CollectionEvent {
    pub fn new(user: &str) -> Self {
        Self {
            user: String::from(user),
        }
    }

    pub fn log(self, latency: Duration, response: &[GameSummary]) {
        info!(
            http_request.request_method = "GET",
            http_request.request_url = "/games",
            labels.log_type = QUERY_LOGS,
            labels.handler = COLLECTION_HANDLER,
            request.user = self.user,
            collection.latency = latency.as_millis(),
            response.games = response.len(),
            "collection '{}'",
            self.user
        )
    }

    pub fn log_error(self, latency: Duration, status: &Status) {
        error!(
            http_request.request_method = "GET",
            http_request.request_url = "/games",
            labels.log_type = QUERY_LOGS,
            labels.handler = COLLECTION_HANDLER,
            labels.status = status.to_string(),
            request.user = self.user,
            collection.latency = latency.as_millis(),
            "collection '{}'",
            self.user
        )
    }
}

pub struct DetailEvent {
    game_id: u64,
}

impl DetailEvent {
    pub fn new(game_id: u64) -> Self {
        Self { game_id }
    }

    pub fn log(self, latency: Duration) {
        info!(
            http_request.request_method = "GET",
            http_request.request_url = "/games/{id}",
            labels.log_type = QUERY_LOGS,
            labels.handler = DETAIL_HANDLER,
            request.game_id = self.game_id,
            detail.latency = latency.as_millis(),
            "boardgame {}",
            self.game_id
        )
    }

    pub fn log_error(self, latency: Duration, status: &Status) {
        error!(
            http_request.request_method = "GET",
            http_request.request_url = "/games/{id}",
            labels.log_type = QUERY_LOGS,
            labels.handler = DETAIL_HANDLER,
            labels.status = status.to_string(),
            request.game_id = self.game_id,
            detail.latency = latency.as_millis(),
            "boardgame {}",
            self.game_id
        )
    }
}

const QUERY_LOGS: &str = "query_logs";
const COLLECTION_HANDLER: &str = "collection";
const DETAIL_HANDLER: &str = "detail";
