use std::{convert::Infallible, sync::Arc};
use tracing::warn;
use warp::{self, Filter};

use crate::api::GeekdoApi;

use super::handlers;

/// Returns a Filter with all available routes.
pub fn routes(
    geekdo: Arc<GeekdoApi>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    get_games(Arc::clone(&geekdo))
        .or(get_game_details(geekdo))
        .or_else(|e| async {
            warn! {"Rejected route: {:?}", e};
            Err(e)
        })
}

/// GET /games
fn get_games(
    geekdo: Arc<GeekdoApi>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("games")
        .and(warp::get())
        .and(with_geekdo(geekdo))
        .and_then(handlers::get_games)
}

/// GET /games/{game_id}
fn get_game_details(
    geekdo: Arc<GeekdoApi>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    warp::path!("games" / u64)
        .and(warp::get())
        .and(with_geekdo(geekdo))
        .and_then(handlers::get_game_details)
}

fn with_geekdo(
    geekdo: Arc<GeekdoApi>,
) -> impl Filter<Extract = (Arc<GeekdoApi>,), Error = Infallible> + Clone {
    warp::any().map(move || Arc::clone(&geekdo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::models::ErrorResponse;
    use warp::http::StatusCode;

    // Nothing listens on this address; transport failures map to 503.
    fn unreachable_api() -> Arc<GeekdoApi> {
        Arc::new(GeekdoApi::new("http://127.0.0.1:9", "testuser").unwrap())
    }

    fn error_of(body: &[u8]) -> String {
        serde_json::from_slice::<ErrorResponse>(body).unwrap().error
    }

    #[tokio::test]
    async fn unmatched_route_returns_json_404() {
        let filter = routes(unreachable_api()).recover(handlers::handle_rejection);

        let resp = warp::test::request().path("/nope").reply(&filter).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_of(resp.body()), "route not found");
    }

    #[tokio::test]
    async fn method_mismatch_is_an_unmatched_route() {
        let filter = routes(unreachable_api()).recover(handlers::handle_rejection);

        let resp = warp::test::request()
            .method("POST")
            .path("/games")
            .reply(&filter)
            .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(error_of(resp.body()), "route not found");
    }

    #[tokio::test]
    async fn non_numeric_game_id_does_not_match() {
        let filter = routes(unreachable_api()).recover(handlers::handle_rejection);

        let resp = warp::test::request().path("/games/catan").reply(&filter).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn collection_upstream_failure_returns_503() {
        let filter = routes(unreachable_api()).recover(handlers::handle_rejection);

        let resp = warp::test::request().path("/games").reply(&filter).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error_of(resp.body()), "failed to retrieve upstream data");
    }

    #[tokio::test]
    async fn detail_upstream_failure_returns_503() {
        let filter = routes(unreachable_api()).recover(handlers::handle_rejection);

        let resp = warp::test::request().path("/games/13").reply(&filter).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error_of(resp.body()), "failed to retrieve upstream data");
    }
}
