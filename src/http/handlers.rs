use std::{convert::Infallible, sync::Arc, time::Instant};

use tracing::instrument;
use warp::http::StatusCode;

use crate::{api::GeekdoApi, Status};

use super::{
    models::ErrorResponse,
    query_logs::{CollectionEvent, DetailEvent},
};

#[instrument(level = "trace", skip(geekdo))]
pub async fn get_games(geekdo: Arc<GeekdoApi>) -> Result<impl warp::Reply, Infallible> {
    let event = CollectionEvent::new(geekdo.collection_user());
    let started = Instant::now();

    match geekdo.get_collection().await {
        Ok(games) => {
            let reply = warp::reply::json(&games);
            event.log(started.elapsed(), &games);
            Ok(warp::reply::with_status(reply, StatusCode::OK))
        }
        Err(status) => {
            event.log_error(started.elapsed(), &status);
            Ok(error_reply(&status))
        }
    }
}

#[instrument(level = "trace", skip(geekdo))]
pub async fn get_game_details(
    game_id: u64,
    geekdo: Arc<GeekdoApi>,
) -> Result<impl warp::Reply, Infallible> {
    let event = DetailEvent::new(game_id);
    let started = Instant::now();

    match geekdo.get_boardgame(game_id).await {
        Ok(game) => {
            event.log(started.elapsed());
            Ok(warp::reply::with_status(
                warp::reply::json(&game),
                StatusCode::OK,
            ))
        }
        Err(status) => {
            event.log_error(started.elapsed(), &status);
            Ok(error_reply(&status))
        }
    }
}

/// Turns rejections into the JSON error surface of the service.
pub async fn handle_rejection(err: warp::Rejection) -> Result<impl warp::Reply, Infallible> {
    let (code, message) = if err.is_not_found()
        // Only GET routes exist, so a method mismatch is an unmatched route.
        || err.find::<warp::reject::MethodNotAllowed>().is_some()
    {
        (StatusCode::NOT_FOUND, "route not found")
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorResponse::new(message)),
        code,
    ))
}

fn error_reply(status: &Status) -> warp::reply::WithStatus<warp::reply::Json> {
    let (code, message) = match status {
        Status::Unavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "failed to retrieve upstream data",
        ),
        Status::NotFound(_) => (StatusCode::NOT_FOUND, "game not found"),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "an unexpected error occurred",
        ),
    };

    warp::reply::with_status(warp::reply::json(&ErrorResponse::new(message)), code)
}
