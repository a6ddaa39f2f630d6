use clap::Parser;
use meeple_backend::{api::GeekdoApi, http, Status, Tracing};
use std::{env, sync::Arc};
use tracing::info;
use warp::{self, Filter};

#[derive(Parser)]
struct Opts {
    /// Port number to use for listening to HTTP requests.
    #[clap(short, long, default_value = "8080")]
    port: u16,

    /// Base URL of the Geekdo XML API.
    #[clap(long, default_value = "https://api.geekdo.com/xmlapi")]
    geekdo_url: String,

    /// Geekdo user whose collection is served by /games.
    #[clap(long, default_value = "megtrinity")]
    collection_user: String,
}

#[tokio::main]
async fn main() -> Result<(), Status> {
    let opts: Opts = Opts::parse();

    Tracing::setup("meeple-backend")?;

    // Let ENV VAR override flag.
    let port: u16 = match env::var("PORT") {
        Ok(port) => match port.parse::<u16>() {
            Ok(port) => port,
            Err(_) => opts.port,
        },
        Err(_) => opts.port,
    };

    let geekdo = GeekdoApi::new(&opts.geekdo_url, &opts.collection_user)?;

    info!("http server started");

    warp::serve(http::routes::routes(Arc::new(geekdo)).recover(http::handlers::handle_rejection))
        .run(([0, 0, 0, 0], port))
        .await;

    Ok(())
}
