pub mod handlers;
pub mod models;
pub mod routes;

mod query_logs;
