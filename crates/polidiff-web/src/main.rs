use std::net::SocketAddr;
use std::sync::Arc;

mod handlers;
mod models;
mod state;
mod template;
mod upload;

use polidiff_core::config_file;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = config_file::load_config();
    let topics = config.effective_topics();
    let options = config.effective_options();
    let server = config.server.unwrap_or_default();
    let port = server.port.unwrap_or(5001);
    let max_upload_mb = server.max_upload_mb.unwrap_or(50) as usize;

    tracing::info!(topics = topics.len(), port, "starting polidiff-web");

    let state = Arc::new(AppState { topics, options });

    let body_limit = axum::extract::DefaultBodyLimit::max(max_upload_mb * 1024 * 1024);

    let app = axum::Router::new()
        .route("/", axum::routing::get(handlers::index::index))
        .route("/compare", axum::routing::post(handlers::compare::compare))
        .layer(body_limit)
        .layer(tower_http::cors::CorsLayer::permissive())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
