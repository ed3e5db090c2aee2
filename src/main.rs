//! BenchCraft console host: Leptos SSR + same-origin backend forwarder.

mod config;
mod routes;
mod state;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::ConsoleConfig::from_env().expect("invalid console configuration");
    let port = config.port;
    tracing::info!(backend = %config.backend_url, "forwarding /api/v1 to backend");

    let state = state::AppState::new(config).expect("failed to build backend HTTP client");
    let app = routes::app(state).expect("failed to build router");

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");
    tracing::info!(%port, "benchcraft console listening");
    axum::serve(listener, app).await.expect("server failed");
}
