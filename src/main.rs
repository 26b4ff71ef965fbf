use quiver::api::{self, AppState};
use quiver::embedding::WorkersAiClient;
use quiver::jobs::JobRegistry;
use quiver::{config, logging};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    config::init_config();
    logging::init_tracing();

    let embedder = WorkersAiClient::from_config().expect("Failed to build embedding client");
    let state = AppState {
        registry: Arc::new(JobRegistry::new()),
        embedder: Arc::new(embedder),
    };
    let app = api::create_router(state);

    let port = config::get_config().server_port.unwrap_or(8080);
    let listener = TcpListener::bind((std::net::Ipv4Addr::UNSPECIFIED, port))
        .await
        .expect("Failed to bind listener");
    tracing::info!("Listening on http://0.0.0.0:{}", port);
    axum::serve(listener, app).await.unwrap();
}
