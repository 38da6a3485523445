mod dto;
mod handlers;
mod models;
mod repository;
mod service;

use std::{env, sync::Arc};

use handlers::rest;
use repository::FileStore;
use service::NoteService;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt::init();

    // Fetch env variables
    let notes_file = env::var("NOTES_FILE").unwrap_or_else(|_| "data.json".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "3000".to_string());

    // Store creation and data file initialization
    let store = FileStore::new(notes_file);
    store.init().await.unwrap_or_else(|e| {
        tracing::error!("Failed to initialize notes file: {e}");
        panic!("failed to initialize notes file: {e}");
    });

    // Service creation
    let service = Arc::new(NoteService::new(Arc::new(store)));

    // Router config
    let app = rest::router(service);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind 0.0.0.0:{port}: {e}");
            panic!("failed to bind 0.0.0.0:{port}: {e}");
        });

    // Starting router
    tracing::info!("Started listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("failed to start server");
}
