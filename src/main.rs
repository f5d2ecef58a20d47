use clap::Parser;
use std::sync::Arc;
use text_sampler::config::Settings;
use text_sampler::files::handlers::router;
use text_sampler::files::service::FileService;
use text_sampler::metadata::memory::InMemoryMetadataGateway;
use text_sampler::storage::blob::BlobStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level)
        .init();

    tracing::info!("Starting text sampler on {}", settings.bind);
    tracing::info!(
        "Container: {} (allowed extensions: {:?})",
        settings.bucket,
        settings.normalized_extensions()
    );

    // 1. Object storage:
    let store = Arc::new(BlobStore::from_settings(&settings)?);

    // 2. Upload metadata:
    let metadata = Arc::new(InMemoryMetadataGateway::new());

    // 3. Service + HTTP router:
    let service = Arc::new(FileService::new(
        metadata,
        store,
        settings.bucket.clone(),
        settings.normalized_extensions(),
    ));
    let app = router(service, settings.max_upload_bytes);

    // 4. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(settings.bind).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
