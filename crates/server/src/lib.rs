//! HTTP service for a two-board forum.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/api/posts` | paginated, searchable board listing |
//! | POST | `/api/posts` | create a post |
//! | GET | `/api/posts/:id` | fetch a post, counting the view |
//! | PUT | `/api/posts/:id` | edit title, author and content |
//! | DELETE | `/api/posts/:id` | delete a post and its view log |
//!
//! Every response body is a JSON envelope with a `success` flag; failures carry a
//! `message`.

use std::{future::Future, net::SocketAddr};

use axum::{Router, routing::get};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
mod handlers;
pub mod pool;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use handlers::PostFields;
pub use pool::{PoolError, StorePool};
pub use state::AppState;

use handlers::{create_post, delete_post, get_post, list_posts, update_post};

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/posts", get(list_posts).post(create_post))
        .route(
            "/api/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = build_router(state).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Opening store in {}", config.storage_dir.display());
    let state = AppState::new(&config)?;
    info!(pool_size = state.pool.size(), "Connection pool ready");

    let address = config.address();
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    serve(listener, state, shutdown_signal()).await?;

    info!("Server shut down");
    Ok(())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!("Failed to install signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
