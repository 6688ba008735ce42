//! Recipe endpoint of the Indian recipe generator.
//!
//!
//!
//! # Endpoint
//! - `POST /api/generate-recipe` with `{ "ingredients": ["chicken", ...] }`
//! - One of three fixed templates (Curry, Rice, Dal Tadka) is picked uniformly at random
//! - The submitted ingredients are spliced into the template in English and Hindi
//! - `GET /api/health` for liveness checks
//!
//!
//!
//! # Errors
//! - Missing, null or empty ingredient list: 400 `{"error":"Please provide at least one ingredient"}`
//! - Anything else that goes wrong, including a malformed body: 500 `{"error":"Failed to generate recipe"}`
//! - The cause of a 500 is only logged, never sent back
//!
//!
//!
//! # Notes
//!
//! ## Randomness
//! The picker is a seeded `StdRng` behind a mutex in the shared state. Set `RECIPE_SEED` to pin the
//! sequence of templates, e.g. for demos. Calls with the same input are otherwise not expected to
//! return the same recipe.
//!
//! ## Permissive Input
//! No trimming, no length bound, no bound on the number of ingredients. Blank entries are filtered
//! by the client before sending.
//!
//!
//!
//! # Setup
//!
//! Environment.
//! ```sh
//! RUST_HOST=0.0.0.0 RUST_PORT=3000 RUST_LOG=info cargo run -p rasoi
//! ```
//!
//! Log every submitted ingredient list.
//! ```sh
//! cargo run -p rasoi --features verbose
//! ```
//!
//! Try it.
//! ```sh
//! curl -X POST localhost:3000/api/generate-recipe \
//!   -H 'Content-Type: application/json' \
//!   -d '{"ingredients":["chicken","potato"]}'
//! ```
use std::{error::Error, sync::Arc, time::Duration};

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use routes::{generate_recipe_handler, health_handler};
use state::State;

pub fn app(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/generate-recipe", post(generate_recipe_handler))
        .route("/api/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server() -> Result<(), Box<dyn Error + Send + Sync>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config);

    info!("Starting server...");

    let address = state.config.address();
    let app = app(state);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {e}");
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
