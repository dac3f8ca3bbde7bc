use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tutoring_gate::{
    AppState, HttpUpstream, UpstreamState,
    config::{AppConfig, Env},
    create_router,
};

/// main
///
/// Loads configuration, sets up logging, builds the frontend proxy and serves
/// the gatekeeper.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail fast on missing production settings)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging filter: RUST_LOG wins, otherwise debug for the gatekeeper.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tutoring_gate=debug,tower_http=info".into());

    // 3. Pretty logs locally, JSON for log aggregation in production.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Gatekeeper starting in {:?} mode", config.env);

    // 4. Frontend proxy
    let upstream = HttpUpstream::new(&config.frontend_url)
        .expect("FATAL: Failed to build the frontend HTTP client.");
    let upstream = Arc::new(upstream) as UpstreamState;

    tracing::info!(frontend = %config.frontend_url, "Forwarding allowed navigations");

    // 5. Router and server
    let bind_addr = config.bind_addr.clone();
    let app = create_router(AppState { upstream, config });

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: Failed to bind GATE_BIND_ADDR.");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /_gate/docs");

    axum::serve(listener, app)
        .await
        .expect("FATAL: Server terminated unexpectedly.");
}
