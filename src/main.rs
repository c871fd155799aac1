use blogsite::config::Config;
use blogsite::routes;
use blogsite::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().expect("invalid configuration");
    let state = AppState::in_memory();

    let app = routes::app(state, &config);
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind");

    tracing::info!(%addr, "blogsite listening");
    axum::serve(listener, app).await.expect("server failed");
}
