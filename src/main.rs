use hanoi::config::ServiceConfig;
use hanoi::routes;
use hanoi::state::AppState;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let config = ServiceConfig::from_env();
    let state = AppState::new(config.max_rings);
    let app = routes::app(state, config.static_dir.as_deref());

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    tracing::info!(port = config.port, max_rings = config.max_rings, static_dir = ?config.static_dir, "hanoi listening");
    axum::serve(listener, app).await
}
