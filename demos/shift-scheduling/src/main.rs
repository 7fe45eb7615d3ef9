//! Shift Scheduling Quickstart for ShiftForge
//!
//! Serves the scheduling API over HTTP.
//!
//! Run with: cargo run -p shift-scheduling
//! Then: curl -X POST http://localhost:8080/schedule/generate

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use owo_colors::OwoColorize;
use shift_scheduling::{api, load_config};
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    shiftforge::console::init();

    let config = load_config()?;
    let addr: SocketAddr = config.server.bind.parse()?;
    let state = Arc::new(api::AppState::new(config));

    // CORS for development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(state).layer(cors);

    println!(
        "{} Server listening on {}",
        "▸".bright_green(),
        format!("http://{}", addr).bright_cyan().underline()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
