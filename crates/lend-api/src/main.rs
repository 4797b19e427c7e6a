//! Service entrypoint: logging, optional database, HTTP listener.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use lend_api::state::AppState;
use lend_api::{app, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let pool = db::init_pool()
        .await
        .context("database initialization failed")?;

    let state = match pool {
        Some(pool) => {
            let state = AppState::with_pool(pool.clone());
            db::hydrate(&state, &pool)
                .await
                .context("state hydration failed")?;
            state
        }
        None => AppState::new(),
    };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "lend-api listening");

    axum::serve(listener, app(state))
        .await
        .context("server error")?;
    Ok(())
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` controls the filter (default `info`); `LOG_FORMAT=json`
/// switches to JSON output for log shippers.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
