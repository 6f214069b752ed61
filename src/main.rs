use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use inquiry_relay::api;
use inquiry_relay::config::Config;
use inquiry_relay::mail::{Mailer, SmtpTransport};
use inquiry_relay::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    tracing::info!("Starting inquiry relay...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        host = %config.server_host,
        port = %config.server_port,
        smtp_host = %config.smtp.host,
        smtp_port = %config.smtp.port,
        form = ?config.form_kind,
        "Configuration loaded"
    );

    // One transport shared by every request
    let transport = SmtpTransport::new(&config.smtp)?;
    let mailer = Mailer::new(
        Arc::new(transport),
        config.smtp.username.clone(),
        config.senders.clone(),
    );

    // Verify the relay in the background; serving does not wait on it
    let probe = mailer.clone();
    tokio::spawn(async move {
        match probe.verify().await {
            Ok(()) => tracing::info!("SMTP server is ready"),
            Err(e) => tracing::error!(error = %e, "SMTP verification failed"),
        }
    });

    let addr: SocketAddr = config.server_addr().parse()?;
    let state = AppState::new(config, mailer);

    // Build router
    let app = api::create_router(state).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(addr).await?;

    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// `RUST_LOG` filters (default `info`), `LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Handle shutdown signals
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down...");
        },
    }
}
