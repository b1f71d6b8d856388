use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use receipt_ocr::api::{create_router, AppState};
use receipt_ocr::config::Config;

#[derive(Parser)]
#[command(name = "receipt-ocr")]
#[command(about = "OCR receipts and summarize them for expense reports")]
struct Args {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Directory for uploaded receipts (overrides UPLOAD_DIR)
    #[arg(long)]
    upload_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "receipt_ocr=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(upload_dir) = args.upload_dir {
        config.server.upload_dir = upload_dir;
    }

    tracing::info!(
        ocr_api_url = if config.ocr.api_url.is_some() { "SET" } else { "NOT SET" },
        ocr_secret_key = if config.ocr.secret_key.is_some() { "SET" } else { "NOT SET" },
        llm_api_key = if config.llm.api_key.is_some() { "SET" } else { "NOT SET" },
        llm_model = %config.llm.model,
        "Loaded configuration"
    );

    let addr = config.bind_addr();
    let state = AppState::from_config(config)?;

    state.store.ensure_dir().map_err(|e| {
        anyhow::anyhow!(
            "Failed to create upload directory {}: {e}",
            state.store.dir().display()
        )
    })?;
    tracing::info!("Upload directory: {}", state.store.dir().display());

    let app = create_router(state);

    tracing::info!("Receipt OCR starting on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
