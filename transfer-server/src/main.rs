use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transfer_server::config::ServerConfig;
use transfer_server::data::TransitData;
use transfer_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Fail fast on bad data; transfer issues are only warnings
    let data = match TransitData::load(&config.data_path) {
        Ok(data) => data,
        Err(e) => {
            error!(path = %config.data_path.display(), "{e}");
            return ExitCode::FAILURE;
        }
    };
    if !data.issues().is_empty() {
        info!(
            issues = data.issues().len(),
            "Some constrained transfers were not indexed"
        );
    }

    let state = AppState::new(data, config.search.clone());
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind_addr, "Failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!(addr = %config.bind_addr, "Transfer server listening");
    info!("  GET  /health");
    info!("  GET  /patterns/:pattern/transfers/:stop_position?direction=forward|reverse");
    info!("  POST /transfers/search");

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
