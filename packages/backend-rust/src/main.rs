use std::process::ExitCode;

use playlearn_backend::config::Config;
use playlearn_backend::logging::init_tracing;
use playlearn_backend::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let _log_guard = init_tracing(&Config::log_level_from_env());
    let config = Config::from_env();

    let addr = config.bind_addr();
    let state = AppState::in_memory(config);
    let catalog = state.catalog();
    tracing::info!(
        catalog_version = %catalog.version,
        units = catalog.units().len(),
        "catalog loaded"
    );

    let app = playlearn_backend::build_app(state);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!(%addr, error = %err, "bind listener failed");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(%addr, "playlearn-backend listening");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());
    if let Err(e) = server.await {
        tracing::error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("Graceful shutdown complete");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
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
