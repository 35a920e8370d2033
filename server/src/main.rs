mod app;
mod config;
mod pipeline;
mod render;
mod routes;
mod services;
mod state;

use std::process::ExitCode;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::state::AppState;

const USAGE: &str = "usage: langmap [build|serve]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Write the map document to the configured output path.
    Build,
    /// Serve the map document and region data over HTTP.
    Serve,
}

impl Command {
    fn parse(arg: Option<&str>) -> Result<Self, String> {
        match arg {
            None | Some("build") => Ok(Self::Build),
            Some("serve") => Ok(Self::Serve),
            Some(other) => Err(format!("unknown command {other:?}")),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let arg = std::env::args().nth(1);
    let command = match Command::parse(arg.as_deref()) {
        Ok(command) => command,
        Err(e) => {
            tracing::error!("{e}; {USAGE}");
            return ExitCode::from(2);
        }
    };

    let settings = Settings::from_env();
    let built = match pipeline::build_map(&settings).await {
        Ok(built) => built,
        Err(e) => {
            tracing::error!(error = %e, "map construction failed");
            return ExitCode::FAILURE;
        }
    };

    match command {
        Command::Build => match pipeline::write_document(&settings.output, &built.document).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "failed to save map document");
                ExitCode::FAILURE
            }
        },
        Command::Serve => serve(&settings, &built).await,
    }
}

async fn serve(settings: &Settings, built: &pipeline::BuiltMap) -> ExitCode {
    let state = match AppState::new(built) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize region summaries");
            return ExitCode::FAILURE;
        }
    };
    let app = app::build_app(state);

    let addr = format!("0.0.0.0:{}", settings.port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind TCP listener");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("language map preview listening on http://{addr}");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Server shut down gracefully");
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                return;
            }
        };
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
