// SPDX-FileCopyrightText: 2026 InterviewAce Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `interviewace serve` command implementation.
//!
//! Runs the gateway until Ctrl-C (or SIGTERM on unix), then drains
//! in-flight requests before returning.

use interviewace_config::model::InterviewAceConfig;
use interviewace_core::AceError;
use tracing::info;

/// Runs the gateway with the loaded configuration.
pub async fn run_serve(config: InterviewAceConfig) -> Result<(), AceError> {
    init_tracing(&config.logging.level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        bind = %config.server.bind_address(),
        "starting interviewace gateway"
    );
    if !config.cookies.secure {
        info!("auth cookies are not marked Secure; set cookies.secure = true behind TLS");
    }

    interviewace_gateway::start_server(&config, shutdown_signal()).await?;

    info!("interviewace serve shutdown complete");
    Ok(())
}

/// Resolves on the first shutdown signal.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        info!("received Ctrl-C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received SIGTERM, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence when set.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init();
}

fn default_filter(log_level: &str) -> String {
    format!("interviewace={log_level},warn")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_scopes_level_to_our_crates() {
        assert_eq!(default_filter("debug"), "interviewace=debug,warn");
    }

    #[test]
    fn init_tracing_twice_does_not_panic() {
        init_tracing("info");
        init_tracing("debug");
    }
}
