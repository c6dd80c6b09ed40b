mod dns;
mod web;

use crate::di::DnsServices;
use anyhow::Context;
use regieleki_api::AppState;
use regieleki_domain::Config;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Runs the DNS and HTTP servers until a shutdown signal arrives or either
/// server fails, then stops both within the configured grace period.
pub async fn run(
    config: &Config,
    dns_services: DnsServices,
    app_state: AppState,
) -> anyhow::Result<()> {
    let dns_addr = config.server.dns_socket_addr()?;
    let http_addr = config.server.http_socket_addr()?;
    let grace = config.dns.shutdown_grace();

    let listener = TcpListener::bind(http_addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {}", http_addr))?;

    let shutdown = CancellationToken::new();
    let mut web_task = tokio::spawn(web::start_web_server(
        listener,
        app_state,
        shutdown.clone(),
    ));
    let mut web_finished = false;

    let dns_server = dns_services.server.clone();
    let outcome = tokio::select! {
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
            Ok(())
        }
        result = dns::start_dns_server(&dns_services, dns_addr) => result,
        result = &mut web_task => {
            web_finished = true;
            match result {
                Ok(result) => result,
                Err(e) => Err(anyhow::Error::from(e).context("HTTP server task panicked")),
            }
        }
    };

    if let Err(e) = &outcome {
        error!(error = %e, "Server failed, shutting down");
    }

    shutdown.cancel();
    if !dns_server.shutdown(grace).await {
        warn!(grace_secs = grace.as_secs(), "DNS handlers still running after grace period");
    }

    if !web_finished {
        match tokio::time::timeout(grace, web_task).await {
            Ok(Ok(Err(e))) => warn!(error = %e, "HTTP server stopped with error"),
            Ok(Err(e)) => warn!(error = %e, "HTTP server task failed"),
            Err(_) => warn!("HTTP server did not stop within grace period"),
            Ok(Ok(Ok(()))) => {}
        }
    }

    outcome
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
