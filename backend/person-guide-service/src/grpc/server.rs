use super::PersonGuideImpl;
use crate::personguide::person_guide_server::PersonGuideServer;
use crate::registry::Registry;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::server::Router;
use tonic::transport::{Server, ServerTlsConfig};
use tonic_health::server::health_reporter;
use tracing::{info, warn};

/// PersonGuide plus the standard health service, with the injected
/// transport security applied when given.
async fn router(
    registry: Arc<Registry>,
    tls: Option<ServerTlsConfig>,
) -> Result<Router, tonic::transport::Error> {
    let (mut health, health_service) = health_reporter();
    health
        .set_serving::<PersonGuideServer<PersonGuideImpl>>()
        .await;

    let mut server_builder = Server::builder();
    if let Some(tls) = tls {
        server_builder = server_builder.tls_config(tls)?;
        info!("gRPC server TLS configured");
    }

    Ok(server_builder
        .add_service(health_service)
        .add_service(PersonGuideServer::new(PersonGuideImpl::new(registry))))
}

/// Serve on `addr` until `shutdown` resolves.
pub async fn serve<F>(
    addr: SocketAddr,
    registry: Arc<Registry>,
    tls: Option<ServerTlsConfig>,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    F: Future<Output = ()>,
{
    let router = router(registry, tls).await?;
    info!(%addr, "Starting gRPC server");
    router.serve_with_shutdown(addr, shutdown).await
}

/// Serve on an already bound listener. Used by tests on ephemeral ports.
pub async fn serve_with_listener(
    listener: TcpListener,
    registry: Arc<Registry>,
    tls: Option<ServerTlsConfig>,
) -> Result<(), tonic::transport::Error> {
    let router = router(registry, tls).await?;
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "Starting gRPC server on bound listener");
    }
    router
        .serve_with_incoming(TcpListenerStream::new(listener))
        .await
}

/// Resolves on the first Ctrl+C, or SIGTERM on unix. Open sessions are
/// drained by the server afterwards.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal as unix_signal, SignalKind};

        match unix_signal(SignalKind::terminate()) {
            Ok(mut sigterm) => tokio::select! {
                result = signal::ctrl_c() => on_interrupt(result).await,
                _ = sigterm.recv() => info!("SIGTERM received; shutting down"),
            },
            Err(err) => {
                warn!(error = %err, "SIGTERM handler unavailable; only Ctrl+C stops the server");
                on_interrupt(signal::ctrl_c().await).await;
            }
        }
    }

    #[cfg(not(unix))]
    on_interrupt(signal::ctrl_c().await).await;
}

async fn on_interrupt(result: std::io::Result<()>) {
    match result {
        Ok(()) => info!("Ctrl+C received; shutting down"),
        Err(err) => {
            // Without a working handler the server runs until killed.
            warn!(error = %err, "Ctrl+C handler unavailable");
            std::future::pending::<()>().await;
        }
    }
}
