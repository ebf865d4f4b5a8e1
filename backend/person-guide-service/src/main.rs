use anyhow::{anyhow, Context, Result};
use person_guide_service::config::Config;
use person_guide_service::{grpc, seed, Registry};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // rustls 0.23 requires selecting a CryptoProvider at runtime
    if let Err(err) = rustls::crypto::aws_lc_rs::default_provider().install_default() {
        eprintln!("Failed to install rustls crypto provider: {:?}", err);
        return Err(anyhow!("Unable to install TLS crypto provider: {:?}", err));
    }

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("person_guide_service={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting person-guide service");

    config
        .validate()
        .context("Configuration validation failed")?;
    let addr = config.grpc_addr()?;

    let tls = match (config.tls, &config.cert_file, &config.key_file) {
        (true, Some(cert_file), Some(key_file)) => {
            let tls = grpc_tls::GrpcServerTlsConfig::from_files(cert_file, key_file)
                .context("Failed to load server TLS credentials")?;
            Some(tls.build_server_tls())
        }
        _ => {
            info!("TLS disabled - serving plain TCP");
            None
        }
    };

    let registry = Arc::new(Registry::new(seed::load_seed(config.json_db_file.as_deref())));
    info!(persons = registry.len(), "Registry seeded");

    grpc::serve(addr, registry, tls, grpc::shutdown_signal())
        .await
        .context("gRPC server failed")?;

    info!("Person-guide service shutdown complete");

    Ok(())
}
