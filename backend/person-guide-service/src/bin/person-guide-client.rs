use anyhow::{anyhow, Context, Result};
use person_guide_service::client::{self, demo_persons};
use person_guide_service::config::ClientConfig;
use person_guide_service::Adress;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(err) = rustls::crypto::aws_lc_rs::default_provider().install_default() {
        return Err(anyhow!("Unable to install TLS crypto provider: {:?}", err));
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "person_guide_service=info,person_guide_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env().context("Failed to load client configuration")?;
    config
        .validate()
        .context("Client configuration validation failed")?;

    let tls = match (config.tls, &config.ca_file) {
        (true, Some(ca_file)) => Some(
            grpc_tls::GrpcClientTlsConfig::from_file(ca_file, &config.server_host_override)
                .context("Failed to load client TLS credentials")?
                .build_client_tls(),
        ),
        _ => None,
    };

    let mut guide = client::connect(&config, tls).await?;
    let timeout = config.request_timeout();

    client::run_record_persons(&mut guide, demo_persons(), timeout)
        .await
        .context("RecordPersons failed")?;

    let phones = client::run_route_phones(&mut guide, demo_persons(), timeout)
        .await
        .context("RoutePhones failed")?;
    info!(phones = phones.len(), "RoutePhones complete");

    for person in demo_persons() {
        client::print_phone(&mut guide, &person, timeout)
            .await
            .with_context(|| format!("GetPhone failed for {}", person.name))?;
    }

    let adress = Adress {
        name: "my adress".to_string(),
    };
    client::print_persons(&mut guide, &adress, timeout)
        .await
        .context("ListPersons failed")?;

    Ok(())
}
