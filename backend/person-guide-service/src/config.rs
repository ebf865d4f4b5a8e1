use crate::error::{Result, ServiceError};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Server configuration, read from `PERSON_GUIDE_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // gRPC server config
    pub grpc_host: String,
    pub grpc_port: u16,

    // Transport security
    pub tls: bool,
    pub cert_file: Option<PathBuf>,
    pub key_file: Option<PathBuf>,

    // Seed data (reported only, the built-in dataset is always loaded)
    pub json_db_file: Option<PathBuf>,

    // Observability
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("grpc_host", "127.0.0.1")?
            .set_default("grpc_port", 50051)?
            .set_default("tls", false)?
            .set_default("log_level", "info")?
            .add_source(
                config::Environment::with_prefix("PERSON_GUIDE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grpc_port == 0 {
            return Err(ServiceError::Configuration(
                "gRPC port must be greater than 0".to_string(),
            ));
        }

        if self.tls && (self.cert_file.is_none() || self.key_file.is_none()) {
            return Err(ServiceError::Configuration(
                "TLS enabled but PERSON_GUIDE_CERT_FILE and PERSON_GUIDE_KEY_FILE are not both set"
                    .to_string(),
            ));
        }

        Ok(())
    }

    pub fn grpc_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.grpc_host, self.grpc_port)
            .parse()
            .map_err(|e| {
                ServiceError::Configuration(format!(
                    "Invalid gRPC address {}:{}: {}",
                    self.grpc_host, self.grpc_port, e
                ))
            })
    }
}

/// Client configuration, read from `PERSON_GUIDE_CLIENT_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// host:port of the server
    pub server_addr: String,
    pub tls: bool,
    /// CA certificate used to verify the server
    pub ca_file: Option<PathBuf>,
    /// Name checked against the server certificate during the TLS handshake
    pub server_host_override: String,
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .set_default("server_addr", "localhost:50051")?
            .set_default("tls", false)?
            .set_default("server_host_override", "x.test.example.com")?
            .set_default("request_timeout_secs", 10)?
            .add_source(
                config::Environment::with_prefix("PERSON_GUIDE_CLIENT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server_addr.is_empty() {
            return Err(ServiceError::Configuration(
                "Server address is required".to_string(),
            ));
        }

        if self.tls && self.ca_file.is_none() {
            return Err(ServiceError::Configuration(
                "TLS enabled but PERSON_GUIDE_CLIENT_CA_FILE is not set".to_string(),
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(ServiceError::Configuration(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Endpoint URI for the configured server, `https` when TLS is enabled.
    pub fn endpoint_uri(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{}://{}", scheme, self.server_addr)
    }
}
