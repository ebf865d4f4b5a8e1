//! gRPC transport security for the person guide.
//!
//! Services never read credential files themselves. Binaries build a
//! [`ServerTlsConfig`] or [`ClientTlsConfig`] here and hand it to the
//! server or channel builder; a plain-text transport is simply `None`.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tonic::transport::{Certificate, ClientTlsConfig, Identity, ServerTlsConfig};
use tracing::{info, warn};

pub mod cert_generation;
pub use cert_generation::{generate_dev_certificates, write_cert_bundle, CertificateBundle};

/// TLS configuration for gRPC server
#[derive(Clone)]
pub struct GrpcServerTlsConfig {
    /// Server certificate (PEM format)
    pub cert_pem: String,
    /// Server private key (PEM format)
    pub key_pem: String,
}

impl GrpcServerTlsConfig {
    /// Load the server identity from a certificate and a private key file.
    pub fn from_files(cert_file: &Path, key_file: &Path) -> Result<Self> {
        let cert_pem = fs::read_to_string(cert_file).with_context(|| {
            format!("Failed to read server certificate from {}", cert_file.display())
        })?;

        let key_pem = fs::read_to_string(key_file)
            .with_context(|| format!("Failed to read server key from {}", key_file.display()))?;

        info!(
            cert_file = %cert_file.display(),
            "gRPC server TLS configuration loaded"
        );

        Ok(Self { cert_pem, key_pem })
    }

    /// Server identity from freshly generated self-signed certificates
    ///
    /// **WARNING**: Only use in development/testing
    pub fn development(bundle: &CertificateBundle) -> Self {
        warn!("Using development TLS config with self-signed certificates");

        Self {
            cert_pem: bundle.server_cert.clone(),
            key_pem: bundle.server_key.clone(),
        }
    }

    /// Build tonic ServerTlsConfig
    pub fn build_server_tls(&self) -> ServerTlsConfig {
        ServerTlsConfig::new().identity(Identity::from_pem(&self.cert_pem, &self.key_pem))
    }
}

/// TLS configuration for gRPC client
#[derive(Clone)]
pub struct GrpcClientTlsConfig {
    /// CA certificate the server certificate must chain to (PEM format)
    pub ca_cert_pem: String,
    /// Name verified against the server certificate
    pub domain_name: String,
}

impl GrpcClientTlsConfig {
    /// Load the trusted CA from `ca_file`.
    ///
    /// `domain_name` overrides the host used for certificate verification,
    /// which lets a client dial an address that does not match the
    /// certificate's subject.
    pub fn from_file(ca_file: &Path, domain_name: &str) -> Result<Self> {
        let ca_cert_pem = fs::read_to_string(ca_file)
            .with_context(|| format!("Failed to read CA certificate from {}", ca_file.display()))?;

        info!(
            ca_file = %ca_file.display(),
            domain = %domain_name,
            "gRPC client TLS configuration loaded"
        );

        Ok(Self {
            ca_cert_pem,
            domain_name: domain_name.to_string(),
        })
    }

    pub fn development(bundle: &CertificateBundle, domain_name: &str) -> Self {
        warn!("Using development client TLS config");

        Self {
            ca_cert_pem: bundle.ca_cert.clone(),
            domain_name: domain_name.to_string(),
        }
    }

    /// Build tonic ClientTlsConfig
    pub fn build_client_tls(&self) -> ClientTlsConfig {
        ClientTlsConfig::new()
            .ca_certificate(Certificate::from_pem(&self.ca_cert_pem))
            .domain_name(self.domain_name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_server_config_from_files() {
        let dir = TempDir::new().unwrap();
        let bundle = generate_dev_certificates().unwrap();
        write_cert_bundle(&bundle, dir.path()).unwrap();

        let config = GrpcServerTlsConfig::from_files(
            &dir.path().join("server_cert.pem"),
            &dir.path().join("server_key.pem"),
        )
        .unwrap();
        assert_eq!(config.cert_pem, bundle.server_cert);
        assert_eq!(config.key_pem, bundle.server_key);
        let _ = config.build_server_tls();
    }

    #[test]
    fn test_server_config_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = GrpcServerTlsConfig::from_files(
            &dir.path().join("missing_cert.pem"),
            &dir.path().join("missing_key.pem"),
        );
        let err = result.err().unwrap();
        assert!(err.to_string().contains("server certificate"));
    }

    #[test]
    fn test_client_config_from_file() {
        let dir = TempDir::new().unwrap();
        let bundle = generate_dev_certificates().unwrap();
        write_cert_bundle(&bundle, dir.path()).unwrap();

        let config =
            GrpcClientTlsConfig::from_file(&dir.path().join("ca_cert.pem"), "x.test.example.com")
                .unwrap();
        assert_eq!(config.ca_cert_pem, bundle.ca_cert);
        assert_eq!(config.domain_name, "x.test.example.com");
        let _ = config.build_client_tls();
    }

    #[test]
    fn test_development_configs() {
        let bundle = generate_dev_certificates().unwrap();
        let server = GrpcServerTlsConfig::development(&bundle);
        let client = GrpcClientTlsConfig::development(&bundle, "localhost");
        assert!(!server.cert_pem.is_empty());
        assert_eq!(client.ca_cert_pem, bundle.ca_cert);
    }
}
