//! Certificate Generation for Development and Testing
//!
//! Generates a throwaway CA and a server certificate signed by it.
//! **WARNING**: NEVER use in production - use proper CA-signed certificates.

use anyhow::{Context, Result};
use rcgen::{BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, SanType};
use std::fs;
use std::path::Path;
use tracing::info;

/// Host names the development server certificate is valid for
pub const DEV_SERVER_NAMES: [&str; 2] = ["localhost", "x.test.example.com"];

/// Bundle of certificates for development
#[derive(Clone)]
pub struct CertificateBundle {
    /// CA certificate (PEM)
    pub ca_cert: String,
    /// Server certificate signed by CA (PEM)
    pub server_cert: String,
    /// Server private key (PEM)
    pub server_key: String,
}

/// Generate development certificates (CA, server)
pub fn generate_dev_certificates() -> Result<CertificateBundle> {
    let mut ca_params = CertificateParams::default();
    ca_params.distinguished_name = DistinguishedName::new();
    ca_params
        .distinguished_name
        .push(DnType::CommonName, "Person Guide Development CA");
    ca_params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);

    let ca_keypair = rcgen::KeyPair::generate()?;
    let ca_cert = ca_params
        .self_signed(&ca_keypair)
        .context("Failed to generate CA certificate")?;

    let mut server_params = CertificateParams::default();
    server_params.distinguished_name = DistinguishedName::new();
    server_params
        .distinguished_name
        .push(DnType::CommonName, DEV_SERVER_NAMES[0]);
    for name in DEV_SERVER_NAMES {
        server_params.subject_alt_names.push(SanType::DnsName(
            name.try_into()
                .with_context(|| format!("Failed to create SAN for {}", name))?,
        ));
    }
    server_params
        .subject_alt_names
        .push(SanType::IpAddress(std::net::IpAddr::V4(
            std::net::Ipv4Addr::LOCALHOST,
        )));

    let server_keypair = rcgen::KeyPair::generate()?;
    let server_cert = server_params
        .signed_by(&server_keypair, &ca_cert, &ca_keypair)
        .context("Failed to sign server certificate")?;

    info!("Generated development certificates (CA, server)");

    Ok(CertificateBundle {
        ca_cert: ca_cert.pem(),
        server_cert: server_cert.pem(),
        server_key: server_keypair.serialize_pem(),
    })
}

/// Write certificate bundle to files
///
/// ```text
/// ca_cert.pem
/// server_cert.pem
/// server_key.pem
/// ```
pub fn write_cert_bundle(bundle: &CertificateBundle, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {:?}", output_dir))?;

    fs::write(output_dir.join("ca_cert.pem"), &bundle.ca_cert)
        .context("Failed to write CA certificate")?;
    fs::write(output_dir.join("server_cert.pem"), &bundle.server_cert)
        .context("Failed to write server certificate")?;
    fs::write(output_dir.join("server_key.pem"), &bundle.server_key)
        .context("Failed to write server key")?;

    info!(output_dir = ?output_dir, "Certificate bundle written to disk");
    Ok(())
}
