#![allow(dead_code)]

use person_guide_service::{grpc, PersonGuideClient, Person, PhoneNumber, PhoneType, Registry};
use std::net::SocketAddr;
use std::sync::Arc;
use tonic::transport::{Channel, ServerTlsConfig};

/// Start a server on an ephemeral port and return its address together with
/// the registry it serves.
pub async fn start_server(tls: Option<ServerTlsConfig>) -> (SocketAddr, Arc<Registry>) {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind gRPC port");
    let addr = listener.local_addr().unwrap();
    let registry = Arc::new(Registry::seeded());

    let served = Arc::clone(&registry);
    tokio::spawn(async move {
        grpc::serve_with_listener(listener, served, tls)
            .await
            .expect("start person-guide server");
    });

    (addr, registry)
}

pub async fn connect(addr: SocketAddr) -> PersonGuideClient<Channel> {
    PersonGuideClient::connect(format!("http://{}", addr))
        .await
        .expect("connect to person-guide server")
}

pub fn person(id: i32, numbers: &[&str]) -> Person {
    Person {
        name: format!("person-{}", id),
        id,
        email: format!("person-{}@example.com", id),
        phones: numbers
            .iter()
            .map(|number| PhoneNumber {
                number: number.to_string(),
                r#type: PhoneType::Work as i32,
            })
            .collect(),
        last_updated: None,
    }
}

pub fn numbers(phones: &[PhoneNumber]) -> Vec<String> {
    phones.iter().map(|p| p.number.clone()).collect()
}
