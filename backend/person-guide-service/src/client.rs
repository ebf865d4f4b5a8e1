//! Demo client driving the four PersonGuide RPCs.
//!
//! Every call is bounded by the configured timeout; the server itself never
//! imposes one.

use crate::config::ClientConfig;
use crate::error::{Result, ServiceError};
use crate::personguide::{
    person_guide_client::PersonGuideClient, AddressBook, Adress, Person, PhoneNumber,
};
use crate::seed;
use anyhow::Context;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tonic::Request;
use tracing::info;

/// Persons the demo client records and routes.
pub fn demo_persons() -> Vec<Person> {
    seed::example_persons().into_iter().take(6).collect()
}

/// Open a channel to the configured server, over TLS when `tls` is given.
pub async fn connect(
    config: &ClientConfig,
    tls: Option<ClientTlsConfig>,
) -> anyhow::Result<PersonGuideClient<Channel>> {
    let mut endpoint = Endpoint::from_shared(config.endpoint_uri())
        .context("Invalid server address")?
        .connect_timeout(config.request_timeout());

    if let Some(tls) = tls {
        endpoint = endpoint
            .tls_config(tls)
            .context("Failed to configure client TLS")?;
    }

    let channel = endpoint
        .connect()
        .await
        .with_context(|| format!("Failed to connect to {}", config.server_addr))?;

    Ok(PersonGuideClient::new(channel))
}

fn bounded<T>(message: T, timeout: Duration) -> Request<T> {
    let mut request = Request::new(message);
    request.set_timeout(timeout);
    request
}

/// Fetch and log the phone of `person`.
pub async fn print_phone(
    client: &mut PersonGuideClient<Channel>,
    person: &Person,
    timeout: Duration,
) -> Result<PhoneNumber> {
    info!(name = %person.name, "Getting phone from person");
    let phone = client
        .get_phone(bounded(person.clone(), timeout))
        .await?
        .into_inner();
    info!(number = %phone.number, kind = ?phone.r#type(), "Got phone");
    Ok(phone)
}

/// List and log every person the server knows about.
pub async fn print_persons(
    client: &mut PersonGuideClient<Channel>,
    adress: &Adress,
    timeout: Duration,
) -> Result<Vec<Person>> {
    info!(adress = %adress.name, "Looking for persons in adress");
    let mut stream = client
        .list_persons(bounded(adress.clone(), timeout))
        .await?
        .into_inner();

    let mut persons = Vec::new();
    while let Some(person) = stream.message().await? {
        info!(
            name = %person.name,
            email = %person.email,
            id = person.id,
            "Person"
        );
        persons.push(person);
    }
    Ok(persons)
}

/// Send `persons` and return the server's address book summary.
pub async fn run_record_persons(
    client: &mut PersonGuideClient<Channel>,
    persons: Vec<Person>,
    timeout: Duration,
) -> Result<AddressBook> {
    info!(count = persons.len(), "Recording persons");
    let outbound = tokio_stream::iter(persons);
    let book = client
        .record_persons(bounded(outbound, timeout))
        .await?
        .into_inner();
    info!(people = book.people.len(), "AddressBook summary received");
    Ok(book)
}

/// Send `persons` while concurrently collecting the phones routed back.
pub async fn run_route_phones(
    client: &mut PersonGuideClient<Channel>,
    persons: Vec<Person>,
    timeout: Duration,
) -> Result<Vec<PhoneNumber>> {
    let (tx, rx) = mpsc::channel(persons.len().max(1));
    let mut inbound = client
        .route_phones(bounded(ReceiverStream::new(rx), timeout))
        .await?
        .into_inner();

    let reader = tokio::spawn(async move {
        let mut phones = Vec::new();
        while let Some(phone) = inbound.message().await? {
            info!(number = %phone.number, kind = ?phone.r#type(), "Got phone");
            phones.push(phone);
        }
        Ok::<_, tonic::Status>(phones)
    });

    for person in persons {
        tx.send(person)
            .await
            .map_err(|_| ServiceError::Internal("RoutePhones request stream closed".to_string()))?;
    }
    drop(tx);

    let phones = reader
        .await
        .map_err(|e| ServiceError::Internal(format!("RoutePhones reader failed: {}", e)))??;
    Ok(phones)
}
