pub mod server;

pub use server::{serve, serve_with_listener, shutdown_signal};

use crate::personguide::{
    person_guide_server::PersonGuide, AddressBook, Adress, Person, PhoneNumber,
};
use crate::registry::Registry;
use crate::services::{self, STREAM_BUFFER};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status, Streaming};
use tracing::info;

#[derive(Clone)]
pub struct PersonGuideImpl {
    registry: Arc<Registry>,
}

impl PersonGuideImpl {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }
}

#[tonic::async_trait]
impl PersonGuide for PersonGuideImpl {
    async fn get_phone(&self, request: Request<Person>) -> Result<Response<PhoneNumber>, Status> {
        let person = request.into_inner();
        let phone = services::lookup_phone(&self.registry, &person)?;
        Ok(Response::new(phone))
    }

    type ListPersonsStream = ReceiverStream<Result<Person, Status>>;

    async fn list_persons(
        &self,
        request: Request<Adress>,
    ) -> Result<Response<Self::ListPersonsStream>, Status> {
        let adress = request.into_inner();
        // The address name is logged only; every person is returned.
        info!(adress = %adress.name, "ListPersons session started");

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let registry = Arc::clone(&self.registry);
        tokio::spawn(async move {
            services::enumerate_persons(&registry, tx).await;
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }

    async fn record_persons(
        &self,
        request: Request<Streaming<Person>>,
    ) -> Result<Response<AddressBook>, Status> {
        info!("RecordPersons session started");
        let book = services::collect_persons(&self.registry, request.into_inner()).await?;
        Ok(Response::new(book))
    }

    type RoutePhonesStream = ReceiverStream<Result<PhoneNumber, Status>>;

    async fn route_phones(
        &self,
        request: Request<Streaming<Person>>,
    ) -> Result<Response<Self::RoutePhonesStream>, Status> {
        info!("RoutePhones session started");
        let inbound = request.into_inner();

        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let registry = Arc::clone(&self.registry);
        tokio::spawn(async move {
            services::exchange_phones(&registry, inbound, tx).await;
        });

        Ok(Response::new(ReceiverStream::new(rx)))
    }
}
