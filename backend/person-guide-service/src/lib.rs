// Generated protobuf code
pub mod personguide {
    tonic::include_proto!("personguide");
}

pub mod client;
pub mod config;
pub mod error;
pub mod grpc;
pub mod registry;
pub mod seed;
pub mod services;

// Re-export common types
pub use personguide::{
    person_guide_client::PersonGuideClient,
    person_guide_server::{PersonGuide, PersonGuideServer},
    AddressBook, Adress, Person, PhoneNumber, PhoneType,
};

pub use error::{Result, ServiceError};
pub use grpc::PersonGuideImpl;
pub use registry::Registry;
