//! Session logic for the four PersonGuide RPCs.
//!
//! Handlers here work on plain streams and channels so that the gRPC layer
//! only has to adapt tonic types.

pub mod collector;
pub mod enumerator;
pub mod exchanger;
pub mod lookup;

pub use collector::collect_persons;
pub use enumerator::enumerate_persons;
pub use exchanger::exchange_phones;
pub use lookup::lookup_phone;

use crate::personguide::{Person, PhoneNumber};
use tokio::sync::mpsc;
use tonic::Status;

/// Capacity of the per-session outbound channel for streaming responses.
pub const STREAM_BUFFER: usize = 16;

pub type PersonSender = mpsc::Sender<Result<Person, Status>>;
pub type PhoneSender = mpsc::Sender<Result<PhoneNumber, Status>>;

/// Current wall-clock time as a protobuf timestamp.
pub fn now_timestamp() -> prost_types::Timestamp {
    to_timestamp(chrono::Utc::now())
}

/// Convert through `SystemTime` so that leap-second instants still yield
/// nanos within `0..1_000_000_000`.
pub fn to_timestamp(at: chrono::DateTime<chrono::Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp::from(std::time::SystemTime::from(at))
}
