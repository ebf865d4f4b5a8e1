use super::now_timestamp;
use crate::error::{Result, ServiceError};
use crate::personguide::{AddressBook, Person};
use crate::registry::Registry;
use crate::seed;
use futures::{Stream, StreamExt};
use tonic::Status;
use tracing::{debug, info, warn};

/// Drain `inbound`, storing every person it yields, and summarise the
/// registry once the peer closes its side.
///
/// Each stored person gets a server-side `last_updated`, replacing whatever
/// the client sent. A read error ends the session without a summary; records
/// stored before the error stay in the registry.
pub async fn collect_persons<S>(registry: &Registry, mut inbound: S) -> Result<AddressBook>
where
    S: Stream<Item = std::result::Result<Person, Status>> + Unpin,
{
    let mut received = 0usize;

    while let Some(item) = inbound.next().await {
        let mut person = item.map_err(|status| {
            warn!(received, error = %status, "RecordPersons read failed; aborting session");
            ServiceError::StreamIo(status)
        })?;

        person.last_updated = Some(now_timestamp());
        debug!(person_id = person.id, name = %person.name, "Recording person");
        registry.append(person);
        received += 1;
    }

    let book = summarise(registry);
    info!(
        received,
        people = book.people.len(),
        "RecordPersons session complete"
    );
    Ok(book)
}

fn summarise(registry: &Registry) -> AddressBook {
    let mut people = Vec::clone(&registry.all_records());
    people.push(seed::session_completion_record());
    AddressBook { people }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personguide::PhoneNumber;

    fn incoming(id: i32) -> Person {
        Person {
            name: format!("incoming-{}", id),
            id,
            email: format!("incoming-{}@example.com", id),
            phones: vec![PhoneNumber {
                number: format!("555-{}", id),
                r#type: 0,
            }],
            last_updated: Some(prost_types::Timestamp {
                seconds: 1,
                nanos: 0,
            }),
        }
    }

    #[tokio::test]
    async fn test_collect_appends_and_stamps() {
        let registry = Registry::seeded();
        let started = now_timestamp();
        let inbound = futures::stream::iter(vec![Ok(incoming(20)), Ok(incoming(21))]);

        let book = collect_persons(&registry, inbound).await.unwrap();

        assert_eq!(registry.len(), 12);
        assert_eq!(book.people.len(), 13);
        assert_eq!(book.people[10].id, 20);
        assert_eq!(book.people[11].id, 21);
        assert_eq!(book.people[12], seed::session_completion_record());

        for person in &book.people[10..12] {
            let stamped = person.last_updated.clone().unwrap();
            assert!((stamped.seconds, stamped.nanos) >= (started.seconds, started.nanos));
        }
    }

    #[tokio::test]
    async fn test_collect_with_no_input_returns_current_state() {
        let registry = Registry::seeded();
        let inbound = futures::stream::iter(Vec::<std::result::Result<Person, Status>>::new());

        let book = collect_persons(&registry, inbound).await.unwrap();

        let mut expected = seed::example_persons();
        expected.push(seed::session_completion_record());
        assert_eq!(book.people, expected);
        assert_eq!(registry.len(), 10);
    }

    #[tokio::test]
    async fn test_collect_read_failure_returns_no_summary() {
        let registry = Registry::seeded();
        let inbound = futures::stream::iter(vec![
            Ok(incoming(30)),
            Err(Status::cancelled("peer reset")),
            Ok(incoming(31)),
        ]);

        let err = collect_persons(&registry, inbound).await.unwrap_err();

        assert!(matches!(err, ServiceError::StreamIo(ref s) if s.code() == tonic::Code::Cancelled));
        assert_eq!(registry.len(), 11);
        assert!(registry.lookup_by_id(31).is_err());
    }

    #[tokio::test]
    async fn test_synthetic_record_never_enters_registry() {
        let registry = Registry::seeded();
        for _ in 0..3 {
            let inbound =
                futures::stream::iter(Vec::<std::result::Result<Person, Status>>::new());
            collect_persons(&registry, inbound).await.unwrap();
        }
        assert_eq!(registry.len(), 10);
        assert!(registry.lookup_by_id(11).is_err());
    }
}
