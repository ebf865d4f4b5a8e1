use super::PhoneSender;
use crate::personguide::Person;
use crate::registry::Registry;
use futures::{Stream, StreamExt};
use tonic::Status;
use tracing::{debug, warn};

/// Answer each inbound person with its phone numbers, one message per number.
///
/// Persons are handled strictly one at a time: all phones of a person are
/// queued on `tx` before the next person is read. The phone list is copied
/// under the registry guard and the guard is released before any send.
/// A read error is forwarded to the caller and ends the session; a dropped
/// receiver ends it silently.
pub async fn exchange_phones<S>(registry: &Registry, mut inbound: S, tx: PhoneSender)
where
    S: Stream<Item = Result<Person, Status>> + Unpin,
{
    let mut persons = 0usize;

    while let Some(item) = inbound.next().await {
        let person = match item {
            Ok(person) => person,
            Err(status) => {
                warn!(persons, error = %status, "RoutePhones read failed; aborting session");
                let _ = tx.send(Err(status)).await;
                return;
            }
        };

        let phones = registry.snapshot_phones(&person);
        debug!(person_id = person.id, phones = phones.len(), "Routing phones");

        for phone in phones {
            if tx.send(Ok(phone)).await.is_err() {
                warn!(persons, "RoutePhones receiver dropped; aborting session");
                return;
            }
        }
        persons += 1;
    }

    debug!(persons, "RoutePhones session complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::personguide::PhoneNumber;
    use tokio::sync::mpsc;

    fn with_phones(id: i32, numbers: &[&str]) -> Person {
        Person {
            id,
            phones: numbers
                .iter()
                .map(|n| PhoneNumber {
                    number: n.to_string(),
                    r#type: 2,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_emits_phones_in_order_per_person() {
        let registry = Registry::seeded();
        let (tx, mut rx) = mpsc::channel(16);
        let inbound = futures::stream::iter(vec![
            Ok(with_phones(1, &["A", "B", "C"])),
            Ok(with_phones(2, &["D"])),
            Ok(with_phones(3, &[])),
        ]);

        exchange_phones(&registry, inbound, tx).await;

        let mut numbers = Vec::new();
        while let Some(item) = rx.recv().await {
            numbers.push(item.unwrap().number);
        }
        assert_eq!(numbers, vec!["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn test_read_failure_is_forwarded_and_ends_session() {
        let registry = Registry::seeded();
        let (tx, mut rx) = mpsc::channel(16);
        let inbound = futures::stream::iter(vec![
            Ok(with_phones(1, &["A"])),
            Err(Status::unavailable("transport closed")),
            Ok(with_phones(2, &["B"])),
        ]);

        exchange_phones(&registry, inbound, tx).await;

        assert_eq!(rx.recv().await.unwrap().unwrap().number, "A");
        let err = rx.recv().await.unwrap().unwrap_err();
        assert_eq!(err.code(), tonic::Code::Unavailable);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_dropped_receiver_stops_without_reading_further() {
        let registry = Registry::seeded();
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let inbound = futures::stream::iter(vec![
            Ok(with_phones(1, &["A", "B"])),
            Ok(with_phones(2, &["C"])),
        ]);

        // Returns instead of hanging on a closed channel.
        exchange_phones(&registry, inbound, tx).await;
    }
}
