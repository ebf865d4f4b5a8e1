use super::PersonSender;
use crate::registry::Registry;
use tracing::{debug, warn};

/// Push every registry record to `tx` in insertion order.
///
/// Works from a snapshot taken up front, so records appended while the
/// session runs are not included. Returns the number of records delivered;
/// stops early once the receiving side is gone.
pub async fn enumerate_persons(registry: &Registry, tx: PersonSender) -> usize {
    let persons = registry.all_records();
    let mut sent = 0;

    for person in persons.iter() {
        if tx.send(Ok(person.clone())).await.is_err() {
            warn!(sent, total = persons.len(), "ListPersons receiver dropped; aborting");
            return sent;
        }
        sent += 1;
    }

    debug!(sent, "ListPersons enumeration complete");
    sent
}
