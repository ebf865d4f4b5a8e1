//! Shared person directory.
//!
//! All state sits behind a single guard. Appends replace the inner vector
//! copy-on-write, so a snapshot handed out by [`Registry::all_records`] never
//! changes underneath its holder and can be iterated without the guard.

use crate::error::{Result, ServiceError};
use crate::personguide::{Person, PhoneNumber};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

pub struct Registry {
    persons: Mutex<Arc<Vec<Person>>>,
}

impl Registry {
    pub fn new(seed: Vec<Person>) -> Self {
        Self {
            persons: Mutex::new(Arc::new(seed)),
        }
    }

    /// Registry holding the built-in dataset.
    pub fn seeded() -> Self {
        Self::new(crate::seed::example_persons())
    }

    /// First phone number of the first person with `id`.
    ///
    /// A person without phone numbers is reported exactly like a missing person.
    pub fn lookup_by_id(&self, id: i32) -> Result<PhoneNumber> {
        let persons = self.all_records();
        persons
            .iter()
            .find(|person| person.id == id)
            .and_then(|person| person.phones.first().cloned())
            .ok_or_else(|| ServiceError::NotFound(format!("no phone found for person {}", id)))
    }

    /// Point-in-time view of every record, in insertion order.
    pub fn all_records(&self) -> Arc<Vec<Person>> {
        Arc::clone(&self.persons.lock())
    }

    /// Add a record at the end. Ids are not checked for uniqueness.
    pub fn append(&self, person: Person) {
        let mut persons = self.persons.lock();
        // Clones the vector only while older snapshots are still alive.
        Arc::make_mut(&mut persons).push(person);
        debug!(len = persons.len(), "Person appended to registry");
    }

    /// Copy `person`'s phone list under the guard so that the caller can send
    /// the entries without holding it.
    pub fn snapshot_phones(&self, person: &Person) -> Vec<PhoneNumber> {
        let _guard = self.persons.lock();
        person.phones.clone()
    }

    pub fn len(&self) -> usize {
        self.persons.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
