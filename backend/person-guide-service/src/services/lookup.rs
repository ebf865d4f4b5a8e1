use crate::error::Result;
use crate::personguide::{Person, PhoneNumber};
use crate::registry::Registry;
use tracing::{debug, info};

/// Resolve the phone for `person`. Only the id is looked at.
pub fn lookup_phone(registry: &Registry, person: &Person) -> Result<PhoneNumber> {
    debug!(person_id = person.id, name = %person.name, "Looking up phone");
    registry.lookup_by_id(person.id).inspect_err(|_| {
        info!(person_id = person.id, "No phone found for person");
    })
}
