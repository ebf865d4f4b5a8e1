//! Fixed dataset the registry starts from on every boot.
//!
//! The directory is volatile: nothing recorded at runtime survives a restart,
//! and the configured data file is only reported, never read.

use crate::personguide::{Person, PhoneNumber, PhoneType};
use std::path::Path;
use tracing::info;

const SEED_NAMES: [&str; 10] = [
    "Juan",
    "Gabriel",
    "Albert",
    "Mark",
    "Brian",
    "Kevin",
    "Ryan",
    "May",
    "Rosario",
    "Argentina",
];

/// Phone list shared by every seeded person.
pub fn example_phones() -> Vec<PhoneNumber> {
    vec![
        phone("1234", PhoneType::Home),
        phone("4321", PhoneType::Work),
        phone("4312", PhoneType::Mobile),
    ]
}

/// The ten persons every registry starts with, ids 1 through 10.
pub fn example_persons() -> Vec<Person> {
    SEED_NAMES
        .iter()
        .zip(1..)
        .map(|(name, id)| Person {
            name: (*name).to_string(),
            id,
            email: format!("{}@gmail.com", name.to_lowercase()),
            phones: example_phones(),
            last_updated: None,
        })
        .collect()
}

/// Resolve the seed set for a new registry.
pub fn load_seed(path: Option<&Path>) -> Vec<Person> {
    match path {
        Some(path) => info!(
            path = %path.display(),
            "Seed data file configured; loading the built-in dataset instead"
        ),
        None => info!("No seed data file configured; loading the built-in dataset"),
    }
    example_persons()
}

/// Record appended to the address book returned by every completed
/// RecordPersons session. It is added to the reply only, never to the registry.
pub fn session_completion_record() -> Person {
    Person {
        name: "Another part in the world".to_string(),
        id: 11,
        email: "anotherpartintheworld@gmail.com".to_string(),
        phones: example_phones(),
        last_updated: None,
    }
}

fn phone(number: &str, kind: PhoneType) -> PhoneNumber {
    PhoneNumber {
        number: number.to_string(),
        r#type: kind as i32,
    }
}
