use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const CUISINE_OPTIONS: [&str; 7] = [
    "Thai", "Mexican", "Italian", "Indian", "Chinese", "French", "Spanish",
];

pub const PLACE_OPTIONS: [&str; 8] = [
    "Cafe",
    "Museum",
    "Beaches",
    "Parks",
    "Shopping Mall",
    "French",
    "Art Gallery",
    "Amusement Park",
];

// Session-only profile data; never written anywhere durable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountProfile {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub age: String,
    pub cuisines: BTreeSet<String>,
    pub places: BTreeSet<String>,
}

impl AccountProfile {
    pub fn likes_cuisine(&self, name: &str) -> bool {
        self.cuisines.contains(name)
    }

    pub fn likes_place(&self, name: &str) -> bool {
        self.places.contains(name)
    }
}
