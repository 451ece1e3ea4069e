use serde::{Deserialize, Serialize};

/// A catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub id: i32,
    pub name: String,
    pub image: String,
}

impl Hero {
    /// Build a hero whose image lives under `/images/<lowercase name>.jpg`
    pub fn new(id: i32, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            image: format!("/images/{}.jpg", name.to_lowercase()),
        }
    }
}
