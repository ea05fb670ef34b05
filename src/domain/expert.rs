use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpertId(Uuid);

impl ExpertId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ExpertId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    pub fn as_label(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

/// A bookable professional listed in the roster.
///
/// Experts are created once from seed data and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Expert {
    pub id: ExpertId,
    pub name: String,
    pub gender: Gender,
    pub specialties: Vec<String>,
    pub bio: String,
    pub rate_per_minute: f64,
    pub image: Option<String>,
}

impl Expert {
    /// Uppercased first letters of the first two name tokens ("Dr. Aisha Verma" -> "DA").
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .take(2)
            .filter_map(|token| token.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn specialties_label(&self) -> String {
        self.specialties.join(", ")
    }
}
