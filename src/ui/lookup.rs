use crate::{domain::expert::Expert, usecases::store::AppStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    NoMatch(String),
    Ambiguous { query: String, candidates: Vec<String> },
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMatch(query) => write!(f, "no expert matches '{query}'"),
            Self::Ambiguous { query, candidates } => write!(
                f,
                "'{query}' matches several experts: {}",
                candidates.join(", ")
            ),
        }
    }
}

impl std::error::Error for LookupError {}

/// Picks one expert for a command-line argument. An exact name match wins,
/// otherwise the search must narrow the roster down to a single expert.
pub fn resolve_expert<'a>(store: &'a AppStore, query: &str) -> Result<&'a Expert, LookupError> {
    let trimmed = query.trim();
    let needle = trimmed.to_lowercase();

    if let Some(exact) = store
        .list_experts()
        .iter()
        .find(|expert| expert.name.to_lowercase() == needle)
    {
        return Ok(exact);
    }

    let mut matches = store.search_experts(trimmed);
    match matches.len() {
        0 => Err(LookupError::NoMatch(trimmed.to_owned())),
        1 => Ok(matches.remove(0)),
        _ if trimmed.is_empty() => Err(LookupError::NoMatch(trimmed.to_owned())),
        _ => Err(LookupError::Ambiguous {
            query: trimmed.to_owned(),
            candidates: matches.iter().map(|expert| expert.name.clone()).collect(),
        }),
    }
}
