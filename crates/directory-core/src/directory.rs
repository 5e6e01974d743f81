//! Person directory storage and the lookup trait consumed by the engine

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::{DirectoryError, Result};
use crate::types::{PersonId, PersonProfile, Standing};

/// Lookup surface the scheduling engine consumes.
///
/// The engine never mutates the directory; it only asks whether an id is
/// known and what standing it carries.
#[async_trait]
pub trait PersonDirectory: Send + Sync {
    /// Whether the person is registered
    async fn exists(&self, person: &PersonId) -> bool;

    /// The person's standing, `None` for unknown ids
    async fn standing(&self, person: &PersonId) -> Option<Standing>;
}

/// In-memory person directory
pub struct InMemoryDirectory {
    people: Arc<DashMap<PersonId, PersonProfile>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            people: Arc::new(DashMap::new()),
        }
    }

    /// Register a new person. Usernames are unique.
    pub async fn register(&self, profile: PersonProfile) -> Result<()> {
        if self.people.contains_key(&profile.id) {
            return Err(DirectoryError::DuplicatePerson(profile.id.clone()));
        }
        tracing::debug!("Registered person: {} ({:?})", profile.id, profile.role);
        self.people.insert(profile.id.clone(), profile);
        Ok(())
    }

    /// Get a person's full profile
    pub async fn profile_of(&self, person: &PersonId) -> Option<PersonProfile> {
        self.people.get(person).map(|entry| entry.clone())
    }

    /// List all registered person ids
    pub async fn people(&self) -> Vec<PersonId> {
        self.people.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Count of registered people
    pub fn person_count(&self) -> usize {
        self.people.len()
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PersonDirectory for InMemoryDirectory {
    async fn exists(&self, person: &PersonId) -> bool {
        self.people.contains_key(person)
    }

    async fn standing(&self, person: &PersonId) -> Option<Standing> {
        self.people.get(person).map(|entry| entry.role.standing())
    }
}
