//! Core types for directory-core

use serde::{Deserialize, Serialize};

/// Unique person identity (username)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PersonId(pub String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Role a person holds in the conference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Attendee,
    Organizer,
    Speaker,
    Vip,
}

impl Role {
    /// Standing used by VIP-gated admission checks
    pub fn standing(&self) -> Standing {
        match self {
            Role::Vip => Standing::Vip,
            _ => Standing::Regular,
        }
    }
}

/// Admission standing for VIP-only events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standing {
    Regular,
    Vip,
}

/// Directory entry for one person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonProfile {
    pub id: PersonId,
    pub display_name: String,
    pub role: Role,
}

impl PersonProfile {
    pub fn new(id: impl Into<PersonId>, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            role,
        }
    }
}

impl From<String> for PersonId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
