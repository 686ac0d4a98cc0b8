//! Domain primitives for places and the people who manage them.
//!
//! Ids are newtypes so a place id can never be passed where an author id is
//! expected. [`Actor`] is the caller as reported by the authenticating layer
//! in front of this service; the ownership rules live here so the HTTP and
//! CLI surfaces apply the same policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a place.
///
/// # Examples
///
/// ```rust
/// use placeshare::domain::PlaceId;
///
/// let id = PlaceId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(i32);

impl PlaceId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        debug_assert!(id >= 0, "PlaceId should be non-negative");
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for PlaceId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

impl From<PlaceId> for i32 {
    fn from(id: PlaceId) -> Self {
        id.0
    }
}

/// Identifier of the user who authored a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Member,
    Admin,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "member" | "user" => Ok(Self::Member),
            "admin" => Ok(Self::Admin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// The authenticated caller of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
}

impl Actor {
    #[must_use]
    pub const fn member(user_id: i32) -> Self {
        Self {
            user_id: UserId::new(user_id),
            role: Role::Member,
        }
    }

    #[must_use]
    pub const fn admin(user_id: i32) -> Self {
        Self {
            user_id: UserId::new(user_id),
            role: Role::Admin,
        }
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Owners and admins may modify a place or see it after soft deletion.
    #[must_use]
    pub const fn can_manage(&self, author_id: UserId) -> bool {
        self.is_admin() || self.user_id.value() == author_id.value()
    }
}

/// Which soft-delete states a listing includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeletedFilter {
    /// Only places that are not soft-deleted.
    #[default]
    Exclude,
    /// Live and soft-deleted places.
    With,
    /// Soft-deleted places only.
    Only,
}
