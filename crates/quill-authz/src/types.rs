//! Strongly typed identifiers for directory entities.
//!
//! # Purpose
//! Wraps the integer primary keys of users, groups, positions, roles, and
//! countries to reduce accidental mix-ups between relation sets that are all
//! `i64` underneath.
//!
//! # How it fits
//! These ids appear in every adjacency set the resolver consumes and in the
//! directory model of the admin-plane service.
//!
//! # Key invariants
//! - Wrappers are plain values; no range validation happens here.
//! - `Display` and `get` return the original id unchanged.
use serde::{Deserialize, Serialize};

/// User (principal) identifier wrapper.
///
/// # Example
/// ```rust
/// use quill_authz::UserId;
///
/// let user = UserId::new(42);
/// assert_eq!(user.get(), 42);
/// assert_eq!(user.to_string(), "42");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UserId(i64);

impl UserId {
    /// Construct a new user id wrapper.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the raw id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group identifier wrapper.
///
/// # Example
/// ```rust
/// use quill_authz::GroupId;
///
/// let group = GroupId::new(7);
/// assert_eq!(group.get(), 7);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GroupId(i64);

impl GroupId {
    /// Construct a new group id wrapper.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the raw id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position identifier wrapper.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PositionId(i64);

impl PositionId {
    /// Construct a new position id wrapper.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the raw id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PositionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role identifier wrapper.
///
/// Note that permission checks compare role *labels* (strings such as
/// `route:users#edit`), not role ids; the id wrapper exists for the
/// assignable-rights relation sets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RoleId(i64);

impl RoleId {
    /// Construct a new role id wrapper.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the raw id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RoleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Country identifier wrapper.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct CountryId(i64);

impl CountryId {
    /// Construct a new country id wrapper.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the raw id.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CountryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
