//! Group aggregate and the group capability contracts.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role;

/// Contract for entities that carry a named, ordered set of roles.
///
/// Implemented by [`Group`]; application-specific types compose or
/// implement the same contract instead of inheriting shared mutable state.
pub trait GroupCapable {
    /// Returns the unique id.
    fn id(&self) -> Uuid;

    /// Returns the name.
    fn name(&self) -> &str;

    /// Sets the name.
    fn set_name(&mut self, name: impl Into<String>) -> &mut Self;

    /// Adds a canonicalized role if not already present.
    fn add_role(&mut self, role: &str) -> &mut Self;

    /// Case-insensitive role membership test.
    fn has_role(&self, role: &str) -> bool;

    /// Returns the role set in insertion order.
    fn roles(&self) -> &[String];

    /// Removes a role if present; no-op otherwise.
    fn remove_role(&mut self, role: &str) -> &mut Self;

    /// Replaces the role set wholesale.
    fn set_roles(&mut self, roles: Vec<String>) -> &mut Self;
}

/// Contract for entities that can belong to groups.
///
/// Implemented by [`crate::User`].
pub trait Groupable {
    /// Returns the groups granted, in insertion order.
    fn groups(&self) -> &[Group];

    /// Returns the names of the groups granted.
    fn group_names(&self) -> Vec<String>;

    /// Whether a group with the given name is granted (exact match).
    fn has_group(&self, name: &str) -> bool;

    /// Grants a group; no-op if a group with the same id is already granted.
    fn add_group(&mut self, group: Group) -> &mut Self;

    /// Revokes the group with the given id; no-op if not granted.
    fn remove_group(&mut self, group_id: Uuid) -> &mut Self;
}

/// A named set of roles shared by its members.
///
/// Groups are independently owned and persisted; users hold snapshots of
/// the groups they belong to and union the group roles into their
/// effective role set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    id: Uuid,
    name: String,
    roles: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Group {
    /// Creates a new group with the given name and no roles.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            roles: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Sets the role set at construction.
    ///
    /// Like [`Group::set_roles`], the input is stored verbatim.
    #[must_use]
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    /// Returns the unique id.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the group name.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// Adds a role, canonicalized to uppercase, if not already present.
    ///
    /// The membership test is case-insensitive, so re-adding an existing
    /// role under any casing is a no-op.
    pub fn add_role(&mut self, role: &str) -> &mut Self {
        if !self.has_role(role) {
            self.roles.push(role::canonicalize(role));
        }
        self
    }

    /// Whether the group carries the given role (case-insensitive).
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        let role = role::canonicalize(role);
        self.roles.iter().any(|r| *r == role)
    }

    /// Returns the role set in insertion order.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Removes a role if present, preserving the order of the rest.
    ///
    /// Removing an absent role is a no-op.
    pub fn remove_role(&mut self, role: &str) -> &mut Self {
        let role = role::canonicalize(role);
        if let Some(pos) = self.roles.iter().position(|r| *r == role) {
            self.roles.remove(pos);
        }
        self
    }

    /// Replaces the role set wholesale.
    ///
    /// The input is stored verbatim, without canonicalization; callers
    /// replacing the set must canonicalize themselves. [`Group::add_role`]
    /// canonicalizes.
    pub fn set_roles(&mut self, roles: Vec<String>) -> &mut Self {
        self.roles = roles;
        self
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp, if any.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Sets the last update timestamp.
    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) -> &mut Self {
        self.updated_at = Some(updated_at);
        self
    }
}

impl GroupCapable for Group {
    fn id(&self) -> Uuid {
        Self::id(self)
    }

    fn name(&self) -> &str {
        Self::name(self)
    }

    fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        Self::set_name(self, name)
    }

    fn add_role(&mut self, role: &str) -> &mut Self {
        Self::add_role(self, role)
    }

    fn has_role(&self, role: &str) -> bool {
        Self::has_role(self, role)
    }

    fn roles(&self) -> &[String] {
        Self::roles(self)
    }

    fn remove_role(&mut self, role: &str) -> &mut Self {
        Self::remove_role(self, role)
    }

    fn set_roles(&mut self, roles: Vec<String>) -> &mut Self {
        Self::set_roles(self, roles)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
