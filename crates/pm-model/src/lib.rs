//! # pm-model
//!
//! Storage-agnostic user and group domain model for an authentication layer.
//!
//! This crate defines plain in-memory aggregates with light business-rule
//! validation. Persistence, password hashing, and access-control decisions
//! are external collaborators; see the `pm-storage` crate for the
//! persistence boundary.
//!
//! ## Entities
//!
//! - [`User`] - aggregate root: identity, credentials material, emails,
//!   roles, group memberships, account-state flags
//! - [`Group`] - named set of roles shared by its members
//! - [`Email`] - address value object with a "main" flag
//!
//! ## Capability contracts
//!
//! - [`GroupCapable`] - can carry a named set of roles
//! - [`Groupable`] - can belong to groups

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod email;
pub mod group;
pub mod role;
pub mod user;

pub use email::Email;
pub use group::{Group, GroupCapable, Groupable};
pub use user::User;
