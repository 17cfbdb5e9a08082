//! # pm-storage
//!
//! Persistence provider contracts for the user and group domain model.
//!
//! This crate defines the interfaces a concrete storage backend implements
//! to load and save `pm-model` aggregates. The model itself stays
//! storage-agnostic; backends own id uniqueness enforcement and concurrency
//! control.
//!
//! ## Provider Traits
//!
//! - [`UserProvider`] - CRUD and lookup operations for users
//! - [`GroupProvider`] - CRUD and lookup operations for groups
//!
//! The [`memory`] module ships in-memory reference implementations used by
//! the integration tests.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

pub mod error;
pub mod group;
pub mod memory;
pub mod user;

pub use error::{StorageError, StorageResult};
pub use group::GroupProvider;
pub use memory::{InMemoryGroupProvider, InMemoryUserProvider};
pub use user::UserProvider;
