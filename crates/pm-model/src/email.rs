//! Email value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An email address attached to a user.
///
/// A user owns an ordered collection of emails, of which exactly one is
/// flagged as the main address once the collection is non-empty (see
/// [`crate::User::add_email`]). The owning user is referenced by id so the
/// association stays non-owning.
///
/// Address syntax is not validated here; format validation is a concern of
/// the layer accepting user input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Email {
    id: Uuid,
    address: String,
    main: bool,
    created_at: DateTime<Utc>,
    user_id: Option<Uuid>,
}

impl Email {
    /// Creates a new email with the given address.
    ///
    /// The email starts as non-main; adding it to a user promotes it when it
    /// is the first one.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            address: address.into(),
            main: false,
            created_at: Utc::now(),
            user_id: None,
        }
    }

    /// Sets the main flag at construction.
    #[must_use]
    pub const fn with_main(mut self, main: bool) -> Self {
        self.main = main;
        self
    }

    /// Returns the unique id.
    ///
    /// The id is the object identity used by the identity-based collection
    /// operations on the owning user.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Whether this is the user's main address.
    #[must_use]
    pub const fn is_main(&self) -> bool {
        self.main
    }

    /// Sets the main flag.
    pub fn set_main(&mut self, main: bool) -> &mut Self {
        self.main = main;
        self
    }

    /// Returns the address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Sets the address.
    pub fn set_address(&mut self, address: impl Into<String>) -> &mut Self {
        self.address = address.into();
        self
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Sets the creation timestamp.
    pub fn set_created_at(&mut self, created_at: DateTime<Utc>) -> &mut Self {
        self.created_at = created_at;
        self
    }

    /// Returns the owning user's id, if attached.
    #[must_use]
    pub const fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    /// Attaches or detaches the owning user.
    pub fn set_user_id(&mut self, user_id: Option<Uuid>) -> &mut Self {
        self.user_id = user_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_email_defaults() {
        let email = Email::new("demo@polymorph.com");

        assert_eq!(email.address(), "demo@polymorph.com");
        assert!(!email.is_main());
        assert!(email.user_id().is_none());
    }

    #[test]
    fn with_main_sets_flag() {
        let email = Email::new("demo@polymorph.com").with_main(true);

        assert!(email.is_main());
    }

    #[test]
    fn setters_chain() {
        let mut email = Email::new("demo@polymorph.com");
        let user_id = Uuid::now_v7();

        email
            .set_address("demo@polymorph.io")
            .set_main(true)
            .set_user_id(Some(user_id));

        assert_eq!(email.address(), "demo@polymorph.io");
        assert!(email.is_main());
        assert_eq!(email.user_id(), Some(user_id));
    }

    #[test]
    fn ids_distinguish_equal_addresses() {
        let first = Email::new("demo@polymorph.com");
        let second = Email::new("demo@polymorph.com");

        assert_ne!(first.id(), second.id());
    }
}
