//! User storage provider trait.

use async_trait::async_trait;
use pm_model::User;
use uuid::Uuid;

use crate::error::StorageResult;

/// Provider for user storage operations.
///
/// Implementations must be thread-safe and support concurrent access.
/// The model assigns ids at construction; providers store them verbatim.
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Creates a new user.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if a user with the same username
    /// or slug exists.
    async fn create(&self, user: &User) -> StorageResult<()>;

    /// Updates an existing user.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the user doesn't exist.
    async fn update(&self, user: &User) -> StorageResult<()>;

    /// Deletes a user by ID.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the user doesn't exist.
    async fn delete(&self, id: Uuid) -> StorageResult<()>;

    /// Gets a user by ID.
    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<User>>;

    /// Gets a user by username.
    async fn get_by_username(&self, username: &str) -> StorageResult<Option<User>>;

    /// Gets a user by canonical username.
    async fn get_by_slug(&self, slug: &str) -> StorageResult<Option<User>>;

    /// Gets a user owning the given address (any email in the collection,
    /// not only the main one).
    async fn get_by_email(&self, address: &str) -> StorageResult<Option<User>>;

    /// Gets a user by confirmation token.
    async fn get_by_confirmation_token(&self, token: &str) -> StorageResult<Option<User>>;

    /// Searches for users matching criteria.
    async fn search(&self, criteria: &UserSearchCriteria) -> StorageResult<Vec<User>>;

    /// Counts users matching criteria, ignoring pagination.
    async fn count(&self, criteria: &UserSearchCriteria) -> StorageResult<u64>;
}

/// Search criteria for users.
#[derive(Debug, Default, Clone)]
pub struct UserSearchCriteria {
    /// Search string (matches username, slug, and email addresses).
    pub search: Option<String>,
    /// Filter by username (exact match).
    pub username: Option<String>,
    /// Filter by email address (exact match on any address).
    pub email: Option<String>,
    /// Filter by enabled status.
    pub enabled: Option<bool>,
    /// Maximum results to return.
    pub max_results: Option<usize>,
    /// Offset for pagination.
    pub offset: Option<usize>,
}

impl UserSearchCriteria {
    /// Creates a new search criteria.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            search: None,
            username: None,
            email: None,
            enabled: None,
            max_results: None,
            offset: None,
        }
    }

    /// Sets the search string.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Filters by username.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Filters by email address.
    #[must_use]
    pub fn email(mut self, address: impl Into<String>) -> Self {
        self.email = Some(address.into());
        self
    }

    /// Filters by enabled status.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Sets maximum results.
    #[must_use]
    pub const fn max_results(mut self, max: usize) -> Self {
        self.max_results = Some(max);
        self
    }

    /// Sets offset for pagination.
    #[must_use]
    pub const fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }
}
