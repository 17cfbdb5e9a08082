//! Group storage provider trait.

use async_trait::async_trait;
use pm_model::Group;
use uuid::Uuid;

use crate::error::StorageResult;

/// Provider for group storage operations.
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait GroupProvider: Send + Sync {
    /// Creates a new group.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if a group with the same name
    /// exists.
    async fn create(&self, group: &Group) -> StorageResult<()>;

    /// Updates an existing group.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the group doesn't exist.
    async fn update(&self, group: &Group) -> StorageResult<()>;

    /// Deletes a group by ID.
    ///
    /// Users referencing the group are not touched; membership cleanup is
    /// the caller's concern.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the group doesn't exist.
    async fn delete(&self, id: Uuid) -> StorageResult<()>;

    /// Gets a group by ID.
    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Group>>;

    /// Gets a group by name.
    async fn get_by_name(&self, name: &str) -> StorageResult<Option<Group>>;

    /// Searches for groups matching criteria.
    async fn search(&self, criteria: &GroupSearchCriteria) -> StorageResult<Vec<Group>>;

    /// Counts groups matching criteria, ignoring pagination.
    async fn count(&self, criteria: &GroupSearchCriteria) -> StorageResult<u64>;
}

/// Search criteria for groups.
#[derive(Debug, Default, Clone)]
pub struct GroupSearchCriteria {
    /// Search string (matches group name).
    pub search: Option<String>,
    /// Filter by exact name.
    pub name: Option<String>,
    /// Filter to groups carrying the given role (case-insensitive).
    pub role: Option<String>,
    /// Maximum results to return.
    pub max_results: Option<usize>,
    /// Offset for pagination.
    pub offset: Option<usize>,
}

impl GroupSearchCriteria {
    /// Creates a new search criteria.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            search: None,
            name: None,
            role: None,
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

    /// Filters by exact name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Filters to groups carrying the given role.
    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
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
