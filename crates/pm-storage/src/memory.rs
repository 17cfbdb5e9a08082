//! In-memory reference providers.
//!
//! Backing store for tests and examples. Real deployments implement the
//! provider traits against an actual persistence engine; these
//! implementations keep everything in a process-local map behind an async
//! lock.

use std::collections::HashMap;

use async_trait::async_trait;
use pm_model::{Group, User};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{StorageError, StorageResult};
use crate::group::{GroupProvider, GroupSearchCriteria};
use crate::user::{UserProvider, UserSearchCriteria};

/// In-memory user provider.
#[derive(Debug, Default)]
pub struct InMemoryUserProvider {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_user(user: &User, criteria: &UserSearchCriteria) -> bool {
    if let Some(search) = &criteria.search {
        let in_username = user.username().is_some_and(|u| u.contains(search.as_str()));
        let in_slug = user.slug().is_some_and(|s| s.contains(search.as_str()));
        let in_emails = user
            .emails()
            .iter()
            .any(|e| e.address().contains(search.as_str()));
        if !in_username && !in_slug && !in_emails {
            return false;
        }
    }

    if let Some(username) = &criteria.username {
        if user.username() != Some(username.as_str()) {
            return false;
        }
    }

    if let Some(address) = &criteria.email {
        if !user.emails().iter().any(|e| e.address() == address) {
            return false;
        }
    }

    if let Some(enabled) = criteria.enabled {
        if user.is_enabled() != enabled {
            return false;
        }
    }

    true
}

#[async_trait]
impl UserProvider for InMemoryUserProvider {
    async fn create(&self, user: &User) -> StorageResult<()> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id()) {
            return Err(StorageError::duplicate("User", "id", user.id().to_string()));
        }
        if let Some(username) = user.username() {
            if users.values().any(|u| u.username() == Some(username)) {
                return Err(StorageError::duplicate("User", "username", username));
            }
        }
        if let Some(slug) = user.slug() {
            if users.values().any(|u| u.slug() == Some(slug)) {
                return Err(StorageError::duplicate("User", "slug", slug));
            }
        }

        users.insert(user.id(), user.clone());
        tracing::debug!(user_id = %user.id(), "user created");
        Ok(())
    }

    async fn update(&self, user: &User) -> StorageResult<()> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id()) {
            return Err(StorageError::not_found("User", user.id()));
        }

        users.insert(user.id(), user.clone());
        tracing::debug!(user_id = %user.id(), "user updated");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        let mut users = self.users.write().await;

        if users.remove(&id).is_none() {
            return Err(StorageError::not_found("User", id));
        }

        tracing::debug!(user_id = %id, "user deleted");
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username() == Some(username))
            .cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> StorageResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.slug() == Some(slug)).cloned())
    }

    async fn get_by_email(&self, address: &str) -> StorageResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.emails().iter().any(|e| e.address() == address))
            .cloned())
    }

    async fn get_by_confirmation_token(&self, token: &str) -> StorageResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.confirmation_token() == Some(token))
            .cloned())
    }

    async fn search(&self, criteria: &UserSearchCriteria) -> StorageResult<Vec<User>> {
        let users = self.users.read().await;

        let mut matching: Vec<User> = users
            .values()
            .filter(|u| matches_user(u, criteria))
            .cloned()
            .collect();
        // UUIDv7 ids order by creation time.
        matching.sort_by_key(User::id);

        let offset = criteria.offset.unwrap_or(0);
        let max = criteria.max_results.unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(offset).take(max).collect())
    }

    async fn count(&self, criteria: &UserSearchCriteria) -> StorageResult<u64> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| matches_user(u, criteria)).count() as u64)
    }
}

/// In-memory group provider.
#[derive(Debug, Default)]
pub struct InMemoryGroupProvider {
    groups: RwLock<HashMap<Uuid, Group>>,
}

impl InMemoryGroupProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches_group(group: &Group, criteria: &GroupSearchCriteria) -> bool {
    if let Some(search) = &criteria.search {
        if !group.name().contains(search.as_str()) {
            return false;
        }
    }

    if let Some(name) = &criteria.name {
        if group.name() != name {
            return false;
        }
    }

    if let Some(role) = &criteria.role {
        if !group.has_role(role) {
            return false;
        }
    }

    true
}

#[async_trait]
impl GroupProvider for InMemoryGroupProvider {
    async fn create(&self, group: &Group) -> StorageResult<()> {
        let mut groups = self.groups.write().await;

        if groups.contains_key(&group.id()) {
            return Err(StorageError::duplicate(
                "Group",
                "id",
                group.id().to_string(),
            ));
        }
        if groups.values().any(|g| g.name() == group.name()) {
            return Err(StorageError::duplicate("Group", "name", group.name()));
        }

        groups.insert(group.id(), group.clone());
        tracing::debug!(group_id = %group.id(), name = group.name(), "group created");
        Ok(())
    }

    async fn update(&self, group: &Group) -> StorageResult<()> {
        let mut groups = self.groups.write().await;

        if !groups.contains_key(&group.id()) {
            return Err(StorageError::not_found("Group", group.id()));
        }

        groups.insert(group.id(), group.clone());
        tracing::debug!(group_id = %group.id(), "group updated");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> StorageResult<()> {
        let mut groups = self.groups.write().await;

        if groups.remove(&id).is_none() {
            return Err(StorageError::not_found("Group", id));
        }

        tracing::debug!(group_id = %id, "group deleted");
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> StorageResult<Option<Group>> {
        let groups = self.groups.read().await;
        Ok(groups.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> StorageResult<Option<Group>> {
        let groups = self.groups.read().await;
        Ok(groups.values().find(|g| g.name() == name).cloned())
    }

    async fn search(&self, criteria: &GroupSearchCriteria) -> StorageResult<Vec<Group>> {
        let groups = self.groups.read().await;

        let mut matching: Vec<Group> = groups
            .values()
            .filter(|g| matches_group(g, criteria))
            .cloned()
            .collect();
        matching.sort_by_key(Group::id);

        let offset = criteria.offset.unwrap_or(0);
        let max = criteria.max_results.unwrap_or(usize::MAX);
        Ok(matching.into_iter().skip(offset).take(max).collect())
    }

    async fn count(&self, criteria: &GroupSearchCriteria) -> StorageResult<u64> {
        let groups = self.groups.read().await;
        Ok(groups
            .values()
            .filter(|g| matches_group(g, criteria))
            .count() as u64)
    }
}
