//! User aggregate root.
//!
//! Users compose role resolution (own roles, group-inherited roles, and the
//! implicit default role), main-email selection, and account-state checks.
//! Everything else is plain field access.
//!
//! All operations are total: malformed input (removing an absent role,
//! revoking an unknown group) is a silent no-op, never an error.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::email::Email;
use crate::group::{Group, Groupable};
use crate::role::{self, ROLE_DEFAULT, ROLE_SUPER_ADMIN};

/// Storage-agnostic user aggregate.
///
/// A user owns an ordered collection of [`Email`]s (exactly one of which is
/// main once any exist), a set of directly assigned roles, and a collection
/// of [`Group`] memberships contributing inherited roles.
///
/// Password hashing happens outside this model: a hashing collaborator
/// consumes [`User::plain_password`] and stores its output via
/// [`User::set_password`]. The plaintext is transient and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)] // Domain model naturally has many boolean flags
pub struct User {
    // === Identity ===
    id: Uuid,
    username: Option<String>,
    slug: Option<String>,

    // === Emails ===
    emails: Vec<Email>,

    // === Credentials ===
    password: Option<String>,
    #[serde(skip)]
    plain_password: Option<String>,
    salt: Option<String>,

    // === Roles & Groups ===
    roles: Vec<String>,
    groups: Vec<Group>,

    // === Account State ===
    enabled: bool,
    locked: bool,
    expired: bool,
    expires_at: Option<DateTime<Utc>>,
    credentials_expired: bool,
    credentials_expire_at: Option<DateTime<Utc>>,

    // === Recovery ===
    confirmation_token: Option<String>,
    password_requested_at: Option<DateTime<Utc>>,

    // === Timestamps ===
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with default state.
    ///
    /// The account starts disabled, unlocked, and unexpired, with empty
    /// role, email, and group collections.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            username: None,
            slug: None,
            emails: Vec::new(),
            password: None,
            plain_password: None,
            salt: None,
            roles: Vec::new(),
            groups: Vec::new(),
            enabled: false,
            locked: false,
            expired: false,
            expires_at: None,
            credentials_expired: false,
            credentials_expire_at: None,
            confirmation_token: None,
            password_requested_at: None,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the unique id.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the username, if set.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Sets the username.
    pub fn set_username(&mut self, username: impl Into<String>) -> &mut Self {
        self.username = Some(username.into());
        self
    }

    /// Returns the canonical username used in search and sort queries.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// Sets the canonical username.
    pub fn set_slug(&mut self, slug: impl Into<String>) -> &mut Self {
        self.slug = Some(slug.into());
        self
    }

    // === Roles ===

    /// Adds a role, canonicalized to uppercase.
    ///
    /// The default role is silently dropped: it is implicitly granted to
    /// every user and never stored. Re-adding a present role is a no-op.
    pub fn add_role(&mut self, role: &str) -> &mut Self {
        let role = role::canonicalize(role);

        if role == ROLE_DEFAULT {
            return self;
        }

        if !self.roles.contains(&role) {
            self.roles.push(role);
        }

        self
    }

    /// Removes a role from the own-role set.
    ///
    /// Group-inherited roles are unaffected; removing an absent role is a
    /// no-op.
    pub fn remove_role(&mut self, role: &str) -> &mut Self {
        let role = role::canonicalize(role);
        if let Some(pos) = self.roles.iter().position(|r| *r == role) {
            self.roles.remove(pos);
        }
        self
    }

    /// Replaces the own-role set.
    ///
    /// Each entry is re-added through [`User::add_role`], so
    /// canonicalization and default-role filtering apply.
    pub fn set_roles(&mut self, roles: Vec<String>) -> &mut Self {
        self.roles.clear();
        for role in &roles {
            self.add_role(role);
        }
        self
    }

    /// Returns the effective authorization role set.
    ///
    /// The union of own roles (insertion order), each group's roles in
    /// group-then-role order, and the default role appended last, with
    /// duplicates removed keeping the first occurrence.
    ///
    /// Never use this to check whether the user has access to anything;
    /// that decision belongs to the access-control evaluator consuming it.
    #[must_use]
    pub fn roles(&self) -> Vec<String> {
        let mut roles = self.roles.clone();

        for group in &self.groups {
            roles.extend(group.roles().iter().cloned());
        }

        // Every user holds at least the default role.
        roles.push(ROLE_DEFAULT.to_string());

        let mut unique = Vec::with_capacity(roles.len());
        for role in roles {
            if !unique.contains(&role) {
                unique.push(role);
            }
        }
        unique
    }

    /// Returns the directly assigned roles, excluding the implicit default
    /// and anything inherited from groups.
    #[must_use]
    pub fn own_roles(&self) -> &[String] {
        &self.roles
    }

    /// Whether the effective role set contains the given role
    /// (case-insensitive).
    ///
    /// Never use this to check whether the user has access to anything;
    /// that decision belongs to the access-control evaluator.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        let role = role::canonicalize(role);
        self.roles().iter().any(|r| *r == role)
    }

    /// Whether the user holds the super-admin role, directly or through a
    /// group.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.has_role(ROLE_SUPER_ADMIN)
    }

    /// Grants or revokes the super-admin role on the own-role set.
    pub fn set_super_admin(&mut self, super_admin: bool) -> &mut Self {
        if super_admin {
            self.add_role(ROLE_SUPER_ADMIN)
        } else {
            self.remove_role(ROLE_SUPER_ADMIN)
        }
    }

    // === Emails ===

    /// Adds an email to the collection.
    ///
    /// No-op if an email with the same id is already present; two emails
    /// with equal addresses but distinct ids are both insertable. An
    /// incoming main email demotes every existing one first, and the first
    /// email ever added is forced main regardless of its prior flag.
    pub fn add_email(&mut self, mut email: Email) -> &mut Self {
        if self.emails.iter().any(|e| e.id() == email.id()) {
            return self;
        }

        if email.is_main() {
            for existing in &mut self.emails {
                existing.set_main(false);
            }
        }

        if self.emails.is_empty() {
            email.set_main(true);
        }

        self.emails.push(email);
        self
    }

    /// Returns the address of the main email, if any.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.emails.iter().find(|e| e.is_main()).map(Email::address)
    }

    /// Returns the email collection in insertion order.
    #[must_use]
    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    // === Credentials ===

    /// Returns the hashed password, if set.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Sets the hashed password.
    pub fn set_password(&mut self, password: impl Into<String>) -> &mut Self {
        self.password = Some(password.into());
        self
    }

    /// Returns the transient plaintext password, if set.
    #[must_use]
    pub fn plain_password(&self) -> Option<&str> {
        self.plain_password.as_deref()
    }

    /// Sets the transient plaintext password.
    ///
    /// Consumed by the hashing collaborator; never serialized.
    pub fn set_plain_password(&mut self, password: impl Into<String>) -> &mut Self {
        self.plain_password = Some(password.into());
        self
    }

    /// Returns the hashing salt, if set.
    #[must_use]
    pub fn salt(&self) -> Option<&str> {
        self.salt.as_deref()
    }

    /// Sets the hashing salt.
    pub fn set_salt(&mut self, salt: impl Into<String>) -> &mut Self {
        self.salt = Some(salt.into());
        self
    }

    /// Removes sensitive data from the user.
    ///
    /// Clears the transient plaintext password; the hashed password and
    /// salt are untouched.
    pub fn erase_credentials(&mut self) {
        self.plain_password = None;
    }

    // === Account State ===

    /// Whether the account is enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the account.
    pub fn set_enabled(&mut self, enabled: bool) -> &mut Self {
        self.enabled = enabled;
        self
    }

    /// Whether the account has not expired, evaluated now.
    #[must_use]
    pub fn is_account_non_expired(&self) -> bool {
        self.is_account_non_expired_at(Utc::now())
    }

    /// Whether the account has not expired at the given instant.
    ///
    /// False when the expired flag is set or the expiry instant is strictly
    /// in the past; an expiry equal to `now` has not yet passed.
    #[must_use]
    pub fn is_account_non_expired_at(&self, now: DateTime<Utc>) -> bool {
        if self.expired {
            return false;
        }

        if let Some(expires_at) = self.expires_at {
            if expires_at < now {
                return false;
            }
        }

        true
    }

    /// Whether the account has expired, evaluated now.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        !self.is_account_non_expired()
    }

    /// Marks the account as expired.
    pub fn set_expired(&mut self, expired: bool) -> &mut Self {
        self.expired = expired;
        self
    }

    /// Returns the account expiry instant, if set.
    #[must_use]
    pub const fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Sets or clears the account expiry instant.
    pub fn set_expires_at(&mut self, expires_at: Option<DateTime<Utc>>) -> &mut Self {
        self.expires_at = expires_at;
        self
    }

    /// Whether the account is not locked.
    #[must_use]
    pub const fn is_account_non_locked(&self) -> bool {
        !self.locked
    }

    /// Whether the account is locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        !self.is_account_non_locked()
    }

    /// Locks or unlocks the account.
    pub fn set_locked(&mut self, locked: bool) -> &mut Self {
        self.locked = locked;
        self
    }

    /// Whether the credentials have not expired, evaluated now.
    #[must_use]
    pub fn is_credentials_non_expired(&self) -> bool {
        self.is_credentials_non_expired_at(Utc::now())
    }

    /// Whether the credentials have not expired at the given instant.
    ///
    /// Same boundary semantics as [`User::is_account_non_expired_at`].
    #[must_use]
    pub fn is_credentials_non_expired_at(&self, now: DateTime<Utc>) -> bool {
        if self.credentials_expired {
            return false;
        }

        if let Some(expire_at) = self.credentials_expire_at {
            if expire_at < now {
                return false;
            }
        }

        true
    }

    /// Whether the credentials have expired, evaluated now.
    #[must_use]
    pub fn is_credentials_expired(&self) -> bool {
        !self.is_credentials_non_expired()
    }

    /// Marks the credentials as expired.
    pub fn set_credentials_expired(&mut self, credentials_expired: bool) -> &mut Self {
        self.credentials_expired = credentials_expired;
        self
    }

    /// Returns the credentials expiry instant, if set.
    #[must_use]
    pub const fn credentials_expire_at(&self) -> Option<DateTime<Utc>> {
        self.credentials_expire_at
    }

    /// Sets or clears the credentials expiry instant.
    pub fn set_credentials_expire_at(&mut self, expire_at: Option<DateTime<Utc>>) -> &mut Self {
        self.credentials_expire_at = expire_at;
        self
    }

    // === Recovery ===

    /// Returns the email confirmation token, if set.
    #[must_use]
    pub fn confirmation_token(&self) -> Option<&str> {
        self.confirmation_token.as_deref()
    }

    /// Sets the email confirmation token.
    pub fn set_confirmation_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.confirmation_token = Some(token.into());
        self
    }

    /// Returns the instant the user requested a password reset, if any.
    #[must_use]
    pub const fn password_requested_at(&self) -> Option<DateTime<Utc>> {
        self.password_requested_at
    }

    /// Sets or clears the password reset request instant.
    pub fn set_password_requested_at(&mut self, requested_at: Option<DateTime<Utc>>) -> &mut Self {
        self.password_requested_at = requested_at;
        self
    }

    /// Whether the password reset request is still valid, evaluated now.
    #[must_use]
    pub fn is_password_request_non_expired(&self, ttl_seconds: i64) -> bool {
        self.is_password_request_non_expired_at(ttl_seconds, Utc::now())
    }

    /// Whether the password reset request is still valid at the given
    /// instant.
    ///
    /// True iff a request instant is set and `requested_at + ttl_seconds`
    /// is strictly in the future.
    #[must_use]
    pub fn is_password_request_non_expired_at(&self, ttl_seconds: i64, now: DateTime<Utc>) -> bool {
        self.password_requested_at.is_some_and(|requested_at| {
            Duration::try_seconds(ttl_seconds)
                .and_then(|ttl| requested_at.checked_add_signed(ttl))
                .is_some_and(|deadline| deadline > now)
        })
    }

    // === Groups ===

    /// Returns the groups granted, in insertion order.
    ///
    /// Always initialized; a fresh user yields an empty slice.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Returns the names of the groups granted.
    #[must_use]
    pub fn group_names(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.name().to_string()).collect()
    }

    /// Whether the user belongs to a group with the given name
    /// (exact match).
    #[must_use]
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.iter().any(|g| g.name() == name)
    }

    /// Grants a group; no-op if a group with the same id is already
    /// granted.
    pub fn add_group(&mut self, group: Group) -> &mut Self {
        if !self.groups.iter().any(|g| g.id() == group.id()) {
            self.groups.push(group);
        }
        self
    }

    /// Revokes the group with the given id; no-op if not granted.
    pub fn remove_group(&mut self, group_id: Uuid) -> &mut Self {
        if let Some(pos) = self.groups.iter().position(|g| g.id() == group_id) {
            self.groups.remove(pos);
        }
        self
    }

    // === Timestamps ===

    /// Returns the last login instant, if any.
    #[must_use]
    pub const fn last_login(&self) -> Option<DateTime<Utc>> {
        self.last_login
    }

    /// Sets or clears the last login instant.
    pub fn set_last_login(&mut self, last_login: Option<DateTime<Utc>>) -> &mut Self {
        self.last_login = last_login;
        self
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sets the last update timestamp.
    pub fn set_updated_at(&mut self, updated_at: DateTime<Utc>) -> &mut Self {
        self.updated_at = updated_at;
        self
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

impl Groupable for User {
    fn groups(&self) -> &[Group] {
        Self::groups(self)
    }

    fn group_names(&self) -> Vec<String> {
        Self::group_names(self)
    }

    fn has_group(&self, name: &str) -> bool {
        Self::has_group(self, name)
    }

    fn add_group(&mut self, group: Group) -> &mut Self {
        Self::add_group(self, group)
    }

    fn remove_group(&mut self, group_id: Uuid) -> &mut Self {
        Self::remove_group(self, group_id)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.username.as_deref().unwrap_or_default())
    }
}
