//! Common test fixtures.

use pm_model::{Email, Group, User};

/// Initializes tracing for tests; safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("pm_storage=debug")
        .try_init();
}

/// A user with a username, matching slug, and a main address.
pub fn demo_user(username: &str, address: &str) -> User {
    let mut user = User::new();
    user.set_username(username)
        .set_slug(username.to_lowercase())
        .set_enabled(true)
        .add_email(Email::new(address));
    user
}

/// A group carrying the given roles.
pub fn group_with_roles(name: &str, roles: &[&str]) -> Group {
    let mut group = Group::new(name);
    for role in roles {
        group.add_role(role);
    }
    group
}
