//! User registration, lookup, credential, and search scenarios.

use anyhow::Result;
use pm_model::{Email, User};
use pm_storage::user::UserSearchCriteria;
use pm_storage::{InMemoryUserProvider, UserProvider};

use crate::common::{demo_user, init_tracing};

#[tokio::test]
async fn registration_and_lookups() -> Result<()> {
    init_tracing();
    let provider = InMemoryUserProvider::new();

    let mut user = demo_user("Demo", "demo@polymorph.com");
    user.add_email(Email::new("demo@polymorph.io"));
    user.set_confirmation_token("tok-123");
    provider.create(&user).await?;

    let found = provider.get_by_username("Demo").await?.expect("by username");
    assert_eq!(found.id(), user.id());
    assert_eq!(found.email(), Some("demo@polymorph.com"));

    let found = provider.get_by_slug("demo").await?.expect("by slug");
    assert_eq!(found.id(), user.id());

    // Secondary addresses resolve too, not only the main one.
    let found = provider
        .get_by_email("demo@polymorph.io")
        .await?
        .expect("by email");
    assert_eq!(found.id(), user.id());

    let found = provider
        .get_by_confirmation_token("tok-123")
        .await?
        .expect("by token");
    assert_eq!(found.id(), user.id());

    Ok(())
}

#[tokio::test]
async fn password_change_round_trip() -> Result<()> {
    init_tracing();
    let provider = InMemoryUserProvider::new();

    let mut user = demo_user("demo", "demo@polymorph.com");
    user.set_plain_password("s3cret");
    // A hashing collaborator consumes the plaintext and stores its output.
    user.set_password("$argon2id$stand-in");
    user.erase_credentials();
    provider.create(&user).await?;

    let stored = provider.get_by_id(user.id()).await?.expect("stored");
    assert_eq!(stored.password(), Some("$argon2id$stand-in"));
    assert!(stored.plain_password().is_none());

    Ok(())
}

#[tokio::test]
async fn duplicate_username_and_slug_are_rejected() -> Result<()> {
    init_tracing();
    let provider = InMemoryUserProvider::new();
    provider
        .create(&demo_user("demo", "demo@polymorph.com"))
        .await?;

    let mut same_name = User::new();
    same_name.set_username("demo");
    let err = provider.create(&same_name).await.unwrap_err();
    assert!(err.is_duplicate());

    let mut same_slug = User::new();
    same_slug.set_slug("demo");
    let err = provider.create(&same_slug).await.unwrap_err();
    assert!(err.is_duplicate());

    Ok(())
}

#[tokio::test]
async fn search_filters_and_paginates() -> Result<()> {
    init_tracing();
    let provider = InMemoryUserProvider::new();

    for i in 0..5 {
        let mut user = demo_user(&format!("user-{i}"), &format!("user-{i}@polymorph.com"));
        if i == 4 {
            user.set_enabled(false);
        }
        provider.create(&user).await?;
    }

    let enabled = UserSearchCriteria::new().enabled(true);
    assert_eq!(provider.count(&enabled).await?, 4);

    let page = UserSearchCriteria::new().enabled(true).offset(2).max_results(2);
    let found = provider.search(&page).await?;
    assert_eq!(found.len(), 2);
    // Count ignores pagination.
    assert_eq!(provider.count(&page).await?, 4);

    let by_address = UserSearchCriteria::new().email("user-3@polymorph.com");
    let found = provider.search(&by_address).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].username(), Some("user-3"));

    let by_fragment = UserSearchCriteria::new().search("user-1");
    let found = provider.search(&by_fragment).await?;
    assert_eq!(found.len(), 1);

    Ok(())
}

#[tokio::test]
async fn deletion_makes_user_unknown() -> Result<()> {
    init_tracing();
    let provider = InMemoryUserProvider::new();

    let user = demo_user("demo", "demo@polymorph.com");
    provider.create(&user).await?;
    provider.delete(user.id()).await?;

    assert!(provider.get_by_id(user.id()).await?.is_none());
    let err = provider.update(&user).await.unwrap_err();
    assert!(err.is_not_found());
    let err = provider.delete(user.id()).await.unwrap_err();
    assert!(err.is_not_found());

    Ok(())
}
