//! Group management and role inheritance scenarios.

use anyhow::Result;
use pm_model::{Group, role};
use pm_storage::group::GroupSearchCriteria;
use pm_storage::{GroupProvider, InMemoryGroupProvider};

use crate::common::{demo_user, group_with_roles, init_tracing};

#[tokio::test]
async fn group_management_round_trip() -> Result<()> {
    init_tracing();
    let provider = InMemoryGroupProvider::new();

    let mut staff = group_with_roles("staff", &["ROLE_STAFF"]);
    provider.create(&staff).await?;
    provider
        .create(&group_with_roles("admins", &["ROLE_ADMIN", "ROLE_STAFF"]))
        .await?;

    let found = provider.get_by_name("staff").await?.expect("by name");
    assert_eq!(found.id(), staff.id());

    staff.add_role("ROLE_REVIEWER");
    provider.update(&staff).await?;
    let found = provider.get_by_id(staff.id()).await?.expect("updated");
    assert_eq!(found.roles(), ["ROLE_STAFF", "ROLE_REVIEWER"]);

    let carrying_staff = GroupSearchCriteria::new().role("role_staff");
    assert_eq!(provider.count(&carrying_staff).await?, 2);

    provider.delete(staff.id()).await?;
    assert!(provider.get_by_id(staff.id()).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn membership_contributes_inherited_roles() -> Result<()> {
    init_tracing();
    let provider = InMemoryGroupProvider::new();

    let staff = group_with_roles("staff", &["ROLE_STAFF"]);
    let admins = group_with_roles("admins", &["ROLE_ADMIN", "ROLE_STAFF"]);
    provider.create(&staff).await?;
    provider.create(&admins).await?;

    let mut user = demo_user("demo", "demo@polymorph.com");
    user.add_role("ROLE_REVIEWER");

    let staff = provider.get_by_name("staff").await?.expect("staff");
    let admins = provider.get_by_name("admins").await?.expect("admins");
    user.add_group(staff);
    user.add_group(admins.clone());

    assert_eq!(user.group_names(), ["staff", "admins"]);
    assert!(user.has_group("staff"));

    // Own roles first, then group roles in join order, deduplicated, with
    // the default role appended.
    assert_eq!(
        user.roles(),
        ["ROLE_REVIEWER", "ROLE_STAFF", "ROLE_ADMIN", role::ROLE_DEFAULT]
    );
    assert!(user.has_role("ROLE_ADMIN"));

    user.remove_group(admins.id());
    assert!(!user.has_role("ROLE_ADMIN"));
    assert!(user.has_role("ROLE_STAFF"));

    Ok(())
}

#[tokio::test]
async fn super_admin_granted_through_group() -> Result<()> {
    init_tracing();

    let root = group_with_roles("root", &[role::ROLE_SUPER_ADMIN]);
    let mut user = demo_user("demo", "demo@polymorph.com");
    assert!(!user.is_super_admin());

    user.add_group(root);
    assert!(user.is_super_admin());
    // The role came from the group, so the flag cannot revoke it.
    user.set_super_admin(false);
    assert!(user.is_super_admin());

    Ok(())
}

#[tokio::test]
async fn search_matches_name_fragments() -> Result<()> {
    init_tracing();
    let provider = InMemoryGroupProvider::new();

    provider.create(&Group::new("billing-admins")).await?;
    provider.create(&Group::new("billing-viewers")).await?;
    provider.create(&Group::new("support")).await?;

    let billing = GroupSearchCriteria::new().search("billing");
    assert_eq!(provider.search(&billing).await?.len(), 2);

    let exact = GroupSearchCriteria::new().name("support");
    assert_eq!(provider.search(&exact).await?.len(), 1);

    let paged = GroupSearchCriteria::new().search("billing").max_results(1);
    assert_eq!(provider.search(&paged).await?.len(), 1);

    Ok(())
}
