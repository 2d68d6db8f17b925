use std::sync::Arc;

use punchlist_core::AppError;
use punchlist_domain::{GlobalRole, ProjectId, ProjectRole};

use crate::authorization_service::AuthorizationService;
use crate::test_support::{
    FakeMembershipRepository, FakeProjectRepository, FakeUserRepository, principal_for,
};
use crate::tracker_ports::{MembershipRepository, ProjectRecord, UpdateProjectInput};

use super::ProjectService;

struct Harness {
    service: ProjectService,
    users: Arc<FakeUserRepository>,
    memberships: Arc<FakeMembershipRepository>,
}

fn harness() -> Harness {
    let users = Arc::new(FakeUserRepository::default());
    let memberships = Arc::new(FakeMembershipRepository::default());
    let projects = Arc::new(FakeProjectRepository::new(memberships.clone()));
    let authorization = AuthorizationService::new(memberships.clone());
    let service = ProjectService::new(projects, memberships.clone(), users.clone(), authorization);
    Harness {
        service,
        users,
        memberships,
    }
}

async fn create_project(harness: &Harness, name: &str) -> ProjectRecord {
    let admin = harness.users.seed_user("root", GlobalRole::Admin).await;
    match harness
        .service
        .create_project(&principal_for(&admin), name, Some("tracking work"))
        .await
    {
        Ok(project) => project,
        Err(error) => panic!("project creation failed: {error}"),
    }
}

#[tokio::test]
async fn project_creation_is_admin_only_and_seeds_owner_membership() {
    let harness = harness();
    let manager = harness.users.seed_user("lead", GlobalRole::Manager).await;
    let admin = harness.users.seed_user("root", GlobalRole::Admin).await;

    let denied = harness
        .service
        .create_project(&principal_for(&manager), "atlas", None)
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let project = harness
        .service
        .create_project(&principal_for(&admin), "atlas", None)
        .await;
    let Ok(project) = project else {
        panic!("admin project creation failed");
    };

    let membership = harness.memberships.find(admin.id, project.id).await;
    assert!(matches!(
        membership,
        Ok(Some(record)) if record.role == ProjectRole::Owner
    ));
}

#[tokio::test]
async fn duplicate_project_names_conflict() {
    let harness = harness();
    create_project(&harness, "atlas").await;
    let admin = harness.users.seed_user("root2", GlobalRole::Admin).await;

    let duplicate = harness
        .service
        .create_project(&principal_for(&admin), "atlas", None)
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn project_visibility_follows_membership() {
    let harness = harness();
    let project = create_project(&harness, "atlas").await;
    let outsider = harness.users.seed_user("mallory", GlobalRole::User).await;
    let member = harness.users.seed_user("alice", GlobalRole::User).await;
    harness
        .memberships
        .grant(member.id, project.id, ProjectRole::Member)
        .await;

    let denied = harness
        .service
        .get_project(&principal_for(&outsider), project.id)
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let visible = harness
        .service
        .get_project(&principal_for(&member), project.id)
        .await;
    assert!(matches!(visible, Ok(record) if record.id == project.id));

    let missing = harness
        .service
        .get_project(&principal_for(&member), ProjectId::new())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn project_listing_narrows_to_memberships() {
    let harness = harness();
    let project = create_project(&harness, "atlas").await;
    create_project(&harness, "borealis").await;

    let manager = harness.users.seed_user("lead", GlobalRole::Manager).await;
    let member = harness.users.seed_user("alice", GlobalRole::User).await;
    harness
        .memberships
        .grant(member.id, project.id, ProjectRole::Developer)
        .await;

    let all = harness.service.list_projects(&principal_for(&manager)).await;
    assert!(matches!(all, Ok(records) if records.len() == 2));

    let scoped = harness.service.list_projects(&principal_for(&member)).await;
    assert!(matches!(
        scoped,
        Ok(records) if records.len() == 1 && records[0].id == project.id
    ));

    let outsider = harness.users.seed_user("mallory", GlobalRole::User).await;
    let empty = harness
        .service
        .list_projects(&principal_for(&outsider))
        .await;
    assert!(matches!(empty, Ok(records) if records.is_empty()));
}

#[tokio::test]
async fn maintainer_updates_but_owner_deletes() {
    let harness = harness();
    let project = create_project(&harness, "atlas").await;
    let maintainer = harness.users.seed_user("bob", GlobalRole::User).await;
    harness
        .memberships
        .grant(maintainer.id, project.id, ProjectRole::Maintainer)
        .await;

    let renamed = harness
        .service
        .update_project(
            &principal_for(&maintainer),
            project.id,
            UpdateProjectInput {
                name: Some("atlas-2".to_owned()),
                description: None,
            },
        )
        .await;
    assert!(matches!(renamed, Ok(record) if record.name == "atlas-2"));

    let delete = harness
        .service
        .delete_project(&principal_for(&maintainer), project.id)
        .await;
    assert!(matches!(delete, Err(AppError::Forbidden(_))));

    let owner = harness.users.seed_user("carol", GlobalRole::User).await;
    harness
        .memberships
        .grant(owner.id, project.id, ProjectRole::Owner)
        .await;
    let deleted = harness
        .service
        .delete_project(&principal_for(&owner), project.id)
        .await;
    assert!(deleted.is_ok());
}

#[tokio::test]
async fn member_addition_validates_target_and_uniqueness() {
    let harness = harness();
    let project = create_project(&harness, "atlas").await;
    let maintainer = harness.users.seed_user("bob", GlobalRole::User).await;
    harness
        .memberships
        .grant(maintainer.id, project.id, ProjectRole::Maintainer)
        .await;
    let alice = harness.users.seed_user("alice", GlobalRole::User).await;

    let unknown_user = harness
        .service
        .add_member(
            &principal_for(&maintainer),
            project.id,
            punchlist_domain::UserId::new(),
            ProjectRole::Member,
        )
        .await;
    assert!(matches!(unknown_user, Err(AppError::NotFound(_))));

    let added = harness
        .service
        .add_member(
            &principal_for(&maintainer),
            project.id,
            alice.id,
            ProjectRole::Member,
        )
        .await;
    assert!(matches!(added, Ok(record) if record.role == ProjectRole::Member));

    let again = harness
        .service
        .add_member(
            &principal_for(&maintainer),
            project.id,
            alice.id,
            ProjectRole::Developer,
        )
        .await;
    assert!(matches!(again, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn maintainer_cannot_remove_or_rerole_members() {
    let harness = harness();
    let project = create_project(&harness, "atlas").await;
    let maintainer = harness.users.seed_user("bob", GlobalRole::User).await;
    let alice = harness.users.seed_user("alice", GlobalRole::User).await;
    harness
        .memberships
        .grant(maintainer.id, project.id, ProjectRole::Maintainer)
        .await;
    harness
        .memberships
        .grant(alice.id, project.id, ProjectRole::Member)
        .await;

    let rerole = harness
        .service
        .update_member_role(
            &principal_for(&maintainer),
            project.id,
            alice.id,
            ProjectRole::Developer,
        )
        .await;
    assert!(matches!(rerole, Err(AppError::Forbidden(_))));

    let remove = harness
        .service
        .remove_member(&principal_for(&maintainer), project.id, alice.id)
        .await;
    assert!(matches!(remove, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn owner_administers_other_members_but_never_self() {
    let harness = harness();
    let project = create_project(&harness, "atlas").await;
    let owner = harness.users.seed_user("carol", GlobalRole::User).await;
    let alice = harness.users.seed_user("alice", GlobalRole::User).await;
    harness
        .memberships
        .grant(owner.id, project.id, ProjectRole::Owner)
        .await;
    harness
        .memberships
        .grant(alice.id, project.id, ProjectRole::Member)
        .await;

    let rerole = harness
        .service
        .update_member_role(
            &principal_for(&owner),
            project.id,
            alice.id,
            ProjectRole::Maintainer,
        )
        .await;
    assert!(matches!(
        rerole,
        Ok(record) if record.role == ProjectRole::Maintainer
    ));

    // Self-protection wins even though the owner role satisfies the policy.
    let self_rerole = harness
        .service
        .update_member_role(
            &principal_for(&owner),
            project.id,
            owner.id,
            ProjectRole::Member,
        )
        .await;
    assert!(matches!(self_rerole, Err(AppError::Forbidden(_))));

    let self_removal = harness
        .service
        .remove_member(&principal_for(&owner), project.id, owner.id)
        .await;
    assert!(matches!(self_removal, Err(AppError::Forbidden(_))));

    let removed = harness
        .service
        .remove_member(&principal_for(&owner), project.id, alice.id)
        .await;
    assert!(removed.is_ok());
}

#[tokio::test]
async fn member_listing_requires_project_access() {
    let harness = harness();
    let project = create_project(&harness, "atlas").await;
    let outsider = harness.users.seed_user("mallory", GlobalRole::User).await;

    let denied = harness
        .service
        .list_members(&principal_for(&outsider), project.id)
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let admin = harness.users.seed_user("root2", GlobalRole::Admin).await;
    let members = harness
        .service
        .list_members(&principal_for(&admin), project.id)
        .await;
    assert!(matches!(members, Ok(records) if records.len() == 1));
}
