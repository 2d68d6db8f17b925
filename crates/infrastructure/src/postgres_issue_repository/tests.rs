use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use punchlist_application::{
    IssueFilter, IssueRepository, NewIssueRecord, NewUserRecord, ProjectRecord, ProjectRepository,
    UpdateIssueInput, UserRecord, UserRepository,
};
use punchlist_core::AppError;
use punchlist_domain::{GlobalRole, IssueId, IssuePriority, IssueStatus, UserId};

use crate::{PostgresProjectRepository, PostgresUserRepository};

use super::PostgresIssueRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres issue repository tests: {error}");
    }

    Some(pool)
}

async fn seed_user(pool: &PgPool, label: &str) -> UserRecord {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    let created = PostgresUserRepository::new(pool.clone())
        .create(NewUserRecord {
            username: format!("{label}-{suffix}"),
            email: format!("{label}-{suffix}@punchlist.dev"),
            password_hash: "argon2id-placeholder-digest".to_owned(),
            global_role: GlobalRole::User,
        })
        .await;
    assert!(created.is_ok());
    created.unwrap_or_else(|_| unreachable!())
}

async fn seed_project(pool: &PgPool, label: &str, owner_id: UserId) -> ProjectRecord {
    let name = format!("{label}-{}", uuid::Uuid::new_v4().simple());
    let created = PostgresProjectRepository::new(pool.clone())
        .create(name.as_str(), None, owner_id)
        .await;
    assert!(created.is_ok());
    created.unwrap_or_else(|_| unreachable!())
}

fn new_issue(project: &ProjectRecord, reporter: &UserRecord, title: &str) -> NewIssueRecord {
    NewIssueRecord {
        project_id: project.id,
        title: title.to_owned(),
        description: None,
        priority: IssuePriority::Medium,
        reporter_id: reporter.id,
        assignee_id: None,
    }
}

#[tokio::test]
async fn new_issues_open_with_the_requested_priority() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresIssueRepository::new(pool.clone());
    let reporter = seed_user(&pool, "reporter").await;
    let project = seed_project(&pool, "atlas", reporter.id).await;

    let created = repository
        .create(NewIssueRecord {
            description: Some("stack trace attached".to_owned()),
            priority: IssuePriority::High,
            ..new_issue(&project, &reporter, "login page crashes")
        })
        .await;
    assert!(created.is_ok());
    let created = created.unwrap_or_else(|_| unreachable!());
    assert_eq!(created.status, IssueStatus::Open);
    assert_eq!(created.priority, IssuePriority::High);
    assert_eq!(created.reporter_id, reporter.id);
    assert!(created.assignee_id.is_none());

    let reloaded = repository.find_by_id(created.id).await;
    assert!(matches!(
        reloaded,
        Ok(Some(record)) if record.title == "login page crashes"
    ));
}

#[tokio::test]
async fn filters_narrow_the_listing() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresIssueRepository::new(pool.clone());
    let reporter = seed_user(&pool, "reporter").await;
    let assignee = seed_user(&pool, "assignee").await;
    let atlas = seed_project(&pool, "atlas", reporter.id).await;
    let borealis = seed_project(&pool, "borealis", reporter.id).await;

    let in_atlas = repository
        .create(new_issue(&atlas, &reporter, "first"))
        .await;
    assert!(in_atlas.is_ok());
    let in_atlas = in_atlas.unwrap_or_else(|_| unreachable!());

    let in_borealis = repository
        .create(new_issue(&borealis, &reporter, "second"))
        .await;
    assert!(in_borealis.is_ok());
    let in_borealis = in_borealis.unwrap_or_else(|_| unreachable!());

    let resolved = repository
        .update(
            in_borealis.id,
            UpdateIssueInput {
                status: Some(IssueStatus::Resolved),
                ..UpdateIssueInput::default()
            },
        )
        .await;
    assert!(resolved.is_ok());

    let assigned = repository.set_assignee(in_atlas.id, Some(assignee.id)).await;
    assert!(assigned.is_ok());

    let by_project = repository
        .list(&IssueFilter {
            project_id: Some(atlas.id),
            ..IssueFilter::default()
        })
        .await;
    assert!(matches!(
        by_project,
        Ok(records) if records.iter().all(|record| record.project_id == atlas.id)
            && records.iter().any(|record| record.id == in_atlas.id)
    ));

    let by_status = repository
        .list(&IssueFilter {
            project_id: Some(borealis.id),
            status: Some(IssueStatus::Resolved),
            ..IssueFilter::default()
        })
        .await;
    assert!(matches!(
        by_status,
        Ok(records) if records.len() == 1 && records[0].id == in_borealis.id
    ));

    let by_assignee = repository
        .list(&IssueFilter {
            assignee_id: Some(assignee.id),
            ..IssueFilter::default()
        })
        .await;
    assert!(matches!(
        by_assignee,
        Ok(records) if records.len() == 1 && records[0].id == in_atlas.id
    ));
}

#[tokio::test]
async fn visibility_spans_memberships_and_authorship() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresIssueRepository::new(pool.clone());
    let insider = seed_user(&pool, "insider").await;
    let outsider = seed_user(&pool, "outsider").await;
    let project = seed_project(&pool, "atlas", insider.id).await;

    let filed_inside = repository
        .create(new_issue(&project, &insider, "member-filed"))
        .await;
    assert!(filed_inside.is_ok());
    let filed_inside = filed_inside.unwrap_or_else(|_| unreachable!());

    let filed_by_outsider = repository
        .create(new_issue(&project, &outsider, "drive-by report"))
        .await;
    assert!(filed_by_outsider.is_ok());
    let filed_by_outsider = filed_by_outsider.unwrap_or_else(|_| unreachable!());

    let member_view = repository
        .list_visible_to(insider.id, &[project.id], &IssueFilter::default())
        .await;
    assert!(member_view.is_ok());
    let member_view = member_view.unwrap_or_default();
    assert!(member_view.iter().any(|record| record.id == filed_inside.id));
    assert!(
        member_view
            .iter()
            .any(|record| record.id == filed_by_outsider.id)
    );

    let outsider_view = repository
        .list_visible_to(outsider.id, &[], &IssueFilter::default())
        .await;
    assert!(outsider_view.is_ok());
    let outsider_view = outsider_view.unwrap_or_default();
    assert!(
        outsider_view
            .iter()
            .any(|record| record.id == filed_by_outsider.id)
    );
    assert!(
        !outsider_view
            .iter()
            .any(|record| record.id == filed_inside.id)
    );

    let assigned = repository
        .set_assignee(filed_inside.id, Some(outsider.id))
        .await;
    assert!(assigned.is_ok());

    let outsider_view = repository
        .list_visible_to(outsider.id, &[], &IssueFilter::default())
        .await;
    assert!(matches!(
        outsider_view,
        Ok(records) if records.iter().any(|record| record.id == filed_inside.id)
    ));
}

#[tokio::test]
async fn partial_updates_patch_only_provided_fields() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresIssueRepository::new(pool.clone());
    let reporter = seed_user(&pool, "reporter").await;
    let project = seed_project(&pool, "atlas", reporter.id).await;

    let created = repository
        .create(NewIssueRecord {
            description: Some("first draft".to_owned()),
            ..new_issue(&project, &reporter, "flaky export")
        })
        .await;
    assert!(created.is_ok());
    let created = created.unwrap_or_else(|_| unreachable!());

    let updated = repository
        .update(
            created.id,
            UpdateIssueInput {
                priority: Some(IssuePriority::Critical),
                ..UpdateIssueInput::default()
            },
        )
        .await;
    assert!(matches!(
        updated,
        Ok(record)
            if record.priority == IssuePriority::Critical
                && record.title == "flaky export"
                && record.description.as_deref() == Some("first draft")
    ));

    let missing = repository
        .update(IssueId::new(), UpdateIssueInput::default())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn clearing_the_assignee_stores_null() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresIssueRepository::new(pool.clone());
    let reporter = seed_user(&pool, "reporter").await;
    let project = seed_project(&pool, "atlas", reporter.id).await;

    let created = repository
        .create(NewIssueRecord {
            assignee_id: Some(reporter.id),
            ..new_issue(&project, &reporter, "self-assigned chore")
        })
        .await;
    assert!(created.is_ok());
    let created = created.unwrap_or_else(|_| unreachable!());
    assert_eq!(created.assignee_id, Some(reporter.id));

    let cleared = repository.set_assignee(created.id, None).await;
    assert!(matches!(cleared, Ok(record) if record.assignee_id.is_none()));
}

#[tokio::test]
async fn deleting_a_project_cascades_to_its_issues() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresIssueRepository::new(pool.clone());
    let projects = PostgresProjectRepository::new(pool.clone());
    let reporter = seed_user(&pool, "reporter").await;
    let project = seed_project(&pool, "ephemeral", reporter.id).await;

    let created = repository
        .create(new_issue(&project, &reporter, "will not survive"))
        .await;
    assert!(created.is_ok());
    let created = created.unwrap_or_else(|_| unreachable!());

    let deleted = projects.delete(project.id).await;
    assert!(deleted.is_ok());

    let found = repository.find_by_id(created.id).await;
    assert!(matches!(found, Ok(None)));
}
