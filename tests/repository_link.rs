mod common;

use sqlx::PgPool;
use std::sync::Arc;
use stellar_link::domain::entities::{ModerationStatus, NewLink, NewReport};
use stellar_link::domain::repositories::{
    AppendReportOutcome, InsertOutcome, LinkRepository, UpdateOutcome,
};
use stellar_link::infrastructure::persistence::PgLinkRepository;

fn repo(pool: PgPool) -> PgLinkRepository {
    PgLinkRepository::new(Arc::new(pool))
}

fn new_link(slug: &str) -> NewLink {
    NewLink {
        slug: slug.to_string(),
        original_url: format!("https://example.com/{slug}"),
        pin: None,
    }
}

#[sqlx::test]
async fn test_insert_and_find(pool: PgPool) {
    let repo = repo(pool);

    let outcome = repo.insert_if_absent(new_link("AbC12")).await.unwrap();
    assert!(matches!(outcome, InsertOutcome::Inserted(_)));

    let link = repo.find_by_slug("AbC12").await.unwrap().unwrap();
    assert_eq!(link.original_url, "https://example.com/AbC12");
    assert_eq!(link.click_count, 0);
    assert!(link.status.is_none());
    assert!(link.reports.is_empty());
}

#[sqlx::test]
async fn test_insert_existing_slug_is_not_overwritten(pool: PgPool) {
    let repo = repo(pool);
    repo.insert_if_absent(new_link("AbC12")).await.unwrap();

    let outcome = repo
        .insert_if_absent(NewLink {
            slug: "AbC12".to_string(),
            original_url: "https://other.example.com".to_string(),
            pin: None,
        })
        .await
        .unwrap();

    assert!(matches!(outcome, InsertOutcome::AlreadyExists));
    let link = repo.find_by_slug("AbC12").await.unwrap().unwrap();
    assert_eq!(link.original_url, "https://example.com/AbC12");
}

#[sqlx::test]
async fn test_exists_and_missing(pool: PgPool) {
    let repo = repo(pool);
    repo.insert_if_absent(new_link("AbC12")).await.unwrap();

    assert!(repo.exists("AbC12").await.unwrap());
    assert!(!repo.exists("Nope1").await.unwrap());
    assert!(repo.find_by_slug("Nope1").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_increment_clicks(pool: PgPool) {
    let repo = repo(pool);
    repo.insert_if_absent(new_link("AbC12")).await.unwrap();

    assert_eq!(repo.increment_clicks("AbC12").await.unwrap(), Some(1));
    assert_eq!(repo.increment_clicks("AbC12").await.unwrap(), Some(2));
    assert_eq!(repo.increment_clicks("Nope1").await.unwrap(), None);
}

#[sqlx::test]
async fn test_increment_clicks_refuses_blocked(pool: PgPool) {
    let repo = repo(pool);
    repo.insert_if_absent(new_link("AbC12")).await.unwrap();
    repo.update_status("AbC12", ModerationStatus::Blocked)
        .await
        .unwrap();

    assert_eq!(repo.increment_clicks("AbC12").await.unwrap(), None);
    let link = repo.find_by_slug("AbC12").await.unwrap().unwrap();
    assert_eq!(link.click_count, 0);
}

#[sqlx::test]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    let repo = Arc::new(repo(pool));
    repo.insert_if_absent(new_link("AbC12")).await.unwrap();

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..20 {
        let repo = repo.clone();
        tasks.spawn(async move { repo.increment_clicks("AbC12").await.unwrap() });
    }
    tasks.join_all().await;

    let link = repo.find_by_slug("AbC12").await.unwrap().unwrap();
    assert_eq!(link.click_count, 20);
}

#[sqlx::test]
async fn test_update_status_outcomes(pool: PgPool) {
    let repo = repo(pool);
    repo.insert_if_absent(new_link("AbC12")).await.unwrap();

    let changed = repo
        .update_status("AbC12", ModerationStatus::Approved)
        .await
        .unwrap();
    assert!(!changed.is_not_found());
    assert!(!changed.is_unchanged());

    let same = repo
        .update_status("AbC12", ModerationStatus::Approved)
        .await
        .unwrap();
    assert!(same.is_unchanged());

    let missing: UpdateOutcome = repo
        .update_status("Nope1", ModerationStatus::Approved)
        .await
        .unwrap();
    assert!(missing.is_not_found());
}

#[sqlx::test]
async fn test_append_report_sets_pending(pool: PgPool) {
    let repo = repo(pool);
    repo.insert_if_absent(new_link("AbC12")).await.unwrap();

    let outcome = repo
        .append_report("AbC12", NewReport::now(Some("spam".to_string())))
        .await
        .unwrap();
    assert!(matches!(
        outcome,
        AppendReportOutcome::Appended {
            previous_status: None
        }
    ));

    let link = repo.find_by_slug("AbC12").await.unwrap().unwrap();
    assert_eq!(link.status, Some(ModerationStatus::Pending));
    assert_eq!(link.reports.len(), 1);
    assert_eq!(link.reports[0].reason.as_deref(), Some("spam"));
}

#[sqlx::test]
async fn test_append_report_blocked_and_missing(pool: PgPool) {
    let repo = repo(pool);
    repo.insert_if_absent(new_link("AbC12")).await.unwrap();
    repo.update_status("AbC12", ModerationStatus::Blocked)
        .await
        .unwrap();

    let blocked = repo
        .append_report("AbC12", NewReport::now(None))
        .await
        .unwrap();
    assert!(matches!(blocked, AppendReportOutcome::AlreadyBlocked));

    let missing = repo
        .append_report("Nope1", NewReport::now(None))
        .await
        .unwrap();
    assert!(matches!(missing, AppendReportOutcome::NotFound));

    let link = repo.find_by_slug("AbC12").await.unwrap().unwrap();
    assert!(link.reports.is_empty());
    assert_eq!(link.status, Some(ModerationStatus::Blocked));
}

#[sqlx::test]
async fn test_list_reported_ordering(pool: PgPool) {
    let repo = repo(pool);
    for slug in ["aaaaa", "bbbbb", "ccccc", "ddddd"] {
        repo.insert_if_absent(new_link(slug)).await.unwrap();
    }

    repo.append_report("aaaaa", NewReport::now(None))
        .await
        .unwrap();
    repo.append_report("bbbbb", NewReport::now(None))
        .await
        .unwrap();
    // Moderated without any report: listed after reported links.
    repo.update_status("ccccc", ModerationStatus::Approved)
        .await
        .unwrap();

    let listed: Vec<String> = repo
        .list_reported(100)
        .await
        .unwrap()
        .into_iter()
        .map(|link| link.slug)
        .collect();

    assert_eq!(listed, vec!["bbbbb", "aaaaa", "ccccc"]);

    let limited = repo.list_reported(1).await.unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0].slug, "bbbbb");
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    repo(pool).ping().await.unwrap();
}

#[sqlx::test]
async fn test_http_stack_over_postgres(pool: PgPool) {
    let state = common::create_pg_state(pool);
    let server = common::make_server(state);

    let slug = common::shorten(&server, "https://example.com/pg", Some("4821")).await;

    server
        .get(&format!("/{slug}"))
        .await
        .assert_status(axum::http::StatusCode::FOUND);

    let response = server
        .post(&format!("/api/p/{slug}/verify"))
        .json(&serde_json::json!({ "pin": "4821" }))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<serde_json::Value>()["originalUrl"],
        "https://example.com/pg"
    );
}
