//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{Link, ModerationStatus, NewLink, NewReport, Report};
use crate::domain::repositories::{
    AppendReportOutcome, InsertOutcome, LinkRepository, UpdateOutcome,
};
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct LinkRow {
    slug: String,
    original_url: String,
    created_at: DateTime<Utc>,
    status: Option<String>,
    click_count: i64,
    pin: Option<String>,
}

#[derive(sqlx::FromRow)]
struct ReportRow {
    slug: String,
    reported_at: DateTime<Utc>,
    reason: Option<String>,
}

fn parse_status(raw: Option<String>) -> Option<ModerationStatus> {
    raw.and_then(|s| match s.parse() {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unknown moderation status in database");
            None
        }
    })
}

impl LinkRow {
    fn into_link(self, reports: Vec<Report>) -> Link {
        Link {
            slug: self.slug,
            original_url: self.original_url,
            created_at: self.created_at,
            status: parse_status(self.status),
            click_count: self.click_count,
            reports,
            pin: self.pin,
        }
    }
}

impl From<ReportRow> for Report {
    fn from(row: ReportRow) -> Self {
        Report {
            reported_at: row.reported_at,
            reason: row.reason,
        }
    }
}

/// PostgreSQL repository for links and their reports.
///
/// Each trait method maps to one statement or one transaction, which is what
/// gives the store its per-call atomicity.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn reports_for(&self, slugs: &[String]) -> Result<HashMap<String, Vec<Report>>, AppError> {
        let rows = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT slug, reported_at, reason
            FROM link_reports
            WHERE slug = ANY($1)
            ORDER BY reported_at ASC, id ASC
            "#,
        )
        .bind(slugs)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut grouped: HashMap<String, Vec<Report>> = HashMap::new();
        for row in rows {
            grouped.entry(row.slug.clone()).or_default().push(row.into());
        }

        Ok(grouped)
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert_if_absent(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (slug, original_url, pin)
            VALUES ($1, $2, $3)
            ON CONFLICT (slug) DO NOTHING
            RETURNING slug, original_url, created_at, status, click_count, pin
            "#,
        )
        .bind(&new_link.slug)
        .bind(&new_link.original_url)
        .bind(&new_link.pin)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(match row {
            Some(row) => InsertOutcome::Inserted(row.into_link(Vec::new())),
            None => InsertOutcome::AlreadyExists,
        })
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT slug, original_url, created_at, status, click_count, pin
            FROM links
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let reports = sqlx::query_as::<_, ReportRow>(
            r#"
            SELECT slug, reported_at, reason
            FROM link_reports
            WHERE slug = $1
            ORDER BY reported_at ASC, id ASC
            "#,
        )
        .bind(slug)
        .fetch_all(self.pool.as_ref())
        .await?
        .into_iter()
        .map(Report::from)
        .collect();

        Ok(Some(row.into_link(reports)))
    }

    async fn exists(&self, slug: &str) -> Result<bool, AppError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM links WHERE slug = $1)")
                .bind(slug)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn update_status(
        &self,
        slug: &str,
        status: ModerationStatus,
    ) -> Result<UpdateOutcome, AppError> {
        let (matched, modified) = sqlx::query_as::<_, (i64, i64)>(
            r#"
            WITH target AS (
                SELECT slug, status FROM links WHERE slug = $1 FOR UPDATE
            ),
            updated AS (
                UPDATE links l
                SET status = $2::text
                FROM target t
                WHERE l.slug = t.slug AND t.status IS DISTINCT FROM $2::text
                RETURNING l.slug
            )
            SELECT
                (SELECT COUNT(*) FROM target) AS matched,
                (SELECT COUNT(*) FROM updated) AS modified
            "#,
        )
        .bind(slug)
        .bind(status.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(UpdateOutcome {
            matched: matched.max(0) as u64,
            modified: modified.max(0) as u64,
        })
    }

    async fn increment_clicks(&self, slug: &str) -> Result<Option<i64>, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE links
            SET click_count = click_count + 1
            WHERE slug = $1 AND status IS DISTINCT FROM 'blocked'
            RETURNING click_count
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn append_report(
        &self,
        slug: &str,
        report: NewReport,
    ) -> Result<AppendReportOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_scalar::<_, Option<String>>(
            "SELECT status FROM links WHERE slug = $1 FOR UPDATE",
        )
        .bind(slug)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(raw_status) = current else {
            return Ok(AppendReportOutcome::NotFound);
        };

        let previous_status = parse_status(raw_status);
        if previous_status.is_some_and(|s| s.is_blocked()) {
            return Ok(AppendReportOutcome::AlreadyBlocked);
        }

        sqlx::query("INSERT INTO link_reports (slug, reported_at, reason) VALUES ($1, $2, $3)")
            .bind(slug)
            .bind(report.reported_at)
            .bind(&report.reason)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE links SET status = 'pending' WHERE slug = $1")
            .bind(slug)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(AppendReportOutcome::Appended { previous_status })
    }

    async fn list_reported(&self, limit: i64) -> Result<Vec<Link>, AppError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT l.slug, l.original_url, l.created_at, l.status, l.click_count, l.pin
            FROM links l
            LEFT JOIN (
                SELECT slug, MAX(reported_at) AS last_reported_at
                FROM link_reports
                GROUP BY slug
            ) r ON r.slug = l.slug
            WHERE r.slug IS NOT NULL OR l.status IS NOT NULL
            ORDER BY r.last_reported_at DESC NULLS LAST, l.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        let slugs: Vec<String> = rows.iter().map(|r| r.slug.clone()).collect();
        let mut reports = self.reports_for(&slugs).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let link_reports = reports.remove(&row.slug).unwrap_or_default();
                row.into_link(link_reports)
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
