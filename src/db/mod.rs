mod models;

pub use models::*;

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::fields::NormalizedReport;
use crate::domain::lifecycle;
use crate::error::{AppError, Result};

pub type DbPool = Arc<PgPool>;

pub async fn create_pool(database_url: &str) -> std::result::Result<DbPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(Arc::new(pool))
}

pub async fn run_migrations(pool: &PgPool) -> std::result::Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

// --- Submission inserts ---

pub async fn insert_lost_item(pool: &PgPool, report: &NormalizedReport) -> Result<LostItem> {
    let item = sqlx::query_as::<_, LostItem>(
        r#"
        INSERT INTO lost_items
            (owner_name, name, occupation, category, floor, location,
             lost_date, lost_time, description, contact_number, contact_email, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(&report.reporter_name)
    .bind(&report.item_name)
    .bind(&report.occupation)
    .bind(&report.category)
    .bind(&report.floor)
    .bind(&report.location)
    .bind(report.event_date)
    .bind(report.event_time)
    .bind(&report.description)
    .bind(&report.contact_number)
    .bind(&report.contact_email)
    .bind(ReportStatus::Pending)
    .fetch_one(pool)
    .await?;
    Ok(item)
}

pub async fn insert_found_item(
    pool: &PgPool,
    report: &NormalizedReport,
    photo_url: Option<&str>,
) -> Result<FoundItem> {
    let item = sqlx::query_as::<_, FoundItem>(
        r#"
        INSERT INTO found_items
            (finder_name, name, occupation, category, floor, location,
             found_date, found_time, description, contact_number, contact_email,
             photo_url, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING *
        "#,
    )
    .bind(&report.reporter_name)
    .bind(&report.item_name)
    .bind(&report.occupation)
    .bind(&report.category)
    .bind(&report.floor)
    .bind(&report.location)
    .bind(report.event_date)
    .bind(report.event_time)
    .bind(&report.description)
    .bind(&report.contact_number)
    .bind(&report.contact_email)
    .bind(photo_url)
    .bind(ReportStatus::Pending)
    .fetch_one(pool)
    .await?;
    Ok(item)
}

/// Stale submissions bypass the active tables and land here directly.
pub async fn insert_archived_report(
    pool: &PgPool,
    report: &NormalizedReport,
    photo_url: Option<&str>,
    reason: ArchiveReason,
    original_table: OriginalTable,
) -> Result<ArchiveEntry> {
    let entry = sqlx::query_as::<_, ArchiveEntry>(
        r#"
        INSERT INTO archives
            (person_name, name, occupation, category, floor, location,
             item_date, item_time, description, contact_number, contact_email,
             photo_url, archive_reason, original_table)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(&report.reporter_name)
    .bind(&report.item_name)
    .bind(&report.occupation)
    .bind(&report.category)
    .bind(&report.floor)
    .bind(&report.location)
    .bind(report.event_date)
    .bind(report.event_time)
    .bind(&report.description)
    .bind(&report.contact_number)
    .bind(&report.contact_email)
    .bind(photo_url)
    .bind(reason)
    .bind(original_table)
    .fetch_one(pool)
    .await?;
    Ok(entry)
}

// --- Reads ---

pub async fn pending_lost_items(pool: &PgPool) -> Result<Vec<LostItem>> {
    let items = sqlx::query_as::<_, LostItem>(
        "SELECT * FROM lost_items WHERE status = $1 ORDER BY created_at DESC",
    )
    .bind(ReportStatus::Pending)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn pending_found_items(pool: &PgPool) -> Result<Vec<FoundItem>> {
    let items = sqlx::query_as::<_, FoundItem>(
        "SELECT * FROM found_items WHERE status = $1 ORDER BY created_at DESC",
    )
    .bind(ReportStatus::Pending)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn solved_items(pool: &PgPool) -> Result<Vec<SolvedItem>> {
    let items =
        sqlx::query_as::<_, SolvedItem>("SELECT * FROM solved_items ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;
    Ok(items)
}

pub async fn archive_entries(pool: &PgPool) -> Result<Vec<ArchiveEntry>> {
    let entries =
        sqlx::query_as::<_, ArchiveEntry>("SELECT * FROM archives ORDER BY archived_at DESC")
            .fetch_all(pool)
            .await?;
    Ok(entries)
}

// --- Lifecycle transitions ---
//
// Each transition runs in one transaction and re-checks its preconditions
// against row-locked current state, so two admins acting on the same stale
// list cannot double-apply an effect.

pub async fn confirm_match(
    pool: &PgPool,
    lost_id: i64,
    found_id: i64,
    today: NaiveDate,
) -> Result<SolvedItem> {
    let mut tx = pool.begin().await?;

    let lost = sqlx::query_as::<_, LostItem>("SELECT * FROM lost_items WHERE id = $1 FOR UPDATE")
        .bind(lost_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Lost report not found or already deleted".to_string()))?;

    let found = sqlx::query_as::<_, FoundItem>("SELECT * FROM found_items WHERE id = $1 FOR UPDATE")
        .bind(found_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Found item not found or already deleted".to_string()))?;

    lifecycle::check_matchable(&lost, &found)?;

    let entry = lifecycle::build_solved_entry(&lost, &found, today);
    let solved = sqlx::query_as::<_, SolvedItem>(
        r#"
        INSERT INTO solved_items
            (name, category, resolved_date, claimed_by_email,
             lost_item_id, found_item_id, is_claimed, lost_details, found_details)
        VALUES ($1, $2, $3, $4, $5, $6, false, $7, $8)
        RETURNING *
        "#,
    )
    .bind(&entry.name)
    .bind(&entry.category)
    .bind(entry.resolved_date)
    .bind(&entry.claimed_by_email)
    .bind(entry.lost_item_id)
    .bind(entry.found_item_id)
    .bind(&entry.lost_details)
    .bind(&entry.found_details)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query("UPDATE lost_items SET status = $1 WHERE id = $2")
        .bind(ReportStatus::Solved)
        .bind(lost_id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("UPDATE found_items SET status = $1 WHERE id = $2")
        .bind(ReportStatus::Solved)
        .bind(found_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(solved)
}

pub async fn mark_claimed(pool: &PgPool, solved_id: i64, today: NaiveDate) -> Result<SolvedItem> {
    let mut tx = pool.begin().await?;

    let solved =
        sqlx::query_as::<_, SolvedItem>("SELECT * FROM solved_items WHERE id = $1 FOR UPDATE")
            .bind(solved_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found or already deleted".to_string()))?;

    lifecycle::check_claimable(&solved)?;

    let updated = sqlx::query_as::<_, SolvedItem>(
        "UPDATE solved_items SET is_claimed = true, claimed_date = $1 WHERE id = $2 RETURNING *",
    )
    .bind(today)
    .bind(solved_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(updated)
}

/// Undoes a match: the solved row is deleted and both referenced reports go
/// back to pending. A side that was hard-deleted after the match is skipped
/// with a warning; the surviving side is still restored.
pub async fn restore_from_solved(pool: &PgPool, solved_id: i64) -> Result<SolvedItem> {
    let mut tx = pool.begin().await?;

    let solved =
        sqlx::query_as::<_, SolvedItem>("SELECT * FROM solved_items WHERE id = $1 FOR UPDATE")
            .bind(solved_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Item not found or already deleted".to_string()))?;

    let lost_rows = sqlx::query("UPDATE lost_items SET status = $1 WHERE id = $2")
        .bind(ReportStatus::Pending)
        .bind(solved.lost_item_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if lost_rows == 0 {
        tracing::warn!(
            solved_id,
            lost_item_id = solved.lost_item_id,
            "lost side missing during restore, restoring found side only"
        );
    }

    let found_rows = sqlx::query("UPDATE found_items SET status = $1 WHERE id = $2")
        .bind(ReportStatus::Pending)
        .bind(solved.found_item_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    if found_rows == 0 {
        tracing::warn!(
            solved_id,
            found_item_id = solved.found_item_id,
            "found side missing during restore, restoring lost side only"
        );
    }

    sqlx::query("DELETE FROM solved_items WHERE id = $1")
        .bind(solved_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(solved)
}

#[derive(Debug, Clone, Serialize)]
pub struct RestoredReport {
    pub table: OriginalTable,
    pub id: i64,
    pub name: String,
}

/// Deletes the archive entry and recreates an active pending report in the
/// table it originally came from, photo included for found items.
pub async fn restore_from_archive(pool: &PgPool, archive_id: i64) -> Result<RestoredReport> {
    let mut tx = pool.begin().await?;

    let entry = sqlx::query_as::<_, ArchiveEntry>("DELETE FROM archives WHERE id = $1 RETURNING *")
        .bind(archive_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Item not found or already deleted".to_string()))?;

    let restored = match entry.original_table {
        OriginalTable::LostItems => {
            let item = sqlx::query_as::<_, LostItem>(
                r#"
                INSERT INTO lost_items
                    (owner_name, name, occupation, category, floor, location,
                     lost_date, lost_time, description, contact_number, contact_email, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                RETURNING *
                "#,
            )
            .bind(&entry.person_name)
            .bind(&entry.name)
            .bind(&entry.occupation)
            .bind(&entry.category)
            .bind(&entry.floor)
            .bind(&entry.location)
            .bind(entry.item_date)
            .bind(entry.item_time)
            .bind(&entry.description)
            .bind(&entry.contact_number)
            .bind(&entry.contact_email)
            .bind(ReportStatus::Pending)
            .fetch_one(&mut *tx)
            .await?;
            RestoredReport {
                table: OriginalTable::LostItems,
                id: item.id,
                name: item.name,
            }
        }
        OriginalTable::FoundItems => {
            let item = sqlx::query_as::<_, FoundItem>(
                r#"
                INSERT INTO found_items
                    (finder_name, name, occupation, category, floor, location,
                     found_date, found_time, description, contact_number, contact_email,
                     photo_url, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
                RETURNING *
                "#,
            )
            .bind(&entry.person_name)
            .bind(&entry.name)
            .bind(&entry.occupation)
            .bind(&entry.category)
            .bind(&entry.floor)
            .bind(&entry.location)
            .bind(entry.item_date)
            .bind(entry.item_time)
            .bind(&entry.description)
            .bind(&entry.contact_number)
            .bind(&entry.contact_email)
            .bind(&entry.photo_url)
            .bind(ReportStatus::Pending)
            .fetch_one(&mut *tx)
            .await?;
            RestoredReport {
                table: OriginalTable::FoundItems,
                id: item.id,
                name: item.name,
            }
        }
    };

    tx.commit().await?;
    Ok(restored)
}

/// Bulk donation, all-or-nothing: if any entry is missing or already
/// donated the whole batch rolls back.
pub async fn donate(pool: &PgPool, archive_ids: &[i64]) -> Result<()> {
    let mut tx = pool.begin().await?;

    for &id in archive_ids {
        let entry =
            sqlx::query_as::<_, ArchiveEntry>("SELECT * FROM archives WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Archive entry {} not found or already deleted", id))
                })?;

        lifecycle::check_donatable(&entry)?;

        sqlx::query("UPDATE archives SET archive_reason = $1 WHERE id = $2")
            .bind(ArchiveReason::Donate)
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn delete_lost_item(pool: &PgPool, id: i64) -> Result<LostItem> {
    sqlx::query_as::<_, LostItem>("DELETE FROM lost_items WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Item not found or already deleted".to_string()))
}

pub async fn delete_found_item(pool: &PgPool, id: i64) -> Result<FoundItem> {
    sqlx::query_as::<_, FoundItem>("DELETE FROM found_items WHERE id = $1 RETURNING *")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Item not found or already deleted".to_string()))
}
