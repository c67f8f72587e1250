use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::db;
use crate::domain::classify::{self, Classification};
use crate::domain::fields::{normalize, RawSubmission, ReportKind};
use crate::domain::projections::{self, ItemSummary, SortConfig, SortDirection, SortKey};
use crate::error::{AppError, Result};
use crate::state::AppState;

// --- Submissions ---

pub async fn submit_lost(
    State(state): State<Arc<AppState>>,
    Json(raw): Json<RawSubmission>,
) -> Result<Json<serde_json::Value>> {
    let report = normalize(ReportKind::Lost, &raw)?;
    let today = Utc::now().date_naive();

    match classify::classify(report.event_date, today) {
        Classification::Stale => {
            db::insert_archived_report(
                state.pool.as_ref(),
                &report,
                None,
                classify::archive_reason_for(ReportKind::Lost),
                classify::original_table_for(ReportKind::Lost),
            )
            .await?;
            Ok(Json(json!({ "message": "Item archived (unsolved)" })))
        }
        Classification::Fresh => {
            db::insert_lost_item(state.pool.as_ref(), &report).await?;
            Ok(Json(json!({ "message": "Lost item reported successfully" })))
        }
    }
}

pub async fn submit_found(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>> {
    let mut raw = RawSubmission::default();
    let mut photo: Option<(String, Vec<u8>)> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();
        if name == "photo" {
            let filename = field.file_name().unwrap_or("photo.jpg").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Upload(e.to_string()))?;
            if !data.is_empty() {
                photo = Some((filename, data.to_vec()));
            }
            continue;
        }
        let value = field.text().await.unwrap_or_default();
        match name.as_str() {
            "finderName" | "reporterName" => raw.reporter_name = value,
            "itemName" => raw.item_name = value,
            "occupancy" | "occupation" => raw.occupation = value,
            "category" => raw.category = value,
            "specificCategory" => raw.specific_category = value,
            "floor" => raw.floor = value,
            "location" => raw.location = value,
            "specificLocation" => raw.specific_location = value,
            "date" => raw.date = value,
            "time" => raw.time = value,
            "description" => raw.description = value,
            "contactNumber" => raw.contact_number = value,
            "contactEmail" => raw.contact_email = value,
            _ => {}
        }
    }

    let report = normalize(ReportKind::Found, &raw)?;

    // Upload before insert; a failed upload aborts the whole submission.
    let photo_url = match &photo {
        Some((filename, data)) => Some(crate::storage::save_photo(
            &state.config.upload_folder,
            filename,
            data,
        )?),
        None => None,
    };

    let today = Utc::now().date_naive();
    let outcome = match classify::classify(report.event_date, today) {
        Classification::Stale => db::insert_archived_report(
            state.pool.as_ref(),
            &report,
            photo_url.as_deref(),
            classify::archive_reason_for(ReportKind::Found),
            classify::original_table_for(ReportKind::Found),
        )
        .await
        .map(|_| "Item archived (older than 1 year)"),
        Classification::Fresh => db::insert_found_item(state.pool.as_ref(), &report, photo_url.as_deref())
            .await
            .map(|_| "Found item reported successfully"),
    };

    match outcome {
        Ok(message) => Ok(Json(json!({ "message": message }))),
        Err(err) => {
            // The insert failed; do not leave the uploaded photo behind.
            if let Some(url) = &photo_url {
                crate::storage::remove_photo(&state.config.upload_folder, url);
            }
            Err(err)
        }
    }
}

// --- Admin reads ---

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub floor: String,
    pub sort: Option<String>,
    pub dir: Option<String>,
    pub page: Option<usize>,
}

fn sort_config(query: &ListQuery) -> SortConfig {
    SortConfig {
        key: query.sort.as_deref().and_then(SortKey::parse),
        direction: match query.dir.as_deref() {
            Some("desc") => Some(SortDirection::Desc),
            Some(_) => Some(SortDirection::Asc),
            None => None,
        },
    }
}

fn project_list(summaries: Vec<ItemSummary>, query: &ListQuery) -> serde_json::Value {
    let categories = projections::category_options(&summaries);
    let floors = projections::floor_options(&summaries);

    let mut filtered =
        projections::filter_items(&summaries, &query.search, &query.category, &query.floor);
    projections::sort_items(&mut filtered, sort_config(query));

    let page = query.page.unwrap_or(1);
    let total_pages = projections::total_pages(filtered.len(), projections::ITEMS_PER_PAGE);
    let items = projections::paginate(&filtered, page, projections::ITEMS_PER_PAGE);

    json!({
        "items": items,
        "page": page.max(1),
        "total_pages": total_pages,
        "total": filtered.len(),
        "categories": categories,
        "floors": floors,
    })
}

pub async fn list_lost(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>> {
    let items = db::pending_lost_items(state.pool.as_ref()).await?;
    let summaries: Vec<ItemSummary> = items.iter().map(ItemSummary::from).collect();
    Ok(Json(project_list(summaries, &query)))
}

pub async fn list_found(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>> {
    let items = db::pending_found_items(state.pool.as_ref()).await?;
    let summaries: Vec<ItemSummary> = items.iter().map(ItemSummary::from).collect();
    Ok(Json(project_list(summaries, &query)))
}

pub async fn list_solved(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>> {
    let items = db::solved_items(state.pool.as_ref()).await?;
    let (solved, claimed): (Vec<_>, Vec<_>) = items.into_iter().partition(|i| !i.is_claimed);
    Ok(Json(json!({ "solved": solved, "claimed": claimed })))
}

#[derive(Debug, Default, Deserialize)]
pub struct ArchiveQuery {
    pub reason: Option<db::ArchiveReason>,
}

pub async fn list_archives(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArchiveQuery>,
) -> Result<Json<serde_json::Value>> {
    let mut entries = db::archive_entries(state.pool.as_ref()).await?;
    if let Some(reason) = query.reason {
        entries.retain(|e| e.archive_reason == reason);
    }
    Ok(Json(json!({ "entries": entries })))
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Result<Json<serde_json::Value>> {
    let lost = db::pending_lost_items(state.pool.as_ref()).await?;
    let found = db::pending_found_items(state.pool.as_ref()).await?;
    let solved = db::solved_items(state.pool.as_ref()).await?;

    let stats = projections::dashboard_stats(&lost, &found, &solved);
    let recent = projections::recent_activity(&lost, &found, &solved);

    Ok(Json(json!({ "stats": stats, "recent_activity": recent })))
}

// --- Lifecycle mutations ---

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub lost_id: i64,
    pub found_id: i64,
}

pub async fn confirm_match(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MatchRequest>,
) -> Result<Json<serde_json::Value>> {
    let today = Utc::now().date_naive();
    let solved = db::confirm_match(state.pool.as_ref(), req.lost_id, req.found_id, today).await?;
    tracing::info!(lost_id = req.lost_id, found_id = req.found_id, "match confirmed");
    Ok(Json(json!({
        "message": format!("Match confirmed for '{}'", solved.name),
        "solved": solved,
    })))
}

pub async fn mark_claimed(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let today = Utc::now().date_naive();
    let solved = db::mark_claimed(state.pool.as_ref(), id, today).await?;
    Ok(Json(json!({
        "message": format!("'{}' marked as claimed", solved.name),
        "solved": solved,
    })))
}

pub async fn restore_solved(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let solved = db::restore_from_solved(state.pool.as_ref(), id).await?;
    Ok(Json(json!({
        "message": format!("'{}' restored to Lost Reports and Found Items", solved.name),
    })))
}

pub async fn restore_archive(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let restored = db::restore_from_archive(state.pool.as_ref(), id).await?;
    Ok(Json(json!({
        "message": format!("'{}' restored", restored.name),
        "restored": restored,
    })))
}

#[derive(Debug, Deserialize)]
pub struct DonateRequest {
    pub ids: Vec<i64>,
}

pub async fn donate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DonateRequest>,
) -> Result<Json<serde_json::Value>> {
    if req.ids.is_empty() {
        return Err(AppError::Validation("No archive entries selected".to_string()));
    }
    db::donate(state.pool.as_ref(), &req.ids).await?;
    Ok(Json(json!({
        "message": format!("{} item(s) marked for donation", req.ids.len()),
    })))
}

pub async fn delete_lost(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let item = db::delete_lost_item(state.pool.as_ref(), id).await?;
    Ok(Json(json!({ "message": "Deleted successfully", "deleted_item": item })))
}

pub async fn delete_found(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let item = db::delete_found_item(state.pool.as_ref(), id).await?;
    Ok(Json(json!({ "message": "Deleted successfully", "deleted_item": item })))
}

// --- Admin login ---

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn admin_login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if req.email == state.config.admin_email && req.password == state.config.admin_password {
        Json(json!({ "success": true })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Invalid email or password" })),
        )
            .into_response()
    }
}

// --- Photo serving ---

pub async fn photo(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> impl IntoResponse {
    if filename.contains("..") || filename.contains('/') || filename.is_empty() {
        return StatusCode::NOT_FOUND.into_response();
    }

    let path = state.config.upload_folder.join(&filename);
    match std::fs::read(&path) {
        Ok(content) => {
            let mime = mime_guess::from_path(&filename)
                .first_raw()
                .unwrap_or("application/octet-stream");
            match axum::response::Response::builder()
                .header("Content-Type", mime)
                .body(axum::body::Body::from(content))
            {
                Ok(resp) => resp.into_response(),
                Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            }
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}
