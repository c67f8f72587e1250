use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "report_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Solved,
    Archived,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "archive_reason", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ArchiveReason {
    Expired,
    Unsolved,
    Donate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "origin_table", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OriginalTable {
    LostItems,
    FoundItems,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LostItem {
    pub id: i64,
    pub owner_name: String,
    pub name: String,
    pub occupation: String,
    pub category: String,
    pub floor: String,
    pub location: String,
    pub lost_date: NaiveDate,
    pub lost_time: NaiveTime,
    pub description: Option<String>,
    pub contact_number: String,
    pub contact_email: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct FoundItem {
    pub id: i64,
    pub finder_name: String,
    pub name: String,
    pub occupation: String,
    pub category: String,
    pub floor: String,
    pub location: String,
    pub found_date: NaiveDate,
    pub found_time: NaiveTime,
    pub description: Option<String>,
    pub contact_number: String,
    pub contact_email: String,
    pub photo_url: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ArchiveEntry {
    pub id: i64,
    pub person_name: String,
    pub name: String,
    pub occupation: String,
    pub category: String,
    pub floor: String,
    pub location: String,
    pub item_date: NaiveDate,
    pub item_time: NaiveTime,
    pub description: Option<String>,
    pub contact_number: String,
    pub contact_email: String,
    pub photo_url: Option<String>,
    pub archive_reason: ArchiveReason,
    pub original_table: OriginalTable,
    pub archived_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SolvedItem {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub resolved_date: NaiveDate,
    pub claimed_by_email: String,
    pub lost_item_id: i64,
    pub found_item_id: i64,
    pub is_claimed: bool,
    pub claimed_date: Option<NaiveDate>,
    pub lost_details: serde_json::Value,
    pub found_details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
