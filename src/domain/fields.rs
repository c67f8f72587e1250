// Field vocabularies and the normalizer that maps raw form fields into the
// canonical report shape. All UI-field to storage-field renaming lives here.
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Deserialize;

use crate::error::Result;

pub const CATEGORIES: &[&str] = &[
    "Electronics",
    "Bags & Backpacks",
    "Books & Notebooks",
    "Clothing & Accessories",
    "ID Cards & Documents",
    "Keys",
    "Water Bottles & Containers",
    "Umbrellas",
    "Others",
];

pub const OCCUPATIONS: &[&str] = &["Student", "Faculty", "Staff"];

pub const FLOORS: &[&str] = &["17th Floor", "18th Floor", "19th Floor", "20th Floor"];

pub const LOCATIONS: &[&str] = &["Room", "Hallway", "Bathroom", "Fire Exit", "Lobby", "Others"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Lost,
    Found,
}

/// Raw submission payload as posted by the lost/found forms. The reporter
/// field arrives as `ownerName` on the lost form and `finderName` on the
/// found form; both mean the same column.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSubmission {
    #[serde(default, alias = "ownerName", alias = "finderName")]
    pub reporter_name: String,
    #[serde(default)]
    pub item_name: String,
    #[serde(default, alias = "occupancy")]
    pub occupation: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub specific_category: String,
    #[serde(default)]
    pub floor: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub specific_location: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub contact_email: String,
}

/// Canonical report fields after validation and normalization.
#[derive(Debug, Clone)]
pub struct NormalizedReport {
    pub kind: ReportKind,
    pub reporter_name: String,
    pub item_name: String,
    pub occupation: String,
    pub category: String,
    pub floor: String,
    pub location: String,
    pub event_date: NaiveDate,
    pub event_time: NaiveTime,
    pub description: Option<String>,
    pub contact_number: String,
    pub contact_email: String,
}

/// Locations that require a specific qualifier (a room number or free text).
pub fn needs_location_qualifier(location: &str) -> bool {
    location == "Room" || location == "Others"
}

fn compose_location(location: &str, specific: &str) -> String {
    if needs_location_qualifier(location) && !specific.trim().is_empty() {
        format!("{}: {}", location, specific.trim())
    } else {
        location.to_string()
    }
}

fn compose_category(category: &str, specific: &str) -> String {
    if category == "Others" && !specific.trim().is_empty() {
        format!("Others: {}", specific.trim())
    } else {
        category.to_string()
    }
}

/// Validates a raw submission and maps it into canonical shape. Qualifier
/// presence is enforced by the validator before the compound strings are
/// composed.
pub fn normalize(kind: ReportKind, raw: &RawSubmission) -> Result<NormalizedReport> {
    let (event_date, event_time) = super::validate::validate(raw)?;

    let description = raw.description.trim();
    Ok(NormalizedReport {
        kind,
        reporter_name: raw.reporter_name.trim().to_string(),
        item_name: raw.item_name.trim().to_string(),
        occupation: raw.occupation.trim().to_string(),
        category: compose_category(&raw.category, &raw.specific_category),
        floor: raw.floor.trim().to_string(),
        location: compose_location(&raw.location, &raw.specific_location),
        event_date,
        event_time,
        description: if description.is_empty() {
            None
        } else {
            Some(description.to_string())
        },
        contact_number: raw.contact_number.trim().to_string(),
        contact_email: raw.contact_email.trim().to_string(),
    })
}

/// Renders a stored 24-hour time in 12-hour form for the admin views.
pub fn format_time_12h(time: NaiveTime) -> String {
    let hour = time.hour();
    let period = if hour >= 12 { "PM" } else { "AM" };
    let twelve = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", twelve, time.minute(), period)
}
