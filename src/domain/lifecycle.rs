// Transition preconditions and record construction for the item lifecycle.
// All status writes and solved/archive row creation go through the db layer
// calling into these checks; no other code path decides a transition.
use chrono::NaiveDate;

use crate::db::{ArchiveEntry, ArchiveReason, FoundItem, LostItem, ReportStatus, SolvedItem};
use crate::error::{AppError, Result};

/// A match requires both sides to still be pending at effect time. An admin
/// working from a stale list gets a precondition error, not a second match.
pub fn check_matchable(lost: &LostItem, found: &FoundItem) -> Result<()> {
    if lost.status != ReportStatus::Pending {
        return Err(AppError::Precondition(format!(
            "Lost report '{}' is no longer pending",
            lost.name
        )));
    }
    if found.status != ReportStatus::Pending {
        return Err(AppError::Precondition(format!(
            "Found item '{}' is no longer pending",
            found.name
        )));
    }
    Ok(())
}

pub fn check_claimable(solved: &SolvedItem) -> Result<()> {
    if solved.is_claimed {
        return Err(AppError::Precondition(format!(
            "Item '{}' is already claimed",
            solved.name
        )));
    }
    Ok(())
}

pub fn check_donatable(entry: &ArchiveEntry) -> Result<()> {
    if entry.archive_reason == ArchiveReason::Donate {
        return Err(AppError::Precondition(format!(
            "Archive entry {} is already marked for donation",
            entry.id
        )));
    }
    Ok(())
}

/// Solved row payload built at match time. Name and category come from the
/// lost report; the claimant contact is the lost reporter's email. Both
/// source reports are snapshotted in full so the admin detail view keeps
/// working after their statuses change.
#[derive(Debug, Clone)]
pub struct NewSolvedEntry {
    pub name: String,
    pub category: String,
    pub resolved_date: NaiveDate,
    pub claimed_by_email: String,
    pub lost_item_id: i64,
    pub found_item_id: i64,
    pub lost_details: serde_json::Value,
    pub found_details: serde_json::Value,
}

pub fn build_solved_entry(lost: &LostItem, found: &FoundItem, today: NaiveDate) -> NewSolvedEntry {
    NewSolvedEntry {
        name: lost.name.clone(),
        category: lost.category.clone(),
        resolved_date: today,
        claimed_by_email: lost.contact_email.clone(),
        lost_item_id: lost.id,
        found_item_id: found.id,
        lost_details: serde_json::to_value(lost).unwrap_or(serde_json::Value::Null),
        found_details: serde_json::to_value(found).unwrap_or(serde_json::Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::OriginalTable;
    use chrono::{NaiveTime, TimeZone, Utc};

    fn lost(status: ReportStatus) -> LostItem {
        LostItem {
            id: 11,
            owner_name: "Maria Santos".into(),
            name: "Blue Umbrella".into(),
            occupation: "Student".into(),
            category: "Umbrellas".into(),
            floor: "18th Floor".into(),
            location: "Hallway".into(),
            lost_date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            lost_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            description: None,
            contact_number: "09171234567".into(),
            contact_email: "maria@example.edu".into(),
            status,
            created_at: Utc.with_ymd_and_hms(2026, 8, 2, 9, 0, 0).unwrap(),
        }
    }

    fn found(status: ReportStatus) -> FoundItem {
        FoundItem {
            id: 42,
            finder_name: "Jose Reyes".into(),
            name: "Umbrella (blue)".into(),
            occupation: "Staff".into(),
            category: "Umbrellas".into(),
            floor: "18th Floor".into(),
            location: "Lobby".into(),
            found_date: NaiveDate::from_ymd_opt(2026, 8, 3).unwrap(),
            found_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            description: Some("left by the couch".into()),
            contact_number: "09179876543".into(),
            contact_email: "jose@example.edu".into(),
            photo_url: Some("/uploads/abc.jpg".into()),
            status,
            created_at: Utc.with_ymd_and_hms(2026, 8, 3, 11, 0, 0).unwrap(),
        }
    }

    fn solved(is_claimed: bool) -> SolvedItem {
        SolvedItem {
            id: 7,
            name: "Blue Umbrella".into(),
            category: "Umbrellas".into(),
            resolved_date: NaiveDate::from_ymd_opt(2026, 8, 10).unwrap(),
            claimed_by_email: "maria@example.edu".into(),
            lost_item_id: 11,
            found_item_id: 42,
            is_claimed,
            claimed_date: is_claimed.then(|| NaiveDate::from_ymd_opt(2026, 8, 12).unwrap()),
            lost_details: serde_json::Value::Null,
            found_details: serde_json::Value::Null,
            created_at: Utc.with_ymd_and_hms(2026, 8, 10, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn pending_pair_is_matchable() {
        assert!(check_matchable(&lost(ReportStatus::Pending), &found(ReportStatus::Pending)).is_ok());
    }

    #[test]
    fn solved_side_blocks_match() {
        let err =
            check_matchable(&lost(ReportStatus::Solved), &found(ReportStatus::Pending)).unwrap_err();
        assert!(err.to_string().contains("no longer pending"));

        let err =
            check_matchable(&lost(ReportStatus::Pending), &found(ReportStatus::Solved)).unwrap_err();
        assert!(err.to_string().contains("no longer pending"));
    }

    #[test]
    fn claim_is_rejected_once_claimed() {
        assert!(check_claimable(&solved(false)).is_ok());
        let err = check_claimable(&solved(true)).unwrap_err();
        assert!(err.to_string().contains("already claimed"));
    }

    #[test]
    fn donated_entry_cannot_be_donated_again() {
        let entry = ArchiveEntry {
            id: 3,
            person_name: "Maria Santos".into(),
            name: "Old Notebook".into(),
            occupation: "Student".into(),
            category: "Books & Notebooks".into(),
            floor: "17th Floor".into(),
            location: "Lobby".into(),
            item_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            item_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            description: None,
            contact_number: "09171234567".into(),
            contact_email: "maria@example.edu".into(),
            photo_url: None,
            archive_reason: ArchiveReason::Expired,
            original_table: OriginalTable::FoundItems,
            archived_at: Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap(),
        };
        assert!(check_donatable(&entry).is_ok());

        let donated = ArchiveEntry {
            archive_reason: ArchiveReason::Donate,
            ..entry
        };
        let err = check_donatable(&donated).unwrap_err();
        assert!(err.to_string().contains("already marked for donation"));
    }

    #[test]
    fn solved_entry_copies_lost_side_fields() {
        let l = lost(ReportStatus::Pending);
        let f = found(ReportStatus::Pending);
        let today = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        let entry = build_solved_entry(&l, &f, today);

        assert_eq!(entry.name, "Blue Umbrella");
        assert_eq!(entry.category, "Umbrellas");
        assert_eq!(entry.claimed_by_email, "maria@example.edu");
        assert_eq!(entry.lost_item_id, 11);
        assert_eq!(entry.found_item_id, 42);
        assert_eq!(entry.resolved_date, today);
        assert_eq!(entry.lost_details["owner_name"], "Maria Santos");
        assert_eq!(entry.found_details["photo_url"], "/uploads/abc.jpg");
    }
}
