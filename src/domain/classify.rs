// Archival classification, decided once at submission time. A report that
// ages past the cutoff while sitting pending is never re-evaluated.
use chrono::{Months, NaiveDate};

use super::fields::ReportKind;
use crate::db::{ArchiveReason, OriginalTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Fresh,
    Stale,
}

/// One calendar year before today, with month/day clamping (Feb 29 on a
/// non-leap target becomes Feb 28).
pub fn cutoff(today: NaiveDate) -> NaiveDate {
    today.checked_sub_months(Months::new(12)).unwrap_or(today)
}

/// Boundary is inclusive: an event exactly one year old is already stale.
pub fn classify(event_date: NaiveDate, today: NaiveDate) -> Classification {
    if event_date <= cutoff(today) {
        Classification::Stale
    } else {
        Classification::Fresh
    }
}

/// Stale lost reports land in the unsolved archive tab; stale found items
/// are treated as overdue.
pub fn archive_reason_for(kind: ReportKind) -> ArchiveReason {
    match kind {
        ReportKind::Lost => ArchiveReason::Unsolved,
        ReportKind::Found => ArchiveReason::Expired,
    }
}

pub fn original_table_for(kind: ReportKind) -> OriginalTable {
    match kind {
        ReportKind::Lost => OriginalTable::LostItems,
        ReportKind::Found => OriginalTable::FoundItems,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn exactly_one_year_old_is_stale() {
        let today = d(2026, 8, 27);
        assert_eq!(classify(d(2025, 8, 27), today), Classification::Stale);
    }

    #[test]
    fn one_day_inside_the_year_is_fresh() {
        let today = d(2026, 8, 27);
        assert_eq!(classify(d(2025, 8, 28), today), Classification::Fresh);
    }

    #[test]
    fn far_past_is_stale_and_today_is_fresh() {
        let today = d(2026, 8, 27);
        assert_eq!(classify(d(2024, 1, 1), today), Classification::Stale);
        assert_eq!(classify(today, today), Classification::Fresh);
    }

    #[test]
    fn leap_day_cutoff_clamps_to_feb_28() {
        // 2024-02-29 minus a calendar year does not exist in 2023.
        assert_eq!(cutoff(d(2024, 2, 29)), d(2023, 2, 28));
        assert_eq!(classify(d(2023, 2, 28), d(2024, 2, 29)), Classification::Stale);
        assert_eq!(classify(d(2023, 3, 1), d(2024, 2, 29)), Classification::Fresh);
    }

    #[test]
    fn reasons_by_kind() {
        assert_eq!(archive_reason_for(ReportKind::Lost), ArchiveReason::Unsolved);
        assert_eq!(archive_reason_for(ReportKind::Found), ArchiveReason::Expired);
        assert_eq!(original_table_for(ReportKind::Lost), OriginalTable::LostItems);
        assert_eq!(original_table_for(ReportKind::Found), OriginalTable::FoundItems);
    }
}
