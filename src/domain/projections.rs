// Read-side projections for the admin dashboard. Pure functions over the
// current row sets, recomputed on every read.
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use crate::db::{FoundItem, LostItem, SolvedItem};

pub const ITEMS_PER_PAGE: usize = 5;
pub const ALL_CATEGORIES: &str = "All Categories";
pub const ALL_FLOORS: &str = "All Floors";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Lost,
    Found,
    Solved,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivityEvent {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub label: &'static str,
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub display_date: NaiveDate,
    pub id: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub total_items: usize,
    pub pending: usize,
    pub resolved: usize,
}

/// Merges the three collections into one feed, newest first, top 5. Every
/// row carries a creation timestamp, so that is the sort key; the domain
/// date is kept alongside for display.
pub fn recent_activity(
    lost: &[LostItem],
    found: &[FoundItem],
    solved: &[SolvedItem],
) -> Vec<ActivityEvent> {
    let mut events: Vec<ActivityEvent> = Vec::with_capacity(lost.len() + found.len() + solved.len());

    events.extend(lost.iter().map(|item| ActivityEvent {
        kind: ActivityKind::Lost,
        label: "Lost Report",
        name: item.name.clone(),
        timestamp: item.created_at,
        display_date: item.lost_date,
        id: item.id,
    }));
    events.extend(found.iter().map(|item| ActivityEvent {
        kind: ActivityKind::Found,
        label: "Found Item",
        name: item.name.clone(),
        timestamp: item.created_at,
        display_date: item.found_date,
        id: item.id,
    }));
    events.extend(solved.iter().map(|item| ActivityEvent {
        kind: ActivityKind::Solved,
        label: "Item Resolved",
        name: item.name.clone(),
        timestamp: item.created_at,
        display_date: item.resolved_date,
        id: item.id,
    }));

    events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    events.truncate(5);
    events
}

pub fn dashboard_stats(
    lost: &[LostItem],
    found: &[FoundItem],
    solved: &[SolvedItem],
) -> DashboardStats {
    let pending = lost.len() + found.len();
    let resolved = solved.len();
    DashboardStats {
        total_items: pending + resolved,
        pending,
        resolved,
    }
}

/// Flat row used by the admin item tables; lost and found lists share the
/// same filtering, sorting and pagination behavior over this shape.
#[derive(Debug, Clone, Serialize)]
pub struct ItemSummary {
    pub id: i64,
    pub name: String,
    pub reporter_name: String,
    pub occupation: String,
    pub category: String,
    pub floor: String,
    pub location: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub time_display: String,
    pub description: Option<String>,
    pub contact_number: String,
    pub contact_email: String,
    pub photo_url: Option<String>,
}

impl From<&LostItem> for ItemSummary {
    fn from(item: &LostItem) -> Self {
        ItemSummary {
            id: item.id,
            name: item.name.clone(),
            reporter_name: item.owner_name.clone(),
            occupation: item.occupation.clone(),
            category: item.category.clone(),
            floor: item.floor.clone(),
            location: item.location.clone(),
            date: item.lost_date,
            time: item.lost_time,
            time_display: super::fields::format_time_12h(item.lost_time),
            description: item.description.clone(),
            contact_number: item.contact_number.clone(),
            contact_email: item.contact_email.clone(),
            photo_url: None,
        }
    }
}

impl From<&FoundItem> for ItemSummary {
    fn from(item: &FoundItem) -> Self {
        ItemSummary {
            id: item.id,
            name: item.name.clone(),
            reporter_name: item.finder_name.clone(),
            occupation: item.occupation.clone(),
            category: item.category.clone(),
            floor: item.floor.clone(),
            location: item.location.clone(),
            date: item.found_date,
            time: item.found_time,
            time_display: super::fields::format_time_12h(item.found_time),
            description: item.description.clone(),
            contact_number: item.contact_number.clone(),
            contact_email: item.contact_email.clone(),
            photo_url: item.photo_url.clone(),
        }
    }
}

/// Distinct categories present in the list, sentinel first, in order of
/// first appearance.
pub fn category_options(items: &[ItemSummary]) -> Vec<String> {
    let mut options = vec![ALL_CATEGORIES.to_string()];
    for item in items {
        if !options.iter().any(|c| c == &item.category) {
            options.push(item.category.clone());
        }
    }
    options
}

/// Distinct floors, sentinel first, remainder sorted.
pub fn floor_options(items: &[ItemSummary]) -> Vec<String> {
    let mut floors: Vec<String> = Vec::new();
    for item in items {
        if !item.floor.is_empty() && !floors.iter().any(|f| f == &item.floor) {
            floors.push(item.floor.clone());
        }
    }
    floors.sort();
    let mut options = vec![ALL_FLOORS.to_string()];
    options.extend(floors);
    options
}

/// Case-insensitive substring search across name, reporter, category and
/// location, combined with exact category/floor filters. Sentinel filter
/// values match everything.
pub fn filter_items(
    items: &[ItemSummary],
    search: &str,
    category: &str,
    floor: &str,
) -> Vec<ItemSummary> {
    let needle = search.to_lowercase();
    items
        .iter()
        .filter(|item| {
            let matches_search = needle.is_empty()
                || item.name.to_lowercase().contains(&needle)
                || item.reporter_name.to_lowercase().contains(&needle)
                || item.category.to_lowercase().contains(&needle)
                || item.location.to_lowercase().contains(&needle);

            let matches_category = category.is_empty() || category == ALL_CATEGORIES || item.category == category;
            let matches_floor = floor.is_empty() || floor == ALL_FLOORS || item.floor == floor;

            matches_search && matches_category && matches_floor
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Id,
    Name,
    Category,
    Date,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<SortKey> {
        match s {
            "id" => Some(SortKey::Id),
            "name" => Some(SortKey::Name),
            "category" => Some(SortKey::Category),
            "date" => Some(SortKey::Date),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SortConfig {
    pub key: Option<SortKey>,
    pub direction: Option<SortDirection>,
}

impl SortConfig {
    /// Clicking the active column flips its direction; switching columns
    /// resets to ascending.
    pub fn toggle(self, key: SortKey) -> SortConfig {
        let direction = if self.key == Some(key) && self.direction == Some(SortDirection::Asc) {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        SortConfig {
            key: Some(key),
            direction: Some(direction),
        }
    }
}

pub fn sort_items(items: &mut [ItemSummary], config: SortConfig) {
    let Some(key) = config.key else {
        return;
    };
    items.sort_by(|a, b| {
        let ord = match key {
            SortKey::Id => a.id.cmp(&b.id),
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::Category => a.category.cmp(&b.category),
            SortKey::Date => a.date.cmp(&b.date),
        };
        match config.direction {
            Some(SortDirection::Desc) => ord.reverse(),
            _ => ord,
        }
    });
}

pub fn total_pages(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page).max(1)
}

/// Fixed-size page slice, 1-based page numbers; out-of-range pages come
/// back empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Vec<T> {
    let page = page.max(1);
    let start = (page - 1) * per_page;
    items.iter().skip(start).take(per_page).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn summary(id: i64, name: &str, category: &str, floor: &str) -> ItemSummary {
        ItemSummary {
            id,
            name: name.into(),
            reporter_name: "Maria Santos".into(),
            occupation: "Student".into(),
            category: category.into(),
            floor: floor.into(),
            location: "Hallway".into(),
            date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            time_display: "2:30 PM".into(),
            description: None,
            contact_number: "09171234567".into(),
            contact_email: "maria@example.edu".into(),
            photo_url: None,
        }
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let items = vec![
            summary(1, "Blue Umbrella", "Umbrellas", "18th Floor"),
            summary(2, "Black Wallet", "Bags & Backpacks", "17th Floor"),
        ];

        let hit = filter_items(&items, "UMBRELLA", ALL_CATEGORIES, ALL_FLOORS);
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].id, 1);

        // Reporter name is searched too.
        let hit = filter_items(&items, "santos", ALL_CATEGORIES, ALL_FLOORS);
        assert_eq!(hit.len(), 2);
    }

    #[test]
    fn category_filter_and_search_combine_with_and() {
        let items = vec![
            summary(1, "Blue Umbrella", "Umbrellas", "18th Floor"),
            summary(2, "Black Wallet", "Bags & Backpacks", "17th Floor"),
        ];

        let hit = filter_items(&items, "", "Bags & Backpacks", ALL_FLOORS);
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].id, 2);

        let hit = filter_items(&items, "umbrella", "Bags & Backpacks", ALL_FLOORS);
        assert!(hit.is_empty());
    }

    #[test]
    fn option_lists_carry_sentinel_first() {
        let items = vec![
            summary(1, "A", "Keys", "18th Floor"),
            summary(2, "B", "Keys", "17th Floor"),
            summary(3, "C", "Electronics", "18th Floor"),
        ];
        assert_eq!(category_options(&items), vec![ALL_CATEGORIES, "Keys", "Electronics"]);
        assert_eq!(floor_options(&items), vec![ALL_FLOORS, "17th Floor", "18th Floor"]);
    }

    #[test]
    fn sort_toggle_flips_direction_and_resets_on_new_column() {
        let config = SortConfig::default().toggle(SortKey::Name);
        assert_eq!(config.direction, Some(SortDirection::Asc));

        let config = config.toggle(SortKey::Name);
        assert_eq!(config.direction, Some(SortDirection::Desc));

        let config = config.toggle(SortKey::Date);
        assert_eq!(config.key, Some(SortKey::Date));
        assert_eq!(config.direction, Some(SortDirection::Asc));
    }

    #[test]
    fn sorting_respects_direction() {
        let mut items = vec![
            summary(2, "Wallet", "Bags & Backpacks", "17th Floor"),
            summary(1, "Umbrella", "Umbrellas", "18th Floor"),
        ];
        sort_items(&mut items, SortConfig::default().toggle(SortKey::Id));
        assert_eq!(items[0].id, 1);

        let desc = SortConfig::default().toggle(SortKey::Id).toggle(SortKey::Id);
        sort_items(&mut items, desc);
        assert_eq!(items[0].id, 2);
    }

    #[test]
    fn pagination_slices_fixed_pages() {
        let items: Vec<i64> = (1..=12).collect();
        assert_eq!(paginate(&items, 1, ITEMS_PER_PAGE), vec![1, 2, 3, 4, 5]);
        assert_eq!(paginate(&items, 3, ITEMS_PER_PAGE), vec![11, 12]);
        assert!(paginate(&items, 4, ITEMS_PER_PAGE).is_empty());
        assert_eq!(total_pages(12, ITEMS_PER_PAGE), 3);
        assert_eq!(total_pages(0, ITEMS_PER_PAGE), 1);
    }

    #[test]
    fn activity_feed_merges_sorted_and_truncated() {
        let ts = |d: u32, h: u32| Utc.with_ymd_and_hms(2026, 8, d, h, 0, 0).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        let time = NaiveTime::from_hms_opt(9, 0, 0).unwrap();

        let lost: Vec<LostItem> = (1..=3)
            .map(|i| LostItem {
                id: i,
                owner_name: "Maria".into(),
                name: format!("lost-{}", i),
                occupation: "Student".into(),
                category: "Keys".into(),
                floor: "17th Floor".into(),
                location: "Lobby".into(),
                lost_date: date,
                lost_time: time,
                description: None,
                contact_number: "09171234567".into(),
                contact_email: "m@e.edu".into(),
                status: crate::db::ReportStatus::Pending,
                created_at: ts(i as u32, 8),
            })
            .collect();

        let found: Vec<FoundItem> = (1..=2)
            .map(|i| FoundItem {
                id: 100 + i,
                finder_name: "Jose".into(),
                name: format!("found-{}", i),
                occupation: "Staff".into(),
                category: "Keys".into(),
                floor: "17th Floor".into(),
                location: "Lobby".into(),
                found_date: date,
                found_time: time,
                description: None,
                contact_number: "09179876543".into(),
                contact_email: "j@e.edu".into(),
                photo_url: None,
                status: crate::db::ReportStatus::Pending,
                created_at: ts(i as u32, 12),
            })
            .collect();

        let solved = vec![SolvedItem {
            id: 900,
            name: "resolved".into(),
            category: "Keys".into(),
            resolved_date: date,
            claimed_by_email: "m@e.edu".into(),
            lost_item_id: 1,
            found_item_id: 101,
            is_claimed: false,
            claimed_date: None,
            lost_details: serde_json::Value::Null,
            found_details: serde_json::Value::Null,
            created_at: ts(10, 9),
        }];

        let feed = recent_activity(&lost, &found, &solved);
        assert_eq!(feed.len(), 5);
        assert_eq!(feed[0].label, "Item Resolved");
        assert_eq!(feed[0].name, "resolved");
        // Strictly descending timestamps.
        for pair in feed.windows(2) {
            assert!(pair[0].timestamp >= pair[1].timestamp);
        }

        let stats = dashboard_stats(&lost, &found, &solved);
        assert_eq!(stats.pending, 5);
        assert_eq!(stats.resolved, 1);
        assert_eq!(stats.total_items, 6);
    }
}
