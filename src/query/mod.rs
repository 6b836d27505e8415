//! Read-only projections over notes
//!
//! Pure functions deriving the views the presentation layer renders:
//! search, sort, pin partitioning, and recency grouping. Nothing in
//! here touches the store; callers fetch notes from the repository and
//! shape them here.
//!
//! Sort ties are broken by note id ascending, so equal timestamps or
//! titles always produce the same order.

use crate::database::Note;
use chrono::{DateTime, Datelike, TimeZone};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sidebar selection: which notes a list view shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteScope {
    /// Active notes across all folders
    All,
    /// Trashed notes across all folders
    Trash,
    /// Active notes in one folder
    Folder(String),
}

/// Sort key for note lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    /// Most recently edited first (the default)
    #[default]
    UpdatedDesc,
    /// Most recently created first
    CreatedDesc,
    /// Title ascending, case-sensitive lexicographic
    TitleAsc,
}

/// Recency buckets for the grouped list view, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecencyBucket {
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    Older,
}

impl RecencyBucket {
    pub fn label(&self) -> &'static str {
        match self {
            RecencyBucket::Today => "Today",
            RecencyBucket::Yesterday => "Yesterday",
            RecencyBucket::ThisWeek => "This Week",
            RecencyBucket::ThisMonth => "This Month",
            RecencyBucket::Older => "Older",
        }
    }
}

fn compare(a: &Note, b: &Note, key: SortKey) -> Ordering {
    let primary = match key {
        SortKey::UpdatedDesc => b.updated_at.cmp(&a.updated_at),
        SortKey::CreatedDesc => b.created_at.cmp(&a.created_at),
        SortKey::TitleAsc => a.title.cmp(&b.title),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

/// Sort notes by the given key, ties broken by id ascending
pub fn sort_notes(mut notes: Vec<Note>, key: SortKey) -> Vec<Note> {
    notes.sort_by(|a, b| compare(a, b, key));
    notes
}

/// Case-insensitive substring search against title or content.
///
/// Matching is on the literal strings, not tokenized. An empty query
/// returns the input unchanged.
pub fn search_notes(mut notes: Vec<Note>, query: &str) -> Vec<Note> {
    if query.is_empty() {
        return notes;
    }

    let query_lower = query.to_lowercase();
    notes.retain(|note| {
        note.title.to_lowercase().contains(&query_lower)
            || note.content.to_lowercase().contains(&query_lower)
    });
    notes
}

/// Split notes into (pinned, unpinned), each preserving incoming order
pub fn partition_by_pin(notes: Vec<Note>) -> (Vec<Note>, Vec<Note>) {
    notes.into_iter().partition(|note| note.pinned)
}

/// Bucket notes by how recently they were edited, relative to `now`.
///
/// Boundaries are calendar days, ISO weeks, and calendar months in
/// `now`'s time zone, so callers pass a zone-local "now". Buckets come
/// back in display order with empty ones omitted, and each bucket is
/// re-sorted by `key`.
pub fn group_by_recency<Tz: TimeZone>(
    notes: Vec<Note>,
    now: &DateTime<Tz>,
    key: SortKey,
) -> Vec<(RecencyBucket, Vec<Note>)> {
    let today = now.date_naive();
    let yesterday = today.pred_opt();

    let mut buckets: [(RecencyBucket, Vec<Note>); 5] = [
        (RecencyBucket::Today, Vec::new()),
        (RecencyBucket::Yesterday, Vec::new()),
        (RecencyBucket::ThisWeek, Vec::new()),
        (RecencyBucket::ThisMonth, Vec::new()),
        (RecencyBucket::Older, Vec::new()),
    ];

    for note in notes {
        let date = note.updated_at.with_timezone(&now.timezone()).date_naive();
        let slot = if date == today {
            0
        } else if Some(date) == yesterday {
            1
        } else if date.iso_week() == today.iso_week() {
            2
        } else if date.year() == today.year() && date.month() == today.month() {
            3
        } else {
            4
        };
        buckets[slot].1.push(note);
    }

    buckets
        .into_iter()
        .filter(|(_, notes)| !notes.is_empty())
        .map(|(bucket, notes)| (bucket, sort_notes(notes, key)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn note(id: &str, title: &str, content: &str, pinned: bool) -> Note {
        let ts = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            created_at: ts,
            updated_at: ts,
            pinned,
            deleted_at: None,
            folder_id: None,
            summary: None,
        }
    }

    #[test]
    fn search_is_case_insensitive_on_title_and_content() {
        let notes = vec![
            note("1", "Meeting", "budget review", false),
            note("2", "Groceries", "milk and eggs", false),
        ];

        let hits = search_notes(notes.clone(), "budget");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");

        let hits = search_notes(notes.clone(), "BUDGET");
        assert_eq!(hits.len(), 1);

        let hits = search_notes(notes.clone(), "meet");
        assert_eq!(hits.len(), 1);

        assert!(search_notes(notes, "xyz").is_empty());
    }

    #[test]
    fn empty_query_is_identity() {
        let notes = vec![note("2", "b", "", false), note("1", "a", "", false)];
        let result = search_notes(notes.clone(), "");
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "2");
        assert_eq!(result[1].id, "1");
    }

    #[test]
    fn sort_by_updated_desc_with_id_tie_break() {
        let base = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let mut a = note("b", "A", "", false);
        let mut b = note("a", "B", "", false);
        let mut c = note("c", "C", "", false);
        a.updated_at = base;
        b.updated_at = base;
        c.updated_at = base + Duration::hours(1);

        let sorted = sort_notes(vec![a, b, c], SortKey::UpdatedDesc);
        let ids: Vec<&str> = sorted.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn sort_by_title_is_case_sensitive() {
        let notes = vec![
            note("1", "banana", "", false),
            note("2", "Apple", "", false),
            note("3", "Cherry", "", false),
        ];

        let sorted = sort_notes(notes, SortKey::TitleAsc);
        let titles: Vec<&str> = sorted.iter().map(|n| n.title.as_str()).collect();
        // Uppercase sorts before lowercase in lexicographic byte order
        assert_eq!(titles, vec!["Apple", "Cherry", "banana"]);
    }

    #[test]
    fn partition_preserves_order() {
        let notes = vec![
            note("1", "a", "", true),
            note("2", "b", "", false),
            note("3", "c", "", true),
            note("4", "d", "", false),
        ];

        let (pinned, unpinned) = partition_by_pin(notes);
        let pinned_ids: Vec<&str> = pinned.iter().map(|n| n.id.as_str()).collect();
        let unpinned_ids: Vec<&str> = unpinned.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(pinned_ids, vec!["1", "3"]);
        assert_eq!(unpinned_ids, vec!["2", "4"]);
    }

    #[test]
    fn recency_grouping_omits_empty_buckets() {
        // Sunday mid-month so "yesterday" stays inside the same week
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();

        let mut today = note("1", "today", "", false);
        today.updated_at = now - Duration::hours(2);
        let mut yesterday = note("2", "yesterday", "", false);
        yesterday.updated_at = now - Duration::days(1);
        let mut older = note("3", "older", "", false);
        older.updated_at = now - Duration::days(40);

        let groups = group_by_recency(vec![older, yesterday, today], &now, SortKey::UpdatedDesc);

        let buckets: Vec<RecencyBucket> = groups.iter().map(|(b, _)| *b).collect();
        assert_eq!(
            buckets,
            vec![
                RecencyBucket::Today,
                RecencyBucket::Yesterday,
                RecencyBucket::Older
            ]
        );
        assert_eq!(groups[0].1[0].id, "1");
        assert_eq!(groups[1].1[0].id, "2");
        assert_eq!(groups[2].1[0].id, "3");
    }

    #[test]
    fn recency_grouping_this_week_and_month() {
        // A Friday, so earlier weekdays fall in the same ISO week
        let now = Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();

        let mut this_week = note("1", "wed", "", false);
        this_week.updated_at = now - Duration::days(2);
        let mut this_month = note("2", "early june", "", false);
        this_month.updated_at = Utc.with_ymd_and_hms(2025, 6, 2, 8, 0, 0).unwrap();

        let groups = group_by_recency(vec![this_month, this_week], &now, SortKey::UpdatedDesc);

        let buckets: Vec<RecencyBucket> = groups.iter().map(|(b, _)| *b).collect();
        assert_eq!(
            buckets,
            vec![RecencyBucket::ThisWeek, RecencyBucket::ThisMonth]
        );
    }

    #[test]
    fn recency_buckets_resort_by_active_key() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();

        let mut early = note("1", "early", "", false);
        early.updated_at = now - Duration::hours(6);
        let mut late = note("2", "late", "", false);
        late.updated_at = now - Duration::hours(1);

        let groups = group_by_recency(vec![early, late], &now, SortKey::UpdatedDesc);
        assert_eq!(groups.len(), 1);
        let ids: Vec<&str> = groups[0].1.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }
}
