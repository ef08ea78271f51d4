use std::cmp::Ordering;

use models::domains::tournament_entries;

/// Points table order: more points first, then earlier registration.
pub fn standing_order(a: &tournament_entries::Model, b: &tournament_entries::Model) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| a.registered_at.cmp(&b.registered_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sorts `entries` into table order and assigns 1-based positional rankings.
///
/// Returns the `(entry id, ranking)` pairs whose ranking changed.
pub fn rerank(entries: &mut [tournament_entries::Model]) -> Vec<(i32, i32)> {
    entries.sort_by(standing_order);

    let mut changed = Vec::new();
    for (pos, entry) in entries.iter_mut().enumerate() {
        let ranking = pos as i32 + 1;
        if entry.ranking != ranking {
            entry.ranking = ranking;
            changed.push((entry.id, ranking));
        }
    }
    changed
}

/// Whether `team_id` holds the top point total. Ties for the top all qualify.
pub fn is_leader(entries: &[tournament_entries::Model], team_id: &str) -> bool {
    let Some(top) = entries.iter().map(|e| e.points).max() else {
        return false;
    };
    entries
        .iter()
        .any(|e| e.team_id == team_id && e.points == top)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    fn entry(id: i32, team: &str, points: i32, minutes: i64) -> tournament_entries::Model {
        let base = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        tournament_entries::Model {
            id,
            tournament_id: "t1".into(),
            team_id: team.into(),
            team_name: team.to_uppercase(),
            points,
            ranking: id,
            registered_at: (base + Duration::minutes(minutes)).fixed_offset(),
        }
    }

    #[test]
    fn higher_points_rank_first() {
        let mut entries = vec![entry(1, "a", 10, 0), entry(2, "b", 30, 1), entry(3, "c", 20, 2)];
        let changed = rerank(&mut entries);

        let order: Vec<_> = entries.iter().map(|e| (e.team_id.as_str(), e.ranking)).collect();
        assert_eq!(order, vec![("b", 1), ("c", 2), ("a", 3)]);
        assert_eq!(changed.len(), 3);
    }

    #[test]
    fn ties_go_to_earlier_registration() {
        let mut entries = vec![entry(1, "late", 15, 10), entry(2, "early", 15, 0)];
        rerank(&mut entries);

        assert_eq!(entries[0].team_id, "early");
        assert_eq!(entries[0].ranking, 1);
        assert_eq!(entries[1].ranking, 2);
    }

    #[test]
    fn unchanged_rankings_are_not_reported() {
        let mut entries = vec![entry(1, "a", 5, 0), entry(2, "b", 0, 1)];
        assert!(rerank(&mut entries).is_empty());
    }

    #[test]
    fn leader_includes_ties() {
        let entries = vec![entry(1, "a", 7, 0), entry(2, "b", 7, 1), entry(3, "c", 3, 2)];
        assert!(is_leader(&entries, "a"));
        assert!(is_leader(&entries, "b"));
        assert!(!is_leader(&entries, "c"));
        assert!(!is_leader(&entries, "missing"));
        assert!(!is_leader(&[], "a"));
    }
}
