use std::cmp::Ordering;

/// Tournament record of one player, derived from participations.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub player_id: String,
    pub username: String,
    pub played: u64,
    pub won: u64,
}

/// Share of played tournaments that were won, as a percentage rounded to two
/// decimals. Zero when nothing was played.
pub fn win_percentage(played: u64, won: u64) -> f64 {
    if played == 0 {
        return 0.0;
    }
    let pct = won as f64 / played as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Global order: most wins, then most played, then username.
pub fn record_order(a: &PlayerRecord, b: &PlayerRecord) -> Ordering {
    b.won
        .cmp(&a.won)
        .then_with(|| b.played.cmp(&a.played))
        .then_with(|| a.username.cmp(&b.username))
}

pub fn rank_players(records: &mut [PlayerRecord]) {
    records.sort_by(record_order);
}

/// 1-based position of `player_id` in an already ranked slice.
pub fn rank_of(ranked: &[PlayerRecord], player_id: &str) -> Option<u64> {
    ranked
        .iter()
        .position(|r| r.player_id == player_id)
        .map(|pos| pos as u64 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, played: u64, won: u64) -> PlayerRecord {
        PlayerRecord {
            player_id: format!("id-{name}"),
            username: name.into(),
            played,
            won,
        }
    }

    #[test]
    fn win_percentage_handles_zero_played() {
        assert_eq!(win_percentage(0, 0), 0.0);
        assert_eq!(win_percentage(4, 1), 25.0);
        assert_eq!(win_percentage(3, 1), 33.33);
        assert_eq!(win_percentage(2, 2), 100.0);
    }

    #[test]
    fn players_rank_by_wins_then_played_then_name() {
        let mut records = vec![
            record("carol", 5, 1),
            record("alice", 2, 2),
            record("bob", 6, 1),
            record("dave", 0, 0),
            record("aaron", 5, 1),
        ];
        rank_players(&mut records);

        let names: Vec<_> = records.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "aaron", "carol", "dave"]);
        assert_eq!(rank_of(&records, "id-bob"), Some(2));
        assert_eq!(rank_of(&records, "id-nobody"), None);
    }
}
