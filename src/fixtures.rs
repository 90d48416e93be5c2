use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Match, MatchStatus, Team};

/// One line of the fixture list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureRow {
    pub match_no: usize,
    pub home: String,
    pub away: String,
    pub status: MatchStatus,
    /// `"2-1"` for finished matches with two valid counts.
    pub score: Option<String>,
}

/// All matches in input order. Unknown team ids are shown as the raw id and
/// goal cells are not validated; this is a listing, not a ranking.
pub fn fixture_list(teams: &[Team], matches: &[Match]) -> Vec<FixtureRow> {
    let names: HashMap<&str, &str> = teams
        .iter()
        .map(|t| (t.id.as_str(), t.name.as_str()))
        .collect();
    let name_of = |id: &str| names.get(id).copied().unwrap_or(id).to_string();

    matches
        .iter()
        .enumerate()
        .map(|(idx, m)| FixtureRow {
            match_no: idx + 1,
            home: name_of(&m.home_team_id),
            away: name_of(&m.away_team_id),
            status: m.status.clone(),
            score: score_label(m),
        })
        .collect()
}

fn score_label(m: &Match) -> Option<String> {
    if !m.status.is_finished() {
        return None;
    }
    let home = m.home_goals.count()?;
    let away = m.away_goals.count()?;
    if home < 0 || away < 0 {
        return None;
    }
    Some(format!("{home}-{away}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_and_scores_only_for_finished() {
        let teams = vec![Team::new("1", "Alpha", ""), Team::new("2", "Beta", "")];
        let matches = vec![
            Match::finished("1", "2", 2, 0),
            Match::scheduled("2", "9"),
            Match {
                status: MatchStatus::Other("postponed".to_string()),
                ..Match::finished("2", "1", 1, 1)
            },
        ];
        let rows = fixture_list(&teams, &matches);
        assert_eq!(rows.len(), 3);
        assert_eq!((rows[0].home.as_str(), rows[0].away.as_str()), ("Alpha", "Beta"));
        assert_eq!(rows[0].score.as_deref(), Some("2-0"));
        assert_eq!(rows[1].away, "9");
        assert!(rows[1].score.is_none());
        assert!(rows[2].score.is_none());
        assert_eq!(rows[2].match_no, 3);
    }
}
