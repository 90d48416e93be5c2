use std::collections::HashSet;

use proptest::prelude::*;

use liga_table::{Match, MatchStatus, StandingsRow, Team, compute_standings};

fn league() -> impl Strategy<Value = (Vec<Team>, Vec<Match>)> {
    (1usize..8).prop_flat_map(|n| {
        let teams: Vec<Team> = (0..n)
            .map(|i| Team::new(i.to_string(), format!("Team {}", (b'A' + (i % 3) as u8) as char), ""))
            .collect();
        // Ids up to n + 1 so some matches reference unknown teams.
        let one_match = (0..n + 2, 0..n + 2, 0i64..6, 0i64..6, any::<bool>()).prop_map(
            |(home, away, hg, ag, finished)| {
                let mut m = Match::finished(home.to_string(), away.to_string(), hg, ag);
                if !finished {
                    m.status = MatchStatus::Scheduled;
                }
                m
            },
        );
        (Just(teams), prop::collection::vec(one_match, 0..40))
    })
}

fn key(row: &StandingsRow) -> (u32, i64, u64) {
    (row.points, row.goal_difference, row.goals_for)
}

proptest! {
    #[test]
    fn rows_are_sorted_by_rank_keys((teams, matches) in league()) {
        let rows = compute_standings(&teams, &matches).unwrap();
        for pair in rows.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(key(a) > key(b) || (key(a) == key(b) && a.team.name <= b.team.name));
        }
        for (idx, row) in rows.iter().enumerate() {
            prop_assert_eq!(row.position, idx + 1);
            prop_assert!(row.is_consistent());
        }
    }

    #[test]
    fn one_row_per_team((teams, matches) in league()) {
        let rows = compute_standings(&teams, &matches).unwrap();
        prop_assert_eq!(rows.len(), teams.len());
        let ids: HashSet<&str> = rows.iter().map(|r| r.team.id.as_str()).collect();
        let expected: HashSet<&str> = teams.iter().map(|t| t.id.as_str()).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn points_total_matches_results((teams, matches) in league()) {
        let known: HashSet<&str> = teams.iter().map(|t| t.id.as_str()).collect();
        let expected: u32 = matches
            .iter()
            .filter(|m| m.status.is_finished())
            .filter(|m| known.contains(m.home_team_id.as_str()) && known.contains(m.away_team_id.as_str()))
            .map(|m| if m.home_goals == m.away_goals { 2 } else { 3 })
            .sum();
        let rows = compute_standings(&teams, &matches).unwrap();
        prop_assert_eq!(rows.iter().map(|r| r.points).sum::<u32>(), expected);

        let played: u32 = rows.iter().map(|r| r.played).sum();
        prop_assert_eq!(played % 2, 0);
    }
}
