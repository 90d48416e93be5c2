use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DataError, Side};
use crate::model::{GoalCell, Match, Team};

pub const POINTS_PER_WIN: u32 = 3;
pub const POINTS_PER_DRAW: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub position: usize,
    pub team: Team,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u64,
    pub goals_against: u64,
    pub goal_difference: i64,
    pub points: u32,
}

impl StandingsRow {
    fn from_tally(team: &Team, tally: Tally) -> Self {
        Self {
            position: 0,
            team: team.clone(),
            played: tally.played,
            won: tally.won,
            drawn: tally.drawn,
            lost: tally.lost,
            goals_for: tally.goals_for,
            goals_against: tally.goals_against,
            goal_difference: tally.goals_for as i64 - tally.goals_against as i64,
            points: tally.points,
        }
    }

    pub fn has_played(&self) -> bool {
        self.played > 0
    }

    /// `played = won + drawn + lost`, `points = 3*won + drawn` and
    /// `goal_difference = goals_for - goals_against`.
    pub fn is_consistent(&self) -> bool {
        self.played == self.won + self.drawn + self.lost
            && self.points == self.won * POINTS_PER_WIN + self.drawn * POINTS_PER_DRAW
            && self.goal_difference == self.goals_for as i64 - self.goals_against as i64
    }
}

/// Running per-team totals.
#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    played: u32,
    won: u32,
    drawn: u32,
    lost: u32,
    goals_for: u64,
    goals_against: u64,
    points: u32,
}

impl Tally {
    fn record(&mut self, goals_for: u32, goals_against: u32) {
        let (won, drawn, lost) = match goals_for.cmp(&goals_against) {
            Ordering::Greater => (1, 0, 0),
            Ordering::Equal => (0, 1, 0),
            Ordering::Less => (0, 0, 1),
        };
        self.played += 1;
        self.won += won;
        self.drawn += drawn;
        self.lost += lost;
        self.goals_for += u64::from(goals_for);
        self.goals_against += u64::from(goals_against);
        self.points += won * POINTS_PER_WIN + drawn * POINTS_PER_DRAW;
    }
}

/// Stateless handle over [`compute_standings`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StandingsEngine;

impl StandingsEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, teams: &[Team], matches: &[Match]) -> Result<Vec<StandingsRow>, DataError> {
        compute_standings(teams, matches)
    }
}

/// Ranks every team from the finished matches.
///
/// Matches that name a team id missing from `teams` are left out of every
/// tally. Goal cells of finished matches are validated first, unknown teams or
/// not, and the first bad cell in input order fails the whole call.
pub fn compute_standings(teams: &[Team], matches: &[Match]) -> Result<Vec<StandingsRow>, DataError> {
    let mut tallies: HashMap<&str, Tally> = HashMap::with_capacity(teams.len());
    for team in teams {
        if tallies.insert(team.id.as_str(), Tally::default()).is_some() {
            return Err(DataError::DuplicateTeamId {
                id: team.id.clone(),
            });
        }
    }

    let mut counted = 0usize;
    let mut skipped = 0usize;
    for (idx, m) in matches.iter().enumerate() {
        let Some((home_goals, away_goals)) = finished_score(idx + 1, m)? else {
            continue;
        };
        let home = m.home_team_id.as_str();
        let away = m.away_team_id.as_str();
        if !tallies.contains_key(home) || !tallies.contains_key(away) {
            skipped += 1;
            continue;
        }
        if let Some(tally) = tallies.get_mut(home) {
            tally.record(home_goals, away_goals);
        }
        if let Some(tally) = tallies.get_mut(away) {
            tally.record(away_goals, home_goals);
        }
        counted += 1;
    }

    let mut rows: Vec<StandingsRow> = teams
        .iter()
        .map(|team| {
            let tally = tallies.get(team.id.as_str()).copied().unwrap_or_default();
            StandingsRow::from_tally(team, tally)
        })
        .collect();

    // Stable: rows equal on every key keep the order of `teams`.
    rows.sort_by(standings_order);
    for (idx, row) in rows.iter_mut().enumerate() {
        row.position = idx + 1;
    }

    debug!(
        teams = teams.len(),
        counted, skipped, "standings computed"
    );
    Ok(rows)
}

/// Points, goal difference and goals for descending, then name ascending.
pub fn standings_order(a: &StandingsRow, b: &StandingsRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
        .then_with(|| a.team.name.cmp(&b.team.name))
}

fn finished_score(match_no: usize, m: &Match) -> Result<Option<(u32, u32)>, DataError> {
    if !m.status.is_finished() {
        return Ok(None);
    }
    let home = goal_count(match_no, Side::Home, &m.home_goals)?;
    let away = goal_count(match_no, Side::Away, &m.away_goals)?;
    Ok(Some((home, away)))
}

fn goal_count(match_no: usize, side: Side, cell: &GoalCell) -> Result<u32, DataError> {
    match cell {
        GoalCell::Missing => Err(DataError::MissingGoals { match_no, side }),
        GoalCell::Malformed(raw) => Err(DataError::NonNumericGoals {
            match_no,
            side,
            raw: raw.clone(),
        }),
        GoalCell::Count(value) if *value < 0 => Err(DataError::NegativeGoals {
            match_no,
            side,
            value: *value,
        }),
        GoalCell::Count(value) => u32::try_from(*value).map_err(|_| DataError::GoalsOutOfRange {
            match_no,
            side,
            value: *value,
        }),
    }
}
