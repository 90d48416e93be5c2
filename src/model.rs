use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo_ref: String,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>, logo_ref: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            logo_ref: logo_ref.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Finished,
    /// Any other raw status value. Never counted toward standings.
    Other(String),
}

impl MatchStatus {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("finished") {
            Self::Finished
        } else if trimmed.eq_ignore_ascii_case("scheduled") {
            Self::Scheduled
        } else {
            Self::Other(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Finished => "finished",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MatchStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MatchStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// A goal count as it appeared in the source table.
///
/// Cells are kept unvalidated so that a scheduled match with an empty or junk
/// score loads fine; the standings engine checks the cells of finished matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GoalCell {
    #[default]
    Missing,
    Count(i64),
    Malformed(String),
}

impl GoalCell {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        if let Ok(n) = trimmed.parse::<i64>() {
            return Self::Count(n);
        }
        // Spreadsheet exports write integral scores as "2.0".
        match trimmed.parse::<f64>() {
            Ok(f) => Self::from_float(f).unwrap_or_else(|| Self::Malformed(trimmed.to_string())),
            Err(_) => Self::Malformed(trimmed.to_string()),
        }
    }

    fn from_float(f: f64) -> Option<Self> {
        if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
            Some(Self::Count(f as i64))
        } else {
            None
        }
    }

    pub fn count(&self) -> Option<i64> {
        match self {
            Self::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// The cell as text, `None` when missing.
    pub fn raw(&self) -> Option<String> {
        match self {
            Self::Missing => None,
            Self::Count(n) => Some(n.to_string()),
            Self::Malformed(raw) => Some(raw.clone()),
        }
    }
}

impl From<i64> for GoalCell {
    fn from(n: i64) -> Self {
        Self::Count(n)
    }
}

impl Serialize for GoalCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Missing => serializer.serialize_none(),
            Self::Count(n) => serializer.serialize_i64(*n),
            Self::Malformed(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for GoalCell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => Self::Missing,
            Some(Raw::Int(n)) => Self::Count(n),
            Some(Raw::Float(f)) => Self::from_float(f).unwrap_or_else(|| Self::Malformed(f.to_string())),
            Some(Raw::Text(raw)) => Self::parse(&raw),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub home_team_id: String,
    pub away_team_id: String,
    #[serde(default)]
    pub home_goals: GoalCell,
    #[serde(default)]
    pub away_goals: GoalCell,
    pub status: MatchStatus,
}

impl Match {
    pub fn finished(
        home_team_id: impl Into<String>,
        away_team_id: impl Into<String>,
        home_goals: i64,
        away_goals: i64,
    ) -> Self {
        Self {
            home_team_id: home_team_id.into(),
            away_team_id: away_team_id.into(),
            home_goals: GoalCell::Count(home_goals),
            away_goals: GoalCell::Count(away_goals),
            status: MatchStatus::Finished,
        }
    }

    pub fn scheduled(home_team_id: impl Into<String>, away_team_id: impl Into<String>) -> Self {
        Self {
            home_team_id: home_team_id.into(),
            away_team_id: away_team_id.into(),
            home_goals: GoalCell::Missing,
            away_goals: GoalCell::Missing,
            status: MatchStatus::Scheduled,
        }
    }
}

/// Both input tables of one league, loaded together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueTables {
    pub teams: Vec<Team>,
    pub matches: Vec<Match>,
}

impl LeagueTables {
    pub fn find_team_by_name(&self, name: &str) -> Option<&Team> {
        find_team_by_name(&self.teams, name)
    }
}

/// Club lookup by display name. Exact match first, then a case-insensitive one.
pub fn find_team_by_name<'a>(teams: &'a [Team], name: &str) -> Option<&'a Team> {
    let needle = name.trim();
    teams
        .iter()
        .find(|t| t.name == needle)
        .or_else(|| teams.iter().find(|t| t.name.trim().eq_ignore_ascii_case(needle)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_cell_parses_integral_floats() {
        assert_eq!(GoalCell::parse(" 2 "), GoalCell::Count(2));
        assert_eq!(GoalCell::parse("3.0"), GoalCell::Count(3));
        assert_eq!(GoalCell::parse("-1"), GoalCell::Count(-1));
        assert_eq!(GoalCell::parse(""), GoalCell::Missing);
        assert_eq!(GoalCell::parse("2.5"), GoalCell::Malformed("2.5".to_string()));
        assert_eq!(GoalCell::parse("two"), GoalCell::Malformed("two".to_string()));
    }

    #[test]
    fn status_is_case_insensitive_and_keeps_unknown_values() {
        assert!(MatchStatus::parse(" Finished").is_finished());
        assert_eq!(MatchStatus::parse("SCHEDULED"), MatchStatus::Scheduled);
        let other = MatchStatus::parse("postponed");
        assert!(!other.is_finished());
        assert_eq!(other.as_str(), "postponed");
    }

    #[test]
    fn match_json_accepts_numbers_strings_and_nulls() {
        let raw = r#"[
            {"home_team_id":"1","away_team_id":"2","home_goals":2,"away_goals":"1","status":"finished"},
            {"home_team_id":"1","away_team_id":"3","home_goals":null,"status":"scheduled"}
        ]"#;
        let matches: Vec<Match> = serde_json::from_str(raw).expect("valid json");
        assert_eq!(matches[0], Match::finished("1", "2", 2, 1));
        assert_eq!(matches[1], Match::scheduled("1", "3"));
    }

    #[test]
    fn club_lookup_prefers_exact_name() {
        let teams = vec![Team::new("1", "river", ""), Team::new("2", "River", "")];
        assert_eq!(find_team_by_name(&teams, "River").map(|t| t.id.as_str()), Some("2"));
        assert_eq!(find_team_by_name(&teams, "RIVER").map(|t| t.id.as_str()), Some("1"));
        assert!(find_team_by_name(&teams, "Boca").is_none());
    }
}
