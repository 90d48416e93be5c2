use std::fs;
use std::mem::take;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::error::DataError;
use crate::model::{GoalCell, LeagueTables, Match, MatchStatus, Team};

pub const TEAMS_FILE: &str = "teams.csv";
pub const MATCHES_FILE: &str = "matches.csv";

// Accepted header names; the first entry is the canonical one.
const TEAM_ID: &[&str] = &["id"];
const TEAM_NAME: &[&str] = &["name", "nombre"];
const TEAM_LOGO: &[&str] = &["logo_ref", "escudo_url"];
const HOME_ID: &[&str] = &["home_team_id", "home_id"];
const AWAY_ID: &[&str] = &["away_team_id", "away_id"];
const HOME_GOALS: &[&str] = &["home_goals"];
const AWAY_GOALS: &[&str] = &["away_goals"];
const STATUS: &[&str] = &["status"];

/// A header-named table of string cells.
#[derive(Debug, Clone, Default)]
struct Sheet {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    fn parse(table: &'static str, text: &str) -> Result<Self, DataError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut rows = parse_rows(text, ',').into_iter();
        let Some(header) = rows.next() else {
            return Ok(Self::default());
        };
        let header: Vec<String> = header.into_iter().map(|h| h.trim().to_string()).collect();
        let expected = header.len();

        let mut out = Vec::new();
        for (idx, mut row) in rows.enumerate() {
            if row.len() > expected {
                return Err(DataError::RaggedRow {
                    table,
                    line: idx + 2,
                    found: row.len(),
                    expected,
                });
            }
            // Short rows read as trailing empty cells.
            row.resize(expected, String::new());
            out.push(row);
        }
        Ok(Self { header, rows: out })
    }

    fn column(&self, table: &'static str, names: &[&'static str]) -> Result<usize, DataError> {
        names
            .iter()
            .find_map(|name| self.header.iter().position(|h| h == name))
            .ok_or(DataError::MissingColumn {
                table,
                column: names[0],
            })
    }
}

pub fn parse_teams_csv(text: &str) -> Result<Vec<Team>, DataError> {
    let sheet = Sheet::parse("teams", text)?;
    let id = sheet.column("teams", TEAM_ID)?;
    let name = sheet.column("teams", TEAM_NAME)?;
    let logo = sheet.column("teams", TEAM_LOGO)?;

    Ok(sheet
        .rows
        .iter()
        .map(|row| Team {
            id: row[id].trim().to_string(),
            name: row[name].clone(),
            logo_ref: row[logo].trim().to_string(),
        })
        .collect())
}

pub fn parse_matches_csv(text: &str) -> Result<Vec<Match>, DataError> {
    let sheet = Sheet::parse("matches", text)?;
    let home_id = sheet.column("matches", HOME_ID)?;
    let away_id = sheet.column("matches", AWAY_ID)?;
    let home_goals = sheet.column("matches", HOME_GOALS)?;
    let away_goals = sheet.column("matches", AWAY_GOALS)?;
    let status = sheet.column("matches", STATUS)?;

    Ok(sheet
        .rows
        .iter()
        .map(|row| Match {
            home_team_id: row[home_id].trim().to_string(),
            away_team_id: row[away_id].trim().to_string(),
            home_goals: GoalCell::parse(&row[home_goals]),
            away_goals: GoalCell::parse(&row[away_goals]),
            status: MatchStatus::parse(&row[status]),
        })
        .collect())
}

pub fn load_teams(path: &Path) -> Result<Vec<Team>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let teams = parse_teams_csv(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(teams)
}

pub fn load_matches(path: &Path) -> Result<Vec<Match>> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let matches = parse_matches_csv(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(matches)
}

pub fn load_tables(teams_path: &Path, matches_path: &Path) -> Result<LeagueTables> {
    let teams = load_teams(teams_path)?;
    let matches = load_matches(matches_path)?;
    info!(
        teams = teams.len(),
        matches = matches.len(),
        "loaded league tables from csv"
    );
    Ok(LeagueTables { teams, matches })
}

/// CSV splitter tolerant of quotes, doubled-quote escapes and CRLF.
/// Blank lines are dropped.
fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            c if c == sep && !in_quotes => row.push(take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(take(&mut field));
                push_row(&mut rows, take(&mut row));
            }
            _ => field.push(ch),
        }
    }
    row.push(field);
    push_row(&mut rows, row);
    rows
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    let blank = row.iter().all(|cell| cell.trim().is_empty());
    if !blank {
        rows.push(row);
    }
}
