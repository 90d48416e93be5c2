use std::path::Path;

use anyhow::{Context, Result, bail};
use rusqlite::{Connection, OpenFlags, params};
use tracing::info;

use crate::model::{GoalCell, LeagueTables, Match, MatchStatus, Team};

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    let conn =
        Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Goal cells are TEXT so that malformed values survive a round trip and
/// are rejected by the standings engine rather than by SQLite. Team ids are
/// not a key here for the same reason.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS teams (
            seq INTEGER PRIMARY KEY,
            id TEXT NOT NULL,
            name TEXT NOT NULL,
            logo_ref TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS matches (
            match_no INTEGER PRIMARY KEY,
            home_team_id TEXT NOT NULL,
            away_team_id TEXT NOT NULL,
            home_goals TEXT NULL,
            away_goals TEXT NULL,
            status TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_matches_status ON matches(status);
        "#,
    )
    .context("create sqlite schema")?;
    Ok(())
}

/// Replaces both tables with `tables` in one transaction.
pub fn save_tables(conn: &mut Connection, tables: &LeagueTables) -> Result<()> {
    let tx = conn.transaction().context("begin sqlite transaction")?;
    tx.execute("DELETE FROM teams", [])
        .context("clear teams")?;
    tx.execute("DELETE FROM matches", [])
        .context("clear matches")?;
    {
        let mut stmt = tx
            .prepare("INSERT INTO teams (seq, id, name, logo_ref) VALUES (?1, ?2, ?3, ?4)")
            .context("prepare team insert")?;
        for (idx, team) in tables.teams.iter().enumerate() {
            stmt.execute(params![idx as i64, team.id, team.name, team.logo_ref])
                .with_context(|| format!("insert team {}", team.id))?;
        }

        let mut stmt = tx
            .prepare(
                "INSERT INTO matches (match_no, home_team_id, away_team_id, home_goals, away_goals, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .context("prepare match insert")?;
        for (idx, m) in tables.matches.iter().enumerate() {
            stmt.execute(params![
                (idx + 1) as i64,
                m.home_team_id,
                m.away_team_id,
                m.home_goals.raw(),
                m.away_goals.raw(),
                m.status.as_str(),
            ])
            .with_context(|| format!("insert match #{}", idx + 1))?;
        }
    }
    tx.commit().context("commit league tables")?;
    info!(
        teams = tables.teams.len(),
        matches = tables.matches.len(),
        "saved league tables to sqlite"
    );
    Ok(())
}

pub fn load_tables(conn: &Connection) -> Result<LeagueTables> {
    let mut stmt = conn
        .prepare("SELECT id, name, logo_ref FROM teams ORDER BY seq")
        .context("prepare team query")?;
    let teams = stmt
        .query_map([], |row| {
            Ok(Team {
                id: row.get(0)?,
                name: row.get(1)?,
                logo_ref: row.get(2)?,
            })
        })
        .context("query teams")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("read team rows")?;

    let mut stmt = conn
        .prepare(
            "SELECT home_team_id, away_team_id, home_goals, away_goals, status
             FROM matches ORDER BY match_no",
        )
        .context("prepare match query")?;
    let matches = stmt
        .query_map([], |row| {
            let home_goals: Option<String> = row.get(2)?;
            let away_goals: Option<String> = row.get(3)?;
            let status: String = row.get(4)?;
            Ok(Match {
                home_team_id: row.get(0)?,
                away_team_id: row.get(1)?,
                home_goals: home_goals.as_deref().map(GoalCell::parse).unwrap_or_default(),
                away_goals: away_goals.as_deref().map(GoalCell::parse).unwrap_or_default(),
                status: MatchStatus::parse(&status),
            })
        })
        .context("query matches")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("read match rows")?;

    info!(
        teams = teams.len(),
        matches = matches.len(),
        "loaded league tables from sqlite"
    );
    Ok(LeagueTables { teams, matches })
}

/// Read-only: a missing store is an error and nothing is created on disk.
pub fn load_tables_from_path(path: &Path) -> Result<LeagueTables> {
    if !path.is_file() {
        bail!("sqlite db {} does not exist", path.display());
    }
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("open sqlite db {} read-only", path.display()))?;
    load_tables(&conn)
}
