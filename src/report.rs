use anyhow::{Context, Result};
use serde::Serialize;

use crate::asset::{AssetResolutionWarning, AssetResolver, ImageSource, logo_html};
use crate::fixtures::FixtureRow;
use crate::model::Team;
use crate::standings::StandingsRow;

/// A standings row with its resolved logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecoratedRow {
    #[serde(flatten)]
    pub row: StandingsRow,
    pub logo: ImageSource,
    pub logo_html: String,
}

/// Resolves the logo of every row. Unreadable logos become placeholders and
/// are returned as warnings; ranking is untouched.
pub fn decorate(
    rows: Vec<StandingsRow>,
    resolver: &AssetResolver,
    logo_height: u32,
) -> (Vec<DecoratedRow>, Vec<AssetResolutionWarning>) {
    let mut warnings = Vec::new();
    let decorated = rows
        .into_iter()
        .map(|row| {
            let resolved = resolver.resolve(&row.team.logo_ref);
            if let Some(warning) = resolved.warning {
                warnings.push(warning);
            }
            DecoratedRow {
                logo_html: logo_html(&resolved.source, logo_height),
                logo: resolved.source,
                row,
            }
        })
        .collect();
    (decorated, warnings)
}

/// One club with its current row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClubView {
    pub id: String,
    pub name: String,
    pub logo: ImageSource,
    pub logo_html: String,
    pub standing: Option<StandingsRow>,
}

/// Resolves only this club's logo; the other rows are left undecorated.
pub fn club_view(
    team: &Team,
    rows: &[StandingsRow],
    resolver: &AssetResolver,
    logo_height: u32,
) -> (ClubView, Option<AssetResolutionWarning>) {
    let resolved = resolver.resolve(&team.logo_ref);
    let view = ClubView {
        id: team.id.clone(),
        name: team.name.clone(),
        logo_html: logo_html(&resolved.source, logo_height),
        logo: resolved.source,
        standing: rows.iter().find(|r| r.team.id == team.id).cloned(),
    };
    (view, resolved.warning)
}

pub fn club_text(view: &ClubView) -> String {
    let logo: String = view.logo.as_src().chars().take(80).collect();
    let standing = match &view.standing {
        Some(row) => format!(
            "position {} with {} pts from {} played",
            row.position, row.points, row.played
        ),
        None => "not ranked".to_string(),
    };
    format!("{} (id {})\nlogo: {logo}\n{standing}\n", view.name, view.id)
}

pub fn standings_text(rows: &[DecoratedRow]) -> String {
    let name_width = rows
        .iter()
        .map(|r| r.row.team.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Team".len());

    let mut out = format!(
        "{:>3}  {:<name_width$}  {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}\n",
        "Pos", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );
    for DecoratedRow { row, .. } in rows {
        let gd = if row.goal_difference > 0 {
            format!("+{}", row.goal_difference)
        } else {
            row.goal_difference.to_string()
        };
        out.push_str(&format!(
            "{:>3}  {:<name_width$}  {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}\n",
            row.position,
            row.team.name,
            row.played,
            row.won,
            row.drawn,
            row.lost,
            row.goals_for,
            row.goals_against,
            gd,
            row.points
        ));
    }
    out
}

pub fn fixtures_text(rows: &[FixtureRow]) -> String {
    let home_width = rows.iter().map(|r| r.home.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for row in rows {
        let middle = row.score.as_deref().unwrap_or("vs");
        out.push_str(&format!(
            "{:>3}  {:>home_width$}  {:^5}  {}  [{}]\n",
            row.match_no, row.home, middle, row.away, row.status
        ));
    }
    out
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("serialize report json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Match, Team};
    use crate::standings::compute_standings;

    fn sample() -> Vec<DecoratedRow> {
        let teams = vec![
            Team::new("1", "Alpha", "https://x.test/a.png"),
            Team::new("2", "Beta", ""),
        ];
        let rows = compute_standings(&teams, &[Match::finished("2", "1", 0, 2)]).expect("valid");
        decorate(rows, &AssetResolver::new(), 24).0
    }

    #[test]
    fn text_table_lists_rows_in_rank_order() {
        let text = standings_text(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Pos  Team"));
        assert!(lines[1].contains("Alpha") && lines[1].contains("+2"));
        assert!(lines[2].contains("Beta") && lines[2].contains("-2"));
    }

    #[test]
    fn club_view_resolves_only_its_own_logo() {
        let dir = tempfile::tempdir().expect("temp dir");
        let teams = vec![
            Team::new("1", "Alpha", "logos/alpha.png"),
            Team::new("2", "Beta", "logos/beta.png"),
        ];
        let rows = compute_standings(&teams, &[Match::finished("2", "1", 2, 0)]).expect("valid");
        let resolver = AssetResolver::with_base_dir(dir.path());

        let (view, warning) = club_view(&teams[0], &rows, &resolver, 24);
        let warning = warning.expect("missing logo is reported");
        assert_eq!(warning.logo_ref, "logos/alpha.png");
        assert!(view.logo.is_placeholder());
        assert_eq!(view.standing.as_ref().map(|r| r.position), Some(2));

        let text = club_text(&view);
        assert!(text.starts_with("Alpha (id 1)"));
        assert!(text.contains("position 2 with 0 pts from 1 played"));
    }

    #[test]
    fn club_view_without_row_is_not_ranked() {
        let team = Team::new("9", "Ghost", "https://x.test/g.png");
        let (view, warning) = club_view(&team, &[], &AssetResolver::new(), 32);
        assert!(warning.is_none());
        assert!(view.standing.is_none());
        assert_eq!(view.logo_html, r#"<img src="https://x.test/g.png" height="32">"#);
        assert!(club_text(&view).ends_with("not ranked\n"));
    }

    #[test]
    fn json_flattens_row_fields() {
        let json = to_json(&sample()).expect("json");
        let v: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(v[0]["position"], 1);
        assert_eq!(v[0]["team"]["name"], "Alpha");
        assert_eq!(v[0]["logo"]["kind"], "remote");
        assert_eq!(v[1]["logo"]["kind"], "placeholder");
        assert_eq!(v[1]["logo_html"], "");
    }
}
