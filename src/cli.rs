use std::path::PathBuf;

use anyhow::{Result, anyhow, bail};

use crate::config::{Config, clamp_logo_height};

pub const USAGE: &str = "\
usage: liga_table [standings|fixtures|club <NAME>|import-db] [options]

options:
  --data-dir <DIR>      directory holding teams.csv and matches.csv
  --teams <PATH>        teams table (csv)
  --matches <PATH>      matches table (csv)
  --db <PATH>           sqlite store; read from it, or write to it with import-db
  --logo-height <PX>    logo height for the rendered <img> fragment
  --json                print json instead of a text table";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Standings,
    Fixtures,
    Club(String),
    /// Copy the CSV tables into the `--db` store.
    ImportDb,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub json: bool,
    pub data_dir: Option<PathBuf>,
    pub teams: Option<PathBuf>,
    pub matches: Option<PathBuf>,
    pub db: Option<PathBuf>,
    pub logo_height: Option<u32>,
}

impl CliArgs {
    /// Flags win over the environment.
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(path) = &self.teams {
            config.teams_csv = Some(path.clone());
        }
        if let Some(path) = &self.matches {
            config.matches_csv = Some(path.clone());
        }
        if let Some(path) = &self.db {
            config.db_path = Some(path.clone());
        }
        if let Some(height) = self.logo_height {
            config.logo_height = clamp_logo_height(height);
        }
    }
}

pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut out = CliArgs {
        command: Command::Standings,
        json: false,
        data_dir: None,
        teams: None,
        matches: None,
        db: None,
        logo_height: None,
    };
    let mut positional = Vec::new();

    let mut idx = 0;
    while idx < args.len() {
        let arg = args[idx].as_str();
        idx += 1;
        if arg == "--json" {
            out.json = true;
            continue;
        }
        if arg == "-h" || arg == "--help" {
            out.command = Command::Help;
            return Ok(out);
        }
        let Some(flag) = arg.strip_prefix("--") else {
            positional.push(arg.to_string());
            continue;
        };

        let (name, value) = match flag.split_once('=') {
            Some((name, value)) => (name, value.to_string()),
            None => {
                let value = args
                    .get(idx)
                    .ok_or_else(|| anyhow!("--{flag} needs a value"))?;
                idx += 1;
                (flag, value.clone())
            }
        };
        let value = value.trim();
        if value.is_empty() {
            bail!("--{name} needs a value");
        }
        match name {
            "data-dir" => out.data_dir = Some(PathBuf::from(value)),
            "teams" => out.teams = Some(PathBuf::from(value)),
            "matches" => out.matches = Some(PathBuf::from(value)),
            "db" => out.db = Some(PathBuf::from(value)),
            "logo-height" => {
                let height = value
                    .parse::<u32>()
                    .map_err(|_| anyhow!("--logo-height expects a number, got {value:?}"))?;
                out.logo_height = Some(height);
            }
            _ => bail!("unknown option --{name}"),
        }
    }

    let mut positional = positional.into_iter();
    if let Some(cmd) = positional.next() {
        out.command = match cmd.as_str() {
            "standings" | "table" => Command::Standings,
            "fixtures" | "fixture" => Command::Fixtures,
            "club" => {
                let name = positional.by_ref().collect::<Vec<_>>().join(" ");
                if name.trim().is_empty() {
                    bail!("club needs a team name");
                }
                Command::Club(name)
            }
            "import-db" => Command::ImportDb,
            other => bail!("unknown command {other:?}"),
        };
    }
    if let Some(extra) = positional.next() {
        bail!("unexpected argument {extra:?}");
    }
    if out.command == Command::ImportDb && out.db.is_none() {
        bail!("import-db needs --db <PATH>");
    }
    Ok(out)
}
