use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use liga_table::asset::AssetResolver;
use liga_table::cache::TableCache;
use liga_table::cli::{self, Command};
use liga_table::config::Config;
use liga_table::report;
use liga_table::{fixtures, standings, store, table};

fn main() -> Result<()> {
    let mut config = Config::load();
    init_tracing();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let args = cli::parse_args(&args)?;
    if args.command == Command::Help {
        println!("{}", cli::USAGE);
        return Ok(());
    }
    args.apply(&mut config);

    if args.command == Command::ImportDb {
        return import_db(&config);
    }

    let mut cache = TableCache::new(config.source());
    let tables = cache.tables()?;
    let resolver = AssetResolver::with_base_dir(&config.data_dir);

    match &args.command {
        Command::Standings => {
            let rows = standings::compute_standings(&tables.teams, &tables.matches)?;
            let (rows, warnings) = report::decorate(rows, &resolver, config.logo_height);
            report_logo_warnings(warnings.len());
            if args.json {
                println!("{}", report::to_json(&rows)?);
            } else {
                print!("{}", report::standings_text(&rows));
            }
        }
        Command::Fixtures => {
            let rows = fixtures::fixture_list(&tables.teams, &tables.matches);
            if args.json {
                println!("{}", report::to_json(&rows)?);
            } else {
                print!("{}", report::fixtures_text(&rows));
            }
        }
        Command::Club(name) => {
            let team = tables
                .find_team_by_name(name)
                .ok_or_else(|| anyhow!("no club named {name:?}"))?;
            let rows = standings::compute_standings(&tables.teams, &tables.matches)?;
            let (view, warning) = report::club_view(team, &rows, &resolver, config.logo_height);
            report_logo_warnings(usize::from(warning.is_some()));
            if args.json {
                println!("{}", report::to_json(&view)?);
            } else {
                print!("{}", report::club_text(&view));
            }
        }
        Command::ImportDb | Command::Help => {}
    }
    Ok(())
}

fn import_db(config: &Config) -> Result<()> {
    let db_path = config
        .db_path
        .as_deref()
        .ok_or_else(|| anyhow!("import-db needs a sqlite path"))?;
    let tables = table::load_tables(&config.teams_path(), &config.matches_path())?;
    let mut conn = store::open_db(db_path)?;
    store::save_tables(&mut conn, &tables)?;
    println!(
        "Imported {} teams and {} matches into {}",
        tables.teams.len(),
        tables.matches.len(),
        db_path.display()
    );
    Ok(())
}

fn report_logo_warnings(count: usize) {
    if count > 0 {
        eprintln!("[WARN] {count} logo(s) could not be loaded");
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
