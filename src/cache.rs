use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::model::LeagueTables;
use crate::{store, table};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSource {
    Csv { teams: PathBuf, matches: PathBuf },
    Sqlite(PathBuf),
}

impl TableSource {
    pub fn load(&self) -> Result<LeagueTables> {
        match self {
            Self::Csv { teams, matches } => table::load_tables(teams, matches),
            Self::Sqlite(path) => store::load_tables_from_path(path),
        }
    }
}

/// Loaded tables held by the caller until [`TableCache::invalidate`].
#[derive(Debug)]
pub struct TableCache {
    source: TableSource,
    tables: Option<LeagueTables>,
    loads: usize,
}

impl TableCache {
    pub fn new(source: TableSource) -> Self {
        Self {
            source,
            tables: None,
            loads: 0,
        }
    }

    pub fn source(&self) -> &TableSource {
        &self.source
    }

    /// Loads on first use; later calls return the held copy.
    /// A failed load leaves the cache empty.
    pub fn tables(&mut self) -> Result<&LeagueTables> {
        let tables = match self.tables.take() {
            Some(tables) => tables,
            None => {
                let tables = self.source.load()?;
                self.loads += 1;
                info!(loads = self.loads, "table cache filled");
                tables
            }
        };
        let held: &LeagueTables = self.tables.insert(tables);
        Ok(held)
    }

    pub fn invalidate(&mut self) {
        if self.tables.take().is_some() {
            info!("table cache invalidated");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.tables.is_some()
    }

    pub fn load_count(&self) -> usize {
        self.loads
    }
}
