use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("home"),
            Self::Away => f.write_str("away"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input tables are inconsistent (duplicate keys, missing values or columns).
    DataIntegrity,
    /// A value is present but not a valid goal count.
    DataFormat,
}

/// Fatal input problems. `match_no` and `line` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    #[error("duplicate team id {id:?}")]
    DuplicateTeamId { id: String },

    #[error("finished match #{match_no} has no {side} goals")]
    MissingGoals { match_no: usize, side: Side },

    #[error("{table} table is missing required column {column:?}")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("finished match #{match_no}: {side} goals {raw:?} is not a number")]
    NonNumericGoals {
        match_no: usize,
        side: Side,
        raw: String,
    },

    #[error("finished match #{match_no}: {side} goals cannot be negative ({value})")]
    NegativeGoals {
        match_no: usize,
        side: Side,
        value: i64,
    },

    #[error("finished match #{match_no}: {side} goals {value} out of range")]
    GoalsOutOfRange {
        match_no: usize,
        side: Side,
        value: i64,
    },

    #[error("{table} line {line} has {found} fields, header has {expected}")]
    RaggedRow {
        table: &'static str,
        line: usize,
        found: usize,
        expected: usize,
    },
}

impl DataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateTeamId { .. } | Self::MissingGoals { .. } | Self::MissingColumn { .. } => {
                ErrorKind::DataIntegrity
            }
            Self::NonNumericGoals { .. }
            | Self::NegativeGoals { .. }
            | Self::GoalsOutOfRange { .. }
            | Self::RaggedRow { .. } => ErrorKind::DataFormat,
        }
    }
}
