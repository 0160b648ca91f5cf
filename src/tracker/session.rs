use crate::Dollars;
use crate::Hours;
use crate::ID;
use crate::Unique;
use chrono::NaiveDate;
use colored::Colorize;

/// One recorded stretch of play.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    id: ID<Self>,
    date: NaiveDate,
    hours: Hours,
    profit: Dollars,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

impl Session {
    pub fn new(
        id: ID<Self>,
        date: NaiveDate,
        hours: Hours,
        profit: Dollars,
        notes: Option<String>,
    ) -> Self {
        Self {
            id,
            date,
            hours,
            profit,
            notes: notes
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
        }
    }
    pub fn date(&self) -> NaiveDate {
        self.date
    }
    pub fn hours(&self) -> Hours {
        self.hours
    }
    pub fn profit(&self) -> Dollars {
        self.profit
    }
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
    /// Profit per hour for this session alone. Zero when no time was logged.
    pub fn hourly(&self) -> Dollars {
        if self.hours > 0. {
            self.profit / self.hours
        } else {
            0.
        }
    }
}

impl Unique for Session {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl std::fmt::Display for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let profit = if self.profit >= 0. {
            format!("{:+.2}", self.profit).green()
        } else {
            format!("{:+.2}", self.profit).red()
        };
        write!(
            f,
            "{}  {:>5.1}h  {:>10}  {:>8.2}/h  {}",
            self.date,
            self.hours,
            profit,
            self.hourly(),
            self.notes().unwrap_or_default()
        )
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use crate::storage::*;

    impl Schema for Session {
        fn name() -> &'static str {
            SESSIONS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                SESSIONS,
                " (
                    id          UUID PRIMARY KEY,
                    user_id     UUID NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    date        DATE NOT NULL,
                    hours       DOUBLE PRECISION NOT NULL CHECK (hours > 0),
                    profit      DOUBLE PRECISION NOT NULL,
                    notes       TEXT,
                    created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_sessions_user ON ",
                SESSIONS,
                " (user_id, date DESC);"
            )
        }
        fn truncates() -> &'static str {
            const_format::concatcp!("TRUNCATE TABLE ", SESSIONS, ";")
        }
    }
}
