use crate::Dollars;
use crate::ID;
use crate::Unique;
use crate::identity::Member;
use crate::ledger::Ledger;
use chrono::DateTime;
use chrono::Utc;

/// A ledger as it lives in storage: owned by one member, and either the
/// member's current game or a finished one.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Game {
    id: ID<Self>,
    user: ID<Member>,
    ledger: Ledger,
    active: bool,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl Game {
    pub fn new(id: ID<Self>, user: ID<Member>, ledger: Ledger) -> Self {
        let now = Utc::now();
        Self {
            id,
            user,
            ledger,
            active: true,
            created: now,
            updated: now,
        }
    }
    pub fn hydrate(
        id: ID<Self>,
        user: ID<Member>,
        ledger: Ledger,
        active: bool,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user,
            ledger,
            active,
            created,
            updated,
        }
    }
    pub fn user(&self) -> ID<Member> {
        self.user
    }
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    pub fn into_ledger(self) -> Ledger {
        self.ledger
    }
    pub fn pot(&self) -> Dollars {
        self.ledger.pot()
    }
    pub fn is_active(&self) -> bool {
        self.active
    }
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }
    pub(super) fn overwrite(&mut self, ledger: Ledger) {
        self.ledger = ledger;
        self.updated = Utc::now();
    }
    pub(super) fn close(&mut self) {
        self.active = false;
        self.updated = Utc::now();
    }
}

impl Unique for Game {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use crate::storage::*;

    impl Schema for Game {
        fn name() -> &'static str {
            GAMES
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                GAMES,
                " (
                    id          UUID PRIMARY KEY,
                    user_id     UUID NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    players     JSONB NOT NULL DEFAULT '[]',
                    residue     DOUBLE PRECISION NOT NULL DEFAULT 0,
                    policy      VARCHAR(16) NOT NULL DEFAULT 'simple',
                    pot         DOUBLE PRECISION NOT NULL DEFAULT 0,
                    is_active   BOOLEAN NOT NULL DEFAULT TRUE,
                    created_at  TIMESTAMPTZ NOT NULL DEFAULT now(),
                    updated_at  TIMESTAMPTZ NOT NULL DEFAULT now()
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_games_active ON ",
                GAMES,
                " (user_id) WHERE is_active;
                 CREATE INDEX IF NOT EXISTS idx_games_updated ON ",
                GAMES,
                " (user_id, updated_at DESC);"
            )
        }
        fn truncates() -> &'static str {
            const_format::concatcp!("TRUNCATE TABLE ", GAMES, ";")
        }
    }
}
