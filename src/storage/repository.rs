use super::*;
use crate::ID;
use crate::identity::Member;
use crate::ledger::Ledger;
use crate::tracker::Session;

/// Storage for a member's ledgers.
#[async_trait::async_trait]
pub trait GameRepository: Send + Sync + 'static {
    /// The member's active game, else the most recently updated one.
    async fn fetch_game(&self, user: ID<Member>) -> anyhow::Result<Option<Game>>;
    /// Upsert the member's single active game with this ledger.
    async fn save_game(&self, user: ID<Member>, ledger: &Ledger) -> anyhow::Result<ID<Game>>;
    /// Mark a game finished. Returns false if it does not belong to the member.
    async fn end_game(&self, user: ID<Member>, game: ID<Game>) -> anyhow::Result<bool>;
}

/// Storage for a member's sessions.
#[async_trait::async_trait]
pub trait SessionRepository: Send + Sync + 'static {
    /// All of the member's sessions, newest first.
    async fn fetch_sessions(&self, user: ID<Member>) -> anyhow::Result<Vec<Session>>;
    /// Replace everything stored for the member with these sessions.
    async fn save_sessions(&self, user: ID<Member>, sessions: &[Session]) -> anyhow::Result<()>;
    async fn save_session(&self, user: ID<Member>, session: &Session) -> anyhow::Result<()>;
    async fn update_session(&self, user: ID<Member>, session: &Session) -> anyhow::Result<bool>;
    async fn delete_session(&self, user: ID<Member>, id: ID<Session>) -> anyhow::Result<bool>;
}
