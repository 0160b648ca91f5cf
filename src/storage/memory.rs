use super::*;
use crate::ID;
use crate::Unique;
use crate::identity::Member;
use crate::ledger::Ledger;
use crate::tracker::Session;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use tokio::sync::RwLock;

/// In-process storage backend.
///
/// Holds everything in maps behind async locks. `outage` makes every call
/// fail, which is how callers exercise their offline behaviour.
#[derive(Debug, Default)]
pub struct Memory {
    games: RwLock<Vec<Game>>,
    sessions: RwLock<HashMap<ID<Member>, Vec<Session>>>,
    outage: AtomicBool,
    writes: AtomicUsize,
}

impl Memory {
    /// Toggle a simulated storage outage.
    pub fn outage(&self, down: bool) {
        self.outage.store(down, Ordering::Relaxed);
    }
    /// Number of successful write calls so far.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }
    pub async fn games(&self, user: ID<Member>) -> Vec<Game> {
        self.games
            .read()
            .await
            .iter()
            .filter(|g| g.user() == user)
            .cloned()
            .collect()
    }
    fn reachable(&self) -> anyhow::Result<()> {
        if self.outage.load(Ordering::Relaxed) {
            Err(anyhow::anyhow!("storage unavailable"))
        } else {
            Ok(())
        }
    }
    fn wrote(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait::async_trait]
impl GameRepository for Memory {
    async fn fetch_game(&self, user: ID<Member>) -> anyhow::Result<Option<Game>> {
        self.reachable()?;
        let games = self.games.read().await;
        let mine = games.iter().filter(|g| g.user() == user);
        Ok(mine
            .clone()
            .find(|g| g.is_active())
            .or_else(|| mine.max_by_key(|g| g.updated()))
            .cloned())
    }

    async fn save_game(&self, user: ID<Member>, ledger: &Ledger) -> anyhow::Result<ID<Game>> {
        self.reachable()?;
        let mut games = self.games.write().await;
        let id = match games.iter_mut().find(|g| g.user() == user && g.is_active()) {
            Some(game) => {
                game.overwrite(ledger.clone());
                game.id()
            }
            None => {
                let game = Game::new(ID::default(), user, ledger.clone());
                let id = game.id();
                games.push(game);
                id
            }
        };
        self.wrote();
        Ok(id)
    }

    async fn end_game(&self, user: ID<Member>, game: ID<Game>) -> anyhow::Result<bool> {
        self.reachable()?;
        let mut games = self.games.write().await;
        match games.iter_mut().find(|g| g.id() == game && g.user() == user) {
            Some(game) => {
                game.close();
                self.wrote();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait::async_trait]
impl SessionRepository for Memory {
    async fn fetch_sessions(&self, user: ID<Member>) -> anyhow::Result<Vec<Session>> {
        self.reachable()?;
        let mut sessions = self
            .sessions
            .read()
            .await
            .get(&user)
            .cloned()
            .unwrap_or_default();
        sessions.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(sessions)
    }

    async fn save_sessions(&self, user: ID<Member>, sessions: &[Session]) -> anyhow::Result<()> {
        self.reachable()?;
        self.sessions.write().await.insert(user, sessions.to_vec());
        self.wrote();
        Ok(())
    }

    async fn save_session(&self, user: ID<Member>, session: &Session) -> anyhow::Result<()> {
        self.reachable()?;
        let mut all = self.sessions.write().await;
        let mine = all.entry(user).or_default();
        match mine.iter_mut().find(|s| s.id() == session.id()) {
            Some(slot) => *slot = session.clone(),
            None => mine.push(session.clone()),
        }
        self.wrote();
        Ok(())
    }

    async fn update_session(&self, user: ID<Member>, session: &Session) -> anyhow::Result<bool> {
        self.reachable()?;
        let mut all = self.sessions.write().await;
        let slot = all
            .get_mut(&user)
            .and_then(|mine| mine.iter_mut().find(|s| s.id() == session.id()));
        match slot {
            Some(slot) => {
                *slot = session.clone();
                self.wrote();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_session(&self, user: ID<Member>, id: ID<Session>) -> anyhow::Result<bool> {
        self.reachable()?;
        let mut all = self.sessions.write().await;
        let Some(mine) = all.get_mut(&user) else {
            return Ok(false);
        };
        let before = mine.len();
        mine.retain(|s| s.id() != id);
        let removed = mine.len() < before;
        if removed {
            self.wrote();
        }
        Ok(removed)
    }
}
