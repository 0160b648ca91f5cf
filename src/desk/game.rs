use super::*;
use crate::Dollars;
use crate::ID;
use crate::Unique;
use crate::autosave::Autosave;
use crate::autosave::Health;
use crate::autosave::Sink;
use crate::config::Config;
use crate::ledger::Ledger;
use crate::ledger::Player;
use crate::ledger::Policy;
use crate::ledger::Rejection;
use crate::storage::GameRepository;
use std::sync::Arc;
use tokio::sync::watch;

/// Writes ledger snapshots as the member's active game.
struct LedgerSink<R> {
    repo: Arc<R>,
    user: ID<Member>,
}

#[async_trait::async_trait]
impl<R> Sink<Ledger> for LedgerSink<R>
where
    R: GameRepository,
{
    async fn store(&self, snapshot: Ledger) -> anyhow::Result<()> {
        let game = self.repo.save_game(self.user, &snapshot).await?;
        log::debug!("[desk] saved game {} (pot {:.2})", game, snapshot.pot());
        Ok(())
    }
}

/// The signed-in member's running cash game.
pub struct GameDesk<R>
where
    R: GameRepository,
{
    repo: Arc<R>,
    member: Member,
    policy: Policy,
    ledger: Ledger,
    autosave: Autosave<Ledger>,
}

impl<R> GameDesk<R>
where
    R: GameRepository,
{
    /// Load the member's active or most recent game. A failed load starts
    /// an empty ledger instead of refusing to open.
    pub async fn open<A>(repo: Arc<R>, account: &A, config: &Config) -> anyhow::Result<Self>
    where
        A: Account + ?Sized,
    {
        let member = signed_in(account).await?;
        let ledger = match repo.fetch_game(member.id()).await {
            Ok(Some(game)) => {
                log::info!("[desk] loaded game {} for {}", game.id(), member);
                game.into_ledger()
            }
            Ok(None) => {
                log::info!("[desk] no saved game for {}, starting fresh", member);
                Ledger::new(config.policy)
            }
            Err(e) => {
                log::warn!("[desk] could not load game for {}: {}", member, e);
                Ledger::new(config.policy)
            }
        };
        let sink = LedgerSink {
            repo: repo.clone(),
            user: member.id(),
        };
        Ok(Self {
            autosave: Autosave::spawn(sink, config.debounce),
            policy: config.policy,
            repo,
            member,
            ledger,
        })
    }

    pub fn member(&self) -> &Member {
        &self.member
    }
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }
    pub fn pot(&self) -> Dollars {
        self.ledger.pot()
    }
    pub fn health(&self) -> Health {
        self.autosave.health()
    }
    pub fn status(&self) -> watch::Receiver<Health> {
        self.autosave.status()
    }

    pub fn add(&mut self, name: &str) -> Result<ID<Player>, Rejection> {
        let id = self.ledger.add(name)?;
        self.touch();
        Ok(id)
    }
    pub fn buyin(&mut self, id: ID<Player>, amount: Dollars) -> Result<(), Rejection> {
        self.ledger.buyin(id, amount)?;
        self.touch();
        Ok(())
    }
    pub fn cashout(&mut self, id: ID<Player>, amount: Dollars) -> Result<(), Rejection> {
        self.ledger.cashout(id, amount)?;
        self.touch();
        Ok(())
    }
    pub fn remove(&mut self, id: ID<Player>) -> Option<Player> {
        let removed = self.ledger.remove(id)?;
        self.touch();
        Some(removed)
    }
    pub fn toggle(&mut self, id: ID<Player>) -> Result<bool, Rejection> {
        let active = self.ledger.toggle(id)?;
        self.touch();
        Ok(active)
    }

    /// Write the current ledger now instead of waiting out the debounce.
    pub async fn save(&self) -> anyhow::Result<()> {
        self.autosave.save(self.ledger.clone()).await
    }

    /// Close the game in storage and start over with an empty ledger.
    /// On failure the current ledger is kept.
    pub async fn end(&mut self) -> anyhow::Result<()> {
        self.save().await?;
        let user = self.member.id();
        if let Some(game) = self.repo.fetch_game(user).await?.filter(|g| g.is_active()) {
            self.repo.end_game(user, game.id()).await?;
            log::info!("[desk] ended game {} at pot {:.2}", game.id(), game.pot());
        }
        self.ledger = Ledger::new(self.policy);
        Ok(())
    }

    fn touch(&self) {
        self.autosave.stage(self.ledger.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Memory;
    use std::time::Duration;

    fn member() -> Member {
        Member::new(ID::default(), "hero".into(), "hero@home.game".into())
    }

    async fn desk(repo: &Arc<Memory>, member: &Member) -> GameDesk<Memory> {
        GameDesk::open(repo.clone(), member, &Config::default())
            .await
            .unwrap()
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_secs(5)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn signed_out_cannot_open() {
        let repo = Arc::new(Memory::default());
        let nobody = None::<Member>;
        assert!(GameDesk::open(repo, &nobody, &Config::default()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn edits_are_coalesced_into_one_write() {
        let repo = Arc::new(Memory::default());
        let member = member();
        let mut desk = desk(&repo, &member).await;
        let alice = desk.add("Alice").unwrap();
        let bob = desk.add("Bob").unwrap();
        desk.buyin(alice, 20.).unwrap();
        desk.buyin(bob, 10.).unwrap();
        assert_eq!(repo.writes(), 0);
        settle().await;
        assert_eq!(repo.writes(), 1);
        assert_eq!(desk.health(), Health::Saved);
        let games = repo.games(member.id()).await;
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].ledger(), desk.ledger());
        assert_eq!(games[0].pot(), 30.);
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_edits_are_not_saved() {
        let repo = Arc::new(Memory::default());
        let mut desk = desk(&repo, &member()).await;
        assert!(desk.add("  ").is_err());
        assert!(desk.cashout(ID::default(), 5.).is_err());
        assert!(desk.remove(ID::default()).is_none());
        settle().await;
        assert_eq!(repo.writes(), 0);
        assert_eq!(desk.health(), Health::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn reopening_resumes_the_saved_game() {
        let repo = Arc::new(Memory::default());
        let member = member();
        let mut first = desk(&repo, &member).await;
        let alice = first.add("Alice").unwrap();
        first.buyin(alice, 40.).unwrap();
        first.save().await.unwrap();
        let second = desk(&repo, &member).await;
        assert_eq!(second.ledger(), first.ledger());
        assert_eq!(second.pot(), 40.);
    }

    #[tokio::test(start_paused = true)]
    async fn outage_keeps_local_state() {
        let repo = Arc::new(Memory::default());
        let mut desk = desk(&repo, &member()).await;
        repo.outage(true);
        let alice = desk.add("Alice").unwrap();
        desk.buyin(alice, 25.).unwrap();
        settle().await;
        assert!(desk.health().is_failed());
        assert_eq!(desk.pot(), 25.);
        desk.buyin(alice, 5.).unwrap();
        assert_eq!(desk.pot(), 30.);
        repo.outage(false);
        desk.save().await.unwrap();
        assert_eq!(desk.health(), Health::Saved);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_load_starts_fresh() {
        let repo = Arc::new(Memory::default());
        repo.outage(true);
        let desk = desk(&repo, &member()).await;
        assert!(desk.ledger().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn end_closes_and_resets() {
        let repo = Arc::new(Memory::default());
        let member = member();
        let config = Config {
            policy: Policy::Proportional,
            ..Config::default()
        };
        let mut desk = GameDesk::open(repo.clone(), &member, &config).await.unwrap();
        let alice = desk.add("Alice").unwrap();
        desk.buyin(alice, 15.).unwrap();
        desk.end().await.unwrap();
        assert!(desk.ledger().is_empty());
        assert_eq!(desk.ledger().policy(), Policy::Proportional);
        let games = repo.games(member.id()).await;
        assert_eq!(games.len(), 1);
        assert!(!games[0].is_active());
        assert_eq!(games[0].pot(), 15.);
    }

    #[tokio::test(start_paused = true)]
    async fn end_fails_without_storage() {
        let repo = Arc::new(Memory::default());
        let mut desk = desk(&repo, &member()).await;
        desk.add("Alice").unwrap();
        repo.outage(true);
        assert!(desk.end().await.is_err());
        assert_eq!(desk.ledger().len(), 1);
    }
}
