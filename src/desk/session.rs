use super::*;
use crate::Dollars;
use crate::Hours;
use crate::ID;
use crate::TRACKER_DEBOUNCE;
use crate::Unique;
use crate::autosave::Autosave;
use crate::autosave::Health;
use crate::autosave::Sink;
use crate::storage::SessionRepository;
use crate::tracker::Confirm;
use crate::tracker::Rejection;
use crate::tracker::Session;
use crate::tracker::Summary;
use crate::tracker::Tracker;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::watch;

/// Replaces everything stored for the member with the snapshot.
struct SessionSink<R> {
    repo: Arc<R>,
    user: ID<Member>,
}

#[async_trait::async_trait]
impl<R> Sink<Vec<Session>> for SessionSink<R>
where
    R: SessionRepository,
{
    async fn store(&self, snapshot: Vec<Session>) -> anyhow::Result<()> {
        self.repo.save_sessions(self.user, &snapshot).await?;
        log::debug!("[desk] saved {} sessions", snapshot.len());
        Ok(())
    }
}

/// The signed-in member's session history.
pub struct SessionDesk<R>
where
    R: SessionRepository,
{
    member: Member,
    tracker: Tracker,
    autosave: Autosave<Vec<Session>>,
    repo: Arc<R>,
}

impl<R> SessionDesk<R>
where
    R: SessionRepository,
{
    pub async fn open<A>(repo: Arc<R>, account: &A) -> anyhow::Result<Self>
    where
        A: Account + ?Sized,
    {
        let member = signed_in(account).await?;
        let tracker = match repo.fetch_sessions(member.id()).await {
            Ok(sessions) => {
                log::info!("[desk] loaded {} sessions for {}", sessions.len(), member);
                Tracker::from(sessions)
            }
            Err(e) => {
                log::warn!("[desk] could not load sessions for {}: {}", member, e);
                Tracker::default()
            }
        };
        let sink = SessionSink {
            repo: repo.clone(),
            user: member.id(),
        };
        Ok(Self {
            autosave: Autosave::spawn(sink, TRACKER_DEBOUNCE),
            repo,
            member,
            tracker,
        })
    }

    pub fn member(&self) -> &Member {
        &self.member
    }
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }
    pub fn summary(&self) -> Summary {
        self.tracker.summary()
    }
    pub fn health(&self) -> Health {
        self.autosave.health()
    }
    pub fn status(&self) -> watch::Receiver<Health> {
        self.autosave.status()
    }

    pub fn add(
        &mut self,
        hours: Hours,
        profit: Dollars,
        notes: Option<&str>,
    ) -> Result<ID<Session>, Rejection> {
        let id = self.tracker.add(hours, profit, notes)?;
        self.touch();
        Ok(id)
    }
    pub fn add_on(
        &mut self,
        date: NaiveDate,
        hours: Hours,
        profit: Dollars,
        notes: Option<&str>,
    ) -> Result<ID<Session>, Rejection> {
        let id = self.tracker.add_on(date, hours, profit, notes)?;
        self.touch();
        Ok(id)
    }
    pub fn update(
        &mut self,
        id: ID<Session>,
        hours: Hours,
        profit: Dollars,
        notes: Option<&str>,
    ) -> Result<(), Rejection> {
        self.tracker.update(id, hours, profit, notes)?;
        self.touch();
        Ok(())
    }
    pub fn delete<C>(&mut self, id: ID<Session>, gate: &C) -> bool
    where
        C: Confirm + ?Sized,
    {
        let deleted = self.tracker.delete(id, gate);
        if deleted {
            self.touch();
        }
        deleted
    }

    pub async fn save(&self) -> anyhow::Result<()> {
        self.autosave.save(self.tracker.sessions().to_vec()).await
    }

    /// Re-read what storage holds, without touching local state.
    pub async fn stored(&self) -> anyhow::Result<Vec<Session>> {
        self.repo.fetch_sessions(self.member.id()).await
    }

    fn touch(&self) {
        self.autosave.stage(self.tracker.sessions().to_vec());
    }
}
