use super::*;
use crate::Dollars;
use crate::Hours;
use crate::ID;
use crate::Unique;
use chrono::NaiveDate;

/// A user's sessions, kept newest-first by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tracker {
    sessions: Vec<Session>,
}

impl From<Vec<Session>> for Tracker {
    fn from(mut sessions: Vec<Session>) -> Self {
        sessions.sort_by(|a, b| b.date().cmp(&a.date()));
        Self { sessions }
    }
}

impl Tracker {
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }
    pub fn get(&self, id: ID<Session>) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id() == id)
    }
    pub fn len(&self) -> usize {
        self.sessions.len()
    }
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
    /// Totals recomputed from the current sessions.
    pub fn summary(&self) -> Summary {
        self.sessions.iter().collect()
    }

    /// Record a session played today (local date).
    pub fn add(
        &mut self,
        hours: Hours,
        profit: Dollars,
        notes: Option<&str>,
    ) -> Result<ID<Session>, Rejection> {
        self.add_on(chrono::Local::now().date_naive(), hours, profit, notes)
    }

    /// Record a session played on a given date.
    pub fn add_on(
        &mut self,
        date: NaiveDate,
        hours: Hours,
        profit: Dollars,
        notes: Option<&str>,
    ) -> Result<ID<Session>, Rejection> {
        Self::validate(hours, profit)?;
        let session = Session::new(ID::default(), date, hours, profit, notes.map(String::from));
        let id = session.id();
        let index = self
            .sessions
            .iter()
            .position(|s| s.date() <= date)
            .unwrap_or(self.sessions.len());
        log::debug!("[tracker] recording {:.1}h {:+.2} on {}", hours, profit, date);
        self.sessions.insert(index, session);
        Ok(id)
    }

    /// Correct the numbers of an existing session. The date is kept.
    pub fn update(
        &mut self,
        id: ID<Session>,
        hours: Hours,
        profit: Dollars,
        notes: Option<&str>,
    ) -> Result<(), Rejection> {
        Self::validate(hours, profit)?;
        let slot = self
            .sessions
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or(Rejection::UnknownSession(id))?;
        *slot = Session::new(id, slot.date(), hours, profit, notes.map(String::from));
        log::debug!("[tracker] updated session {}", id);
        Ok(())
    }

    /// Delete a session once the gate agrees. Returns whether anything was
    /// removed; unknown ids and declined prompts change nothing.
    pub fn delete<C>(&mut self, id: ID<Session>, gate: &C) -> bool
    where
        C: Confirm + ?Sized,
    {
        let Some(index) = self.sessions.iter().position(|s| s.id() == id) else {
            return false;
        };
        if !gate.confirm("Are you sure you want to delete this session?") {
            return false;
        }
        self.sessions.remove(index);
        log::debug!("[tracker] deleted session {}", id);
        true
    }

    fn validate(hours: Hours, profit: Dollars) -> Result<(), Rejection> {
        if !(hours.is_finite() && hours > 0.) {
            return Err(Rejection::InvalidHours(hours));
        }
        if !profit.is_finite() {
            return Err(Rejection::InvalidProfit(profit));
        }
        Ok(())
    }
}
