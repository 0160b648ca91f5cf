use super::Session;
use crate::Dollars;
use crate::Hours;

/// Aggregate statistics over a set of sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub sessions: usize,
    pub hours: Hours,
    pub profit: Dollars,
    pub hourly: Dollars,
}

impl<'a> FromIterator<&'a Session> for Summary {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = &'a Session>,
    {
        let (sessions, hours, profit) = iter
            .into_iter()
            .fold((0, 0., 0.), |(n, h, p), s| (n + 1, h + s.hours(), p + s.profit()));
        Self {
            sessions,
            hours,
            profit,
            hourly: if hours > 0. { profit / hours } else { 0. },
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} sessions  {:.1}h  net {:+.2}  {:+.2}/h",
            self.sessions, self.hours, self.profit, self.hourly
        )
    }
}
