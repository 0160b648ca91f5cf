use super::*;
use crate::Dollars;
use crate::ID;
use crate::Unique;

/// One person at the table and the money they have moved in and out.
///
/// Only raw records are kept: the buy-in entries still staked on the
/// table, the money actually paid in, and the running sum of cash-outs.
/// Under proportional settlement the entries shrink as others cash out,
/// so `paid` is what profit is measured against. `settled` is the part of
/// the stake that left the table at this player's own cash-outs.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Player {
    id: ID<Self>,
    name: String,
    buyins: Vec<Dollars>,
    paid: Dollars,
    #[serde(default)]
    settled: Dollars,
    #[serde(default)]
    withdrawn: Dollars,
    #[serde(default)]
    status: Status,
}

impl Player {
    pub fn new(id: ID<Self>, name: String) -> Self {
        Self {
            id,
            name,
            buyins: Vec::new(),
            paid: 0.,
            settled: 0.,
            withdrawn: 0.,
            status: Status::Playing,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn buyins(&self) -> &[Dollars] {
        &self.buyins
    }
    pub fn total(&self) -> Dollars {
        self.buyins.iter().sum()
    }
    /// Everything this player has put in, never scaled.
    pub fn paid(&self) -> Dollars {
        self.paid
    }
    /// Stake that is still in the pot under proportional settlement.
    pub fn stake(&self) -> Dollars {
        (self.total() - self.settled).max(0.)
    }
    pub fn withdrawn(&self) -> Dollars {
        self.withdrawn
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
    pub fn cashout(&self) -> Option<Dollars> {
        match self.status {
            Status::Cashed(amount) => Some(amount),
            _ => None,
        }
    }
    /// Everything taken out minus everything put in.
    pub fn net(&self) -> Dollars {
        self.withdrawn - self.paid
    }
    /// Case-insensitive name comparison used for uniqueness.
    pub fn named(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    pub(super) fn buy(&mut self, amount: Dollars) {
        self.buyins.push(amount);
        self.paid += amount;
    }
    /// Scale the stake still in the pot. Settled money is left alone.
    pub(super) fn scale(&mut self, factor: Dollars) {
        let total = self.total();
        if total > 0. {
            let ratio = (self.settled + self.stake() * factor) / total;
            self.buyins.iter_mut().for_each(|b| *b *= ratio);
        }
    }
    /// Take the whole stake off the table.
    pub(super) fn bank(&mut self) {
        self.settled = self.total();
    }
    pub(super) fn settle(&mut self, amount: Dollars) {
        self.withdrawn += amount;
        self.status = Status::Cashed(amount);
    }
    pub(super) fn toggle(&mut self) {
        self.status = match self.status {
            Status::Playing => Status::Benched,
            Status::Cashed(_) | Status::Benched => Status::Playing,
        };
    }
}

impl Unique for Player {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let buys = self
            .buyins
            .iter()
            .map(|b| format!("${:.2}", b))
            .collect::<Vec<_>>()
            .join(" + ");
        write!(
            f,
            "{:<16} ${:>9.2}  {:<14} {}",
            self.name,
            self.total(),
            self.status.to_string(),
            buys
        )
    }
}
