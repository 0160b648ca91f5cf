use super::*;
use crate::Dollars;
use crate::ID;
use crate::Unique;
use colored::Colorize;

/// Final line for a player who is out of the game.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    id: ID<Player>,
    name: String,
    paid: Dollars,
    cashout: Option<Dollars>,
    net: Option<Dollars>,
}

impl Standing {
    pub fn id(&self) -> ID<Player> {
        self.id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Money the player put in, before any settlement scaling.
    pub fn paid(&self) -> Dollars {
        self.paid
    }
    pub fn cashout(&self) -> Option<Dollars> {
        self.cashout
    }
    /// Profit or loss, known only once the player has cashed out.
    pub fn net(&self) -> Option<Dollars> {
        self.net
    }
}

impl From<&Player> for Standing {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id(),
            name: player.name().to_string(),
            paid: player.paid(),
            cashout: player.cashout(),
            net: player.cashout().map(|_| player.net()),
        }
    }
}

impl std::fmt::Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.cashout, self.net) {
            (Some(cashout), Some(net)) if net >= 0. => {
                let net = format!("+{:.2}", net).green();
                write!(f, "{:<16} cashed ${:.2} {}", self.name, cashout, net)
            }
            (Some(cashout), Some(net)) => {
                let net = format!("{:.2}", net).red();
                write!(f, "{:<16} cashed ${:.2} {}", self.name, cashout, net)
            }
            _ => write!(f, "{:<16} final  ${:.2}", self.name, self.paid),
        }
    }
}
