use crate::Dollars;

/// Where a player stands in the game.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "lowercase")]
pub enum Status {
    /// Seated with chips in play.
    Playing,
    /// Left the game by cashing out this amount.
    Cashed(Dollars),
    /// Stepped away without cashing out.
    Benched,
}

impl Status {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::Playing
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Playing => write!(f, "playing"),
            Self::Cashed(amount) => write!(f, "cashed ${:.2}", amount),
            Self::Benched => write!(f, "out"),
        }
    }
}
