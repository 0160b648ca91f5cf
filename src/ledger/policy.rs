/// How a cash-out is reconciled against the rest of the table.
///
/// Fixed for the lifetime of a game. The two policies produce different
/// ledgers from the same inputs and are never mixed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// The pot shrinks by the cash-out; every other stake is left alone.
    #[default]
    Simple,
    /// Every stake in the pot is scaled down so that together they
    /// absorb the cash-out in proportion to their size.
    Proportional,
}

impl std::str::FromStr for Policy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "proportional" => Ok(Self::Proportional),
            other => Err(format!("unknown settlement policy: {}", other)),
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Simple => write!(f, "simple"),
            Self::Proportional => write!(f, "proportional"),
        }
    }
}
