/// Outcome of the most recent persistence attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Health {
    /// Nothing has been written yet.
    #[default]
    Idle,
    /// Local edits are waiting for the quiet period to end.
    Pending,
    /// The latest snapshot reached storage.
    Saved,
    /// The latest write failed; local state is still authoritative.
    Failed(String),
}

impl Health {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Pending => write!(f, "unsaved changes"),
            Self::Saved => write!(f, "saved"),
            Self::Failed(e) => write!(f, "save failed: {}", e),
        }
    }
}
