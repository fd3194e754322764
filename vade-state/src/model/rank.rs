use serde::{Deserialize, Serialize};

/// Souls guided (referees who completed the purchase milestone) required
/// for each rank. Ranks never demote client-side once attained.
pub const SAGE_SOULS_GUIDED: u32 = 10;
pub const MASTER_SOULS_GUIDED: u32 = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Seeker,
    Sage,
    Master,
}

impl Rank {
    /// Floor rank implied by a souls-guided count.
    pub fn for_souls_guided(souls_guided: u32) -> Self {
        if souls_guided >= MASTER_SOULS_GUIDED {
            Rank::Master
        } else if souls_guided >= SAGE_SOULS_GUIDED {
            Rank::Sage
        } else {
            Rank::Seeker
        }
    }

    /// Parse the backend's rank string, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "seeker" => Some(Rank::Seeker),
            "sage" => Some(Rank::Sage),
            "master" => Some(Rank::Master),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Seeker => "Seeker",
            Rank::Sage => "Sage",
            Rank::Master => "Master",
        }
    }

    /// Rank-specific copy for the one-time rank-up celebration.
    pub fn celebration_copy(self) -> &'static str {
        match self {
            Rank::Seeker => "Welcome, Seeker. Your journey starts here.",
            Rank::Sage => "You've reached the rank of Sage! Helping lead the community.",
            Rank::Master => "Mastery achieved! The community salutes its newest Master.",
        }
    }
}
