use serde::{Deserialize, Serialize};

/// One row of the community leaderboard feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub lifetime_earnings: f64,
    #[serde(default)]
    pub impact: String,
    #[serde(default)]
    pub email: String,
}

impl LeaderboardEntry {
    /// Match a leaderboard row against the locally cached login email.
    pub fn is_account(&self, email: &str) -> bool {
        let wanted = email.trim().to_ascii_lowercase();
        !wanted.is_empty() && self.email.trim().to_ascii_lowercase() == wanted
    }
}

#[cfg(test)]
mod tests {
    use super::LeaderboardEntry;

    #[test]
    fn email_matching_normalizes_case_and_whitespace() {
        let entry = LeaderboardEntry {
            email: " Adebayo@Example.com ".to_owned(),
            ..LeaderboardEntry::default()
        };

        assert!(entry.is_account("adebayo@example.com"));
        assert!(!entry.is_account("other@example.com"));
        assert!(!entry.is_account(""));
    }
}
