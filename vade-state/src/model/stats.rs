use serde::{Deserialize, Serialize};

use crate::model::rank::Rank;

/// Per-referee milestone flags from the stats feed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefereeProgress {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub registered: bool,
    #[serde(default)]
    pub distributor: bool,
    #[serde(default)]
    pub purchased: bool,
}

/// Authoritative partner profile returned by `GET /referral/stats`.
///
/// The backend ledger is the sole source of truth; this struct is replaced
/// wholesale on every successful fetch, never merged field by field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralStats {
    #[serde(default)]
    pub referral_code: String,
    #[serde(default)]
    pub points: f64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub lifetime_earnings: f64,
    #[serde(default)]
    pub total_referrals: u32,
    #[serde(default)]
    pub pending_points: f64,
    #[serde(default)]
    pub network_spread_count: u32,
    /// Tier identifiers the ledger already credited. Seeds the local
    /// fulfilled map so a fresh session never re-claims them.
    #[serde(default)]
    pub milestones: Vec<u32>,
    #[serde(default)]
    pub referee_progress: Vec<RefereeProgress>,
    #[serde(default)]
    pub legacy_rank: Option<String>,
    #[serde(default)]
    pub souls_guided: u32,
    #[serde(default)]
    pub mastery_date: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ReferralStats {
    /// Effective rank: whichever is higher of the backend's stated rank and
    /// the floor implied by the souls-guided count.
    pub fn rank(&self) -> Rank {
        let stated = self
            .legacy_rank
            .as_deref()
            .and_then(Rank::parse)
            .unwrap_or(Rank::Seeker);

        stated.max(Rank::for_souls_guided(self.souls_guided))
    }
}

/// Response of `POST /referral/apply-milestone`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MilestoneReward {
    #[serde(default)]
    pub bonus: f64,
    #[serde(default)]
    pub new_total: f64,
}

#[cfg(test)]
mod tests {
    use super::ReferralStats;
    use crate::model::rank::Rank;

    #[test]
    fn rank_prefers_higher_of_stated_and_derived() {
        let mut stats = ReferralStats {
            legacy_rank: Some("Sage".to_owned()),
            souls_guided: 2,
            ..ReferralStats::default()
        };
        assert_eq!(stats.rank(), Rank::Sage);

        stats.souls_guided = 30;
        assert_eq!(stats.rank(), Rank::Master);

        stats.legacy_rank = None;
        stats.souls_guided = 12;
        assert_eq!(stats.rank(), Rank::Sage);
    }

    #[test]
    fn deserializes_partial_payloads() {
        let stats: ReferralStats = serde_json::from_str(
            r#"{"referralCode":"ADEBAYO2026","points":12.5,"totalReferrals":51,"milestones":[50],"legacyRank":"Sage","soulsGuided":11}"#,
        )
        .unwrap();

        assert_eq!(stats.referral_code, "ADEBAYO2026");
        assert_eq!(stats.points, 12.5);
        assert_eq!(stats.total_referrals, 51);
        assert_eq!(stats.milestones, vec![50]);
        assert_eq!(stats.rank(), Rank::Sage);
        assert_eq!(stats.revenue, 0.0);
        assert!(stats.referee_progress.is_empty());
    }
}
