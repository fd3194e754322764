use std::collections::BTreeSet;

use tracing::warn;

use crate::model::{MilestoneReward, OnboardingProgress, Rank, ReferralStats};
use crate::store::{SessionKey, SessionStore};

/// Referral-count thresholds that unlock a one-time bonus.
pub const MILESTONE_TIERS: [u32; 2] = [50, 100];

/// One-time celebratory transitions surfaced to the caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Celebration {
    RankUp { rank: Rank },
    TierReached { tier: u32 },
    MasteryPulse,
}

/// Request to apply a reward tier against the ledger. The referral code is
/// always taken from the snapshot that triggered the claim, never from an
/// independently cached copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MilestoneClaim {
    pub tier: u32,
    pub referral_code: String,
}

#[derive(Debug, Default)]
pub struct ReconcileOutcome {
    pub celebrations: Vec<Celebration>,
    pub claims: Vec<MilestoneClaim>,
}

/// Single owner of the fetched partner profile.
///
/// Holds the authoritative in-memory snapshot, the durable last-observed
/// rank and referral count (so transition detection survives a restart),
/// and the per-session fulfilled map that keeps milestone claims
/// at-most-once from this client.
#[derive(Debug)]
pub struct ProgressEngine {
    store: SessionStore,
    profile: Option<ReferralStats>,
    recorded_rank: Option<Rank>,
    last_referral_count: Option<u32>,
    fulfilled: BTreeSet<u32>,
    mastery_pulse_shown: bool,
    cached_points: f64,
    cached_revenue: f64,
}

impl ProgressEngine {
    /// Bootstrap from the session store. Everything read here is a cache
    /// that bridges the gap until the first successful fetch.
    pub fn new(store: SessionStore) -> Self {
        let recorded_rank = store.get_json::<Rank>(SessionKey::LastRank);
        let last_referral_count = store.get_json::<u32>(SessionKey::LastReferralCount);
        let mastery_pulse_shown = store
            .get_json::<bool>(SessionKey::MasteryPulseShown)
            .unwrap_or(false);
        let cached_points = store.get_json::<f64>(SessionKey::LastPoints).unwrap_or(0.0);
        let cached_revenue = store.get_json::<f64>(SessionKey::LastRevenue).unwrap_or(0.0);

        Self {
            store,
            profile: None,
            recorded_rank,
            last_referral_count,
            fulfilled: BTreeSet::new(),
            mastery_pulse_shown,
            cached_points,
            cached_revenue,
        }
    }

    /// Replace the in-memory profile wholesale with a freshly fetched one,
    /// detect rank/tier transitions, and return the effects.
    ///
    /// The first observation of a value only records it; celebrations fire
    /// on transitions seen by this engine (or a predecessor that persisted
    /// its last-observed values), never on the initial load alone.
    pub fn reconcile(&mut self, stats: ReferralStats) -> ReconcileOutcome {
        let mut outcome = ReconcileOutcome::default();

        let new_rank = stats.rank();
        match self.recorded_rank {
            Some(prev) if new_rank > prev => {
                outcome.celebrations.push(Celebration::RankUp { rank: new_rank });
                self.record_rank(new_rank);
            }
            Some(_) => {
                // Ranks never demote client-side; keep the recorded one.
            }
            None => self.record_rank(new_rank),
        }

        let count = stats.total_referrals;
        for tier in MILESTONE_TIERS {
            let crossed = self
                .last_referral_count
                .is_some_and(|prev| prev < tier && count >= tier);
            if crossed {
                outcome.celebrations.push(Celebration::TierReached { tier });
            }
        }
        self.last_referral_count = Some(count);
        self.persist(SessionKey::LastReferralCount, &count);

        // The ledger's claimed set is authoritative; fold it in before
        // deciding what is still due.
        self.fulfilled.extend(stats.milestones.iter().copied());

        if stats.referral_code.is_empty() {
            if MILESTONE_TIERS.iter().any(|tier| count >= *tier) {
                warn!("stats response carries no referral code; milestone claims deferred");
            }
        } else {
            for tier in MILESTONE_TIERS {
                if count >= tier && !self.fulfilled.contains(&tier) {
                    outcome.claims.push(MilestoneClaim {
                        tier,
                        referral_code: stats.referral_code.clone(),
                    });
                }
            }
        }

        self.persist_identity(&stats);
        self.cached_points = stats.points;
        self.cached_revenue = stats.revenue;
        self.persist(SessionKey::LastPoints, &stats.points);
        self.persist(SessionKey::LastRevenue, &stats.revenue);

        self.profile = Some(stats);
        outcome
    }

    /// One-time mastery pulse when the purchase flag flips true, gated by a
    /// durable flag so a restart does not replay it.
    pub fn observe_progress(&mut self, progress: &OnboardingProgress) -> Option<Celebration> {
        if !progress.has_purchased_book || self.mastery_pulse_shown {
            return None;
        }

        self.mastery_pulse_shown = true;
        self.persist(SessionKey::MasteryPulseShown, &true);
        Some(Celebration::MasteryPulse)
    }

    /// A claim succeeded: mark the tier fulfilled and merge the returned
    /// total into the displayed revenue immediately. Failed claims are
    /// never marked, so the next poll retries them.
    pub fn mark_fulfilled(&mut self, tier: u32, reward: MilestoneReward) {
        self.fulfilled.insert(tier);

        if let Some(profile) = self.profile.as_mut() {
            profile.revenue = reward.new_total;
            if !profile.milestones.contains(&tier) {
                profile.milestones.push(tier);
            }
        }

        self.cached_revenue = reward.new_total;
        self.persist(SessionKey::LastRevenue, &reward.new_total);
    }

    pub fn profile(&self) -> Option<&ReferralStats> {
        self.profile.as_ref()
    }

    pub fn recorded_rank(&self) -> Option<Rank> {
        self.recorded_rank
    }

    /// Freshest known referral code: the fetched profile wins, the cached
    /// copy only bridges the window before the first successful fetch.
    pub fn referral_code(&self) -> Option<String> {
        if let Some(profile) = &self.profile
            && !profile.referral_code.is_empty()
        {
            return Some(profile.referral_code.clone());
        }

        self.store
            .get_json::<String>(SessionKey::ReferralCode)
            .filter(|code| !code.is_empty())
    }

    /// Displayed point balance. Once a fetch has succeeded the remote value
    /// is used unconditionally; a stale cache can never regress it.
    pub fn display_points(&self) -> f64 {
        self.profile
            .as_ref()
            .map_or(self.cached_points, |profile| profile.points)
    }

    pub fn display_revenue(&self) -> f64 {
        self.profile
            .as_ref()
            .map_or(self.cached_revenue, |profile| profile.revenue)
    }

    fn record_rank(&mut self, rank: Rank) {
        self.recorded_rank = Some(rank);
        self.persist(SessionKey::LastRank, &rank);
    }

    fn persist_identity(&self, stats: &ReferralStats) {
        if !stats.referral_code.is_empty() {
            self.persist(SessionKey::ReferralCode, &stats.referral_code);
        }
        if let Some(name) = stats.account_name.as_deref().filter(|n| !n.is_empty()) {
            self.persist(SessionKey::DisplayName, &name);
        }
        if let Some(city) = stats.city.as_deref().filter(|c| !c.is_empty()) {
            self.persist(SessionKey::City, &city);
        }
    }

    fn persist<T: serde::Serialize>(&self, key: SessionKey, value: &T) {
        if let Err(e) = self.store.set_json(key, value) {
            warn!(?e, session_key = key.suffix(), "failed to persist session value");
        }
    }
}
