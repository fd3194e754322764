pub mod activity;
pub mod leaderboard;
pub mod payout;
pub mod progress;
pub mod rank;
pub mod stats;

pub use activity::ActivityKind;
pub use leaderboard::LeaderboardEntry;
pub use payout::PayoutDetails;
pub use progress::OnboardingProgress;
pub use rank::Rank;
pub use stats::{MilestoneReward, RefereeProgress, ReferralStats};
