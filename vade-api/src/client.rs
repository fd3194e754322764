use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::Context as _;
use serde::Serialize;
use serde::de::DeserializeOwned;

use vade_state::model::{
    ActivityKind, LeaderboardEntry, MilestoneReward, OnboardingProgress, PayoutDetails,
    ReferralStats,
};
use vade_utils::time::now_unix_secs;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Marker error for 401/403 responses so callers can distinguish an expired
/// session from ordinary connectivity failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unauthorized;

impl fmt::Display for Unauthorized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("backend rejected the session token")
    }
}

impl std::error::Error for Unauthorized {}

/// HTTP client for the publisher backend's referral endpoints.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build http client: {e}"))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token: token.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty()),
        })
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let base_url = env::var("VADE_BACKEND_URL").context("VADE_BACKEND_URL is not set")?;
        let token = env::var("VADE_API_TOKEN").ok();

        Self::new(base_url, token)
    }

    pub async fn fetch_progress(&self) -> anyhow::Result<OnboardingProgress> {
        self.get_json("progress").await
    }

    pub async fn fetch_stats(&self) -> anyhow::Result<ReferralStats> {
        self.get_json("stats").await
    }

    pub async fn fetch_leaderboard(&self) -> anyhow::Result<Vec<LeaderboardEntry>> {
        self.get_json("leaderboard").await
    }

    /// Apply a reward tier. Safe to call at most once per tier per session
    /// from this client; the ledger is idempotent on repeats.
    pub async fn apply_milestone(
        &self,
        ref_code: &str,
        tier: u32,
    ) -> anyhow::Result<MilestoneReward> {
        self.post_json(
            "apply-milestone",
            &serde_json::json!({ "refCode": ref_code, "tier": tier }),
        )
        .await
    }

    /// Forward one action event to the ledger. The point value is the
    /// display-only table value; the backend recomputes the actual credit.
    pub async fn log_activity(
        &self,
        kind: ActivityKind,
        ref_code: &str,
        details: serde_json::Value,
    ) -> anyhow::Result<()> {
        self.post_ack(
            "log-activity",
            &serde_json::json!({
                "type": kind.wire_name(),
                "refCode": ref_code,
                "points": kind.display_points(),
                "timestamp": now_unix_secs(),
                "details": details,
            }),
        )
        .await
    }

    /// Browsing events go to their own endpoint for fraud screening.
    pub async fn track_visit(
        &self,
        ref_code: &str,
        ip: &str,
        user_agent: &str,
    ) -> anyhow::Result<()> {
        self.post_ack(
            "track-visit",
            &serde_json::json!({ "refCode": ref_code, "ip": ip, "userAgent": user_agent }),
        )
        .await
    }

    pub async fn credit_purchase(&self, ref_code: &str) -> anyhow::Result<()> {
        self.post_ack("credit-purchase", &serde_json::json!({ "refCode": ref_code }))
            .await
    }

    pub async fn complete_purchase(&self, ref_code: &str) -> anyhow::Result<()> {
        self.post_ack("complete-purchase", &serde_json::json!({ "refCode": ref_code }))
            .await
    }

    pub async fn update_payout(&self, details: &PayoutDetails) -> anyhow::Result<()> {
        details.validate()?;
        self.post_ack("update-payout", details).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/referral/{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T>(&self, path: &str) -> anyhow::Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .authorize(self.http.get(self.endpoint(path)))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("request to `{path}` failed: {e}"))?;

        Self::check_status(path, &response)?;

        response
            .json::<T>()
            .await
            .map_err(|e| anyhow::anyhow!("failed to parse `{path}` response: {e}"))
    }

    async fn post_json<T>(&self, path: &str, body: &impl Serialize) -> anyhow::Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .authorize(self.http.post(self.endpoint(path)).json(body))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("request to `{path}` failed: {e}"))?;

        Self::check_status(path, &response)?;

        response
            .json::<T>()
            .await
            .map_err(|e| anyhow::anyhow!("failed to parse `{path}` response: {e}"))
    }

    /// Fire-and-forget POST: the response body, if any, is discarded.
    async fn post_ack(&self, path: &str, body: &impl Serialize) -> anyhow::Result<()> {
        let response = self
            .authorize(self.http.post(self.endpoint(path)).json(body))
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("request to `{path}` failed: {e}"))?;

        Self::check_status(path, &response)
    }

    fn check_status(path: &str, response: &reqwest::Response) -> anyhow::Result<()> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED
            || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(anyhow::Error::new(Unauthorized)
                .context(format!("`{path}` returned {status}")));
        }

        if !status.is_success() {
            anyhow::bail!("`{path}` returned {status}");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiClient, Unauthorized};

    #[test]
    fn endpoints_join_without_double_slashes() {
        let client = ApiClient::new("https://backend.example/api/", None).unwrap();
        assert_eq!(
            client.endpoint("stats"),
            "https://backend.example/api/referral/stats"
        );
    }

    #[test]
    fn blank_tokens_are_treated_as_absent() {
        let client = ApiClient::new("https://backend.example", Some("   ".to_owned())).unwrap();
        assert!(client.token.is_none());
    }

    #[test]
    fn unauthorized_marker_survives_anyhow_context() {
        let err = anyhow::Error::new(Unauthorized).context("`stats` returned 401");
        assert!(err.downcast_ref::<Unauthorized>().is_some());
    }
}
