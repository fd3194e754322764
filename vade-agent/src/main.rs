use std::env;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use vade_api::{ActivityLogger, ApiClient, Unauthorized};
use vade_core::Data;
use vade_state::engine::Celebration;
use vade_state::model::ActivityKind;
use vade_state::{ProgressEngine, SessionStore};
use vade_utils::formatting::format_naira;
use vade_utils::poller::Poller;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("hyper_util") || target.starts_with("reqwest::connect"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    // Load the .env file
    dotenvy::dotenv().ok();

    let api = ApiClient::from_env()?;

    let key_prefix = env::var("VADE_KEY_PREFIX").unwrap_or_else(|_| "vade:prod".to_string());
    let state_path =
        env::var("VADE_STATE_PATH").unwrap_or_else(|_| "vade-session.json".to_string());

    let store = match SessionStore::file(&state_path, key_prefix.clone()) {
        Ok(store) => {
            info!(path = %state_path, "Session store opened.");
            store
        }
        Err(err) => {
            warn!(?err, path = %state_path, "Failed to open session store; continuing with in-memory state.");
            SessionStore::in_memory(key_prefix)
        }
    };

    let stats_poll = Duration::from_secs(env_u64("VADE_STATS_POLL_SECONDS", 45));
    let progress_poll = Duration::from_secs(env_u64("VADE_PROGRESS_POLL_SECONDS", 30));
    info!(
        stats_poll_seconds = stats_poll.as_secs(),
        progress_poll_seconds = progress_poll.as_secs(),
        "Poll cadence configured."
    );

    let data = Data {
        api: api.clone(),
        activity: ActivityLogger::new(api.clone()),
        store: store.clone(),
    };

    let engine = Arc::new(Mutex::new(ProgressEngine::new(store)));

    // A cached referral code means an attributed visit: log the browsing
    // event once for this session before the feeds start.
    if let Some(code) = engine.lock().await.referral_code() {
        data.activity.log(ActivityKind::Browsing, &code).await;
    }

    let stats_poller = {
        let api = data.api.clone();
        let engine = engine.clone();
        let auth_warned = Arc::new(AtomicBool::new(false));

        Poller::start("stats", stats_poll, move || {
            let api = api.clone();
            let engine = engine.clone();
            let auth_warned = auth_warned.clone();

            async move {
                let stats = match api.fetch_stats().await {
                    Ok(stats) => stats,
                    Err(err) => {
                        report_fetch_failure("stats", &err, &auth_warned);
                        return;
                    }
                };

                let outcome = engine.lock().await.reconcile(stats);

                for celebration in &outcome.celebrations {
                    announce(celebration);
                }

                for claim in outcome.claims {
                    match api.apply_milestone(&claim.referral_code, claim.tier).await {
                        Ok(reward) => {
                            info!(
                                tier = claim.tier,
                                bonus = %format_naira(reward.bonus),
                                new_total = %format_naira(reward.new_total),
                                "Milestone bonus applied."
                            );
                            engine.lock().await.mark_fulfilled(claim.tier, reward);
                        }
                        Err(err) => {
                            warn!(
                                ?err,
                                tier = claim.tier,
                                "Milestone application failed; next poll retries."
                            );
                        }
                    }
                }
            }
        })
    };

    let progress_poller = {
        let api = data.api.clone();
        let engine = engine.clone();

        Poller::start("progress", progress_poll, move || {
            let api = api.clone();
            let engine = engine.clone();

            async move {
                let progress = match api.fetch_progress().await {
                    Ok(progress) => progress,
                    Err(err) => {
                        // A rejected token on this feed just means logged
                        // out; the checklist shows nothing until login.
                        if err.downcast_ref::<Unauthorized>().is_some() {
                            debug!("progress feed unauthorized; treating as logged out");
                        } else {
                            error!(?err, "progress fetch failed; keeping last known state");
                        }
                        return;
                    }
                };

                debug!(
                    percent_complete = progress.percent_complete(),
                    "Onboarding progress fetched."
                );

                if let Some(celebration) = engine.lock().await.observe_progress(&progress) {
                    announce(&celebration);
                }
            }
        })
    };

    info!("Agent is polling. Press Ctrl-C to stop.");
    tokio::signal::ctrl_c().await?;

    stats_poller.stop();
    progress_poller.stop();
    info!("Agent stopped.");

    Ok(())
}

fn announce(celebration: &Celebration) {
    match celebration {
        Celebration::RankUp { rank } => {
            info!(rank = rank.label(), "{}", rank.celebration_copy());
        }
        Celebration::TierReached { tier } => {
            info!(tier, "Milestone reached! {tier} referrals and counting.");
        }
        Celebration::MasteryPulse => {
            info!("Handbook mastery complete. Time to guide others.");
        }
    }
}

fn report_fetch_failure(feed: &'static str, err: &anyhow::Error, auth_warned: &AtomicBool) {
    if err.downcast_ref::<Unauthorized>().is_some() {
        if !auth_warned.swap(true, Ordering::SeqCst) {
            warn!(feed, "Session token rejected; re-authenticate and restart the agent.");
        }
    } else {
        error!(?err, feed, "fetch failed; keeping last known state");
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(value) => value.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}
