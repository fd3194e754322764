use vade_api::{ActivityLogger, ApiClient};
use vade_state::SessionStore;

pub type Error = anyhow::Error;

/// Shared handles passed across the agent's feeds.
#[derive(Clone, Debug)]
pub struct Data {
    pub api: ApiClient,
    pub activity: ActivityLogger,
    pub store: SessionStore,
}
