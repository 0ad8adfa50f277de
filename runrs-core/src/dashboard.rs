use anyhow::Result;
use indexmap::IndexMap;
use serde_json::Value;

pub mod aggregator;
pub mod page;
pub mod presenter;

use crate::cache::StateCache;
use crate::serializers::HostVariant;
use crate::store::filter::{DashboardFilter, StatusFilter};
use crate::store::RunStore;
use page::DashboardPage;
pub use presenter::latest_per_host;

/// Request parameters, both passed through to the store's filter and echoed
/// back in the page model so the caller can restore its UI state.
#[derive(Clone, Debug, Default)]
pub struct DashboardParams {
    pub q: Option<String>,
    pub status: Option<String>,
}

impl DashboardParams {
    fn to_filter(&self) -> Result<DashboardFilter> {
        let status = self
            .status
            .as_deref()
            .map(str::parse::<StatusFilter>)
            .transpose()?;
        Ok(DashboardFilter {
            q: self.q.clone(),
            status,
        })
    }
}

/// The dashboard view: latest play state per (host, playbook) pair, served
/// from the cache where possible.
pub struct Dashboard<'a> {
    store: &'a RunStore,
    cache: &'a StateCache,
}

impl<'a> Dashboard<'a> {
    pub fn new(store: &'a RunStore, cache: &'a StateCache) -> Self {
        Dashboard { store, cache }
    }

    pub async fn render(&self, params: &DashboardParams) -> Result<DashboardPage> {
        let filter = params.to_filter()?;
        let results = self.store.dashboard_results(&filter)?;
        let data = aggregator::aggregate(&results);

        let mut session = self.cache.session().await;
        let states = presenter::build_states(&data, &mut session, HostVariant::Simple).await;
        session.finish().await;

        Ok(DashboardPage {
            page: "dashboard",
            states,
            status: params.status.clone(),
        })
    }

    /// The per-host view: the single latest state for every host, with the
    /// detailed host shape. Computed fresh on every call — the state cache
    /// holds the dashboard's simple shape and is not consulted here.
    pub async fn host_index(&self, params: &DashboardParams) -> Result<IndexMap<String, Value>> {
        let filter = params.to_filter()?;
        let results = self.store.dashboard_results(&filter)?;
        let data = aggregator::aggregate(&results);

        let cache = StateCache::disabled();
        let mut session = cache.session().await;
        let states = presenter::build_states(&data, &mut session, HostVariant::Detailed).await;
        session.finish().await;

        Ok(latest_per_host(&states))
    }
}
