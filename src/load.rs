//! Load cycles: fetch features and records concurrently, then join them once.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use crate::config::Config;
use crate::election::ElectionRecord;
use crate::error::LoadError;
use crate::join::{join, JoinedMap};
use crate::map::GeoFeature;
use crate::session::Session;

/// Inputs and join result of one completed load cycle.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub generation: u64,
    pub features: Vec<GeoFeature>,
    pub records: Vec<ElectionRecord>,
    pub map: JoinedMap,
}

impl Loaded {
    /// Start a fresh session on this data.
    pub fn into_session(self, config: &Config) -> Session {
        Session::new(self.map, config.style.clone())
    }
}

#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Ready(Loaded),
    /// A newer cycle was started before this one's inputs arrived; its data was dropped.
    Stale { generation: u64 },
}

impl LoadOutcome {
    pub fn ready(self) -> Option<Loaded> {
        match self {
            LoadOutcome::Ready(loaded) => Some(loaded),
            LoadOutcome::Stale { .. } => None,
        }
    }
}

/// Runs load cycles. Each cycle waits for both inputs, then joins exactly once;
/// a cycle overtaken by a newer one is discarded instead of being joined.
///
/// Clones share the generation counter, so a reload started from any clone
/// supersedes cycles in flight on the others.
#[derive(Debug, Clone)]
pub struct Loader {
    latest: Arc<AtomicU64>,
    config: Config,
}

impl Loader {
    pub fn new(config: Config) -> Self {
        Self { latest: Arc::new(AtomicU64::new(0)), config }
    }

    #[inline] pub fn config(&self) -> &Config { &self.config }

    /// Generation of the newest cycle started so far (0 before the first).
    pub fn latest_generation(&self) -> u64 { self.latest.load(Ordering::SeqCst) }

    /// Start a cycle: await both inputs concurrently, then join.
    pub async fn load<G, R>(&self, geometry: G, records: R) -> Result<LoadOutcome, LoadError>
    where
        G: Future<Output = anyhow::Result<Vec<GeoFeature>>>,
        R: Future<Output = anyhow::Result<Vec<ElectionRecord>>>,
    {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        info!(generation, "load started");

        let inputs = tokio::try_join!(
            async { geometry.await.map_err(LoadError::Geometry) },
            async { records.await.map_err(LoadError::Records) },
        );

        if self.latest_generation() != generation {
            info!(generation, latest = self.latest_generation(), "discarding superseded load");
            return Ok(LoadOutcome::Stale { generation });
        }

        let (features, records) = inputs.inspect_err(|e| error!(generation, "{e}"))?;
        let map = join(&features, &records, &self.config.join, &self.config.style);
        Ok(LoadOutcome::Ready(Loaded { generation, features, records, map }))
    }

    /// Load a boundary file and a results file from disk.
    #[cfg(feature = "files")]
    pub async fn load_files(&self, geometry: &std::path::Path, records: &std::path::Path) -> Result<LoadOutcome, LoadError> {
        self.load(
            crate::io::read_features_async(geometry.to_path_buf()),
            crate::io::read_records_async(records.to_path_buf()),
        ).await
    }
}
