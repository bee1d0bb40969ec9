use std::sync::Arc;
use std::time::{Instant, SystemTime};

use playlearn_algo::{Catalog, ProblemGenerator, SessionPlanner};

use crate::config::Config;
use crate::store::{InMemoryResultLog, ResultLog, WatermarkStore};

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    config: Arc<Config>,
    catalog: &'static Catalog,
    result_log: Arc<dyn ResultLog>,
    watermarks: Arc<WatermarkStore>,
}

impl AppState {
    pub fn new(config: Config, result_log: Arc<dyn ResultLog>) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            config: Arc::new(config),
            catalog: Catalog::builtin(),
            result_log,
            watermarks: Arc::new(WatermarkStore::new()),
        }
    }

    /// State backed by the in-memory result log.
    pub fn in_memory(config: Config) -> Self {
        Self::new(config, Arc::new(InMemoryResultLog::new()))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn result_log(&self) -> &dyn ResultLog {
        self.result_log.as_ref()
    }

    pub fn watermarks(&self) -> &WatermarkStore {
        &self.watermarks
    }

    /// A freshly seeded planner; every plan request reshuffles.
    pub fn planner(&self) -> SessionPlanner {
        SessionPlanner::new(self.config.planner.clone())
    }

    pub fn generator(&self) -> ProblemGenerator {
        ProblemGenerator::new(self.config.generator.clone())
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }
}
