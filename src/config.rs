use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

pub const DEFAULT_SEED: u64 = 12345;
pub const DEFAULT_BATCH_SIZE: usize = 2048;

pub const DEFAULT_TRIALS: u32 = 10_000;
pub const LIVE_TRIALS: u32 = 3_000;
pub const MAX_OPPONENTS: usize = 8;

/// Engine settings fixed at construction. The default seed is used whenever a
/// call does not pass its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub default_seed: u64,
    /// Trials per RNG stream. Results depend on this value, not on the
    /// number of worker threads.
    pub batch_size: usize,
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_seed: DEFAULT_SEED,
            batch_size: DEFAULT_BATCH_SIZE,
            parallel: true,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.default_seed = seed;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn serial(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn load(path: &Path) -> EngineResult<EngineConfig> {
        let json = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&json)?;
        let batch_size = config.batch_size;
        Ok(config.with_batch_size(batch_size))
    }
}
