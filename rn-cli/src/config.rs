use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use rn_core::engine::filter::DEFAULT_MAX_PRICE;

/// Site defaults, threaded explicitly from `main` rather than held as
/// process globals.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Upper bound of the price filter when no --max-price is given.
    pub max_price: f64,
    /// Number of rows shown on leaderboards.
    pub leaderboard_size: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            max_price: DEFAULT_MAX_PRICE,
            leaderboard_size: 50,
        }
    }
}

impl SiteConfig {
    /// Loads `runnorway.toml` when present, otherwise the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: SiteConfig = toml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}
