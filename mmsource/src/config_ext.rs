//! Extension de mmconfig pour les sources

use crate::{CachingProxy, DEFAULT_CACHE_TTL, HlsStreamSource, Source};
use mmconfig::Config;
use std::time::Duration;

const CACHE_TTL_PATH: &[&str] = &["cache", "ttl_ms"];
const RNG_SEED_PATH: &[&str] = &["sources", "rng_seed"];

/// Trait d'extension pour mmconfig::Config
pub trait SourceConfigExt {
    /// Durée de vie d'un chargement mis en cache (`cache.ttl_ms`)
    fn cache_ttl(&self) -> Duration;

    /// Définit la durée de vie d'un chargement mis en cache
    fn set_cache_ttl(&self, ttl: Duration) -> anyhow::Result<()>;

    /// Graine des valeurs simulées par les adaptateurs (`sources.rng_seed`)
    fn rng_seed(&self) -> Option<u64>;
}

impl SourceConfigExt for Config {
    fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.get_u64(CACHE_TTL_PATH, DEFAULT_CACHE_TTL.as_millis() as u64))
    }

    fn set_cache_ttl(&self, ttl: Duration) -> anyhow::Result<()> {
        self.set_u64(CACHE_TTL_PATH, ttl.as_millis() as u64)
    }

    fn rng_seed(&self) -> Option<u64> {
        self.get_optional_u64(RNG_SEED_PATH)
    }
}

impl<S: Source> CachingProxy<S> {
    /// Crée un proxy dont le TTL vient de la configuration
    pub fn from_config(wrapped: S, config: &Config) -> Self {
        Self::new(wrapped).with_ttl(config.cache_ttl())
    }
}

impl HlsStreamSource {
    /// Crée une source HLS, déterministe si `sources.rng_seed` est défini
    pub fn from_config(playlist_url: impl Into<String>, config: &Config) -> Self {
        match config.rng_seed() {
            Some(seed) => Self::with_seed(playlist_url, seed),
            None => Self::new(playlist_url),
        }
    }
}
