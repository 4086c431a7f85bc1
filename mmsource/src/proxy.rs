//! Proxy de cache pour les sources distantes
//!
//! Ce module fournit `CachingProxy`, qui enveloppe n'importe quelle
//! [`Source`] et mémorise son `load()` pendant une durée de vie (TTL)
//! configurable.
//!
//! ## Fonctionnement
//!
//! ```text
//! load() ──► cache vide ou périmé ? ──oui──► wrapped.load() + horodatage
//!                     │
//!                     └──non──► hit : aucun appel à la source
//!
//! play() ──► load() (hit ou miss) ──► wrapped.play()
//! ```
//!
//! Le TTL est une simple vérification de fraîcheur au moment de l'appel :
//! aucune tâche de fond n'expire les entrées.

use crate::clock::{Clock, SystemClock};
use crate::{Result, Source};
use chrono::Utc;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// TTL par défaut d'un chargement mis en cache (5 minutes)
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_millis(300_000);

/// Résultat d'un passage par le cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLookup {
    /// Le chargement précédent est encore frais
    Hit { age: Duration },
    /// La source enveloppée a été (re)chargée
    Miss,
}

/// Compteurs d'utilisation du cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStatistics {
    /// Nombre de `load()` servis depuis le cache
    pub hits: u64,
    /// Nombre de `load()` délégués à la source enveloppée
    pub misses: u64,
}

/// Source qui mémorise le `load()` d'une autre source
///
/// L'horodatage du dernier chargement n'existe que lorsque le cache est
/// rempli (`Option<Instant>`), ce qui rend impossible un état « en cache sans
/// horodatage ».
///
/// # Concurrence
///
/// L'état du cache est protégé par un `RwLock` : un seul écrivain (`load`,
/// `clear_cache`), plusieurs lecteurs (`is_ready`, `cache_age`). Deux `load()`
/// concurrents sur un cache vide ne déclenchent qu'un seul chargement.
///
/// # Exemples
///
/// ```rust
/// use mmsource::{CacheLookup, CachingProxy, LocalFileSource, ManualClock};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let clock = Arc::new(ManualClock::new());
/// let proxy = CachingProxy::new(LocalFileSource::new("movie.mkv"))
///     .with_ttl(Duration::from_millis(5_000))
///     .with_clock(clock.clone());
///
/// assert_eq!(proxy.load_cached()?, CacheLookup::Miss);
/// clock.advance(Duration::from_millis(3_000));
/// assert!(matches!(proxy.load_cached()?, CacheLookup::Hit { .. }));
/// clock.advance(Duration::from_millis(3_000));
/// assert_eq!(proxy.load_cached()?, CacheLookup::Miss);
/// # Ok::<(), mmsource::SourceError>(())
/// ```
#[derive(Debug)]
pub struct CachingProxy<S> {
    wrapped: S,
    cache_key: String,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    cached_at: RwLock<Option<Instant>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<S: Source> CachingProxy<S> {
    /// Crée un proxy avec le TTL par défaut et l'horloge système
    ///
    /// La clé de cache est calculée une seule fois ici, à partir de
    /// l'identité de la source et de l'instant de construction.
    pub fn new(wrapped: S) -> Self {
        let cache_key = generate_cache_key(&wrapped.info());
        Self {
            wrapped,
            cache_key,
            ttl: DEFAULT_CACHE_TTL,
            clock: Arc::new(SystemClock),
            cached_at: RwLock::new(None),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Change la durée de vie d'un chargement
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Remplace l'horloge utilisée pour mesurer l'âge du cache
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Charge la source si nécessaire et indique si c'était un hit ou un miss
    ///
    /// Le cache est considéré périmé lorsque son âge dépasse strictement le TTL.
    /// Si le chargement délégué échoue, le cache est vidé et l'erreur remonte.
    pub fn load_cached(&self) -> Result<CacheLookup> {
        let mut cached_at = self.cached_at.write();
        let now = self.clock.now();

        if let Some(at) = *cached_at {
            let age = now.saturating_duration_since(at);
            if age <= self.ttl {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(cache_key = %self.cache_key, age_ms = age.as_millis() as u64, "Cache hit - using cached content");
                return Ok(CacheLookup::Hit { age });
            }
            debug!(cache_key = %self.cache_key, age_ms = age.as_millis() as u64, "Cached content expired");
        }

        info!(cache_key = %self.cache_key, "Cache miss - fetching from wrapped source");
        if let Err(e) = self.wrapped.load() {
            *cached_at = None;
            warn!(cache_key = %self.cache_key, error = %e, "Wrapped source failed to load");
            return Err(e);
        }

        *cached_at = Some(now);
        self.misses.fetch_add(1, Ordering::Relaxed);
        Ok(CacheLookup::Miss)
    }

    /// Vide le cache : le prochain `load()` sera un miss quel que soit le TTL
    pub fn clear_cache(&self) {
        *self.cached_at.write() = None;
        info!(cache_key = %self.cache_key, "Cache cleared");
    }

    /// Indique si un chargement est mémorisé (frais ou non)
    pub fn is_cached(&self) -> bool {
        self.cached_at.read().is_some()
    }

    /// Âge du chargement mémorisé, `None` si le cache est vide
    pub fn cache_age(&self) -> Option<Duration> {
        let at = (*self.cached_at.read())?;
        Some(self.clock.now().saturating_duration_since(at))
    }

    /// Clé de cache (`cache_<empreinte>_<horodatage ms>`)
    pub fn cache_key(&self) -> &str {
        &self.cache_key
    }

    /// Durée de vie d'un chargement
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Compteurs de hits et de misses
    pub fn statistics(&self) -> CacheStatistics {
        CacheStatistics {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    /// Source enveloppée
    pub fn inner(&self) -> &S {
        &self.wrapped
    }
}

impl<S: Source> Source for CachingProxy<S> {
    fn load(&self) -> Result<()> {
        self.load_cached().map(|_| ())
    }

    fn play(&self) -> Result<()> {
        self.load()?;
        self.wrapped.play()
    }

    fn info(&self) -> String {
        format!("Cached: {}", self.wrapped.info())
    }

    fn is_ready(&self) -> bool {
        self.is_cached() && self.wrapped.is_ready()
    }
}

/// Génère la clé de cache d'une source
///
/// Empreinte SHA256 (8 premiers octets) du descripteur de la source, suivie de
/// l'horodatage de construction en millisecondes. La clé identifie le proxy,
/// pas le contenu.
fn generate_cache_key(identity: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(identity.as_bytes());
    let digest = hasher.finalize();
    format!(
        "cache_{}_{}",
        hex::encode(&digest[..8]),
        Utc::now().timestamp_millis()
    )
}
