//! # mmsource
//!
//! The `Source` capability and its building blocks for ModularMedia.
//!
//! A [`Source`] is anything that can be loaded and then played: a local file,
//! a remote API endpoint, an HLS stream. The rest of the workspace only ever
//! sees this trait, so adapters can be swapped without touching playlists,
//! decorators or the player.
//!
//! ## Features
//!
//! - **Source trait**: `load`, `play`, `info`, `is_ready`, all fallible where
//!   a real backend could fail.
//! - **Caching proxy**: [`CachingProxy`] memoizes the wrapped source's `load`
//!   for a configurable TTL, measured with an injectable [`Clock`].
//! - **Adapters**: simulated [`LocalFileSource`], [`RemoteApiSource`] and
//!   [`HlsStreamSource`] (seedable segment counts).
//! - **Configuration**: `SourceConfigExt` reads the cache TTL and the RNG seed
//!   from `mmconfig` (feature `mmconfig`, enabled by default).
//!
//! ## Usage
//!
//! ```rust
//! use mmsource::{CachingProxy, RemoteApiSource, Source};
//! use std::time::Duration;
//!
//! let remote = RemoteApiSource::new("https://api.example.com/media?id=12345");
//! let proxy = CachingProxy::new(remote).with_ttl(Duration::from_secs(60));
//!
//! proxy.load()?; // miss: the remote source is loaded
//! proxy.load()?; // hit: nothing is fetched
//! assert!(proxy.is_ready());
//! assert_eq!(proxy.statistics().misses, 1);
//! # Ok::<(), mmsource::SourceError>(())
//! ```

pub mod adapters;
pub mod clock;
pub mod proxy;

#[cfg(feature = "mmconfig")]
mod config_ext;

use std::fmt::Debug;
use std::sync::Arc;

/// Error types for source operations
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Invalid source locator: {0:?}")]
    InvalidLocator(String),

    #[error("Failed to load {info}: {reason}")]
    LoadFailed { info: String, reason: String },

    #[error("Playback failed for {info}: {reason}")]
    PlaybackFailed { info: String, reason: String },

    #[error("Source not ready: {0}")]
    NotReady(String),
}

/// Result type for source operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Main trait for media sources
///
/// Implementations keep their own state behind interior mutability so that a
/// source can be shared (`Arc`) and driven from `&self`.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`.
///
/// # Examples
///
/// ```rust
/// use mmsource::{Result, Source};
/// use std::sync::atomic::{AtomicBool, Ordering};
///
/// #[derive(Debug, Default)]
/// struct Silence {
///     loaded: AtomicBool,
/// }
///
/// impl Source for Silence {
///     fn load(&self) -> Result<()> {
///         self.loaded.store(true, Ordering::SeqCst);
///         Ok(())
///     }
///
///     fn play(&self) -> Result<()> {
///         Ok(())
///     }
///
///     fn info(&self) -> String {
///         "Silence".to_string()
///     }
///
///     fn is_ready(&self) -> bool {
///         self.loaded.load(Ordering::SeqCst)
///     }
/// }
/// ```
pub trait Source: Debug + Send + Sync {
    /// Prepares the source for playback
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the backend cannot be prepared.
    fn load(&self) -> Result<()>;

    /// Performs playback
    ///
    /// Callers are expected to call [`Source::load`] first; implementations
    /// may load on demand when they are not ready yet.
    fn play(&self) -> Result<()>;

    /// Human-readable descriptor of the source
    fn info(&self) -> String;

    /// `true` once `load` has completed successfully
    fn is_ready(&self) -> bool;
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn load(&self) -> Result<()> {
        (**self).load()
    }

    fn play(&self) -> Result<()> {
        (**self).play()
    }

    fn info(&self) -> String {
        (**self).info()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

impl<S: Source + ?Sized> Source for Arc<S> {
    fn load(&self) -> Result<()> {
        (**self).load()
    }

    fn play(&self) -> Result<()> {
        (**self).play()
    }

    fn info(&self) -> String {
        (**self).info()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

pub use adapters::{HlsStreamSource, LocalFileSource, MediaFormat, RemoteApiSource};
pub use clock::{Clock, ManualClock, SystemClock};
pub use proxy::{CacheLookup, CacheStatistics, CachingProxy, DEFAULT_CACHE_TTL};

#[cfg(feature = "mmconfig")]
pub use config_ext::SourceConfigExt;
