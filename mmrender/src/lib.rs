//! # mmrender
//!
//! Rendering strategies for ModularMedia.
//!
//! A [`Renderer`] is chosen once and can be swapped between playback
//! sessions. Two backends are provided:
//!
//! - [`SoftwareRenderer`]: CPU pipeline, always available
//! - [`HardwareRenderer`]: GPU pipeline, available only when a GPU is present
//!
//! Both initialize lazily on the first [`Renderer::render`] call, and
//! [`Renderer::initialize`] runs its setup at most once.
//!
//! ```rust
//! use mmrender::{HardwareRenderer, Renderer, SoftwareRenderer};
//!
//! let software = SoftwareRenderer::new();
//! software.render("Playback started")?;
//! assert!(software.is_initialized());
//!
//! let hardware = HardwareRenderer::new(false);
//! assert!(!hardware.is_available());
//! assert!(hardware.render("Playback started").is_err());
//! # Ok::<(), mmrender::RenderError>(())
//! ```

mod hardware;
mod software;

#[cfg(feature = "mmconfig")]
mod config_ext;

use std::fmt::Debug;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

pub use hardware::HardwareRenderer;
pub use software::SoftwareRenderer;

#[cfg(feature = "mmconfig")]
pub use config_ext::{RendererConfigExt, renderer_from_config};

/// Error types for rendering operations
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Renderer not available: {0}")]
    Unavailable(String),
}

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Interchangeable rendering backend
pub trait Renderer: Debug + Send + Sync {
    /// Renders `content`, initializing the backend first if needed
    ///
    /// # Errors
    ///
    /// [`RenderError::Unavailable`] if the backend cannot run here.
    fn render(&self, content: &str) -> Result<()>;

    /// Descriptive name of the backend
    fn info(&self) -> String;

    /// Static capability check; does not depend on initialization
    fn is_available(&self) -> bool;

    /// Sets the backend up; calling it again is a no-op
    fn initialize(&self) -> Result<()>;

    /// `true` once `initialize` has succeeded
    fn is_initialized(&self) -> bool;
}

/// Initialization flag and render counter shared by the backends
#[derive(Debug, Default)]
struct Lifecycle {
    initialized: AtomicBool,
    renders: AtomicU64,
}

impl Lifecycle {
    /// Runs `setup` only for the first caller
    fn initialize_once(&self, setup: impl FnOnce()) {
        if self
            .initialized
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            setup();
        }
    }

    fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    fn record_render(&self) {
        self.renders.fetch_add(1, Ordering::Relaxed);
    }

    fn render_count(&self) -> u64 {
        self.renders.load(Ordering::Relaxed)
    }
}
