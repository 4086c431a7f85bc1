//! # mmplayer
//!
//! [`PlayerFacade`] is the single orchestration point of ModularMedia: it
//! owns the active [`Renderer`](mmrender::Renderer), the loaded media tree
//! and the playback flag of one session.
//!
//! ```rust
//! use mmplayer::{PlayOutcome, PlayerFacade};
//! use mmplaylist::{MediaItem, Playlist};
//! use mmrender::SoftwareRenderer;
//! use mmsource::LocalFileSource;
//! use std::sync::Arc;
//!
//! let player = PlayerFacade::new(Arc::new(SoftwareRenderer::new()));
//! assert_eq!(player.play()?, PlayOutcome::NothingLoaded);
//!
//! let playlist = Arc::new(Playlist::new("Evening"));
//! playlist.add(Arc::new(MediaItem::new("Intro", LocalFileSource::new("intro.mp4"))))?;
//! player.load(playlist);
//!
//! assert_eq!(player.play()?, PlayOutcome::Completed);
//! assert_eq!(
//!     player.status().to_string(),
//!     "Player Status: Stopped | Renderer: Software Renderer (CPU-based) | Playlist: Evening"
//! );
//! # Ok::<(), mmplayer::PlayerError>(())
//! ```

mod facade;
mod status;

pub use facade::PlayerFacade;
pub use status::{PlayOutcome, PlayerStatus};

/// Error types for player operations
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("Playback failed: {0}")]
    Playback(#[from] mmplaylist::Error),

    #[error("Rendering failed: {0}")]
    Render(#[from] mmrender::RenderError),

    #[error("Renderer not available: {0}")]
    RendererUnavailable(String),

    #[error("Playback already in progress")]
    AlreadyPlaying,
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
