use crate::{PlayOutcome, PlayerError, PlayerStatus, Result};
use mmplaylist::MediaNode;
use mmrender::Renderer;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Message rendered at the start of every session
const PLAYBACK_STARTED: &str = "Playback started";

/// Renderer and loaded tree of one player
#[derive(Debug)]
struct Session {
    renderer: Arc<dyn Renderer>,
    tree: Option<Arc<dyn MediaNode>>,
}

/// Single entry point for playback
///
/// States: Idle (nothing loaded), Loaded, Playing. [`PlayerFacade::play`]
/// runs synchronously on the caller's thread; a second `play` issued while
/// one is running is rejected with [`PlayerError::AlreadyPlaying`].
///
/// The session lock is never held while the tree plays, so `status`,
/// `load` and `set_renderer` stay responsive; a renderer or tree swapped
/// during playback takes effect at the next `play`.
#[derive(Debug)]
pub struct PlayerFacade {
    session: Mutex<Session>,
    playing: AtomicBool,
}

/// Resets the playing flag when a session ends, even on error
struct PlayingGuard<'a>(&'a AtomicBool);

impl Drop for PlayingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl PlayerFacade {
    pub fn new(renderer: Arc<dyn Renderer>) -> Self {
        info!(renderer = %renderer.info(), "Player initialized");
        Self {
            session: Mutex::new(Session {
                renderer,
                tree: None,
            }),
            playing: AtomicBool::new(false),
        }
    }

    /// Player with the renderer selected by the configuration
    ///
    /// Hardware when `renderer.prefer_hardware` is set and the GPU is
    /// available, software otherwise.
    #[cfg(feature = "mmconfig")]
    pub fn from_config(config: &mmconfig::Config) -> Self {
        Self::new(mmrender::renderer_from_config(config))
    }

    /// Loads a tree, replacing the previous one
    pub fn load(&self, tree: Arc<dyn MediaNode>) {
        let description = tree.describe();
        info!(tree = %description, "Playlist loaded");
        self.session.lock().tree = Some(tree);
    }

    /// Plays the loaded tree
    ///
    /// Renders "Playback started" once, then traverses the tree.
    ///
    /// # Errors
    ///
    /// - [`PlayerError::AlreadyPlaying`] if another `play` is running
    /// - [`PlayerError::Render`] if the renderer fails
    /// - [`PlayerError::Playback`] with the first failure of the traversal
    pub fn play(&self) -> Result<PlayOutcome> {
        let (renderer, tree) = {
            let session = self.session.lock();
            (session.renderer.clone(), session.tree.clone())
        };

        let Some(tree) = tree else {
            warn!("No playlist loaded");
            return Ok(PlayOutcome::NothingLoaded);
        };

        if self
            .playing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Playback already in progress, request rejected");
            return Err(PlayerError::AlreadyPlaying);
        }
        let _guard = PlayingGuard(&self.playing);

        info!(renderer = %renderer.info(), tree = %tree.describe().name(), "Starting playback");
        renderer.render(PLAYBACK_STARTED)?;
        tree.play()?;

        debug!("Playback finished");
        Ok(PlayOutcome::Completed)
    }

    /// Switches to `candidate` if it is available
    ///
    /// # Errors
    ///
    /// [`PlayerError::RendererUnavailable`] if `candidate.is_available()` is
    /// false; the active renderer is kept.
    pub fn set_renderer(&self, candidate: Arc<dyn Renderer>) -> Result<()> {
        if !candidate.is_available() {
            warn!(renderer = %candidate.info(), "Renderer not available, keeping current one");
            return Err(PlayerError::RendererUnavailable(candidate.info()));
        }
        info!(renderer = %candidate.info(), "Renderer switched");
        self.session.lock().renderer = candidate;
        Ok(())
    }

    pub fn status(&self) -> PlayerStatus {
        let session = self.session.lock();
        PlayerStatus {
            playing: self.is_playing(),
            renderer: session.renderer.info(),
            playlist: session
                .tree
                .as_ref()
                .map(|tree| tree.describe().name().to_string()),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    pub fn renderer_info(&self) -> String {
        self.session.lock().renderer.info()
    }

    /// Currently loaded tree
    pub fn loaded(&self) -> Option<Arc<dyn MediaNode>> {
        self.session.lock().tree.clone()
    }
}
