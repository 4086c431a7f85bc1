use serde::Serialize;
use std::fmt;

/// Read-only snapshot of the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStatus {
    pub playing: bool,
    pub renderer: String,
    /// Name of the loaded tree, `None` when nothing is loaded
    pub playlist: Option<String>,
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player Status: {} | Renderer: {} | Playlist: {}",
            if self.playing { "Playing" } else { "Stopped" },
            self.renderer,
            self.playlist.as_deref().unwrap_or("None")
        )
    }
}

/// What a call to [`PlayerFacade::play`](crate::PlayerFacade::play) did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayOutcome {
    /// The whole tree was played
    Completed,
    /// No tree was loaded; nothing happened
    NothingLoaded,
}
