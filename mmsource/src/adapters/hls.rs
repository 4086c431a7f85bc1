use super::validate_locator;
use crate::{Result, Source};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::ops::Range;
use tracing::{debug, info};

/// Range of simulated segment counts drawn on each load
const SEGMENT_COUNT_RANGE: Range<u32> = 10..30;

#[derive(Debug, Default)]
struct HlsState {
    loaded: bool,
    segment_count: u32,
}

/// Source playing an HTTP Live Streaming playlist
///
/// Loading "parses" the manifest by drawing a segment count from an injected
/// random generator. Seed it (see [`HlsStreamSource::with_seed`]) to make
/// the count reproducible.
#[derive(Debug)]
pub struct HlsStreamSource {
    playlist_url: String,
    rng: Mutex<StdRng>,
    state: Mutex<HlsState>,
}

impl HlsStreamSource {
    /// Creates a source whose segment counts come from OS entropy
    pub fn new(playlist_url: impl Into<String>) -> Self {
        Self::with_rng(playlist_url, StdRng::from_os_rng())
    }

    /// Creates a source with a deterministic segment count sequence
    pub fn with_seed(playlist_url: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(playlist_url, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(playlist_url: impl Into<String>, rng: StdRng) -> Self {
        Self {
            playlist_url: playlist_url.into(),
            rng: Mutex::new(rng),
            state: Mutex::new(HlsState::default()),
        }
    }

    pub fn playlist_url(&self) -> &str {
        &self.playlist_url
    }

    /// Segment count found by the last load, `0` before the first one
    pub fn segment_count(&self) -> u32 {
        self.state.lock().segment_count
    }
}

impl Source for HlsStreamSource {
    fn load(&self) -> Result<()> {
        validate_locator(&self.playlist_url)?;
        info!(url = %self.playlist_url, "Loading HLS playlist");
        debug!("Parsing manifest and detecting quality levels");

        let segment_count = self.rng.lock().random_range(SEGMENT_COUNT_RANGE);
        let mut state = self.state.lock();
        state.segment_count = segment_count;
        state.loaded = true;
        debug!(segments = segment_count, "Segment buffer initialized");
        Ok(())
    }

    fn play(&self) -> Result<()> {
        if !self.is_ready() {
            self.load()?;
        }
        info!(
            url = %self.playlist_url,
            segments = self.segment_count(),
            "Playing HLS stream with adaptive bitrate"
        );
        Ok(())
    }

    fn info(&self) -> String {
        format!(
            "HLS Stream: {} ({} segments)",
            self.playlist_url,
            self.segment_count()
        )
    }

    fn is_ready(&self) -> bool {
        self.state.lock().loaded
    }
}
