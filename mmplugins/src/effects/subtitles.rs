use crate::Effect;
use mmplaylist::{NodeDescription, Result};
use serde::Serialize;
use tracing::{debug, info};

/// Language used when none is given
pub const DEFAULT_LANGUAGE: &str = "en";

/// Subtitle track loaded from a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subtitles {
    pub file: String,
    pub language: String,
}

impl Subtitles {
    pub fn new(file: impl Into<String>) -> Self {
        Self::in_language(file, DEFAULT_LANGUAGE)
    }

    pub fn in_language(file: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            language: language.into(),
        }
    }
}

impl Effect for Subtitles {
    fn apply(&self, target: &NodeDescription) -> Result<()> {
        info!(node = %target.name(), file = %self.file, "Loading subtitles");
        debug!(language = %self.language, "Rendering and synchronizing subtitles");
        Ok(())
    }

    fn info(&self) -> String {
        format!("Subtitles: {} ({})", self.file, self.language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info() {
        assert_eq!(Subtitles::new("movie.srt").info(), "Subtitles: movie.srt (en)");
        assert_eq!(
            Subtitles::in_language("film.srt", "fr").info(),
            "Subtitles: film.srt (fr)"
        );
    }
}
