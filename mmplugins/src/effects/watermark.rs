use crate::Effect;
use mmplaylist::{NodeDescription, Result};
use serde::Serialize;
use tracing::info;

/// Position used when none is given
pub const DEFAULT_POSITION: &str = "bottom-right";

/// Text overlay drawn over the picture
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Watermark {
    pub text: String,
    pub position: String,
}

impl Watermark {
    pub fn new(text: impl Into<String>) -> Self {
        Self::at(text, DEFAULT_POSITION)
    }

    pub fn at(text: impl Into<String>, position: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            position: position.into(),
        }
    }
}

impl Effect for Watermark {
    fn apply(&self, target: &NodeDescription) -> Result<()> {
        info!(
            node = %target.name(),
            text = %self.text,
            position = %self.position,
            "Applying watermark overlay"
        );
        Ok(())
    }

    fn info(&self) -> String {
        format!("Watermark: '{}' at {}", self.text, self.position)
    }
}
