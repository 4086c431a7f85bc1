use crate::{Lifecycle, Renderer, Result};
use tracing::{debug, info};

/// CPU rendering pipeline, always available
#[derive(Debug, Default)]
pub struct SoftwareRenderer {
    lifecycle: Lifecycle,
}

impl SoftwareRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `render` calls
    pub fn render_count(&self) -> u64 {
        self.lifecycle.render_count()
    }
}

impl Renderer for SoftwareRenderer {
    fn render(&self, content: &str) -> Result<()> {
        self.initialize()?;
        info!(content, "[Software Rendering]");
        debug!("Using CPU-based rendering pipeline");
        self.lifecycle.record_render();
        Ok(())
    }

    fn info(&self) -> String {
        "Software Renderer (CPU-based)".to_string()
    }

    fn is_available(&self) -> bool {
        true
    }

    fn initialize(&self) -> Result<()> {
        self.lifecycle.initialize_once(|| {
            info!("Initializing software renderer");
            debug!("CPU rendering pipeline ready");
        });
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.lifecycle.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_initializes_lazily() {
        let renderer = SoftwareRenderer::new();
        assert!(!renderer.is_initialized());

        renderer.render("frame").unwrap();
        assert!(renderer.is_initialized());
        assert_eq!(renderer.render_count(), 1);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let renderer = SoftwareRenderer::new();
        renderer.initialize().unwrap();
        let info = renderer.info();

        renderer.initialize().unwrap();
        assert!(renderer.is_available());
        assert_eq!(renderer.info(), info);
        assert_eq!(renderer.render_count(), 0);
    }
}
