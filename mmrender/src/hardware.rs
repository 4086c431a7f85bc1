use crate::{Lifecycle, RenderError, Renderer, Result};
use tracing::{debug, info, warn};

/// GPU rendering pipeline
///
/// Availability is fixed at construction; without a GPU, `initialize` and
/// `render` fail with [`RenderError::Unavailable`].
#[derive(Debug)]
pub struct HardwareRenderer {
    gpu_available: bool,
    lifecycle: Lifecycle,
}

impl HardwareRenderer {
    pub fn new(gpu_available: bool) -> Self {
        Self {
            gpu_available,
            lifecycle: Lifecycle::default(),
        }
    }

    /// Number of successful `render` calls
    pub fn render_count(&self) -> u64 {
        self.lifecycle.render_count()
    }
}

impl Renderer for HardwareRenderer {
    fn render(&self, content: &str) -> Result<()> {
        self.initialize()?;
        info!(content, "[Hardware Rendering]");
        debug!("Using GPU-accelerated rendering pipeline");
        self.lifecycle.record_render();
        Ok(())
    }

    fn info(&self) -> String {
        "Hardware Renderer (GPU-accelerated)".to_string()
    }

    fn is_available(&self) -> bool {
        self.gpu_available
    }

    fn initialize(&self) -> Result<()> {
        if !self.gpu_available {
            warn!("No GPU detected, hardware renderer cannot start");
            return Err(RenderError::Unavailable(self.info()));
        }
        self.lifecycle.initialize_once(|| {
            info!("Initializing hardware renderer");
            debug!("GPU capabilities detected, hardware pipeline ready");
        });
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.lifecycle.is_initialized()
    }
}
