//! Extension de mmconfig pour les renderers

use crate::{HardwareRenderer, Renderer, SoftwareRenderer};
use mmconfig::Config;
use std::sync::Arc;
use tracing::info;

const HARDWARE_AVAILABLE_PATH: &[&str] = &["renderer", "hardware", "available"];
const PREFER_HARDWARE_PATH: &[&str] = &["renderer", "prefer_hardware"];

/// Trait d'extension pour mmconfig::Config
pub trait RendererConfigExt {
    /// Présence d'un GPU utilisable (`renderer.hardware.available`)
    fn hardware_renderer_available(&self) -> bool;

    fn set_hardware_renderer_available(&self, available: bool) -> anyhow::Result<()>;

    /// Préférence pour le rendu matériel (`renderer.prefer_hardware`)
    fn prefer_hardware_renderer(&self) -> bool;

    fn set_prefer_hardware_renderer(&self, prefer: bool) -> anyhow::Result<()>;
}

impl RendererConfigExt for Config {
    fn hardware_renderer_available(&self) -> bool {
        self.get_bool(HARDWARE_AVAILABLE_PATH, true)
    }

    fn set_hardware_renderer_available(&self, available: bool) -> anyhow::Result<()> {
        self.set_bool(HARDWARE_AVAILABLE_PATH, available)
    }

    fn prefer_hardware_renderer(&self) -> bool {
        self.get_bool(PREFER_HARDWARE_PATH, true)
    }

    fn set_prefer_hardware_renderer(&self, prefer: bool) -> anyhow::Result<()> {
        self.set_bool(PREFER_HARDWARE_PATH, prefer)
    }
}

impl HardwareRenderer {
    /// Crée un renderer matériel dont la disponibilité vient de la configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.hardware_renderer_available())
    }
}

/// Choisit le renderer de départ
///
/// Matériel s'il est préféré et disponible, logiciel sinon.
pub fn renderer_from_config(config: &Config) -> Arc<dyn Renderer> {
    if config.prefer_hardware_renderer() {
        let hardware = HardwareRenderer::from_config(config);
        if hardware.is_available() {
            return Arc::new(hardware);
        }
        info!("Hardware renderer preferred but unavailable, using software renderer");
    }
    Arc::new(SoftwareRenderer::new())
}
