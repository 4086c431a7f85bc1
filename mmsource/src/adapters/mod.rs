//! Simulated source adapters
//!
//! Each adapter hides one kind of backend behind the [`Source`](crate::Source)
//! trait. No real I/O is performed: loading and playback only update state and
//! emit `tracing` events.

mod hls;
mod local_file;
mod remote_api;

pub use hls::HlsStreamSource;
pub use local_file::{LocalFileSource, MediaFormat};
pub use remote_api::RemoteApiSource;

use crate::{Result, SourceError};

/// Rejects empty or blank locators
fn validate_locator(locator: &str) -> Result<()> {
    if locator.trim().is_empty() {
        return Err(SourceError::InvalidLocator(locator.to_string()));
    }
    Ok(())
}
