use super::validate_locator;
use crate::{Result, Source};
use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Container format detected from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Mp4,
    Avi,
    Mkv,
    Mov,
    Unknown,
}

impl MediaFormat {
    /// Detects the format from the extension of `path` (case-insensitive)
    pub fn from_path(path: &str) -> Self {
        let ext = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("mp4") => MediaFormat::Mp4,
            Some("avi") => MediaFormat::Avi,
            Some("mkv") => MediaFormat::Mkv,
            Some("mov") => MediaFormat::Mov,
            _ => MediaFormat::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFormat::Mp4 => "MP4",
            MediaFormat::Avi => "AVI",
            MediaFormat::Mkv => "MKV",
            MediaFormat::Mov => "MOV",
            MediaFormat::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source reading a file from the local file system
#[derive(Debug)]
pub struct LocalFileSource {
    path: String,
    format: MediaFormat,
    loaded: AtomicBool,
}

impl LocalFileSource {
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let format = MediaFormat::from_path(&path);
        Self {
            path,
            format,
            loaded: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn format(&self) -> MediaFormat {
        self.format
    }
}

impl Source for LocalFileSource {
    fn load(&self) -> Result<()> {
        validate_locator(&self.path)?;
        info!(path = %self.path, format = %self.format, "Loading local file");
        debug!(format = %self.format, "Initializing decoder and file buffers");
        self.loaded.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn play(&self) -> Result<()> {
        if !self.is_ready() {
            self.load()?;
        }
        info!(path = %self.path, format = %self.format, "Playing local file");
        Ok(())
    }

    fn info(&self) -> String {
        format!("Local File: {} ({})", self.path, self.format)
    }

    fn is_ready(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }
}
