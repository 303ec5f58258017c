use std::path::{Path, PathBuf};

use config::{Config, Environment};
use serde::Deserialize;

use crate::error::SyncError;

pub const DEFAULT_MARKDOWN: &str = "content/site-text.md";
pub const DEFAULT_INDEX: &str = "index.html";
pub const DEFAULT_GALLERY: &str = "galerii.html";

/// Locations of the three files, relative to the site root unless absolute.
/// Each can be overridden with `SITE_SYNC_MARKDOWN`, `SITE_SYNC_INDEX` or
/// `SITE_SYNC_GALLERY`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub markdown: PathBuf,
    pub index: PathBuf,
    pub gallery: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            markdown: PathBuf::from(DEFAULT_MARKDOWN),
            index: PathBuf::from(DEFAULT_INDEX),
            gallery: PathBuf::from(DEFAULT_GALLERY),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, SyncError> {
        let settings = Config::builder()
            .set_default("markdown", DEFAULT_MARKDOWN)?
            .set_default("index", DEFAULT_INDEX)?
            .set_default("gallery", DEFAULT_GALLERY)?
            .add_source(Environment::with_prefix("SITE_SYNC"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

/// Resolved paths handed to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPaths {
    pub markdown: PathBuf,
    pub index: PathBuf,
    pub gallery: PathBuf,
}

impl SyncPaths {
    pub fn resolve(root: &Path, settings: &Settings) -> Self {
        Self {
            markdown: root.join(&settings.markdown),
            index: root.join(&settings.index),
            gallery: root.join(&settings.gallery),
        }
    }

    #[cfg(test)]
    pub fn from_root(root: &Path) -> Self {
        Self::resolve(root, &Settings::default())
    }
}
