//! Configuration for the file access service.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::Result;

/// How an entry's type is checked against the image category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageDetection {
    /// Trust the declared type carried by the file extension.
    #[default]
    Extension,
    /// Sniff the leading bytes of each file.
    Content,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileAccessConfig {
    /// Overrides the platform document directory when set.
    pub documents_root: Option<PathBuf>,
    pub image_detection: ImageDetection,
}

impl FileAccessConfig {
    /// Read a JSON configuration file. Missing fields fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn with_documents_root<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.documents_root = Some(path.into());
        self
    }

    pub fn with_image_detection(mut self, detection: ImageDetection) -> Self {
        self.image_detection = detection;
        self
    }
}
