// Copyright (C) 2025 aidan-es. Licensed under the GNU AGPLv3.
use std::path::PathBuf;

pub const DEFAULT_IMAGE_DIR: &str = "./img";
pub const DEFAULT_TEMPLATE_PATH: &str = "index-template.html";
pub const DEFAULT_OUTPUT_PATH: &str = "index.html";

/// Where a site build reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Every entry in this directory must be a nade image.
    pub image_dir: PathBuf,
    pub template_path: PathBuf,
    /// Overwritten on every successful build.
    pub output_path: PathBuf,
}

impl SiteConfig {
    pub fn new(
        image_dir: impl Into<PathBuf>,
        template_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            image_dir: image_dir.into(),
            template_path: template_path.into(),
            output_path: output_path.into(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_DIR, DEFAULT_TEMPLATE_PATH, DEFAULT_OUTPUT_PATH)
    }
}
