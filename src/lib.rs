//! Mse-Manifest - JSON manifests for Media Source Extensions players
//!
//! The model and serializer live in `mse-manifest-media`; this crate adds
//! configuration loading and logging setup for programs embedding it.

pub mod config;
pub mod logging;

pub use config::{load_config, load_config_or_default, Config, OutputConfig};
pub use logging::init_logging;
pub use mse_manifest_media as media;

use anyhow::{Context, Result};
use mse_manifest_media::Manifest;

/// Render a manifest using the output settings of `config`.
pub fn render_manifest(manifest: &Manifest, config: &Config) -> Result<String> {
    manifest
        .render(&config.render_options())
        .with_context(|| format!("Failed to render manifest for {:?}", manifest.content_type))
}
