use mse_manifest_media::RenderOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Rendering options for the manifest serializer.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            pretty: self.output.pretty,
            validate: self.output.validate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Indent the rendered manifest (default: true)
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Reject non-finite numbers and segments overlapping the init segment
    #[serde(default)]
    pub validate: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_pretty(),
            validate: false,
        }
    }
}
