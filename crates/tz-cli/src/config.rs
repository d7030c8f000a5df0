//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tz_core::{DEFAULT_FORMAT, DEFAULT_OPAQUE_TAGS, RenderContext, RenderError, Zone};

use crate::cli::RenderArgs;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Locale used for month and day names.
    pub locale: String,
    /// Zone timestamps are displayed in.
    pub zone: Zone,
    /// Name shown after the offset. Detected for `local` and `utc` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_label: Option<String>,
    /// strftime-style date/time format.
    pub format: String,
    /// Elements whose text is never rewritten.
    pub opaque_tags: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en_US".to_string(),
            zone: Zone::Local,
            zone_label: None,
            format: DEFAULT_FORMAT.to_string(),
            opaque_tags: DEFAULT_OPAQUE_TAGS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TZMARK_*)
        figment = figment.merge(Env::prefixed("TZMARK_"));

        figment.extract()
    }

    /// Applies command-line overrides on top of the loaded values.
    #[must_use]
    pub fn with_overrides(mut self, args: &RenderArgs) -> Self {
        if let Some(locale) = &args.locale {
            self.locale.clone_from(locale);
        }
        if let Some(zone) = args.zone {
            self.zone = zone;
        }
        if let Some(label) = &args.zone_label {
            self.zone_label = Some(label.clone());
        }
        if let Some(format) = &args.format {
            self.format.clone_from(format);
        }
        self
    }

    /// Builds the render context this configuration describes.
    pub fn render_context(&self) -> Result<RenderContext, RenderError> {
        let context = RenderContext::new(&self.locale, self.zone, self.format.clone())?;
        Ok(match &self.zone_label {
            Some(label) => context.with_zone_label(label.clone()),
            None => context,
        })
    }
}

/// Returns the platform-specific config directory for tzmark.
///
/// On Linux: `~/.config/tzmark`
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tzmark"))
}
