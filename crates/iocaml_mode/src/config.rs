//! Notebook defaults applied at initialization.

use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::host::{PagerRendering, MODE_NAME};

/// Environment variable overriding [`NotebookConfig::tooltip_delay`], in ms.
pub const ENV_TOOLTIP_DELAY: &str = "IOCAML_TOOLTIP_DELAY_MS";
/// Environment variable overriding [`NotebookConfig::pager`]: `html` or `pre`.
pub const ENV_PAGER: &str = "IOCAML_PAGER";
/// Environment variable overriding [`NotebookConfig::default_language`].
pub const ENV_DEFAULT_LANGUAGE: &str = "IOCAML_DEFAULT_LANGUAGE";

/// Settings pushed into the host when the application initializes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotebookConfig {
    /// Delay before tooltips open.
    pub tooltip_delay: Duration,
    /// Mode given to newly created code cells.
    pub default_cell_mode: String,
    /// Pager text rendering.
    pub pager: PagerRendering,
    /// Language written into notebook metadata that lacks one.
    pub default_language: String,
}

impl Default for NotebookConfig {
    fn default() -> Self {
        NotebookConfig {
            tooltip_delay: Duration::from_millis(800),
            default_cell_mode: MODE_NAME.to_owned(),
            pager: PagerRendering::Html,
            default_language: "ocaml".to_owned(),
        }
    }
}

impl NotebookConfig {
    /// Defaults, overridden by `IOCAML_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults, overridden by whatever `lookup` returns for each
    /// `IOCAML_*` variable.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_TOOLTIP_DELAY) {
            let millis = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTooltipDelay {
                    var: ENV_TOOLTIP_DELAY,
                    value: value.clone(),
                })?;
            config.tooltip_delay = Duration::from_millis(millis);
        }

        if let Some(value) = lookup(ENV_PAGER) {
            config.pager = value.parse()?;
        }

        if let Some(value) = lookup(ENV_DEFAULT_LANGUAGE) {
            let value = value.trim();
            if value.is_empty() {
                return Err(ConfigError::EmptyValue {
                    var: ENV_DEFAULT_LANGUAGE,
                });
            }
            value.clone_into(&mut config.default_language);
        }

        tracing::debug!(?config, "notebook configuration loaded");
        Ok(config)
    }
}

impl FromStr for PagerRendering {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "div" => Ok(PagerRendering::Html),
            "pre" | "preformatted" => Ok(PagerRendering::Preformatted),
            _ => Err(ConfigError::UnknownPagerRendering(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap/expect for clarity"
)]
