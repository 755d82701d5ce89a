mod theme;

use std::path::PathBuf;

use anyhow::Result;
use figment::{
    providers::{Format, Serialized, YamlExtended},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{
    logger,
    ui::{KeyMap, UpdatePolicy},
};

pub use self::theme::Theme;

/// ```yaml
/// theme:
///   tab_group: ...
///   help: ...
/// key_bindings:
///   tab_next:
///     keys: [alt+right]
///     help: Next tab
/// update_policy: broadcast | active-only
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    pub key_bindings: KeyMap,
    pub update_policy: UpdatePolicy,
}

impl Config {
    /// Reads `path`, or `$XDG_CONFIG_HOME/tabgroup/config.yaml` when none is
    /// given. A missing file yields the defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_file = if let Some(path) = path {
            path
        } else {
            let base_dir = xdg::BaseDirectories::with_prefix("tabgroup")?;
            base_dir.get_config_file("config.yaml")
        };

        let config = Self::figment(YamlExtended::file(&config_file)).extract()?;

        logger!(info, "config loaded from {}", config_file.display());
        logger!(debug, "{:?}", config);

        Ok(config)
    }

    fn figment(provider: impl figment::Provider) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(provider)
    }
}
