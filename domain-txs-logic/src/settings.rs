use crate::merger::{Merger, CONFIRMATION_DEPTH};
use config::{Config, File};
use serde::Deserialize;

pub const SERVICE_NAME: &str = "DOMAIN_TXS";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub reconciliation: ReconciliationSettings,
    pub tracing: TracingSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ReconciliationSettings {
    pub confirmation_depth: u64,
    pub evict_confirmed: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TracingSettings {
    pub enabled: bool,
    pub format: TracingFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TracingFormat {
    #[default]
    Default,
    Json,
}

impl Default for ReconciliationSettings {
    fn default() -> Self {
        Self {
            confirmation_depth: CONFIRMATION_DEPTH,
            evict_confirmed: false,
        }
    }
}

impl Default for TracingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            format: Default::default(),
        }
    }
}

impl ReconciliationSettings {
    pub fn merger(&self) -> Merger {
        Merger::new(self.confirmation_depth)
    }
}

impl Settings {
    /// Reads the file named by `DOMAIN_TXS__CONFIG`, if any, then overrides
    /// from `DOMAIN_TXS__*` environment variables.
    pub fn build() -> anyhow::Result<Self> {
        let config_path_name = format!("{SERVICE_NAME}__CONFIG");
        let mut builder = Config::builder();
        if let Ok(config_path) = std::env::var(&config_path_name) {
            builder = builder.add_source(File::with_name(&config_path));
            // otherwise read back below as an unknown `config` key
            std::env::remove_var(&config_path_name);
        };
        // `__` keeps keys with underscores addressable (e.g. `confirmation_depth`)
        builder = builder.add_source(
            config::Environment::with_prefix(SERVICE_NAME)
                .separator("__")
                .try_parsing(true),
        );

        let settings: Self = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.reconciliation.confirmation_depth == 0 {
            anyhow::bail!("reconciliation.confirmation_depth must be positive");
        }
        Ok(())
    }
}
