//! Persisted plugin configuration: the skin map, the loadout policy and the
//! version-gated migration that runs on every load.
//!
//! The on-disk document keeps the host's established key names so existing
//! server configs load unchanged:
//!
//! ```json
//! {
//!   "Version": "1.0.1",
//!   "Loadout Policy": "patch",
//!   "Custom Item Skins": {
//!     "rock": 0,
//!     "torch": 0
//!   }
//! }
//! ```

use crate::error::SkinChangerError;
use crate::version::is_older;
use loadout_sdk::{ConfigStore, DEFAULT_SKIN, SkinId};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Version stamped into every saved document.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Documents older than this are replaced by the default template; the
/// schema changed incompatibly at this release.
pub const BREAKING_VERSION: &str = "1.0.1";

/// How starting items are customized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadoutPolicy {
    #[default]
    /// Re-skin the items the host granted and let its grant stand.
    Patch,
    /// Strip the inventory and grant exactly one of each configured item.
    Rebuild,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinConfig {
    /// `null` or missing reads as `""`, which is older than every release.
    #[serde(rename = "Version", default, deserialize_with = "null_as_empty")]
    pub version: String,

    #[serde(rename = "Loadout Policy", default)]
    pub policy: LoadoutPolicy,

    /// Item short name -> skin id; `0` keeps the host default.
    /// Sorted, so rebuilds grant items in ascending short-name order.
    #[serde(rename = "Custom Item Skins", default)]
    pub skins: BTreeMap<String, SkinId>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for SkinConfig {
    fn default() -> Self {
        Self {
            version: PLUGIN_VERSION.to_string(),
            policy: LoadoutPolicy::default(),
            skins: [("rock", DEFAULT_SKIN), ("torch", DEFAULT_SKIN)]
                .into_iter()
                .map(|(name, skin)| (name.to_string(), skin))
                .collect(),
        }
    }
}

impl SkinConfig {
    /// Configured non-zero skin for `short_name`.
    pub fn override_for(&self, short_name: &str) -> Option<SkinId> {
        self.skins
            .get(short_name)
            .copied()
            .filter(|&skin| skin != DEFAULT_SKIN)
    }

    pub fn with_skin(mut self, short_name: &str, skin: SkinId) -> Self {
        self.skins.insert(short_name.to_string(), skin);
        self
    }

    pub fn with_policy(mut self, policy: LoadoutPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Loads, migrates and saves [`SkinConfig`] documents.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    current_version: String,
    breaking_version: String,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::with_versions(PLUGIN_VERSION, BREAKING_VERSION)
    }

    /// Loader for an explicit running version and breaking threshold.
    pub fn with_versions(current: &str, breaking: &str) -> Self {
        Self {
            current_version: current.to_string(),
            breaking_version: breaking.to_string(),
        }
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// Default template stamped with the running version.
    pub fn default_config(&self) -> SkinConfig {
        SkinConfig {
            version: self.current_version.clone(),
            ..SkinConfig::default()
        }
    }

    /// Reads the stored document. `None` when nothing was saved yet.
    pub fn load(&self, store: &dyn ConfigStore) -> Result<Option<SkinConfig>, SkinChangerError> {
        match store.read()? {
            Some(raw) => Ok(Some(SkinConfig::from_json(&raw)?)),
            None => Ok(None),
        }
    }

    /// Brings `doc` up to the running version.
    ///
    /// Documents older than the breaking threshold are replaced by the
    /// default template; otherwise only the version is restamped. Documents
    /// from the same or a newer release are returned untouched.
    pub fn migrate(&self, doc: SkinConfig) -> SkinConfig {
        if !is_older(&doc.version, &self.current_version) {
            return doc;
        }

        warn!("Config changes detected! Updating...");
        let previous = doc.version.clone();
        let mut migrated = if is_older(&doc.version, &self.breaking_version) {
            self.default_config()
        } else {
            doc
        };
        migrated.version = self.current_version.clone();
        warn!(
            from = %previous,
            to = %self.current_version,
            "Config update complete! Updated from version {} to {}",
            previous,
            self.current_version
        );
        migrated
    }

    pub fn save(&self, store: &dyn ConfigStore, doc: &SkinConfig) -> Result<(), SkinChangerError> {
        store.write(&doc.to_json_pretty()?)?;
        Ok(())
    }

    /// Startup path: load (or default), migrate, save back.
    ///
    /// A document that fails to parse is reported and replaced by the
    /// default template for this session only; the file on disk is left as
    /// is so the operator can repair it.
    pub fn load_and_save(&self, store: &dyn ConfigStore) -> Result<SkinConfig, SkinChangerError> {
        let loaded = match self.load(store) {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                info!("No configuration found, writing defaults");
                self.default_config()
            }
            Err(SkinChangerError::Serialization(e)) => {
                warn!(
                    "Failed to parse configuration: {}. Using defaults until it is fixed.",
                    e
                );
                return Ok(self.default_config());
            }
            Err(e) => return Err(e),
        };

        let config = self.migrate(loaded);
        self.save(store, &config)?;
        Ok(config)
    }
}
