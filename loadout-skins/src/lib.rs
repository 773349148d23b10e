//! Default Item Skin Changer.
//!
//! Overrides the skins of the items a player receives when they spawn.
//! Operators map item short names to skin ids in the plugin's config
//! document and grant the `defaultitemskinchanger.use` permission to the
//! players or groups it should apply to.
//!
//! Two policies are available through the config's `Loadout Policy` field:
//!
//! - `patch` re-skins whatever the host granted and lets the host's grant
//!   stand.
//! - `rebuild` strips the inventory and grants exactly one of every
//!   configured item, in ascending short-name order, onto the belt.
//!
//! Everything on the hook path is fail-soft: a missing player, a missing
//! permission or an unknown short name just means fewer custom skins.

mod config;
mod customizer;
mod error;
mod permissions;
mod plugin;
mod version;

pub use config::{BREAKING_VERSION, ConfigLoader, LoadoutPolicy, PLUGIN_VERSION, SkinConfig};
pub use customizer::{LoadoutCustomizer, LoadoutOutcome};
pub use error::SkinChangerError;
pub use permissions::{Permission, PermissionGate};
pub use plugin::{PLUGIN_NAME, SkinChangerPlugin};
pub use version::{compare_versions, is_older};
