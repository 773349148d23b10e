//! Host API surface for spawn loadout plugins.
//!
//! Plugins are written against the collaborator traits in [`host`]: a
//! permission registry, an item catalog, a player inventory and a config
//! store. The host owns every item and player; plugins only read short
//! names and write skins, ownership and container placement.
//!
//! [`memory`] provides in-process implementations of each collaborator
//! that follow the host's semantics closely enough to drive a plugin end to
//! end without a running game server.

mod error;
pub mod host;
pub mod memory;
mod store;
pub mod types;

pub use error::HostError;
pub use host::{
    ConfigStore, DefaultItemsHook, ItemCatalog, PermissionRegistry, PlayerInventory, Plugin,
};
pub use store::JsonFileStore;
pub use types::*;
