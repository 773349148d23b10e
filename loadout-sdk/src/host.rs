//! Collaborator traits implemented by the host and consumed by plugins.

use crate::error::HostError;
use crate::types::{ContainerKind, HookResult, Item, Player, PluginInfo, SkinId};

/// Named capabilities that operators grant per user or group.
pub trait PermissionRegistry {
    /// Registers `name` on behalf of plugin `owner`. Registering an existing
    /// name is a no-op.
    fn register_permission(&mut self, name: &str, owner: &str);

    fn permission_exists(&self, name: &str) -> bool;

    /// Live lookup; `user_id` is the decimal form of the player's id.
    fn user_has_permission(&self, user_id: &str, name: &str) -> bool;
}

/// The host's item catalog.
pub trait ItemCatalog {
    /// Creates a fresh item instance, or `None` when `short_name` is not in
    /// the catalog. A `skin` of `0` uses the catalog default.
    fn create_item(&self, short_name: &str, amount: u32, skin: SkinId) -> Option<Item>;
}

/// A player's inventory as seen from a hook.
pub trait PlayerInventory {
    /// The owning player, `None` when the player entity is already gone.
    fn owner(&self) -> Option<&Player>;

    /// Every item across all containers, in container then slot order.
    fn items(&self) -> Vec<&Item>;

    fn all_items_mut(&mut self) -> Vec<&mut Item>;

    /// Removes every item from every container.
    fn strip(&mut self);

    /// Places `item` in the first free slot of `container`. Hands the item
    /// back when the container is full.
    fn insert(&mut self, container: ContainerKind, item: Item) -> Result<(), Item>;
}

/// Load/save of a plugin's persisted configuration document.
pub trait ConfigStore {
    /// Returns the raw document, or `None` when nothing has been saved yet.
    fn read(&self) -> Result<Option<String>, HostError>;

    fn write(&self, contents: &str) -> Result<(), HostError>;
}

/// Lifecycle every plugin implements.
pub trait Plugin {
    type Error: std::error::Error;

    fn info(&self) -> PluginInfo;

    /// Called once when the host loads the plugin.
    fn init(&mut self, permissions: &mut dyn PermissionRegistry) -> Result<(), Self::Error>;

    /// Called when the host unloads the plugin. Drops all plugin state.
    fn unload(&mut self);
}

/// Optional: plugin reacts to a player receiving their starting items.
///
/// Invoked synchronously once per spawn, after the host populated the
/// inventory. Returning [`HookResult::Handled`] tells the host the
/// plugin replaced the loadout itself.
pub trait DefaultItemsHook {
    fn on_default_items_received(
        &self,
        inventory: Option<&mut dyn PlayerInventory>,
        permissions: &dyn PermissionRegistry,
        catalog: &dyn ItemCatalog,
    ) -> HookResult;
}
