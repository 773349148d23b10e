//! Permissions the plugin exposes to server operators.
//!
//! Names are `<plugin namespace>.<suffix>`, e.g.
//! `defaultitemskinchanger.use`. Operators grant them per player or group
//! with the host's own tooling; the plugin only registers and queries.

use loadout_sdk::{PermissionRegistry, Player, PluginInfo};
use tracing::debug;

/// Individual permission the plugin declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Starting items of the player are customized.
    Use,
}

impl Permission {
    pub const ALL: [Permission; 1] = [Permission::Use];

    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Use => "use",
        }
    }

    pub fn full_name(&self, namespace: &str) -> String {
        format!("{namespace}.{}", self.suffix())
    }
}

/// Registers the plugin's permissions and answers "may this player use it".
#[derive(Debug, Clone)]
pub struct PermissionGate {
    namespace: String,
    owner: String,
    registered: bool,
}

impl PermissionGate {
    pub fn new(info: &PluginInfo) -> Self {
        Self {
            namespace: info.namespace(),
            owner: info.name.clone(),
            registered: false,
        }
    }

    pub fn name(&self, permission: Permission) -> String {
        permission.full_name(&self.namespace)
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }

    /// Registers every declared permission the registry does not know yet.
    /// Calling it again against the same registry does nothing; a registry
    /// that dropped the plugin's permissions gets them back.
    pub fn register_once(&mut self, registry: &mut dyn PermissionRegistry) {
        for permission in Permission::ALL {
            let name = self.name(permission);
            if registry.permission_exists(&name) {
                continue;
            }
            debug!(permission = %name, "Registering permission");
            registry.register_permission(&name, &self.owner);
        }
        self.registered = true;
    }

    /// Forgets the registration, as the host does when the plugin unloads.
    pub fn reset(&mut self) {
        self.registered = false;
    }

    pub fn has(
        &self,
        registry: &dyn PermissionRegistry,
        player: &Player,
        permission: Permission,
    ) -> bool {
        registry.user_has_permission(&player.id.to_string(), &self.name(permission))
    }

    /// Whether `player` holds the `use` permission. Always a live lookup.
    pub fn check(&self, registry: &dyn PermissionRegistry, player: &Player) -> bool {
        self.has(registry, player, Permission::Use)
    }
}
