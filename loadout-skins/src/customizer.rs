//! Applies the configured skins to a player's starting loadout.

use crate::config::{LoadoutPolicy, SkinConfig};
use crate::permissions::PermissionGate;
use loadout_sdk::{
    ContainerKind, HookResult, ItemCatalog, OwnershipKind, PermissionRegistry, PlayerId,
    PlayerInventory,
};
use tracing::debug;

/// What a single hook invocation did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadoutOutcome {
    pub result: HookResult,
    /// Policy that ran; `None` when the hook deferred to the host.
    pub policy: Option<LoadoutPolicy>,
    /// Items re-skinned in place.
    pub patched: usize,
    /// Items created by a rebuild.
    pub granted: usize,
    /// Configured short names that produced no item (unknown to the
    /// catalog, or no room left on the belt).
    pub skipped: Vec<String>,
}

impl LoadoutOutcome {
    fn deferred() -> Self {
        Self::default()
    }
}

/// Holds the active configuration and permission gate for hook dispatch.
/// Replaced wholesale on reload, never mutated while handling a hook.
#[derive(Debug, Clone)]
pub struct LoadoutCustomizer {
    config: SkinConfig,
    gate: PermissionGate,
}

impl LoadoutCustomizer {
    pub fn new(config: SkinConfig, gate: PermissionGate) -> Self {
        Self { config, gate }
    }

    pub fn config(&self) -> &SkinConfig {
        &self.config
    }

    /// Customizes `inventory` according to the configured policy.
    ///
    /// Does nothing when the inventory or its owner is missing, or when the
    /// owner lacks the `use` permission.
    pub fn apply(
        &self,
        inventory: Option<&mut dyn PlayerInventory>,
        permissions: &dyn PermissionRegistry,
        catalog: &dyn ItemCatalog,
    ) -> LoadoutOutcome {
        let Some(inventory) = inventory else {
            return LoadoutOutcome::deferred();
        };
        let player_id = match inventory.owner() {
            Some(player) if self.gate.check(permissions, player) => player.id,
            _ => return LoadoutOutcome::deferred(),
        };

        match self.config.policy {
            LoadoutPolicy::Patch => self.patch_in_place(inventory, player_id),
            LoadoutPolicy::Rebuild => self.rebuild(inventory, catalog, player_id),
        }
    }

    fn patch_in_place(&self, inventory: &mut dyn PlayerInventory, player_id: PlayerId) -> LoadoutOutcome {
        let mut patched = 0;
        for item in inventory.all_items_mut() {
            let Some(skin) = self.config.override_for(&item.short_name) else {
                continue;
            };
            item.set_skin(skin);
            item.mark_dirty();
            if let Some(held) = item.held_entity_mut() {
                held.skin_id = skin;
                held.send_network_update();
            }
            patched += 1;
        }

        debug!(player = %player_id, patched, "Patched starting item skins");
        LoadoutOutcome {
            result: HookResult::Continue,
            policy: Some(LoadoutPolicy::Patch),
            patched,
            ..Default::default()
        }
    }

    fn rebuild(
        &self,
        inventory: &mut dyn PlayerInventory,
        catalog: &dyn ItemCatalog,
        player_id: PlayerId,
    ) -> LoadoutOutcome {
        inventory.strip();

        let mut granted = 0;
        let mut skipped = Vec::new();
        for (short_name, &skin) in &self.config.skins {
            let Some(mut item) = catalog.create_item(short_name, 1, skin) else {
                debug!(item = %short_name, "Unknown item short name, skipping");
                skipped.push(short_name.clone());
                continue;
            };
            item.assign_owner(player_id, OwnershipKind::Spawned);

            match inventory.insert(ContainerKind::Belt, item) {
                Ok(()) => granted += 1,
                Err(item) => {
                    debug!(item = %item.short_name, "Belt full, dropping item");
                    skipped.push(item.short_name);
                }
            }
        }

        debug!(player = %player_id, granted, skipped = skipped.len(), "Rebuilt starting loadout");
        LoadoutOutcome {
            result: HookResult::Handled,
            policy: Some(LoadoutPolicy::Rebuild),
            granted,
            skipped,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadout_sdk::memory::{MemoryCatalog, MemoryInventory, MemoryPermissions};
    use loadout_sdk::{Player, PluginInfo};

    const PLAYER: u64 = 76561198000000001;

    struct Fixture {
        permissions: MemoryPermissions,
        catalog: MemoryCatalog,
        inventory: MemoryInventory,
        gate: PermissionGate,
    }

    fn fixture(permitted: bool) -> Fixture {
        let mut permissions = MemoryPermissions::new();
        let mut gate = PermissionGate::new(&PluginInfo {
            name: "Default Item Skin Changer".into(),
            ..Default::default()
        });
        gate.register_once(&mut permissions);
        if permitted {
            permissions.grant_user(&PLAYER.to_string(), "defaultitemskinchanger.use");
        }
        let catalog = MemoryCatalog::with_starter_items();
        let mut inventory = MemoryInventory::new(Player::new(PLAYER, "alice"));
        inventory.grant_kit(&catalog, &["rock", "torch", "bandage"]);
        Fixture {
            permissions,
            catalog,
            inventory,
            gate,
        }
    }

    fn sample_config(policy: LoadoutPolicy) -> SkinConfig {
        SkinConfig::default()
            .with_skin("rock", 0)
            .with_skin("torch", 5)
            .with_policy(policy)
    }

    #[test]
    fn patch_sets_configured_skin_and_syncs_held_entity() {
        let mut f = fixture(true);
        let customizer = LoadoutCustomizer::new(sample_config(LoadoutPolicy::Patch), f.gate.clone());

        let outcome = customizer.apply(Some(&mut f.inventory), &f.permissions, &f.catalog);
        assert_eq!(outcome.result, HookResult::Continue);
        assert_eq!(outcome.policy, Some(LoadoutPolicy::Patch));
        assert_eq!(outcome.patched, 1);

        let torch = f.inventory.find("torch").unwrap();
        assert_eq!(torch.skin, 5);
        assert!(torch.dirty);
        let held = torch.held_entity.as_ref().unwrap();
        assert_eq!(held.skin_id, 5);
        assert_eq!(held.network_updates, 1);

        let rock = f.inventory.find("rock").unwrap();
        assert_eq!(rock.skin, 0);
        assert!(!rock.dirty);
        assert_eq!(rock.held_entity.as_ref().unwrap().network_updates, 0);
    }

    #[test]
    fn patch_keeps_unconfigured_items() {
        let mut f = fixture(true);
        let customizer = LoadoutCustomizer::new(sample_config(LoadoutPolicy::Patch), f.gate.clone());
        customizer.apply(Some(&mut f.inventory), &f.permissions, &f.catalog);
        assert_eq!(f.inventory.len(), 3);
        assert_eq!(f.inventory.count("bandage"), 1);
    }

    #[test]
    fn rebuild_grants_exactly_configured_items() {
        let mut f = fixture(true);
        let customizer = LoadoutCustomizer::new(sample_config(LoadoutPolicy::Rebuild), f.gate.clone());

        let outcome = customizer.apply(Some(&mut f.inventory), &f.permissions, &f.catalog);
        assert_eq!(outcome.result, HookResult::Handled);
        assert_eq!(outcome.granted, 2);
        assert!(outcome.skipped.is_empty());

        let belt = f.inventory.container(ContainerKind::Belt);
        let names: Vec<&str> = belt.iter().map(|i| i.short_name.as_str()).collect();
        assert_eq!(names, vec!["rock", "torch"]);
        assert_eq!(belt[0].skin, 0);
        assert_eq!(belt[1].skin, 5);
        assert_eq!(f.inventory.count("bandage"), 0);
        for item in belt {
            let owner = item.ownership.unwrap();
            assert_eq!(owner.player, PlayerId::new(PLAYER));
            assert_eq!(owner.kind, OwnershipKind::Spawned);
        }
    }

    #[test]
    fn rebuild_skips_unknown_short_names() {
        let mut f = fixture(true);
        let config = sample_config(LoadoutPolicy::Rebuild).with_skin("not.an.item", 3);
        let customizer = LoadoutCustomizer::new(config, f.gate.clone());

        let outcome = customizer.apply(Some(&mut f.inventory), &f.permissions, &f.catalog);
        assert_eq!(outcome.granted, 2);
        assert_eq!(outcome.skipped, vec!["not.an.item".to_string()]);
        assert_eq!(f.inventory.len(), 2);
    }

    #[test]
    fn rebuild_drops_items_beyond_belt_capacity() {
        let mut f = fixture(true);
        let mut config = SkinConfig::default().with_policy(LoadoutPolicy::Rebuild);
        let mut catalog = MemoryCatalog::new();
        for i in 0..8 {
            let name = format!("item{i}");
            catalog = catalog.with_item(&name);
            config = config.with_skin(&name, 0);
        }
        config.skins.remove("rock");
        config.skins.remove("torch");
        let customizer = LoadoutCustomizer::new(config, f.gate.clone());

        let outcome = customizer.apply(Some(&mut f.inventory), &f.permissions, &catalog);
        assert_eq!(outcome.granted, ContainerKind::Belt.capacity());
        assert_eq!(outcome.skipped, vec!["item6".to_string(), "item7".to_string()]);
    }

    #[test]
    fn without_permission_nothing_changes() {
        for policy in [LoadoutPolicy::Patch, LoadoutPolicy::Rebuild] {
            let mut f = fixture(false);
            let before: Vec<_> = f.inventory.items().into_iter().cloned().collect();
            let customizer = LoadoutCustomizer::new(sample_config(policy), f.gate.clone());

            let outcome = customizer.apply(Some(&mut f.inventory), &f.permissions, &f.catalog);
            assert_eq!(outcome, LoadoutOutcome::default());
            let after: Vec<_> = f.inventory.items().into_iter().cloned().collect();
            assert_eq!(before, after);
        }
    }

    #[test]
    fn missing_inventory_or_owner_defers() {
        let f = fixture(true);
        let customizer = LoadoutCustomizer::new(sample_config(LoadoutPolicy::Rebuild), f.gate.clone());

        let outcome = customizer.apply(None, &f.permissions, &f.catalog);
        assert_eq!(outcome.result, HookResult::Continue);

        let mut orphan = MemoryInventory::orphaned();
        let outcome = customizer.apply(Some(&mut orphan), &f.permissions, &f.catalog);
        assert_eq!(outcome.result, HookResult::Continue);
        assert!(orphan.is_empty());
    }
}
