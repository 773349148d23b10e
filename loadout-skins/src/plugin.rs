//! Plugin lifecycle: owns the config store, permission gate and active
//! customizer from `init` until `unload`.

use crate::config::{ConfigLoader, SkinConfig};
use crate::customizer::{LoadoutCustomizer, LoadoutOutcome};
use crate::error::SkinChangerError;
use crate::permissions::PermissionGate;
use loadout_sdk::{
    ConfigStore, DefaultItemsHook, HookResult, ItemCatalog, PermissionRegistry, PlayerInventory,
    Plugin, PluginInfo,
};
use tracing::info;

pub const PLUGIN_NAME: &str = "Default Item Skin Changer";

pub struct SkinChangerPlugin {
    store: Box<dyn ConfigStore>,
    loader: ConfigLoader,
    gate: PermissionGate,
    /// `None` before `init` and after `unload`.
    customizer: Option<LoadoutCustomizer>,
}

impl SkinChangerPlugin {
    pub fn new(store: Box<dyn ConfigStore>) -> Self {
        Self::with_loader(store, ConfigLoader::new())
    }

    pub fn with_loader(store: Box<dyn ConfigStore>, loader: ConfigLoader) -> Self {
        Self {
            store,
            gate: PermissionGate::new(&plugin_info(loader.current_version())),
            loader,
            customizer: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.customizer.is_some()
    }

    pub fn config(&self) -> Option<&SkinConfig> {
        self.customizer.as_ref().map(LoadoutCustomizer::config)
    }

    pub fn permission_gate(&self) -> &PermissionGate {
        &self.gate
    }

    /// Re-reads the stored document and swaps the active configuration.
    pub fn reload_config(&mut self) -> Result<(), SkinChangerError> {
        let config = self.loader.load_and_save(self.store.as_ref())?;
        info!(
            version = %config.version,
            policy = ?config.policy,
            items = config.skins.len(),
            "Configuration loaded"
        );
        self.customizer = Some(LoadoutCustomizer::new(config, self.gate.clone()));
        Ok(())
    }

    /// Hook entry point that also reports what was done.
    pub fn customize_loadout(
        &self,
        inventory: Option<&mut dyn PlayerInventory>,
        permissions: &dyn PermissionRegistry,
        catalog: &dyn ItemCatalog,
    ) -> LoadoutOutcome {
        match &self.customizer {
            Some(customizer) => customizer.apply(inventory, permissions, catalog),
            None => LoadoutOutcome::default(),
        }
    }
}

fn plugin_info(version: &str) -> PluginInfo {
    PluginInfo {
        name: PLUGIN_NAME.into(),
        author: "VisEntities".into(),
        version: version.into(),
        description: "Changes the default skin of items players receive at spawn.".into(),
    }
}

impl Plugin for SkinChangerPlugin {
    type Error = SkinChangerError;

    fn info(&self) -> PluginInfo {
        plugin_info(self.loader.current_version())
    }

    fn init(&mut self, permissions: &mut dyn PermissionRegistry) -> Result<(), SkinChangerError> {
        self.gate.register_once(permissions);
        self.reload_config()
    }

    fn unload(&mut self) {
        self.customizer = None;
        self.gate.reset();
        info!("{} unloaded", PLUGIN_NAME);
    }
}

impl DefaultItemsHook for SkinChangerPlugin {
    fn on_default_items_received(
        &self,
        inventory: Option<&mut dyn PlayerInventory>,
        permissions: &dyn PermissionRegistry,
        catalog: &dyn ItemCatalog,
    ) -> HookResult {
        self.customize_loadout(inventory, permissions, catalog).result
    }
}
