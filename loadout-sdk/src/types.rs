//! Host-owned data handed to plugins: players, items, held entities and
//! plugin metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Visual skin identifier. `0` selects the catalog's default appearance.
pub type SkinId = u64;

/// The skin id meaning "no override".
pub const DEFAULT_SKIN: SkinId = 0;

// ---- Players ----

/// Platform user id of a connected player.
///
/// The permission registry keys users on the decimal string form, which is
/// what `Display` renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u64);

impl PlayerId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PlayerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
}

impl Player {
    pub fn new(id: u64, display_name: impl Into<String>) -> Self {
        Self {
            id: PlayerId::new(id),
            display_name: display_name.into(),
        }
    }
}

// ---- Items ----

/// Unique identifier of an item instance.
/// Uses UUID v7 so freshly created items sort after older ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Player inventory containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Main,
    /// Hotbar; the container starting kits are placed in.
    Belt,
    Wear,
}

impl ContainerKind {
    /// Number of slots the host gives each container.
    pub fn capacity(&self) -> usize {
        match self {
            Self::Main => 24,
            Self::Belt => 6,
            Self::Wear => 8,
        }
    }
}

/// Why a player owns an item. Downstream anti-cheat and stacking logic
/// treat spawned items differently from everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OwnershipKind {
    Spawned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOwnership {
    pub player: PlayerId,
    pub kind: OwnershipKind,
}

/// World entity backing an item while it is held (tools, weapons, torches).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldEntity {
    pub net_id: u64,
    pub skin_id: SkinId,
    /// Number of network snapshots queued for observers.
    pub network_updates: u32,
}

impl HeldEntity {
    pub fn new(net_id: u64, skin_id: SkinId) -> Self {
        Self {
            net_id,
            skin_id,
            network_updates: 0,
        }
    }

    /// Queues a snapshot so observers see the entity's current state.
    pub fn send_network_update(&mut self) {
        self.network_updates = self.network_updates.saturating_add(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub short_name: String,
    pub amount: u32,
    pub skin: SkinId,
    /// Set when the item changed and must be persisted/replicated.
    pub dirty: bool,
    pub ownership: Option<ItemOwnership>,
    pub held_entity: Option<HeldEntity>,
}

impl Item {
    pub fn new(short_name: impl Into<String>, amount: u32, skin: SkinId) -> Self {
        Self {
            id: ItemId::new(),
            short_name: short_name.into(),
            amount,
            skin,
            dirty: false,
            ownership: None,
            held_entity: None,
        }
    }

    pub fn with_held_entity(mut self, net_id: u64) -> Self {
        self.held_entity = Some(HeldEntity::new(net_id, self.skin));
        self
    }

    pub fn set_skin(&mut self, skin: SkinId) {
        self.skin = skin;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn held_entity_mut(&mut self) -> Option<&mut HeldEntity> {
        self.held_entity.as_mut()
    }

    pub fn assign_owner(&mut self, player: PlayerId, kind: OwnershipKind) {
        self.ownership = Some(ItemOwnership { player, kind });
    }
}

// ---- Hooks ----

/// Return value of an event hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HookResult {
    /// Let the host run its own behavior for the event.
    #[default]
    Continue,
    /// The plugin fully handled the event; suppress the host default.
    Handled,
}

// ---- Plugin Metadata ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    pub name: String,
    pub author: String,
    pub version: String,
    pub description: String,
}

impl Default for PluginInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            author: String::new(),
            version: "0.1.0".into(),
            description: String::new(),
        }
    }
}

impl PluginInfo {
    /// Lowercased name with whitespace removed; permissions are registered
    /// under this prefix.
    pub fn namespace(&self) -> String {
        self.name
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect()
    }
}
