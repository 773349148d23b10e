//! In-memory host collaborators.
//!
//! Each type mirrors the host's observable behavior: unregistered
//! permissions are never granted, the catalog only knows the short names it
//! was built with, and containers refuse items once their slots are full.

use crate::error::HostError;
use crate::host::{ConfigStore, ItemCatalog, PermissionRegistry, PlayerInventory};
use crate::types::{ContainerKind, Item, Player, SkinId};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};

// ================================================================
// Permissions
// ================================================================

#[derive(Debug, Default)]
pub struct MemoryPermissions {
    /// permission name -> owning plugin
    registered: HashMap<String, String>,
    user_grants: HashMap<String, HashSet<String>>,
    group_grants: HashMap<String, HashSet<String>>,
    memberships: HashMap<String, HashSet<String>>,
}

impl MemoryPermissions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `name` directly to a user. Returns `false` when the
    /// permission was never registered.
    pub fn grant_user(&mut self, user_id: &str, name: &str) -> bool {
        if !self.permission_exists(name) {
            return false;
        }
        self.user_grants
            .entry(user_id.to_string())
            .or_default()
            .insert(name.to_string());
        true
    }

    pub fn revoke_user(&mut self, user_id: &str, name: &str) {
        if let Some(grants) = self.user_grants.get_mut(user_id) {
            grants.remove(name);
        }
    }

    pub fn grant_group(&mut self, group: &str, name: &str) -> bool {
        if !self.permission_exists(name) {
            return false;
        }
        self.group_grants
            .entry(group.to_string())
            .or_default()
            .insert(name.to_string());
        true
    }

    pub fn add_user_to_group(&mut self, user_id: &str, group: &str) {
        self.memberships
            .entry(user_id.to_string())
            .or_default()
            .insert(group.to_string());
    }

    /// Plugin that registered `name`, if any.
    pub fn owner_of(&self, name: &str) -> Option<&str> {
        self.registered.get(name).map(String::as_str)
    }

    pub fn registered_count(&self) -> usize {
        self.registered.len()
    }
}

impl PermissionRegistry for MemoryPermissions {
    fn register_permission(&mut self, name: &str, owner: &str) {
        self.registered
            .entry(name.to_string())
            .or_insert_with(|| owner.to_string());
    }

    fn permission_exists(&self, name: &str) -> bool {
        self.registered.contains_key(name)
    }

    fn user_has_permission(&self, user_id: &str, name: &str) -> bool {
        if !self.permission_exists(name) {
            return false;
        }
        if self
            .user_grants
            .get(user_id)
            .is_some_and(|grants| grants.contains(name))
        {
            return true;
        }
        self.memberships.get(user_id).is_some_and(|groups| {
            groups.iter().any(|group| {
                self.group_grants
                    .get(group)
                    .is_some_and(|grants| grants.contains(name))
            })
        })
    }
}

// ================================================================
// Catalog
// ================================================================

#[derive(Debug, Clone, Copy)]
struct CatalogEntry {
    /// Whether the item spawns a held entity when equipped.
    holdable: bool,
}

#[derive(Debug)]
pub struct MemoryCatalog {
    entries: HashMap<String, CatalogEntry>,
    next_net_id: Cell<u64>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            next_net_id: Cell::new(1),
        }
    }

    /// Catalog with the items a fresh spawn normally touches.
    pub fn with_starter_items() -> Self {
        Self::new()
            .with_holdable("rock")
            .with_holdable("torch")
            .with_holdable("hatchet")
            .with_holdable("pickaxe")
            .with_item("bandage")
            .with_item("apple")
    }

    pub fn with_item(mut self, short_name: &str) -> Self {
        self.entries
            .insert(short_name.to_string(), CatalogEntry { holdable: false });
        self
    }

    pub fn with_holdable(mut self, short_name: &str) -> Self {
        self.entries
            .insert(short_name.to_string(), CatalogEntry { holdable: true });
        self
    }

    pub fn contains(&self, short_name: &str) -> bool {
        self.entries.contains_key(short_name)
    }

    fn allocate_net_id(&self) -> u64 {
        let id = self.next_net_id.get();
        self.next_net_id.set(id + 1);
        id
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemCatalog for MemoryCatalog {
    fn create_item(&self, short_name: &str, amount: u32, skin: SkinId) -> Option<Item> {
        let entry = self.entries.get(short_name)?;
        let item = Item::new(short_name, amount.max(1), skin);
        Some(if entry.holdable {
            item.with_held_entity(self.allocate_net_id())
        } else {
            item
        })
    }
}

// ================================================================
// Inventory
// ================================================================

#[derive(Debug, Default)]
pub struct MemoryInventory {
    owner: Option<Player>,
    containers: BTreeMap<ContainerKind, Vec<Item>>,
}

impl MemoryInventory {
    pub fn new(owner: Player) -> Self {
        Self {
            owner: Some(owner),
            containers: BTreeMap::new(),
        }
    }

    /// Inventory whose player entity has already been destroyed.
    pub fn orphaned() -> Self {
        Self::default()
    }

    /// Fills the belt with `kit` the way the host grants its default
    /// loadout. Unknown short names are skipped. Items that no longer fit
    /// on the belt are returned.
    pub fn grant_kit(&mut self, catalog: &dyn ItemCatalog, kit: &[&str]) -> Vec<Item> {
        let mut overflow = Vec::new();
        for short_name in kit {
            if let Some(item) = catalog.create_item(short_name, 1, 0) {
                if let Err(item) = self.insert(ContainerKind::Belt, item) {
                    overflow.push(item);
                }
            }
        }
        overflow
    }

    pub fn container(&self, kind: ContainerKind) -> &[Item] {
        self.containers.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn count(&self, short_name: &str) -> usize {
        self.items()
            .into_iter()
            .filter(|item| item.short_name == short_name)
            .count()
    }

    pub fn find(&self, short_name: &str) -> Option<&Item> {
        self.items()
            .into_iter()
            .find(|item| item.short_name == short_name)
    }

    pub fn len(&self) -> usize {
        self.containers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PlayerInventory for MemoryInventory {
    fn owner(&self) -> Option<&Player> {
        self.owner.as_ref()
    }

    fn items(&self) -> Vec<&Item> {
        self.containers.values().flatten().collect()
    }

    fn all_items_mut(&mut self) -> Vec<&mut Item> {
        self.containers.values_mut().flatten().collect()
    }

    fn strip(&mut self) {
        self.containers.clear();
    }

    fn insert(&mut self, container: ContainerKind, item: Item) -> Result<(), Item> {
        let slots = self.containers.entry(container).or_default();
        if slots.len() >= container.capacity() {
            return Err(item);
        }
        slots.push(item);
        Ok(())
    }
}

// ================================================================
// Config store
// ================================================================

#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    contents: RefCell<Option<String>>,
    writes: Cell<usize>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: RefCell::new(Some(contents.into())),
            writes: Cell::new(0),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn read(&self) -> Result<Option<String>, HostError> {
        Ok(self.contents.borrow().clone())
    }

    fn write(&self, contents: &str) -> Result<(), HostError> {
        *self.contents.borrow_mut() = Some(contents.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
