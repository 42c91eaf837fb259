//! Read-only view of one player's state, captured by the host for a single
//! event. The checks never mutate it and never reach back into the host.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use pvpchecks_types::{BuffId, ItemId, PrefixId, WeaponClass};

use crate::game_data::ARMOR_SLOT_COUNT;

/// Host-assigned player slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Damage-class flags reported for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemFlags {
    pub melee: bool,
    pub ranged: bool,
    pub magic: bool,
    pub summon: bool,
}

/// One inventory or equipment entry. An `id` of 0 is an empty slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub prefix: PrefixId,
    pub max_stack: i32,
    pub flags: ItemFlags,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            prefix: 0,
            max_stack: 1,
            flags: ItemFlags::default(),
        }
    }

    pub fn with_prefix(mut self, prefix: PrefixId) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn with_max_stack(mut self, max_stack: i32) -> Self {
        self.max_stack = max_stack;
        self
    }

    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.id == 0
    }

    pub fn is_prefixed(&self) -> bool {
        self.prefix != 0
    }

    /// Ammunition, potions and other items that stack past one.
    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }

    /// Weapon class from the damage flags. Melee wins over ranged, ranged over
    /// magic; summon weapons count as magic.
    pub fn weapon_class(&self) -> Option<WeaponClass> {
        if self.flags.melee {
            Some(WeaponClass::Melee)
        } else if self.flags.ranged {
            Some(WeaponClass::Ranged)
        } else if self.flags.magic || self.flags.summon {
            Some(WeaponClass::Magic)
        } else {
            None
        }
    }

    /// Name for player-facing messages, falling back to the ID.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            format!("Item #{}", self.id)
        } else {
            self.name.clone()
        }
    }
}

/// Everything the checks need to know about a player at one instant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSnapshot {
    pub player: PlayerId,
    pub name: String,
    /// Player is currently flagged for PvP
    pub in_combat_mode: bool,
    pub selected_item: Option<Item>,
    pub held_item: Option<Item>,
    pub inventory: Vec<Item>,
    pub misc_equips: Vec<Item>,
    /// Slots 0-2 are body armor, slot 9 is the seventh accessory slot
    pub armor: [Item; ARMOR_SLOT_COUNT],
    /// May contain duplicates
    pub buffs: Vec<BuffId>,
    pub region: Option<String>,
    pub capabilities: BTreeSet<String>,
}

impl PlayerSnapshot {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            ..Self::default()
        }
    }

    pub fn has_capability(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }

    /// The item the player is using: the selected item, or the held item if
    /// nothing is selected.
    pub fn active_item(&self) -> Option<&Item> {
        self.selected_item
            .as_ref()
            .filter(|item| !item.is_empty())
            .or_else(|| self.held_item.as_ref().filter(|item| !item.is_empty()))
    }

    pub fn armor_slot(&self, index: usize) -> Option<&Item> {
        self.armor.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_class_from_flags() {
        let melee = ItemFlags {
            melee: true,
            ..Default::default()
        };
        let summon = ItemFlags {
            summon: true,
            ..Default::default()
        };

        assert_eq!(
            Item::new(1, "a").with_flags(melee).weapon_class(),
            Some(WeaponClass::Melee)
        );
        assert_eq!(
            Item::new(1, "a").with_flags(summon).weapon_class(),
            Some(WeaponClass::Magic)
        );
        assert_eq!(Item::new(1, "a").weapon_class(), None);
    }

    #[test]
    fn test_active_item_prefers_selected() {
        let mut snapshot = PlayerSnapshot::new(PlayerId(1));
        snapshot.held_item = Some(Item::new(2, "Held"));
        assert_eq!(snapshot.active_item().map(|i| i.id), Some(2));

        snapshot.selected_item = Some(Item::new(1, "Selected"));
        assert_eq!(snapshot.active_item().map(|i| i.id), Some(1));

        // Empty selection falls back to the held item
        snapshot.selected_item = Some(Item::default());
        assert_eq!(snapshot.active_item().map(|i| i.id), Some(2));
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "player": 3,
            "in_combat_mode": true,
            "selected_item": { "id": 100, "name": "Zenith" },
            "buffs": [10, 10],
            "capabilities": ["pvpchecks.use7thslot"]
        }"#;

        let snapshot: PlayerSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.player, PlayerId(3));
        assert!(snapshot.in_combat_mode);
        assert_eq!(snapshot.active_item().map(|i| i.id), Some(100));
        assert_eq!(snapshot.armor.len(), ARMOR_SLOT_COUNT);
        assert!(snapshot.armor.iter().all(Item::is_empty));
        assert!(snapshot.has_capability("pvpchecks.use7thslot"));
    }
}
