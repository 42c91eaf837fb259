//! Persisted rule configuration.
//!
//! `RulesConfig` is the on-disk shape of the rule set. Every field carries a
//! serde default so a partial or older rules file still loads; the defaults
//! match a fresh install.

use serde::{Deserialize, Serialize};

use crate::messages::MessageCatalog;
use crate::{BuffId, ItemId, PrefixId, ProjectileId};

// ═══════════════════════════════════════════════════════════════════════════
// Weapon Classes
// ═══════════════════════════════════════════════════════════════════════════

/// Weapon class used to decide which prefixes are native to an item.
/// Summon weapons are grouped with magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponClass {
    Melee,
    Ranged,
    Magic,
}

impl WeaponClass {
    pub const ALL: [WeaponClass; 3] = [Self::Melee, Self::Ranged, Self::Magic];

    /// The two classes whose prefixes are illegal on this one.
    pub fn others(self) -> [WeaponClass; 2] {
        match self {
            Self::Melee => [Self::Ranged, Self::Magic],
            Self::Ranged => [Self::Melee, Self::Magic],
            Self::Magic => [Self::Melee, Self::Ranged],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Melee => "melee",
            Self::Ranged => "ranged",
            Self::Magic => "magic",
        }
    }
}

/// Which armor slots are scanned for duplicated equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateScope {
    /// The whole armor array, including the seventh accessory slot
    #[default]
    AllSlots,
    /// Only the slots reachable through normal play (excludes the seventh slot)
    WearableSlots,
}

// ═══════════════════════════════════════════════════════════════════════════
// Toggles
// ═══════════════════════════════════════════════════════════════════════════

/// Per-check on/off switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckToggles {
    /// Only enforce inside restricted regions
    pub region: bool,
    pub item: bool,
    pub buff: bool,
    /// Covers illegal weapon prefixes, prefixed ammo and prefixed armor
    pub prefix: bool,
    pub duplicate_accessory: bool,
    pub seventh_slot: bool,
    pub projectile: bool,
}

impl Default for CheckToggles {
    fn default() -> Self {
        Self {
            region: false,
            item: true,
            buff: false,
            prefix: true,
            duplicate_accessory: true,
            seventh_slot: false,
            projectile: false,
        }
    }
}

impl CheckToggles {
    /// Every check switched on. Region restriction is left off so enforcement
    /// applies everywhere.
    pub fn all_checks() -> Self {
        Self {
            region: false,
            item: true,
            buff: true,
            prefix: true,
            duplicate_accessory: true,
            seventh_slot: true,
            projectile: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Prefix Tables
// ═══════════════════════════════════════════════════════════════════════════

/// Prefix IDs grouped by the weapon class they belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefixTables {
    pub melee: Vec<PrefixId>,
    pub ranged: Vec<PrefixId>,
    pub magic: Vec<PrefixId>,
    /// Prefixes valid on any weapon (reference only, never illegal)
    pub universal: Vec<PrefixId>,
    /// Prefixes valid on weapons but not tools (reference only)
    pub weapon: Vec<PrefixId>,
}

impl Default for PrefixTables {
    fn default() -> Self {
        Self {
            melee: vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 81],
            ranged: vec![16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 58, 82],
            magic: vec![26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 52, 83],
            universal: vec![36, 37, 38, 39, 40, 41, 53, 54, 55, 56, 57, 59, 60, 61],
            weapon: vec![20, 44, 45, 46, 47, 48, 49, 50, 51, 76],
        }
    }
}

impl PrefixTables {
    pub fn class(&self, class: WeaponClass) -> &[PrefixId] {
        match class {
            WeaponClass::Melee => &self.melee,
            WeaponClass::Ranged => &self.ranged,
            WeaponClass::Magic => &self.magic,
        }
    }

    pub fn class_mut(&mut self, class: WeaponClass) -> &mut Vec<PrefixId> {
        match class {
            WeaponClass::Melee => &mut self.melee,
            WeaponClass::Ranged => &mut self.ranged,
            WeaponClass::Magic => &mut self.magic,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Rules File
// ═══════════════════════════════════════════════════════════════════════════

/// Buffs banned on a fresh install.
pub const DEFAULT_BANNED_BUFFS: &[BuffId] = &[
    10, 59, 173, 174, 175, 176, 177, 178, 179, 180, 181, 151, 58, 165, 311, 308, 314, 215, 89,
    63, 146,
];

/// Default minimum gap between two warnings to the same player.
pub const DEFAULT_MESSAGE_COOLDOWN_MS: u64 = 10_000;

/// The persisted rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Force combat mode off whenever an infringement is found
    pub disable_pvp_on_infringement: bool,
    /// Tell players when they walk into a restricted region
    pub notify_on_region_entry: bool,
    /// Clear banned buffs from the player when they are detected
    pub strip_banned_buffs: bool,
    pub duplicate_accessory_scope: DuplicateScope,
    pub message_cooldown_ms: u64,

    pub banned_items: Vec<ItemId>,
    pub banned_buffs: Vec<BuffId>,
    pub banned_projectiles: Vec<ProjectileId>,
    pub restricted_regions: Vec<String>,

    pub checks: CheckToggles,
    pub prefixes: PrefixTables,
    pub messages: MessageCatalog,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            disable_pvp_on_infringement: false,
            notify_on_region_entry: true,
            strip_banned_buffs: false,
            duplicate_accessory_scope: DuplicateScope::default(),
            message_cooldown_ms: DEFAULT_MESSAGE_COOLDOWN_MS,
            banned_items: Vec::new(),
            banned_buffs: DEFAULT_BANNED_BUFFS.to_vec(),
            banned_projectiles: Vec::new(),
            restricted_regions: Vec::new(),
            checks: CheckToggles::default(),
            prefixes: PrefixTables::default(),
            messages: MessageCatalog::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::MessageKind;

    #[test]
    fn test_weapon_class_others() {
        for class in WeaponClass::ALL {
            let others = class.others();
            assert!(!others.contains(&class));
            assert_ne!(others[0], others[1]);
        }
    }

    #[test]
    fn test_default_prefix_tables_disjoint() {
        let tables = PrefixTables::default();
        for class in WeaponClass::ALL {
            for other in class.others() {
                assert!(
                    tables
                        .class(class)
                        .iter()
                        .all(|p| !tables.class(other).contains(p)),
                    "{} overlaps {}",
                    class.label(),
                    other.label()
                );
            }
        }
    }

    #[test]
    fn test_parse_partial_rules_toml() {
        let toml = r#"
disable_pvp_on_infringement = true
message_cooldown_ms = 2500
banned_items = [4956, 3063]
restricted_regions = ["arena"]

[checks]
region = true
seventh_slot = true

[prefixes]
melee = [1, 2]

[messages]
banned_items = "Drop {0}"
"#;

        let config: RulesConfig = toml::from_str(toml).unwrap();
        assert!(config.disable_pvp_on_infringement);
        assert_eq!(config.message_cooldown_ms, 2500);
        assert_eq!(config.banned_items, vec![4956, 3063]);
        assert_eq!(config.restricted_regions, vec!["arena".to_string()]);
        assert!(config.checks.region);
        assert!(config.checks.seventh_slot);
        // Unspecified toggles keep their defaults
        assert!(config.checks.item);
        assert!(!config.checks.buff);
        assert_eq!(config.prefixes.melee, vec![1, 2]);
        assert_eq!(config.prefixes.ranged, PrefixTables::default().ranged);
        assert_eq!(config.banned_buffs, DEFAULT_BANNED_BUFFS.to_vec());
        assert_eq!(
            config.messages.get(MessageKind::BannedItems),
            Some("Drop {0}")
        );
    }

    #[test]
    fn test_parse_empty_rules_toml() {
        let config: RulesConfig = toml::from_str("").unwrap();
        assert_eq!(config, RulesConfig::default());
    }

    #[test]
    fn test_parse_duplicate_scope() {
        let config: RulesConfig =
            toml::from_str(r#"duplicate_accessory_scope = "wearable_slots""#).unwrap();
        assert_eq!(config.duplicate_accessory_scope, DuplicateScope::WearableSlots);
    }
}
