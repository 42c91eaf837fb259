//! The in-memory rule set and its derived prefix tables.

use std::fmt::Display;
use std::hash::Hash;

use chrono::TimeDelta;
use hashbrown::HashSet;

use pvpchecks_types::{
    BuffId, CheckToggles, DuplicateScope, ItemId, MessageCatalog, MessageKind, PrefixId,
    PrefixTables, ProjectileId, RulesConfig, WeaponClass,
};

use super::RuleList;
use crate::error::{ConfigError, RuleError};

fn class_index(class: WeaponClass) -> usize {
    match class {
        WeaponClass::Melee => 0,
        WeaponClass::Ranged => 1,
        WeaponClass::Magic => 2,
    }
}

fn sorted<T: Ord + Clone>(set: &HashSet<T>) -> Vec<T> {
    let mut values: Vec<T> = set.iter().cloned().collect();
    values.sort();
    values
}

fn insert_unique<T: Eq + Hash + Display>(
    set: &mut HashSet<T>,
    value: T,
    list: RuleList,
) -> Result<(), RuleError> {
    if set.contains(&value) {
        return Err(RuleError::AlreadyPresent {
            list,
            value: value.to_string(),
        });
    }
    set.insert(value);
    Ok(())
}

fn remove_existing<T: Eq + Hash + Display>(
    set: &mut HashSet<T>,
    value: &T,
    list: RuleList,
) -> Result<(), RuleError> {
    if !set.remove(value) {
        return Err(RuleError::NotPresent {
            list,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Banned IDs, prefix tables and toggles read by every check run.
///
/// `illegal_prefix_for[c]` is always the union of the other two classes'
/// native prefixes. It is only ever rebuilt by [`RuleSet::set_prefix_class`]
/// (or on construction), never edited directly.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub toggles: CheckToggles,
    pub disable_pvp_on_infringement: bool,
    pub notify_on_region_entry: bool,
    pub strip_banned_buffs: bool,
    pub duplicate_scope: DuplicateScope,
    pub message_cooldown_ms: u64,

    banned_items: HashSet<ItemId>,
    banned_buffs: HashSet<BuffId>,
    banned_projectiles: HashSet<ProjectileId>,
    restricted_regions: HashSet<String>,

    // ─── Prefixes ───────────────────────────────────────────────────────────
    /// Native prefixes, indexed by `class_index`
    prefix_class: [HashSet<PrefixId>; 3],
    /// Derived from `prefix_class`
    illegal_prefix_for: [HashSet<PrefixId>; 3],
    /// Carried through for the rules file only
    universal_prefixes: Vec<PrefixId>,
    weapon_prefixes: Vec<PrefixId>,

    messages: MessageCatalog,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::assemble(RulesConfig::default())
    }
}

impl RuleSet {
    /// Build a rule set from the persisted record.
    ///
    /// Absent message templates are filled from the built-in defaults; blank
    /// ones are rejected so a broken catalog fails at load instead of on the
    /// first infringement.
    pub fn from_config(mut config: RulesConfig) -> Result<Self, ConfigError> {
        let filled = config.messages.fill_absent();
        if !filled.is_empty() {
            tracing::debug!(?filled, "Using default text for unset message templates");
        }

        let missing = config.messages.missing();
        if !missing.is_empty() {
            return Err(ConfigError::MissingTemplates(missing));
        }

        let rules = Self::assemble(config);
        let overlaps = rules.prefix_overlaps();
        if !overlaps.is_empty() {
            tracing::warn!(
                ?overlaps,
                "Prefix IDs listed under more than one weapon class; items of either class carrying them will be flagged"
            );
        }
        Ok(rules)
    }

    fn assemble(config: RulesConfig) -> Self {
        let PrefixTables {
            melee,
            ranged,
            magic,
            universal,
            weapon,
        } = config.prefixes;

        let mut rules = Self {
            toggles: config.checks,
            disable_pvp_on_infringement: config.disable_pvp_on_infringement,
            notify_on_region_entry: config.notify_on_region_entry,
            strip_banned_buffs: config.strip_banned_buffs,
            duplicate_scope: config.duplicate_accessory_scope,
            message_cooldown_ms: config.message_cooldown_ms,
            banned_items: config.banned_items.into_iter().collect(),
            banned_buffs: config.banned_buffs.into_iter().collect(),
            banned_projectiles: config.banned_projectiles.into_iter().collect(),
            restricted_regions: config.restricted_regions.into_iter().collect(),
            prefix_class: [
                melee.into_iter().collect(),
                ranged.into_iter().collect(),
                magic.into_iter().collect(),
            ],
            illegal_prefix_for: Default::default(),
            universal_prefixes: universal,
            weapon_prefixes: weapon,
            messages: config.messages,
        };
        rules.recompute_illegal_prefixes();
        rules
    }

    /// Persisted form. Lists are sorted so saved files diff cleanly.
    pub fn to_config(&self) -> RulesConfig {
        let mut restricted_regions: Vec<String> =
            self.restricted_regions.iter().cloned().collect();
        restricted_regions.sort();

        RulesConfig {
            disable_pvp_on_infringement: self.disable_pvp_on_infringement,
            notify_on_region_entry: self.notify_on_region_entry,
            strip_banned_buffs: self.strip_banned_buffs,
            duplicate_accessory_scope: self.duplicate_scope,
            message_cooldown_ms: self.message_cooldown_ms,
            banned_items: sorted(&self.banned_items),
            banned_buffs: sorted(&self.banned_buffs),
            banned_projectiles: sorted(&self.banned_projectiles),
            restricted_regions,
            checks: self.toggles,
            prefixes: PrefixTables {
                melee: self.native_prefixes_sorted(WeaponClass::Melee),
                ranged: self.native_prefixes_sorted(WeaponClass::Ranged),
                magic: self.native_prefixes_sorted(WeaponClass::Magic),
                universal: self.universal_prefixes.clone(),
                weapon: self.weapon_prefixes.clone(),
            },
            messages: self.messages.clone(),
        }
    }

    // ─── Mutation ───────────────────────────────────────────────────────────

    pub fn add_banned_item(&mut self, item: ItemId) -> Result<(), RuleError> {
        insert_unique(&mut self.banned_items, item, RuleList::Items)
    }

    pub fn remove_banned_item(&mut self, item: ItemId) -> Result<(), RuleError> {
        remove_existing(&mut self.banned_items, &item, RuleList::Items)
    }

    pub fn add_banned_buff(&mut self, buff: BuffId) -> Result<(), RuleError> {
        insert_unique(&mut self.banned_buffs, buff, RuleList::Buffs)
    }

    pub fn remove_banned_buff(&mut self, buff: BuffId) -> Result<(), RuleError> {
        remove_existing(&mut self.banned_buffs, &buff, RuleList::Buffs)
    }

    pub fn add_banned_projectile(&mut self, projectile: ProjectileId) -> Result<(), RuleError> {
        insert_unique(&mut self.banned_projectiles, projectile, RuleList::Projectiles)
    }

    pub fn remove_banned_projectile(&mut self, projectile: ProjectileId) -> Result<(), RuleError> {
        remove_existing(&mut self.banned_projectiles, &projectile, RuleList::Projectiles)
    }

    pub fn add_restricted_region(&mut self, region: &str) -> Result<(), RuleError> {
        insert_unique(
            &mut self.restricted_regions,
            region.to_string(),
            RuleList::Regions,
        )
    }

    pub fn remove_restricted_region(&mut self, region: &str) -> Result<(), RuleError> {
        remove_existing(
            &mut self.restricted_regions,
            &region.to_string(),
            RuleList::Regions,
        )
    }

    /// Replace a class's native prefixes and rebuild every illegal-prefix table.
    pub fn set_prefix_class(
        &mut self,
        class: WeaponClass,
        prefixes: impl IntoIterator<Item = PrefixId>,
    ) {
        self.prefix_class[class_index(class)] = prefixes.into_iter().collect();
        self.recompute_illegal_prefixes();
    }

    fn recompute_illegal_prefixes(&mut self) {
        for class in WeaponClass::ALL {
            let illegal: HashSet<PrefixId> = class
                .others()
                .iter()
                .flat_map(|other| self.prefix_class[class_index(*other)].iter().copied())
                .collect();
            self.illegal_prefix_for[class_index(class)] = illegal;
        }
    }

    pub fn set_message_template(&mut self, kind: MessageKind, template: impl Into<String>) {
        self.messages.set(kind, template);
    }

    // ─── Queries ────────────────────────────────────────────────────────────

    pub fn is_item_banned(&self, item: ItemId) -> bool {
        self.banned_items.contains(&item)
    }

    pub fn is_buff_banned(&self, buff: BuffId) -> bool {
        self.banned_buffs.contains(&buff)
    }

    pub fn is_projectile_banned(&self, projectile: ProjectileId) -> bool {
        self.banned_projectiles.contains(&projectile)
    }

    pub fn is_region_restricted(&self, region: &str) -> bool {
        self.restricted_regions.contains(region)
    }

    pub fn native_prefixes(&self, class: WeaponClass) -> &HashSet<PrefixId> {
        &self.prefix_class[class_index(class)]
    }

    pub fn illegal_prefixes_for(&self, class: WeaponClass) -> &HashSet<PrefixId> {
        &self.illegal_prefix_for[class_index(class)]
    }

    fn native_prefixes_sorted(&self, class: WeaponClass) -> Vec<PrefixId> {
        sorted(self.native_prefixes(class))
    }

    /// Prefix IDs listed under more than one weapon class.
    pub fn prefix_overlaps(&self) -> Vec<PrefixId> {
        let mut overlaps: Vec<PrefixId> = WeaponClass::ALL
            .iter()
            .flat_map(|class| {
                self.native_prefixes(*class)
                    .intersection(self.illegal_prefixes_for(*class))
                    .copied()
            })
            .collect();
        overlaps.sort();
        overlaps.dedup();
        overlaps
    }

    pub fn banned_items(&self) -> Vec<ItemId> {
        sorted(&self.banned_items)
    }

    pub fn banned_buffs(&self) -> Vec<BuffId> {
        sorted(&self.banned_buffs)
    }

    pub fn banned_projectiles(&self) -> Vec<ProjectileId> {
        sorted(&self.banned_projectiles)
    }

    pub fn restricted_regions(&self) -> Vec<String> {
        let mut regions: Vec<String> = self.restricted_regions.iter().cloned().collect();
        regions.sort();
        regions
    }

    pub fn message_cooldown(&self) -> TimeDelta {
        i64::try_from(self.message_cooldown_ms)
            .ok()
            .and_then(TimeDelta::try_milliseconds)
            .unwrap_or(TimeDelta::MAX)
    }

    pub fn messages(&self) -> &MessageCatalog {
        &self.messages
    }

    /// Template text for a message kind. Catalogs are validated on load, the
    /// built-in text only covers rule sets assembled by hand.
    pub fn template(&self, kind: MessageKind) -> &str {
        self.messages
            .get(kind)
            .unwrap_or_else(|| kind.default_template())
    }
}
