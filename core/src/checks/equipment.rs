//! Checks over held and equipped items.

use hashbrown::HashSet;
use pvpchecks_types::{DuplicateScope, ItemId};

use super::RuleCheck;
use crate::game_data::{
    ARMOR_SLOT_COUNT, BODY_ARMOR_SLOTS, SEVENTH_ACCESSORY_SLOT, WEARABLE_SLOTS, capability,
};
use crate::infringement::Infringement;
use crate::rules::RuleSet;
use crate::snapshot::{Item, PlayerSnapshot};

/// Banned item in hand, in the misc slots or worn.
#[derive(Debug, Clone, Copy, Default)]
pub struct BannedItemCheck;

impl RuleCheck for BannedItemCheck {
    fn name(&self) -> &'static str {
        "banned_item"
    }

    fn is_enabled(&self, rules: &RuleSet) -> bool {
        rules.toggles.item
    }

    fn bypass_capability(&self) -> &'static str {
        capability::USE_BANNED_ITEMS
    }

    fn evaluate(&self, rules: &RuleSet, snapshot: &PlayerSnapshot, found: &mut Vec<Infringement>) {
        let is_banned = |item: &&Item| !item.is_empty() && rules.is_item_banned(item.id);

        let items: Vec<Item> = snapshot
            .active_item()
            .filter(is_banned)
            .into_iter()
            .chain(snapshot.misc_equips.iter().filter(is_banned))
            .chain(snapshot.armor.iter().filter(is_banned))
            .cloned()
            .collect();

        if !items.is_empty() {
            found.push(Infringement::BannedItem { items });
        }
    }
}

/// Any prefix on head, body or legs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixedArmorCheck;

impl RuleCheck for PrefixedArmorCheck {
    fn name(&self) -> &'static str {
        "prefixed_armor"
    }

    fn is_enabled(&self, rules: &RuleSet) -> bool {
        rules.toggles.prefix
    }

    fn bypass_capability(&self) -> &'static str {
        capability::USE_PREFIXED_ARMOR
    }

    fn evaluate(&self, _rules: &RuleSet, snapshot: &PlayerSnapshot, found: &mut Vec<Infringement>) {
        if snapshot.armor[BODY_ARMOR_SLOTS].iter().any(Item::is_prefixed) {
            found.push(Infringement::PrefixedArmor);
        }
    }
}

/// The same item equipped in more than one armor slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct DuplicateAccessoryCheck;

impl DuplicateAccessoryCheck {
    fn first_duplicate(slots: &[Item]) -> Option<&Item> {
        let mut seen: HashSet<ItemId> = HashSet::with_capacity(ARMOR_SLOT_COUNT);
        slots
            .iter()
            .filter(|item| !item.is_empty())
            .find(|item| !seen.insert(item.id))
    }
}

impl RuleCheck for DuplicateAccessoryCheck {
    fn name(&self) -> &'static str {
        "duplicate_accessory"
    }

    fn is_enabled(&self, rules: &RuleSet) -> bool {
        rules.toggles.duplicate_accessory
    }

    fn bypass_capability(&self) -> &'static str {
        capability::DUPLICATE_ACCESSORIES
    }

    fn evaluate(&self, rules: &RuleSet, snapshot: &PlayerSnapshot, found: &mut Vec<Infringement>) {
        let slots = match rules.duplicate_scope {
            DuplicateScope::AllSlots => &snapshot.armor[..],
            DuplicateScope::WearableSlots => &snapshot.armor[WEARABLE_SLOTS],
        };

        if let Some(item) = Self::first_duplicate(slots) {
            found.push(Infringement::DuplicateAccessory {
                item: item.id,
                name: item.display_name(),
            });
        }
    }
}

/// Anything in the unobtainable seventh accessory slot.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeventhSlotCheck;

impl RuleCheck for SeventhSlotCheck {
    fn name(&self) -> &'static str {
        "seventh_slot"
    }

    fn is_enabled(&self, rules: &RuleSet) -> bool {
        rules.toggles.seventh_slot
    }

    fn bypass_capability(&self) -> &'static str {
        capability::USE_SEVENTH_SLOT
    }

    fn evaluate(&self, _rules: &RuleSet, snapshot: &PlayerSnapshot, found: &mut Vec<Infringement>) {
        if snapshot
            .armor_slot(SEVENTH_ACCESSORY_SLOT)
            .is_some_and(|item| !item.is_empty())
        {
            found.push(Infringement::SeventhSlot);
        }
    }
}
