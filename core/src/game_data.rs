//! Fixed game constants the checks depend on.
//!
//! Slot indices are load-bearing: the host reports equipment as a flat
//! array and these positions are the only way to tell armor, accessories and
//! the unobtainable seventh accessory slot apart.

use std::ops::Range;

use pvpchecks_types::{BuffId, ItemId};

/// Length of the equipped armor array.
pub const ARMOR_SLOT_COUNT: usize = 10;

/// Head, body and legs.
pub const BODY_ARMOR_SLOTS: Range<usize> = 0..3;

/// Accessory slot that cannot be unlocked through normal play.
pub const SEVENTH_ACCESSORY_SLOT: usize = 9;

/// Slots reachable through normal play.
pub const WEARABLE_SLOTS: Range<usize> = 0..SEVENTH_ACCESSORY_SLOT;

/// Exclusive upper bound for buff IDs accepted from admin input.
pub const MAX_BUFF_ID: BuffId = 338;

/// Items treated as ammunition by the prefixed-ammo check.
pub static AMMO_ITEM_IDS: phf::Set<ItemId> = phf::phf_set! {
    // Bullets
    97, 234, 278, 515, 546, 1179, 1302, 1335, 1342, 1349, 1350, 1351, 1352, 3104, 3567,
    // Arrows
    40, 41, 47, 51, 265, 516, 545, 682, 988, 1235, 1334, 1341, 3003, 3568,
    // Rockets
    771, 772, 773, 774,
    // Darts
    1310, 3009, 3010, 3011,
    // Misc
    283, 154, 1261, 1783, 1785, 1836, 931, 949, 3108,
};

pub fn is_ammo(item: ItemId) -> bool {
    AMMO_ITEM_IDS.contains(&item)
}

/// Capability names checked against the player.
pub mod capability {
    /// Skip every check
    pub const BYPASS_ALL: &str = "pvpchecks.useall";
    /// Enforce everywhere regardless of restricted regions
    pub const IGNORE_REGION: &str = "pvpchecks.ignoreregion";
    pub const USE_BANNED_BUFFS: &str = "pvpchecks.usebannedbuffs";
    pub const USE_BANNED_ITEMS: &str = "pvpchecks.usebannedweps";
    pub const USE_ILLEGAL_PREFIXES: &str = "pvpchecks.useillegalweps";
    pub const USE_PREFIXED_AMMO: &str = "pvpchecks.useprefixedammo";
    pub const USE_PREFIXED_ARMOR: &str = "pvpchecks.useprefixedarmor";
    pub const DUPLICATE_ACCESSORIES: &str = "pvpchecks.havedupeaccessories";
    pub const USE_SEVENTH_SLOT: &str = "pvpchecks.use7thslot";
    pub const USE_BANNED_PROJECTILES: &str = "pvpchecks.useprojectiles";
}
