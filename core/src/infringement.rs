use pvpchecks_types::{BuffId, ItemId, MessageKind, ProjectileId};

use crate::snapshot::Item;

/// One rule violation found in a single check run.
///
/// Carries only the evidence needed to render the warning line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Infringement {
    /// Banned items in hand or equipped, in the order found
    BannedItem { items: Vec<Item> },
    /// Distinct banned buffs currently active
    BannedBuff { buffs: Vec<BuffId> },
    /// The same buff is active more than once
    DuplicateBuff,
    /// Weapon carries a prefix from another class, or a stackable carries any prefix
    IllegalPrefix,
    PrefixedArmor,
    PrefixedAmmo,
    /// First item found equipped twice
    DuplicateAccessory { item: ItemId, name: String },
    SeventhSlot,
    /// A banned projectile was spawned (reported outside the per-tick pipeline)
    BannedProjectile { projectile: ProjectileId },
}

impl Infringement {
    /// Template used to render this infringement's warning line.
    pub fn message_kind(&self) -> MessageKind {
        match self {
            Self::BannedItem { .. } => MessageKind::BannedItems,
            Self::BannedBuff { .. } => MessageKind::BannedBuffs,
            Self::DuplicateBuff => MessageKind::DuplicateBuff,
            Self::IllegalPrefix => MessageKind::IllegalPrefix,
            Self::PrefixedArmor => MessageKind::PrefixedArmor,
            Self::PrefixedAmmo => MessageKind::PrefixedAmmo,
            Self::DuplicateAccessory { .. } => MessageKind::DuplicateAccessory,
            Self::SeventhSlot => MessageKind::SeventhSlot,
            Self::BannedProjectile { .. } => MessageKind::BannedProjectile,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::BannedItem { .. } => "banned_item",
            Self::BannedBuff { .. } => "banned_buff",
            Self::DuplicateBuff => "duplicate_buff",
            Self::IllegalPrefix => "illegal_prefix",
            Self::PrefixedArmor => "prefixed_armor",
            Self::PrefixedAmmo => "prefixed_ammo",
            Self::DuplicateAccessory { .. } => "duplicate_accessory",
            Self::SeventhSlot => "seventh_slot",
            Self::BannedProjectile { .. } => "banned_projectile",
        }
    }
}
