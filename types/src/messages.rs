//! Player-facing message templates.
//!
//! Every message the core can send is a [`MessageKind`]. The set is closed, so
//! a catalog can be checked for completeness once at startup instead of
//! discovering a missing template the first time a player trips a rule.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Closed set of message templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    // ─── Warning (rate-limited) ─────────────────────────────────────────────
    /// Header line of the combined infringement warning
    InfringementHeader,
    /// `{0}` = comma-separated item names
    BannedItems,
    /// `{0}` = comma-separated buff names
    BannedBuffs,
    DuplicateBuff,
    IllegalPrefix,
    PrefixedArmor,
    PrefixedAmmo,
    /// `{0}` = name of the first duplicated item
    DuplicateAccessory,
    SeventhSlot,
    /// `{0}` = projectile id
    BannedProjectile,

    // ─── Notices (one-shot) ─────────────────────────────────────────────────
    /// Sent when entering a restricted region
    RegionRestricted,
    /// Sent when combat mode is switched on while buff checking applies
    BannedBuffsSuppressed,
}

impl MessageKind {
    /// Key used in the `[messages]` table.
    pub fn key(self) -> &'static str {
        match self {
            Self::InfringementHeader => "infringement_header",
            Self::BannedItems => "banned_items",
            Self::BannedBuffs => "banned_buffs",
            Self::DuplicateBuff => "duplicate_buff",
            Self::IllegalPrefix => "illegal_prefix",
            Self::PrefixedArmor => "prefixed_armor",
            Self::PrefixedAmmo => "prefixed_ammo",
            Self::DuplicateAccessory => "duplicate_accessory",
            Self::SeventhSlot => "seventh_slot",
            Self::BannedProjectile => "banned_projectile",
            Self::RegionRestricted => "region_restricted",
            Self::BannedBuffsSuppressed => "banned_buffs_suppressed",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    pub const ALL: [MessageKind; 12] = [
        Self::InfringementHeader,
        Self::BannedItems,
        Self::BannedBuffs,
        Self::DuplicateBuff,
        Self::IllegalPrefix,
        Self::PrefixedArmor,
        Self::PrefixedAmmo,
        Self::DuplicateAccessory,
        Self::SeventhSlot,
        Self::BannedProjectile,
        Self::RegionRestricted,
        Self::BannedBuffsSuppressed,
    ];

    /// Built-in English text for this kind.
    pub fn default_template(self) -> &'static str {
        match self {
            Self::InfringementHeader => {
                "You have been disabled for not following the PvP rules of this server. Please unequip the following:"
            }
            Self::BannedItems => "Using the following banned items: {0}",
            Self::BannedBuffs => "Using the following banned buffs: {0}",
            Self::DuplicateBuff => "Please remove all duplicate buffs!",
            Self::IllegalPrefix => "Illegally prefixed weapons are not allowed in PvP, please unequip!",
            Self::PrefixedArmor => "Prefixed armour is not allowed in PvP, please unequip!",
            Self::PrefixedAmmo => "Prefixed ammo is not allowed in PvP, please unequip!",
            Self::DuplicateAccessory => "Please remove all duplicate accessories for PvP ({0})",
            Self::SeventhSlot => "Please unequip the 7th accessory slot.",
            Self::BannedProjectile => "Projectile {0} is banned in PvP!",
            Self::RegionRestricted => {
                "This region has PvP restrictions! For more information, use /pvpchecks info"
            }
            Self::BannedBuffsSuppressed => {
                "Banned buffs will be disabled while PvP is on. Use /pvpchecks list buffs to see them."
            }
        }
    }
}

/// Template text keyed by [`MessageKind`].
///
/// Serializes as a flat table (`banned_items = "..."`) so operators can edit
/// individual messages in the rules file. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct MessageCatalog {
    templates: BTreeMap<MessageKind, String>,
}

impl TryFrom<BTreeMap<String, String>> for MessageCatalog {
    type Error = String;

    fn try_from(raw: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        let mut templates = BTreeMap::new();
        for (key, template) in raw {
            let kind = MessageKind::from_key(&key)
                .ok_or_else(|| format!("unknown message template \"{}\"", key))?;
            templates.insert(kind, template);
        }
        Ok(Self { templates })
    }
}

impl From<MessageCatalog> for BTreeMap<String, String> {
    fn from(catalog: MessageCatalog) -> Self {
        catalog
            .templates
            .into_iter()
            .map(|(kind, template)| (kind.key().to_string(), template))
            .collect()
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        let templates = MessageKind::ALL
            .iter()
            .map(|kind| (*kind, kind.default_template().to_string()))
            .collect();
        Self { templates }
    }
}

impl MessageCatalog {
    /// Catalog with no templates at all. Mostly useful for tests.
    pub fn empty() -> Self {
        Self {
            templates: BTreeMap::new(),
        }
    }

    pub fn get(&self, kind: MessageKind) -> Option<&str> {
        self.templates.get(&kind).map(String::as_str)
    }

    pub fn set(&mut self, kind: MessageKind, template: impl Into<String>) {
        self.templates.insert(kind, template.into());
    }

    /// Kinds with no template or a blank one.
    pub fn missing(&self) -> Vec<MessageKind> {
        MessageKind::ALL
            .iter()
            .copied()
            .filter(|kind| self.get(*kind).is_none_or(|t| t.trim().is_empty()))
            .collect()
    }

    /// Insert defaults for kinds absent from the catalog.
    /// Returns the kinds that were filled in. Blank templates are left alone.
    pub fn fill_absent(&mut self) -> Vec<MessageKind> {
        let mut filled = Vec::new();
        for kind in MessageKind::ALL {
            if !self.templates.contains_key(&kind) {
                self.templates
                    .insert(kind, kind.default_template().to_string());
                filled.push(kind);
            }
        }
        filled
    }

    pub fn iter(&self) -> impl Iterator<Item = (MessageKind, &str)> {
        self.templates.iter().map(|(k, v)| (*k, v.as_str()))
    }
}
