//! Weapon and ammunition prefix checks.

use pvpchecks_types::WeaponClass;

use super::RuleCheck;
use crate::game_data::{capability, is_ammo};
use crate::infringement::Infringement;
use crate::rules::RuleSet;
use crate::snapshot::PlayerSnapshot;

/// Prefix on a stackable, or a prefix native to another weapon class.
#[derive(Debug, Clone, Copy, Default)]
pub struct IllegalPrefixCheck;

impl RuleCheck for IllegalPrefixCheck {
    fn name(&self) -> &'static str {
        "illegal_prefix"
    }

    fn is_enabled(&self, rules: &RuleSet) -> bool {
        rules.toggles.prefix
    }

    fn bypass_capability(&self) -> &'static str {
        capability::USE_ILLEGAL_PREFIXES
    }

    fn evaluate(&self, rules: &RuleSet, snapshot: &PlayerSnapshot, found: &mut Vec<Infringement>) {
        let Some(item) = snapshot.active_item() else {
            return;
        };

        // Stackables can never legitimately roll a prefix
        let illegal = if item.is_stackable() {
            item.is_prefixed()
        } else {
            item.weapon_class()
                .is_some_and(|class| rules.illegal_prefixes_for(class).contains(&item.prefix))
        };

        if illegal {
            found.push(Infringement::IllegalPrefix);
        }
    }
}

/// Prefixed ammunition in the inventory while a ranged weapon is in use.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefixedAmmoCheck;

impl RuleCheck for PrefixedAmmoCheck {
    fn name(&self) -> &'static str {
        "prefixed_ammo"
    }

    fn is_enabled(&self, rules: &RuleSet) -> bool {
        rules.toggles.prefix
    }

    fn bypass_capability(&self) -> &'static str {
        capability::USE_PREFIXED_AMMO
    }

    fn evaluate(&self, _rules: &RuleSet, snapshot: &PlayerSnapshot, found: &mut Vec<Infringement>) {
        let uses_ranged = snapshot
            .active_item()
            .is_some_and(|item| item.weapon_class() == Some(WeaponClass::Ranged));
        if !uses_ranged {
            return;
        }

        if snapshot
            .inventory
            .iter()
            .any(|item| is_ammo(item.id) && item.is_prefixed())
        {
            found.push(Infringement::PrefixedAmmo);
        }
    }
}
