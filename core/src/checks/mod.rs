//! Rule checks
//!
//! Each check is stateless and looks at one `(RuleSet, PlayerSnapshot)` pair.
//! The pipeline runs every enabled check the player isn't exempt from, in a
//! fixed order, so the combined warning always lists violations the same way.
//!
//! ```text
//!   PlayerSnapshot ──▶ entry gate ──▶ BannedItem ─▶ Buffs ─▶ IllegalPrefix
//!                      (pvp on,        ─▶ PrefixedAmmo ─▶ PrefixedArmor
//!                       no bypass,     ─▶ DuplicateAccessory ─▶ SeventhSlot
//!                       in region)                    │
//!                                                     ▼
//!                                           Vec<Infringement>
//! ```

mod buffs;
mod equipment;
mod prefix;

#[cfg(test)]
mod pipeline_tests;

use std::fmt;

use crate::game_data::capability;
use crate::infringement::Infringement;
use crate::rules::RuleSet;
use crate::snapshot::PlayerSnapshot;

pub use buffs::BuffCheck;
pub use equipment::{BannedItemCheck, DuplicateAccessoryCheck, PrefixedArmorCheck, SeventhSlotCheck};
pub use prefix::{IllegalPrefixCheck, PrefixedAmmoCheck};

/// A single stateless rule.
pub trait RuleCheck: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the rule set switches this check on.
    fn is_enabled(&self, rules: &RuleSet) -> bool;

    /// Capability that exempts a player from this check.
    fn bypass_capability(&self) -> &'static str;

    /// Push any violations onto `found`. Missing data is never a violation.
    fn evaluate(&self, rules: &RuleSet, snapshot: &PlayerSnapshot, found: &mut Vec<Infringement>);
}

/// Ordered set of checks.
pub struct CheckPipeline {
    checks: Vec<Box<dyn RuleCheck>>,
}

impl Default for CheckPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for CheckPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.check_names()).finish()
    }
}

impl CheckPipeline {
    /// Every built-in check in warning order.
    pub fn standard() -> Self {
        Self::with_checks(vec![
            Box::new(BannedItemCheck),
            Box::new(BuffCheck),
            Box::new(IllegalPrefixCheck),
            Box::new(PrefixedAmmoCheck),
            Box::new(PrefixedArmorCheck),
            Box::new(DuplicateAccessoryCheck),
            Box::new(SeventhSlotCheck),
        ])
    }

    pub fn with_checks(checks: Vec<Box<dyn RuleCheck>>) -> Self {
        Self { checks }
    }

    pub fn check_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.checks.iter().map(|check| check.name())
    }

    /// Evaluate every applicable check. Pure: no side effects, cannot fail.
    pub fn run(&self, rules: &RuleSet, snapshot: &PlayerSnapshot) -> Vec<Infringement> {
        let mut found = Vec::new();

        if !passes_entry_gate(rules, snapshot) {
            return found;
        }

        for check in &self.checks {
            if !check.is_enabled(rules) || snapshot.has_capability(check.bypass_capability()) {
                continue;
            }
            check.evaluate(rules, snapshot, &mut found);
        }

        if !found.is_empty() {
            tracing::debug!(
                player = %snapshot.player,
                infringements = ?found.iter().map(Infringement::label).collect::<Vec<_>>(),
                "PvP rule check failed"
            );
        }

        found
    }
}

/// Combat mode on, no blanket exemption, and inside an enforced region.
pub fn passes_entry_gate(rules: &RuleSet, snapshot: &PlayerSnapshot) -> bool {
    snapshot.in_combat_mode
        && !snapshot.has_capability(capability::BYPASS_ALL)
        && in_enforced_region(rules, snapshot)
}

/// True when region restriction is off, the player is exempt from it, or
/// they stand in a restricted region.
pub fn in_enforced_region(rules: &RuleSet, snapshot: &PlayerSnapshot) -> bool {
    if !rules.toggles.region || snapshot.has_capability(capability::IGNORE_REGION) {
        return true;
    }
    snapshot
        .region
        .as_deref()
        .is_some_and(|region| rules.is_region_restricted(region))
}
