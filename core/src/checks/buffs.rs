use hashbrown::HashSet;
use pvpchecks_types::BuffId;

use super::RuleCheck;
use crate::game_data::capability;
use crate::infringement::Infringement;
use crate::rules::RuleSet;
use crate::snapshot::PlayerSnapshot;

/// Duplicate and banned active buffs.
///
/// Emits `DuplicateBuff` before `BannedBuff` when both apply.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuffCheck;

impl RuleCheck for BuffCheck {
    fn name(&self) -> &'static str {
        "buff"
    }

    fn is_enabled(&self, rules: &RuleSet) -> bool {
        rules.toggles.buff
    }

    fn bypass_capability(&self) -> &'static str {
        capability::USE_BANNED_BUFFS
    }

    fn evaluate(&self, rules: &RuleSet, snapshot: &PlayerSnapshot, found: &mut Vec<Infringement>) {
        // Distinct buffs, first-seen order
        let mut seen: HashSet<BuffId> = HashSet::with_capacity(snapshot.buffs.len());
        let active: Vec<BuffId> = snapshot
            .buffs
            .iter()
            .copied()
            .filter(|buff| seen.insert(*buff))
            .collect();

        if active.len() != snapshot.buffs.len() {
            found.push(Infringement::DuplicateBuff);
        }

        let banned: Vec<BuffId> = active
            .into_iter()
            .filter(|buff| rules.is_buff_banned(*buff))
            .collect();

        if !banned.is_empty() {
            found.push(Infringement::BannedBuff { buffs: banned });
        }
    }
}
