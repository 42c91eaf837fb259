use chrono::{DateTime, Utc};
use pvpchecks_types::BuffId;

use super::cooldown::CooldownLedger;
use super::message::render_warning;
use crate::host::{Host, Severity};
use crate::infringement::Infringement;
use crate::rules::RuleSet;
use crate::snapshot::PlayerId;

/// What the coordinator did for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnforcementOutcome {
    pub infringements: Vec<Infringement>,
    pub disabled: bool,
    pub pvp_forced_off: bool,
    pub stripped_buffs: Vec<BuffId>,
    /// Warning text, if one was sent this run
    pub message: Option<String>,
}

impl EnforcementOutcome {
    pub fn is_clean(&self) -> bool {
        self.infringements.is_empty()
    }

    pub fn warned(&self) -> bool {
        self.message.is_some()
    }
}

/// Turns infringements into host actions.
///
/// Enforcement fires on every offending run; only the warning message is
/// rate limited through the [`CooldownLedger`].
#[derive(Debug, Default)]
pub struct EnforcementCoordinator {
    ledger: CooldownLedger,
}

impl EnforcementCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &CooldownLedger {
        &self.ledger
    }

    pub fn enforce(
        &self,
        host: &dyn Host,
        rules: &RuleSet,
        player: PlayerId,
        infringements: Vec<Infringement>,
        now: DateTime<Utc>,
    ) -> EnforcementOutcome {
        let mut outcome = EnforcementOutcome {
            infringements,
            ..Default::default()
        };
        if outcome.infringements.is_empty() {
            return outcome;
        }

        host.disable(player);
        outcome.disabled = true;

        if rules.disable_pvp_on_infringement {
            host.set_pvp(player, false);
            outcome.pvp_forced_off = true;
        }

        if rules.strip_banned_buffs {
            outcome.stripped_buffs = banned_buffs_in(&outcome.infringements);
            for buff in &outcome.stripped_buffs {
                host.clear_buff(player, *buff);
            }
        }

        if self
            .ledger
            .try_acquire(player, now, rules.message_cooldown())
        {
            if let Some(text) = render_warning(host, rules, &outcome.infringements) {
                host.send_message(player, Severity::Error, &text);
                outcome.message = Some(text);
            }
        } else {
            tracing::trace!(player = %player, "Warning suppressed by cooldown");
        }

        tracing::debug!(
            player = %player,
            count = outcome.infringements.len(),
            pvp_forced_off = outcome.pvp_forced_off,
            warned = outcome.warned(),
            "Enforced PvP rules"
        );

        outcome
    }

    /// Drop per-player state on disconnect.
    pub fn forget(&self, player: PlayerId) {
        self.ledger.forget(player);
    }
}

fn banned_buffs_in(infringements: &[Infringement]) -> Vec<BuffId> {
    infringements
        .iter()
        .filter_map(|infringement| match infringement {
            Infringement::BannedBuff { buffs } => Some(buffs.iter().copied()),
            _ => None,
        })
        .flatten()
        .collect()
}
