//! Event facade
//!
//! `PvpGuard` is the single entry point a server integration talks to. Each
//! hook is a short synchronous call: take a rules snapshot, read the player
//! from the host, decide, and hand any actions back to the host.
//!
//! ```text
//!   player update ──▶ Host::snapshot ──▶ CheckPipeline ──▶ EnforcementCoordinator
//!   pvp toggled   ──▶ banned-buff notice (Info)
//!   region entry  ──▶ restricted-region notice (Info)
//!   projectile    ──▶ BannedProjectile ──▶ EnforcementCoordinator
//!   world save / shutdown ──▶ RuleStore::persist
//! ```

use chrono::{DateTime, Utc};
use pvpchecks_types::{MessageKind, ProjectileId};

use crate::admin::RuleAdmin;
use crate::checks::{CheckPipeline, in_enforced_region, passes_entry_gate};
use crate::enforcement::{EnforcementCoordinator, EnforcementOutcome};
use crate::error::ConfigError;
use crate::game_data::capability;
use crate::host::{Host, Lookup, Severity};
use crate::infringement::Infringement;
use crate::rules::RuleStore;
use crate::snapshot::PlayerId;

pub struct PvpGuard {
    store: RuleStore,
    pipeline: CheckPipeline,
    coordinator: EnforcementCoordinator,
}

impl PvpGuard {
    pub fn new(store: RuleStore) -> Self {
        Self::with_pipeline(store, CheckPipeline::standard())
    }

    pub fn with_pipeline(store: RuleStore, pipeline: CheckPipeline) -> Self {
        Self {
            store,
            pipeline,
            coordinator: EnforcementCoordinator::new(),
        }
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    pub fn coordinator(&self) -> &EnforcementCoordinator {
        &self.coordinator
    }

    /// Admin API bound to this guard's rules.
    pub fn admin<'a>(&'a self, lookup: &'a dyn Lookup) -> RuleAdmin<'a> {
        RuleAdmin::new(&self.store, lookup)
    }

    // ─── Per-tick checks ────────────────────────────────────────────────────

    pub fn on_player_update(&self, host: &dyn Host, player: PlayerId) -> Option<EnforcementOutcome> {
        self.on_player_update_at(host, player, Utc::now())
    }

    /// Check one player and enforce. `None` if the player is gone.
    pub fn on_player_update_at(
        &self,
        host: &dyn Host,
        player: PlayerId,
        now: DateTime<Utc>,
    ) -> Option<EnforcementOutcome> {
        let snapshot = host.snapshot(player)?;
        let rules = self.store.snapshot();

        let found = self.pipeline.run(&rules, &snapshot);
        Some(self.coordinator.enforce(host, &rules, player, found, now))
    }

    /// A projectile was spawned by `player`. Banned projectiles are enforced
    /// like any other infringement.
    pub fn on_projectile_spawned(
        &self,
        host: &dyn Host,
        player: PlayerId,
        projectile: ProjectileId,
    ) -> Option<EnforcementOutcome> {
        self.on_projectile_spawned_at(host, player, projectile, Utc::now())
    }

    pub fn on_projectile_spawned_at(
        &self,
        host: &dyn Host,
        player: PlayerId,
        projectile: ProjectileId,
        now: DateTime<Utc>,
    ) -> Option<EnforcementOutcome> {
        let rules = self.store.snapshot();
        if !rules.toggles.projectile || !rules.is_projectile_banned(projectile) {
            return None;
        }

        let snapshot = host.snapshot(player)?;
        if !passes_entry_gate(&rules, &snapshot)
            || snapshot.has_capability(capability::USE_BANNED_PROJECTILES)
        {
            return None;
        }

        let found = vec![Infringement::BannedProjectile { projectile }];
        Some(self.coordinator.enforce(host, &rules, player, found, now))
    }

    // ─── Notices ────────────────────────────────────────────────────────────

    /// Combat mode switched. When it goes on and buffs are checked, the
    /// player is told their banned buffs will be suppressed. Returns whether
    /// the notice was sent.
    pub fn on_pvp_toggled(&self, host: &dyn Host, player: PlayerId, enabled: bool) -> bool {
        if !enabled {
            return false;
        }
        let rules = self.store.snapshot();
        if !rules.toggles.buff {
            return false;
        }
        let Some(snapshot) = host.snapshot(player) else {
            return false;
        };
        if snapshot.has_capability(capability::BYPASS_ALL)
            || snapshot.has_capability(capability::USE_BANNED_BUFFS)
            || !in_enforced_region(&rules, &snapshot)
        {
            return false;
        }

        host.send_message(
            player,
            Severity::Info,
            rules.template(MessageKind::BannedBuffsSuppressed),
        );
        true
    }

    /// Player walked into `region`. Returns whether the notice was sent.
    pub fn on_region_entered(&self, host: &dyn Host, player: PlayerId, region: &str) -> bool {
        let rules = self.store.snapshot();
        if !rules.notify_on_region_entry
            || !rules.toggles.region
            || !rules.is_region_restricted(region)
            || host.has_capability(player, capability::IGNORE_REGION)
        {
            return false;
        }

        host.send_message(
            player,
            Severity::Info,
            rules.template(MessageKind::RegionRestricted),
        );
        true
    }

    // ─── Lifecycle ──────────────────────────────────────────────────────────

    pub fn on_player_left(&self, player: PlayerId) {
        self.coordinator.forget(player);
    }

    pub fn on_world_save(&self) -> Result<(), ConfigError> {
        self.store.persist()
    }

    pub fn on_shutdown(&self) -> Result<(), ConfigError> {
        tracing::info!(players = self.coordinator.ledger().len(), "Shutting down PvP checks");
        self.store.persist()
    }

    pub fn on_reload(&self) -> Result<(), ConfigError> {
        self.store.reload()
    }
}
