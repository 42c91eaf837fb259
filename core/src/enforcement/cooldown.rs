//! Per-player warning cooldowns.

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::snapshot::PlayerId;

/// Warning state of a single player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningState {
    NeverWarned,
    WarnedAt(DateTime<Utc>),
}

/// When each player was last sent an infringement warning.
///
/// Entries are sharded per player, so two players never contend and the
/// check-and-stamp in [`try_acquire`](Self::try_acquire) is atomic for one.
#[derive(Debug, Default)]
pub struct CooldownLedger {
    entries: DashMap<PlayerId, DateTime<Utc>>,
}

impl CooldownLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the right to warn `player` at `now`.
    ///
    /// Returns `false` while the previous warning is younger than `cooldown`.
    /// On `true` the entry is stamped with `now`.
    pub fn try_acquire(&self, player: PlayerId, now: DateTime<Utc>, cooldown: TimeDelta) -> bool {
        match self.entries.entry(player) {
            Entry::Occupied(mut entry) => {
                if now.signed_duration_since(*entry.get()) < cooldown {
                    return false;
                }
                entry.insert(now);
                true
            }
            Entry::Vacant(entry) => {
                entry.insert(now);
                true
            }
        }
    }

    pub fn last_warned(&self, player: PlayerId) -> Option<DateTime<Utc>> {
        self.entries.get(&player).map(|entry| *entry.value())
    }

    pub fn state(&self, player: PlayerId) -> WarningState {
        match self.last_warned(player) {
            Some(at) => WarningState::WarnedAt(at),
            None => WarningState::NeverWarned,
        }
    }

    /// Drop a player's entry (disconnect).
    pub fn forget(&self, player: PlayerId) {
        self.entries.remove(&player);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
