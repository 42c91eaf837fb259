//! Host and lookup used when running outside a game server.
//!
//! The host serves a single snapshot and records what the core asked it to
//! do, so the result can be printed. Lookups only understand numeric IDs.

use std::sync::Mutex;

use pvpchecks_core::{BuffId, Host, ItemId, ItemRef, Lookup, PlayerId, PlayerSnapshot, Severity};

pub struct OfflineHost {
    snapshot: PlayerSnapshot,
    log: Mutex<Vec<String>>,
}

impl OfflineHost {
    pub fn new(snapshot: PlayerSnapshot) -> Self {
        Self {
            snapshot,
            log: Mutex::new(Vec::new()),
        }
    }

    /// Actions taken so far, one line each.
    pub fn actions(&self) -> Vec<String> {
        self.log
            .lock()
            .map(|log| log.clone())
            .unwrap_or_default()
    }

    fn record(&self, line: String) {
        if let Ok(mut log) = self.log.lock() {
            log.push(line);
        }
    }
}

impl Host for OfflineHost {
    fn snapshot(&self, player: PlayerId) -> Option<PlayerSnapshot> {
        (player == self.snapshot.player).then(|| self.snapshot.clone())
    }

    fn has_capability(&self, player: PlayerId, capability: &str) -> bool {
        player == self.snapshot.player && self.snapshot.has_capability(capability)
    }

    fn disable(&self, player: PlayerId) {
        self.record(format!("disable {}", player));
    }

    fn set_pvp(&self, player: PlayerId, enabled: bool) {
        self.record(format!("set_pvp {} {}", player, enabled));
    }

    fn clear_buff(&self, player: PlayerId, buff: BuffId) {
        self.record(format!("clear_buff {} {}", player, buff));
    }

    fn send_message(&self, player: PlayerId, severity: Severity, text: &str) {
        self.record(format!("message {} [{:?}]", player, severity));
        for line in text.lines() {
            self.record(format!("  {}", line));
        }
    }
}

/// Numeric-only lookup. Any region name is accepted as-is.
#[derive(Debug, Default)]
pub struct OfflineLookup;

impl Lookup for OfflineLookup {
    fn region(&self, name: &str) -> Option<String> {
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    fn items(&self, query: &str) -> Vec<ItemRef> {
        match query.trim().parse::<ItemId>() {
            Ok(id) if id > 0 => vec![ItemRef::new(id, format!("Item #{}", id))],
            _ => Vec::new(),
        }
    }

    fn buffs(&self, _query: &str) -> Vec<BuffId> {
        Vec::new()
    }

    fn item_name(&self, item: ItemId) -> Option<String> {
        (item > 0).then(|| format!("Item #{}", item))
    }
}
