//! Boundary to the game server.
//!
//! The core never talks to players directly. Everything it observes comes
//! through [`Host::snapshot`] and everything it does goes back out through
//! the actuation methods, which are fire-and-forget.

use pvpchecks_types::{BuffId, ItemId};

use crate::snapshot::{PlayerId, PlayerSnapshot};

/// Colour/category of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// Player-facing operations provided by the game server.
pub trait Host: Send + Sync {
    /// Current state of a connected player, or `None` if they left.
    fn snapshot(&self, player: PlayerId) -> Option<PlayerSnapshot>;

    fn has_capability(&self, player: PlayerId, capability: &str) -> bool;

    /// Freeze the player for the current tick.
    fn disable(&self, player: PlayerId);

    fn set_pvp(&self, player: PlayerId, enabled: bool);

    fn clear_buff(&self, player: PlayerId, buff: BuffId);

    fn send_message(&self, player: PlayerId, severity: Severity, text: &str);

    /// Display name for a buff in warnings.
    fn buff_name(&self, buff: BuffId) -> String {
        format!("Buff #{}", buff)
    }
}

/// A resolved item reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRef {
    pub id: ItemId,
    pub name: String,
}

impl ItemRef {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Name resolution used by the admin API. Ambiguous queries return every
/// candidate; callers decide what to do with more than one.
pub trait Lookup: Send + Sync {
    /// Canonical name of a region, if it exists.
    fn region(&self, name: &str) -> Option<String>;

    /// Items matching a name or numeric ID.
    fn items(&self, query: &str) -> Vec<ItemRef>;

    /// Buffs matching a name.
    fn buffs(&self, query: &str) -> Vec<BuffId>;

    fn item_name(&self, item: ItemId) -> Option<String>;

    fn buff_name(&self, buff: BuffId) -> String {
        format!("Buff #{}", buff)
    }
}
