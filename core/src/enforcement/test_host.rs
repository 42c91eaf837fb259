//! In-memory host that records every call, for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use pvpchecks_types::BuffId;

use crate::host::{Host, Severity};
use crate::snapshot::{PlayerId, PlayerSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Disable(PlayerId),
    SetPvp(PlayerId, bool),
    ClearBuff(PlayerId, BuffId),
    Message(PlayerId, Severity, String),
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    players: Mutex<HashMap<PlayerId, PlayerSnapshot>>,
    actions: Mutex<Vec<Action>>,
}

impl RecordingHost {
    pub fn with_player(snapshot: PlayerSnapshot) -> Self {
        let host = Self::default();
        host.set_player(snapshot);
        host
    }

    pub fn set_player(&self, snapshot: PlayerSnapshot) {
        self.players.lock().unwrap().insert(snapshot.player, snapshot);
    }

    pub fn remove_player(&self, player: PlayerId) {
        self.players.lock().unwrap().remove(&player);
    }

    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Action) -> bool) -> usize {
        self.actions.lock().unwrap().iter().filter(|a| pred(a)).count()
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Message(_, severity, text) => Some((severity, text)),
                _ => None,
            })
            .collect()
    }

    fn record(&self, action: Action) {
        self.actions.lock().unwrap().push(action);
    }
}

impl Host for RecordingHost {
    fn snapshot(&self, player: PlayerId) -> Option<PlayerSnapshot> {
        self.players.lock().unwrap().get(&player).cloned()
    }

    fn has_capability(&self, player: PlayerId, capability: &str) -> bool {
        self.snapshot(player)
            .is_some_and(|snapshot| snapshot.has_capability(capability))
    }

    fn disable(&self, player: PlayerId) {
        self.record(Action::Disable(player));
    }

    fn set_pvp(&self, player: PlayerId, enabled: bool) {
        self.record(Action::SetPvp(player, enabled));
    }

    fn clear_buff(&self, player: PlayerId, buff: BuffId) {
        self.record(Action::ClearBuff(player, buff));
    }

    fn send_message(&self, player: PlayerId, severity: Severity, text: &str) {
        self.record(Action::Message(player, severity, text.to_string()));
    }
}
