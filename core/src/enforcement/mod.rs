//! Enforcement
//!
//! ```text
//!   Vec<Infringement> ──▶ Disable ──▶ SetPvP(false)? ──▶ ClearBuff? ──▶ CooldownLedger
//!                                                                         │
//!                                                          cooled down ───┴── suppressed
//!                                                               │
//!                                                      render + SendMessage
//! ```

mod cooldown;
mod coordinator;
pub mod message;

#[cfg(test)]
pub(crate) mod test_host;

pub use cooldown::{CooldownLedger, WarningState};
pub use coordinator::{EnforcementCoordinator, EnforcementOutcome};
