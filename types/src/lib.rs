//! Shared configuration types for PvPChecks.
//!
//! Kept free of runtime dependencies so tools that only read or write rules
//! files don't pull in the enforcement engine.

pub mod config;
pub mod formatting;
pub mod messages;

pub type ItemId = i32;
pub type BuffId = i32;
pub type PrefixId = i32;
pub type ProjectileId = i32;

pub use config::{
    CheckToggles, DEFAULT_BANNED_BUFFS, DEFAULT_MESSAGE_COOLDOWN_MS, DuplicateScope,
    PrefixTables, RulesConfig, WeaponClass,
};
pub use messages::{MessageCatalog, MessageKind};
