pub mod admin;
pub mod checks;
pub mod enforcement;
pub mod error;
pub mod game_data;
pub mod guard;
pub mod host;
pub mod infringement;
pub mod rules;
pub mod snapshot;

// Re-exports for convenience
pub use admin::RuleAdmin;
pub use checks::{CheckPipeline, RuleCheck};
pub use enforcement::{CooldownLedger, EnforcementCoordinator, EnforcementOutcome, WarningState};
pub use error::{ConfigError, RuleError};
pub use guard::PvpGuard;
pub use host::{Host, ItemRef, Lookup, Severity};
pub use infringement::Infringement;
pub use rules::{RuleList, RuleSet, RuleStore};
pub use snapshot::{Item, ItemFlags, PlayerId, PlayerSnapshot};

pub use pvpchecks_types::{
    BuffId, CheckToggles, DuplicateScope, ItemId, MessageCatalog, MessageKind, PrefixId,
    ProjectileId, RulesConfig, WeaponClass,
};
