//! Rule configuration
//!
//! - **RuleSet**: banned IDs, prefix tables and check toggles, plus the
//!   illegal-prefix tables derived from them
//! - **RuleStore**: the live rule set shared by every check run, swapped
//!   atomically on mutation and persisted as TOML
//!
//! ```text
//!   rules.toml ──load──▶ RulesConfig ──from_config──▶ RuleSet
//!                                                        │
//!                                   Arc<RuleSet> ◀──swap─┤◀── admin mutation
//!                                        │
//!                              CheckPipeline::run (read-only)
//! ```

use std::fmt;

mod rule_set;
pub mod store;

pub use rule_set::RuleSet;
pub use store::{RuleStore, default_rules_path, load_file, save_file};

/// The editable ID lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleList {
    Items,
    Buffs,
    Projectiles,
    Regions,
}

impl RuleList {
    pub const ALL: [RuleList; 4] = [Self::Items, Self::Buffs, Self::Projectiles, Self::Regions];

    pub fn label(self) -> &'static str {
        match self {
            Self::Items => "item",
            Self::Buffs => "buff",
            Self::Projectiles => "projectile",
            Self::Regions => "region",
        }
    }

    /// Parse the short forms accepted by the command layer (`i`, `-i`, `item`...).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim_start_matches('-') {
            "i" | "item" | "items" => Some(Self::Items),
            "b" | "buff" | "buffs" => Some(Self::Buffs),
            "p" | "proj" | "projectile" | "projectiles" => Some(Self::Projectiles),
            "r" | "region" | "regions" => Some(Self::Regions),
            _ => None,
        }
    }
}

impl fmt::Display for RuleList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
