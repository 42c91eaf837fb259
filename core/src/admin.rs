//! Rule mutations requested by operators.
//!
//! Names are resolved through [`Lookup`] first, so a typo or an ambiguous
//! name is rejected before the live rule set is touched. Every change goes
//! through [`RuleStore::update`], which swaps the new rules in atomically.

use pvpchecks_types::formatting::{format_candidate, format_labeled_id};
use pvpchecks_types::{BuffId, PrefixId, ProjectileId, WeaponClass};

use crate::error::{ConfigError, RuleError};
use crate::game_data::MAX_BUFF_ID;
use crate::host::{ItemRef, Lookup};
use crate::rules::{RuleList, RuleStore};

/// Admin API over a rule store.
pub struct RuleAdmin<'a> {
    store: &'a RuleStore,
    lookup: &'a dyn Lookup,
}

impl<'a> RuleAdmin<'a> {
    pub fn new(store: &'a RuleStore, lookup: &'a dyn Lookup) -> Self {
        Self { store, lookup }
    }

    // ─── Items ──────────────────────────────────────────────────────────────

    pub fn add_item(&self, query: &str) -> Result<ItemRef, RuleError> {
        let item = self.resolve_item(query)?;
        self.store
            .update(|rules| rules.add_banned_item(item.id))
            .map_err(|e| with_value(e, &item.name))?;
        tracing::info!(item = item.id, name = %item.name, "Banned item");
        Ok(item)
    }

    pub fn remove_item(&self, query: &str) -> Result<ItemRef, RuleError> {
        let item = self.resolve_item(query)?;
        self.store
            .update(|rules| rules.remove_banned_item(item.id))
            .map_err(|e| with_value(e, &item.name))?;
        tracing::info!(item = item.id, name = %item.name, "Unbanned item");
        Ok(item)
    }

    // ─── Buffs ──────────────────────────────────────────────────────────────

    pub fn add_buff(&self, query: &str) -> Result<BuffId, RuleError> {
        let buff = self.resolve_buff(query)?;
        self.store
            .update(|rules| rules.add_banned_buff(buff))
            .map_err(|e| with_value(e, &self.lookup.buff_name(buff)))?;
        tracing::info!(buff, "Banned buff");
        Ok(buff)
    }

    pub fn remove_buff(&self, query: &str) -> Result<BuffId, RuleError> {
        let buff = self.resolve_buff(query)?;
        self.store
            .update(|rules| rules.remove_banned_buff(buff))
            .map_err(|e| with_value(e, &self.lookup.buff_name(buff)))?;
        tracing::info!(buff, "Unbanned buff");
        Ok(buff)
    }

    // ─── Projectiles ────────────────────────────────────────────────────────

    pub fn add_projectile(&self, id: &str) -> Result<ProjectileId, RuleError> {
        let projectile = parse_projectile(id)?;
        self.store
            .update(|rules| rules.add_banned_projectile(projectile))?;
        tracing::info!(projectile, "Banned projectile");
        Ok(projectile)
    }

    pub fn remove_projectile(&self, id: &str) -> Result<ProjectileId, RuleError> {
        let projectile = parse_projectile(id)?;
        self.store
            .update(|rules| rules.remove_banned_projectile(projectile))?;
        tracing::info!(projectile, "Unbanned projectile");
        Ok(projectile)
    }

    // ─── Regions ────────────────────────────────────────────────────────────

    pub fn add_region(&self, name: &str) -> Result<String, RuleError> {
        let region = self.resolve_region(name)?;
        self.store
            .update(|rules| rules.add_restricted_region(&region))?;
        tracing::info!(region = %region, "Restricted region");
        Ok(region)
    }

    pub fn remove_region(&self, name: &str) -> Result<String, RuleError> {
        let region = self.resolve_region(name)?;
        self.store
            .update(|rules| rules.remove_restricted_region(&region))?;
        tracing::info!(region = %region, "Unrestricted region");
        Ok(region)
    }

    // ─── Prefixes ───────────────────────────────────────────────────────────

    /// Replace the native prefixes of one weapon class. Illegal-prefix tables
    /// are rebuilt before the new rules become visible.
    pub fn set_prefix_class(
        &self,
        class: WeaponClass,
        prefixes: impl IntoIterator<Item = PrefixId>,
    ) -> Result<(), RuleError> {
        let prefixes: Vec<PrefixId> = prefixes.into_iter().collect();
        let count = prefixes.len();
        self.store.update(|rules| {
            rules.set_prefix_class(class, prefixes);
            Ok(())
        })?;
        tracing::info!(class = class.label(), count, "Replaced prefix class");
        Ok(())
    }

    // ─── Listing / reload ───────────────────────────────────────────────────

    /// Display strings for one list, sorted by id (items, buffs, projectiles)
    /// or name (regions).
    pub fn list(&self, list: RuleList) -> Vec<String> {
        let rules = self.store.snapshot();
        match list {
            RuleList::Items => rules
                .banned_items()
                .into_iter()
                .map(|id| {
                    let name = self
                        .lookup
                        .item_name(id)
                        .unwrap_or_else(|| format!("Item #{}", id));
                    format_labeled_id(&name, id)
                })
                .collect(),
            RuleList::Buffs => rules
                .banned_buffs()
                .into_iter()
                .map(|id| self.lookup.buff_name(id))
                .collect(),
            RuleList::Projectiles => rules
                .banned_projectiles()
                .into_iter()
                .map(|id| id.to_string())
                .collect(),
            RuleList::Regions => rules.restricted_regions(),
        }
    }

    pub fn reload(&self) -> Result<(), ConfigError> {
        self.store.reload()
    }

    // ─── Resolution ─────────────────────────────────────────────────────────

    fn resolve_item(&self, query: &str) -> Result<ItemRef, RuleError> {
        let mut matches = self.lookup.items(query);
        match matches.len() {
            0 => Err(RuleError::LookupNotFound {
                list: RuleList::Items,
                query: query.to_string(),
            }),
            1 => Ok(matches.remove(0)),
            _ => Err(RuleError::LookupAmbiguous {
                query: query.to_string(),
                candidates: matches
                    .iter()
                    .map(|item| format_candidate(&item.name, item.id))
                    .collect(),
            }),
        }
    }

    fn resolve_buff(&self, query: &str) -> Result<BuffId, RuleError> {
        if let Ok(id) = query.trim().parse::<BuffId>() {
            if !(1..MAX_BUFF_ID).contains(&id) {
                return Err(RuleError::InvalidIdentifier {
                    list: RuleList::Buffs,
                    value: query.to_string(),
                });
            }
            return Ok(id);
        }

        let matches = self.lookup.buffs(query);
        match matches.as_slice() {
            [] => Err(RuleError::LookupNotFound {
                list: RuleList::Buffs,
                query: query.to_string(),
            }),
            [buff] => Ok(*buff),
            _ => Err(RuleError::LookupAmbiguous {
                query: query.to_string(),
                candidates: matches
                    .iter()
                    .map(|buff| format_candidate(&self.lookup.buff_name(*buff), *buff))
                    .collect(),
            }),
        }
    }

    fn resolve_region(&self, name: &str) -> Result<String, RuleError> {
        self.lookup
            .region(name)
            .ok_or_else(|| RuleError::LookupNotFound {
                list: RuleList::Regions,
                query: name.to_string(),
            })
    }
}

fn parse_projectile(id: &str) -> Result<ProjectileId, RuleError> {
    id.trim()
        .parse::<ProjectileId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| RuleError::InvalidIdentifier {
            list: RuleList::Projectiles,
            value: id.to_string(),
        })
}

/// Report membership errors by display name rather than raw id.
fn with_value(err: RuleError, name: &str) -> RuleError {
    match err {
        RuleError::AlreadyPresent { list, .. } => RuleError::AlreadyPresent {
            list,
            value: name.to_string(),
        },
        RuleError::NotPresent { list, .. } => RuleError::NotPresent {
            list,
            value: name.to_string(),
        },
        other => other,
    }
}
