//! Tests for the check pipeline
//!
//! Covers the entry gate, each check's trigger conditions and the fixed
//! output order.

use pvpchecks_types::{CheckToggles, DuplicateScope, WeaponClass};

use super::{CheckPipeline, passes_entry_gate};
use crate::game_data::{SEVENTH_ACCESSORY_SLOT, capability};
use crate::infringement::Infringement;
use crate::rules::RuleSet;
use crate::snapshot::{Item, ItemFlags, PlayerId, PlayerSnapshot};

/// Rule set with every check on and nothing banned
fn make_rules() -> RuleSet {
    let mut rules = RuleSet::default();
    rules.toggles = CheckToggles::all_checks();
    for buff in rules.banned_buffs() {
        rules.remove_banned_buff(buff).unwrap();
    }
    rules
}

/// In-combat player with nothing equipped
fn make_snapshot() -> PlayerSnapshot {
    let mut snapshot = PlayerSnapshot::new(PlayerId(1));
    snapshot.name = "Tester".to_string();
    snapshot.in_combat_mode = true;
    snapshot
}

fn melee() -> ItemFlags {
    ItemFlags {
        melee: true,
        ..Default::default()
    }
}

fn ranged() -> ItemFlags {
    ItemFlags {
        ranged: true,
        ..Default::default()
    }
}

fn magic() -> ItemFlags {
    ItemFlags {
        magic: true,
        ..Default::default()
    }
}

fn run(rules: &RuleSet, snapshot: &PlayerSnapshot) -> Vec<Infringement> {
    CheckPipeline::standard().run(rules, snapshot)
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry gate
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_clean_player_has_no_infringements() {
    assert!(run(&make_rules(), &make_snapshot()).is_empty());
}

#[test]
fn test_skipped_when_not_in_combat_mode() {
    let mut rules = make_rules();
    rules.add_banned_item(100).unwrap();
    let mut snapshot = make_snapshot();
    snapshot.selected_item = Some(Item::new(100, "Banned"));
    snapshot.in_combat_mode = false;

    assert!(!passes_entry_gate(&rules, &snapshot));
    assert!(run(&rules, &snapshot).is_empty());
}

#[test]
fn test_skipped_with_bypass_all() {
    let mut rules = make_rules();
    rules.add_banned_item(100).unwrap();
    let mut snapshot = make_snapshot();
    snapshot.selected_item = Some(Item::new(100, "Banned"));
    snapshot.capabilities.insert(capability::BYPASS_ALL.to_string());

    assert!(run(&rules, &snapshot).is_empty());
}

#[test]
fn test_region_restriction() {
    let mut rules = make_rules();
    rules.toggles.region = true;
    rules.add_restricted_region("arena").unwrap();
    rules.add_banned_item(100).unwrap();

    let mut snapshot = make_snapshot();
    snapshot.selected_item = Some(Item::new(100, "Banned"));

    // Outside any region
    assert!(run(&rules, &snapshot).is_empty());

    // Inside an unrestricted region
    snapshot.region = Some("spawn".to_string());
    assert!(run(&rules, &snapshot).is_empty());

    // Inside the restricted region
    snapshot.region = Some("arena".to_string());
    assert_eq!(run(&rules, &snapshot).len(), 1);

    // Region override enforces everywhere
    snapshot.region = None;
    snapshot
        .capabilities
        .insert(capability::IGNORE_REGION.to_string());
    assert_eq!(run(&rules, &snapshot).len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Banned items
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_banned_selected_item() {
    let mut rules = make_rules();
    rules.add_banned_item(100).unwrap();
    let mut snapshot = make_snapshot();
    snapshot.selected_item = Some(Item::new(100, "Zenith"));

    assert_eq!(
        run(&rules, &snapshot),
        vec![Infringement::BannedItem {
            items: vec![Item::new(100, "Zenith")]
        }]
    );
}

#[test]
fn test_banned_items_collected_from_all_sources() {
    let mut rules = make_rules();
    rules.add_banned_item(100).unwrap();
    rules.add_banned_item(200).unwrap();
    rules.add_banned_item(300).unwrap();

    let mut snapshot = make_snapshot();
    snapshot.held_item = Some(Item::new(100, "Held"));
    snapshot.misc_equips = vec![Item::new(200, "Hook")];
    snapshot.armor[4] = Item::new(300, "Wings");

    let found = run(&rules, &snapshot);
    let Some(Infringement::BannedItem { items }) = found.first() else {
        panic!("expected BannedItem, got {:?}", found);
    };
    let ids: Vec<_> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![100, 200, 300]);
}

#[test]
fn test_banned_item_bypass() {
    let mut rules = make_rules();
    rules.add_banned_item(100).unwrap();
    let mut snapshot = make_snapshot();
    snapshot.selected_item = Some(Item::new(100, "Zenith"));
    snapshot
        .capabilities
        .insert(capability::USE_BANNED_ITEMS.to_string());

    assert!(run(&rules, &snapshot).is_empty());
}

#[test]
fn test_banned_item_toggle_off() {
    let mut rules = make_rules();
    rules.toggles.item = false;
    rules.add_banned_item(100).unwrap();
    let mut snapshot = make_snapshot();
    snapshot.selected_item = Some(Item::new(100, "Zenith"));

    assert!(run(&rules, &snapshot).is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Buffs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_duplicate_and_banned_buffs() {
    let mut rules = make_rules();
    rules.add_banned_buff(10).unwrap();
    let mut snapshot = make_snapshot();
    snapshot.buffs = vec![10, 3, 10, 5];

    assert_eq!(
        run(&rules, &snapshot),
        vec![
            Infringement::DuplicateBuff,
            Infringement::BannedBuff { buffs: vec![10] }
        ]
    );
}

#[test]
fn test_banned_buffs_distinct_in_first_seen_order() {
    let mut rules = make_rules();
    rules.add_banned_buff(10).unwrap();
    rules.add_banned_buff(59).unwrap();
    let mut snapshot = make_snapshot();
    snapshot.buffs = vec![59, 1, 10];

    assert_eq!(
        run(&rules, &snapshot),
        vec![Infringement::BannedBuff { buffs: vec![59, 10] }]
    );
}

#[test]
fn test_buff_check_toggle_off() {
    let mut rules = make_rules();
    rules.toggles.buff = false;
    rules.add_banned_buff(10).unwrap();
    let mut snapshot = make_snapshot();
    snapshot.buffs = vec![10, 10];

    assert!(run(&rules, &snapshot).is_empty());
}

// ─────────────────────────────────────────────────────────────────────────────
// Prefixes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_cross_class_prefix_is_illegal() {
    let rules = make_rules();
    let mut snapshot = make_snapshot();
    // 16 is a ranged prefix
    snapshot.selected_item = Some(Item::new(1, "Sword").with_flags(melee()).with_prefix(16));

    assert_eq!(run(&rules, &snapshot), vec![Infringement::IllegalPrefix]);
}

#[test]
fn test_native_and_universal_prefixes_are_legal() {
    let rules = make_rules();
    let mut snapshot = make_snapshot();

    snapshot.selected_item = Some(Item::new(1, "Sword").with_flags(melee()).with_prefix(81));
    assert!(run(&rules, &snapshot).is_empty());

    // 59 is universal
    snapshot.selected_item = Some(Item::new(2, "Staff").with_flags(magic()).with_prefix(59));
    assert!(run(&rules, &snapshot).is_empty());
}

#[test]
fn test_prefixed_stackable_is_illegal() {
    let rules = make_rules();
    let mut snapshot = make_snapshot();
    snapshot.selected_item = Some(Item::new(3, "Shuriken").with_max_stack(999).with_prefix(81));

    assert_eq!(run(&rules, &snapshot), vec![Infringement::IllegalPrefix]);
}

#[test]
fn test_unclassified_item_prefix_not_checked() {
    let rules = make_rules();
    let mut snapshot = make_snapshot();
    snapshot.selected_item = Some(Item::new(4, "Pickaxe").with_prefix(16));

    assert!(run(&rules, &snapshot).is_empty());
}

#[test]
fn test_prefix_tables_follow_rule_updates() {
    let mut rules = make_rules();
    rules.set_prefix_class(WeaponClass::Ranged, [16, 17]);
    rules.set_prefix_class(WeaponClass::Melee, [1, 90]);

    let mut snapshot = make_snapshot();
    snapshot.selected_item = Some(Item::new(1, "Bow").with_flags(ranged()).with_prefix(90));

    assert_eq!(run(&rules, &snapshot), vec![Infringement::IllegalPrefix]);
}

#[test]
fn test_prefixed_ammo_with_unprefixed_ranged_weapon() {
    let rules = make_rules();
    let mut snapshot = make_snapshot();
    snapshot.selected_item = Some(Item::new(95, "Flintlock").with_flags(ranged()));
    // 97 = Musket Ball
    snapshot.inventory = vec![
        Item::new(95, "Flintlock").with_flags(ranged()),
        Item::new(97, "Musket Ball").with_max_stack(999).with_prefix(7),
    ];

    assert_eq!(run(&rules, &snapshot), vec![Infringement::PrefixedAmmo]);
}

#[test]
fn test_prefixed_ammo_ignored_without_ranged_weapon() {
    let rules = make_rules();
    let mut snapshot = make_snapshot();
    snapshot.selected_item = Some(Item::new(1, "Sword").with_flags(melee()));
    snapshot.inventory = vec![Item::new(97, "Musket Ball").with_max_stack(999).with_prefix(7)];

    assert!(run(&rules, &snapshot).is_empty());

    snapshot.selected_item = None;
    assert!(run(&rules, &snapshot).is_empty());
}

#[test]
fn test_prefixed_armor_only_body_slots() {
    let rules = make_rules();
    let mut snapshot = make_snapshot();
    snapshot.armor[3] = Item::new(50, "Band").with_prefix(65);
    assert!(run(&rules, &snapshot).is_empty());

    snapshot.armor[1] = Item::new(51, "Breastplate").with_prefix(1);
    snapshot.armor[2] = Item::new(52, "Greaves").with_prefix(1);
    assert_eq!(run(&rules, &snapshot), vec![Infringement::PrefixedArmor]);
}

#[test]
fn test_prefix_bypass_is_per_check() {
    let rules = make_rules();
    let mut snapshot = make_snapshot();
    snapshot.selected_item = Some(Item::new(1, "Sword").with_flags(melee()).with_prefix(16));
    snapshot.armor[0] = Item::new(51, "Helmet").with_prefix(1);
    snapshot
        .capabilities
        .insert(capability::USE_ILLEGAL_PREFIXES.to_string());

    assert_eq!(run(&rules, &snapshot), vec![Infringement::PrefixedArmor]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Accessories
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_duplicate_accessory() {
    let rules = make_rules();
    let mut snapshot = make_snapshot();
    snapshot.armor[0] = Item::new(10, "A");
    snapshot.armor[1] = Item::new(20, "B");
    snapshot.armor[2] = Item::new(10, "A");

    assert_eq!(
        run(&rules, &snapshot),
        vec![Infringement::DuplicateAccessory {
            item: 10,
            name: "A".to_string()
        }]
    );
}

#[test]
fn test_distinct_accessories_with_empty_slots() {
    let rules = make_rules();
    let mut snapshot = make_snapshot();
    snapshot.armor[0] = Item::new(10, "A");
    snapshot.armor[1] = Item::new(20, "B");

    assert!(run(&rules, &snapshot).is_empty());
}

#[test]
fn test_duplicate_scope_excluding_seventh_slot() {
    let mut rules = make_rules();
    rules.toggles.seventh_slot = false;
    let mut snapshot = make_snapshot();
    snapshot.armor[5] = Item::new(10, "A");
    snapshot.armor[SEVENTH_ACCESSORY_SLOT] = Item::new(10, "A");

    assert_eq!(run(&rules, &snapshot).len(), 1);

    rules.duplicate_scope = DuplicateScope::WearableSlots;
    assert!(run(&rules, &snapshot).is_empty());
}

#[test]
fn test_seventh_slot() {
    let rules = make_rules();
    let mut snapshot = make_snapshot();
    for slot in 0..SEVENTH_ACCESSORY_SLOT {
        snapshot.armor[slot] = Item::new(100 + slot as i32, "Gear");
    }
    assert!(run(&rules, &snapshot).is_empty());

    snapshot.armor[SEVENTH_ACCESSORY_SLOT] = Item::new(999, "Shield");
    assert_eq!(run(&rules, &snapshot), vec![Infringement::SeventhSlot]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Ordering
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_output_follows_pipeline_order() {
    let mut rules = make_rules();
    rules.add_banned_item(100).unwrap();
    rules.add_banned_buff(10).unwrap();

    let mut snapshot = make_snapshot();
    snapshot.selected_item = Some(Item::new(100, "Bow").with_flags(ranged()).with_prefix(1));
    snapshot.inventory = vec![Item::new(40, "Wooden Arrow").with_prefix(3)];
    snapshot.buffs = vec![10, 10];
    snapshot.armor[0] = Item::new(1, "Helmet").with_prefix(2);
    snapshot.armor[3] = Item::new(7, "Band");
    snapshot.armor[4] = Item::new(7, "Band");
    snapshot.armor[SEVENTH_ACCESSORY_SLOT] = Item::new(8, "Cloak");

    let labels: Vec<_> = run(&rules, &snapshot)
        .iter()
        .map(Infringement::label)
        .collect();
    assert_eq!(
        labels,
        vec![
            "banned_item",
            "duplicate_buff",
            "banned_buff",
            "illegal_prefix",
            "prefixed_ammo",
            "prefixed_armor",
            "duplicate_accessory",
            "seventh_slot",
        ]
    );
}
