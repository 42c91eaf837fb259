//! Offline rule checker.
//!
//! Loads a rules file and a JSON player snapshot, runs the same pipeline the
//! server does, and prints the infringements plus every action the server
//! would have taken.

mod offline;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use pvpchecks_core::rules::{default_rules_path, load_file, save_file};
use pvpchecks_core::{
    PlayerSnapshot, PvpGuard, RuleAdmin, RuleList, RuleSet, RuleStore, RulesConfig,
};
use pvpchecks_types::formatting::{format_cooldown_ms, join_list};
use tracing_subscriber::filter::EnvFilter;

use offline::{OfflineHost, OfflineLookup};

#[derive(Parser)]
#[command(version, about = "Check PvP rules offline")]
struct Cli {
    /// Rules file (defaults to the per-user config location)
    #[arg(short, long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the checks against a JSON player snapshot
    Check {
        #[arg(short, long)]
        snapshot: PathBuf,
    },
    /// Write a rules file with default settings
    Init {
        #[arg(short, long)]
        force: bool,
    },
    /// Print one banned/restricted list
    List { kind: String },
    /// Load the rules file and report problems
    CheckConfig,
    /// Add an entry to a list
    Ban { kind: String, value: String },
    /// Remove an entry from a list
    Unban { kind: String, value: String },
}

/// Logs go to stderr so stdout stays clean for results.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), String> {
    init_logging();

    let cli = Cli::parse();
    let rules_path = match cli.rules {
        Some(path) => path,
        None => default_rules_path().ok_or("error: no default rules location, pass --rules")?,
    };

    match &cli.command {
        Commands::Check { snapshot } => check(&rules_path, snapshot),
        Commands::Init { force } => init(&rules_path, *force),
        Commands::List { kind } => list(&rules_path, kind),
        Commands::CheckConfig => check_config(&rules_path),
        Commands::Ban { kind, value } => change(&rules_path, kind, value, true),
        Commands::Unban { kind, value } => change(&rules_path, kind, value, false),
    }
}

fn load_rules(path: &Path) -> Result<RuleSet, String> {
    let config = load_file(path).map_err(|e| e.to_string())?;
    RuleSet::from_config(config).map_err(|e| e.to_string())
}

fn parse_list(kind: &str) -> Result<RuleList, String> {
    RuleList::parse(kind).ok_or_else(|| {
        format!(
            "error: unknown list \"{}\" (expected item, buff, projectile or region)",
            kind
        )
    })
}

fn check(rules_path: &Path, snapshot_path: &Path) -> Result<(), String> {
    let rules = load_rules(rules_path)?;
    let raw = fs::read_to_string(snapshot_path).map_err(|e| e.to_string())?;
    let snapshot: PlayerSnapshot = serde_json::from_str(&raw).map_err(|e| e.to_string())?;

    let player = snapshot.player;
    let host = OfflineHost::new(snapshot);
    let guard = PvpGuard::new(RuleStore::in_memory(rules));

    let Some(outcome) = guard.on_player_update_at(&host, player, Utc::now()) else {
        return Err(format!("error: player {} not found", player));
    };

    if outcome.is_clean() {
        println!("{}: no infringements", player);
        return Ok(());
    }

    println!(
        "{}: {}",
        player,
        join_list(outcome.infringements.iter().map(|i| i.label()))
    );
    for action in host.actions() {
        println!("{}", action);
    }
    Ok(())
}

fn init(rules_path: &Path, force: bool) -> Result<(), String> {
    if rules_path.exists() && !force {
        return Err(format!(
            "error: {} already exists (use --force to overwrite)",
            rules_path.display()
        ));
    }
    save_file(rules_path, &RulesConfig::default()).map_err(|e| e.to_string())?;
    println!("Wrote {}", rules_path.display());
    Ok(())
}

fn list(rules_path: &Path, kind: &str) -> Result<(), String> {
    let list = parse_list(kind)?;
    let store = RuleStore::in_memory(load_rules(rules_path)?);
    let entries = RuleAdmin::new(&store, &OfflineLookup).list(list);

    if entries.is_empty() {
        println!("No {} entries", list);
    } else {
        println!("{}", join_list(entries));
    }
    Ok(())
}

fn check_config(rules_path: &Path) -> Result<(), String> {
    let rules = load_rules(rules_path)?;

    println!("Rules file: {}", rules_path.display());
    println!("  banned items:       {}", rules.banned_items().len());
    println!("  banned buffs:       {}", rules.banned_buffs().len());
    println!("  banned projectiles: {}", rules.banned_projectiles().len());
    println!("  restricted regions: {}", rules.restricted_regions().len());
    println!(
        "  message cooldown:   {}",
        format_cooldown_ms(rules.message_cooldown_ms)
    );

    let overlaps = rules.prefix_overlaps();
    if !overlaps.is_empty() {
        println!(
            "  warning: prefixes in more than one class: {}",
            join_list(overlaps.iter().map(|p| p.to_string()))
        );
    }
    Ok(())
}

fn change(rules_path: &Path, kind: &str, value: &str, add: bool) -> Result<(), String> {
    let list = parse_list(kind)?;
    let store = RuleStore::open(rules_path).map_err(|e| e.to_string())?;
    let admin = RuleAdmin::new(&store, &OfflineLookup);

    let shown = match (list, add) {
        (RuleList::Items, true) => admin.add_item(value).map(|item| item.name),
        (RuleList::Items, false) => admin.remove_item(value).map(|item| item.name),
        (RuleList::Buffs, true) => admin.add_buff(value).map(|id| id.to_string()),
        (RuleList::Buffs, false) => admin.remove_buff(value).map(|id| id.to_string()),
        (RuleList::Projectiles, true) => admin.add_projectile(value).map(|id| id.to_string()),
        (RuleList::Projectiles, false) => admin.remove_projectile(value).map(|id| id.to_string()),
        (RuleList::Regions, true) => admin.add_region(value),
        (RuleList::Regions, false) => admin.remove_region(value),
    }
    .map_err(|e| format!("error: {}", e))?;

    store.persist().map_err(|e| e.to_string())?;
    println!(
        "{} {} {}",
        if add { "Added" } else { "Removed" },
        list,
        shown
    );
    Ok(())
}
