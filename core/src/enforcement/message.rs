//! Rendering the combined infringement warning.

use hashbrown::HashSet;
use pvpchecks_types::MessageKind;
use pvpchecks_types::formatting::{interpolate, join_list};

use crate::host::Host;
use crate::infringement::Infringement;
use crate::rules::RuleSet;

/// Header plus one line per distinct infringement kind, in the order found.
///
/// Returns `None` for an empty run.
pub fn render_warning(host: &dyn Host, rules: &RuleSet, found: &[Infringement]) -> Option<String> {
    if found.is_empty() {
        return None;
    }

    let mut lines = vec![rules.template(MessageKind::InfringementHeader).to_string()];
    let mut seen: HashSet<MessageKind> = HashSet::new();

    for infringement in found {
        let kind = infringement.message_kind();
        if !seen.insert(kind) {
            continue;
        }
        lines.push(render_line(host, rules, infringement));
    }

    Some(lines.join("\n"))
}

/// Template for one infringement with its evidence filled in.
pub fn render_line(host: &dyn Host, rules: &RuleSet, infringement: &Infringement) -> String {
    let template = rules.template(infringement.message_kind());

    let evidence = match infringement {
        Infringement::BannedItem { items } => join_list(items.iter().map(|item| item.display_name())),
        Infringement::BannedBuff { buffs } => join_list(buffs.iter().map(|buff| host.buff_name(*buff))),
        Infringement::DuplicateAccessory { name, .. } => name.clone(),
        Infringement::BannedProjectile { projectile } => projectile.to_string(),
        _ => return template.to_string(),
    };

    interpolate(template, &[&evidence])
}
