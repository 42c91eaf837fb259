//! Centralized message formatting utilities.
//!
//! All player-facing text goes through this module so warnings, notices and
//! admin listings render evidence the same way.

/// Substitute positional `{N}` placeholders in a template.
///
/// Placeholders with no matching argument are left untouched, so a template
/// that references more arguments than supplied still renders something
/// readable instead of failing.
///
/// # Examples
/// ```
/// use pvpchecks_types::formatting::interpolate;
/// assert_eq!(interpolate("{0} is banned", &["Zenith"]), "Zenith is banned");
/// assert_eq!(interpolate("{0} and {1}", &["a"]), "a and {1}");
/// ```
pub fn interpolate(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            let arg = args.get(index)?;
            Some((arg, close))
        });

        match substituted {
            Some((arg, close)) => {
                result.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}

/// Join display values with `", "`.
///
/// # Examples
/// ```
/// use pvpchecks_types::formatting::join_list;
/// assert_eq!(join_list(["Zenith", "Last Prism"]), "Zenith, Last Prism");
/// assert_eq!(join_list(Vec::<String>::new()), "");
/// ```
pub fn join_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(item.as_ref());
    }
    out
}

/// Format a named identifier as `Name (id)` for listings.
///
/// # Examples
/// ```
/// use pvpchecks_types::formatting::format_labeled_id;
/// assert_eq!(format_labeled_id("Zenith", 4956), "Zenith (4956)");
/// ```
pub fn format_labeled_id(name: &str, id: i32) -> String {
    format!("{} ({})", name, id)
}

/// Format a named identifier as `Name(id)` for ambiguous-match candidate lists.
pub fn format_candidate(name: &str, id: i32) -> String {
    format!("{}({})", name, id)
}

/// Format a millisecond duration as seconds with one decimal (`10.0s`).
pub fn format_cooldown_ms(ms: u64) -> String {
    format!("{:.1}s", ms as f64 / 1000.0)
}
