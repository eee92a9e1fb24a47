//! Diagnostic listings of registered filter state
//!
//! Pure reads over the registry; the only side effect is whatever sink the
//! caller hands in. Two variants exist: the ambient report over everything,
//! and a context-scoped report limited to one owner's entries.

use crate::core::key::ContextId;
use crate::registry::FilterRegistry;
use serde::Serialize;
use std::io;

const REPORT_HEADER: &str = "Configured query filters:";
const REPORT_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Serializable view of one registered entry
#[derive(Debug, Clone, Serialize)]
pub struct FilterDescription {
    pub name: String,
    pub enabled: bool,
    pub context_id: ContextId,
}

/// Stable-ordered snapshot of every registered entry.
pub fn snapshot(registry: &FilterRegistry) -> Vec<FilterDescription> {
    let mut descriptions: Vec<FilterDescription> = registry
        .list_all()
        .into_iter()
        .map(|(key, state)| FilterDescription {
            name: key.name().to_string(),
            enabled: state.is_enabled(),
            context_id: key.context(),
        })
        .collect();
    descriptions.sort_by(|a, b| {
        (a.context_id.as_u64(), a.name.as_str()).cmp(&(b.context_id.as_u64(), b.name.as_str()))
    });
    descriptions
}

/// One line per entry, `"{name}\t[{Enabled|Disabled}]"`.
pub fn describe_all(registry: &FilterRegistry) -> Vec<String> {
    snapshot(registry).iter().map(describe_line).collect()
}

/// Scoped variant of [`describe_all`]: only entries owned by `context`.
pub fn describe_context(registry: &FilterRegistry, context: ContextId) -> Vec<String> {
    snapshot(registry)
        .iter()
        .filter(|d| d.context_id == context)
        .map(describe_line)
        .collect()
}

/// Writes the ambient report (header, rule lines, rows) to `sink`.
pub fn write_report<W: io::Write>(registry: &FilterRegistry, sink: &mut W) -> io::Result<()> {
    write_lines(sink, &describe_all(registry))
}

/// Writes the context-scoped report to `sink`.
pub fn write_context_report<W: io::Write>(
    registry: &FilterRegistry,
    context: ContextId,
    sink: &mut W,
) -> io::Result<()> {
    write_lines(sink, &describe_context(registry, context))
}

/// JSON rendering of the snapshot, for structured sinks.
pub fn json_report(registry: &FilterRegistry) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&snapshot(registry))
}

fn describe_line(description: &FilterDescription) -> String {
    let status = if description.enabled {
        "Enabled"
    } else {
        "Disabled"
    };
    format!("{}\t[{}]", description.name, status)
}

fn write_lines<W: io::Write>(sink: &mut W, lines: &[String]) -> io::Result<()> {
    writeln!(sink, "{}", REPORT_HEADER)?;
    writeln!(sink, "{}", REPORT_RULE)?;
    for line in lines {
        writeln!(sink, "{}", line)?;
    }
    writeln!(sink, "{}", REPORT_RULE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::key::FilterKey;
    use crate::core::state::FilterState;

    fn populate(registry: &FilterRegistry, name: &str, ctx: ContextId, enabled: bool) {
        registry.get_or_create(FilterKey::new(name, ctx), || FilterState::new(name, enabled));
    }

    #[test]
    fn test_describe_all_lines() {
        let registry = FilterRegistry::new();
        let ctx = ContextId::next();
        populate(&registry, "SoftDelete", ctx, true);
        populate(&registry, "Tenant", ctx, false);

        let lines = describe_all(&registry);
        assert_eq!(lines, vec!["SoftDelete\t[Enabled]", "Tenant\t[Disabled]"]);
    }

    #[test]
    fn test_describe_context_scopes() {
        let registry = FilterRegistry::new();
        let c1 = ContextId::next();
        let c2 = ContextId::next();
        populate(&registry, "SoftDelete", c1, true);
        populate(&registry, "SoftDelete", c2, false);

        assert_eq!(describe_context(&registry, c1), vec!["SoftDelete\t[Enabled]"]);
        assert_eq!(describe_context(&registry, c2), vec!["SoftDelete\t[Disabled]"]);
    }

    #[test]
    fn test_write_report_format() {
        let registry = FilterRegistry::new();
        let ctx = ContextId::next();
        populate(&registry, "SoftDelete", ctx, true);

        let mut sink = Vec::new();
        write_report(&registry, &mut sink).expect("writing to a Vec should not fail");
        let output = String::from_utf8(sink).expect("report should be valid UTF-8");

        assert!(output.starts_with(REPORT_HEADER));
        assert!(output.contains("SoftDelete\t[Enabled]"));
        assert_eq!(output.matches(REPORT_RULE).count(), 2);
    }

    #[test]
    fn test_json_report() {
        let registry = FilterRegistry::new();
        let ctx = ContextId::next();
        populate(&registry, "Tenant", ctx, true);

        let json = json_report(&registry).expect("snapshot should serialize");
        let parsed: serde_json::Value =
            serde_json::from_str(&json).expect("report should be valid JSON");
        assert_eq!(parsed[0]["name"], "Tenant");
        assert_eq!(parsed[0]["enabled"], true);
    }
}
