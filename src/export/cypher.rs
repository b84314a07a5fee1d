//! Cypher script export
//!
//! The script runs in four phases:
//! 1. uniqueness constraints on every generated `id` (and `Category.name`)
//! 2. one `CREATE` per node; each node also gets a temporary `_Seed` label
//!    and `_seed_id` property holding its store handle
//! 3. one `MATCH ... CREATE` per edge, resolving endpoints by `_seed_id`
//! 4. removal of the temporary label, property and index

use super::{create_file, ExportResult};
use crate::graph::{GraphStore, PropertyMap, PropertyValue};
use crate::schema::{labels, EntityKind};
use chrono::SecondsFormat;
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tracing::info;

const SEED_LABEL: &str = "_Seed";
const SEED_KEY: &str = "_seed_id";
const SEED_INDEX: &str = "shopgraph_seed_index";

fn needs_escaping(s: &str) -> bool {
    s.chars()
        .any(|ch| matches!(ch, '\\' | '\'' | '"' | '\n' | '\r' | '\t' | '\x00'))
}

/// Escape a string for use inside a single-quoted Cypher literal
pub fn escape_string(s: &str) -> Cow<'_, str> {
    if !needs_escaping(s) {
        return Cow::Borrowed(s);
    }

    let mut escaped = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x00' => escaped.push_str("\\u0000"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Letters, digits and underscores, not starting with a digit
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Back-quote an identifier unless it is a plain one
pub fn escape_identifier(s: &str) -> Cow<'_, str> {
    if is_valid_identifier(s) {
        Cow::Borrowed(s)
    } else {
        Cow::Owned(format!("`{}`", s.replace('`', "``")))
    }
}

/// Render a property value as a Cypher literal
pub fn cypher_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::String(s) => format!("'{}'", escape_string(s)),
        PropertyValue::Integer(i) => i.to_string(),
        PropertyValue::Float(f) if f.is_finite() => {
            // Debug keeps a decimal point on whole numbers (1.0, not 1)
            format!("{:?}", f)
        }
        PropertyValue::Float(_) | PropertyValue::Null => "null".to_string(),
        PropertyValue::Boolean(b) => b.to_string(),
        PropertyValue::DateTime(_) => match value.as_utc() {
            Some(dt) => format!(
                "datetime('{}')",
                dt.to_rfc3339_opts(SecondsFormat::Millis, true)
            ),
            None => "null".to_string(),
        },
    }
}

/// `{a: 1, b: 'x'}` with keys in sorted order
fn cypher_map(properties: &PropertyMap, extra: Option<(&str, String)>) -> String {
    let mut entries: BTreeMap<&str, String> = properties
        .iter()
        .map(|(k, v)| (k.as_str(), cypher_value(v)))
        .collect();
    if let Some((key, value)) = extra {
        entries.insert(key, value);
    }

    let body: Vec<String> = entries
        .into_iter()
        .map(|(k, v)| format!("{}: {}", escape_identifier(k), v))
        .collect();
    format!("{{{}}}", body.join(", "))
}

fn constraint_name(label: &str, key: &str) -> String {
    format!("{}_{}_unique", label.to_lowercase(), key)
}

/// Write the import script for `store` to `out`
pub fn write_cypher<W: Write>(store: &GraphStore, out: &mut W) -> ExportResult<()> {
    let stats = store.statistics();

    writeln!(out, "// Constraints")?;
    let mut unique_keys: Vec<(&str, &str)> = EntityKind::ALL
        .iter()
        .map(|kind| (kind.label(), "id"))
        .collect();
    unique_keys.push((labels::CATEGORY, "name"));
    for (label, key) in unique_keys {
        if !stats.label_counts.contains_key(label) {
            continue;
        }
        writeln!(
            out,
            "CREATE CONSTRAINT {} IF NOT EXISTS FOR (n:{}) REQUIRE n.{} IS UNIQUE;",
            constraint_name(label, key),
            escape_identifier(label),
            escape_identifier(key)
        )?;
    }
    writeln!(
        out,
        "CREATE INDEX {} IF NOT EXISTS FOR (n:{}) ON (n.{});",
        SEED_INDEX, SEED_LABEL, SEED_KEY
    )?;

    writeln!(out)?;
    writeln!(out, "// Nodes")?;
    for node in store.nodes() {
        let labels: String = node
            .labels
            .iter()
            .map(|l| format!(":{}", escape_identifier(l.as_str())))
            .collect();
        let properties = cypher_map(
            &node.properties,
            Some((SEED_KEY, node.id.as_u64().to_string())),
        );
        writeln!(out, "CREATE (n{}:{} {});", labels, SEED_LABEL, properties)?;
    }

    writeln!(out)?;
    writeln!(out, "// Relationships")?;
    for edge in store.edges() {
        let properties = if edge.properties.is_empty() {
            String::new()
        } else {
            format!(" {}", cypher_map(&edge.properties, None))
        };
        writeln!(
            out,
            "MATCH (a:{seed} {{{key}: {src}}}), (b:{seed} {{{key}: {dst}}}) CREATE (a)-[:{rel}{props}]->(b);",
            seed = SEED_LABEL,
            key = SEED_KEY,
            src = edge.source.as_u64(),
            dst = edge.target.as_u64(),
            rel = escape_identifier(edge.edge_type.as_str()),
            props = properties,
        )?;
    }

    writeln!(out)?;
    writeln!(out, "// Cleanup")?;
    writeln!(
        out,
        "MATCH (n:{seed}) REMOVE n:{seed}, n.{key};",
        seed = SEED_LABEL,
        key = SEED_KEY
    )?;
    writeln!(out, "DROP INDEX {} IF EXISTS;", SEED_INDEX)?;
    out.flush()?;

    info!(
        nodes = stats.node_count,
        edges = stats.edge_count,
        "wrote cypher script"
    );
    Ok(())
}

/// The import script as a string
pub fn to_cypher_script(store: &GraphStore) -> ExportResult<String> {
    let mut buf = Vec::new();
    write_cypher(store, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn write_cypher_file(store: &GraphStore, path: impl AsRef<Path>) -> ExportResult<()> {
    let mut out = create_file(path.as_ref())?;
    write_cypher(store, &mut out)
}
