//! Response parser: raw generator prose -> [`MaterialRecordSet`].
//!
//! The expected shape is an introductory paragraph, one paragraph per
//! material separated by a blank line, and a closing paragraph. That shape
//! is generator-produced prose, not a schema, so the parser degrades per
//! paragraph: a block that does not yield at least three non-empty lines is
//! dropped silently instead of failing the request.
//!
//! The 3-line minimum and the literal label prefixes are a compatibility
//! contract with the upstream prompt; do not tighten them.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::{MaterialRecord, MaterialRecordSet};

/// Leading ordinal numbering on a name line, e.g. `"1. "` in
/// `"1. Titanium Alloy:"`.
static ORDINAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s*").expect("ordinal prefix regex is valid"));

/// Parse a raw multi-paragraph response into an ordered record set.
///
/// Paragraphs are delimited by blank lines; the first and last paragraph
/// are discarded as boilerplate. An input with fewer than three paragraphs
/// therefore yields an empty set, which is a valid result, not an error.
pub fn parse_suggestions(raw: &str) -> MaterialRecordSet {
    let normalized = raw.replace("\r\n", "\n");
    let paragraphs: Vec<&str> = normalized.trim().split("\n\n").collect();

    // Drop header and footer boilerplate. [1..len-1] of a short input is
    // empty, matching the fewer-than-3-paragraphs property.
    let body = match paragraphs.len() {
        0..=2 => &[][..],
        len => &paragraphs[1..len - 1],
    };

    let mut records = MaterialRecordSet::new();
    for block in body {
        match parse_block(block) {
            Some(record) => records.push(record),
            None => {
                tracing::debug!(
                    block = %block.trim(),
                    "skipping malformed paragraph block"
                );
            }
        }
    }
    records
}

/// Parse one paragraph block, or `None` if it is too short to materialize.
fn parse_block(block: &str) -> Option<MaterialRecord> {
    let block = block.trim();
    if block.is_empty() {
        return None;
    }

    let lines: Vec<&str> = block.lines().collect();
    if lines.len() < 3 {
        return None;
    }

    let name = parse_name(lines[0]);
    if name.is_empty() {
        return None;
    }

    let properties = strip_labeled(lines[1], "Properties: ");
    let pros = strip_labeled(lines[2], "Pros: ");
    let cons = lines
        .get(3)
        .map(|line| strip_labeled(line, "Cons: "))
        .unwrap_or_default();

    Some(MaterialRecord::new(name, properties, pros, cons))
}

/// Extract the material name from the first line of a block: strip a
/// leading ordinal-and-period pattern and a trailing colon, then trim.
fn parse_name(line: &str) -> String {
    let stripped = ORDINAL_PREFIX.replace(line, "");
    let stripped = stripped.trim();
    stripped.strip_suffix(':').unwrap_or(stripped).trim().to_string()
}

/// Strip a literal label prefix if present, then a leading run of hyphen
/// bullets and spaces, then surrounding whitespace. Idempotent.
fn strip_labeled(line: &str, label: &str) -> String {
    let rest = line.trim().strip_prefix(label).unwrap_or(line);
    rest.trim_start_matches(['-', ' ']).trim().to_string()
}
