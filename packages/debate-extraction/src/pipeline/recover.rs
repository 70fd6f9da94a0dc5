//! Output recovery - turn a noisy completion into an untyped JSON value.
//!
//! The completion is an untrusted, lossy channel: models decorate output
//! with commentary and fencing despite instructions, embed stray control
//! bytes, and drift on key names. Recovery degrades gracefully where a
//! plausible structure exists and fails hard only where none does.

use serde_json::Value;
use tracing::warn;

use crate::error::{ExtractionError, Result};

/// Alternate keys some completions use for an atom's identifier.
const ATOM_ID_DRIFT: &[&str] = &["atom_id", "name"];

/// Locate the first top-level `{...}` span in a raw completion.
///
/// Greedy: first `{` through last `}`, spanning newlines, so leading and
/// trailing commentary or fencing is tolerated.
pub fn json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end > start {
        Some(&raw[start..=end])
    } else {
        None
    }
}

/// Strip control characters (below 0x20) from a candidate span.
///
/// Completions occasionally embed stray control bytes that break strict
/// parsing; JSON needs none of them outside escaped string positions.
pub fn strip_control_chars(span: &str) -> String {
    span.chars().filter(|c| (*c as u32) >= 0x20).collect()
}

/// Repair known key-naming drift in place.
///
/// Atom entries using an alternate identifier key are normalized to `id`;
/// an atom missing its display text gets its own id as text, a degraded
/// but valid fallback rather than a hard failure. Returns the number of
/// repairs applied.
pub fn repair_key_drift(value: &mut Value) -> usize {
    let mut repairs = 0;

    let Some(atoms) = value.get_mut("atoms").and_then(Value::as_array_mut) else {
        return 0;
    };

    for atom in atoms {
        let Some(entry) = atom.as_object_mut() else {
            continue;
        };

        if !entry.contains_key("id") {
            for alt in ATOM_ID_DRIFT {
                if let Some(id) = entry.remove(*alt) {
                    entry.insert("id".to_string(), id);
                    repairs += 1;
                    break;
                }
            }
        }

        let text_missing = match entry.get("text") {
            None | Some(Value::Null) => true,
            _ => false,
        };
        if text_missing {
            if let Some(id) = entry.get("id").cloned() {
                entry.insert("text".to_string(), id);
                repairs += 1;
            }
        }
    }

    repairs
}

/// Recover an untyped structure from a raw completion.
///
/// 1. locate the brace-delimited span ([`json_span`]), else
///    [`ExtractionError::NoStructureFound`];
/// 2. strip control characters;
/// 3. parse as JSON, else [`ExtractionError::MalformedJson`] with the
///    parser's position;
/// 4. apply known key-drift repairs.
pub fn recover(raw: &str) -> Result<Value> {
    let span = json_span(raw).ok_or(ExtractionError::NoStructureFound)?;
    let cleaned = strip_control_chars(span);

    let mut value: Value =
        serde_json::from_str(&cleaned).map_err(|e| ExtractionError::MalformedJson {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        })?;

    let repairs = repair_key_drift(&mut value);
    if repairs > 0 {
        warn!(repairs, "repaired key drift in completion");
    }

    Ok(value)
}
