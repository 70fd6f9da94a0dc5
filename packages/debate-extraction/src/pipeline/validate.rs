//! Structural validation - map the untyped structure onto the schema model.
//!
//! The validator walks the recovered JSON by hand instead of leaning on a
//! derived `Deserialize`, because a derive stops at the first error and
//! the contract here is to report every violation in one pass. Checks run
//! in layers: field presence and typing, enum membership, id uniqueness,
//! referential integrity, and acyclicity of the sub-argument relation.
//! Attack legality is a warning, not a violation: the upstream model
//! gets that modeling nuance wrong often enough that hard-failing would
//! throw away otherwise usable structure.

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

use crate::error::{ExtractionError, Result};
use crate::types::debate::{Argument, Atom, Attack, AttackKind, DebateStructure, Rule, RuleKind};

/// Legal values for a rule's `type` field.
pub const RULE_KINDS: &[&str] = &["strict", "defeasible"];

/// Legal values for an attack's `type` field.
pub const ATTACK_KINDS: &[&str] = &["rebut", "undercut", "undermine"];

type Obj = Map<String, Value>;

/// A single violated constraint, with the JSON path it was found at.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{path}: missing required field `{field}`")]
    MissingField { path: String, field: &'static str },

    #[error("{path}: expected {expected}")]
    WrongType { path: String, expected: &'static str },

    #[error("{path}: must not be empty")]
    Empty { path: String },

    #[error("{path}: `{value}` is not one of {allowed:?}")]
    InvalidEnum {
        path: String,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("{path}: duplicate id `{id}`")]
    DuplicateId { path: String, id: String },

    #[error("{path}: `{id}` does not name an existing {entity}")]
    UnknownReference {
        path: String,
        id: String,
        entity: &'static str,
    },

    #[error("sub-argument cycle: {}", .cycle.join(" -> "))]
    Cycle { cycle: Vec<String> },

    #[error("{path}: {message}")]
    IllegalAttack { path: String, message: String },
}

/// A warning-class issue on an otherwise valid structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// JSON path of the offending element
    pub path: String,
    /// Human-readable description
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validated structure plus any warning-class findings on it.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDebate {
    /// The validated, immutable structure
    pub structure: DebateStructure,

    /// Attack-legality findings that did not invalidate the structure
    pub warnings: Vec<Warning>,
}

/// Validate a recovered structure, collecting every violation.
///
/// On success the typed [`DebateStructure`] is returned together with any
/// warnings; on failure [`ExtractionError::SchemaViolation`] carries the
/// complete violation list. A failed validation never yields a partial
/// structure.
pub fn validate(value: &Value) -> Result<ValidatedDebate> {
    let Some(root) = value.as_object() else {
        return Err(ExtractionError::SchemaViolation {
            violations: vec![Violation::WrongType {
                path: "$".to_string(),
                expected: "an object",
            }],
        });
    };

    let mut violations = Vec::new();

    // Atoms first: their id space must be complete before rules and
    // arguments can be checked against it.
    let mut atom_ids = IndexSet::new();
    let mut atoms = Vec::new();
    for (path, entry) in collection(root, "atoms", &mut violations) {
        let Some(entry) = as_object(entry, &path, &mut violations) else {
            continue;
        };
        let id = string_field(entry, &path, "id", &mut violations);
        let text = string_field(entry, &path, "text", &mut violations);
        note_id(&id, &mut atom_ids, &path, &mut violations);
        if let (Some(id), Some(text)) = (id, text) {
            atoms.push(Atom { id, text });
        }
    }

    // Rules: atom references are checked inline for every field that
    // parsed, so one bad field does not suppress the others' findings.
    let mut rule_ids = IndexSet::new();
    let mut rules = Vec::new();
    for (path, entry) in collection(root, "rules", &mut violations) {
        let Some(entry) = as_object(entry, &path, &mut violations) else {
            continue;
        };
        let id = string_field(entry, &path, "id", &mut violations);
        let kind = enum_field(entry, &path, RULE_KINDS, &mut violations).map(|s| match s.as_str() {
            "strict" => RuleKind::Strict,
            _ => RuleKind::Defeasible,
        });
        let premises = id_list_field(entry, &path, "premises", &mut violations);
        let conclusion = string_field(entry, &path, "conclusion", &mut violations);
        note_id(&id, &mut rule_ids, &path, &mut violations);

        if let Some(premises) = &premises {
            check_refs(premises, &atom_ids, &path, "premises", "atom", &mut violations);
        }
        if let Some(conclusion) = &conclusion {
            check_ref(conclusion, &atom_ids, &path, "conclusion", "atom", &mut violations);
        }

        if let (Some(id), Some(kind), Some(premises), Some(conclusion)) =
            (id, kind, premises, conclusion)
        {
            rules.push(Rule {
                id,
                kind,
                premises,
                conclusion,
            });
        }
    }

    // Arguments: atom and rule id spaces are complete here, but
    // sub-arguments may reference forward, so those checks are deferred
    // until the argument id space is complete too.
    let mut argument_ids = IndexSet::new();
    let mut arguments = Vec::new();
    let mut sub_edges: Vec<(String, Option<String>, Vec<String>)> = Vec::new();
    for (path, entry) in collection(root, "arguments", &mut violations) {
        let Some(entry) = as_object(entry, &path, &mut violations) else {
            continue;
        };
        let id = string_field(entry, &path, "id", &mut violations);
        let premises = id_list_field(entry, &path, "premises", &mut violations);
        let applied_rules = id_list_field(entry, &path, "applied_rules", &mut violations);
        let conclusion = string_field(entry, &path, "conclusion", &mut violations);
        let sub_arguments = id_list_field(entry, &path, "sub_arguments", &mut violations);
        note_id(&id, &mut argument_ids, &path, &mut violations);

        if let Some(premises) = &premises {
            check_refs(premises, &atom_ids, &path, "premises", "atom", &mut violations);
        }
        if let Some(applied_rules) = &applied_rules {
            check_refs(
                applied_rules,
                &rule_ids,
                &path,
                "applied_rules",
                "rule",
                &mut violations,
            );
        }
        if let Some(conclusion) = &conclusion {
            check_ref(conclusion, &atom_ids, &path, "conclusion", "atom", &mut violations);
        }
        if let Some(sub_arguments) = &sub_arguments {
            sub_edges.push((path.clone(), id.clone(), sub_arguments.clone()));
        }

        if let (Some(id), Some(premises), Some(applied_rules), Some(conclusion), Some(sub_arguments)) =
            (id, premises, applied_rules, conclusion, sub_arguments)
        {
            arguments.push(Argument {
                id,
                premises,
                applied_rules,
                conclusion,
                sub_arguments,
            });
        }
    }

    // Deferred sub-argument reference checks.
    for (path, _, subs) in &sub_edges {
        check_refs(subs, &argument_ids, path, "sub_arguments", "argument", &mut violations);
    }

    // Attacks: argument id space is complete, check endpoints inline.
    let mut attacks = Vec::new();
    for (path, entry) in collection(root, "attacks", &mut violations) {
        let Some(entry) = as_object(entry, &path, &mut violations) else {
            continue;
        };
        let attacker = endpoint_field(entry, &path, "attacker", "from_arg", &mut violations);
        let target = endpoint_field(entry, &path, "target", "to_arg", &mut violations);
        let kind =
            enum_field(entry, &path, ATTACK_KINDS, &mut violations).map(|s| match s.as_str() {
                "rebut" => AttackKind::Rebut,
                "undercut" => AttackKind::Undercut,
                _ => AttackKind::Undermine,
            });

        if let Some(attacker) = &attacker {
            check_ref(attacker, &argument_ids, &path, "attacker", "argument", &mut violations);
        }
        if let Some(target) = &target {
            check_ref(target, &argument_ids, &path, "target", "argument", &mut violations);
        }

        if let (Some(attacker), Some(target), Some(kind)) = (attacker, target, kind) {
            attacks.push((
                path,
                Attack {
                    attacker,
                    target,
                    kind,
                },
            ));
        }
    }

    // The sub-argument relation must be a DAG. The graph is built from
    // every argument whose id and sub-argument list parsed, so a cycle is
    // reported even when some other field of a participant is bad.
    let graph: IndexMap<&str, &[String]> = sub_edges
        .iter()
        .filter_map(|(_, id, subs)| id.as_deref().map(|id| (id, subs.as_slice())))
        .collect();
    if let Some(cycle) = find_cycle(&graph) {
        violations.push(Violation::Cycle { cycle });
    }

    // Attack legality: reported, not enforced.
    let argument_by_id: IndexMap<&str, &Argument> =
        arguments.iter().map(|a| (a.id.as_str(), a)).collect();
    let rule_by_id: IndexMap<&str, &Rule> = rules.iter().map(|r| (r.id.as_str(), r)).collect();
    let mut warnings = Vec::new();
    for (path, attack) in &attacks {
        if attack.kind != AttackKind::Rebut {
            continue;
        }
        let Some(target) = argument_by_id.get(attack.target.as_str()) else {
            continue;
        };
        let producing = target
            .applied_rules
            .iter()
            .filter_map(|rid| rule_by_id.get(rid.as_str()))
            .find(|rule| rule.conclusion == target.conclusion);
        match producing {
            Some(rule) if rule.kind == RuleKind::Strict => warnings.push(Warning {
                path: path.clone(),
                message: format!(
                    "rebut on `{}` targets conclusion `{}` produced by strict rule `{}`; only defeasible conclusions can be rebutted",
                    target.id, target.conclusion, rule.id
                ),
            }),
            None => warnings.push(Warning {
                path: path.clone(),
                message: format!(
                    "rebut on `{}` targets conclusion `{}` not produced by any rule; undermine attacks premises",
                    target.id, target.conclusion
                ),
            }),
            Some(_) => {}
        }
    }

    if !violations.is_empty() {
        return Err(ExtractionError::SchemaViolation { violations });
    }

    Ok(ValidatedDebate {
        structure: DebateStructure {
            atoms,
            rules,
            arguments,
            attacks: attacks.into_iter().map(|(_, a)| a).collect(),
        },
        warnings,
    })
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

fn collection<'a>(
    root: &'a Obj,
    field: &'static str,
    violations: &mut Vec<Violation>,
) -> Vec<(String, &'a Value)> {
    match root.get(field) {
        None => {
            violations.push(Violation::MissingField {
                path: "$".to_string(),
                field,
            });
            Vec::new()
        }
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| (format!("{}[{}]", field, i), item))
            .collect(),
        Some(_) => {
            violations.push(Violation::WrongType {
                path: format!("$.{}", field),
                expected: "an array",
            });
            Vec::new()
        }
    }
}

fn as_object<'a>(value: &'a Value, path: &str, violations: &mut Vec<Violation>) -> Option<&'a Obj> {
    match value.as_object() {
        Some(obj) => Some(obj),
        None => {
            violations.push(Violation::WrongType {
                path: path.to_string(),
                expected: "an object",
            });
            None
        }
    }
}

fn string_field(
    entry: &Obj,
    path: &str,
    field: &'static str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    match entry.get(field) {
        None => {
            violations.push(Violation::MissingField {
                path: path.to_string(),
                field,
            });
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            violations.push(Violation::Empty {
                path: format!("{}.{}", path, field),
            });
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            violations.push(Violation::WrongType {
                path: format!("{}.{}", path, field),
                expected: "a string",
            });
            None
        }
    }
}

/// String field with a tolerated alternate wire name.
fn endpoint_field(
    entry: &Obj,
    path: &str,
    field: &'static str,
    alias: &'static str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    if entry.contains_key(field) {
        string_field(entry, path, field, violations)
    } else if entry.contains_key(alias) {
        string_field(entry, path, alias, violations)
    } else {
        violations.push(Violation::MissingField {
            path: path.to_string(),
            field,
        });
        None
    }
}

fn enum_field(
    entry: &Obj,
    path: &str,
    allowed: &'static [&'static str],
    violations: &mut Vec<Violation>,
) -> Option<String> {
    let value = string_field(entry, path, "type", violations)?;
    if allowed.contains(&value.as_str()) {
        Some(value)
    } else {
        violations.push(Violation::InvalidEnum {
            path: format!("{}.type", path),
            value,
            allowed,
        });
        None
    }
}

fn id_list_field(
    entry: &Obj,
    path: &str,
    field: &'static str,
    violations: &mut Vec<Violation>,
) -> Option<Vec<String>> {
    match entry.get(field) {
        None => {
            violations.push(Violation::MissingField {
                path: path.to_string(),
                field,
            });
            None
        }
        Some(Value::Array(items)) => {
            let mut ids = Vec::with_capacity(items.len());
            let mut ok = true;
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::String(s) if !s.is_empty() => ids.push(s.clone()),
                    Value::String(_) => {
                        violations.push(Violation::Empty {
                            path: format!("{}.{}[{}]", path, field, i),
                        });
                        ok = false;
                    }
                    _ => {
                        violations.push(Violation::WrongType {
                            path: format!("{}.{}[{}]", path, field, i),
                            expected: "a string id",
                        });
                        ok = false;
                    }
                }
            }
            ok.then_some(ids)
        }
        Some(_) => {
            violations.push(Violation::WrongType {
                path: format!("{}.{}", path, field),
                expected: "an array of ids",
            });
            None
        }
    }
}

fn note_id(
    id: &Option<String>,
    ids: &mut IndexSet<String>,
    path: &str,
    violations: &mut Vec<Violation>,
) {
    if let Some(id) = id {
        if !ids.insert(id.clone()) {
            violations.push(Violation::DuplicateId {
                path: path.to_string(),
                id: id.clone(),
            });
        }
    }
}

fn check_ref(
    id: &str,
    ids: &IndexSet<String>,
    path: &str,
    field: &str,
    entity: &'static str,
    violations: &mut Vec<Violation>,
) {
    if !ids.contains(id) {
        violations.push(Violation::UnknownReference {
            path: format!("{}.{}", path, field),
            id: id.to_string(),
            entity,
        });
    }
}

fn check_refs(
    refs: &[String],
    ids: &IndexSet<String>,
    path: &str,
    field: &str,
    entity: &'static str,
    violations: &mut Vec<Violation>,
) {
    for id in refs {
        check_ref(id, ids, path, field, entity, violations);
    }
}

// ---------------------------------------------------------------------------
// Acyclicity
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    InProgress,
    Done,
}

/// Depth-first search over the sub-argument graph with a three-color
/// marker set (unvisited / in-progress / done). Returns the first cycle
/// found, as the id path from the cycle's entry point back to itself.
fn find_cycle<'a>(graph: &IndexMap<&'a str, &'a [String]>) -> Option<Vec<String>> {
    let mut marks: IndexMap<&'a str, Mark> = IndexMap::new();

    for &id in graph.keys() {
        if !marks.contains_key(id) {
            let mut path = Vec::new();
            if let Some(cycle) = dfs(id, graph, &mut marks, &mut path) {
                return Some(cycle);
            }
        }
    }
    None
}

fn dfs<'a>(
    id: &'a str,
    graph: &IndexMap<&'a str, &'a [String]>,
    marks: &mut IndexMap<&'a str, Mark>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    marks.insert(id, Mark::InProgress);
    path.push(id);

    if let Some(subs) = graph.get(id) {
        for sub in subs.iter() {
            match marks.get(sub.as_str()).copied() {
                Some(Mark::InProgress) => {
                    let start = path.iter().position(|p| *p == sub.as_str()).unwrap_or(0);
                    let mut cycle: Vec<String> =
                        path[start..].iter().map(|p| p.to_string()).collect();
                    cycle.push(sub.clone());
                    return Some(cycle);
                }
                Some(Mark::Done) => {}
                None => {
                    // Dangling sub-argument ids are reported by the
                    // referential pass; skip them here
                    if graph.contains_key(sub.as_str()) {
                        if let Some(cycle) = dfs(sub, graph, marks, path) {
                            return Some(cycle);
                        }
                    }
                }
            }
        }
    }

    path.pop();
    marks.insert(id, Mark::Done);
    None
}
