//! ASPIC+ argumentation-framework types.
//!
//! These are the wire types the model is asked to produce: atomic
//! propositions, strict/defeasible inference rules, tree-structured
//! arguments, and the attack relation between arguments. References
//! between entities are flat string ids (`a1`, `r1`, `arg1`), never
//! nested structures, so a malformed completion can at worst produce a
//! dangling id, not a pointer cycle.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An atomic proposition extracted from the debate text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Atom {
    /// Unique id, by convention `a1`, `a2`, ...
    pub id: String,

    /// The proposition in natural language
    pub text: String,
}

/// Inference rule strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Deductively certain: the conclusion cannot be attacked on the inference
    Strict,

    /// Presumptive: holds by default but can be rebutted or undercut
    Defeasible,
}

/// An inference link from premises to a conclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Rule {
    /// Unique id, by convention `r1`, `r2`, ...
    pub id: String,

    /// Rule strength
    #[serde(rename = "type")]
    pub kind: RuleKind,

    /// Atom ids this rule reasons from (may be empty)
    pub premises: Vec<String>,

    /// Atom id this rule concludes
    pub conclusion: String,
}

/// A justification tree node.
///
/// `sub_arguments` lists the arguments whose conclusions feed this one as
/// premises; the relation over all arguments must stay acyclic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Argument {
    /// Unique id, by convention `arg1`, `arg2`, ...
    pub id: String,

    /// Atom ids used directly as premises
    pub premises: Vec<String>,

    /// Rule ids applied in this argument
    pub applied_rules: Vec<String>,

    /// Atom id this argument concludes
    pub conclusion: String,

    /// Argument ids whose conclusions feed this argument
    pub sub_arguments: Vec<String>,
}

/// Attack type between two arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AttackKind {
    /// Conclusion-vs-conclusion; only defeasible conclusions can be rebutted
    Rebut,

    /// Attacks the inference link itself
    Undercut,

    /// Attacks a premise of the target
    Undermine,
}

/// A defeat relation between two arguments.
///
/// Canonical wire names are `attacker`/`target`; the `from_arg`/`to_arg`
/// variants some completions use are accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Attack {
    /// Attacking argument id
    #[serde(alias = "from_arg")]
    pub attacker: String,

    /// Attacked argument id
    #[serde(alias = "to_arg")]
    pub target: String,

    /// Attack type
    #[serde(rename = "type")]
    pub kind: AttackKind,
}

/// The aggregate root: everything extracted from one input text.
///
/// Constructed once from a single validated extraction and treated as an
/// immutable value afterwards. Empty collections are a valid result -
/// a text with no argumentative structure is not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DebateStructure {
    /// Atomic propositions
    pub atoms: Vec<Atom>,

    /// Inference rules
    pub rules: Vec<Rule>,

    /// Arguments built from atoms and rules
    pub arguments: Vec<Argument>,

    /// Attack relation between arguments
    pub attacks: Vec<Attack>,
}

impl DebateStructure {
    /// Look up an atom by id.
    pub fn atom(&self, id: &str) -> Option<&Atom> {
        self.atoms.iter().find(|a| a.id == id)
    }

    /// Look up a rule by id.
    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Look up an argument by id.
    pub fn argument(&self, id: &str) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.id == id)
    }

    /// Whether nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
            && self.rules.is_empty()
            && self.arguments.is_empty()
            && self.attacks.is_empty()
    }

    /// JSON schema for backend-enforced structured decoding.
    ///
    /// Grammar-constrained decoders handle `$ref` indirection poorly, so
    /// the schemars output is flattened: references inlined, the
    /// `definitions`/`$schema` bookkeeping keys dropped.
    pub fn output_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(DebateStructure);
        let mut value = serde_json::to_value(schema).unwrap_or_default();

        let definitions = value.get("definitions").cloned();
        if let Some(defs) = definitions {
            inline_refs(&mut value, &defs);
        }

        if let serde_json::Value::Object(map) = &mut value {
            map.remove("definitions");
            map.remove("$schema");
        }

        value
    }
}

fn inline_refs(value: &mut serde_json::Value, definitions: &serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(ref_path)) = map.get("$ref").cloned() {
                if let Some(name) = ref_path.strip_prefix("#/definitions/") {
                    if let Some(def) = definitions.get(name) {
                        *value = def.clone();
                        inline_refs(value, definitions);
                        return;
                    }
                }
            }
            for (_, v) in map.iter_mut() {
                inline_refs(v, definitions);
            }
        }
        serde_json::Value::Array(arr) => {
            for item in arr.iter_mut() {
                inline_refs(item, definitions);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_kind_wire_names() {
        let rule: Rule = serde_json::from_value(serde_json::json!({
            "id": "r1",
            "type": "defeasible",
            "premises": ["a1"],
            "conclusion": "a2"
        }))
        .unwrap();
        assert_eq!(rule.kind, RuleKind::Defeasible);

        let back = serde_json::to_value(&rule).unwrap();
        assert_eq!(back["type"], "defeasible");
    }

    #[test]
    fn test_attack_accepts_aliased_endpoints() {
        let attack: Attack = serde_json::from_value(serde_json::json!({
            "from_arg": "arg2",
            "to_arg": "arg1",
            "type": "undercut"
        }))
        .unwrap();
        assert_eq!(attack.attacker, "arg2");
        assert_eq!(attack.target, "arg1");

        // Canonical names on output
        let back = serde_json::to_value(&attack).unwrap();
        assert_eq!(back["attacker"], "arg2");
        assert_eq!(back["target"], "arg1");
        assert!(back.get("from_arg").is_none());
    }

    #[test]
    fn test_empty_structure_is_valid_and_empty() {
        let parsed: DebateStructure = serde_json::from_str(
            r#"{"atoms":[],"rules":[],"arguments":[],"attacks":[]}"#,
        )
        .unwrap();
        assert!(parsed.is_empty());
        assert_eq!(parsed, DebateStructure::default());
    }

    #[test]
    fn test_lookups() {
        let structure = DebateStructure {
            atoms: vec![Atom {
                id: "a1".into(),
                text: "the car is red".into(),
            }],
            rules: vec![],
            arguments: vec![],
            attacks: vec![],
        };
        assert_eq!(structure.atom("a1").unwrap().text, "the car is red");
        assert!(structure.atom("a2").is_none());
        assert!(structure.rule("r1").is_none());
    }

    #[test]
    fn test_output_schema_is_flat() {
        let schema = DebateStructure::output_schema();
        let text = serde_json::to_string(&schema).unwrap();

        assert!(!text.contains("$ref"), "schema: {}", text);
        assert!(schema.get("definitions").is_none());
        assert!(schema.get("$schema").is_none());

        // All four collections present with inlined item schemas
        for field in ["atoms", "rules", "arguments", "attacks"] {
            let items = &schema["properties"][field]["items"];
            assert!(items.get("properties").is_some(), "field: {}", field);
        }
    }

    #[test]
    fn test_enum_values_in_schema() {
        let schema = DebateStructure::output_schema();
        let text = serde_json::to_string(&schema).unwrap();
        for value in ["strict", "defeasible", "rebut", "undercut", "undermine"] {
            assert!(text.contains(value), "missing enum value {}", value);
        }
    }
}
