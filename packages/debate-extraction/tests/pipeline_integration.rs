//! End-to-end pipeline tests driving the extractor through a mock backend.

use debate_extraction::{
    recover, validate, ExtractionConfig, ExtractionError, Extractor, MockAI, RuleKind, Violation,
};

/// The debate from the prompt's worked example.
const CAR_DEBATE: &str = "John says the car is red, so the car is red. However, John is colorblind. Also, the car registration says it is blue, meaning it cannot be red.";

/// A completion for [`CAR_DEBATE`], decorated the way chatty models
/// decorate output despite instructions.
const CAR_COMPLETION: &str = r#"Here is the extracted structure:
```json
{
    "atoms": [
        {"id": "a1", "text": "John says the car is red"},
        {"id": "a2", "text": "the car is red"},
        {"id": "a3", "text": "John is colorblind"},
        {"id": "a4", "text": "the car registration says it is blue"},
        {"id": "a5", "text": "the car is blue"},
        {"id": "a6", "text": "the car cannot be red"}
    ],
    "rules": [
        {"id": "r1", "type": "defeasible", "premises": ["a1"], "conclusion": "a2"},
        {"id": "r2", "type": "strict", "premises": ["a4"], "conclusion": "a5"},
        {"id": "r3", "type": "strict", "premises": ["a5"], "conclusion": "a6"}
    ],
    "arguments": [
        {"id": "arg1", "premises": ["a1"], "applied_rules": ["r1"], "conclusion": "a2", "sub_arguments": []},
        {"id": "arg2", "premises": ["a3"], "applied_rules": [], "conclusion": "a3", "sub_arguments": []},
        {"id": "arg3", "premises": ["a4"], "applied_rules": ["r2"], "conclusion": "a5", "sub_arguments": []},
        {"id": "arg4", "premises": [], "applied_rules": ["r3"], "conclusion": "a6", "sub_arguments": ["arg3"]}
    ],
    "attacks": [
        {"attacker": "arg2", "target": "arg1", "type": "undercut"},
        {"attacker": "arg4", "target": "arg1", "type": "rebut"}
    ]
}
```"#;

#[tokio::test]
async fn test_car_debate_end_to_end() {
    let ai = MockAI::new().with_completion(CAR_COMPLETION);
    let extractor = Extractor::new(ai);

    let result = extractor.extract(CAR_DEBATE).await.unwrap();
    let structure = &result.structure;

    // Atoms a1..a6 in order
    let ids: Vec<&str> = structure.atoms.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, ["a1", "a2", "a3", "a4", "a5", "a6"]);

    // r1: defeasible, a1 -> a2
    let r1 = structure.rule("r1").unwrap();
    assert_eq!(r1.kind, RuleKind::Defeasible);
    assert_eq!(r1.premises, ["a1"]);
    assert_eq!(r1.conclusion, "a2");

    // The colorblindness argument undercuts the "car is red" argument
    let undercut = structure
        .attacks
        .iter()
        .find(|a| a.kind == debate_extraction::AttackKind::Undercut)
        .unwrap();
    assert_eq!(undercut.attacker, "arg2");
    assert_eq!(undercut.target, "arg1");
    assert_eq!(structure.argument("arg2").unwrap().premises, ["a3"]);

    // The strict-derived "cannot be red" argument rebuts the same target
    let rebut = structure
        .attacks
        .iter()
        .find(|a| a.kind == debate_extraction::AttackKind::Rebut)
        .unwrap();
    assert_eq!(rebut.attacker, "arg4");
    assert_eq!(rebut.target, "arg1");

    // arg4 builds on arg3 recursively
    assert_eq!(structure.argument("arg4").unwrap().sub_arguments, ["arg3"]);

    // Target's conclusion comes from a defeasible rule, so no warnings
    assert!(result.warnings.is_empty());
}

#[tokio::test]
async fn test_fenced_empty_completion_recovers() {
    let raw = "Sure! Here is the JSON:\n```json\n{\"atoms\":[],\"rules\":[],\"arguments\":[],\"attacks\":[]}\n```\nLet me know if you need changes.";

    let ai = MockAI::new().with_completion(raw);
    let extractor = Extractor::new(ai);

    let result = extractor.extract("nothing argumentative").await.unwrap();
    assert!(result.structure.is_empty());
    assert!(result.warnings.is_empty());
}

#[tokio::test]
async fn test_self_referential_argument_fails() {
    let completion = r#"{
        "atoms": [{"id": "a1", "text": "p"}],
        "rules": [],
        "arguments": [
            {"id": "arg1", "premises": ["a1"], "applied_rules": [], "conclusion": "a1", "sub_arguments": []},
            {"id": "arg2", "premises": ["a1"], "applied_rules": [], "conclusion": "a1", "sub_arguments": ["arg2"]}
        ],
        "attacks": []
    }"#;

    let ai = MockAI::new().with_completion(completion);
    let extractor = Extractor::new(ai);

    let err = extractor.extract("text").await.unwrap_err();
    match err {
        ExtractionError::SchemaViolation { violations } => {
            assert!(violations.iter().any(
                |v| matches!(v, Violation::Cycle { cycle } if cycle.contains(&"arg2".to_string()))
            ));
        }
        other => panic!("expected SchemaViolation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_atom_key_drift_repaired_then_validated() {
    // Alternate id key, and one atom with no display text
    let completion = r#"{
        "atoms": [
            {"atom_id": "a1", "text": "the car is red"},
            {"atom_id": "a2"}
        ],
        "rules": [],
        "arguments": [],
        "attacks": []
    }"#;

    let ai = MockAI::new().with_completion(completion);
    let extractor = Extractor::new(ai);

    let result = extractor.extract("text").await.unwrap();
    assert_eq!(result.structure.atoms[0].id, "a1");
    assert_eq!(result.structure.atoms[1].id, "a2");
    // Degraded fallback: missing text defaults to the atom's own id
    assert_eq!(result.structure.atoms[1].text, "a2");
}

#[tokio::test]
async fn test_key_drift_repair_does_not_mask_real_violations() {
    // The alternate key carries a non-string id: repaired in place but
    // still invalid, so validation must reject it
    let completion = r#"{
        "atoms": [{"atom_id": 7, "text": "the car is red"}],
        "rules": [],
        "arguments": [],
        "attacks": []
    }"#;

    let ai = MockAI::new().with_completion(completion);
    let extractor = Extractor::new(ai);

    let err = extractor.extract("text").await.unwrap_err();
    match err {
        ExtractionError::SchemaViolation { violations } => {
            assert!(violations
                .iter()
                .any(|v| matches!(v, Violation::WrongType { path, .. } if path == "atoms[0].id")));
        }
        other => panic!("expected SchemaViolation, got {:?}", other),
    }
}

#[tokio::test]
async fn test_no_structure_in_completion() {
    let ai = MockAI::new().with_completion("The text contains no arguments at all.");
    let extractor = Extractor::new(ai);

    let err = extractor.extract("text").await.unwrap_err();
    assert!(matches!(err, ExtractionError::NoStructureFound));
}

#[test]
fn test_recovery_idempotent_for_decorated_output() {
    let bare = r#"{"atoms":[],"rules":[],"arguments":[],"attacks":[]}"#;
    let decorated = format!("Of course! Result follows.\n{}\nAnything else?", bare);

    assert_eq!(recover(bare).unwrap(), recover(&decorated).unwrap());
}

#[test]
fn test_round_trip_preserves_structure() {
    let completion = r#"{
        "atoms": [{"id": "a1", "text": "p"}, {"id": "a2", "text": "q"}],
        "rules": [{"id": "r1", "type": "defeasible", "premises": ["a1"], "conclusion": "a2"}],
        "arguments": [
            {"id": "arg1", "premises": ["a1"], "applied_rules": ["r1"], "conclusion": "a2", "sub_arguments": []}
        ],
        "attacks": []
    }"#;

    let first = validate(&recover(completion).unwrap()).unwrap();
    let serialized = serde_json::to_string(&first.structure).unwrap();
    let second = validate(&recover(&serialized).unwrap()).unwrap();

    assert_eq!(first.structure, second.structure);
}

#[tokio::test]
async fn test_structured_and_plain_modes_agree() {
    let structured = Extractor::new(MockAI::new());
    let plain = Extractor::with_config(
        MockAI::new(),
        ExtractionConfig::new().with_structured(false),
    );

    let a = structured.extract("text").await.unwrap();
    let b = plain.extract("text").await.unwrap();
    assert_eq!(a.structure, b.structure);
}
