//! LLM prompt for argumentation-structure extraction.
//!
//! One fixed instruction document, sent as the system message with the
//! debate text as the user message. The prompt carries the literal output
//! schema, the ASPIC+ definitions, a worked example with a recursive
//! sub-argument, and a pre-output checklist. Completions are unreliable
//! at long-range structural consistency, and the example plus checklist
//! are the main lever this side of the model boundary.

use sha2::{Digest, Sha256};

/// System prompt for extracting an ASPIC+ structure from debate text.
pub const EXTRACT_DEBATE_PROMPT: &str = r#"You extract the formal argumentation structure of a debate text using the ASPIC+ framework.

Read the text the user provides and output ONLY a JSON object with this exact shape, no prose, no markdown fencing, nothing before or after the object:

{
    "atoms": [
        {"id": "a1", "text": "an atomic proposition stated or used in the text"}
    ],
    "rules": [
        {"id": "r1", "type": "strict" | "defeasible", "premises": ["a1"], "conclusion": "a2"}
    ],
    "arguments": [
        {"id": "arg1", "premises": ["a1"], "applied_rules": ["r1"], "conclusion": "a2", "sub_arguments": []}
    ],
    "attacks": [
        {"attacker": "arg2", "target": "arg1", "type": "rebut" | "undercut" | "undermine"}
    ]
}

Definitions:
- An ATOM is a minimal proposition. Split compound statements into their atomic parts.
- A STRICT rule is deductively certain: if its premises hold, the conclusion cannot fail (definitions, mathematics, direct entailment).
- A DEFEASIBLE rule is presumptive: the conclusion normally follows but can be defeated (testimony, perception, generalizations).
- An ARGUMENT applies rules to premises to reach a conclusion. When an argument builds on the conclusion of another argument, list that argument's id in "sub_arguments".
- REBUT: the attacker's conclusion contradicts the target's conclusion. Only conclusions of defeasible rules can be rebutted.
- UNDERCUT: the attacker denies that the target's inference rule applies in this case, without denying its premises or conclusion outright.
- UNDERMINE: the attacker's conclusion contradicts one of the target's premises.

ID convention: number ids sequentially and deterministically in order of first appearance, atoms a1, a2, a3, ...; rules r1, r2, ...; arguments arg1, arg2, ... Never skip or reuse a number.

Worked example.
Input:
John says the car is red, so the car is red. However, John is colorblind. Also, the car registration says it is blue, meaning it cannot be red.

Output:
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

Note how arg4 builds on arg3: the registration argument concludes the car is blue (arg3), and arg4 derives from that conclusion that it cannot be red, so arg3 appears in arg4's "sub_arguments". The colorblindness argument undercuts r1's inference (John's testimony is unreliable) rather than asserting the car is not red, while the registration argument rebuts the conclusion itself.

Before you output, check:
1. Every "conclusion" and every entry of every "premises" list names an existing atom id.
2. Every entry of "applied_rules" names an existing rule id.
3. Every entry of "sub_arguments" names an existing argument id, and no argument lists itself directly or through other arguments.
4. Every attack's "attacker" and "target" name existing argument ids, and the attack "type" matches what is being attacked: a conclusion (rebut, defeasible only), an inference (undercut), or a premise (undermine).
5. The output is a single JSON object and nothing else."#;

/// Fingerprint of the extraction prompt, for cache invalidation.
pub fn extract_prompt_hash() -> String {
    let mut hasher = Sha256::new();
    hasher.update(EXTRACT_DEBATE_PROMPT.as_bytes());
    format!("{:x}", hasher.finalize())
}
