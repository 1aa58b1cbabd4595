use serde_json::{Value, json};

use conjugaison_core::model::{Challenge, ChallengeDraft, Tense, TenseSelection};

use crate::error::ProviderError;

/// Build the generation prompt. `tense` is the one picked for this round; the full
/// selection is listed so the model knows the learner's scope.
#[must_use]
pub fn build_prompt(selection: &TenseSelection, tense: Tense) -> String {
    format!(
        "Generate a French verb conjugation table.\n\
         \n\
         1. Select a random common verb.\n\
         2. Use the tense \"{tense}\" (the learner practices: [{selection}]).\n\
         3. Generate 6 items for pronouns, in this order: Je (or J'), Tu, Il/Elle/On, Nous, Vous, Ils/Elles.\n\
         \n\
         CRITICAL RULES:\n\
         - 'pronoun': The display label. Use \"J'\" if the verb starts with a vowel or mute h in this tense.\n\
         - 'conjugation': The verb part ONLY. DO NOT include the pronoun in this field.\n\
           - CORRECT: \"suis\", \"ai mangé\", \"me lave\"\n\
           - WRONG: \"Je suis\", \"J'ai mangé\", \"Je me lave\"\n\
         - Include the auxiliary for compound tenses (e.g. \"ai fini\").\n",
        tense = tense.label(),
        selection = selection.joined_labels(),
    )
}

/// JSON schema the model's structured output must follow.
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "verb": { "type": "STRING", "description": "Infinitive" },
            "translation": { "type": "STRING", "description": "English translation" },
            "tense": { "type": "STRING" },
            "mood": { "type": "STRING" },
            "items": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "pronoun": { "type": "STRING", "description": "e.g. Je, Tu, J'" },
                        "conjugation": { "type": "STRING", "description": "Verb only, no pronoun" }
                    },
                    "required": ["pronoun", "conjugation"]
                }
            }
        },
        "required": ["verb", "translation", "tense", "mood", "items"]
    })
}

/// Parse the model's text output into a validated challenge.
///
/// Tolerates a Markdown code fence around the JSON.
///
/// # Errors
///
/// Returns `ProviderError::EmptyResponse` for blank text, `ProviderError::Malformed`
/// for invalid JSON, and `ProviderError::Invalid` when the table breaks the contract.
pub fn parse_challenge(text: &str) -> Result<Challenge, ProviderError> {
    let body = strip_code_fence(text.trim());
    if body.is_empty() {
        return Err(ProviderError::EmptyResponse);
    }
    let draft: ChallengeDraft = serde_json::from_str(body)?;
    Ok(draft.validate()?)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
