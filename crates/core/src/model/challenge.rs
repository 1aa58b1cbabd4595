use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

/// Reasons a generated conjugation table is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ChallengeError {
    #[error("challenge field `{field}` cannot be empty")]
    EmptyField { field: &'static str },

    #[error("expected {expected} conjugation items, got {actual}")]
    ItemCount { expected: usize, actual: usize },

    #[error("item {index} has an empty {field}")]
    EmptyItem { index: usize, field: &'static str },

    #[error("item {index} pronoun `{pronoun}` does not match the {slot} slot")]
    PronounOrder {
        index: usize,
        pronoun: String,
        slot: PronounSlot,
    },

    #[error("item {index} answer `{answer}` repeats its pronoun")]
    PronounInAnswer { index: usize, answer: String },
}

//
// ─── PRONOUN SLOT ─────────────────────────────────────────────────────────────
//

/// One of the six rows of a conjugation table, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PronounSlot {
    FirstSingular,
    SecondSingular,
    ThirdSingular,
    FirstPlural,
    SecondPlural,
    ThirdPlural,
}

impl PronounSlot {
    pub const ALL: [PronounSlot; 6] = [
        PronounSlot::FirstSingular,
        PronounSlot::SecondSingular,
        PronounSlot::ThirdSingular,
        PronounSlot::FirstPlural,
        PronounSlot::SecondPlural,
        PronounSlot::ThirdPlural,
    ];

    /// Label used when nothing more specific (like `J'`) applies.
    #[must_use]
    pub fn default_label(self) -> &'static str {
        match self {
            PronounSlot::FirstSingular => "Je",
            PronounSlot::SecondSingular => "Tu",
            PronounSlot::ThirdSingular => "Il/Elle/On",
            PronounSlot::FirstPlural => "Nous",
            PronounSlot::SecondPlural => "Vous",
            PronounSlot::ThirdPlural => "Ils/Elles",
        }
    }

    fn pronouns(self) -> &'static [&'static str] {
        match self {
            PronounSlot::FirstSingular => &["je", "j'"],
            PronounSlot::SecondSingular => &["tu"],
            PronounSlot::ThirdSingular => &["il", "elle", "on"],
            PronounSlot::FirstPlural => &["nous"],
            PronounSlot::SecondPlural => &["vous"],
            PronounSlot::ThirdPlural => &["ils", "elles"],
        }
    }

    /// Whether a generated label such as `"J'"`, `"Il/Elle"` or `"que tu"` fits this slot.
    #[must_use]
    pub fn accepts(self, label: &str) -> bool {
        let normalized = normalize_label(label);
        let pronouns = self.pronouns();
        let mut alternatives = strip_que(&normalized).split('/').map(str::trim);
        alternatives.any(|alt| pronouns.contains(&alt))
    }
}

impl std::fmt::Display for PronounSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PronounSlot::FirstSingular => "first singular",
            PronounSlot::SecondSingular => "second singular",
            PronounSlot::ThirdSingular => "third singular",
            PronounSlot::FirstPlural => "first plural",
            PronounSlot::SecondPlural => "second plural",
            PronounSlot::ThirdPlural => "third plural",
        };
        f.write_str(name)
    }
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase().replace('\u{2019}', "'")
}

fn strip_que(label: &str) -> &str {
    label
        .strip_prefix("que ")
        .or_else(|| label.strip_prefix("qu'"))
        .unwrap_or(label)
        .trim_start()
}

//
// ─── ITEMS ────────────────────────────────────────────────────────────────────
//

/// A single pronoun row and the answer the learner must type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConjugationItem {
    slot: PronounSlot,
    pronoun: String,
    expected_answer: String,
}

impl ConjugationItem {
    #[must_use]
    pub fn slot(&self) -> PronounSlot {
        self.slot
    }

    #[must_use]
    pub fn pronoun(&self) -> &str {
        &self.pronoun
    }

    #[must_use]
    pub fn expected_answer(&self) -> &str {
        &self.expected_answer
    }
}

/// Unvalidated item as produced by a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConjugationItemDraft {
    pub pronoun: String,
    #[serde(rename = "conjugation", alias = "expectedAnswer")]
    pub expected_answer: String,
}

impl ConjugationItemDraft {
    #[must_use]
    pub fn new(pronoun: impl Into<String>, expected_answer: impl Into<String>) -> Self {
        Self {
            pronoun: pronoun.into(),
            expected_answer: expected_answer.into(),
        }
    }
}

//
// ─── CHALLENGE ────────────────────────────────────────────────────────────────
//

/// A validated conjugation table for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    verb: String,
    translation: String,
    tense: String,
    mood: String,
    items: Vec<ConjugationItem>,
}

impl Challenge {
    /// Number of rows every challenge carries.
    pub const ITEM_COUNT: usize = PronounSlot::ALL.len();

    /// The canned Avoir table served when generation fails.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError` only if the constant table is edited into an invalid one.
    pub fn fallback() -> Result<Self, ChallengeError> {
        ChallengeDraft::fallback().validate()
    }

    #[must_use]
    pub fn verb(&self) -> &str {
        &self.verb
    }

    #[must_use]
    pub fn translation(&self) -> &str {
        &self.translation
    }

    #[must_use]
    pub fn tense(&self) -> &str {
        &self.tense
    }

    #[must_use]
    pub fn mood(&self) -> &str {
        &self.mood
    }

    #[must_use]
    pub fn items(&self) -> &[ConjugationItem] {
        &self.items
    }
}

/// Unvalidated challenge, shaped like the generator's JSON response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeDraft {
    pub verb: String,
    pub translation: String,
    pub tense: String,
    pub mood: String,
    pub items: Vec<ConjugationItemDraft>,
}

impl ChallengeDraft {
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            verb: "Avoir".into(),
            translation: "to have".into(),
            tense: "Présent".into(),
            mood: "Indicatif".into(),
            items: vec![
                ConjugationItemDraft::new("J'", "ai"),
                ConjugationItemDraft::new("Tu", "as"),
                ConjugationItemDraft::new("Il/Elle/On", "a"),
                ConjugationItemDraft::new("Nous", "avons"),
                ConjugationItemDraft::new("Vous", "avez"),
                ConjugationItemDraft::new("Ils/Elles", "ont"),
            ],
        }
    }

    /// Trim and check the draft against the table contract.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeError` when a header field is blank, the table does not have
    /// exactly six rows in canonical pronoun order, or an answer repeats its pronoun.
    pub fn validate(self) -> Result<Challenge, ChallengeError> {
        let verb = required(self.verb, "verb")?;
        let translation = required(self.translation, "translation")?;
        let tense = required(self.tense, "tense")?;
        let mood = required(self.mood, "mood")?;

        if self.items.len() != Challenge::ITEM_COUNT {
            return Err(ChallengeError::ItemCount {
                expected: Challenge::ITEM_COUNT,
                actual: self.items.len(),
            });
        }

        let items = self
            .items
            .into_iter()
            .zip(PronounSlot::ALL)
            .enumerate()
            .map(|(index, (draft, slot))| validate_item(index, slot, draft))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Challenge {
            verb,
            translation,
            tense,
            mood,
            items,
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, ChallengeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ChallengeError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

fn validate_item(
    index: usize,
    slot: PronounSlot,
    draft: ConjugationItemDraft,
) -> Result<ConjugationItem, ChallengeError> {
    let pronoun = draft.pronoun.trim().to_string();
    if pronoun.is_empty() {
        return Err(ChallengeError::EmptyItem {
            index,
            field: "pronoun",
        });
    }
    let expected_answer = draft.expected_answer.trim().to_string();
    if expected_answer.is_empty() {
        return Err(ChallengeError::EmptyItem {
            index,
            field: "answer",
        });
    }
    if !slot.accepts(&pronoun) {
        return Err(ChallengeError::PronounOrder {
            index,
            pronoun,
            slot,
        });
    }
    if repeats_pronoun(slot, &pronoun, &expected_answer) {
        return Err(ChallengeError::PronounInAnswer {
            index,
            answer: expected_answer,
        });
    }
    Ok(ConjugationItem {
        slot,
        pronoun,
        expected_answer,
    })
}

// "nous" and "vous" double as reflexive pronouns ("nous lavons"), so for those
// only a capitalized leading pronoun counts. Every other pronoun is matched
// case-insensitively.
fn repeats_pronoun(slot: PronounSlot, pronoun: &str, answer: &str) -> bool {
    let answer = answer.replace('\u{2019}', "'");
    let folded = answer.to_lowercase();
    let label = normalize_label(pronoun);
    let mut candidates: Vec<&str> = label
        .split('/')
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .collect();
    candidates.extend(slot.pronouns().iter().copied());

    let mut leading = candidates.into_iter();
    leading.any(|alt| match alt {
        "nous" | "vous" => starts_with_word(&answer, &capitalize(alt)),
        _ if alt.ends_with('\'') => folded.starts_with(alt),
        _ => starts_with_word(&folded, alt),
    })
}

fn starts_with_word(text: &str, word: &str) -> bool {
    text.strip_prefix(word)
        .is_some_and(|rest| rest.starts_with(char::is_whitespace))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
