use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TenseSelectionError {
    #[error("at least one tense must stay selected")]
    WouldBeEmpty,
}

/// Error type for parsing a `Tense` from its label.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown tense: {raw}")]
pub struct ParseTenseError {
    raw: String,
}

//
// ─── TENSE ────────────────────────────────────────────────────────────────────
//

/// Grammatical tense the learner can practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tense {
    Present,
    Imparfait,
    PasseCompose,
    FuturSimple,
    ConditionnelPresent,
    SubjonctifPresent,
}

impl Tense {
    /// Every tense, in the order the settings panel lists them.
    pub const ALL: [Tense; 6] = [
        Tense::Present,
        Tense::PasseCompose,
        Tense::Imparfait,
        Tense::FuturSimple,
        Tense::ConditionnelPresent,
        Tense::SubjonctifPresent,
    ];

    /// French display label, also used verbatim in generation prompts.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Tense::Present => "Présent",
            Tense::Imparfait => "Imparfait",
            Tense::PasseCompose => "Passé Composé",
            Tense::FuturSimple => "Futur Simple",
            Tense::ConditionnelPresent => "Conditionnel Présent",
            Tense::SubjonctifPresent => "Subjonctif Présent",
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tense {
    type Err = ParseTenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Tense::ALL
            .into_iter()
            .find(|tense| tense.label().to_lowercase() == wanted)
            .ok_or_else(|| ParseTenseError { raw: s.to_string() })
    }
}

//
// ─── SELECTION ────────────────────────────────────────────────────────────────
//

/// Non-empty set of tenses chosen as the practice filter.
///
/// Insertion order is kept so prompts list tenses the way the learner picked them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenseSelection(Vec<Tense>);

impl TenseSelection {
    /// Build a selection from the given tenses, dropping duplicates.
    ///
    /// # Errors
    ///
    /// Returns `TenseSelectionError::WouldBeEmpty` if no tense is given.
    pub fn new(tenses: impl IntoIterator<Item = Tense>) -> Result<Self, TenseSelectionError> {
        let mut selected = Vec::new();
        for tense in tenses {
            if !selected.contains(&tense) {
                selected.push(tense);
            }
        }
        if selected.is_empty() {
            return Err(TenseSelectionError::WouldBeEmpty);
        }
        Ok(Self(selected))
    }

    #[must_use]
    pub fn single(tense: Tense) -> Self {
        Self(vec![tense])
    }

    #[must_use]
    pub fn contains(&self, tense: Tense) -> bool {
        self.0.contains(&tense)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Tense] {
        &self.0
    }

    /// Add the tense when absent, remove it when present.
    ///
    /// Returns whether the tense is selected afterwards.
    ///
    /// # Errors
    ///
    /// Returns `TenseSelectionError::WouldBeEmpty` when removing the last tense;
    /// the selection is left unchanged.
    pub fn toggle(&mut self, tense: Tense) -> Result<bool, TenseSelectionError> {
        match self.0.iter().position(|t| *t == tense) {
            Some(_) if self.0.len() == 1 => Err(TenseSelectionError::WouldBeEmpty),
            Some(index) => {
                self.0.remove(index);
                Ok(false)
            }
            None => {
                self.0.push(tense);
                Ok(true)
            }
        }
    }

    /// Labels joined for display and prompts, e.g. `"Présent, Imparfait"`.
    #[must_use]
    pub fn joined_labels(&self) -> String {
        self.0
            .iter()
            .map(|tense| tense.label())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for TenseSelection {
    fn default() -> Self {
        Self::single(Tense::Present)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
