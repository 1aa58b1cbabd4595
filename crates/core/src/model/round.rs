use thiserror::Error;

use crate::model::challenge::{Challenge, ConjugationItem};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundError {
    #[error("answer index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("round has already been graded")]
    AlreadyGraded,
}

/// Compare a learner's answer with the generated one.
///
/// Only the learner's side is trimmed; both sides are case-folded.
#[must_use]
pub fn answer_matches(given: &str, expected: &str) -> bool {
    given.trim().to_lowercase() == expected.to_lowercase()
}

/// Grading result for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub correct: bool,
    pub expected: String,
}

/// One row of the table as the learner sees it: item plus current answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRow<'a> {
    pub item: &'a ConjugationItem,
    pub answer: &'a str,
    pub verdict: Option<&'a Verdict>,
}

/// A challenge together with the learner's answers.
///
/// Answers are sized to the challenge when the round starts and can never drift from it.
/// Once graded the round is frozen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    challenge: Challenge,
    answers: Vec<String>,
    verdicts: Option<Vec<Verdict>>,
}

impl Round {
    #[must_use]
    pub fn new(challenge: Challenge) -> Self {
        let answers = vec![String::new(); challenge.items().len()];
        Self {
            challenge,
            answers,
            verdicts: None,
        }
    }

    #[must_use]
    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    #[must_use]
    pub fn verdicts(&self) -> Option<&[Verdict]> {
        self.verdicts.as_deref()
    }

    #[must_use]
    pub fn is_graded(&self) -> bool {
        self.verdicts.is_some()
    }

    pub fn rows(&self) -> impl Iterator<Item = AnswerRow<'_>> {
        self.challenge
            .items()
            .iter()
            .zip(&self.answers)
            .enumerate()
            .map(|(index, (item, answer))| AnswerRow {
                item,
                answer,
                verdict: self.verdicts.as_ref().and_then(|v| v.get(index)),
            })
    }

    /// Replace the answer at `index`.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::AlreadyGraded` after grading and
    /// `RoundError::IndexOutOfRange` for an unknown row.
    pub fn set_answer(&mut self, index: usize, text: impl Into<String>) -> Result<(), RoundError> {
        let slot = self.answer_mut(index)?;
        *slot = text.into();
        Ok(())
    }

    /// Append text to the answer at `index`.
    ///
    /// # Errors
    ///
    /// Same as [`Round::set_answer`].
    pub fn append_to_answer(&mut self, index: usize, text: &str) -> Result<(), RoundError> {
        self.answer_mut(index)?.push_str(text);
        Ok(())
    }

    fn answer_mut(&mut self, index: usize) -> Result<&mut String, RoundError> {
        if self.is_graded() {
            return Err(RoundError::AlreadyGraded);
        }
        let len = self.answers.len();
        self.answers
            .get_mut(index)
            .ok_or(RoundError::IndexOutOfRange { index, len })
    }

    /// Grade every row and freeze the round.
    ///
    /// Returns whether all rows are correct.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::AlreadyGraded` if the round was graded before.
    pub fn grade(&mut self) -> Result<bool, RoundError> {
        if self.is_graded() {
            return Err(RoundError::AlreadyGraded);
        }
        let verdicts: Vec<Verdict> = self
            .challenge
            .items()
            .iter()
            .zip(&self.answers)
            .map(|(item, answer)| Verdict {
                correct: answer_matches(answer, item.expected_answer()),
                expected: item.expected_answer().to_string(),
            })
            .collect();
        let all_correct = verdicts.iter().all(|verdict| verdict.correct);
        self.verdicts = Some(verdicts);
        Ok(all_correct)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn avoir_round() -> Round {
        Round::new(Challenge::fallback().unwrap())
    }

    fn fill(round: &mut Round, answers: &[&str]) {
        for (index, answer) in answers.iter().enumerate() {
            round.set_answer(index, *answer).unwrap();
        }
    }

    #[test]
    fn matching_ignores_case_and_learner_whitespace() {
        assert!(answer_matches("Suis ", "suis"));
        assert!(answer_matches("suis", "suis"));
        assert!(answer_matches("SUIS", "suis"));
        assert!(answer_matches("  ÊTES", "êtes"));
        assert!(!answer_matches("etes", "êtes"));
        assert!(!answer_matches("suis", " suis"));
    }

    #[test]
    fn new_round_has_one_blank_answer_per_item() {
        let round = avoir_round();
        assert_eq!(round.len(), round.challenge().items().len());
        assert!(round.answers().iter().all(String::is_empty));
        assert!(round.verdicts().is_none());
    }

    #[test]
    fn set_answer_touches_only_that_index() {
        let mut round = avoir_round();
        round.set_answer(2, "a").unwrap();
        assert_eq!(round.answers()[2], "a");
        assert_eq!(
            round.answers().iter().filter(|a| !a.is_empty()).count(),
            1
        );
    }

    #[test]
    fn set_answer_rejects_unknown_index() {
        let mut round = avoir_round();
        let err = round.set_answer(6, "x").unwrap_err();
        assert_eq!(err, RoundError::IndexOutOfRange { index: 6, len: 6 });
    }

    #[test]
    fn all_correct_round_grades_true() {
        let mut round = avoir_round();
        fill(&mut round, &["ai", "as", "a", "avons", "avez", "ont"]);
        assert!(round.grade().unwrap());
        assert!(round.verdicts().unwrap().iter().all(|v| v.correct));
    }

    #[test]
    fn wrong_row_is_flagged_with_expected_answer() {
        let mut round = avoir_round();
        fill(&mut round, &["ai", "a", "a", "avons", "avez", "ont"]);
        assert!(!round.grade().unwrap());
        let verdicts = round.verdicts().unwrap();
        assert!(!verdicts[1].correct);
        assert_eq!(verdicts[1].expected, "as");
        assert_eq!(verdicts.iter().filter(|v| !v.correct).count(), 1);
    }

    #[test]
    fn graded_round_is_frozen() {
        let mut round = avoir_round();
        round.grade().unwrap();
        assert_eq!(round.set_answer(0, "ai").unwrap_err(), RoundError::AlreadyGraded);
        assert_eq!(round.grade().unwrap_err(), RoundError::AlreadyGraded);
    }

    #[test]
    fn rows_pair_items_with_answers() {
        let mut round = avoir_round();
        round.set_answer(0, "ai").unwrap();
        let first = round.rows().next().unwrap();
        assert_eq!(first.item.pronoun(), "J'");
        assert_eq!(first.answer, "ai");
        assert!(first.verdict.is_none());
    }
}
