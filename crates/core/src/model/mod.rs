mod challenge;
mod round;
mod tense;

pub use challenge::{
    Challenge, ChallengeDraft, ChallengeError, ConjugationItem, ConjugationItemDraft, PronounSlot,
};
pub use round::{AnswerRow, Round, RoundError, Verdict, answer_matches};
pub use tense::{ParseTenseError, Tense, TenseSelection, TenseSelectionError};
