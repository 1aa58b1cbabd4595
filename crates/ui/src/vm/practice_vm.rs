use conjugaison_core::model::{AnswerRow, Challenge, Tense, TenseSelection};
use services::{SessionController, SessionPhase};

use crate::views::ViewError;

/// How a single answer field should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowState {
    Editable,
    Correct,
    Wrong,
}

impl RowState {
    #[must_use]
    pub fn input_class(self) -> &'static str {
        match self {
            RowState::Editable => "answer-input",
            RowState::Correct => "answer-input answer-input--correct",
            RowState::Wrong => "answer-input answer-input--wrong",
        }
    }

    #[must_use]
    pub fn is_locked(self) -> bool {
        !matches!(self, RowState::Editable)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerRowVm {
    pub index: usize,
    pub input_id: String,
    pub pronoun: String,
    pub answer: String,
    pub state: RowState,
    /// Expected conjugation, shown only under a wrong answer.
    pub correction: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeCardVm {
    pub badge: String,
    pub verb: String,
    pub translation: String,
    pub rows: Vec<AnswerRowVm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PracticeBodyVm {
    Loading,
    Active(ChallengeCardVm),
    Reviewed(ChallengeCardVm),
    Error(ViewError),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PracticeVm {
    pub streak_label: String,
    pub body: PracticeBodyVm,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TenseToggleVm {
    pub tense: Tense,
    pub label: &'static str,
    pub selected: bool,
}

/// DOM id of the answer field at `index`.
#[must_use]
pub fn answer_input_id(index: usize) -> String {
    format!("answer-{index}")
}

#[must_use]
pub fn map_practice(session: &SessionController) -> PracticeVm {
    let streak_label = format!("Streak: {}", session.streak());
    let card = || {
        session
            .challenge()
            .map(|challenge| map_challenge_card(challenge, session.rows()))
    };
    let missing = PracticeBodyVm::Error(ViewError::Unknown);
    let body = match session.phase() {
        SessionPhase::Loading => PracticeBodyVm::Loading,
        SessionPhase::Active => card().map_or(missing, PracticeBodyVm::Active),
        SessionPhase::Reviewed => card().map_or(missing, PracticeBodyVm::Reviewed),
        SessionPhase::Error => PracticeBodyVm::Error(ViewError::from_failure(session.failure())),
    };
    PracticeVm { streak_label, body }
}

fn map_challenge_card<'a>(
    challenge: &Challenge,
    rows: impl Iterator<Item = AnswerRow<'a>>,
) -> ChallengeCardVm {
    let rows = rows
        .enumerate()
        .map(|(index, row)| {
            let state = match row.verdict {
                None => RowState::Editable,
                Some(verdict) if verdict.correct => RowState::Correct,
                Some(_) => RowState::Wrong,
            };
            let correction = row
                .verdict
                .filter(|verdict| !verdict.correct)
                .map(|verdict| verdict.expected.clone());
            AnswerRowVm {
                index,
                input_id: answer_input_id(index),
                pronoun: row.item.pronoun().to_string(),
                answer: row.answer.to_string(),
                state,
                correction,
            }
        })
        .collect();

    ChallengeCardVm {
        badge: format!("{} • {}", challenge.mood(), challenge.tense()),
        verb: challenge.verb().to_string(),
        translation: challenge.translation().to_string(),
        rows,
    }
}

/// One toggle per known tense, in settings order.
#[must_use]
pub fn map_tense_toggles(selection: &TenseSelection) -> Vec<TenseToggleVm> {
    Tense::ALL
        .iter()
        .map(|&tense| TenseToggleVm {
            tense,
            label: tense.label(),
            selected: selection.contains(tense),
        })
        .collect()
}
