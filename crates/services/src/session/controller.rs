use std::fmt;

use tracing::{debug, info};

use conjugaison_core::model::{AnswerRow, Challenge, Round, RoundError, Tense, TenseSelection, Verdict};

use crate::error::{ProviderError, SessionError};
use crate::provider::{FallbackPolicy, Resolved};

//
// ─── PHASES & OUTCOMES ─────────────────────────────────────────────────────────
//

/// Lifecycle of a practice round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Loading,
    Active,
    Reviewed,
    Error,
}

/// Handle for one in-flight load. Only the most recent ticket is honored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    tenses: TenseSelection,
}

impl LoadTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Tense selection captured when the load began.
    #[must_use]
    pub fn tenses(&self) -> &TenseSelection {
        &self.tenses
    }
}

/// What `complete_load` did with a provider result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The generated challenge is now active.
    Adopted,
    /// Generation failed; the fallback challenge is now active.
    Fallback,
    /// Generation and the fallback both failed; the session is in `Error`.
    Failed,
    /// A newer load superseded this one; nothing changed.
    Stale,
}

/// Result of checking a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundReport {
    pub verdicts: Vec<Verdict>,
    pub all_correct: bool,
    pub streak: u32,
}

/// Where focus goes after the learner confirms a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusAdvance {
    Moved(usize),
    Check,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns the practice session: current round, streak, and tense filter.
///
/// The controller is synchronous. Loading is split into `begin_load` and
/// `complete_load` so the caller can await the provider without holding the state,
/// and so a late response from a superseded load is dropped.
pub struct SessionController {
    phase: SessionPhase,
    round: Option<Round>,
    streak: u32,
    selected: TenseSelection,
    focused: Option<usize>,
    generation: u64,
    fallback: FallbackPolicy,
    failure: Option<SessionError>,
}

impl SessionController {
    /// Start in `Loading`; the host is expected to issue the first load right away.
    #[must_use]
    pub fn new(selected: TenseSelection) -> Self {
        Self {
            phase: SessionPhase::Loading,
            round: None,
            streak: 0,
            selected,
            focused: None,
            generation: 0,
            fallback: FallbackPolicy::default(),
            failure: None,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn challenge(&self) -> Option<&Challenge> {
        self.round.as_ref().map(Round::challenge)
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        self.round.as_ref().map(Round::answers).unwrap_or_default()
    }

    pub fn rows(&self) -> impl Iterator<Item = AnswerRow<'_>> {
        self.round.iter().flat_map(|round| round.rows())
    }

    /// Per-item correctness, available once the round is reviewed.
    #[must_use]
    pub fn verdicts(&self) -> Option<&[Verdict]> {
        self.round.as_ref().and_then(Round::verdicts)
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn selected_tenses(&self) -> &TenseSelection {
        &self.selected
    }

    #[must_use]
    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    /// Why the session is in `Error`, if it is.
    #[must_use]
    pub fn failure(&self) -> Option<&SessionError> {
        self.failure.as_ref()
    }

    //
    // ─── LOADING ───────────────────────────────────────────────────────────────
    //

    /// Enter `Loading`, dropping the current round, and hand out a fresh ticket.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        self.phase = SessionPhase::Loading;
        self.round = None;
        self.focused = None;
        self.failure = None;
        debug!(generation = self.generation, tenses = %self.selected.joined_labels(), "loading challenge");
        LoadTicket {
            generation: self.generation,
            tenses: self.selected.clone(),
        }
    }

    /// Request the next challenge after a reviewed round, or retry after an error.
    ///
    /// While a load is pending this supersedes it.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotReviewed` while the current round is still being answered.
    pub fn load_next(&mut self) -> Result<LoadTicket, SessionError> {
        if self.phase == SessionPhase::Active {
            return Err(SessionError::NotReviewed);
        }
        Ok(self.begin_load())
    }

    /// Apply a provider result for `ticket`.
    ///
    /// Failures are replaced with the fallback challenge; only an invalid fallback
    /// moves the session to `Error`.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Challenge, ProviderError>,
    ) -> LoadOutcome {
        if ticket.generation != self.generation || self.phase != SessionPhase::Loading {
            debug!(
                generation = ticket.generation,
                current = self.generation,
                "dropping stale challenge response"
            );
            return LoadOutcome::Stale;
        }

        match self.fallback.resolve(result) {
            Ok(Resolved::Generated(challenge)) => {
                self.activate(challenge);
                LoadOutcome::Adopted
            }
            Ok(Resolved::Fallback(challenge)) => {
                self.activate(challenge);
                LoadOutcome::Fallback
            }
            Err(err) => {
                self.phase = SessionPhase::Error;
                self.failure = Some(err);
                LoadOutcome::Failed
            }
        }
    }

    fn activate(&mut self, challenge: Challenge) {
        debug!(verb = challenge.verb(), tense = challenge.tense(), "challenge ready");
        self.round = Some(Round::new(challenge));
        self.focused = None;
        self.phase = SessionPhase::Active;
    }

    //
    // ─── ANSWERING ─────────────────────────────────────────────────────────────
    //

    fn active_round_mut(&mut self) -> Result<&mut Round, SessionError> {
        match self.phase {
            SessionPhase::Active => self.round.as_mut().ok_or(SessionError::NoActiveChallenge),
            SessionPhase::Loading => Err(SessionError::LoadInProgress),
            SessionPhase::Reviewed => Err(SessionError::AlreadyReviewed),
            SessionPhase::Error => Err(SessionError::NoActiveChallenge),
        }
    }

    /// Replace the learner's answer at `index`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` outside `Active` or for an unknown index.
    pub fn edit_answer(&mut self, index: usize, text: impl Into<String>) -> Result<(), SessionError> {
        self.active_round_mut()?.set_answer(index, text)?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `SessionError` outside `Active` or for an unknown index.
    pub fn set_focus(&mut self, index: usize) -> Result<(), SessionError> {
        let len = self.active_round_mut()?.len();
        if index >= len {
            return Err(RoundError::IndexOutOfRange { index, len }.into());
        }
        self.focused = Some(index);
        Ok(())
    }

    /// Append `text` (typically an accented letter) to the focused answer.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoFocus` when no field is focused, or another
    /// `SessionError` outside `Active`.
    pub fn insert_at_focus(&mut self, text: &str) -> Result<(), SessionError> {
        let focused = self.focused;
        let round = self.active_round_mut()?;
        let index = focused.ok_or(SessionError::NoFocus)?;
        round.append_to_answer(index, text)?;
        Ok(())
    }

    /// Move focus past the field at `from`; on the last field, ask for a check.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` outside `Active` or for an unknown index.
    pub fn advance_focus(&mut self, from: usize) -> Result<FocusAdvance, SessionError> {
        let len = self.active_round_mut()?.len();
        if from >= len {
            return Err(RoundError::IndexOutOfRange { index: from, len }.into());
        }
        if from + 1 == len {
            return Ok(FocusAdvance::Check);
        }
        self.focused = Some(from + 1);
        Ok(FocusAdvance::Moved(from + 1))
    }

    /// Grade the round, update the streak, and enter `Reviewed`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveChallenge` before a challenge is loaded and
    /// `SessionError::AlreadyReviewed` when checked twice.
    pub fn check_answers(&mut self) -> Result<RoundReport, SessionError> {
        let round = match self.phase {
            SessionPhase::Loading | SessionPhase::Error => {
                return Err(SessionError::NoActiveChallenge);
            }
            SessionPhase::Reviewed => return Err(SessionError::AlreadyReviewed),
            SessionPhase::Active => self.round.as_mut().ok_or(SessionError::NoActiveChallenge)?,
        };

        let all_correct = round.grade()?;
        let verdicts = round.verdicts().map(<[Verdict]>::to_vec).unwrap_or_default();

        self.streak = if all_correct {
            self.streak.saturating_add(1)
        } else {
            0
        };
        self.focused = None;
        self.phase = SessionPhase::Reviewed;

        info!(all_correct, streak = self.streak, "round checked");
        Ok(RoundReport {
            verdicts,
            all_correct,
            streak: self.streak,
        })
    }

    //
    // ─── SETTINGS ──────────────────────────────────────────────────────────────
    //

    /// Add or remove a tense for the next load. The displayed challenge is untouched.
    ///
    /// Returns whether the tense is selected afterwards.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::LoadInProgress` while loading and
    /// `SessionError::Tense` when it would empty the selection.
    pub fn toggle_tense(&mut self, tense: Tense) -> Result<bool, SessionError> {
        if self.phase == SessionPhase::Loading {
            return Err(SessionError::LoadInProgress);
        }
        Ok(self.selected.toggle(tense)?)
    }
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(TenseSelection::default())
    }
}

impl fmt::Debug for SessionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("phase", &self.phase)
            .field("verb", &self.challenge().map(Challenge::verb))
            .field("streak", &self.streak)
            .field("selected", &self.selected)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
