mod practice;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use practice::{ACCENTS, AccentKeyboard, ChallengeCard, PracticeView, SettingsPanel};
pub use state::ViewError;
