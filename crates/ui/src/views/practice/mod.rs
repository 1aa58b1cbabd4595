mod accent_keyboard;
mod challenge_card;
mod scripts;
mod settings;
mod view;

pub use accent_keyboard::{ACCENTS, AccentKeyboard};
pub use challenge_card::ChallengeCard;
pub use settings::SettingsPanel;
pub use view::PracticeView;
