mod controller;
mod workflow;

pub use controller::{
    FocusAdvance, LoadOutcome, LoadTicket, RoundReport, SessionController, SessionPhase,
};
pub use workflow::{SessionLoopService, SharedSession};
