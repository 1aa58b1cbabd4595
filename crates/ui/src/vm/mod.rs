mod practice_vm;

pub use practice_vm::{
    AnswerRowVm, ChallengeCardVm, PracticeBodyVm, PracticeVm, RowState, TenseToggleVm,
    answer_input_id, map_practice, map_tense_toggles,
};
