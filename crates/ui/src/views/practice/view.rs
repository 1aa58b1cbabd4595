use std::sync::Arc;

use dioxus::document::eval;
use dioxus::prelude::*;
use tracing::debug;

use conjugaison_core::model::Tense;
use services::{
    FocusAdvance, LoadOutcome, LoadTicket, SessionController, SessionError, SessionLoopService,
};

use crate::context::AppContext;
use crate::vm::{PracticeBodyVm, answer_input_id, map_practice, map_tense_toggles};

use super::accent_keyboard::AccentKeyboard;
use super::challenge_card::ChallengeCard;
use super::scripts::focus_input_script;
use super::settings::SettingsPanel;

fn focus_answer(index: usize) {
    let _ = eval(&focus_input_script(&answer_input_id(index)));
}

fn log_rejected(intent: &'static str, result: Result<(), SessionError>) {
    if let Err(err) = result {
        debug!(intent, error = %err, "intent ignored");
    }
}

/// Fetch the challenge for `ticket` off the render path and apply it.
///
/// A response for a superseded ticket is dropped by the controller.
fn spawn_load(
    mut session: Signal<SessionController>,
    session_loop: Arc<SessionLoopService>,
    ticket: LoadTicket,
) {
    spawn(async move {
        let result = session_loop.fetch(&ticket).await;
        let outcome = session.write().complete_load(ticket, result);
        if matches!(outcome, LoadOutcome::Adopted | LoadOutcome::Fallback) {
            log_rejected("focus", session.write().set_focus(0));
            focus_answer(0);
        }
    });
}

#[component]
pub fn PracticeView() -> Element {
    let ctx = use_context::<AppContext>();
    let session_loop = ctx.session_loop();
    let mut session = use_signal(|| SessionController::new(ctx.initial_tenses()));
    let mut settings_open = use_signal(|| false);

    {
        let session_loop = Arc::clone(&session_loop);
        use_effect(move || {
            let ticket = session.write().begin_load();
            spawn_load(session, Arc::clone(&session_loop), ticket);
        });
    }

    let load_next = {
        let session_loop = Arc::clone(&session_loop);
        use_callback(move |()| {
            let next = session.write().load_next();
            match next {
                Ok(ticket) => spawn_load(session, Arc::clone(&session_loop), ticket),
                Err(err) => debug!(error = %err, "next challenge refused"),
            }
        })
    };

    let check = use_callback(move |()| {
        let checked = session.write().check_answers().map(|_| ());
        log_rejected("check", checked);
    });

    let vm = map_practice(&session.read());
    let toggles = map_tense_toggles(session.read().selected_tenses());

    let body = match vm.body {
        PracticeBodyVm::Loading => rsx! {
            div { class: "practice-loading",
                div { class: "spinner" }
                p { "Summoning conjugation table..." }
            }
        },
        PracticeBodyVm::Active(card) => rsx! {
            ChallengeCard {
                card,
                on_edit: move |(index, text): (usize, String)| {
                    log_rejected("edit", session.write().edit_answer(index, text));
                },
                on_focus: move |index: usize| {
                    log_rejected("focus", session.write().set_focus(index));
                },
                on_enter: move |index: usize| {
                    let advance = session.write().advance_focus(index);
                    match advance {
                        Ok(FocusAdvance::Moved(next)) => focus_answer(next),
                        Ok(FocusAdvance::Check) => check.call(()),
                        Err(err) => debug!(error = %err, "enter ignored"),
                    }
                },
            }
            div { class: "practice-footer",
                AccentKeyboard {
                    on_insert: move |accent: &'static str| {
                        log_rejected("accent", session.write().insert_at_focus(accent));
                        let focused = session.read().focused_index();
                        if let Some(index) = focused {
                            focus_answer(index);
                        }
                    },
                }
                button {
                    id: "practice-check",
                    class: "primary-button",
                    r#type: "button",
                    onclick: move |_| check.call(()),
                    "Check Answers"
                }
            }
        },
        PracticeBodyVm::Reviewed(card) => rsx! {
            ChallengeCard {
                card,
                on_edit: |_: (usize, String)| {},
                on_focus: |_: usize| {},
                on_enter: |_: usize| {},
            }
            div { class: "practice-footer",
                button {
                    id: "practice-next",
                    class: "next-button",
                    r#type: "button",
                    onclick: move |_| load_next.call(()),
                    "Next Verb"
                    span { class: "next-arrow", "→" }
                }
            }
        },
        PracticeBodyVm::Error(error) => rsx! {
            div { class: "practice-error",
                p { "{error.message()}" }
                button {
                    id: "practice-retry",
                    class: "secondary-button",
                    r#type: "button",
                    onclick: move |_| load_next.call(()),
                    "Retry"
                }
            }
        },
    };

    rsx! {
        div { class: "practice-root",
            header { class: "practice-header",
                div { class: "streak-badge", "{vm.streak_label}" }
                button {
                    class: "settings-button",
                    r#type: "button",
                    aria_label: "Settings",
                    onclick: move |_| settings_open.set(true),
                    "⚙"
                }
            }

            main { class: "practice-card",
                {body}
            }

            footer { class: "practice-signature", "Conjugaison Mignonne" }

            if settings_open() {
                SettingsPanel {
                    toggles,
                    on_toggle: move |tense: Tense| {
                        let toggled = session.write().toggle_tense(tense).map(|_| ());
                        log_rejected("toggle tense", toggled);
                    },
                    on_close: move |()| settings_open.set(false),
                }
            }
        }
    }
}
