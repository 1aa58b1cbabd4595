use dioxus::prelude::*;

use crate::vm::{AnswerRowVm, ChallengeCardVm, RowState};

#[component]
pub fn ChallengeCard(
    card: ChallengeCardVm,
    on_edit: EventHandler<(usize, String)>,
    on_focus: EventHandler<usize>,
    on_enter: EventHandler<usize>,
) -> Element {
    rsx! {
        div { class: "challenge-header",
            span { class: "challenge-badge", "{card.badge}" }
            h1 { class: "challenge-verb", "{card.verb}" }
            div { class: "challenge-translation", "{card.translation}" }
        }
        div { class: "answer-grid",
            for row in card.rows.iter() {
                AnswerField {
                    key: "{row.input_id}",
                    row: row.clone(),
                    on_edit,
                    on_focus,
                    on_enter,
                }
            }
        }
    }
}

#[component]
fn AnswerField(
    row: AnswerRowVm,
    on_edit: EventHandler<(usize, String)>,
    on_focus: EventHandler<usize>,
    on_enter: EventHandler<usize>,
) -> Element {
    let index = row.index;
    let marker = match row.state {
        RowState::Editable => None,
        RowState::Correct => Some(("answer-marker answer-marker--correct", "✓")),
        RowState::Wrong => Some(("answer-marker answer-marker--wrong", "!")),
    };
    rsx! {
        div { class: "answer-field",
            label { class: "answer-label", r#for: "{row.input_id}", "{row.pronoun}" }
            div { class: "answer-input-wrap",
                input {
                    id: "{row.input_id}",
                    class: row.state.input_class(),
                    r#type: "text",
                    value: "{row.answer}",
                    placeholder: "...",
                    autocomplete: "off",
                    spellcheck: "false",
                    disabled: row.state.is_locked(),
                    oninput: move |evt: FormEvent| on_edit.call((index, evt.value())),
                    onfocus: move |_| on_focus.call(index),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.data.key() == Key::Enter {
                            evt.prevent_default();
                            on_enter.call(index);
                        }
                    },
                }
                if let Some((class, glyph)) = marker {
                    span { class, "{glyph}" }
                }
            }
            if let Some(expected) = row.correction.as_ref() {
                div { class: "answer-correction", "➜ {expected}" }
            }
        }
    }
}
