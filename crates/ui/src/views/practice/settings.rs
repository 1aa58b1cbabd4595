use dioxus::prelude::*;

use conjugaison_core::model::Tense;

use crate::vm::TenseToggleVm;

#[component]
pub fn SettingsPanel(
    toggles: Vec<TenseToggleVm>,
    on_toggle: EventHandler<Tense>,
    on_close: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "settings-backdrop",
            div { class: "settings-panel", role: "dialog", aria_label: "Practice Settings",
                button {
                    class: "settings-close",
                    r#type: "button",
                    aria_label: "Close",
                    onclick: move |_| on_close.call(()),
                    "×"
                }
                h2 { class: "settings-title", "Practice Settings" }
                p { class: "settings-hint",
                    "Select the tenses you want to practice. You need at least one!"
                }
                div { class: "settings-tenses",
                    for toggle in toggles {
                        button {
                            key: "{toggle.label}",
                            class: if toggle.selected {
                                "tense-toggle tense-toggle--selected"
                            } else {
                                "tense-toggle"
                            },
                            r#type: "button",
                            onclick: move |_| on_toggle.call(toggle.tense),
                            span { class: "tense-toggle-label", "{toggle.label}" }
                            span { class: "tense-toggle-check",
                                if toggle.selected {
                                    "✓"
                                }
                            }
                        }
                    }
                }
                button {
                    class: "settings-done",
                    r#type: "button",
                    onclick: move |_| on_close.call(()),
                    "Done"
                }
            }
        }
    }
}
