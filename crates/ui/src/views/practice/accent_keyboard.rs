use dioxus::prelude::*;

/// Characters a French learner is unlikely to have on their layout.
pub const ACCENTS: [&str; 12] = ["é", "è", "à", "ù", "ç", "ê", "î", "ô", "û", "ë", "ï", "'"];

#[component]
pub fn AccentKeyboard(on_insert: EventHandler<&'static str>) -> Element {
    rsx! {
        div { class: "accent-keyboard",
            div { class: "accent-keyboard-label", "Helper Keyboard" }
            div { class: "accent-keyboard-keys",
                for accent in ACCENTS {
                    button {
                        key: "{accent}",
                        class: "accent-key",
                        r#type: "button",
                        tabindex: "-1",
                        // Mouse-down keeps focus in the answer field.
                        onmousedown: move |evt: MouseEvent| {
                            evt.prevent_default();
                            on_insert.call(accent);
                        },
                        "{accent}"
                    }
                }
            }
        }
    }
}
