use std::sync::Arc;

use async_trait::async_trait;
use dioxus::prelude::*;

use conjugaison_core::model::{Challenge, Tense, TenseSelection};
use services::{ChallengeProvider, LoadOutcome, ProviderError, SessionController, StaticProvider};

use crate::views::{ChallengeCard, SettingsPanel};
use crate::vm::{PracticeBodyVm, map_practice, map_tense_toggles};

use super::test_harness::setup_practice_harness;

struct FailingProvider;

#[async_trait]
impl ChallengeProvider for FailingProvider {
    async fn generate_challenge(
        &self,
        _tenses: &TenseSelection,
    ) -> Result<Challenge, ProviderError> {
        Err(ProviderError::EmptyResponse)
    }
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_starts_loading() {
    let mut harness = setup_practice_harness(Arc::new(StaticProvider::default()));
    harness.rebuild();
    let html = harness.render();
    assert!(
        html.contains("Summoning conjugation table..."),
        "missing loading text in {html}"
    );
    assert!(html.contains("Streak: 0"), "missing streak in {html}");
    assert!(html.contains("Conjugaison Mignonne"), "missing footer in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn practice_view_shows_fallback_when_provider_fails() {
    let mut harness = setup_practice_harness(Arc::new(FailingProvider));
    harness.rebuild();

    let mut html = harness.render();
    for _ in 0..10 {
        if html.contains("Check Answers") {
            break;
        }
        harness.drive_async().await;
        html = harness.render();
    }

    assert!(html.contains("Avoir"), "missing fallback verb in {html}");
    assert!(html.contains("Check Answers"), "missing check button in {html}");
    assert!(html.contains("Helper Keyboard"), "missing accent row in {html}");
    assert!(!html.contains("Summoning"), "still loading in {html}");
}

#[component]
fn ReviewedCardFixture() -> Element {
    let mut session = SessionController::default();
    let ticket = session.begin_load();
    let challenge = Challenge::fallback().unwrap();
    assert_eq!(session.complete_load(ticket, Ok(challenge)), LoadOutcome::Adopted);
    session.edit_answer(0, "ai").ok();
    session.edit_answer(1, "es").ok();
    session.check_answers().ok();

    let PracticeBodyVm::Reviewed(card) = map_practice(&session).body else {
        return rsx! { "not reviewed" };
    };
    rsx! {
        ChallengeCard {
            card,
            on_edit: |_: (usize, String)| {},
            on_focus: |_: usize| {},
            on_enter: |_: usize| {},
        }
    }
}

#[test]
fn reviewed_card_marks_answers_and_shows_corrections() {
    let mut dom = VirtualDom::new(ReviewedCardFixture);
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);

    assert!(html.contains("answer-input--correct"), "missing correct row in {html}");
    assert!(html.contains("answer-input--wrong"), "missing wrong row in {html}");
    assert!(html.contains("➜ as"), "missing correction in {html}");
    assert!(!html.contains("➜ ai"), "correct row shows a correction in {html}");
}

#[component]
fn SettingsFixture() -> Element {
    let selection = TenseSelection::new([Tense::Present, Tense::FuturSimple]).unwrap();
    rsx! {
        SettingsPanel {
            toggles: map_tense_toggles(&selection),
            on_toggle: |_: Tense| {},
            on_close: |()| {},
        }
    }
}

#[test]
fn settings_panel_lists_every_tense() {
    let mut dom = VirtualDom::new(SettingsFixture);
    dom.rebuild_in_place();
    let html = dioxus_ssr::render(&dom);

    assert!(html.contains("Practice Settings"), "missing title in {html}");
    assert!(html.contains("You need at least one!"), "missing hint in {html}");
    for tense in Tense::ALL {
        assert!(html.contains(tense.label()), "missing {} in {html}", tense.label());
    }
    assert_eq!(html.matches("tense-toggle--selected").count(), 2);
}
