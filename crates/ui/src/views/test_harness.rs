use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;

use conjugaison_core::model::TenseSelection;
use services::{ChallengeProvider, SessionLoopService};

use crate::context::{UiApp, build_app_context};
use crate::views::PracticeView;

#[derive(Clone)]
struct TestApp {
    tenses: TenseSelection,
    session_loop: Arc<SessionLoopService>,
}

impl UiApp for TestApp {
    fn initial_tenses(&self) -> TenseSelection {
        self.tenses.clone()
    }

    fn session_loop(&self) -> Arc<SessionLoopService> {
        Arc::clone(&self.session_loop)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn PracticeHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { PracticeView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_practice_harness(provider: Arc<dyn ChallengeProvider>) -> ViewHarness {
    let app = Arc::new(TestApp {
        tenses: TenseSelection::default(),
        session_loop: Arc::new(SessionLoopService::new(provider)),
    });
    let dom = VirtualDom::new_with_props(PracticeHarness, ViewHarnessProps { app });
    ViewHarness { dom }
}
