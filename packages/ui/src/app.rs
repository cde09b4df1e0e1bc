//! App shell: owns the router and lays out the page.

use dioxus::prelude::*;
use futures_util::StreamExt;
use store::ProximityConfig;

use crate::controller::{Controller, Flow, Msg, Presenter, ViewState};
use crate::error_panel::ErrorPanel;
use crate::geolocation::GeolocationTracker;
use crate::login_form::LoginForm;
use crate::logout_panel::LogoutPanel;
use crate::map::MapView;
use crate::session::{make_session_store, SessionBackend};
use crate::source::ServerUserSource;

/// The current view state, provided by [`ProximityApp`].
pub fn use_view() -> Signal<ViewState> {
    use_context::<Signal<ViewState>>()
}

/// Publishes controller views into the shared signal.
struct SignalPresenter {
    view: Signal<ViewState>,
}

impl Presenter for SignalPresenter {
    fn present(&mut self, view: &ViewState) {
        self.view.set(view.clone());
    }

    fn scroll_to_top(&mut self) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                window.scroll_to_with_x_and_y(0.0, 0.0);
            }
        }
    }
}

#[component]
pub fn ProximityApp(
    #[props(default)] config: ProximityConfig,
    #[props(default)] backend: SessionBackend,
) -> Element {
    let view = use_signal(ViewState::default);
    use_context_provider(|| view);

    let ttl = config.session.ttl();
    let router = use_coroutine(move |mut rx: UnboundedReceiver<Msg>| async move {
        let sessions = make_session_store(backend, ttl);
        let mut controller = Controller::new(sessions, ServerUserSource, SignalPresenter { view });
        while let Some(msg) = rx.next().await {
            controller.handle(msg).await;
        }
    });

    // Effects only run in the browser, so the first flow is built there.
    use_effect(move || router.send(Msg::Refresh));

    let state = view();
    let account = match state.flow {
        Flow::Anonymous => rsx! { LoginForm {} },
        Flow::Identified(user) => rsx! { LogoutPanel { user } },
    };

    rsx! {
        div {
            class: "proximity",
            header {
                class: "proximity-header",
                h1 { "Proximity" }
            }
            ErrorPanel {}
            {account}
            if state.loading {
                p { class: "proximity-loading", "Loading users..." }
            }
            MapView { config: config.map.clone() }
            GeolocationTracker {}
        }
    }
}
