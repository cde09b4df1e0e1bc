use dioxus::prelude::*;
use store::config::MapConfig;

/// Id of the element Leaflet draws into.
pub const MAP_ELEMENT_ID: &str = "map-canvas";

/// The map viewport. Plots the current flow's users, re-plotting whenever they
/// or the current user change.
#[component]
pub fn MapView(#[props(default)] config: MapConfig) -> Element {
    let map = use_map(config);
    let resize = map.clone();

    rsx! {
        div {
            id: MAP_ELEMENT_ID,
            class: "map-canvas",
            onmounted: move |_| map.attach(),
            onresize: move |_| resize.resize(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
use wasm::use_map;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use dioxus::prelude::*;
    use store::config::MapConfig;

    use super::MAP_ELEMENT_ID;
    use crate::app::use_view;
    use crate::controller::Msg;
    use crate::map::{
        attach_with_retry, LeafletWidget, MapRenderer, ATTACH_ATTEMPTS, ATTACH_RETRY_DELAY,
    };

    type Slot = Rc<RefCell<Option<MapRenderer<LeafletWidget>>>>;

    #[derive(Clone)]
    pub struct MapHandle {
        renderer: Slot,
        mounted: Signal<bool>,
        router: Coroutine<Msg>,
        config: MapConfig,
    }

    impl MapHandle {
        /// Create the widget, retrying while Leaflet is still loading. A map
        /// that never comes up is reported in the error panel.
        pub fn attach(&self) {
            if self.renderer.borrow().is_some() {
                return;
            }
            let handle = self.clone();
            spawn(async move {
                let attached = attach_with_retry(
                    || LeafletWidget::attach(MAP_ELEMENT_ID, &handle.config),
                    || gloo_timers::future::sleep(ATTACH_RETRY_DELAY),
                    ATTACH_ATTEMPTS,
                )
                .await;
                match attached {
                    Ok(widget) => {
                        *handle.renderer.borrow_mut() =
                            Some(MapRenderer::new(widget, handle.config.default_zoom));
                        let mut mounted = handle.mounted;
                        mounted.set(true);
                    }
                    Err(e) => {
                        tracing::error!("could not attach map: {}", e);
                        handle.router.send(Msg::Error(e));
                    }
                }
            });
        }

        pub fn resize(&self) {
            if let Some(map) = self.renderer.borrow_mut().as_mut() {
                map.on_resize();
            }
        }
    }

    pub fn use_map(config: MapConfig) -> MapHandle {
        let view = use_view();
        let mounted = use_signal(|| false);
        let router = use_coroutine_handle::<Msg>();
        let renderer: Slot = use_hook(|| Rc::new(RefCell::new(None)));

        let plotted = use_memo(move || {
            let view = view.read();
            (view.users.clone(), view.flow.current_user().cloned())
        });

        let slot = renderer.clone();
        use_effect(move || {
            let (users, current) = plotted();
            if !mounted() {
                return;
            }
            if let Some(map) = slot.borrow_mut().as_mut() {
                map.render(&users, current.as_ref());
            }
        });

        MapHandle {
            renderer,
            mounted,
            router,
            config,
        }
    }
}

/// Server-rendered pages only carry the empty viewport.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone)]
struct MapHandle;

#[cfg(not(target_arch = "wasm32"))]
impl MapHandle {
    fn attach(&self) {}

    fn resize(&self) {}
}

#[cfg(not(target_arch = "wasm32"))]
fn use_map(_config: MapConfig) -> MapHandle {
    MapHandle
}
