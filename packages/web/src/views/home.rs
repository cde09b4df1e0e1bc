use dioxus::prelude::*;
use ui::ProximityApp;

/// The single page: login or logout, errors, and the map.
#[component]
pub fn Home() -> Element {
    rsx! {
        ProximityApp {}
    }
}
