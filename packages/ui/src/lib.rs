//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const PROXIMITY_CSS: Asset = asset!("/assets/proximity.css");

mod app;
pub use app::{use_view, ProximityApp};

pub mod controller;
pub use controller::{Controller, Flow, Msg, Presenter, ViewState};

mod error_panel;
pub use error_panel::{ErrorLog, ErrorPanel};

mod geolocation;
pub use geolocation::GeolocationTracker;

mod login_form;
pub use login_form::LoginForm;

mod logout_panel;
pub use logout_panel::LogoutPanel;

pub mod map;
pub use map::{MapRenderer, MapView, MapWidget};

mod session;
pub use session::{make_session_store, SessionBackend};

pub mod source;
pub use source::{ServerUserSource, UserSource};
