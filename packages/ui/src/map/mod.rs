//! # Map — users plotted as markers
//!
//! [`MapRenderer`] decides what goes on the map; a [`MapWidget`] draws it.
//! The web build uses [`LeafletWidget`] (wasm only), tests use a recording
//! widget.
//!
//! A render always starts from a clean, default-framed map. The current user
//! is plotted first with its own [`MarkerStyle`], then everyone else; a record
//! equal to the current user by uid is not plotted twice, and records without a
//! location are skipped. The view is then fitted to the markers' bounds, which
//! are kept so a resize can re-fit them.

use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use store::{Bounds, Location, ProximityError, UserRecord};

#[cfg(target_arch = "wasm32")]
mod leaflet;
#[cfg(target_arch = "wasm32")]
pub use leaflet::LeafletWidget;

mod view;
pub use view::MapView;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerStyle {
    /// The logged-in user.
    CurrentUser,
    Nearby,
}

/// Content of a marker popup.
#[derive(Clone, Debug, PartialEq)]
pub struct Popup {
    pub title: String,
    pub fields: Vec<(&'static str, String)>,
}

impl Popup {
    pub fn for_user(user: &UserRecord) -> Self {
        Self {
            title: user.name.clone(),
            fields: user.display_fields(),
        }
    }
}

/// Drawing surface for the renderer.
pub trait MapWidget {
    /// Remove every marker and frame `center` at `zoom`.
    fn reset(&mut self, center: Location, zoom: u8);
    fn add_marker(&mut self, at: Location, style: MarkerStyle, popup: &Popup);
    /// Frame a non-empty bounding box.
    fn fit_bounds(&mut self, bounds: &Bounds);
    /// Re-measure the container after a size change.
    fn refresh_size(&mut self);
}

/// How often the widget is tried while its script may still be loading.
pub const ATTACH_ATTEMPTS: usize = 20;
pub const ATTACH_RETRY_DELAY: Duration = Duration::from_millis(250);

/// Call `attach` until it succeeds, running `wait` between tries. After
/// `attempts` failures the last error becomes a [`ProximityError`].
pub async fn attach_with_retry<T, E, Fut>(
    mut attach: impl FnMut() -> Result<T, E>,
    mut wait: impl FnMut() -> Fut,
    attempts: usize,
) -> Result<T, ProximityError>
where
    E: Debug,
    Fut: Future<Output = ()>,
{
    let mut last = None;
    for attempt in 1..=attempts.max(1) {
        match attach() {
            Ok(widget) => return Ok(widget),
            Err(e) => {
                tracing::debug!(attempt, "map widget not ready: {:?}", e);
                last = Some(e);
            }
        }
        if attempt < attempts {
            wait().await;
        }
    }
    let reason = last.map(|e| format!("{e:?}")).unwrap_or_default();
    Err(ProximityError::MapUnavailable(reason))
}

pub struct MapRenderer<W> {
    widget: W,
    default_center: Location,
    default_zoom: u8,
    bounds: Bounds,
}

impl<W: MapWidget> MapRenderer<W> {
    pub fn new(widget: W, default_zoom: u8) -> Self {
        Self {
            widget,
            default_center: Location::ORIGIN,
            default_zoom,
            bounds: Bounds::empty(),
        }
    }

    pub fn render(&mut self, users: &[UserRecord], current: Option<&UserRecord>) {
        self.widget.reset(self.default_center, self.default_zoom);
        self.bounds = Bounds::empty();

        if let Some(me) = current {
            self.plot(me, MarkerStyle::CurrentUser);
        }
        for user in users {
            if current.is_some_and(|me| me.same_user(user)) {
                continue;
            }
            self.plot(user, MarkerStyle::Nearby);
        }

        if !self.bounds.is_empty() {
            self.widget.fit_bounds(&self.bounds);
        }
        tracing::debug!(markers = users.len(), "map rendered");
    }

    pub fn on_resize(&mut self) {
        self.widget.refresh_size();
        if !self.bounds.is_empty() {
            self.widget.fit_bounds(&self.bounds);
        }
    }

    /// Bounds of the last render.
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    fn plot(&mut self, user: &UserRecord, style: MarkerStyle) {
        let Some(loc) = user.loc else {
            return;
        };
        self.widget.add_marker(loc, style, &Popup::for_user(user));
        self.bounds.extend(loc);
    }
}
