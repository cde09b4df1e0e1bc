//! Browser position lookup, once per router epoch.
//!
//! The answer always comes back to the router as a message tagged with the
//! epoch that asked for it; the router drops answers from older epochs.

use dioxus::prelude::*;
use store::{GeolocationError, Location};

use crate::app::use_view;
use crate::controller::Msg;

/// Map a finished lookup to its router message.
pub fn outcome(epoch: u64, result: Result<Location, GeolocationError>) -> Msg {
    match result {
        Ok(location) => Msg::LocationUpdated { epoch, location },
        Err(error) => Msg::LocationFailed { epoch, error },
    }
}

/// Invisible component that asks for the position whenever the epoch moves.
#[component]
pub fn GeolocationTracker() -> Element {
    let view = use_view();
    let router = use_coroutine_handle::<Msg>();
    let epoch = use_memo(move || view().epoch);

    use_effect(move || {
        let epoch = epoch();
        // Epoch 0 is before the first refresh; there is no flow to feed yet.
        if epoch == 0 {
            return;
        }
        request_location(epoch, move |msg| router.send(msg));
    });

    rsx! {}
}

#[cfg(target_arch = "wasm32")]
fn request_location(epoch: u64, deliver: impl Fn(Msg) + Clone + 'static) {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{GeolocationPosition, GeolocationPositionError};

    let Some(geolocation) = web_sys::window().and_then(|w| w.navigator().geolocation().ok())
    else {
        deliver(outcome(epoch, Err(GeolocationError::Unsupported)));
        return;
    };

    let on_error = deliver.clone();
    let success = Closure::once_into_js(move |position: GeolocationPosition| {
        let coords = position.coords();
        let location = Location::new(coords.longitude(), coords.latitude());
        tracing::debug!(epoch, ?location, "position resolved");
        deliver(outcome(epoch, Ok(location)));
    });
    let failure = Closure::once_into_js(move |error: GeolocationPositionError| {
        let error = GeolocationError::from_code(error.code());
        tracing::warn!(epoch, reason = error.reason(), "position lookup failed");
        on_error(outcome(epoch, Err(error)));
    });

    if let Err(e) = geolocation.get_current_position_with_error_callback(
        success.unchecked_ref(),
        Some(failure.unchecked_ref()),
    ) {
        tracing::error!("geolocation call threw: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn request_location(epoch: u64, deliver: impl Fn(Msg) + Clone + 'static) {
    deliver(outcome(epoch, Err(GeolocationError::Unsupported)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_carries_epoch() {
        let here = Location::new(3.9, 51.0);
        assert_eq!(
            outcome(4, Ok(here)),
            Msg::LocationUpdated {
                epoch: 4,
                location: here
            }
        );
        assert_eq!(
            outcome(5, Err(GeolocationError::Timeout)),
            Msg::LocationFailed {
                epoch: 5,
                error: GeolocationError::Timeout
            }
        );
    }

    #[test]
    fn test_native_hosts_are_unsupported() {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(None));
        let sink = seen.clone();
        request_location(2, move |msg| *sink.borrow_mut() = Some(msg));
        assert_eq!(
            seen.borrow().clone(),
            Some(Msg::LocationFailed {
                epoch: 2,
                error: GeolocationError::Unsupported
            })
        );
    }
}
