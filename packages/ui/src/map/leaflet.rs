//! [`MapWidget`] over Leaflet's global `L`.
//!
//! Leaflet itself is loaded by the page head. Coordinates cross
//! into JavaScript as Leaflet's `[lat, lng]` arrays.

use serde::Serialize;
use store::config::MapConfig;
use store::{Bounds, Location};
use wasm_bindgen::prelude::*;
use web_sys::Node;

use super::{MapWidget, MarkerStyle, Popup};

#[wasm_bindgen]
extern "C" {
    type LeafletMap;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn create_map(element_id: &str, options: &JsValue) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &JsValue, zoom: u8) -> LeafletMap;

    #[wasm_bindgen(method, js_name = fitBounds)]
    fn fit_bounds(this: &LeafletMap, bounds: &JsValue) -> LeafletMap;

    #[wasm_bindgen(method, js_name = invalidateSize)]
    fn invalidate_size(this: &LeafletMap) -> LeafletMap;

    #[wasm_bindgen(method)]
    fn remove(this: &LeafletMap) -> LeafletMap;

    type Layer;

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url: &str, options: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = layerGroup)]
    fn layer_group() -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn marker(at: &JsValue) -> Layer;

    #[wasm_bindgen(js_namespace = L, js_name = circleMarker)]
    fn circle_marker(at: &JsValue, options: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &Layer, target: &JsValue) -> Layer;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &Layer, content: &Node) -> Layer;

    #[wasm_bindgen(method, js_name = clearLayers)]
    fn clear_layers(this: &Layer) -> Layer;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions {
    world_copy_jump: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileOptions {
    max_zoom: u8,
    attribution: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CircleOptions {
    radius: u8,
    color: &'static str,
    fill_opacity: f32,
}

const ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn lat_lng(loc: Location) -> JsValue {
    to_js(&[loc.latitude, loc.longitude])
}

/// A Leaflet map with one tile layer and one marker group.
pub struct LeafletWidget {
    map: LeafletMap,
    markers: Layer,
}

impl LeafletWidget {
    /// Create the map inside the element with id `element_id`. Fails if the
    /// element or Leaflet is missing.
    pub fn attach(element_id: &str, config: &MapConfig) -> Result<Self, JsValue> {
        let map = create_map(element_id, &to_js(&MapOptions { world_copy_jump: true }))?;
        map.set_view(&lat_lng(Location::ORIGIN), config.default_zoom);

        let tiles = TileOptions {
            max_zoom: 19,
            attribution: ATTRIBUTION,
        };
        tile_layer(&config.tile_url, &to_js(&tiles)).add_to(&map);
        let markers = layer_group().add_to(&map);

        tracing::info!(element_id, "leaflet map attached");
        Ok(Self { map, markers })
    }
}

impl Drop for LeafletWidget {
    fn drop(&mut self) {
        self.map.remove();
    }
}

impl MapWidget for LeafletWidget {
    fn reset(&mut self, center: Location, zoom: u8) {
        self.markers.clear_layers();
        self.map.set_view(&lat_lng(center), zoom);
    }

    fn add_marker(&mut self, at: Location, style: MarkerStyle, popup: &Popup) {
        let layer = match style {
            MarkerStyle::CurrentUser => marker(&lat_lng(at)),
            MarkerStyle::Nearby => {
                let options = CircleOptions {
                    radius: 8,
                    color: "#3b82f6",
                    fill_opacity: 0.6,
                };
                circle_marker(&lat_lng(at), &to_js(&options))
            }
        };
        match popup_node(popup) {
            Some(node) => {
                layer.bind_popup(&node);
            }
            None => tracing::warn!(title = %popup.title, "could not build popup"),
        }
        layer.add_to(&self.markers);
    }

    fn fit_bounds(&mut self, bounds: &Bounds) {
        let (Some(sw), Some(ne)) = (bounds.south_west(), bounds.north_east()) else {
            return;
        };
        let corners = [[sw.latitude, sw.longitude], [ne.latitude, ne.longitude]];
        self.map.fit_bounds(&to_js(&corners));
    }

    fn refresh_size(&mut self) {
        self.map.invalidate_size();
    }
}

/// Popup body as DOM nodes, so user-supplied text is never parsed as HTML.
fn popup_node(popup: &Popup) -> Option<Node> {
    let document = web_sys::window()?.document()?;
    let root = document.create_element("div").ok()?;
    root.set_class_name("user-popup");

    let title = document.create_element("strong").ok()?;
    title.set_text_content(Some(&popup.title));
    root.append_child(&title).ok()?;

    for (label, value) in &popup.fields {
        let line = document.create_element("div").ok()?;
        line.set_text_content(Some(&format!("{label}: {value}")));
        root.append_child(&line).ok()?;
    }
    Some(root.into())
}
