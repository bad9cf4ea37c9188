//! Leaflet bindings and the [`MapSurface`] built on them.

use foundation::arena::Arena;
use foundation::geo::LatLng;
use js_sys::{Array, Object, Reflect};
use layers::layer::LayerId;
use layers::objects::{MapSurface, MarkerId, MarkerSpec, Popup};
use viewer::config::TileConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement, HtmlImageElement};

#[wasm_bindgen]
extern "C" {
    pub type LeafletMap;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn leaflet_map(container_id: &str) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &Array, zoom: f64);

    #[wasm_bindgen(method, js_name = flyTo)]
    fn fly_to(this: &LeafletMap, center: &Array, zoom: f64);

    #[wasm_bindgen(method, js_name = addLayer)]
    fn add_layer(this: &LeafletMap, layer: &JsValue);

    #[wasm_bindgen(method, js_name = removeLayer)]
    fn remove_layer(this: &LeafletMap, layer: &JsValue);

    #[wasm_bindgen(js_namespace = L, js_name = tileLayer)]
    fn tile_layer(url_template: &str, options: &Object) -> JsValue;

    pub type LeafletMarker;

    #[wasm_bindgen(js_namespace = L, js_name = marker)]
    fn leaflet_marker(latlng: &Array, options: &Object) -> LeafletMarker;

    #[wasm_bindgen(method, js_name = bindPopup)]
    fn bind_popup(this: &LeafletMarker, content: &JsValue);

    #[wasm_bindgen(method, js_name = openPopup)]
    fn open_popup(this: &LeafletMarker);

    #[wasm_bindgen(js_namespace = L, js_name = divIcon)]
    fn div_icon(options: &Object) -> JsValue;
}

fn lat_lng(p: LatLng) -> Array {
    Array::of2(&JsValue::from_f64(p.lat), &JsValue::from_f64(p.lng))
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

struct LiveMarker {
    marker: LeafletMarker,
    // The popup's link button calls into this closure; it must outlive the
    // marker's popup.
    _on_link: Option<Closure<dyn FnMut()>>,
}

/// Leaflet map plus the markers the campus map placed on it.
pub struct LeafletSurface {
    map: LeafletMap,
    document: Document,
    markers: Arena<LiveMarker>,
}

impl LeafletSurface {
    pub fn new(document: Document, container_id: &str, tiles: &TileConfig) -> Result<Self, JsValue> {
        let map = leaflet_map(container_id)?;

        let options = Object::new();
        set(&options, "attribution", &JsValue::from_str(&tiles.attribution))?;
        map.add_layer(&tile_layer(&tiles.url, &options));

        Ok(Self {
            map,
            document,
            markers: Arena::new(),
        })
    }

    fn marker_options(color: Option<&str>) -> Result<Object, JsValue> {
        let options = Object::new();
        let Some(color) = color else {
            return Ok(options);
        };

        let icon = Object::new();
        set(&icon, "className", &JsValue::from_str("campus-marker"))?;
        set(
            &icon,
            "html",
            &JsValue::from_str(&format!("<span style=\"background:{color}\"></span>")),
        )?;
        set(
            &icon,
            "iconSize",
            &Array::of2(&JsValue::from_f64(18.0), &JsValue::from_f64(18.0)),
        )?;
        set(&options, "icon", &div_icon(&icon))?;
        Ok(options)
    }

    /// Builds the popup DOM. Text goes through `textContent`, never HTML.
    fn popup_content(
        &self,
        popup: &Popup,
    ) -> Result<(HtmlElement, Option<Closure<dyn FnMut()>>), JsValue> {
        let doc = &self.document;
        let root = doc.create_element("div")?.dyn_into::<HtmlElement>()?;
        root.set_class_name("place-popup");

        let title = doc.create_element("b")?;
        title.set_text_content(Some(&popup.title));
        root.append_child(&title)?;

        if let Some(subtitle) = &popup.subtitle {
            let br = doc.create_element("br")?;
            root.append_child(&br)?;
            let el = doc.create_element("i")?;
            el.set_text_content(Some(subtitle));
            root.append_child(&el)?;
        }

        if let Some(description) = &popup.description {
            let el = doc.create_element("p")?;
            el.set_text_content(Some(description));
            root.append_child(&el)?;
        }

        if let Some(src) = &popup.image {
            let img = doc.create_element("img")?.dyn_into::<HtmlImageElement>()?;
            img.set_src(src);
            img.set_alt(&popup.title);
            root.append_child(&img)?;
        }

        let mut handler = None;
        if let Some(link) = &popup.link {
            let br = doc.create_element("br")?;
            root.append_child(&br)?;
            let button = doc.create_element("button")?.dyn_into::<HtmlElement>()?;
            button.set_text_content(Some(&link.label));
            let url = link.url.clone();
            let on_click = Closure::<dyn FnMut()>::new(move || open_external(&url));
            button.set_onclick(Some(on_click.as_ref().unchecked_ref()));
            root.append_child(&button)?;
            handler = Some(on_click);
        }

        Ok((root, handler))
    }
}

impl MapSurface for LeafletSurface {
    fn add_marker(&mut self, _layer: LayerId, spec: MarkerSpec) -> MarkerId {
        let options = Self::marker_options(spec.color.as_deref()).unwrap_or_else(|err| {
            crate::log_error(&format!("marker icon: {err:?}"));
            Object::new()
        });
        let marker = leaflet_marker(&lat_lng(spec.position), &options);

        let on_link = match self.popup_content(&spec.popup) {
            Ok((content, handler)) => {
                marker.bind_popup(&content);
                handler
            }
            Err(err) => {
                crate::log_error(&format!("marker popup: {err:?}"));
                marker.bind_popup(&JsValue::from_str(&spec.popup.title));
                None
            }
        };

        self.map.add_layer(&marker);
        MarkerId(self.markers.insert(LiveMarker {
            marker,
            _on_link: on_link,
        }))
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        if let Some(live) = self.markers.remove(marker.0) {
            self.map.remove_layer(&live.marker);
        }
    }

    fn open_popup(&mut self, marker: MarkerId) {
        if let Some(live) = self.markers.get(marker.0) {
            live.marker.open_popup();
        }
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.map.set_view(&lat_lng(center), f64::from(zoom));
    }

    fn fly_to(&mut self, center: LatLng, zoom: u8) {
        self.map.fly_to(&lat_lng(center), f64::from(zoom));
    }
}

/// Opens `url` in a new browser tab.
pub fn open_external(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(err) = window.open_with_url_and_target(url, "_blank") {
        crate::log_error(&format!("open {url}: {err:?}"));
    }
}
