use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use foundation::geo::LatLng;
use places::{LoadError, LoadOutcome, LoadRequest, PlaceId};
use viewer::config::ViewerConfig;
use viewer::controller::CampusMap;
use viewer::locate::GeoError;
use web_sys::HtmlButtonElement;

mod dom;
mod geolocation;
mod leaflet;

use dom::{DomPlaceList, Toast};
use leaflet::LeafletSurface;

type Campus = CampusMap<LeafletSurface, DomPlaceList, Toast>;

struct ViewerState {
    campus: Campus,
    locate_button: Option<HtmlButtonElement>,
}

thread_local! {
    static STATE: RefCell<Option<ViewerState>> = const { RefCell::new(None) };
    static INITIALIZED: Cell<bool> = const { Cell::new(false) };
}

/// Marks the viewer as initialized. Returns `false` if it already was.
fn claim_init() -> bool {
    !INITIALIZED.with(|flag| flag.replace(true))
}

fn release_init() {
    INITIALIZED.with(|flag| flag.set(false));
}

/// Runs `f` against the viewer; `None` until [`init_viewer`] succeeded.
fn with_viewer<R>(f: impl FnOnce(&mut ViewerState) -> R) -> Option<R> {
    STATE.with(|state| state.borrow_mut().as_mut().map(f))
}

pub(crate) fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub(crate) fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Builds the map, wires the page controls and loads the default campus.
///
/// `config_json` overrides the built-in [`ViewerConfig`]; fields it omits
/// keep their defaults. May only be called once per page.
#[wasm_bindgen]
pub fn init_viewer(config_json: Option<String>) -> Result<(), JsValue> {
    if !claim_init() {
        return Err(JsValue::from_str("viewer is already initialized"));
    }
    // A failed attempt may be retried, e.g. with a corrected config.
    build_viewer(config_json).inspect_err(|_| release_init())
}

fn build_viewer(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json {
        Some(json) => ViewerConfig::from_json_str(&json)
            .map_err(|e| JsValue::from_str(&e.to_string()))?,
        None => ViewerConfig::default(),
    };

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let surface = LeafletSurface::new(document.clone(), dom::MAP_ID, &config.tiles)?;
    let list = DomPlaceList::new(document.clone(), dom::PLACE_LIST_ID, activate_place)?;
    let toast = Toast::new(&document, dom::TOAST_ID)?;
    let locate_button = dom::element_by_id::<HtmlButtonElement>(&document, dom::LOCATE_BUTTON_ID).ok();

    dom::fill_campus_select(&document, &config.datasets, &config.default_dataset);

    let mut campus = CampusMap::new(config, surface, list, toast);
    let request = campus.load_default();

    STATE.with(|state| {
        *state.borrow_mut() = Some(ViewerState {
            campus,
            locate_button,
        });
    });

    dom::wire_controls(&document);
    dom::show_year(&document);

    if let Some(request) = request {
        fetch_dataset(request);
    }
    Ok(())
}

#[wasm_bindgen]
pub fn switch_campus(id: &str) {
    if let Some(request) = with_viewer(|v| v.campus.switch_dataset(id)).flatten() {
        fetch_dataset(request);
    }
}

#[wasm_bindgen]
pub fn set_category(value: &str) {
    with_viewer(|v| v.campus.set_category(value));
}

#[wasm_bindgen]
pub fn set_search(term: &str) {
    with_viewer(|v| v.campus.set_search(term));
}

/// Centers on a listed place and opens its popup.
#[wasm_bindgen]
pub fn focus_place(id: u32) -> bool {
    with_viewer(|v| v.campus.focus_place(PlaceId(id))).unwrap_or(false)
}

fn activate_place(place: PlaceId) {
    focus_place(place.0);
}

#[wasm_bindgen]
pub fn locate_me() {
    let options = with_viewer(|v| {
        let options = v.campus.begin_locate();
        if options.is_some() {
            dom::set_locating(v.locate_button.as_ref(), true);
        }
        options
    })
    .flatten();

    let Some(options) = options else {
        return;
    };
    if let Err(err) = geolocation::request_position(options, finish_locate) {
        finish_locate(Err(err));
    }
}

fn finish_locate(result: Result<LatLng, GeoError>) {
    with_viewer(|v| {
        v.campus.finish_locate(result);
        dom::set_locating(v.locate_button.as_ref(), false);
    });
}

fn fetch_dataset(request: LoadRequest) {
    spawn_local(async move {
        let body = fetch_text(&request.url).await;
        let outcome = with_viewer(|v| v.campus.complete_load(&request.ticket, body));
        match outcome {
            Some(LoadOutcome::Applied {
                selector,
                places,
                skipped,
            }) => {
                log(&format!("loaded {selector}: {places} places"));
                if skipped > 0 {
                    log_error(&format!("{selector}: skipped {skipped} malformed records"));
                }
            }
            Some(LoadOutcome::Failed(err)) => log_error(&format!("{}: {err}", request.label)),
            Some(LoadOutcome::Stale) | None => {}
        }
    });
}

async fn fetch_text(url: &str) -> Result<String, LoadError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))?;
    if !resp.ok() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }
    resp.text()
        .await
        .map_err(|e| LoadError::Network(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{claim_init, release_init};

    #[test]
    fn init_is_claimed_once_until_released() {
        assert!(claim_init());
        assert!(!claim_init());
        assert!(!claim_init());

        release_init();
        assert!(claim_init());
    }
}
