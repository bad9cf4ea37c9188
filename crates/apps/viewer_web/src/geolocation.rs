use foundation::geo::LatLng;
use js_sys::Reflect;
use viewer::config::GeolocationOptions;
use viewer::locate::GeoError;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::PositionOptions;

/// Asks the browser for the current position once.
///
/// `on_result` is called asynchronously with the fix or the failure. An
/// `Err` return means the request could not be started at all, in which case
/// `on_result` is never called.
pub fn request_position(
    options: GeolocationOptions,
    on_result: fn(Result<LatLng, GeoError>),
) -> Result<(), GeoError> {
    let window = web_sys::window().ok_or(GeoError::Unsupported)?;
    let navigator = window.navigator();
    if !Reflect::has(&navigator, &JsValue::from_str("geolocation")).unwrap_or(false) {
        return Err(GeoError::Unsupported);
    }
    let geolocation = navigator.geolocation().map_err(|_| GeoError::Unsupported)?;

    let position_options = PositionOptions::new();
    position_options.set_enable_high_accuracy(options.high_accuracy);
    position_options.set_timeout(options.timeout_ms);
    position_options.set_maximum_age(options.maximum_age_ms);

    let on_success =
        Closure::once_into_js(move |position: JsValue| on_result(position_from_js(&position)));
    let on_error =
        Closure::once_into_js(move |error: JsValue| on_result(Err(error_from_js(&error))));

    geolocation
        .get_current_position_with_error_callback_and_options(
            on_success.unchecked_ref(),
            Some(on_error.unchecked_ref()),
            &position_options,
        )
        .map_err(|_| GeoError::Unsupported)
}

fn number(target: &JsValue, key: &str) -> Option<f64> {
    Reflect::get(target, &JsValue::from_str(key)).ok()?.as_f64()
}

fn position_from_js(position: &JsValue) -> Result<LatLng, GeoError> {
    let coords = Reflect::get(position, &JsValue::from_str("coords"))
        .map_err(|_| GeoError::PositionUnavailable)?;
    match (number(&coords, "latitude"), number(&coords, "longitude")) {
        (Some(lat), Some(lng)) => Ok(LatLng::new(lat, lng)),
        _ => Err(GeoError::PositionUnavailable),
    }
}

fn error_from_js(error: &JsValue) -> GeoError {
    number(error, "code")
        .map(|code| GeoError::from_code(code as u16))
        .unwrap_or(GeoError::PositionUnavailable)
}
