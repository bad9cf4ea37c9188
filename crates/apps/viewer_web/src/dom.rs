//! Sidebar list, toast and page controls.

use std::cell::Cell;
use std::rc::Rc;

use layers::labels::{ListEntry, PlaceListView};
use places::{DatasetSource, PlaceId};
use runtime::event_bus::{Level, Notifier};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Document, Element, HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement,
};

pub const MAP_ID: &str = "map";
pub const PLACE_LIST_ID: &str = "placeList";
pub const TOAST_ID: &str = "toast";
pub const CAMPUS_SELECT_ID: &str = "campusSelect";
pub const CATEGORY_FILTER_ID: &str = "categoryFilter";
pub const SEARCH_BOX_ID: &str = "searchBox";
pub const LOCATE_BUTTON_ID: &str = "locateBtn";
pub const YEAR_ID: &str = "year";

const TOAST_MS: i32 = 3000;

pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("#{id} has an unexpected element type")))
}

/// Resolves after `ms` milliseconds without blocking the event loop.
async fn sleep_ms(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = JsFuture::from(promise).await;
}

/// `<ul id="placeList">` showing the visible places.
pub struct DomPlaceList {
    document: Document,
    list: Element,
    on_activate: fn(PlaceId),
    // One click handler per row; dropped together with the rows they serve.
    handlers: Vec<Closure<dyn FnMut()>>,
}

impl DomPlaceList {
    pub fn new(document: Document, id: &str, on_activate: fn(PlaceId)) -> Result<Self, JsValue> {
        let list = element_by_id::<Element>(&document, id)?;
        Ok(Self {
            document,
            list,
            on_activate,
            handlers: Vec::new(),
        })
    }

    fn clear(&mut self) {
        self.list.set_inner_html("");
        self.handlers.clear();
    }

    fn row(&self, text: &str) -> Result<HtmlElement, JsValue> {
        let li = self.document.create_element("li")?.dyn_into::<HtmlElement>()?;
        li.set_text_content(Some(text));
        Ok(li)
    }

    fn try_show_entries(&mut self, entries: &[ListEntry]) -> Result<(), JsValue> {
        self.clear();
        for entry in entries {
            let li = self.row(&entry.label)?;
            let place = entry.place;
            let on_activate = self.on_activate;
            let handler = Closure::<dyn FnMut()>::new(move || on_activate(place));
            li.set_onclick(Some(handler.as_ref().unchecked_ref()));
            self.list.append_child(&li)?;
            self.handlers.push(handler);
        }
        Ok(())
    }

    fn try_show_placeholder(&mut self, message: &str) -> Result<(), JsValue> {
        self.clear();
        let li = self.row(message)?;
        li.set_class_name("no-results");
        self.list.append_child(&li)?;
        Ok(())
    }
}

impl PlaceListView for DomPlaceList {
    fn show_entries(&mut self, entries: &[ListEntry]) {
        if let Err(err) = self.try_show_entries(entries) {
            crate::log_error(&format!("render place list: {err:?}"));
        }
    }

    fn show_placeholder(&mut self, message: &str) {
        if let Err(err) = self.try_show_placeholder(message) {
            crate::log_error(&format!("render place list: {err:?}"));
        }
    }
}

/// `#toast`: shows a message for a few seconds.
pub struct Toast {
    element: Element,
    // Bumped on every message so an older timer never hides a newer toast.
    shown: Rc<Cell<u64>>,
}

impl Toast {
    pub fn new(document: &Document, id: &str) -> Result<Self, JsValue> {
        Ok(Self {
            element: element_by_id::<Element>(document, id)?,
            shown: Rc::new(Cell::new(0)),
        })
    }
}

impl Notifier for Toast {
    fn notify(&mut self, level: Level, message: &str) {
        self.element.set_text_content(Some(message));
        self.element.set_class_name(match level {
            Level::Success => "show",
            Level::Error => "show error",
        });

        let generation = self.shown.get() + 1;
        self.shown.set(generation);
        let element = self.element.clone();
        let shown = Rc::clone(&self.shown);
        spawn_local(async move {
            sleep_ms(TOAST_MS).await;
            if shown.get() == generation {
                let class = element.class_name().replace("show", "");
                element.set_class_name(class.trim());
            }
        });
    }
}

/// Connects the page's filter and locate controls to the viewer.
///
/// The listeners live as long as the page, so their closures are leaked.
pub fn wire_controls(document: &Document) {
    if let Ok(select) = element_by_id::<HtmlSelectElement>(document, CAMPUS_SELECT_ID) {
        let target = select.clone();
        listen(&select, "change", move || crate::switch_campus(&target.value()));
    }
    if let Ok(select) = element_by_id::<HtmlSelectElement>(document, CATEGORY_FILTER_ID) {
        let target = select.clone();
        listen(&select, "change", move || crate::set_category(&target.value()));
    }
    if let Ok(input) = element_by_id::<HtmlInputElement>(document, SEARCH_BOX_ID) {
        let target = input.clone();
        listen(&input, "input", move || crate::set_search(&target.value()));
    }
    if let Ok(button) = element_by_id::<HtmlButtonElement>(document, LOCATE_BUTTON_ID) {
        listen(&button, "click", crate::locate_me);
    }
}

fn listen(target: &web_sys::EventTarget, event: &str, f: impl FnMut() + 'static) {
    let closure = Closure::<dyn FnMut()>::new(f);
    if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
    {
        crate::log_error(&format!("listen {event}: {err:?}"));
    }
    closure.forget();
}

/// Replaces the campus selector's options with the configured datasets.
pub fn fill_campus_select(document: &Document, sources: &[DatasetSource], selected: &str) {
    let Ok(select) = element_by_id::<HtmlSelectElement>(document, CAMPUS_SELECT_ID) else {
        return;
    };
    select.set_inner_html("");
    for source in sources {
        let option = match document.create_element("option") {
            Ok(option) => option,
            Err(err) => {
                crate::log_error(&format!("campus option: {err:?}"));
                return;
            }
        };
        if let Err(err) = option.set_attribute("value", source.id.as_str()) {
            crate::log_error(&format!("campus option: {err:?}"));
        }
        option.set_text_content(Some(&source.label));
        if let Err(err) = select.append_child(&option) {
            crate::log_error(&format!("campus option: {err:?}"));
        }
    }
    select.set_value(selected);
}

pub fn show_year(document: &Document) {
    if let Some(el) = document.get_element_by_id(YEAR_ID) {
        let year = js_sys::Date::new_0().get_full_year();
        el.set_text_content(Some(&year.to_string()));
    }
}

pub fn set_locating(button: Option<&HtmlButtonElement>, locating: bool) {
    if let Some(button) = button {
        button.set_disabled(locating);
    }
}
