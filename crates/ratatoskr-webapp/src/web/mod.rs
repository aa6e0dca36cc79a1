//! Browser entry point.
//!
//! Mounts a [`TagPicker`] on the page once the DOM is parsed and wires its
//! event handlers to the page's controls and window events.

mod bridge;
mod console;
mod dom;
mod storage;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::WidgetConfig;
use crate::logging::{LogConfig, init_logging_with_writer};
use crate::picker::TagPicker;

use bridge::TelegramBridge;
use console::ConsoleWriter;
use dom::{WebDocument, WebNode, WebViewport};
use storage::LocalStorage;

/// Id of an optional `<script type="application/json">` holding a
/// [`WidgetConfig`].
const CONFIG_ELEMENT_ID: &str = "ratatoskr-config";

type Picker = Rc<RefCell<TagPicker<LocalStorage, WebNode>>>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // A second module instance on the same page keeps the first subscriber.
    let _ = init_logging_with_writer(&LogConfig::default(), ConsoleWriter);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::<dyn FnMut()>::new(move || {
            if let Err(e) = mount() {
                wasm_bindgen::throw_val(e);
            }
        });
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
        Ok(())
    } else {
        mount()
    }
}

fn mount() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let config = read_config(&document)?;
    let query = window.location().search()?;
    let storage = LocalStorage::open(&window);
    let viewport = WebViewport::new(window.clone(), &document);

    let picker = TagPicker::start(
        &query,
        &WebDocument::new(document),
        &viewport,
        storage,
        config,
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let picker: Picker = Rc::new(RefCell::new(picker));

    listen_controls(&picker)?;
    listen_submit(&picker, &window)?;
    listen_window(&picker, &window)?;
    Ok(())
}

fn read_config(document: &web_sys::Document) -> Result<WidgetConfig, JsValue> {
    let Some(element) = document.get_element_by_id(CONFIG_ELEMENT_ID) else {
        return Ok(WidgetConfig::default());
    };
    let raw = element.text_content().unwrap_or_default();
    WidgetConfig::from_json(&raw).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn listen_controls(picker: &Picker) -> Result<(), JsValue> {
    let targets: Vec<_> = picker
        .borrow()
        .controller()
        .bindings()
        .map(|(id, binding)| {
            let control = binding.control();
            (id, control.style().event(), control.node().element().clone())
        })
        .collect();

    for (id, event, element) in targets {
        let picker = Rc::clone(picker);
        let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            if let Err(e) = picker.borrow_mut().on_toggle(id) {
                tracing::error!(error = %e, "toggle failed");
            }
        });
        element.add_event_listener_with_callback(event, handler.as_ref().unchecked_ref())?;
        handler.forget();
    }
    Ok(())
}

fn listen_submit(picker: &Picker, window: &web_sys::Window) -> Result<(), JsValue> {
    let button = picker.borrow().submit_button().node().element().clone();
    let bridge = TelegramBridge::new(window.clone());
    let picker = Rc::clone(picker);

    let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        if let Err(e) = picker.borrow().on_submit(&bridge) {
            tracing::error!(error = %e, "submission failed");
        }
    });
    button.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}

fn listen_window(picker: &Picker, window: &web_sys::Window) -> Result<(), JsValue> {
    let on_scroll = {
        let picker = Rc::clone(picker);
        let window = window.clone();
        Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            let now = clock(&window);
            let scroll_y = window.scroll_y().unwrap_or(0.0);
            picker.borrow_mut().on_scroll(now, scroll_y);
        })
    };
    window.add_event_listener_with_callback("scroll", on_scroll.as_ref().unchecked_ref())?;
    on_scroll.forget();

    let on_unload = {
        let picker = Rc::clone(picker);
        let window = window.clone();
        Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            let scroll_y = window.scroll_y().unwrap_or(0.0);
            picker.borrow_mut().on_unload(scroll_y);
        })
    };
    window.add_event_listener_with_callback("beforeunload", on_unload.as_ref().unchecked_ref())?;
    on_unload.forget();
    Ok(())
}

/// Monotonic page time, or wall-clock time where `performance` is missing.
fn clock(window: &web_sys::Window) -> Duration {
    let millis = window
        .performance()
        .map_or_else(js_sys::Date::now, |performance| performance.now());
    Duration::from_secs_f64(millis.max(0.0) / 1000.0)
}
