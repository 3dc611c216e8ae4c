use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Event;

use crate::config::RestoreConfig;
use crate::handler::RestoreHandler;
use crate::wasm_dom::{DomElements, DomView};
use crate::wasm_fetch::FetchTransport;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let config = RestoreConfig::load_from_local_storage().unwrap_or_default();
    if let Err(e) = console_log::init_with_level(config.log_level.to_level()) {
        web_sys::console::log_1(&format!("Logger already initialized: {}", e).into());
    }
    log::info!("photo-restore WASM starting (endpoint {})", config.request_url());

    let window = web_sys::window().ok_or("No global window exists")?;
    let document = window.document().ok_or("No document in window")?;
    let elements = DomElements::resolve(&document, &config.elements)?;

    bind_form(elements, config)
}

/// Attach the submit listener to the upload form.
fn bind_form(elements: DomElements, config: RestoreConfig) -> Result<(), JsValue> {
    let form = elements.form.clone();
    let view = DomView::new(elements, &config);
    let handler = Rc::new(RestoreHandler::new(FetchTransport, config));

    let submit_view = view.clone();
    let onsubmit = Closure::wrap(Box::new(move |event: Event| {
        event.prevent_default();

        let handler = Rc::clone(&handler);
        let mut view = submit_view.clone();
        wasm_bindgen_futures::spawn_local(async move {
            // Alerts and UI reset already happened inside submit
            if let Ok(outcome) = handler.submit(&mut view).await {
                log::debug!("Submission finished: {:?}", outcome);
            }
        });
    }) as Box<dyn FnMut(Event)>);

    form.add_event_listener_with_callback("submit", onsubmit.as_ref().unchecked_ref())?;
    onsubmit.forget(); // Leak the closure to keep it alive

    // Free the last restored image when the page goes away
    let onpagehide = Closure::wrap(Box::new(move |_event: Event| {
        view.release_image();
    }) as Box<dyn FnMut(Event)>);

    let window = web_sys::window().ok_or("No global window exists")?;
    window.add_event_listener_with_callback("pagehide", onpagehide.as_ref().unchecked_ref())?;
    onpagehide.forget();

    log::info!("Upload form bound");
    Ok(())
}
