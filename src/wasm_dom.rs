//! DOM implementation of the restore view.
//!
//! Resolves the upload page's elements once from the configured ids and
//! drives them through web_sys.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobPropertyBag, Document, HtmlButtonElement, HtmlElement, HtmlFormElement,
    HtmlImageElement, HtmlInputElement, Url,
};

use crate::config::{ElementIds, RestoreConfig};
use crate::display::{DisplaySlot, ImageSurface};
use crate::error::RestoreError;
use crate::model::{ResponseImage, SelectedFile};
use crate::view::{FileSelection, RestoreView};

/// Best-effort message of a thrown JS value.
pub(crate) fn js_error_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    if let Some(s) = value.as_string() {
        return s;
    }
    format!("{:?}", value)
}

/// Copy bytes into a JS Blob with the given content type.
pub(crate) fn bytes_to_blob(bytes: &[u8], mime: &str) -> Result<Blob, JsValue> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());

    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_u8_array_sequence_and_options(&parts, &options)
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("element #{} not found", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{} has an unexpected type", id)))
}

/// The page elements the handler needs.
#[derive(Clone)]
pub struct DomElements {
    pub form: HtmlFormElement,
    pub file_input: HtmlInputElement,
    pub submit_button: HtmlButtonElement,
    pub loader: HtmlElement,
    pub image: HtmlImageElement,
}

impl DomElements {
    pub fn resolve(document: &Document, ids: &ElementIds) -> Result<Self, JsValue> {
        Ok(Self {
            form: element_by_id(document, &ids.form)?,
            file_input: element_by_id(document, &ids.file_input)?,
            submit_button: element_by_id(document, &ids.submit_button)?,
            loader: element_by_id(document, &ids.loader)?,
            image: element_by_id(document, &ids.image)?,
        })
    }
}

/// A `File` from the file input, read lazily.
pub struct BrowserFile(web_sys::File);

impl FileSelection for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    async fn read(self) -> Result<SelectedFile, RestoreError> {
        let buffer = JsFuture::from(self.0.array_buffer())
            .await
            .map_err(|e| RestoreError::payload(js_error_message(&e)))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
        log::debug!("Read '{}': {} bytes", self.0.name(), bytes.len());
        Ok(SelectedFile::new(self.0.name(), self.0.type_(), bytes))
    }
}

/// Object URLs assigned to the result `<img>`.
pub struct ObjectUrlSurface {
    image: HtmlImageElement,
}

impl ImageSurface for ObjectUrlSurface {
    type Handle = String;

    fn create_handle(&mut self, image: &ResponseImage) -> Result<String, RestoreError> {
        let blob = bytes_to_blob(&image.bytes, image.mime())
            .map_err(|e| RestoreError::display(js_error_message(&e)))?;
        Url::create_object_url_with_blob(&blob)
            .map_err(|e| RestoreError::display(js_error_message(&e)))
    }

    fn set_source(&mut self, handle: &String) {
        self.image.set_src(handle);
    }

    fn release(&mut self, handle: String) {
        log::debug!("Revoking {}", handle);
        if let Err(e) = Url::revoke_object_url(&handle) {
            log::warn!("Failed to revoke {}: {}", handle, js_error_message(&e));
        }
    }
}

/// Restore view over the upload page.
///
/// Clones share the displayed image slot, so every submission task can hold
/// its own copy.
#[derive(Clone)]
pub struct DomView {
    elements: DomElements,
    hidden_class: String,
    slot: Rc<RefCell<DisplaySlot<ObjectUrlSurface>>>,
}

impl DomView {
    pub fn new(elements: DomElements, config: &RestoreConfig) -> Self {
        let surface = ObjectUrlSurface {
            image: elements.image.clone(),
        };
        Self {
            elements,
            hidden_class: config.hidden_class.clone(),
            slot: Rc::new(RefCell::new(DisplaySlot::new(surface))),
        }
    }

    pub fn elements(&self) -> &DomElements {
        &self.elements
    }

    /// Revoke the displayed object URL (page is going away).
    pub fn release_image(&self) {
        self.slot.borrow_mut().clear();
    }
}

impl RestoreView for DomView {
    type Selection = BrowserFile;

    fn selected_file(&self) -> Option<BrowserFile> {
        self.elements
            .file_input
            .files()
            .and_then(|files| files.get(0))
            .map(BrowserFile)
    }

    fn set_control_disabled(&mut self, disabled: bool) {
        self.elements.submit_button.set_disabled(disabled);
    }

    fn set_loading_visible(&mut self, visible: bool) {
        let classes = self.elements.loader.class_list();
        let result = if visible {
            classes.remove_1(&self.hidden_class)
        } else {
            classes.add_1(&self.hidden_class)
        };
        if let Err(e) = result {
            log::warn!("Failed to toggle loader: {}", js_error_message(&e));
        }
    }

    fn show_image(&mut self, image: ResponseImage) -> Result<(), RestoreError> {
        self.slot.borrow_mut().show(&image)
    }

    fn alert(&mut self, message: &str) {
        match web_sys::window() {
            Some(window) => {
                if let Err(e) = window.alert_with_message(message) {
                    log::error!("Failed to show alert '{}': {}", message, js_error_message(&e));
                }
            }
            None => log::error!("No window to alert: {}", message),
        }
    }
}
