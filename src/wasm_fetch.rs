//! `fetch`-based transport for the browser build.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{FormData, Request, RequestInit, Response};

use crate::error::RestoreError;
use crate::model::{ResponseImage, RestoreRequest};
use crate::transport::{RestoreTransport, TransportResponse};
use crate::wasm_dom::{bytes_to_blob, js_error_message};

/// Posts uploads with `window.fetch`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

/// A fetch `Response` whose body has not been read.
pub struct FetchResponse(Response);

impl TransportResponse for FetchResponse {
    fn status(&self) -> u16 {
        self.0.status()
    }

    async fn into_image(self) -> Result<ResponseImage, RestoreError> {
        let headers = self.0.headers();
        let content_type = headers.get("content-type").ok().flatten();
        let disposition = headers.get("content-disposition").ok().flatten();

        let promise = self
            .0
            .array_buffer()
            .map_err(|e| RestoreError::response(js_error_message(&e)))?;
        let buffer = JsFuture::from(promise)
            .await
            .map_err(|e| RestoreError::response(js_error_message(&e)))?;
        let bytes = js_sys::Uint8Array::new(&buffer).to_vec();

        Ok(ResponseImage::new(bytes)
            .with_content_type(content_type)
            .with_disposition(disposition.as_deref()))
    }
}

impl RestoreTransport for FetchTransport {
    type Response = FetchResponse;

    async fn send(&self, request: RestoreRequest) -> Result<FetchResponse, RestoreError> {
        let file = &request.payload.file;
        let blob = bytes_to_blob(&file.bytes, file.content_type())
            .map_err(|e| RestoreError::payload(js_error_message(&e)))?;
        let form = FormData::new().map_err(|e| RestoreError::payload(js_error_message(&e)))?;
        form.append_with_blob_and_filename(&request.payload.field_name, &blob, &file.name)
            .map_err(|e| RestoreError::payload(js_error_message(&e)))?;

        // Content-Type (with boundary) is set by the browser from the FormData body
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);

        let fetch_request = Request::new_with_str_and_init(&request.url, &init)
            .map_err(|e| RestoreError::network(js_error_message(&e)))?;
        let window =
            web_sys::window().ok_or_else(|| RestoreError::network("No window object available"))?;

        let value = JsFuture::from(window.fetch_with_request(&fetch_request))
            .await
            .map_err(|e| RestoreError::network(js_error_message(&e)))?;
        let response: Response = value
            .dyn_into()
            .map_err(|_| RestoreError::network("fetch did not resolve to a Response"))?;

        log::debug!("fetch {} -> HTTP {}", request.url, response.status());
        Ok(FetchResponse(response))
    }
}
