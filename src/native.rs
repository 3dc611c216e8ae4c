//! Native host: files from disk, results written to disk, blocking HTTP.
//!
//! The handler's futures are driven with `pollster`, so the blocking reqwest
//! client runs straight inside them on the calling thread.

use std::path::{Path, PathBuf};

use reqwest::blocking::multipart::{Form, Part};
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};

use crate::constants::RESTORED_PREFIX;
use crate::error::RestoreError;
use crate::model::{ResponseImage, RestoreRequest, SelectedFile, UiState};
use crate::transport::{RestoreTransport, TransportResponse};
use crate::view::{FileSelection, RestoreView};

/// A file on disk chosen on the command line.
#[derive(Debug, Clone)]
pub struct PathSelection(pub PathBuf);

impl FileSelection for PathSelection {
    fn name(&self) -> String {
        self.0
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.0.display().to_string())
    }

    async fn read(self) -> Result<SelectedFile, RestoreError> {
        let bytes = std::fs::read(&self.0)
            .map_err(|e| RestoreError::payload(format!("Failed to read {:?}: {}", self.0, e)))?;
        // Empty mime lets SelectedFile sniff the bytes instead
        let mime = image::ImageFormat::from_path(&self.0)
            .map(|format| format.to_mime_type())
            .unwrap_or_default();
        Ok(SelectedFile::new(self.name(), mime, bytes))
    }
}

/// Output file name when the user gave none: the server's choice, else
/// `restored_<stem>.png`.
pub fn default_output_name(input: &Path, image: &ResponseImage) -> PathBuf {
    if let Some(name) = &image.file_name {
        return PathBuf::from(name);
    }
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    PathBuf::from(format!("{}{}.png", RESTORED_PREFIX, stem))
}

/// Terminal view: alerts go to stderr, the restored image to a file.
#[derive(Debug, Default)]
pub struct TerminalView {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    state: UiState,
    written: Option<PathBuf>,
}

impl TerminalView {
    pub fn new(input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        Self {
            input,
            output,
            ..Self::default()
        }
    }

    pub fn ui_state(&self) -> UiState {
        self.state
    }

    /// Where the last restored image was written.
    pub fn written(&self) -> Option<&Path> {
        self.written.as_deref()
    }
}

impl RestoreView for TerminalView {
    type Selection = PathSelection;

    fn selected_file(&self) -> Option<PathSelection> {
        self.input.clone().map(PathSelection)
    }

    fn set_control_disabled(&mut self, disabled: bool) {
        self.state.control_disabled = disabled;
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.state.loading_visible = visible;
        if visible {
            log::info!("Restoring image, waiting for the server...");
        }
    }

    fn show_image(&mut self, image: ResponseImage) -> Result<(), RestoreError> {
        let path = match (&self.output, &self.input) {
            (Some(output), _) => output.clone(),
            (None, Some(input)) => default_output_name(input, &image),
            (None, None) => default_output_name(Path::new("image"), &image),
        };
        std::fs::write(&path, &image.bytes)
            .map_err(|e| RestoreError::display(format!("Failed to write {:?}: {}", path, e)))?;
        log::info!("Wrote {} bytes ({}) to {:?}", image.len(), image.mime(), path);
        self.written = Some(path);
        Ok(())
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

/// Blocking reqwest transport.
#[derive(Debug, Clone, Default)]
pub struct BlockingTransport {
    client: reqwest::blocking::Client,
}

impl BlockingTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A reqwest response whose body has not been read.
pub struct BlockingResponse(reqwest::blocking::Response);

fn header_string(
    response: &reqwest::blocking::Response,
    name: reqwest::header::HeaderName,
) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

impl TransportResponse for BlockingResponse {
    fn status(&self) -> u16 {
        self.0.status().as_u16()
    }

    async fn into_image(self) -> Result<ResponseImage, RestoreError> {
        let content_type = header_string(&self.0, CONTENT_TYPE);
        let disposition = header_string(&self.0, CONTENT_DISPOSITION);
        let bytes = self
            .0
            .bytes()
            .map_err(|e| RestoreError::response(e.to_string()))?;

        Ok(ResponseImage::new(bytes.to_vec())
            .with_content_type(content_type)
            .with_disposition(disposition.as_deref()))
    }
}

impl RestoreTransport for BlockingTransport {
    type Response = BlockingResponse;

    async fn send(&self, request: RestoreRequest) -> Result<BlockingResponse, RestoreError> {
        let RestoreRequest { url, payload } = request;
        let content_type = payload.file.content_type().to_string();
        let part = Part::bytes(payload.file.bytes)
            .file_name(payload.file.name)
            .mime_str(&content_type)
            .map_err(|e| RestoreError::payload(e.to_string()))?;
        let form = Form::new().part(payload.field_name, part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .map_err(|e| RestoreError::network(e.to_string()))?;

        log::debug!("POST {} -> HTTP {}", url, response.status());
        Ok(BlockingResponse(response))
    }
}
