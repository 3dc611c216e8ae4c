//! photo-restore - client for an image restoration server
//!
//! Posts a user-selected image to the server's restore endpoint and shows the
//! restored image it answers with. Runs in the browser (bound to the upload
//! form of the page) and as a native command-line client.

pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod handler;
pub mod model;
pub mod transport;
pub mod view;

pub use config::{LogLevel, RestoreConfig};
pub use display::{DisplaySlot, ImageSurface};
pub use error::RestoreError;
pub use handler::{Phase, RestoreHandler, RestoreOutcome};
pub use model::{ResponseImage, RestoreRequest, SelectedFile, UiState, UploadPayload};
pub use transport::{RestoreTransport, TransportResponse};
pub use view::{FileSelection, RestoreView};

// Native host: disk files, terminal output, blocking HTTP
#[cfg(not(target_arch = "wasm32"))]
pub mod native;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
pub mod wasm_dom;
#[cfg(target_arch = "wasm32")]
pub mod wasm_fetch;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;

#[cfg(test)]
mod tests;
