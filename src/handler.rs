//! The upload-and-restore operation.
//!
//! One submission moves through `Idle → InFlight → Idle`:
//!
//! 1. Without a selected file the user is alerted and nothing else happens.
//! 2. Otherwise the submit control is disabled and the loader shown.
//! 3. The file is read and posted as multipart under the configured field.
//! 4. A 2xx body is shown as the restored image; anything else is alerted.
//! 5. The control is re-enabled and the loader hidden, whatever happened,
//!    including when the submit future is dropped before it completes.

use std::cell::Cell;
use std::ops::{Deref, DerefMut};

use web_time::Instant;

use crate::config::RestoreConfig;
use crate::error::RestoreError;
use crate::model::{RestoreRequest, UiState, UploadPayload};
use crate::transport::{RestoreTransport, TransportResponse};
use crate::view::{FileSelection, RestoreView};

/// Phase of the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    InFlight,
}

/// What a successful submission displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreOutcome {
    /// Size of the restored image in bytes
    pub bytes: usize,
    /// Content type the image was displayed with
    pub content_type: String,
    /// File name announced by the server, if any
    pub file_name: Option<String>,
}

/// Holds the view for the duration of a submission.
///
/// Raises the UI flags on acquire. On drop, including when the submit future
/// is cancelled mid-request, the flags go back to idle and the handler
/// leaves the in-flight phase.
struct InFlightGuard<'a, V: RestoreView> {
    flag: &'a Cell<bool>,
    view: &'a mut V,
}

impl<'a, V: RestoreView> InFlightGuard<'a, V> {
    fn acquire(flag: &'a Cell<bool>, view: &'a mut V) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        log::debug!("Phase: Idle -> InFlight");
        view.apply_ui_state(UiState::IN_FLIGHT);
        Some(Self { flag, view })
    }
}

impl<V: RestoreView> Deref for InFlightGuard<'_, V> {
    type Target = V;

    fn deref(&self) -> &V {
        self.view
    }
}

impl<V: RestoreView> DerefMut for InFlightGuard<'_, V> {
    fn deref_mut(&mut self) -> &mut V {
        self.view
    }
}

impl<V: RestoreView> Drop for InFlightGuard<'_, V> {
    fn drop(&mut self) {
        self.view.apply_ui_state(UiState::IDLE);
        self.flag.set(false);
        log::debug!("Phase: InFlight -> Idle");
    }
}

/// Submits the selected image and displays the restored result.
pub struct RestoreHandler<T: RestoreTransport> {
    transport: T,
    config: RestoreConfig,
    in_flight: Cell<bool>,
}

impl<T: RestoreTransport> RestoreHandler<T> {
    pub fn new(transport: T, config: RestoreConfig) -> Self {
        Self {
            transport,
            config,
            in_flight: Cell::new(false),
        }
    }

    pub fn config(&self) -> &RestoreConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn phase(&self) -> Phase {
        if self.in_flight.get() {
            Phase::InFlight
        } else {
            Phase::Idle
        }
    }

    /// Run one submission against `view`.
    ///
    /// By the time this returns the user has already been told about any
    /// failure and the UI flags are back to idle. The returned error is for
    /// the caller's own bookkeeping.
    ///
    /// A call made while another submission is in flight is rejected with
    /// [`RestoreError::AlreadyInFlight`] without touching the view.
    pub async fn submit<V: RestoreView>(&self, view: &mut V) -> Result<RestoreOutcome, RestoreError> {
        let Some(selection) = view.selected_file() else {
            log::debug!("Submit without a selected file");
            let err = RestoreError::NoFileSelected;
            view.alert(&err.user_message());
            return Err(err);
        };

        let selection_name = selection.name();
        let Some(mut guard) = InFlightGuard::acquire(&self.in_flight, view) else {
            log::warn!(
                "Ignoring submission of '{}': a restoration is already in flight",
                selection_name
            );
            return Err(RestoreError::AlreadyInFlight);
        };

        let started = Instant::now();
        let result = self.restore(selection, &mut *guard).await;

        match &result {
            Ok(outcome) => log::info!(
                "Restored image displayed: {} bytes ({}) in {:.0?}",
                outcome.bytes,
                outcome.content_type,
                started.elapsed()
            ),
            Err(err) => {
                log::error!("Restoration failed after {:.0?}: {}", started.elapsed(), err);
                guard.alert(&err.user_message());
            }
        }

        // Flags reset here, or wherever the future is dropped
        drop(guard);

        result
    }

    async fn restore<S, V>(&self, selection: S, view: &mut V) -> Result<RestoreOutcome, RestoreError>
    where
        S: FileSelection,
        V: RestoreView,
    {
        let file = selection.read().await?;
        let payload = UploadPayload::with_field(self.config.field_name.clone(), file);
        let request = RestoreRequest {
            url: self.config.request_url(),
            payload,
        };

        log::info!(
            "POST {} ('{}', {} bytes, {})",
            request.url,
            request.payload.file.name,
            request.payload.file.len(),
            request.payload.file.content_type()
        );

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            log::warn!("Server answered HTTP {}", response.status());
            return Err(RestoreError::RestorationFailed {
                status: response.status(),
            });
        }

        let image = response.into_image().await?;
        let outcome = RestoreOutcome {
            bytes: image.len(),
            content_type: image.mime().to_string(),
            file_name: image.file_name.clone(),
        };
        view.show_image(image)?;

        Ok(outcome)
    }
}
