//! Ownership of the handle backing the displayed image.
//!
//! A browser object URL keeps its blob alive until it is revoked. The
//! [`DisplaySlot`] holds the handle currently assigned to the image element
//! and releases it once a newer image takes its place, or when the slot is
//! dropped.

use crate::error::RestoreError;
use crate::model::ResponseImage;

/// Something that can turn image bytes into a displayable handle.
pub trait ImageSurface {
    type Handle;

    /// Create a handle for the given image (e.g. `URL.createObjectURL`).
    fn create_handle(&mut self, image: &ResponseImage) -> Result<Self::Handle, RestoreError>;

    /// Point the image element at the handle.
    fn set_source(&mut self, handle: &Self::Handle);

    /// Free a handle that is no longer displayed (e.g. `URL.revokeObjectURL`).
    fn release(&mut self, handle: Self::Handle);
}

/// Tracks the currently displayed handle of an [`ImageSurface`].
pub struct DisplaySlot<S: ImageSurface> {
    surface: S,
    current: Option<S::Handle>,
}

impl<S: ImageSurface> DisplaySlot<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            current: None,
        }
    }

    /// Display `image`, releasing the previously displayed handle.
    ///
    /// If creating the new handle fails the old image stays on screen and
    /// its handle is kept.
    pub fn show(&mut self, image: &ResponseImage) -> Result<(), RestoreError> {
        let handle = self.surface.create_handle(image)?;
        self.surface.set_source(&handle);
        if let Some(previous) = self.current.replace(handle) {
            self.surface.release(previous);
        }
        Ok(())
    }

    pub fn current(&self) -> Option<&S::Handle> {
        self.current.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Release the current handle, leaving the slot empty.
    pub fn clear(&mut self) {
        if let Some(handle) = self.current.take() {
            self.surface.release(handle);
        }
    }
}

impl<S: ImageSurface> Drop for DisplaySlot<S> {
    fn drop(&mut self) {
        self.clear();
    }
}
