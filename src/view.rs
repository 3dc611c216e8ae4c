//! The UI surface the restore handler drives.
//!
//! Hosts implement [`RestoreView`] over whatever controls they have: the DOM
//! elements of the upload page in the browser, stderr and an output file on
//! the command line, or a recording double in tests.

use crate::error::RestoreError;
use crate::model::{ResponseImage, SelectedFile, UiState};

/// A file chosen by the user that has not been read yet.
///
/// Reading is deferred until the handler has entered the in-flight state so
/// read failures go through the same cleanup as network failures.
#[expect(async_fn_in_trait)]
pub trait FileSelection {
    /// Name shown in logs before the contents are read.
    fn name(&self) -> String;

    /// Read the file into memory.
    async fn read(self) -> Result<SelectedFile, RestoreError>;
}

/// An in-memory file is already read.
impl FileSelection for SelectedFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn read(self) -> Result<SelectedFile, RestoreError> {
        Ok(self)
    }
}

/// The set of controls one restoration needs.
pub trait RestoreView {
    type Selection: FileSelection;

    /// Current selection of the file input, if any.
    fn selected_file(&self) -> Option<Self::Selection>;

    fn set_control_disabled(&mut self, disabled: bool);

    fn set_loading_visible(&mut self, visible: bool);

    /// Show the restored image, replacing whatever was shown before.
    fn show_image(&mut self, image: ResponseImage) -> Result<(), RestoreError>;

    /// Tell the user something went wrong.
    fn alert(&mut self, message: &str);

    /// Apply both UI flags at once.
    fn apply_ui_state(&mut self, state: UiState) {
        self.set_control_disabled(state.control_disabled);
        self.set_loading_visible(state.loading_visible);
    }
}
