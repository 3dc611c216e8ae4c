//! Global constants for the photo restoration client

/// Path of the restoration endpoint on the server
pub const RESTORE_ENDPOINT: &str = "/restore";

/// Multipart field name the server reads the image from
pub const UPLOAD_FIELD_NAME: &str = "file";

/// Fallback content type when neither the host nor the bytes tell us one
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// CSS class that hides the loading indicator
pub const HIDDEN_CLASS: &str = "hidden";

/// Alert shown when the form is submitted without a file
pub const MSG_NO_FILE: &str = "Please upload an image first!";

/// Error message for a non-success HTTP status
pub const MSG_RESTORATION_FAILED: &str = "Image restoration failed";

/// Prefix prepended to error messages shown to the user
pub const ALERT_ERROR_PREFIX: &str = "Error: ";

/// Prefix the server uses for restored file names
pub const RESTORED_PREFIX: &str = "restored_";

/// Element ids of the upload page
pub mod elements {
    pub const FORM: &str = "uploadForm";
    pub const FILE_INPUT: &str = "fileInput";
    pub const SUBMIT_BUTTON: &str = "restoreBtn";
    pub const LOADER: &str = "loader";
    pub const IMAGE: &str = "restoredImage";
}
