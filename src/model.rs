//! Data carried through a single restoration round trip.

use crate::constants::{FALLBACK_MIME, UPLOAD_FIELD_NAME};

/// Guess a MIME type from the leading bytes of an image.
pub fn sniff_mime(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|format| format.to_mime_type())
}

/// The file the user picked, read into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Original file name, sent as the multipart filename
    pub name: String,
    /// Content type reported by the host (empty if unknown)
    pub mime: String,
    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Content type to send with the upload.
    ///
    /// Browsers leave `type` empty for unknown extensions, so fall back to
    /// sniffing the bytes, then to `application/octet-stream`.
    pub fn content_type(&self) -> &str {
        if !self.mime.is_empty() {
            return &self.mime;
        }
        sniff_mime(&self.bytes).unwrap_or(FALLBACK_MIME)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Multipart body of one submission: a single file under a fixed field name.
///
/// Built fresh for every submission and dropped once the request settles.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    pub field_name: String,
    pub file: SelectedFile,
}

impl UploadPayload {
    /// Payload using the default `file` field.
    pub fn new(file: SelectedFile) -> Self {
        Self::with_field(UPLOAD_FIELD_NAME, file)
    }

    pub fn with_field(field_name: impl Into<String>, file: SelectedFile) -> Self {
        Self {
            field_name: field_name.into(),
            file,
        }
    }
}

/// Request handed to a transport.
#[derive(Debug, Clone)]
pub struct RestoreRequest {
    /// Absolute or same-origin URL to POST to
    pub url: String,
    pub payload: UploadPayload,
}

/// Image bytes returned by a successful restoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseImage {
    pub bytes: Vec<u8>,
    /// `Content-Type` header of the response, if any
    pub content_type: Option<String>,
    /// File name from a `Content-Disposition` header, if any
    pub file_name: Option<String>,
}

impl ResponseImage {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: None,
            file_name: None,
        }
    }

    pub fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type.filter(|ct| !ct.is_empty());
        self
    }

    /// Set the file name from a raw `Content-Disposition` header value.
    pub fn with_disposition(mut self, disposition: Option<&str>) -> Self {
        self.file_name = disposition.and_then(parse_disposition_filename);
        self
    }

    /// Content type used to render the image.
    pub fn mime(&self) -> &str {
        match &self.content_type {
            Some(ct) => ct,
            None => sniff_mime(&self.bytes).unwrap_or(FALLBACK_MIME),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Extract the `filename` parameter from a `Content-Disposition` value.
///
/// Handles quoted and bare values. Path components are stripped so the
/// result is always a plain file name.
pub fn parse_disposition_filename(header: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let value = value.trim().trim_matches('"');
        let name = value.rsplit(['/', '\\']).next().unwrap_or(value);
        (!name.is_empty()).then(|| name.to_string())
    })
}

/// The two observable UI flags.
///
/// Both are true only while a request is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    pub control_disabled: bool,
    pub loading_visible: bool,
}

impl UiState {
    pub const IDLE: Self = Self {
        control_disabled: false,
        loading_visible: false,
    };

    pub const IN_FLIGHT: Self = Self {
        control_disabled: true,
        loading_visible: true,
    };

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}
