//! Network seam of the restore handler.

use crate::error::RestoreError;
use crate::model::{ResponseImage, RestoreRequest};

/// A response whose status is known but whose body has not been read.
#[expect(async_fn_in_trait)]
pub trait TransportResponse {
    fn status(&self) -> u16;

    /// Whether the status is in the 2xx range.
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status())
    }

    /// Consume the body as an image.
    async fn into_image(self) -> Result<ResponseImage, RestoreError>;
}

/// Sends one multipart upload and hands back the raw response.
///
/// Implementations report transport failures (unreachable host, aborted
/// connection) as errors and every HTTP status, including 4xx/5xx, as a
/// response. No retries, no timeout.
#[expect(async_fn_in_trait)]
pub trait RestoreTransport {
    type Response: TransportResponse;

    async fn send(&self, request: RestoreRequest) -> Result<Self::Response, RestoreError>;
}
