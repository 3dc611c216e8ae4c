//! Recording test doubles for the view, transport and image surface.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::display::{DisplaySlot, ImageSurface};
use crate::error::RestoreError;
use crate::model::{ResponseImage, RestoreRequest, SelectedFile, UiState};
use crate::transport::{RestoreTransport, TransportResponse};
use crate::view::{FileSelection, RestoreView};

/// A small PNG signature followed by padding, enough for format sniffing.
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];
    bytes.extend_from_slice(&[0; 8]);
    bytes
}

pub fn sample_file() -> SelectedFile {
    SelectedFile::new("damaged.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff, 0xe0, 1, 2, 3])
}

/// Future that is pending on its first poll, letting a test observe the
/// handler mid-request.
#[derive(Default)]
struct YieldOnce(bool);

impl Future for YieldOnce {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            return Poll::Ready(());
        }
        self.0 = true;
        cx.waker().wake_by_ref();
        Poll::Pending
    }
}

/// What the mock server does with the next request.
#[derive(Debug, Clone)]
pub enum Scripted {
    Respond {
        status: u16,
        body: Vec<u8>,
        content_type: Option<String>,
    },
    BodyFails(String),
    Reject(String),
}

impl Scripted {
    pub fn ok(body: Vec<u8>) -> Self {
        Scripted::Respond {
            status: 200,
            body,
            content_type: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Scripted::Respond {
            status,
            body: b"Internal Server Error".to_vec(),
            content_type: Some("text/plain".to_string()),
        }
    }
}

pub struct MockResponse {
    status: u16,
    body: Result<Vec<u8>, String>,
    content_type: Option<String>,
    body_reads: std::rc::Rc<Cell<usize>>,
}

impl TransportResponse for MockResponse {
    fn status(&self) -> u16 {
        self.status
    }

    async fn into_image(self) -> Result<ResponseImage, RestoreError> {
        self.body_reads.set(self.body_reads.get() + 1);
        let bytes = self.body.map_err(RestoreError::response)?;
        Ok(ResponseImage::new(bytes).with_content_type(self.content_type))
    }
}

/// Transport that answers from a script and records every request.
#[derive(Default)]
pub struct MockTransport {
    script: RefCell<VecDeque<Scripted>>,
    pub requests: RefCell<Vec<RestoreRequest>>,
    pub body_reads: std::rc::Rc<Cell<usize>>,
    /// Suspend the next request once before answering
    pub pause_once: Cell<bool>,
}

impl MockTransport {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: RefCell::new(script.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl RestoreTransport for MockTransport {
    type Response = MockResponse;

    async fn send(&self, request: RestoreRequest) -> Result<MockResponse, RestoreError> {
        self.requests.borrow_mut().push(request);
        if self.pause_once.replace(false) {
            YieldOnce::default().await;
        }
        let next = self
            .script
            .borrow_mut()
            .pop_front()
            .expect("mock transport ran out of scripted responses");

        match next {
            Scripted::Respond {
                status,
                body,
                content_type,
            } => Ok(MockResponse {
                status,
                body: Ok(body),
                content_type,
                body_reads: self.body_reads.clone(),
            }),
            Scripted::BodyFails(message) => Ok(MockResponse {
                status: 200,
                body: Err(message),
                content_type: None,
                body_reads: self.body_reads.clone(),
            }),
            Scripted::Reject(message) => Err(RestoreError::network(message)),
        }
    }
}

/// Image surface that hands out numbered handles and records releases.
#[derive(Default)]
pub struct MockSurface {
    next_id: u32,
    pub created: Vec<u32>,
    pub sources: Vec<u32>,
    pub released: Vec<u32>,
    pub fail_next: bool,
}

impl MockSurface {
    /// A surface whose next handle creation fails.
    pub fn failing() -> Self {
        Self {
            fail_next: true,
            ..Self::default()
        }
    }
}

impl ImageSurface for MockSurface {
    type Handle = u32;

    fn create_handle(&mut self, _image: &ResponseImage) -> Result<u32, RestoreError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(RestoreError::display("cannot create handle"));
        }
        self.next_id += 1;
        self.created.push(self.next_id);
        Ok(self.next_id)
    }

    fn set_source(&mut self, handle: &u32) {
        self.sources.push(*handle);
    }

    fn release(&mut self, handle: u32) {
        self.released.push(handle);
    }
}

/// Selection handed out by [`MockView`]; reading fails when `error` is set.
pub struct MockSelection {
    file: SelectedFile,
    error: Option<String>,
}

impl FileSelection for MockSelection {
    fn name(&self) -> String {
        self.file.name.clone()
    }

    async fn read(self) -> Result<SelectedFile, RestoreError> {
        match self.error {
            Some(message) => Err(RestoreError::payload(message)),
            None => self.file.read().await,
        }
    }
}

/// View that records every interaction.
pub struct MockView {
    pub file: Option<SelectedFile>,
    /// Error returned when the selected file is read
    pub read_error: Option<String>,
    pub state: UiState,
    pub state_history: Vec<UiState>,
    pub alerts: Vec<String>,
    pub shown: Vec<ResponseImage>,
    pub slot: DisplaySlot<MockSurface>,
}

impl MockView {
    pub fn with_file(file: Option<SelectedFile>) -> Self {
        Self {
            file,
            read_error: None,
            state: UiState::IDLE,
            state_history: Vec::new(),
            alerts: Vec::new(),
            shown: Vec::new(),
            slot: DisplaySlot::new(MockSurface::default()),
        }
    }

    /// Whether the flags were ever raised during the test.
    pub fn ever_in_flight(&self) -> bool {
        self.state_history
            .iter()
            .any(|state| state.control_disabled || state.loading_visible)
    }
}

impl RestoreView for MockView {
    type Selection = MockSelection;

    fn selected_file(&self) -> Option<MockSelection> {
        self.file.clone().map(|file| MockSelection {
            file,
            error: self.read_error.clone(),
        })
    }

    fn set_control_disabled(&mut self, disabled: bool) {
        self.state.control_disabled = disabled;
        self.state_history.push(self.state);
    }

    fn set_loading_visible(&mut self, visible: bool) {
        self.state.loading_visible = visible;
        self.state_history.push(self.state);
    }

    fn show_image(&mut self, image: ResponseImage) -> Result<(), RestoreError> {
        self.slot.show(&image)?;
        self.shown.push(image);
        Ok(())
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
