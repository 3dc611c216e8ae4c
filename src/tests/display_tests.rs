//! Tests for image handle ownership.

use std::cell::RefCell;
use std::rc::Rc;

use crate::display::{DisplaySlot, ImageSurface};
use crate::error::RestoreError;
use crate::model::ResponseImage;
use crate::tests::mock::{MockSurface, png_bytes};

fn image() -> ResponseImage {
    ResponseImage::new(png_bytes())
}

#[test]
fn test_show_assigns_source() {
    let mut slot = DisplaySlot::new(MockSurface::default());

    slot.show(&image()).expect("show should succeed");

    assert_eq!(slot.current(), Some(&1));
    assert_eq!(slot.surface().sources, vec![1]);
    assert!(slot.surface().released.is_empty());
}

#[test]
fn test_superseded_handle_released_once() {
    let mut slot = DisplaySlot::new(MockSurface::default());

    for _ in 0..3 {
        slot.show(&image()).expect("show should succeed");
    }

    assert_eq!(slot.surface().created, vec![1, 2, 3]);
    assert_eq!(slot.surface().sources, vec![1, 2, 3]);
    assert_eq!(slot.surface().released, vec![1, 2]);
    assert_eq!(slot.current(), Some(&3));
}

#[test]
fn test_clear_releases_current() {
    let mut slot = DisplaySlot::new(MockSurface::default());
    slot.show(&image()).expect("show should succeed");

    slot.clear();

    assert!(slot.current().is_none());
    assert_eq!(slot.surface().released, vec![1]);

    slot.show(&image()).expect("show should succeed");
    assert_eq!(slot.current(), Some(&2));
}

/// Surface whose release log outlives the slot.
struct SharedLogSurface {
    released: Rc<RefCell<Vec<u32>>>,
    next_id: u32,
}

impl ImageSurface for SharedLogSurface {
    type Handle = u32;

    fn create_handle(&mut self, _image: &ResponseImage) -> Result<u32, RestoreError> {
        self.next_id += 1;
        Ok(self.next_id)
    }

    fn set_source(&mut self, _handle: &u32) {}

    fn release(&mut self, handle: u32) {
        self.released.borrow_mut().push(handle);
    }
}

#[test]
fn test_drop_releases_current() {
    let released = Rc::new(RefCell::new(Vec::new()));
    {
        let mut slot = DisplaySlot::new(SharedLogSurface {
            released: Rc::clone(&released),
            next_id: 0,
        });
        slot.show(&image()).expect("show should succeed");
        slot.show(&image()).expect("show should succeed");
        assert_eq!(*released.borrow(), vec![1]);
    }

    assert_eq!(*released.borrow(), vec![1, 2]);
}

#[test]
fn test_create_failure_leaves_slot_untouched() {
    let mut slot = DisplaySlot::new(MockSurface::failing());

    assert!(slot.show(&image()).is_err());
    assert!(slot.current().is_none());
    assert!(slot.surface().sources.is_empty());

    slot.show(&image()).expect("second attempt succeeds");
    assert_eq!(slot.current(), Some(&1));
}

#[test]
fn test_clear_is_idempotent() {
    let mut slot = DisplaySlot::new(MockSurface::default());
    slot.show(&image()).expect("show should succeed");

    slot.clear();
    slot.clear();

    assert_eq!(slot.surface().released, vec![1]);
}
