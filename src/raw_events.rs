//! Raw input events as supplied by a backend.

use crate::view::ViewId;
use cgmath::Point2;

/// An input event targeted at a native view.
///
/// Backends resolve hit-testing themselves and report the native view the
/// event landed on; delivery to handlers (including bubbling) happens in the
/// view tree.
#[derive(Debug, Clone)]
pub struct RawEvent {
    /// The native view the event is targeted at.
    pub view: ViewId,
    pub kind: RawEventKind,
}

#[derive(Debug, Clone)]
pub enum RawEventKind {
    /// A pointer was pressed inside the view.
    PointerDown { location: Point2<f64> },
}
