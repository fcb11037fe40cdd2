//! Events.

use cgmath::Point2;
use core::fmt;
use parking_lot::Mutex;
use std::sync::Arc;

/// An event being delivered to a view's handler.
pub struct Event<Type> {
    data: Type,
}

impl<Type> Event<Type> {
    pub(crate) fn new(data: Type) -> Event<Type> {
        Event { data }
    }
}

/// List of event types.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventTypeId {
    Pointer = 0,
}

impl EventTypeId {
    // smallest and largest values in Ord
    pub(crate) const MIN: Self = EventTypeId::Pointer;
    pub(crate) const MAX: Self = EventTypeId::Pointer;
}

pub trait EventType: fmt::Debug + From<Event<Self>> {
    fn type_id() -> EventTypeId;
}

/// A pointer press event.
#[derive(Debug, Clone, Copy)]
pub struct Pointer {
    /// Event location in the parent coordinate system.
    pub location: Point2<f64>,

    /// Event location in the window coordinate system.
    pub window_location: Point2<f64>,
}

impl EventType for Pointer {
    fn type_id() -> EventTypeId {
        EventTypeId::Pointer
    }
}

impl From<Event<Pointer>> for Pointer {
    fn from(this: Event<Pointer>) -> Self {
        this.data
    }
}

pub struct EventHandler<Type>(Arc<Mutex<dyn FnMut(Event<Type>) + Send>>);

impl<T> Clone for EventHandler<T> {
    fn clone(&self) -> Self {
        EventHandler(Arc::clone(&self.0))
    }
}

impl<T: EventType> EventHandler<T> {
    pub fn new<F: 'static + FnMut(Event<T>) + Send>(handler: F) -> Self {
        EventHandler(Arc::new(Mutex::new(handler)))
    }

    pub(crate) fn invoke(&self, event: Event<T>) {
        (&mut *self.0.lock())(event)
    }
}

impl<T: EventType> fmt::Debug for EventHandler<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EventHandler<{:?}>", T::type_id())
    }
}
