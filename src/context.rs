use crate::view::ViewId;
use core::any::Any;
use core::fmt;
use crossbeam::channel::Sender;

/// A message addressed to a view's state.
pub(crate) type Envelope = (ViewId, Box<dyn Any + Send>);

/// Handle given to a view when its state is created.
pub struct Context {
    view: ViewId,
    messages: Sender<Envelope>,
}

impl Context {
    pub(crate) fn new(view: ViewId, messages: Sender<Envelope>) -> Context {
        Context { view, messages }
    }

    /// Returns a messenger that sends messages back to this view's state.
    ///
    /// Messengers are cheap to clone and may be moved into event handler closures; this is how
    /// user interactions reach the state that owns the data they mutate.
    pub fn messenger(&self) -> Messenger {
        Messenger {
            view: self.view,
            messages: self.messages.clone(),
        }
    }
}

/// Sends messages to the state of one specific view.
///
/// Messages are queued and handled by [`State::handle_message`](crate::State::handle_message)
/// during the next tree update. Messages to a view that has since disappeared are dropped.
pub struct Messenger {
    view: ViewId,
    messages: Sender<Envelope>,
}

impl Messenger {
    pub fn send<M: Any + Send>(&self, message: M) {
        // the tree holds the receiver for as long as it lives
        let _ = self.messages.send((self.view, Box::new(message)));
    }
}

#[cfg(test)]
impl Messenger {
    /// A messenger wired to a dropped channel; sends go nowhere. For state tests.
    pub(crate) fn detached() -> Messenger {
        let (messages, _) = crossbeam::channel::unbounded();
        Messenger {
            view: ViewId::new(),
            messages,
        }
    }
}

impl Clone for Messenger {
    fn clone(&self) -> Self {
        Messenger {
            view: self.view,
            messages: self.messages.clone(),
        }
    }
}

impl fmt::Debug for Messenger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Messenger({:?})", self.view)
    }
}
