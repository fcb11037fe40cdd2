//! Backend trait and the in-process reference backend.

use crate::nv_tree::NativeView;
use crate::raw_events::{RawEvent, RawEventKind};
use crate::view::ViewId;
use cgmath::Point2;
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

/// A backend implementation.
///
/// Backends are platform UI systems abstracted to a common interface: they realize native views
/// on screen and report the input events that land on them. View identifiers cross the boundary
/// unchanged; a backend keys whatever it allocates per view by [`ViewId`].
pub trait Backend {
    /// Error type.
    type Error: std::error::Error;

    /// Creates a new view. The id is not in use.
    fn create_view(&mut self, id: ViewId, view: NativeView) -> Result<(), Self::Error>;

    /// Updates an existing view's content.
    fn update_view(&mut self, id: ViewId, view: NativeView) -> Result<(), Self::Error>;

    /// Sets an existing view's subviews, in order. All listed views exist.
    fn set_subviews(&mut self, id: ViewId, subviews: &[ViewId]) -> Result<(), Self::Error>;

    /// Removes a view. Its subviews have already been removed.
    fn remove_view(&mut self, id: ViewId) -> Result<(), Self::Error>;

    /// Installs a view as the root of the window content.
    fn set_root(&mut self, id: ViewId) -> Result<(), Self::Error>;

    /// Returns the next input event from the queue.
    ///
    /// This method may be called frequently in quick succession.
    fn poll_event(&mut self) -> Result<Option<RawEvent>, Self::Error>;
}

/// Errors reported by [`MemoryBackend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("unknown native view: {0:?}")]
    UnknownView(ViewId),
}

/// A realized view held by a [`MemoryBackend`].
#[derive(Debug)]
struct MemoryNode {
    view: NativeView,
    subviews: Vec<ViewId>,
}

/// A retained in-process backend.
///
/// Holds realized native views in a plain map instead of putting anything on screen. Serves as
/// the reference implementation of [`Backend`] and as the way tests observe what would be
/// rendered; input events are injected with [`push_pointer`](MemoryBackend::push_pointer).
#[derive(Debug)]
pub struct MemoryBackend {
    nodes: HashMap<ViewId, MemoryNode>,
    root: Option<ViewId>,
    events: VecDeque<RawEvent>,
}

impl MemoryBackend {
    pub fn new() -> MemoryBackend {
        MemoryBackend {
            nodes: HashMap::new(),
            root: None,
            events: VecDeque::new(),
        }
    }

    /// Queues a pointer press on the given view.
    pub fn push_pointer(&mut self, view: ViewId, location: Point2<f64>) {
        self.events.push_back(RawEvent {
            view,
            kind: RawEventKind::PointerDown { location },
        });
    }

    /// The installed root view, if any.
    pub fn root(&self) -> Option<ViewId> {
        self.root
    }

    /// The realized content of a view.
    pub fn view(&self, id: ViewId) -> Option<&NativeView> {
        self.nodes.get(&id).map(|node| &node.view)
    }

    /// The subviews of a view, in order.
    pub fn subviews(&self, id: ViewId) -> &[ViewId] {
        self.nodes
            .get(&id)
            .map(|node| &node.subviews[..])
            .unwrap_or(&[])
    }

    /// Iterates over all realized views in no particular order.
    pub fn views(&self) -> impl Iterator<Item = (ViewId, &NativeView)> + '_ {
        self.nodes.iter().map(|(id, node)| (*id, &node.view))
    }
}

impl Backend for MemoryBackend {
    type Error = MemoryError;

    fn create_view(&mut self, id: ViewId, view: NativeView) -> Result<(), MemoryError> {
        self.nodes.insert(
            id,
            MemoryNode {
                view,
                subviews: Vec::new(),
            },
        );
        Ok(())
    }

    fn update_view(&mut self, id: ViewId, view: NativeView) -> Result<(), MemoryError> {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.view = view;
                Ok(())
            }
            None => Err(MemoryError::UnknownView(id)),
        }
    }

    fn set_subviews(&mut self, id: ViewId, subviews: &[ViewId]) -> Result<(), MemoryError> {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.subviews = subviews.to_vec();
                Ok(())
            }
            None => Err(MemoryError::UnknownView(id)),
        }
    }

    fn remove_view(&mut self, id: ViewId) -> Result<(), MemoryError> {
        match self.nodes.remove(&id) {
            Some(_) => {
                if self.root == Some(id) {
                    self.root = None;
                }
                Ok(())
            }
            None => Err(MemoryError::UnknownView(id)),
        }
    }

    fn set_root(&mut self, id: ViewId) -> Result<(), MemoryError> {
        if !self.nodes.contains_key(&id) {
            return Err(MemoryError::UnknownView(id));
        }
        self.root = Some(id);
        Ok(())
    }

    fn poll_event(&mut self) -> Result<Option<RawEvent>, MemoryError> {
        Ok(self.events.pop_front())
    }
}
