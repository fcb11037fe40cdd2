use crate::backend::Backend;
use crate::nv_tree::{NVTree, PatchError};
use crate::view::View;
use crate::view_tree::ViewTree;
use std::sync::Arc;

/// Connects a view tree to a backend.
///
/// The host owns the whole pipeline: raw events come out of the backend, handlers turn them into
/// state messages, messages re-render the views that own the state, and the resulting patches go
/// back into the backend. One [`poll`](Host::poll) runs the entire cycle synchronously.
pub struct Host<B: Backend> {
    tree: ViewTree,
    nv_tree: NVTree<B>,
}

impl<B: Backend> Host<B> {
    /// Creates a new host and renders the root view into the backend.
    pub fn new(root: Arc<dyn View>, backend: B) -> Result<Host<B>, PatchError<B::Error>> {
        let mut host = Host {
            tree: ViewTree::new(),
            nv_tree: NVTree::new(backend),
        };
        host.tree.render_root(root);
        host.flush_patches()?;
        Ok(host)
    }

    /// Receives all pending input events, applies the state changes they cause, and flushes the
    /// resulting render updates to the backend.
    pub fn poll(&mut self) -> Result<(), PatchError<B::Error>> {
        loop {
            match self
                .nv_tree
                .backend_mut()
                .poll_event()
                .map_err(PatchError::Backend)?
            {
                Some(event) => self.tree.dispatch_raw(event),
                None => break,
            }
        }
        self.tree.update();
        self.flush_patches()
    }

    fn flush_patches(&mut self) -> Result<(), PatchError<B::Error>> {
        for patch in self.tree.patches() {
            self.nv_tree.patch(patch)?;
        }
        Ok(())
    }

    pub fn backend(&self) -> &B {
        self.nv_tree.backend()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.nv_tree.backend_mut()
    }
}
