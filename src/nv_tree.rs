use crate::backend::Backend;
use crate::color::Color;
use crate::image::ImageScale;
use crate::rect::Rect;
use crate::view::ViewId;
use std::collections::HashMap;
use thiserror::Error;

/// The serialized form of a native view, as handed to backends.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeView {
    Layer {
        bounds: Rect,
        background: Color,
        corner_radius: f64,
        opacity: f64,
    },
    Text {
        content: String,
        color: Color,
        opacity: f64,
    },
    Image {
        symbol: String,
        scale: ImageScale,
        tint: Option<Color>,
    },
}

/// Patches for the NV tree.
#[derive(Debug, Clone)]
pub enum Patch {
    /// Sets the root view.
    SetRoot(ViewId),
    /// Updates or creates a view.
    Update(ViewId, NativeView),
    /// Deletes and re-creates a view, dropping its subviews.
    Replace(ViewId, NativeView),
    /// Sets a view's subviews.
    Subviews(ViewId, Vec<ViewId>),
    /// Removes a view and its subviews.
    /// **Does not remove the view from the superview's subview references.**
    Remove(ViewId),
}

/// Errors that may occur when running a patch.
#[derive(Debug, Error)]
pub enum PatchError<E> {
    #[error("no such view: {0:?}")]
    NoSuchView(ViewId),
    #[error("view {0:?} cannot be one of its own subviews")]
    Cycle(ViewId),
    #[error("backend error: {0}")]
    Backend(E),
}

#[derive(Debug)]
struct NVTNode {
    view: NativeView,
    superview: Option<ViewId>,
    subviews: Vec<ViewId>,
}

/// The native-view tree; keeps the backend in sync with the patches emitted by a
/// [`ViewTree`](crate::ViewTree) and mirrors the resulting hierarchy for validation.
#[derive(Debug)]
pub struct NVTree<B: Backend> {
    backend: B,
    nodes: HashMap<ViewId, NVTNode>,
    root: Option<ViewId>,
}

impl<B: Backend> NVTree<B> {
    pub fn new(backend: B) -> NVTree<B> {
        NVTree {
            backend,
            nodes: HashMap::new(),
            root: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Patches the view tree.
    pub fn patch(&mut self, patch: Patch) -> Result<(), PatchError<B::Error>> {
        match patch {
            Patch::SetRoot(id) => self.set_root(id),
            Patch::Update(id, view) => self.update_view(id, view),
            Patch::Replace(id, view) => self.replace_view(id, view),
            Patch::Subviews(id, subviews) => self.set_subviews(id, subviews),
            Patch::Remove(id) => self.remove_view(id),
        }
    }

    /// Installs a view as the backend's root view.
    fn set_root(&mut self, id: ViewId) -> Result<(), PatchError<B::Error>> {
        if !self.nodes.contains_key(&id) {
            return Err(PatchError::NoSuchView(id));
        }
        self.backend.set_root(id).map_err(PatchError::Backend)?;
        self.root = Some(id);
        Ok(())
    }

    /// Updates or adds a view.
    fn update_view(&mut self, id: ViewId, view: NativeView) -> Result<(), PatchError<B::Error>> {
        if let Some(node) = self.nodes.get_mut(&id) {
            self.backend
                .update_view(id, view.clone())
                .map_err(PatchError::Backend)?;
            node.view = view;
        } else {
            self.backend
                .create_view(id, view.clone())
                .map_err(PatchError::Backend)?;
            self.nodes.insert(
                id,
                NVTNode {
                    view,
                    superview: None,
                    subviews: Vec::new(),
                },
            );
        }
        Ok(())
    }

    /// Replaces a view's content in place, dropping the subtree hanging off it.
    fn replace_view(&mut self, id: ViewId, view: NativeView) -> Result<(), PatchError<B::Error>> {
        let subviews = match self.nodes.get_mut(&id) {
            Some(node) => std::mem::replace(&mut node.subviews, Vec::new()),
            None => return Err(PatchError::NoSuchView(id)),
        };
        for subview in subviews {
            self.remove_view(subview)?;
        }
        self.update_view(id, view)
    }

    /// Removes a view and its subviews.
    /// Does not remove the view from the superview's subviews list.
    fn remove_view(&mut self, id: ViewId) -> Result<(), PatchError<B::Error>> {
        if let Some(node) = self.nodes.remove(&id) {
            for subview in node.subviews {
                self.remove_view(subview)?;
            }
            self.backend.remove_view(id).map_err(PatchError::Backend)?;
            if self.root == Some(id) {
                self.root = None;
            }
            Ok(())
        } else {
            Err(PatchError::NoSuchView(id))
        }
    }

    /// Sets a view's subviews wholesale.
    fn set_subviews(
        &mut self,
        id: ViewId,
        subviews: Vec<ViewId>,
    ) -> Result<(), PatchError<B::Error>> {
        if subviews.iter().any(|subview| *subview == id) {
            return Err(PatchError::Cycle(id));
        }
        if !self.nodes.contains_key(&id) {
            return Err(PatchError::NoSuchView(id));
        }
        for subview in &subviews {
            if !self.nodes.contains_key(subview) {
                return Err(PatchError::NoSuchView(*subview));
            }
        }

        self.backend
            .set_subviews(id, &subviews)
            .map_err(PatchError::Backend)?;

        for subview in &subviews {
            self.nodes.get_mut(subview).unwrap().superview = Some(id);
        }
        self.nodes.get_mut(&id).unwrap().subviews = subviews;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn text(content: &str) -> NativeView {
        NativeView::Text {
            content: content.into(),
            color: Color::BLACK,
            opacity: 1.,
        }
    }

    fn layer() -> NativeView {
        NativeView::Layer {
            bounds: Rect::zero(),
            background: Color::default(),
            corner_radius: 0.,
            opacity: 1.,
        }
    }

    #[test]
    fn test_patch_roundtrip() {
        let mut tree = NVTree::new(MemoryBackend::new());
        let parent = ViewId::new();
        let child = ViewId::new();

        tree.patch(Patch::Update(parent, layer())).unwrap();
        tree.patch(Patch::Update(child, text("hi"))).unwrap();
        tree.patch(Patch::Subviews(parent, vec![child])).unwrap();
        tree.patch(Patch::SetRoot(parent)).unwrap();

        assert_eq!(tree.backend().root(), Some(parent));
        assert_eq!(tree.backend().subviews(parent), &[child][..]);
        assert_eq!(tree.backend().view(child), Some(&text("hi")));

        tree.patch(Patch::Update(child, text("hello"))).unwrap();
        assert_eq!(tree.backend().view(child), Some(&text("hello")));
    }

    #[test]
    fn test_remove_takes_the_subtree_with_it() {
        let mut tree = NVTree::new(MemoryBackend::new());
        let parent = ViewId::new();
        let child = ViewId::new();

        tree.patch(Patch::Update(parent, layer())).unwrap();
        tree.patch(Patch::Update(child, text("hi"))).unwrap();
        tree.patch(Patch::Subviews(parent, vec![child])).unwrap();

        tree.patch(Patch::Remove(parent)).unwrap();
        assert!(tree.nodes.is_empty());
        assert_eq!(tree.backend().view(parent), None);
        assert_eq!(tree.backend().view(child), None);
    }

    #[test]
    fn test_replace_drops_subviews_but_keeps_the_view() {
        let mut tree = NVTree::new(MemoryBackend::new());
        let parent = ViewId::new();
        let child = ViewId::new();

        tree.patch(Patch::Update(parent, layer())).unwrap();
        tree.patch(Patch::Update(child, text("hi"))).unwrap();
        tree.patch(Patch::Subviews(parent, vec![child])).unwrap();

        tree.patch(Patch::Replace(parent, text("replaced"))).unwrap();
        assert_eq!(tree.backend().view(parent), Some(&text("replaced")));
        assert_eq!(tree.backend().view(child), None);
        assert!(tree.nodes[&parent].subviews.is_empty());
    }

    #[test]
    fn test_bad_patches_error() {
        let mut tree = NVTree::new(MemoryBackend::new());
        let id = ViewId::new();

        match tree.patch(Patch::Remove(id)) {
            Err(PatchError::NoSuchView(bad)) => assert_eq!(bad, id),
            other => panic!("expected NoSuchView, got {:?}", other),
        }

        tree.patch(Patch::Update(id, layer())).unwrap();
        match tree.patch(Patch::Subviews(id, vec![id])) {
            Err(PatchError::Cycle(bad)) => assert_eq!(bad, id),
            other => panic!("expected Cycle, got {:?}", other),
        }
    }
}
