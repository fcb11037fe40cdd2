use crate::context::{Context, Envelope};
use crate::events::{Event, EventHandler, EventTypeId, Pointer};
use crate::layer::Layer;
use crate::nv_tree::Patch;
use crate::raw_events::{RawEvent, RawEventKind};
use crate::view::{Fragment, State, View, ViewId};
use core::any::Any;
use crossbeam::channel::{unbounded, Receiver, Sender, TryRecvError};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

/// A node in the view tree.
#[derive(Debug)]
struct TreeNode {
    /// The current view object.
    view: Arc<dyn View>,
    /// If true, this view is a native view.
    is_native: bool,
    /// The immediate superview.
    superview: Option<ViewId>,
    /// The view state.
    state: Box<dyn State>,
    /// An ordered list of all subviews.
    subviews: Vec<ViewId>,
    /// Native descendants as of the last render; only maintained for native views, where it
    /// mirrors the child list last handed to the backend.
    nv_children: Vec<ViewId>,
}

/// A view tree; contains a hierarchy of virtual views and manages rendering and updating.
///
/// Rendering realizes virtual views into tree nodes, diffing against what is already there;
/// anything the backend must learn about comes out of [`patches`](ViewTree::patches). Input
/// events go in through [`dispatch_raw`](ViewTree::dispatch_raw); the state messages they cause
/// are applied by [`update`](ViewTree::update), which re-renders the views whose state changed.
#[derive(Debug)]
pub struct ViewTree {
    nodes: HashMap<ViewId, TreeNode>,
    root: Option<ViewId>,
    /// The native view currently installed as the backend root.
    nv_root: Option<ViewId>,
    patches: VecDeque<Patch>,
    event_handlers: EventHandlers,
    message_send: Sender<Envelope>,
    message_recv: Receiver<Envelope>,
}

impl ViewTree {
    pub fn new() -> ViewTree {
        let (message_send, message_recv) = unbounded();
        ViewTree {
            nodes: HashMap::new(),
            root: None,
            nv_root: None,
            patches: VecDeque::new(),
            event_handlers: EventHandlers::new(),
            message_send,
            message_recv,
        }
    }

    /// Renders a root view, diffing against the previous root render if there was one.
    pub fn render_root(&mut self, view: Arc<dyn View>) {
        let root_id = match self.root {
            Some(id) => id,
            None => {
                let id = ViewId::new();
                self.root = Some(id);
                id
            }
        };

        let nvs = self.diff(root_id, &view);
        if let Some(&nv_root) = nvs.first() {
            if self.nv_root != Some(nv_root) {
                self.nv_root = Some(nv_root);
                self.patches.push_back(Patch::SetRoot(nv_root));
            }
        }
    }

    /// Returns an iterator over available patches.
    ///
    /// Does not drain the queue immediately.
    /// Calling `next` will always remove a patch from the queue.
    pub fn patches(&mut self) -> impl Iterator<Item = Patch> + '_ {
        struct PatchIterator<'a>(&'a mut ViewTree);
        impl<'a> Iterator for PatchIterator<'a> {
            type Item = Patch;
            fn next(&mut self) -> Option<Patch> {
                self.0.patches.pop_front()
            }
        }

        PatchIterator(self)
    }

    /// Delivers a raw input event to the handler closest to its target view.
    ///
    /// Events bubble: if the target has no handler for the event type, its ancestors are tried
    /// in order. Events nobody handles are dropped.
    pub fn dispatch_raw(&self, event: RawEvent) {
        match event.kind {
            RawEventKind::PointerDown { location } => {
                let mut target = Some(event.view);
                while let Some(id) = target {
                    if let Some(handler) = self.event_handlers.pointer(id) {
                        log::trace!("dispatching pointer press on {:?} to {:?}", event.view, id);
                        handler.invoke(Event::new(Pointer {
                            location,
                            window_location: location,
                        }));
                        return;
                    }
                    target = self.nodes.get(&id).and_then(|node| node.superview);
                }
                log::trace!("pointer press on {:?} had no handler", event.view);
            }
        }
    }

    /// Applies all queued state messages, re-rendering the views whose state asked for it.
    pub fn update(&mut self) {
        loop {
            match self.message_recv.try_recv() {
                Ok((view, message)) => {
                    let dirty = match self.nodes.get_mut(&view) {
                        Some(node) => node.state.handle_message(&*message),
                        None => {
                            log::debug!("dropping message for missing view {:?}", view);
                            false
                        }
                    };
                    if dirty {
                        self.render_view(view);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    /// Re-renders one view in place after a state change, then brings the child list of its
    /// nearest native ancestor back in sync in case the set of native descendants changed.
    fn render_view(&mut self, id: ViewId) {
        if !self.nodes.contains_key(&id) {
            return;
        }
        self.render(id);

        let mut ancestor = self.nodes[&id].superview;
        while let Some(a) = ancestor {
            if self.nodes[&a].is_native {
                let mut collected = Vec::new();
                self.collect_native_descendants(a, &mut collected);
                let node = self.nodes.get_mut(&a).unwrap();
                if node.nv_children != collected {
                    node.nv_children = collected.clone();
                    self.patches.push_back(Patch::Subviews(a, collected));
                }
                break;
            }
            ancestor = self.nodes[&a].superview;
        }
    }

    /// Either creates, replaces, or updates a view, then renders its body.
    ///
    /// Returns the native views heading the subtree, in order: the view itself if it is native,
    /// its native descendants otherwise.
    fn diff(&mut self, id: ViewId, view: &Arc<dyn View>) -> Vec<ViewId> {
        if let Some(node) = self.nodes.get(&id) {
            if node.view.as_any().type_id() == view.as_any().type_id() {
                // same kind of view; only needs a prop diff
                if !node.view.eq(&**view) {
                    self.update_view(id, view);
                }
            } else {
                // different view; needs replacing
                self.replace_view(id, view);
            }
        } else {
            self.add_view(id, view, false);
        }

        self.render(id)
    }

    /// Renders a view's body and diffs the result against its current subviews.
    fn render(&mut self, id: ViewId) -> Vec<ViewId> {
        let (body, is_native) = {
            let node = self.nodes.get(&id).expect("rendering nonexistent view");
            (node.view.body(node.state.as_any()), node.is_native)
        };

        let nv_subviews = self.diff_subviews(id, body);

        if is_native {
            let node = self.nodes.get_mut(&id).unwrap();
            if node.nv_children != nv_subviews {
                node.nv_children = nv_subviews.clone();
                self.patches.push_back(Patch::Subviews(id, nv_subviews));
            }
            vec![id]
        } else {
            nv_subviews
        }
    }

    /// Adds a new view to the tree.
    fn add_view(&mut self, id: ViewId, view: &Arc<dyn View>, replacing_native: bool) {
        let is_native = view.native_type().is_some();
        let state = view.new_state(Context::new(id, self.message_send.clone()));
        self.register_handlers(id, view);

        if is_native {
            let native = view
                .native_view()
                .expect("native_type() is Some but native_view() is None");
            let patch = if replacing_native {
                Patch::Replace(id, native)
            } else {
                Patch::Update(id, native)
            };
            self.patches.push_back(patch);
        }

        log::trace!("adding view {:?}: {:?}", id, view);
        self.nodes.insert(
            id,
            TreeNode {
                view: Arc::clone(view),
                is_native,
                superview: None,
                state,
                subviews: Vec::new(),
                nv_children: Vec::new(),
            },
        );
    }

    /// Removes a view and its subviews.
    ///
    /// Does *not* remove the view from the superview's `subviews` list. The view must exist.
    ///
    /// - `covered`: true if a patch already covers the removal of this subtree's native views,
    ///   so no further removal patches are emitted below it.
    fn remove_view(&mut self, id: ViewId, covered: bool) {
        let node = self.nodes.remove(&id).expect("removing nonexistent view");
        self.event_handlers.remove_view(id);
        log::trace!("removing view {:?}", id);

        let mut covered_below = covered;
        if node.is_native && !covered {
            // the backend removes the whole native subtree with it
            self.patches.push_back(Patch::Remove(id));
            covered_below = true;
        }
        for subview in node.subviews {
            self.remove_view(subview, covered_below);
        }
    }

    /// Replaces a view with another of a different type.
    ///
    /// The view keeps its id but loses its state and subviews. The view must exist.
    fn replace_view(&mut self, id: ViewId, view: &Arc<dyn View>) {
        let current = self.nodes.get(&id).expect("replacing nonexistent view");
        let superview = current.superview;
        let was_native = current.is_native;
        let is_native = view.native_type().is_some();
        let both_native = was_native && is_native;

        // for native-to-native replacement a single Replace patch covers the old subtree
        self.remove_view(id, both_native);
        self.add_view(id, view, both_native);

        let node = self.nodes.get_mut(&id).unwrap();
        node.superview = superview;
    }

    /// Updates an existing view with new properties, which must be of the same type.
    fn update_view(&mut self, id: ViewId, view: &Arc<dyn View>) {
        {
            let node = self.nodes.get_mut(&id).expect("updating nonexistent view");
            debug_assert!(
                node.view.as_any().type_id() == view.as_any().type_id(),
                "update_view called with incorrect type"
            );
            node.state.will_update(&**view);
            node.view = Arc::clone(view);
        }
        self.register_handlers(id, view);

        let node = &self.nodes[&id];
        if node.is_native {
            let native = view
                .native_view()
                .expect("native_type() is Some but native_view() is None");
            self.patches.push_back(Patch::Update(id, native));
        }
    }

    /// Registers or clears the event handlers a native view carries.
    fn register_handlers(&mut self, id: ViewId, view: &Arc<dyn View>) {
        if let Some(layer) = view.as_any().downcast_ref::<Layer>() {
            match &layer.pointer_action {
                Some(action) => self.event_handlers.add_pointer(id, action.clone()),
                None => self.event_handlers.remove_handler(id, EventTypeId::Pointer),
            }
        }
    }

    /// Diffs the subview/the subviews of a node.
    ///
    /// Returns the native views heading the subtrees of all subviews, in order.
    fn diff_subviews(&mut self, superview: ViewId, subview: Arc<dyn View>) -> Vec<ViewId> {
        let mut single_subview_storage = Vec::with_capacity(1);
        let subviews: &Fragment = match subview.as_any().downcast_ref::<Fragment>() {
            Some(subviews) => subviews, // list of subviews
            None => match subview.as_any().downcast_ref::<()>() {
                Some(()) => &single_subview_storage, // no subviews at all
                None => {
                    // single subview
                    single_subview_storage.push(Arc::clone(&subview));
                    &single_subview_storage
                }
            },
        };

        // To identify which existing subview and newly rendered subview are meant to be the
        // same, each subview has a key.

        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        enum Key {
            /// A user-specified key.
            Key(u64),
            /// An automatically assigned key.
            AutoKey(u64),
        }

        // If a subview doesn't have a user-specified key, it'll be auto-keyed sequentially by
        // index ignoring user-keyed items, e.g.
        //
        // array     [A, B, C(key=1), D(key=2), E]
        // auto-key   0  1                      2

        let mut auto_key_counter = 0;
        let mut current_subviews_by_key = HashMap::new();
        let current_ids: Vec<ViewId> = self.nodes[&superview].subviews.clone();
        for id in current_ids {
            let key = self.nodes[&id].view.key().map(Key::Key).unwrap_or_else(|| {
                let k = auto_key_counter;
                auto_key_counter += 1;
                Key::AutoKey(k)
            });
            current_subviews_by_key.insert(key, id);
        }

        let mut auto_key_counter = 0;
        let mut new_subviews = Vec::new();
        let mut nv_subviews = Vec::new();

        for view in subviews.iter().map(|view| Arc::clone(view)) {
            let key = view.key().map(Key::Key).unwrap_or_else(|| {
                let k = auto_key_counter;
                auto_key_counter += 1;
                Key::AutoKey(k)
            });

            let (subview_id, is_new) = match current_subviews_by_key.remove(&key) {
                // this new subview already has a corresponding old subview
                Some(id) => (id, false),
                // no existing view with the same key, needs to be created
                None => (ViewId::new(), true),
            };

            let mut nvs = self.diff(subview_id, &view);
            nv_subviews.append(&mut nvs);

            if is_new {
                let subview_node = self.nodes.get_mut(&subview_id).unwrap();
                subview_node.superview = Some(superview);
            }
            new_subviews.push(subview_id);
        }

        // unused subviews need to be removed
        for (_, id) in current_subviews_by_key {
            self.remove_view(id, false);
        }

        let superview_node = self
            .nodes
            .get_mut(&superview)
            .expect("diffing subviews of nonexistent view");
        superview_node.subviews = new_subviews;
        nv_subviews
    }

    /// Collects all native descendants of a view, in-order.
    fn collect_native_descendants(&self, id: ViewId, descendants: &mut Vec<ViewId>) {
        for id in &self.nodes[&id].subviews {
            if self.nodes[id].is_native {
                descendants.push(*id);
            } else {
                self.collect_native_descendants(*id, descendants);
            }
        }
    }
}

/// Refers to a single event handler.
type HandlerId = (ViewId, EventTypeId);

/// Helper enum for EventHandlers.
#[derive(Debug)]
enum PolyEventHandler {
    Pointer(EventHandler<Pointer>),
}

/// List of event handlers, keyed by view and event type.
#[derive(Debug)]
struct EventHandlers {
    map: BTreeMap<HandlerId, PolyEventHandler>,
}

impl EventHandlers {
    fn new() -> EventHandlers {
        EventHandlers {
            map: BTreeMap::new(),
        }
    }

    fn add_pointer(&mut self, view: ViewId, handler: EventHandler<Pointer>) {
        self.map
            .insert((view, EventTypeId::Pointer), PolyEventHandler::Pointer(handler));
    }

    fn pointer(&self, view: ViewId) -> Option<EventHandler<Pointer>> {
        match self.map.get(&(view, EventTypeId::Pointer)) {
            Some(PolyEventHandler::Pointer(handler)) => Some(handler.clone()),
            None => None,
        }
    }

    fn remove_handler(&mut self, view: ViewId, ty: EventTypeId) {
        self.map.remove(&(view, ty));
    }

    fn remove_view(&mut self, view: ViewId) {
        let keys_to_remove: Vec<_> = self
            .map
            .range((view, EventTypeId::MIN)..=(view, EventTypeId::MAX))
            .map(|(k, _)| *k)
            .collect();
        for key in keys_to_remove {
            self.map.remove(&key);
        }
    }
}
