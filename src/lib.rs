//! UI library.
//!
//! # Conceptual overview
//! Fledge is a declarative view-based UI toolkit, shipped here with a small demo UI: a root view
//! with a static header and a toggle-able label.
//!
//! ## Views
//! There are two types of views: native views, and regular composite views (as well as some
//! special view types like Fragments). Native views like layers or text will be visible
//! on-screen and can be interacted with, while composite views are simply made up of other
//! (simpler) views.
//!
//! Views have properties, state, and a body. When a view is created in code, it is not an actual
//! view but a virtual representation of a view, and should hence be very cheap to create,
//! starting with constructors: views should not do anything on their own when created other than
//! storing their properties. When the view is realized, it will be asked to create a state
//! object which will persist over the lifetime of the view. Finally, the view body is derived
//! from its properties and its state and declares the view's subviews.
//!
//! ## Events and messages
//! Input events arrive from the backend targeted at a native view and bubble up from there: the
//! closest ancestor with a handler for the event type receives it. Handlers don't mutate state
//! directly--state is owned by the tree--so a handler that wants to change something sends a
//! message through a [`Messenger`] to the state that owns the data. Messages are applied on the
//! next tree update, and a state that changes in response marks its view for re-render within
//! that same update. A button press is therefore fully processed, state flipped and screen
//! updated, in one synchronous cycle.
//!
//! ## NVTree and Backends
//! To get the views in a ViewTree to show up on screen, an NVTree (native-view tree) and a
//! backend is required. The NVTree is like the ViewTree--except it only contains native
//! views--and is responsible for keeping the backend in sync with the view tree.
//!
//! Backends are platform-specific UI frameworks abstracted to a common interface. The crate
//! ships [`MemoryBackend`], a retained in-process backend used headless and in tests.
//!
//! All backends are guaranteed to support:
//!
//! - Layers
//! - Text
//! - Images
//! - pointer press events

pub mod backend;
pub mod color;
mod context;
pub mod events;
mod host;
mod image;
mod layer;
mod nv_tree;
pub mod raw_events;
mod rect;
mod text;
#[macro_use]
mod view;
mod view_tree;

mod button;
mod root;
mod toggle;

pub use backend::{Backend, MemoryBackend, MemoryError};
pub use button::Button;
pub use color::Color;
pub use context::{Context, Messenger};
pub use host::Host;
pub use image::{Image, ImageScale};
pub use layer::Layer;
pub use nv_tree::{NVTree, NativeView, Patch, PatchError};
pub use rect::Rect;
pub use root::RootView;
pub use text::Text;
pub use toggle::{Toggle, ToggleLabel};
pub use view::{Fragment, NativeType, State, View, ViewId};
pub use view_tree::ViewTree;
