use crate::context::Context;
use crate::nv_tree::NativeView;
use core::any::Any;
use core::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// A unique identifier for a view.
///
/// (this is just a UUID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(Uuid);

impl ViewId {
    pub(crate) fn new() -> ViewId {
        ViewId(Uuid::new_v4())
    }
}

/// Implements the `View` trait for a given struct.
///
/// Assumes that `PartialEq` is implemented. `Eq` would be preferred to avoid frequent updates.
///
/// Syntax:
///
/// ```text
/// impl_view! {
///     StructName;
///     fn new_state(&self, context) { // optional
///         ... -> Box<dyn State>
///     }
///     fn body(&self, state_variable: &StateType) {
///         ... -> Arc<dyn View>
///     }
///     (put extra items like key() here, using normal rust syntax)
/// }
/// ```
#[macro_export]
macro_rules! impl_view {
    (
        $(#[$attr:meta])*
        $struct:ty;
        $(fn new_state(&$ns_self:ident, $ns_ctx:ident) $new_state:tt)*
        fn body(&$self:ident, $state_var:ident: &$state_type:ty) $body:tt
        $($extra:tt)*
    ) => {
        $(#[$attr])*
        impl $crate::View for $struct {
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            $(
                fn new_state(&$ns_self, $ns_ctx: $crate::Context) -> Box<dyn $crate::State> {
                    $new_state
                }
            )*

            fn body(&$self, state: &dyn ::core::any::Any) -> ::std::sync::Arc<dyn $crate::View> {
                if let Some($state_var) = state.downcast_ref::<$state_type>() {
                    fn _dont_complain_about_unused<T>(_: T) {}
                    _dont_complain_about_unused($state_var);
                    $body
                } else {
                    panic!(
                        "View::body: invalid state for {}; expected type {}",
                        stringify!($struct),
                        stringify!($state_type)
                    );
                }
            }

            fn eq(&self, other: &dyn $crate::View) -> bool {
                if let Some(other) = other.as_any().downcast_ref::<$struct>() {
                    self == other
                } else {
                    false
                }
            }

            $($extra)*
        }
    };
}

/// Views are the basic components of UI: they encapsulate properties and state to render a body
/// that’s composed of more views.
///
/// `View` implementors themselves should be cheap and fast to create, as they are not actual views
/// but their virtual representation à la virtual DOM. Similarly, `body` should be fast to compute,
/// preferably as a pure function dependent only on the view properties and the view state.
///
/// This trait should probably be implemented using the [`impl_view`] macro.
///
/// # Panics
/// `body` should always return a native view, eventually. Notably, care should be taken when
/// returning non-native views such that it doesn’t cause a cycle and end up causing an infinite
/// loop.
pub trait View: Any + fmt::Debug + Send + Sync {
    /// Creates a new state object for this view.
    ///
    /// Will create [`()`] by default.
    fn new_state(&self, context: Context) -> Box<dyn State> {
        drop(context);
        Box::new(())
    }

    /// Renders the body of this view.
    fn body(&self, state: &dyn Any) -> Arc<dyn View>;

    /// Compares this view to another; used for diffing.
    fn eq(&self, other: &dyn View) -> bool;

    /// For downcasting.
    fn as_any(&self) -> &dyn Any;

    /// A key used to identify this view in an array of views.
    ///
    /// Should be derived from a `key` property.
    fn key(&self) -> Option<u64> {
        None
    }

    /// Returns the native type if this is a native view.
    ///
    /// Should always be None for types outside of this crate.
    #[doc(hidden)]
    fn native_type(&self) -> Option<NativeType> {
        None
    }

    /// Returns the serialized native view payload if this is a native view.
    #[doc(hidden)]
    fn native_view(&self) -> Option<NativeView> {
        None
    }
}

/// Types of native views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeType {
    Layer,
    Text,
    Image,
}

/// View state associated with a view.
///
/// Will be dropped right after the view disappears.
pub trait State: Any + fmt::Debug + Send {
    /// For downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Called before the component is updated from a new virtual view.
    fn will_update(&self, update: &dyn View) {
        drop(update);
    }

    /// Handles a message sent to this view through a [`Messenger`](crate::Messenger).
    ///
    /// Returning true marks the view dirty; its body will be re-rendered within the same update
    /// cycle.
    fn handle_message(&mut self, message: &dyn Any) -> bool {
        drop(message);
        false
    }
}

impl_view! {
    /// An empty view type that does absolutely nothing.
    ();
    fn body(&self, _state: &()) {
        Arc::new(())
    }
}

/// For stateless views.
impl State for () {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub type Fragment = Vec<Arc<dyn View>>;

/// A fragment view that expands into its children.
impl View for Fragment {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn body(&self, _: &dyn Any) -> Arc<dyn View> {
        Arc::new(self.clone())
    }
    fn eq(&self, other: &dyn View) -> bool {
        if let Some(other) = other.as_any().downcast_ref::<Self>() {
            if self.len() != other.len() {
                return false;
            }
            for (i, j) in self.iter().zip(other.iter()) {
                if !i.eq(&**j) {
                    return false;
                }
            }
            true
        } else {
            false
        }
    }
}
