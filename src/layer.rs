use crate::color::Color;
use crate::events::{EventHandler, Pointer};
use crate::impl_view;
use crate::nv_tree::NativeView;
use crate::rect::Rect;
use crate::view::{Fragment, NativeType, View};

/// A native view that contains graphical content and may have subviews.
#[derive(Debug)]
pub struct Layer {
    pub key: Option<u64>,

    /// Layer bounds.
    pub bounds: Rect,

    /// Background color, with which the layer bounds will be filled--respecting the corner radius.
    pub background: Color,

    /// Corner radius.
    pub corner_radius: f64,

    /// Layer opacity.
    pub opacity: f64,

    /// Subviews of this layer.
    pub subviews: Fragment,

    /// Handler for pointer presses inside the layer.
    pub pointer_action: Option<EventHandler<Pointer>>,
}

impl Default for Layer {
    fn default() -> Self {
        Layer {
            key: None,
            bounds: Rect::zero(),
            background: Color::default(),
            corner_radius: 0.,
            opacity: 1.,
            subviews: Vec::new(),
            pointer_action: None,
        }
    }
}

impl PartialEq for Layer {
    fn eq(&self, other: &Layer) -> bool {
        // event handlers are opaque and not compared
        self.bounds == other.bounds
            && self.background == other.background
            && self.corner_radius == other.corner_radius
            && self.opacity == other.opacity
            && self.subviews.eq(&other.subviews)
    }
}

impl_view! {
    Layer;
    fn body(&self, _state: &()) {
        std::sync::Arc::new(self.subviews.clone())
    }
    fn native_type(&self) -> Option<NativeType> {
        Some(NativeType::Layer)
    }
    fn native_view(&self) -> Option<NativeView> {
        Some(NativeView::Layer {
            bounds: self.bounds,
            background: self.background,
            corner_radius: self.corner_radius,
            opacity: self.opacity,
        })
    }
    fn key(&self) -> Option<u64> {
        self.key
    }
}
