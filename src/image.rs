use crate::color::Color;
use crate::impl_view;
use crate::nv_tree::NativeView;
use crate::view::NativeType;

/// Display sizes for symbol images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageScale {
    Small,
    Medium,
    Large,
}

/// A native view that draws a named symbol image from the platform's symbol set.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    pub key: Option<u64>,

    /// Symbol name, resolved by the backend.
    pub symbol: String,

    /// Display scale of the symbol.
    pub scale: ImageScale,

    /// Tint color; None leaves the platform's accent color in effect.
    pub tint: Option<Color>,
}

impl_view! {
    Image;
    fn body(&self, _state: &()) {
        std::sync::Arc::new(())
    }
    fn native_type(&self) -> Option<NativeType> {
        Some(NativeType::Image)
    }
    fn native_view(&self) -> Option<NativeView> {
        Some(NativeView::Image {
            symbol: self.symbol.clone(),
            scale: self.scale,
            tint: self.tint,
        })
    }
    fn key(&self) -> Option<u64> {
        self.key
    }
}
