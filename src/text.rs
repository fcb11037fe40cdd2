use crate::color::Color;
use crate::impl_view;
use crate::nv_tree::NativeView;
use crate::view::NativeType;

/// A native view that draws a single run of text.
///
/// Text never has subviews. Its opacity is a plain property; a fully transparent text view still
/// occupies its place in the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub key: Option<u64>,

    /// The string to draw.
    pub content: String,

    /// Text color.
    pub color: Color,

    /// Text opacity.
    pub opacity: f64,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Text {
        Text {
            content: content.into(),
            ..Text::default()
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Text {
            key: None,
            content: String::new(),
            color: Color::BLACK,
            opacity: 1.,
        }
    }
}

impl_view! {
    Text;
    fn body(&self, _state: &()) {
        std::sync::Arc::new(())
    }
    fn native_type(&self) -> Option<NativeType> {
        Some(NativeType::Text)
    }
    fn native_view(&self) -> Option<NativeView> {
        Some(NativeView::Text {
            content: self.content.clone(),
            color: self.color,
            opacity: self.opacity,
        })
    }
    fn key(&self) -> Option<u64> {
        self.key
    }
}
