use crate::events::{EventHandler, Pointer};
use crate::impl_view;
use crate::layer::Layer;
use crate::text::Text;
use crate::view::Fragment;
use std::sync::Arc;

/// A pressable control: a text label inside a pointer-tracking layer.
///
/// Pressing anywhere inside the button invokes the press action once per press.
#[derive(Debug)]
pub struct Button {
    pub key: Option<u64>,

    /// The label text.
    pub label: String,

    /// Invoked when the button is pressed.
    pub press_action: Option<EventHandler<Pointer>>,
}

impl Button {
    pub fn new(label: impl Into<String>, press_action: EventHandler<Pointer>) -> Button {
        Button {
            key: None,
            label: label.into(),
            press_action: Some(press_action),
        }
    }
}

impl PartialEq for Button {
    fn eq(&self, other: &Button) -> bool {
        // the press action is opaque and not compared
        self.label == other.label
    }
}

impl_view! {
    Button;
    fn body(&self, _state: &()) {
        let label: Fragment = vec![Arc::new(Text::new(&*self.label))];
        Arc::new(Layer {
            subviews: label,
            pointer_action: self.press_action.clone(),
            ..Layer::default()
        })
    }
    fn key(&self) -> Option<u64> {
        self.key
    }
}
