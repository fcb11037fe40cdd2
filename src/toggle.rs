use crate::button::Button;
use crate::color::Color;
use crate::context::Messenger;
use crate::events::EventHandler;
use crate::impl_view;
use crate::layer::Layer;
use crate::text::Text;
use crate::view::{Fragment, State};
use core::any::Any;
use std::sync::Arc;

/// Message that flips a [`ToggleLabel`]'s visibility flag.
#[derive(Debug, Clone, Copy)]
pub struct Toggle;

/// A colored square with a show/hide button and a text element whose opacity follows a boolean
/// visibility flag.
///
/// The flag lives in the view's state: the properties only supply its initial value, so a parent
/// re-rendering with the same properties never resets it. Hiding is an opacity effect--the text
/// stays in the tree either way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToggleLabel {
    /// Initial visibility of the text element.
    pub visible: bool,

    /// Background color of the square.
    pub color: Color,
}

impl ToggleLabel {
    pub fn new(visible: bool, color: Color) -> ToggleLabel {
        ToggleLabel { visible, color }
    }
}

#[derive(Debug)]
struct ToggleLabelState {
    visible: bool,
    messenger: Messenger,
}

impl State for ToggleLabelState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn handle_message(&mut self, message: &dyn Any) -> bool {
        if message.downcast_ref::<Toggle>().is_some() {
            self.visible = !self.visible;
            true
        } else {
            false
        }
    }
}

impl_view! {
    ToggleLabel;
    fn new_state(&self, context) {
        Box::new(ToggleLabelState {
            visible: self.visible,
            messenger: context.messenger(),
        })
    }
    fn body(&self, state: &ToggleLabelState) {
        let messenger = state.messenger.clone();
        let subviews: Fragment = vec![
            Arc::new(Button::new(
                "show/hide",
                EventHandler::new(move |_| messenger.send(Toggle)),
            )),
            Arc::new(Text {
                content: "보인다".into(),
                opacity: if state.visible { 1. } else { 0. },
                ..Text::default()
            }),
        ];
        Arc::new(Layer {
            background: self.color,
            subviews,
            ..Layer::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_message_parity() {
        // visibility after n toggles is initial XOR (n mod 2 == 1)
        for &initial in &[true, false] {
            let mut state = ToggleLabelState {
                visible: initial,
                messenger: Messenger::detached(),
            };
            for n in 1..=4 {
                assert!(state.handle_message(&Toggle));
                assert_eq!(state.visible, initial ^ (n % 2 == 1));
            }
        }
    }

    #[test]
    fn test_unknown_messages_are_ignored() {
        let mut state = ToggleLabelState {
            visible: true,
            messenger: Messenger::detached(),
        };
        assert!(!state.handle_message(&"something else"));
        assert!(state.visible);
    }
}
