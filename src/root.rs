use crate::color::Color;
use crate::image::{Image, ImageScale};
use crate::impl_view;
use crate::layer::Layer;
use crate::text::Text;
use crate::toggle::ToggleLabel;
use crate::view::Fragment;
use std::sync::Arc;

/// The root of the demo UI: a globe icon, a greeting, and one [`ToggleLabel`] that starts
/// visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootView;

impl_view! {
    RootView;
    fn body(&self, _state: &()) {
        let subviews: Fragment = vec![
            Arc::new(Image {
                key: None,
                symbol: "globe".into(),
                scale: ImageScale::Large,
                tint: Some(Color::rgb(0., 0.48, 1.)),
            }),
            Arc::new(Text::new("Hello, world!")),
            Arc::new(ToggleLabel::new(true, Color::rgb(0.4, 0.6, 0.9))),
        ];
        Arc::new(Layer {
            subviews,
            ..Layer::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::View;

    #[test]
    fn test_body_has_exactly_one_toggle_label() {
        let body = RootView.body(&());
        let layer = body
            .as_any()
            .downcast_ref::<Layer>()
            .expect("root body should be a layer");

        let toggles: Vec<&ToggleLabel> = layer
            .subviews
            .iter()
            .filter_map(|view| view.as_any().downcast_ref::<ToggleLabel>())
            .collect();
        assert_eq!(toggles.len(), 1);
        assert!(toggles[0].visible);
    }

    #[test]
    fn test_body_header_is_static() {
        let body = RootView.body(&());
        let layer = body.as_any().downcast_ref::<Layer>().unwrap();

        let image = layer.subviews[0]
            .as_any()
            .downcast_ref::<Image>()
            .expect("first subview should be the icon");
        assert_eq!(image.symbol, "globe");
        assert_eq!(image.scale, ImageScale::Large);

        let greeting = layer.subviews[1]
            .as_any()
            .downcast_ref::<Text>()
            .expect("second subview should be the greeting");
        assert_eq!(greeting.content, "Hello, world!");
    }
}
