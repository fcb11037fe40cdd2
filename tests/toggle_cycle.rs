//! End-to-end press/re-render cycles through a host with a memory backend.

use cgmath::Point2;
use fledge::{Color, Host, MemoryBackend, NativeView, RootView, ToggleLabel, ViewId};
use std::sync::Arc;

/// The text element whose opacity the toggle drives.
const CAPTION: &str = "보인다";

fn find_text(backend: &MemoryBackend, content: &str) -> (ViewId, f64) {
    backend
        .views()
        .find_map(|(id, view)| match view {
            NativeView::Text {
                content: c,
                opacity,
                ..
            } if c == content => Some((id, *opacity)),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no text view with content {:?}", content))
}

fn caption_opacity(host: &Host<MemoryBackend>) -> f64 {
    find_text(host.backend(), CAPTION).1
}

/// Presses the show/hide button by targeting its label; the event bubbles to the button's
/// pointer-tracking layer.
fn press_toggle(host: &mut Host<MemoryBackend>) {
    let (label, _) = find_text(host.backend(), "show/hide");
    host.backend_mut().push_pointer(label, Point2::new(1., 1.));
    host.poll().unwrap();
}

fn toggle_host(visible: bool) -> Host<MemoryBackend> {
    let view = Arc::new(ToggleLabel::new(visible, Color::rgb(0.4, 0.6, 0.9)));
    Host::new(view, MemoryBackend::new()).unwrap()
}

#[test]
fn initial_visibility_sets_opacity() {
    assert_eq!(caption_opacity(&toggle_host(true)), 1.);
    assert_eq!(caption_opacity(&toggle_host(false)), 0.);
}

#[test]
fn pressing_show_hide_flips_opacity() {
    let mut host = toggle_host(true);
    assert_eq!(caption_opacity(&host), 1.);

    press_toggle(&mut host);
    assert_eq!(caption_opacity(&host), 0.);

    press_toggle(&mut host);
    assert_eq!(caption_opacity(&host), 1.);
}

#[test]
fn starts_hidden_then_shows() {
    let mut host = toggle_host(false);
    assert_eq!(caption_opacity(&host), 0.);

    press_toggle(&mut host);
    assert_eq!(caption_opacity(&host), 1.);
}

#[test]
fn visibility_follows_press_parity() {
    for &initial in &[true, false] {
        let mut host = toggle_host(initial);
        for n in 1..=5 {
            press_toggle(&mut host);
            let expected = initial ^ (n % 2 == 1);
            assert_eq!(caption_opacity(&host), if expected { 1. } else { 0. });
        }
    }
}

#[test]
fn two_presses_in_one_poll_cancel_out() {
    let mut host = toggle_host(true);
    let (label, _) = find_text(host.backend(), "show/hide");

    host.backend_mut().push_pointer(label, Point2::new(1., 1.));
    host.backend_mut().push_pointer(label, Point2::new(1., 1.));
    host.poll().unwrap();

    assert_eq!(caption_opacity(&host), 1.);
}

#[test]
fn root_view_renders_header_and_visible_toggle() {
    let host = Host::new(Arc::new(RootView), MemoryBackend::new()).unwrap();
    let backend = host.backend();

    assert!(backend.root().is_some(), "a root layer should be installed");
    find_text(backend, "Hello, world!");
    assert!(
        backend.views().any(|(_, view)| match view {
            NativeView::Image { symbol, .. } => symbol == "globe",
            _ => false,
        }),
        "the header icon should be realized"
    );
    assert_eq!(caption_opacity(&host), 1.);
}

#[test]
fn presses_nobody_handles_are_dropped() {
    let mut host = toggle_host(true);
    let (caption, _) = find_text(host.backend(), CAPTION);

    // the caption is not inside the button's layer, so the press bubbles to the
    // toggle's own square, which has no handler
    host.backend_mut().push_pointer(caption, Point2::new(1., 1.));
    host.poll().unwrap();

    assert_eq!(caption_opacity(&host), 1.);
}
