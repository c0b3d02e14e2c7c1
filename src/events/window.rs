use super::Inbox;
use crate::dom::{self, Canvases};
use crate::ray::EffectInput;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_scroll(window: &web::Window, inbox: Inbox) {
    let win = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        let y = win.scroll_y().unwrap_or(0.0);
        inbox.borrow_mut().push(EffectInput::Scroll(y as f32));
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Keep canvas backing stores at CSS size × pixel ratio and tell the effect
/// about the new viewport. Surfaces follow on the next frame.
pub fn wire_resize(window: &web::Window, canvases: Canvases, inbox: Inbox) {
    let win = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        canvases.sync_backing_size();
        let (width, height) = dom::viewport_size(&win);
        inbox.borrow_mut().push(EffectInput::Resize {
            width: width as f32,
            height: height as f32,
        });
    }) as Box<dyn FnMut()>);
    _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
