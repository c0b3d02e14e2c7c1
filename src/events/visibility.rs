use super::pointer::element_center;
use super::Inbox;
use crate::dom;
use crate::ray::constants::SECTION_VISIBILITY_THRESHOLD;
use crate::ray::{EffectInput, InteractionKind};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub const SECTION_SELECTOR: &str = ".ray-section";

/// Nudge the ray toward each section as it scrolls into view.
pub fn wire_section_observer(
    window: &web::Window,
    document: &web::Document,
    inbox: Inbox,
) -> Result<usize, JsValue> {
    let win = window.clone();
    let closure = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let center = element_center(&win, &entry.target());
                inbox.borrow_mut().push(EffectInput::Interaction {
                    kind: InteractionKind::SectionVisible,
                    center,
                });
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let init = web::IntersectionObserverInit::new();
    init.set_root_margin("0px");
    init.set_threshold(&JsValue::from_f64(SECTION_VISIBILITY_THRESHOLD));
    let observer =
        web::IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)?;
    closure.forget();

    let sections = dom::query_all(document, SECTION_SELECTOR);
    for section in &sections {
        observer.observe(section);
    }
    Ok(sections.len())
}
