use super::Inbox;
use crate::dom;
use crate::ray::interaction::viewport_to_ray_space;
use crate::ray::{EffectInput, InteractionKind};
use glam::Vec2;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const CARD_SELECTOR: &str = ".ray-card";

/// Element centre in ray-space page coordinates.
pub fn element_center(window: &web::Window, el: &web::Element) -> Vec2 {
    let rect = el.get_bounding_client_rect();
    let center = Vec2::new(
        (rect.left() + rect.width() / 2.0) as f32,
        (rect.top() + rect.height() / 2.0) as f32,
    );
    let (w, h) = dom::viewport_size(window);
    viewport_to_ray_space(center, Vec2::new(w as f32, h as f32))
}

/// Pull the ray toward a card whenever the pointer enters it.
pub fn wire_card_hover(window: &web::Window, document: &web::Document, inbox: Inbox) -> usize {
    let cards = dom::query_all(document, CARD_SELECTOR);
    for card in &cards {
        let win = window.clone();
        let el = card.clone();
        let inbox = inbox.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::MouseEvent| {
            let center = element_center(&win, &el);
            inbox.borrow_mut().push(EffectInput::Interaction {
                kind: InteractionKind::CardHover,
                center,
            });
        }) as Box<dyn FnMut(_)>);
        _ = card.add_event_listener_with_callback("mouseenter", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    cards.len()
}
