// Browser tests for the page contract. Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use light_ray::dom::{self, Canvases, GLOW_CANVAS_ID, PARTICLES_CANVAS_ID, RAY_CANVAS_ID};
use light_ray::error::SetupError;
use wasm_bindgen_test::*;
use web_sys as web;

wasm_bindgen_test_configure!(run_in_browser);

fn append(document: &web::Document, tag: &str, id: &str) -> web::Element {
    let el = document.create_element(tag).unwrap();
    el.set_id(id);
    document.body().unwrap().append_child(&el).unwrap();
    el
}

#[wasm_bindgen_test]
fn missing_canvas_is_reported() {
    let (_, document) = dom::window_document().unwrap();
    let err = dom::canvas_by_id(&document, "no-such-canvas").unwrap_err();
    assert_eq!(err, SetupError::MissingCanvas("no-such-canvas".into()));
}

#[wasm_bindgen_test]
fn non_canvas_element_is_rejected() {
    let (_, document) = dom::window_document().unwrap();
    let div = append(&document, "div", "not-a-canvas");
    let err = dom::canvas_by_id(&document, "not-a-canvas").unwrap_err();
    assert_eq!(err, SetupError::NotACanvas("not-a-canvas".into()));
    div.remove();
}

#[wasm_bindgen_test]
fn canvases_resolve_and_take_layer_styles() {
    let (_, document) = dom::window_document().unwrap();
    let els: Vec<_> = [RAY_CANVAS_ID, GLOW_CANVAS_ID, PARTICLES_CANVAS_ID]
        .iter()
        .map(|id| append(&document, "canvas", id))
        .collect();

    let canvases = Canvases::lookup(&document).unwrap();
    canvases.apply_z_order(light_ray::ray::LayerBand::Foreground.z_order());
    canvases.apply_opacity(light_ray::ray::layering::opacity_at(0.0));

    assert_eq!(canvases.glow.style().get_property_value("z-index").unwrap(), "22");
    assert_eq!(
        canvases.ray.style().get_property_value("opacity").unwrap(),
        "0.57"
    );

    for el in els {
        el.remove();
    }
}
