use crate::error::SetupError;
use crate::ray::constants::MAX_PIXEL_RATIO;
use crate::ray::{LayerOpacity, ZOrder};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub const RAY_CANVAS_ID: &str = "light-ray-canvas";
pub const GLOW_CANVAS_ID: &str = "light-glow-canvas";
pub const PARTICLES_CANVAS_ID: &str = "light-particles-canvas";

/// The three stacked canvases, in draw order.
#[derive(Clone)]
pub struct Canvases {
    pub ray: web::HtmlCanvasElement,
    pub glow: web::HtmlCanvasElement,
    pub particles: web::HtmlCanvasElement,
}

impl Canvases {
    pub fn lookup(document: &web::Document) -> Result<Self, SetupError> {
        Ok(Self {
            ray: canvas_by_id(document, RAY_CANVAS_ID)?,
            glow: canvas_by_id(document, GLOW_CANVAS_ID)?,
            particles: canvas_by_id(document, PARTICLES_CANVAS_ID)?,
        })
    }

    pub fn all(&self) -> [&web::HtmlCanvasElement; 3] {
        [&self.ray, &self.glow, &self.particles]
    }

    pub fn to_array(&self) -> [web::HtmlCanvasElement; 3] {
        [self.ray.clone(), self.glow.clone(), self.particles.clone()]
    }

    pub fn sync_backing_size(&self) {
        for c in self.all() {
            sync_canvas_backing_size(c);
        }
    }

    pub fn set_opacity_all(&self, value: &str) {
        for c in self.all() {
            _ = c.style().set_property("opacity", value);
        }
    }

    pub fn apply_z_order(&self, z: ZOrder) {
        _ = self.ray.style().set_property("z-index", &z.ray.to_string());
        _ = self.glow.style().set_property("z-index", &z.glow.to_string());
        _ = self
            .particles
            .style()
            .set_property("z-index", &z.particles.to_string());
    }

    pub fn apply_opacity(&self, o: LayerOpacity) {
        _ = self
            .ray
            .style()
            .set_property("opacity", &format!("{:.2}", o.ray));
        _ = self
            .glow
            .style()
            .set_property("opacity", &format!("{:.2}", o.glow));
        _ = self
            .particles
            .style()
            .set_property("opacity", &format!("{:.2}", o.particles));
    }
}

#[inline]
pub fn window_document() -> Result<(web::Window, web::Document), SetupError> {
    let window = web::window().ok_or(SetupError::NoWindow)?;
    let document = window.document().ok_or(SetupError::NoDocument)?;
    Ok((window, document))
}

pub fn canvas_by_id(
    document: &web::Document,
    id: &str,
) -> Result<web::HtmlCanvasElement, SetupError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| SetupError::MissingCanvas(id.to_string()))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| SetupError::NotACanvas(id.to_string()))
}

#[inline]
pub fn pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .min(MAX_PIXEL_RATIO)
}

/// Viewport size in CSS pixels.
pub fn viewport_size(window: &web::Window) -> (f64, f64) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w, h)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    let dpr = pixel_ratio();
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr) as u32;
    let h_px = (rect.height() * dpr) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
}

/// Elements matching `selector`, skipping non-element nodes.
pub fn query_all(document: &web::Document, selector: &str) -> Vec<web::Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        log::warn!("[dom] invalid selector {selector}");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web::Element>().ok())
        .collect()
}

/// Run `handler` once after `delay_ms`.
pub fn set_timeout(window: &web::Window, delay_ms: i32, handler: impl FnOnce() + 'static) {
    let closure = Closure::once(handler);
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        delay_ms,
    );
    closure.forget();
}
