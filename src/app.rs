use crate::dom::{self, Canvases};
use crate::events::{self, Inbox};
use crate::frame::{self, FrameContext};
use crate::ray::constants::REVEAL_DELAY_MS;
use crate::ray::{BandTracker, EffectInput, EffectParams, RayEffect};
use crate::render;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("light-ray starting");

    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("light ray init error: {:?}", e);
        }
    });
    Ok(())
}

/// Ordered bootstrap: page contract → parameters → effect → GPU → input
/// wiring → frame loop. Any failed step aborts with an error.
async fn init() -> anyhow::Result<()> {
    let (window, document) = dom::window_document()?;
    let canvases = Canvases::lookup(&document)?;

    let params = EffectParams::default()
        .with_overrides(|key| canvases.ray.get_attribute(&format!("data-{key}")));
    log::info!("[params] {:?}", params);

    // Hidden until the first frames have settled
    canvases.set_opacity_all("0");
    canvases.sync_backing_size();

    let mut effect = RayEffect::new(params);
    let (vw, vh) = dom::viewport_size(&window);
    effect.apply(EffectInput::Resize {
        width: vw as f32,
        height: vh as f32,
    });
    effect.apply(EffectInput::Scroll(window.scroll_y().unwrap_or(0.0) as f32));

    let gpu = render::GpuState::new(canvases.to_array(), &effect).await?;

    let inbox: Inbox = Rc::new(RefCell::new(Vec::new()));
    events::wire_scroll(&window, inbox.clone());
    events::wire_resize(&window, canvases.clone(), inbox.clone());
    let cards = events::wire_card_hover(&window, &document, inbox.clone());
    let sections = events::wire_section_observer(&window, &document, inbox.clone())
        .map_err(|e| anyhow::anyhow!("IntersectionObserver: {:?}", e))?;
    log::info!("[events] {} cards, {} sections", cards, sections);

    let revealed = Rc::new(Cell::new(false));
    let frame_ctx = Rc::new(RefCell::new(FrameContext {
        effect,
        inbox,
        gpu,
        canvases: canvases.clone(),
        bands: BandTracker::default(),
        revealed: revealed.clone(),
        running: Rc::new(Cell::new(true)),
        last_instant: Instant::now(),
    }));
    frame::start_loop(frame_ctx);

    dom::set_timeout(&window, REVEAL_DELAY_MS, move || {
        canvases.set_opacity_all("1");
        revealed.set(true);
    });

    log::info!("light ray ready");
    Ok(())
}
