use crate::dom::{self, Canvases};
use crate::events::Inbox;
use crate::ray::{BandTracker, RayEffect};
use crate::render;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub effect: RayEffect,
    pub inbox: Inbox,
    pub gpu: render::GpuState,
    pub canvases: Canvases,
    pub bands: BandTracker,
    /// Set once the fade-in delay has elapsed; canvases stay hidden until then.
    pub revealed: Rc<Cell<bool>>,
    /// Cleared to stop the loop.
    pub running: Rc<Cell<bool>>,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        for input in self.inbox.borrow_mut().drain(..) {
            self.effect.apply(input);
        }

        let state = self.effect.advance(dt_sec);

        if let Some(z) = self.bands.pending(state.band) {
            log::debug!("[layers] {:?}", state.band);
            self.canvases.apply_z_order(z);
        }
        if self.revealed.get() {
            self.canvases.apply_opacity(state.opacity);
        }

        match self
            .gpu
            .render(&mut self.effect, &state, dom::pixel_ratio() as f32)
        {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("[gpu] surface lost; reconfiguring");
                self.gpu.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("[gpu] surface timeout; skipping frame");
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("[gpu] out of memory; stopping light ray");
                self.running.set(false);
            }
            Err(e) => {
                log::warn!("[gpu] surface error: {:?}", e);
            }
        }
    }
}

/// Drive `frame_ctx` from requestAnimationFrame until its `running` flag clears.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let running = frame_ctx.borrow().running.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !running.get() {
            log::info!("[frame] loop stopped");
            return;
        }
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
