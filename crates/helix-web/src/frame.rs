use crate::dom;
use crate::overlay::Overlay;
use crate::render;
use crate::scroll::ScrollObserver;
use helix_core::{
    Camera, FrameInputs, HelixVisual, MorphVisual, Page, PointerSmoother, SmoothScroller,
};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub window: web::Window,
    pub canvas: web::HtmlCanvasElement,
    pub gpu: Option<render::GpuState<'a>>,
    pub observer: ScrollObserver,
    pub overlay: Overlay,
    pub page: Page,
    pub helix: HelixVisual,
    pub morph: MorphVisual,
    pub smooth: Option<SmoothScroller>,
    pub pointer: PointerSmoother,
    pub camera: Camera,

    pub start: Instant,
    pub last_instant: Instant,
}

impl<'a> FrameContext<'a> {
    /// Seconds since start-up; the clock every tween is scheduled against.
    pub fn now_sec(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32().min(0.1);
        self.last_instant = now;
        let now_sec = self.now_sec();

        let inbox = self.observer.drain();
        if inbox.resized {
            dom::sync_canvas_backing_size(&self.canvas);
        }
        if let Some(p) = inbox.pointer {
            self.pointer.set_raw(p);
        }

        let mut metrics = dom::scroll_metrics(&self.window);
        if let Some(smooth) = &mut self.smooth {
            smooth.set_limit(metrics.max_scroll());
            if inbox.scrolled {
                smooth.on_native_scroll(metrics.scroll_y);
            }
            if inbox.wheel_delta != 0.0 {
                smooth.on_wheel(inbox.wheel_delta);
            }
            if let Some(y) = smooth.step() {
                self.window.scroll_to_with_x_and_y(0.0, y);
                metrics.scroll_y = y;
            }
        }

        // Discrete channel: region crossings and overlay fades
        let events = self.page.on_scroll(&metrics, now_sec);
        if !events.is_empty() {
            let active = self.page.active();
            log::info!("[scroll] active section {:?}", active.name());
            if active.immediate {
                if let Some(index) = active.index {
                    for (key, v) in self.page.fader().section_opacities(index) {
                        self.overlay.apply(key, v);
                    }
                }
            }
            self.helix.observe(active, now_sec);
            self.morph.observe(active, now_sec);
        }
        let overlay = &self.overlay;
        let progress = self
            .page
            .tick(dt_sec, now_sec, |key, v| overlay.apply(key, v));

        let width = self.canvas.width();
        let height = self.canvas.height();
        self.camera.set_viewport(width as f32, height as f32);
        let pointer = self.pointer.step();
        let inputs = FrameInputs::new(
            now_sec,
            dt_sec,
            pointer,
            &self.camera,
            [width as f32, height as f32],
            self.window.device_pixel_ratio() as f32,
            progress,
        );

        let helix = *self.helix.update(&inputs);
        let pair = self.morph.update(&inputs);

        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(width, height);
            let morph = pair.map(|p| (self.morph.uniforms(), p));
            if let Err(e) = g.render(&helix, morph) {
                log::error!("render error: {:?}", e);
            }
        }
    }

    /// Stop every tween and fade; the visuals keep their last values.
    pub fn release(&mut self) {
        self.helix.release();
        self.morph.release();
        self.page.release();
        self.observer.release();
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    helix: &HelixVisual,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, &helix.attributes().particles).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Handle to a running animation-frame loop.
pub struct FrameLoop {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    /// Cancel the pending frame and drop the loop closure.
    pub fn cancel(&self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}

fn request_frame(
    tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: &Rc<Cell<Option<i32>>>,
) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        pending.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) -> FrameLoop {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let pending_clone = pending.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_clone.set(None);
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone, &pending_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick, &pending);
    FrameLoop { tick, pending }
}
